use crate::api::DistanceFunction;
use crate::{KMeans, KMeansConfig, KMeansError, KMeansState, Primitive};

/// Seed the state with caller-supplied centroids [row-major]. Passing fewer centroids than `k`
/// reduces the effective `k` of the state.
pub fn calculate<T, D>(
    kmean: &KMeans<T, D>, state: &mut KMeansState<T>, _config: &KMeansConfig<'_, T>, computed: Vec<T>,
) -> Result<(), KMeansError>
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    if computed.is_empty() || computed.len() % kmean.sample_dims != 0 {
        return Err(KMeansError::InputDimensionMismatch {
            expected: kmean.sample_dims,
            actual: computed.len() % kmean.sample_dims.max(1),
        });
    }
    let cnt = computed.len() / kmean.sample_dims;
    if cnt > state.k {
        return Err(KMeansError::InvalidParameter(format!("Initialized with {} centroids, but k is {}", cnt, state.k)));
    }
    if computed.iter().any(|v| !v.is_finite()) {
        return Err(KMeansError::InvalidParameter("precomputed centroids must be finite".to_string()));
    }

    state.truncate_k(cnt);
    computed.chunks_exact(kmean.sample_dims).enumerate().for_each(|(ci, c)| {
        state.set_centroid_from_iter(ci, c.iter().cloned());
    });
    Ok(())
}
