use crate::api::DistanceFunction;
use crate::{KMeans, KMeansConfig, KMeansError, KMeansState, Primitive};
use log::warn;
use std::collections::HashSet;

/// Parameters of the linear congruential recurrence `state = (state * multiplier + increment) mod modulus`,
/// used to draw the initial centroid indices.
///
/// ## Default
/// `multiplier = 170171172`, `increment = 173`, `modulus = 2^17`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LcgParams {
    pub multiplier: u64,
    pub increment: u64,
    pub modulus: u64,
}
impl Default for LcgParams {
    fn default() -> Self {
        Self { multiplier: 170_171_172, increment: 173, modulus: 1 << 17 }
    }
}

/// Deterministic index sequence into a sample array of `sample_cnt` entries.
///
/// Every state of the recurrence is scaled into `0..sample_cnt` using its high-order bits
/// (`state * sample_cnt / modulus`). The low-order bits of a power-of-two modulus recurrence
/// have a very short period, so a plain `state % sample_cnt` would collapse small inputs onto
/// a single index. The sequence ends as soon as the recurrence revisits a state.
pub struct LcgIndices {
    state: u64,
    params: LcgParams,
    sample_cnt: u64,
    visited: HashSet<u64>,
}
impl LcgIndices {
    pub fn new(seed: u64, params: LcgParams, sample_cnt: usize) -> Self {
        let state = seed % params.modulus.max(1);
        Self {
            state,
            params,
            sample_cnt: sample_cnt as u64,
            visited: HashSet::from([state]),
        }
    }
}
impl Iterator for LcgIndices {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.sample_cnt == 0 || self.params.modulus == 0 {
            return None;
        }
        let m = self.params.modulus as u128;
        self.state = ((self.state as u128 * self.params.multiplier as u128 + self.params.increment as u128) % m) as u64;
        if !self.visited.insert(self.state) {
            return None;
        }
        Some((self.state as u128 * self.sample_cnt as u128 / m) as usize)
    }
}

/// Select up to `state.k` pairwise distinct samples as initial centroids, in the order the
/// index sequence visits them. When the sequence runs dry first, the effective `k` of the
/// state is reduced.
pub fn calculate<T, D>(kmean: &KMeans<T, D>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>) -> Result<(), KMeansError>
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    let dims = kmean.sample_dims;
    let mut chosen: Vec<usize> = Vec::with_capacity(state.k);
    for idx in LcgIndices::new(config.seed, config.lcg, kmean.sample_cnt) {
        if chosen.len() == state.k {
            break;
        }
        let candidate = kmean.sample(idx);
        if chosen.iter().all(|&c| kmean.sample(c) != candidate) {
            chosen.push(idx);
        }
    }

    if chosen.len() < state.k {
        warn!("index sequence yielded only {} distinct centroids (requested k = {})", chosen.len(), state.k);
        state.truncate_k(chosen.len());
    }
    for (ci, &si) in chosen.iter().enumerate() {
        state.set_centroid_from_iter(ci, kmean.samples[si * dims..(si + 1) * dims].iter().cloned());
    }
    Ok(())
}
