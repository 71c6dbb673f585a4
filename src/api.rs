use crate::{inits::LcgParams, memory::*, AbortStrategy, KMeansError};
use rayon::prelude::*;
use std::time::Duration;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>, usize, T);

/// Default seed of the centroid index sequence
pub const DEFAULT_SEED: u64 = 170_170;

/// Distance between two samples of equal dimensionality.
pub trait DistanceFunction<T: Primitive>: Sync + Send {
    /// Distance between **a** and **b**. Both slices are expected to have the same length.
    fn distance(&self, a: &[T], b: &[T]) -> T;

    /// Same as [`DistanceFunction::distance`], but refuses samples of differing dimensionality.
    fn checked_distance(&self, a: &[T], b: &[T]) -> Result<T, KMeansError> {
        if a.len() != b.len() {
            return Err(KMeansError::InputDimensionMismatch { expected: a.len(), actual: b.len() });
        }
        Ok(self.distance(a, b))
    }
}

/// What to do with a centroid that lost all of its samples during an iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EmptyClusterPolicy {
    /// Keep the centroid at its previous position.
    #[default]
    KeepPrevious,
    /// Move the sample that is farthest away from its centroid (and not alone in its cluster)
    /// into the empty cluster.
    StealFarthest,
    /// Abort the calculation with [`KMeansError::EmptyCluster`].
    Abort,
}

/// How a calculation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConvergenceStatus {
    /// The abort-strategy reported settled centroids
    Converged,
    /// `max_iter` iterations ran without the centroids settling
    IterationBudgetExceeded,
    /// The configured timeout elapsed before the centroids settled
    TimedOut,
}
impl std::fmt::Display for ConvergenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvergenceStatus::Converged => write!(f, "converged"),
            ConvergenceStatus::IterationBudgetExceeded => write!(f, "iteration budget exceeded"),
            ConvergenceStatus::TimedOut => write!(f, "timed out"),
        }
    }
}

/// This is a structure holding various configuration options for a k-means calculation, such as
/// the seed of the centroid index sequence, or a couple of callbacks, that can be set to get status
/// information from a running k-means calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the iteration
    /// - **iteration_id**: Number of the current iteration
    /// - **distsum**: New distance sum (**state** contains the distsum from the previous iteration)
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Seed of the centroid index sequence
    pub(crate) seed: u64,
    /// Recurrence parameters of the centroid index sequence
    pub(crate) lcg: LcgParams,
    /// The abort-strategy to use for the running calculation
    pub(crate) abort_strategy: AbortStrategy<T>,
    /// Handling of clusters without samples
    pub(crate) empty_cluster_policy: EmptyClusterPolicy,
    /// Wall-clock limit of the iteration phase
    pub(crate) timeout: Option<Duration>,
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_, _, _| {},
            seed: DEFAULT_SEED,
            lcg: LcgParams::default(),
            abort_strategy: AbortStrategy::FixedPoint,
            empty_cluster_policy: EmptyClusterPolicy::KeepPrevious,
            timeout: None,
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("seed", &self.seed)
            .field("lcg", &self.lcg)
            .field("abort_strategy", &self.abort_strategy)
            .field("empty_cluster_policy", &self.empty_cluster_policy)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>,
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration during a running k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the seed of the index sequence used by [`KMeans::init_lcg_sample`].
    /// ## Default
    /// [`DEFAULT_SEED`]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed; self
    }
    /// Set the recurrence parameters of the index sequence used by [`KMeans::init_lcg_sample`].
    pub fn lcg_params(mut self, lcg: LcgParams) -> Self {
        self.config.lcg = lcg; self
    }
    /// Set the abort-strategy to use during a running k-means calculation. For more information,
    /// see documentation of [`AbortStrategy`].
    /// ## Default
    /// [`AbortStrategy::FixedPoint`]
    pub fn abort_strategy(mut self, abort_strategy: AbortStrategy<T>) -> Self {
        self.config.abort_strategy = abort_strategy; self
    }
    /// Set how clusters that lose all of their samples are handled.
    /// ## Default
    /// [`EmptyClusterPolicy::KeepPrevious`]
    pub fn empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.config.empty_cluster_policy = policy; self
    }
    /// Stop iterating once **timeout** elapsed, reporting [`ConvergenceStatus::TimedOut`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout); self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// This is the internally used data-structure, storing the current state during calculation, as
/// well as the final result, as returned by the API.
/// All mutations are done in this structure, making [`KMeans`] immutable.
///
/// ## Fields
/// - **k**: The effective amount of clusters (can be less than requested, if the initialization found fewer distinct samples)
/// - **distsum**: The total sum of distances from all samples to their respective centroids
/// - **centroids**: Calculated cluster centers [row-major] = [<centroid0>,<centroid1>,<centroid2>,...]
/// - **initial_centroids**: Cluster centers as produced by the initialization [row-major]
/// - **centroid_frequency**: Amount of samples in each centroid
/// - **assignments**: Vector mapping each sample to its respective nearest cluster
/// - **centroid_distances**: Vector containing each sample's distance to its centroid
/// - **iterations**: Amount of assignment/update cycles that ran
/// - **status**: How the calculation ended
/// - **empty_clusters**: Ids of clusters that lost all of their samples at least once
#[derive(Clone, Debug)]
pub struct KMeansState<T: Primitive> {
    pub k: usize,
    pub distsum: T,
    pub centroids: Vec<T>,
    pub initial_centroids: Vec<T>,
    pub centroid_frequency: Vec<usize>,
    pub assignments: Vec<usize>,
    pub centroid_distances: Vec<T>,
    pub iterations: usize,
    pub status: ConvergenceStatus,
    pub empty_clusters: Vec<usize>,
    pub sample_dims: usize,
}
impl<T: Primitive> KMeansState<T> {
    pub(crate) fn new(sample_cnt: usize, sample_dims: usize, k: usize) -> Self {
        Self {
            k,
            distsum: T::zero(),
            centroids: vec![T::zero(); sample_dims * k],
            initial_centroids: Vec::new(),
            centroid_frequency: vec![0usize; k],
            assignments: vec![0usize; sample_cnt],
            centroid_distances: vec![T::infinity(); sample_cnt],
            iterations: 0,
            status: ConvergenceStatus::IterationBudgetExceeded,
            empty_clusters: Vec::new(),
            sample_dims,
        }
    }
    pub(crate) fn set_centroid_from_iter(&mut self, idx: usize, src: impl Iterator<Item = T>) {
        self.centroids.iter_mut().skip(self.sample_dims * idx).take(self.sample_dims)
                .zip(src)
                .for_each(|(c, s)| *c = s);
    }
    /// Shrink the state to **k** clusters (no-op if it already has at most **k**).
    pub(crate) fn truncate_k(&mut self, k: usize) {
        if k < self.k {
            self.k = k;
            self.centroids.truncate(k * self.sample_dims);
            self.centroid_frequency.truncate(k);
        }
    }

    /// Coordinates of the centroid with the given id.
    pub fn centroid(&self, idx: usize) -> &[T] {
        &self.centroids[idx * self.sample_dims..(idx + 1) * self.sample_dims]
    }
    /// Iterator over all centroids, in the order of their ids.
    pub fn centroids_iter(&self) -> std::slice::ChunksExact<'_, T> {
        self.centroids.chunks_exact(self.sample_dims)
    }
    /// Iterator over the centroids the calculation started with.
    pub fn initial_centroids_iter(&self) -> std::slice::ChunksExact<'_, T> {
        self.initial_centroids.chunks_exact(self.sample_dims)
    }
    pub fn is_converged(&self) -> bool {
        self.status == ConvergenceStatus::Converged
    }
    /// Turn a calculation that did not reach a fixed point into [`KMeansError::NonTermination`].
    pub fn ensure_converged(self) -> Result<Self, KMeansError> {
        match self.status {
            ConvergenceStatus::Converged => Ok(self),
            _ => Err(KMeansError::NonTermination { iterations: self.iterations }),
        }
    }
}

/// A sample together with its final cluster and the auxiliary label it was read with.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledRecord<'a, T: Primitive> {
    pub cluster: usize,
    pub label: &'a str,
    pub point: &'a [T],
}


/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the samples you want to operate on and the distance function
/// to cluster them with. The primitive type of the passed samples array will be the type used internaly for
/// all calculations, as well as the result as stored in the returned [`KMeansState`] structure.
///
/// ## Supported variants
/// - k-Means clustering (Lloyd) [`KMeans::kmeans_lloyd`]
///
/// ## Supported initialization methods
/// - Seeded index sequence [`KMeans::init_lcg_sample`]
/// - Precomputed [`KMeans::init_precomputed`]
pub struct KMeans<T: Primitive, D: DistanceFunction<T>> {
    pub(crate) sample_cnt: usize,
    pub(crate) sample_dims: usize,
    pub(crate) samples: Vec<T>,
    pub(crate) distance: D,
}
impl<T: Primitive, D: DistanceFunction<T>> KMeans<T, D> {
    /// Create a new instance of the [`KMeans`] structure.
    ///
    /// ## Arguments
    /// - **samples**: Vector of samples [row-major] = [<sample0>,<sample1>,<sample2>,...]
    /// - **sample_cnt**: Amount of samples, contained in the passed **samples** vector
    /// - **sample_dims**: Amount of dimensions each sample from the **sample** vector has
    /// - **distance**: Distance function used for the cluster assignments
    ///
    /// ## Errors
    /// - [`KMeansError::InputDimensionMismatch`] if **samples** does not hold `sample_cnt * sample_dims` values
    /// - [`KMeansError::InvalidParameter`] if there are no samples, no dimensions or non-finite values
    pub fn new(samples: Vec<T>, sample_cnt: usize, sample_dims: usize, distance: D) -> Result<Self, KMeansError> {
        if sample_cnt == 0 || sample_dims == 0 {
            return Err(KMeansError::InvalidParameter(format!(
                "need at least one sample with at least one dimension (got {} samples with {} dimensions)",
                sample_cnt, sample_dims
            )));
        }
        if samples.len() != sample_cnt * sample_dims {
            return Err(KMeansError::InputDimensionMismatch { expected: sample_cnt * sample_dims, actual: samples.len() });
        }
        if let Some(pos) = samples.iter().position(|v| !v.is_finite()) {
            return Err(KMeansError::InvalidParameter(format!("sample {} has a non-finite coordinate", pos / sample_dims)));
        }

        Ok(Self { sample_cnt, sample_dims, samples, distance })
    }

    pub fn sample_cnt(&self) -> usize { self.sample_cnt }
    pub fn sample_dims(&self) -> usize { self.sample_dims }
    pub fn distance(&self) -> &D { &self.distance }

    /// Coordinates of the sample with the given index.
    pub fn sample(&self, idx: usize) -> &[T] {
        &self.samples[idx * self.sample_dims..(idx + 1) * self.sample_dims]
    }

    /// Index and distance of the centroid nearest to **sample**. Ties are won by the lowest centroid id.
    #[inline(always)]
    fn nearest_centroid(&self, sample: &[T], centroids: &[T], k: usize) -> (usize, T) {
        let mut best = (0, T::infinity());
        for (ci, c) in centroids.chunks_exact(self.sample_dims).take(k).enumerate() {
            let dist = self.distance.distance(sample, c);
            if dist < best.1 {
                best = (ci, dist);
            }
        }
        best
    }

    pub(crate) fn update_centroid_distances(&self, state: &mut KMeansState<T>) {
        let centroids = &state.centroids;
        let dims = self.sample_dims;
        self.samples.par_chunks_exact(dims)
            .zip(state.assignments.par_iter().cloned())
            .zip(state.centroid_distances.par_iter_mut())
            .for_each(|((s, assignment), centroid_dist)| {
                let centroid = &centroids[assignment * dims..(assignment + 1) * dims];
                *centroid_dist = self.distance.distance(s, centroid);
            });
    }

    /// Assign every sample to its nearest centroid. Samples are independent of each other,
    /// so this runs in parallel with read-only centroids.
    pub(crate) fn update_cluster_assignments(&self, state: &mut KMeansState<T>) {
        let (centroids, k) = (&state.centroids, state.k);
        self.samples.par_chunks_exact(self.sample_dims)
            .zip(state.assignments.par_iter_mut())
            .zip(state.centroid_distances.par_iter_mut())
            .for_each(|((s, assignment), centroid_dist)| {
                let (best_idx, best_dist) = self.nearest_centroid(s, centroids, k);
                *assignment = best_idx;
                *centroid_dist = best_dist;
            });
    }

    pub(crate) fn update_cluster_frequencies(&self, assignments: &[usize], centroid_frequency: &mut [usize]) -> usize {
        centroid_frequency.iter_mut().for_each(|v| *v = 0);
        let mut used_centroids_cnt = 0;
        assignments.iter().cloned()
            .for_each(|centroid_id| {
                if centroid_frequency[centroid_id] == 0 {
                    used_centroids_cnt += 1; // Count the amount of centroids with more than 0 samples
                }
                centroid_frequency[centroid_id] += 1;
            });
        used_centroids_cnt
    }


    /// Normal K-Means algorithm implementation (Lloyd). Iterates assignment and centroid update, until
    /// the configured [`AbortStrategy`] reports settled centroids, or **max_iter** iterations ran.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for
    /// - **max_iter**: Limit the maximum amount of iterations
    /// - **init**: Initialization-Method to use for the initialization of the **k** centroids
    /// - **config**: [`KMeansConfig`] instance with further settings (seed, policies, callbacks)
    ///
    /// ## Returns
    /// Instance of [`KMeansState`], containing the final state (result). A calculation that ran out of
    /// iterations (or time) is not an error, check [`KMeansState::status`].
    ///
    /// ## Example
    /// ```rust
    /// use geokmeans::*;
    ///
    /// let samples = vec![0.0f64, 0.0, 0.0, 1.0, 10.0, 10.0, 10.0, 11.0];
    /// let kmean = KMeans::new(samples, 4, 2, MinkowskiDistance::euclidean()).unwrap();
    /// let result = kmean.kmeans_lloyd(2, 100, KMeans::init_lcg_sample, &KMeansConfig::default()).unwrap();
    ///
    /// assert!(result.is_converged());
    /// println!("Centroids: {:?}", result.centroids);
    /// println!("Cluster-Assignments: {:?}", result.assignments);
    /// ```
    pub fn kmeans_lloyd<'a, F>(&self, k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>, KMeansError>
                where for<'c> F: FnOnce(&KMeans<T, D>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<(), KMeansError> {
        crate::variants::Lloyd::calculate(self, k, max_iter, init, config)
    }

    /// Seeded index sequence initialization method.
    /// Walks the linear congruential index sequence configured in [`KMeansConfig`] and takes the first **k**
    /// pairwise distinct samples as initial centroids. Same input and seed always produce the same centroids.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_lcg_sample<'a>(kmean: &KMeans<T, D>, state: &mut KMeansState<T>, config: &KMeansConfig<'a, T>) -> Result<(), KMeansError> {
        crate::inits::lcgsample::calculate(kmean, state, config)
    }

    /// Initialization method using precomputed centroids [row-major].
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass the closure it returns to an instance-method of [`KMeans`].
    pub fn init_precomputed(centroids: Vec<T>) -> impl for<'c> FnOnce(&KMeans<T, D>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<(), KMeansError> {
        move |kmean: &KMeans<T, D>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>| {
            crate::inits::precomputed::calculate(kmean, state, config, centroids)
        }
    }

    /// Pair every sample with its cluster and auxiliary label, sorted by ascending cluster id
    /// (input order is kept within a cluster).
    ///
    /// ## Errors
    /// [`KMeansError::InvalidParameter`] if **labels** does not hold one entry per sample.
    pub fn labeled_records<'a, S: AsRef<str>>(&'a self, state: &KMeansState<T>, labels: &'a [S]) -> Result<Vec<LabeledRecord<'a, T>>, KMeansError> {
        if labels.len() != self.sample_cnt || state.assignments.len() != self.sample_cnt {
            return Err(KMeansError::InvalidParameter(format!(
                "expected {} labels and assignments, got {} and {}",
                self.sample_cnt, labels.len(), state.assignments.len()
            )));
        }
        let mut records: Vec<LabeledRecord<'a, T>> = state.assignments.iter()
            .zip(labels.iter())
            .enumerate()
            .map(|(i, (&cluster, label))| LabeledRecord { cluster, label: label.as_ref(), point: self.sample(i) })
            .collect();
        records.sort_by_key(|r| r.cluster);
        Ok(records)
    }

    /// `(cluster, sample)` pairs in input order, e.g. for plotting.
    pub fn cluster_points<'a>(&'a self, state: &KMeansState<T>) -> Vec<(usize, &'a [T])> {
        state.assignments.iter().cloned()
            .zip(self.samples.chunks_exact(self.sample_dims))
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::samples_2d;
    use crate::MinkowskiDistance;
    use rand::prelude::*;

    #[test]
    fn rejects_invalid_samples() {
        let d = MinkowskiDistance::<f64>::euclidean();
        assert!(matches!(KMeans::new(vec![0.0; 5], 3, 2, d), Err(KMeansError::InputDimensionMismatch { expected: 6, actual: 5 })));
        assert!(matches!(KMeans::new(Vec::<f64>::new(), 0, 2, d), Err(KMeansError::InvalidParameter(_))));
        assert!(matches!(KMeans::new(vec![0.0, f64::NAN], 1, 2, d), Err(KMeansError::InvalidParameter(_))));
    }

    #[test]
    fn cluster_assignments_are_total_and_nearest() {
        let mut rnd = StdRng::seed_from_u64(1337);
        let (sample_cnt, sample_dims, k) = (1000, 2, 5);
        let samples: Vec<f64> = (0..sample_cnt * sample_dims).map(|_| rnd.gen_range(-1.0..1.0)).collect();
        let kmean = KMeans::new(samples, sample_cnt, sample_dims, MinkowskiDistance::new(3.0).unwrap()).unwrap();

        let mut state = KMeansState::new(sample_cnt, sample_dims, k);
        state.centroids.iter_mut()
            .zip(kmean.samples.iter())
            .for_each(|(c, s)| *c = *s);

        // calculate distances using the straight-forward way
        let should: Vec<(usize, f64)> = (0..sample_cnt).map(|i| {
            let s = kmean.sample(i);
            let mut best = (0, f64::INFINITY);
            for ci in 0..k {
                let d = kmean.distance.distance(s, state.centroid(ci));
                if d < best.1 { best = (ci, d); }
            }
            best
        }).collect();

        kmean.update_cluster_assignments(&mut state);

        assert_eq!(state.assignments.len(), sample_cnt);
        for (i, (should_idx, should_dist)) in should.into_iter().enumerate() {
            assert!(state.assignments[i] < k);
            assert_eq!(state.assignments[i], should_idx);
            assert_approx_eq!(state.centroid_distances[i], should_dist, 1e-12);
        }
    }

    #[test]
    fn ties_go_to_lowest_centroid_id() {
        let samples = samples_2d::<f64>(&[(5.0, 5.0), (0.0, 0.0)]);
        let kmean = KMeans::new(samples, 2, 2, MinkowskiDistance::euclidean()).unwrap();
        let mut state = KMeansState::new(2, 2, 3);
        state.centroids = vec![10.0, 10.0, 0.0, 0.0, 10.0, 10.0];

        kmean.update_cluster_assignments(&mut state);
        assert_eq!(state.assignments, vec![0, 1]);

        state.centroids = vec![0.0, 10.0, 10.0, 0.0, 10.0, 10.0];
        kmean.update_cluster_assignments(&mut state);
        assert_eq!(state.assignments[0], 0);
    }

    #[test]
    fn cluster_frequencies() {
        let kmean = KMeans::new(vec![0.0f32; 10], 5, 2, MinkowskiDistance::euclidean()).unwrap();
        let mut freq = vec![7usize; 3];
        let used = kmean.update_cluster_frequencies(&[0, 2, 2, 0, 2], &mut freq);
        assert_eq!(used, 2);
        assert_eq!(freq, vec![2, 0, 3]);
    }

    #[test]
    fn labeled_records_are_sorted_by_cluster() {
        let samples = samples_2d::<f64>(&[(0.0, 0.0), (10.0, 10.0), (0.0, 1.0), (10.0, 11.0)]);
        let kmean = KMeans::new(samples, 4, 2, MinkowskiDistance::euclidean()).unwrap();
        let mut state = KMeansState::new(4, 2, 2);
        state.assignments = vec![1, 0, 1, 0];
        let labels = ["a", "b", "c", "d"];

        let records = kmean.labeled_records(&state, &labels).unwrap();
        let order: Vec<(usize, &str)> = records.iter().map(|r| (r.cluster, r.label)).collect();
        assert_eq!(order, vec![(0, "b"), (0, "d"), (1, "a"), (1, "c")]);
        assert_eq!(records[0].point, &[10.0, 10.0]);

        let points = kmean.cluster_points(&state);
        assert_eq!(points[0], (1, &[0.0, 0.0][..]));
        assert_eq!(points.len(), 4);

        assert!(matches!(kmean.labeled_records(&state, &labels[..3]), Err(KMeansError::InvalidParameter(_))));
    }

    #[test]
    fn non_converged_state_is_an_error_on_request() {
        let mut state = KMeansState::<f64>::new(1, 2, 1);
        state.iterations = 7;
        state.status = ConvergenceStatus::IterationBudgetExceeded;
        assert!(matches!(state.clone().ensure_converged(), Err(KMeansError::NonTermination { iterations: 7 })));
        state.status = ConvergenceStatus::Converged;
        assert!(state.ensure_converged().is_ok());
    }
}
