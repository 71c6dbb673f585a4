use crate::api::{ConvergenceStatus, DistanceFunction, EmptyClusterPolicy};
use crate::{KMeans, KMeansConfig, KMeansError, KMeansState, memory::*};
use log::{debug, info, warn};
use std::time::Instant;

pub(crate) struct Lloyd<T, D> where T: Primitive, D: DistanceFunction<T> {
    _p: std::marker::PhantomData<(T, D)>
}
impl<T, D> Lloyd<T, D> where T: Primitive, D: DistanceFunction<T> {
    /// Recompute every centroid as the mean of its samples. Returns the new centroids [row-major] and
    /// the distance sum of the assignment they were computed from.
    pub(crate) fn update_centroids(data: &KMeans<T, D>, state: &mut KMeansState<T>, policy: EmptyClusterPolicy, iteration: usize) -> Result<(Vec<T>, T), KMeansError> {
        let dims = data.sample_dims;
        // Sum all samples in a cluster together into new_centroids
        let mut new_centroids = vec![T::zero(); state.centroids.len()];
        data.samples.chunks_exact(dims)
            .zip(state.assignments.iter().cloned())
            .for_each(|(s, centroid_id)| {
                new_centroids[centroid_id * dims..(centroid_id + 1) * dims].iter_mut()
                    .zip(s.iter())
                    .for_each(|(c, &v)| *c += v);
            });
        let mut new_distsum: T = state.centroid_distances.iter().cloned().sum();

        // Use used_centroids_cnt variable to check, whether there are empty clusters
        let used_centroids_cnt = data.update_cluster_frequencies(&state.assignments, &mut state.centroid_frequency);
        let mut kept = vec![false; state.k];
        if used_centroids_cnt != state.k {
            let empty: Vec<usize> = (0..state.k).filter(|&i| state.centroid_frequency[i] == 0).collect();
            for &i in empty.iter() {
                warn!("cluster {} has no samples in iteration {} ({:?})", i, iteration, policy);
                if !state.empty_clusters.contains(&i) {
                    state.empty_clusters.push(i);
                }
            }
            state.empty_clusters.sort_unstable();

            match policy {
                EmptyClusterPolicy::Abort => {
                    return Err(KMeansError::EmptyCluster { cluster: empty[0], iteration });
                }
                EmptyClusterPolicy::KeepPrevious => {
                    empty.iter().for_each(|&i| kept[i] = true);
                }
                EmptyClusterPolicy::StealFarthest => {
                    for &i in empty.iter() {
                        match Self::steal_farthest(data, state, &mut new_centroids, i) {
                            Some(stolen_dist) => new_distsum -= stolen_dist,
                            None => kept[i] = true,
                        }
                    }
                }
            }
        }

        // Calculate new centroids from the sums
        new_centroids.chunks_exact_mut(dims)
            .zip(state.centroids.chunks_exact(dims))
            .zip(state.centroid_frequency.iter().cloned().zip(kept.into_iter()))
            .for_each(|((nc, c), (cfreq, keep))| {
                if keep {
                    nc.copy_from_slice(c);
                } else {
                    let cfreq = T::from(cfreq).unwrap_or_else(T::one);
                    nc.iter_mut().for_each(|v| *v = *v / cfreq);
                }
            });
        Ok((new_centroids, new_distsum))
    }

    /// Find the sample with the highest distance to its centroid, that is not alone in its cluster, and
    /// move it into the empty cluster **target**. `new_centroids` holds per-cluster sums at this point.
    /// Returns the distance the moved sample had to its previous centroid.
    fn steal_farthest(data: &KMeans<T, D>, state: &mut KMeansState<T>, new_centroids: &mut [T], target: usize) -> Option<T> {
        let dims = data.sample_dims;
        let mut distance_sorted_samples: Vec<usize> = (0..data.sample_cnt).collect();
        distance_sorted_samples.sort_by(|&i1, &i2| state.centroid_distances[i1]
            .partial_cmp(&state.centroid_distances[i2])
            .unwrap_or(std::cmp::Ordering::Equal));

        let sample_id = distance_sorted_samples.into_iter().rev()
            .find(|&s| state.centroid_frequency[state.assignments[s]] > 1)?;
        let prev_centroid_id = state.assignments[sample_id];
        let stolen_dist = state.centroid_distances[sample_id];

        // Re-Assign found sample to centroid without any samples
        state.centroid_frequency[prev_centroid_id] -= 1;
        state.centroid_frequency[target] += 1;
        // Centroid is moved into the chosen point -> the points centroid distance is 0
        state.centroid_distances[sample_id] = T::zero();
        state.assignments[sample_id] = target;
        let sample = data.sample(sample_id);
        // Subtract chosen sample from its previous centroid
        new_centroids[prev_centroid_id * dims..(prev_centroid_id + 1) * dims].iter_mut()
            .zip(sample.iter())
            .for_each(|(cv, &sv)| *cv -= sv);
        // Chosen sample is single point in cluster -> set cluster's sum to chosen point
        new_centroids[target * dims..(target + 1) * dims].copy_from_slice(sample);
        Some(stolen_dist)
    }

    #[inline(always)] pub fn calculate<'a, F>(data: &KMeans<T, D>, k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>, KMeansError>
                where for<'c> F: FnOnce(&KMeans<T, D>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<(), KMeansError> {
        if k == 0 || k > data.sample_cnt {
            return Err(KMeansError::InvalidParameter(format!("k must be within 1..={}, got {}", data.sample_cnt, k)));
        }
        if max_iter == 0 {
            return Err(KMeansError::InvalidParameter("max_iter must be greater than 0".to_string()));
        }

        let mut state = KMeansState::new(data.sample_cnt, data.sample_dims, k);
        state.distsum = T::infinity();

        // Initialize clusters and notify subscriber
        init(data, &mut state, config)?;
        state.initial_centroids = state.centroids.clone();
        (config.init_done)(&state);
        info!("running k-means on {} samples ({} dims) with k = {}, max_iter = {}", data.sample_cnt, data.sample_dims, state.k, max_iter);

        let mut abort_strategy = config.abort_strategy.create_logic(&data.distance, data.sample_dims);
        let started = Instant::now();
        state.status = ConvergenceStatus::IterationBudgetExceeded;

        for i in 1..=max_iter {
            if config.timeout.map_or(false, |t| started.elapsed() >= t) {
                state.status = ConvergenceStatus::TimedOut;
                break;
            }
            data.update_cluster_assignments(&mut state);
            let (new_centroids, new_distsum) = Self::update_centroids(data, &mut state, config.empty_cluster_policy, i)?;
            let previous = std::mem::replace(&mut state.centroids, new_centroids);
            state.iterations = i;

            // Notify subscriber about finished iteration
            (config.iteration_done)(&state, i, new_distsum);
            debug!("iteration {}: distsum {:.6} -> {:.6}", i, state.distsum, new_distsum);
            state.distsum = new_distsum;
            if !abort_strategy.next(&previous, &state.centroids) {
                state.status = ConvergenceStatus::Converged;
                break;
            }
        }

        data.update_centroid_distances(&mut state);
        state.distsum = state.centroid_distances.iter().cloned().sum();
        match state.status {
            ConvergenceStatus::Converged => info!("k-means converged after {} iterations (distsum {:.6})", state.iterations, state.distsum),
            status => warn!("k-means stopped without converging after {} iterations: {}", state.iterations, status),
        }
        Ok(state)
    }
}




#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::{assert_centroids_are_means, samples_2d};
    use crate::{AbortStrategy, MinkowskiDistance};
    use rand::prelude::*;
    use std::cell::Cell;
    use std::time::Duration;

    fn four_points() -> KMeans<f64, MinkowskiDistance<f64>> {
        let samples = samples_2d(&[(0.0, 0.0), (0.0, 1.0), (10.0, 10.0), (10.0, 11.0)]);
        KMeans::new(samples, 4, 2, MinkowskiDistance::new(2.0).unwrap()).unwrap()
    }

    #[test]
    fn two_well_separated_pairs() {
        let kmean = four_points();
        let res = kmean.kmeans_lloyd(2, 100, KMeans::init_lcg_sample, &KMeansConfig::default()).unwrap();

        assert_eq!(res.status, ConvergenceStatus::Converged);
        assert!(res.iterations <= 3);
        assert_eq!(res.k, 2);
        assert_eq!(res.initial_centroids, vec![0.0, 0.0, 10.0, 10.0]);
        assert_eq!(res.centroids, vec![0.0, 0.5, 10.0, 10.5]);
        assert_eq!(res.assignments, vec![0, 0, 1, 1]);
        assert_eq!(res.centroid_frequency, vec![2, 2]);
        assert_eq!(res.distsum, 2.0);
        assert!(res.empty_clusters.is_empty());
    }

    #[test]
    fn one_cluster_per_distinct_sample() {
        let kmean = four_points();
        let res = kmean.kmeans_lloyd(4, 100, KMeans::init_lcg_sample, &KMeansConfig::default()).unwrap();

        assert!(res.is_converged());
        assert!(res.iterations <= 1);
        assert_eq!(res.k, 4);
        assert_eq!(res.centroid_frequency, vec![1, 1, 1, 1]);
        assert_eq!(res.distsum, 0.0);
        let mut clusters = res.assignments.clone();
        clusters.sort_unstable();
        clusters.dedup();
        assert_eq!(clusters.len(), 4);
    }

    #[test]
    fn fixed_point_is_stable() {
        let mut rnd = StdRng::seed_from_u64(7);
        let centers = [(-76.61, 39.29), (-76.66, 39.32), (-76.60, 39.23)];
        let points: Vec<(f64, f64)> = (0..300).map(|i| {
            let (x, y) = centers[i % 3];
            (x + rnd.gen_range(-0.01..0.01), y + rnd.gen_range(-0.01..0.01))
        }).collect();
        let kmean = KMeans::new(samples_2d(&points), 300, 2, MinkowskiDistance::euclidean()).unwrap();
        let mut res = kmean.kmeans_lloyd(3, 300, KMeans::init_lcg_sample, &KMeansConfig::default()).unwrap();
        assert!(res.is_converged());
        assert_centroids_are_means(&kmean.samples, 2, &res.assignments, &res.centroids, 1e-12);

        // one more assignment/update cycle reproduces the centroids exactly
        let converged = res.centroids.clone();
        kmean.update_cluster_assignments(&mut res);
        let next_iteration = res.iterations + 1;
        let (again, _) = Lloyd::update_centroids(&kmean, &mut res, EmptyClusterPolicy::KeepPrevious, next_iteration).unwrap();
        assert_eq!(again, converged);
    }

    #[test]
    fn deterministic_between_runs() {
        let mut rnd = StdRng::seed_from_u64(99);
        let samples: Vec<f32> = (0..2 * 500).map(|_| rnd.gen_range(0.0..1.0)).collect();
        let kmean = KMeans::new(samples, 500, 2, MinkowskiDistance::euclidean()).unwrap();
        let conf = KMeansConfig::default();
        let a = kmean.kmeans_lloyd(7, 300, KMeans::init_lcg_sample, &conf).unwrap();
        let b = kmean.kmeans_lloyd(7, 300, KMeans::init_lcg_sample, &conf).unwrap();
        assert_eq!(a.initial_centroids, b.initial_centroids);
        assert_eq!(a.centroids, b.centroids);
        assert_eq!(a.assignments, b.assignments);
        assert_eq!(a.iterations, b.iterations);
        assert_centroids_are_means(&kmean.samples, 2, &a.assignments, &a.centroids, 1e-4);
    }

    fn empty_cluster_run(policy: EmptyClusterPolicy) -> Result<KMeansState<f64>, KMeansError> {
        let samples = vec![1.0, 0.0, 2.0, 0.0, 3.0, 0.0];
        let kmean = KMeans::new(samples, 3, 2, MinkowskiDistance::euclidean()).unwrap();
        let conf = KMeansConfig::build().empty_cluster_policy(policy).build();
        kmean.kmeans_lloyd(2, 10, KMeans::init_precomputed(vec![2.0, 0.0, 1337.0, 0.0]), &conf)
    }

    #[test]
    fn empty_cluster_keeps_previous_centroid() {
        let res = empty_cluster_run(EmptyClusterPolicy::KeepPrevious).unwrap();
        assert!(res.is_converged());
        assert_eq!(res.iterations, 1);
        assert_eq!(res.centroids, vec![2.0, 0.0, 1337.0, 0.0]);
        assert_eq!(res.assignments, vec![0, 0, 0]);
        assert_eq!(res.centroid_frequency, vec![3, 0]);
        assert_eq!(res.empty_clusters, vec![1]);
        assert_eq!(res.distsum, 2.0);
    }

    #[test]
    fn empty_cluster_steals_farthest_sample() {
        let res = empty_cluster_run(EmptyClusterPolicy::StealFarthest).unwrap();
        assert!(res.is_converged());
        assert_eq!(res.iterations, 2);
        assert_eq!(res.centroids, vec![1.5, 0.0, 3.0, 0.0]);
        assert_eq!(res.assignments, vec![0, 0, 1]);
        assert_eq!(res.centroid_frequency, vec![2, 1]);
        assert_eq!(res.centroid_distances, vec![0.5, 0.5, 0.0]);
        assert_eq!(res.empty_clusters, vec![1]);
    }

    #[test]
    fn empty_cluster_aborts() {
        match empty_cluster_run(EmptyClusterPolicy::Abort) {
            Err(KMeansError::EmptyCluster { cluster: 1, iteration: 1 }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn iteration_budget_exceeded() {
        let kmean = four_points();
        let res = kmean.kmeans_lloyd(2, 1, KMeans::init_lcg_sample, &KMeansConfig::default()).unwrap();
        assert_eq!(res.status, ConvergenceStatus::IterationBudgetExceeded);
        assert_eq!(res.iterations, 1);
        // the result is still usable
        assert_eq!(res.centroids, vec![0.0, 0.5, 10.0, 10.5]);
        assert!(matches!(res.ensure_converged(), Err(KMeansError::NonTermination { iterations: 1 })));
    }

    #[test]
    fn timeout_stops_before_iterating() {
        let kmean = four_points();
        let conf = KMeansConfig::build().timeout(Duration::ZERO).build();
        let res = kmean.kmeans_lloyd(2, 100, KMeans::init_lcg_sample, &conf).unwrap();
        assert_eq!(res.status, ConvergenceStatus::TimedOut);
        assert_eq!(res.iterations, 0);
        assert_eq!(res.centroids, res.initial_centroids);
    }

    #[test]
    fn centroid_shift_strategy() {
        let kmean = four_points();
        let conf = KMeansConfig::build().abort_strategy(AbortStrategy::CentroidShift { threshold: 1.0 }).build();
        let res = kmean.kmeans_lloyd(2, 100, KMeans::init_lcg_sample, &conf).unwrap();
        // the first update moves each centroid by 0.5 only
        assert!(res.is_converged());
        assert_eq!(res.iterations, 1);
    }

    #[test]
    fn invalid_parameters() {
        let kmean = four_points();
        let conf = KMeansConfig::default();
        assert!(matches!(kmean.kmeans_lloyd(0, 10, KMeans::init_lcg_sample, &conf), Err(KMeansError::InvalidParameter(_))));
        assert!(matches!(kmean.kmeans_lloyd(5, 10, KMeans::init_lcg_sample, &conf), Err(KMeansError::InvalidParameter(_))));
        assert!(matches!(kmean.kmeans_lloyd(2, 0, KMeans::init_lcg_sample, &conf), Err(KMeansError::InvalidParameter(_))));
    }

    #[test]
    fn callbacks_are_called() {
        let kmean = four_points();
        let inits = Cell::new(0);
        let iterations = Cell::new(0);
        let init_done = |s: &KMeansState<f64>| { inits.set(inits.get() + 1); assert_eq!(s.iterations, 0); };
        let iteration_done = |_: &KMeansState<f64>, nr: usize, _: f64| iterations.set(nr);
        let conf = KMeansConfig::build()
            .init_done(&init_done)
            .iteration_done(&iteration_done)
            .build();
        let res = kmean.kmeans_lloyd(2, 100, KMeans::init_lcg_sample, &conf).unwrap();
        assert_eq!(inits.get(), 1);
        assert_eq!(iterations.get(), res.iterations);
    }
}
