use crate::api::DistanceFunction;
use crate::memory::*;

/// Enum with possible abort strategies.
/// These strategies decide, after each iteration, whether the centroids have settled.
/// Independent of the strategy, a calculation always stops after `max_iter` iterations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AbortStrategy<T: Primitive> {
	/// Abort as soon as an iteration reproduces the previous centroids exactly (coordinate-wise equality).
	FixedPoint,
	/// Abort as soon as no centroid moved farther than **threshold** (measured with the calculation's distance function).
	/// ## Fields:
	/// - **threshold**: Maximum centroid movement that still counts as "settled"
	CentroidShift { threshold: T },
}
impl<T: Primitive> Default for AbortStrategy<T> {
	fn default() -> Self { AbortStrategy::FixedPoint }
}
impl<T: Primitive> AbortStrategy<T> {
	pub(crate) fn create_logic<'a, D: DistanceFunction<T>>(&self, distance: &'a D, sample_dims: usize) -> Box<dyn AbortStrategyLogic<T> + 'a> {
		match *self {
			AbortStrategy::FixedPoint => Box::new(FixedPointLogic),
			AbortStrategy::CentroidShift { threshold } => Box::new(CentroidShiftLogic { threshold, distance, sample_dims }),
		}
	}
}

pub(crate) trait AbortStrategyLogic<T: Primitive> {
	/// Function that has to be called once an iteration produced a new set of centroids.
	/// ## Arguments
	/// - **previous**: Centroids the iteration started with [row-major]
	/// - **current**: Centroids the iteration produced [row-major]
	/// ## Returns
	/// - **true** if the calculation should continue
	/// - **false** if the centroids settled and the calculation should stop
	fn next(&mut self, previous: &[T], current: &[T]) -> bool;
}


pub(crate) struct FixedPointLogic;
impl<T: Primitive> AbortStrategyLogic<T> for FixedPointLogic {
	fn next(&mut self, previous: &[T], current: &[T]) -> bool {
		!crate::helpers::centroids_equal(previous, current)
	}
}


pub(crate) struct CentroidShiftLogic<'a, T: Primitive, D: DistanceFunction<T>> {
	threshold: T,
	distance: &'a D,
	sample_dims: usize,
}
impl<'a, T: Primitive, D: DistanceFunction<T>> AbortStrategyLogic<T> for CentroidShiftLogic<'a, T, D> {
	fn next(&mut self, previous: &[T], current: &[T]) -> bool {
		if previous.len() != current.len() {
			return true;
		}
		previous.chunks_exact(self.sample_dims)
			.zip(current.chunks_exact(self.sample_dims))
			.any(|(p, c)| self.distance.distance(p, c) > self.threshold)
	}
}
