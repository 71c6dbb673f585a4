use crate::{DistanceFunction, KMeansError, Primitive};

/// Power based distance `(Σ |a_i − b_i|^p)^(1/p)`.
///
/// `p = 2` is the euclidean distance and `p = 1` the manhattan distance. Both are special-cased,
/// so that e.g. the euclidean distance between `(0,0)` and `(3,4)` is exactly `5.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinkowskiDistance<T: Primitive> {
    p: T,
}

impl<T: Primitive> MinkowskiDistance<T> {
    /// Create a new distance function with the given exponent.
    /// ## Errors
    /// [`KMeansError::InvalidParameter`] if **p** is not a finite number `> 0`.
    pub fn new(p: T) -> Result<Self, KMeansError> {
        if !p.is_finite() || p <= T::zero() {
            return Err(KMeansError::InvalidParameter(format!("p must be a finite number > 0, got {}", p)));
        }
        Ok(Self { p })
    }

    /// Euclidean distance (`p = 2`)
    pub fn euclidean() -> Self {
        Self { p: T::one() + T::one() }
    }

    pub fn p(&self) -> T {
        self.p
    }
}

impl<T: Primitive> DistanceFunction<T> for MinkowskiDistance<T> {
    #[inline(always)]
    fn distance(&self, a: &[T], b: &[T]) -> T {
        let diffs = a.iter().zip(b.iter()).map(|(&x, &y)| (x - y).abs());
        if self.p == T::one() {
            diffs.sum()
        } else if self.p == T::one() + T::one() {
            diffs.map(|v| v * v).sum::<T>().sqrt()
        } else {
            // scaled by the largest component, |d|^p over- or underflows quickly for large p
            let max = diffs.fold(T::zero(), T::max);
            if max == T::zero() {
                return T::zero();
            }
            a.iter().zip(b.iter())
                .map(|(&x, &y)| ((x - y).abs() / max).powf(self.p))
                .sum::<T>().powf(self.p.recip()) * max
        }
    }
}
