use num::{Float, NumCast, Zero};
use std::{
    fmt::{Debug, Display, LowerExp},
    iter::Sum,
    ops::{AddAssign, SubAssign},
};

/// Floating point types the clustering engine can operate on.
pub trait Primitive: AddAssign + SubAssign + Sum + Zero + Float + NumCast
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static {}
impl Primitive for f32 {}
impl Primitive for f64 {}
