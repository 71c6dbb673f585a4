mod minkowskidistance;

pub use minkowskidistance::MinkowskiDistance;
