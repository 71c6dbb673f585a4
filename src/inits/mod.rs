pub mod lcgsample;
pub mod precomputed;

pub use lcgsample::{LcgIndices, LcgParams};
