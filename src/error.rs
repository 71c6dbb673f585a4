use thiserror::Error;

/// Error types for the geokmeans library
#[derive(Error, Debug)]
pub enum KMeansError {
    /// Two points (or a point and a centroid) do not have the same amount of dimensions
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    InputDimensionMismatch { expected: usize, actual: usize },

    /// A parameter (k, p, max_iter, samples, precomputed centroids) is out of its valid range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A cluster lost all of its samples and the configured policy refuses to continue
    #[error("Cluster {cluster} became empty in iteration {iteration}")]
    EmptyCluster { cluster: usize, iteration: usize },

    /// The calculation stopped before the centroids reached a fixed point
    #[error("Did not converge after {iterations} iterations")]
    NonTermination { iterations: usize },

    /// A data row could not be parsed
    #[error("Malformed record in line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
