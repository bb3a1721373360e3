use thiserror::Error;

/// Errors returned by distance and clustering operations.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Two vectors that must share a dimension do not.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("invalid parameter {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// A centroid attracted no points and the run was configured to fail on it.
    #[error("cluster {cluster} became empty in iteration {iteration}")]
    EmptyCluster { iteration: usize, cluster: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
