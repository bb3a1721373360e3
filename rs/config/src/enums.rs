use serde::{Deserialize, Serialize};

/// What k-means does with a centroid that attracted no points during an iteration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum EmptyClusterPolicy {
    /// Remove the centroid for the remaining iterations. The number of clusters shrinks.
    #[default]
    Drop,
    /// Keep the centroid at its previous position.
    Freeze,
    /// Abort the run with an error.
    Fail,
}

