use serde::{Deserialize, Serialize};

use crate::enums::EmptyClusterPolicy;

/// Config for a k-means run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct KMeansConfig {
    /// Number of centroids sampled from the input at initialization.
    /// Default: 3
    pub num_clusters: usize,

    /// Number of assign/recompute rounds. There is no early stopping, the run always
    /// performs exactly this many rounds.
    /// Default: 50
    pub num_iterations: usize,

    /// Seed for the initial centroid sampling. When unset, the sampling draws from OS entropy
    /// and results vary from run to run.
    /// Default: None
    pub seed: Option<u64>,

    /// Default: Drop
    pub empty_cluster_policy: EmptyClusterPolicy,

    /// Compute nearest centroids on the rayon thread pool. Output is identical to the
    /// sequential path.
    /// Default: false
    pub parallel_assignment: bool,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            num_clusters: 3,
            num_iterations: 50,
            seed: None,
            empty_cluster_policy: EmptyClusterPolicy::Drop,
            parallel_assignment: false,
        }
    }
}
