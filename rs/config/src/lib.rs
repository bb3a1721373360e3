pub mod cluster_votes;
pub mod enums;
pub mod kmeans;
