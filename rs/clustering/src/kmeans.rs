pub mod assignment;
pub mod kmeans;
