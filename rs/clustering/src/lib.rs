pub mod distance;
pub mod error;
pub mod kmeans;
pub mod test_utils;

use crate::error::Result;

pub trait DistanceCalculator {
    fn calculate(&self, a: &[f64], b: &[f64]) -> Result<f64>;
}
