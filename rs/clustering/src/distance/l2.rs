use crate::distance::summation::AccurateSum;
use crate::error::{Error, Result};
use crate::DistanceCalculator;

/// Fails with `DimensionMismatch` unless `found == expected`.
pub fn check_dimension(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(Error::DimensionMismatch { expected, found });
    }
    Ok(())
}

pub struct L2DistanceCalculator {}

impl L2DistanceCalculator {
    pub fn new() -> Self {
        Self {}
    }

    /// Squared Euclidean distance. The squared differences are summed with exact rounding, so
    /// long vectors do not accumulate rounding error term by term.
    pub fn calculate_squared(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        check_dimension(a.len(), b.len())?;
        let sum = a
            .iter()
            .zip(b.iter())
            .map(|(&x, &y)| (x - y).powi(2))
            .collect::<AccurateSum>();
        Ok(sum.total())
    }

    /// Left-to-right accumulation. Only kept for benchmarking against the accurate path.
    pub fn calculate_naive(&self, a: &[f64], b: &[f64]) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| (x - y).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

impl Default for L2DistanceCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl DistanceCalculator for L2DistanceCalculator {
    /// Compute L2 distance between two vectors
    fn calculate(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        Ok(self.calculate_squared(a, b)?.sqrt())
    }
}

/// Euclidean distance between `p` and `q`.
pub fn distance(p: &[f64], q: &[f64]) -> Result<f64> {
    L2DistanceCalculator::new().calculate(p, q)
}
