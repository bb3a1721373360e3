//! Exactly rounded floating-point summation.
//!
//! Keeps a list of non-overlapping partial sums (Shewchuk's algorithm) so that no low-order
//! bits are lost while accumulating, and rounds once when the total is requested. The result
//! is the correctly rounded value of the exact mathematical sum of the inputs.

/// Accumulator for exactly rounded sums.
///
/// Non-finite terms (and intermediate overflow) are tracked separately with ordinary IEEE
/// addition, so `inf` and `NaN` propagate to the total the same way they would in a naive sum.
#[derive(Debug, Clone, Default)]
pub struct AccurateSum {
    partials: Vec<f64>,
    special: Option<f64>,
}

impl AccurateSum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: f64) {
        if !value.is_finite() {
            self.add_special(value);
            return;
        }
        // Finite terms can no longer change an infinite or NaN total.
        if self.special.is_some() {
            return;
        }

        let mut x = value;
        let mut num_kept = 0;
        for j in 0..self.partials.len() {
            let mut y = self.partials[j];
            if x.abs() < y.abs() {
                std::mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            let lo = y - (hi - x);
            if lo != 0.0 {
                self.partials[num_kept] = lo;
                num_kept += 1;
            }
            x = hi;
        }
        self.partials.truncate(num_kept);

        if x.is_finite() {
            self.partials.push(x);
        } else {
            // Two finite partials overflowed.
            self.partials.clear();
            self.add_special(x);
        }
    }

    fn add_special(&mut self, value: f64) {
        self.special = Some(self.special.unwrap_or(0.0) + value);
    }

    /// Returns the correctly rounded sum of everything added so far.
    pub fn total(&self) -> f64 {
        if let Some(special) = self.special {
            return special;
        }

        let partials = &self.partials;
        let mut n = partials.len();
        if n == 0 {
            return 0.0;
        }

        n -= 1;
        let mut hi = partials[n];
        let mut lo = 0.0;
        while n > 0 {
            let x = hi;
            n -= 1;
            let y = partials[n];
            hi = x + y;
            let y_rounded = hi - x;
            lo = y - y_rounded;
            if lo != 0.0 {
                break;
            }
        }

        // Round half to even: if the remaining partials push the error term over the halfway
        // point, bump `hi` to the neighbouring value.
        if n > 0 && ((lo < 0.0 && partials[n - 1] < 0.0) || (lo > 0.0 && partials[n - 1] > 0.0)) {
            let y = lo * 2.0;
            let x = hi + y;
            let y_rounded = x - hi;
            if y == y_rounded {
                hi = x;
            }
        }
        hi
    }

    pub fn reset(&mut self) {
        self.partials.clear();
        self.special = None;
    }
}

impl Extend<f64> for AccurateSum {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl FromIterator<f64> for AccurateSum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut sum = AccurateSum::new();
        sum.extend(iter);
        sum
    }
}

pub fn accurate_sum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    values.into_iter().collect::<AccurateSum>().total()
}

/// Arithmetic mean with an exactly rounded numerator. Returns `None` for an empty input.
pub fn accurate_mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let mut sum = AccurateSum::new();
    let mut count = 0usize;
    for value in values {
        sum.add(value);
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum.total() / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sum() {
        assert_eq!(AccurateSum::new().total(), 0.0);
        assert_eq!(accurate_sum(vec![]), 0.0);
        assert_eq!(accurate_mean(vec![]), None);
    }

    #[test]
    fn test_repeated_tenths() {
        let values = vec![0.1; 10];
        let naive: f64 = values.iter().sum();
        assert_ne!(naive, 1.0);
        assert_eq!(accurate_sum(values), 1.0);
    }

    #[test]
    fn test_cancellation() {
        assert_eq!(accurate_sum(vec![1e100, 1.0, -1e100]), 1.0);
        assert_eq!(accurate_sum(vec![1e100, 1.0, -1e100, 1e-100, 1e50, -1.0, -1e50]), 1e-100);
    }

    #[test]
    fn test_small_terms_not_lost() {
        let mut values = vec![1.0];
        values.extend(std::iter::repeat(1e-16).take(10));
        let naive: f64 = values.iter().sum();
        assert_eq!(naive, 1.0);
        assert!(accurate_sum(values) > 1.0);
    }

    #[test]
    fn test_half_even_rounding() {
        // 1 + 2^-53 is exactly halfway between 1 and the next double; the extra tiny term
        // pushes it above halfway.
        let half_ulp = 2f64.powi(-53);
        assert_eq!(accurate_sum(vec![1.0, half_ulp]), 1.0);
        assert_eq!(
            accurate_sum(vec![1.0, half_ulp, 1e-300]),
            1.0 + 2f64.powi(-52)
        );
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(accurate_sum(vec![1.0, f64::INFINITY]), f64::INFINITY);
        assert_eq!(accurate_sum(vec![f64::NEG_INFINITY, 1.0]), f64::NEG_INFINITY);
        assert!(accurate_sum(vec![f64::INFINITY, f64::NEG_INFINITY]).is_nan());
        assert!(accurate_sum(vec![1.0, f64::NAN]).is_nan());
    }

    #[test]
    fn test_overflow_saturates() {
        assert_eq!(accurate_sum(vec![f64::MAX, f64::MAX]), f64::INFINITY);
    }

    #[test]
    fn test_mean() {
        assert_eq!(accurate_mean(vec![0.0, 1.0]), Some(0.5));
        assert_eq!(accurate_mean(vec![5.0; 4]), Some(5.0));
    }

    #[test]
    fn test_reset() {
        let mut sum: AccurateSum = vec![1.0, f64::NAN].into_iter().collect();
        assert!(sum.total().is_nan());
        sum.reset();
        sum.add(2.5);
        assert_eq!(sum.total(), 2.5);
    }
}
