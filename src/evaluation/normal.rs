//! Standard normal distribution helpers.

use std::f64::consts::SQRT_2;

use statrs::function::erf::erfc;

/// Cumulative distribution function of the standard normal distribution.
///
/// Uses the complementary error function so the lower tail keeps its
/// relative precision. Absolute accuracy is about 1e-11, bounded by
/// `statrs::function::erf::erfc`.
///
/// # Examples
///
/// ```
/// use u_routing_sd::evaluation::standard_normal_cdf;
///
/// assert!((standard_normal_cdf(0.0) - 0.5).abs() < 1e-15);
/// assert!((standard_normal_cdf(1.959963984540054) - 0.975).abs() < 1e-10);
/// ```
pub fn standard_normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert!((standard_normal_cdf(1.0) - 0.841_344_746_068_543).abs() < 1e-10);
        assert!((standard_normal_cdf(-2.0) - 0.022_750_131_948_179).abs() < 1e-10);
        assert!(standard_normal_cdf(-40.0) >= 0.0);
        assert!((standard_normal_cdf(40.0) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_symmetry() {
        for &x in &[0.1, 0.5, 1.3, 2.7, 4.0] {
            let sum = standard_normal_cdf(x) + standard_normal_cdf(-x);
            assert!((sum - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_monotone() {
        let xs: Vec<f64> = (-50..=50).map(|i| i as f64 / 10.0).collect();
        for w in xs.windows(2) {
            assert!(standard_normal_cdf(w[0]) <= standard_normal_cdf(w[1]));
        }
    }
}
