//! Statistical primitives for experiment simulation.
//!
//! This module provides the numerical core shared by every run mode:
//! - Two-sample Student t-test (equal variances, two-sided)
//! - Sample Pearson correlation with significance
//! - Standardized effect size (Cohen's d) from a t-statistic
//! - Achieved power of the two-sample t-test via the noncentral-t CDF

pub mod effect;
pub mod pearson;
pub mod power;
pub mod ttest;

pub use effect::cohens_d;
pub use pearson::{pearson_r, Pearson};
pub use power::achieved_power;
pub use ttest::{ttest_ind, TTest};

/// Round to 3 decimal places, the precision reported per trial.
#[inline]
pub(crate) fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// Mean of a slice. Caller guarantees a non-empty input.
#[inline]
pub(crate) fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Sample variance (ddof = 1) given a precomputed mean.
///
/// Returns NaN for fewer than two observations; callers turn that into a
/// `Numeric` error with context.
#[inline]
pub(crate) fn var_sample(xs: &[f64], mean: f64) -> f64 {
    let n = xs.len();
    if n < 2 {
        return f64::NAN;
    }
    let ss: f64 = xs.iter().map(|&v| (v - mean) * (v - mean)).sum();
    ss / (n - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round3_truncates_to_millis() {
        assert_eq!(round3(0.123_456), 0.123);
        assert_eq!(round3(0.999_9), 1.0);
        assert_eq!(round3(-0.049_5), -0.05);
    }

    #[test]
    fn mean_and_variance_match_hand_computation() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let m = mean(&xs);
        assert_eq!(m, 2.5);
        // ss = 2.25 + 0.25 + 0.25 + 2.25 = 5.0; var = 5/3
        assert!((var_sample(&xs, m) - 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn variance_of_singleton_is_nan() {
        assert!(var_sample(&[1.0], 1.0).is_nan());
    }
}
