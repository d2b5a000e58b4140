//! Independent two-sample Student t-test.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::{Result, SimError};
use crate::stats::{mean, var_sample};

/// Result of a two-sample comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TTest {
    /// The t-statistic. Positive when group A's mean exceeds group B's.
    pub t: f64,
    /// Two-sided p-value under the null of equal means.
    pub p_value: f64,
    /// Degrees of freedom, `n_a + n_b - 2`.
    pub df: f64,
}

/// Equal-variance two-sample t-test, two-sided.
///
/// Pools the two sample variances, computes
/// `t = (mean_a - mean_b) / (s_p * sqrt(1/n_a + 1/n_b))` with
/// `df = n_a + n_b - 2`, and evaluates the two-sided p-value from the
/// central Student-t CDF.
///
/// # Errors
///
/// `Numeric` when either group has fewer than two observations or the
/// pooled variance is zero (the statistic is undefined for constant
/// input).
pub fn ttest_ind(a: &[f64], b: &[f64]) -> Result<TTest> {
    let n_a = a.len();
    let n_b = b.len();
    if n_a < 2 || n_b < 2 {
        return Err(SimError::numeric(
            "ttest_ind",
            format!("each group needs at least 2 observations, got {} and {}", n_a, n_b),
        ));
    }

    let mean_a = mean(a);
    let mean_b = mean(b);
    let var_a = var_sample(a, mean_a);
    let var_b = var_sample(b, mean_b);

    let df = (n_a + n_b - 2) as f64;
    let pooled_var = ((n_a - 1) as f64 * var_a + (n_b - 1) as f64 * var_b) / df;
    if !pooled_var.is_finite() || pooled_var <= 0.0 {
        return Err(SimError::numeric(
            "ttest_ind",
            "pooled variance is zero or non-finite",
        ));
    }

    let se = (pooled_var * (1.0 / n_a as f64 + 1.0 / n_b as f64)).sqrt();
    let t = (mean_a - mean_b) / se;

    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| SimError::numeric("ttest_ind", e.to_string()))?;
    let p_value = (2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0);

    Ok(TTest { t, p_value, df })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_groups_give_zero_statistic() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let result = ttest_ind(&a, &a).unwrap();
        assert!(result.t.abs() < 1e-12);
        assert!((result.p_value - 1.0).abs() < 1e-12);
        assert_eq!(result.df, 8.0);
    }

    #[test]
    fn separated_groups_are_significant() {
        let a: Vec<f64> = (0..30).map(|i| i as f64 * 0.01).collect();
        let b: Vec<f64> = (0..30).map(|i| 10.0 + i as f64 * 0.01).collect();
        let result = ttest_ind(&a, &b).unwrap();
        assert!(result.t < -100.0, "t = {}", result.t);
        assert!(result.p_value < 1e-10);
    }

    #[test]
    fn known_value_matches_scipy() {
        // scipy.stats.ttest_ind([1,2,3,4], [3,4,5,6]) -> t=-2.1908902, p=0.0709877
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [3.0, 4.0, 5.0, 6.0];
        let result = ttest_ind(&a, &b).unwrap();
        assert!((result.t - (-2.190_890_2)).abs() < 1e-6, "t = {}", result.t);
        assert!((result.p_value - 0.070_987_7).abs() < 1e-5, "p = {}", result.p_value);
    }

    #[test]
    fn constant_input_degenerates() {
        let a = [2.0, 2.0, 2.0];
        let b = [2.0, 2.0, 2.0];
        let err = ttest_ind(&a, &b).unwrap_err();
        assert!(matches!(err, SimError::Numeric { context: "ttest_ind", .. }));
    }

    #[test]
    fn tiny_groups_degenerate() {
        let err = ttest_ind(&[1.0], &[2.0, 3.0]).unwrap_err();
        assert!(matches!(err, SimError::Numeric { .. }));
    }
}
