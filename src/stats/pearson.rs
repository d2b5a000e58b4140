//! Sample Pearson correlation with two-sided significance.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::{Result, SimError};
use crate::stats::{mean, var_sample};

/// Realized correlation between two sequences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pearson {
    /// Sample correlation coefficient, in [-1, 1].
    pub r: f64,
    /// Two-sided p-value under the null of zero correlation.
    pub p_value: f64,
}

/// Sample Pearson correlation coefficient and its two-sided p-value.
///
/// Significance uses the exact null distribution via the t transform
/// `t = r * sqrt(df / (1 - r²))` with `df = n - 2`. A perfectly
/// correlated sample (|r| = 1) gets `p = 0`.
///
/// # Errors
///
/// `Numeric` when the sequences differ in length, hold fewer than three
/// pairs (the p-value needs `df > 0`), or either side has zero variance.
pub fn pearson_r(x: &[f64], y: &[f64]) -> Result<Pearson> {
    let n = x.len();
    if n != y.len() {
        return Err(SimError::numeric(
            "pearson_r",
            format!("sequences must have equal length, got {} and {}", n, y.len()),
        ));
    }
    if n < 3 {
        return Err(SimError::numeric(
            "pearson_r",
            format!("need at least 3 pairs for a p-value, got {}", n),
        ));
    }

    let mean_x = mean(x);
    let mean_y = mean(y);
    let var_x = var_sample(x, mean_x);
    let var_y = var_sample(y, mean_y);
    if var_x <= 0.0 || var_y <= 0.0 || !var_x.is_finite() || !var_y.is_finite() {
        return Err(SimError::numeric(
            "pearson_r",
            "zero-variance input has no defined correlation",
        ));
    }

    let cov: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| (xi - mean_x) * (yi - mean_y))
        .sum::<f64>()
        / (n - 1) as f64;
    // Floating point can push |r| marginally past 1.
    let r = (cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0);

    let df = (n - 2) as f64;
    let p_value = if r.abs() >= 1.0 {
        0.0
    } else {
        let t = r * (df / (1.0 - r * r)).sqrt();
        let dist = StudentsT::new(0.0, 1.0, df)
            .map_err(|e| SimError::numeric("pearson_r", e.to_string()))?;
        (2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0)
    };

    Ok(Pearson { r, p_value })
}
