//! Synthetic sample generation.
//!
//! Produces the raw material every run mode consumes: paired Gaussian
//! groups separated by a requested Cohen's d, and bivariate Gaussian pairs
//! with a requested population correlation. All draws go through an
//! injected [`Rng`] so runs are deterministic under a fixed seed.

use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal};
use serde::Serialize;

use crate::error::{Result, SimError};
use crate::stats::pearson::pearson_r;
use crate::stats::round3;

/// One correlated bivariate draw together with its realized statistics.
///
/// `r` and `p_value` are the *sample* Pearson coefficient and its two-sided
/// significance, computed from the drawn pairs. They differ from the
/// requested population correlation by sampling noise; that gap is the
/// point of the correlation sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelatedSample {
    /// First coordinate of each drawn pair.
    pub x: Vec<f64>,
    /// Second coordinate of each drawn pair.
    pub y: Vec<f64>,
    /// Realized sample Pearson coefficient, rounded to 3 decimals.
    pub r: f64,
    /// Two-sided p-value of the realized coefficient, rounded to 3 decimals.
    pub p_value: f64,
}

/// Generate two independent Gaussian groups separated by `effect_size`.
///
/// Both groups share standard deviation `sd`. The mean separation is
/// `pooled_sd * |effect_size|` with `pooled_sd = sqrt((sd² + sd²) / 2)`.
/// Group A is always centered at 0; group B is centered at `+separation`
/// when `effect_size < 0` and at `-separation` otherwise.
///
/// The sign convention is inherited intentionally: which group sits above
/// zero flips with the sign of the requested effect. Downstream statistics
/// depend on it, so it must not be "fixed".
///
/// # Errors
///
/// `InvalidArgument` if `n == 0`, `sd` is not a positive finite number, or
/// `effect_size` is not finite.
pub fn generate_paired_samples<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    effect_size: f64,
    sd: f64,
) -> Result<(Vec<f64>, Vec<f64>)> {
    if n == 0 {
        return Err(SimError::invalid("n", "samples per group must be > 0"));
    }
    if !sd.is_finite() || sd <= 0.0 {
        return Err(SimError::invalid(
            "sd",
            format!("standard deviation must be positive and finite, got {}", sd),
        ));
    }
    if !effect_size.is_finite() {
        return Err(SimError::invalid(
            "effect_size",
            format!("effect size must be finite, got {}", effect_size),
        ));
    }

    let pooled_sd = ((sd * sd + sd * sd) / 2.0).sqrt();
    let separation = pooled_sd * effect_size.abs();
    let shift = if effect_size < 0.0 { separation } else { -separation };

    // Validation above guarantees both constructions succeed.
    let group_a = Normal::new(0.0, sd)
        .map_err(|e| SimError::numeric("normal sampler", e.to_string()))?;
    let group_b = Normal::new(shift, sd)
        .map_err(|e| SimError::numeric("normal sampler", e.to_string()))?;

    let a: Vec<f64> = (0..n).map(|_| group_a.sample(rng)).collect();
    let b: Vec<f64> = (0..n).map(|_| group_b.sample(rng)).collect();
    Ok((a, b))
}

/// Draw `n` pairs from a bivariate normal with population correlation `r`.
///
/// Means are zero and variances are one, so the covariance matrix is
/// `[[1, r], [r, 1]]`; its Cholesky factor gives the closed form
/// `x = z1`, `y = r·z1 + sqrt(1 − r²)·z2` for independent standard
/// normals `z1`, `z2`.
///
/// The returned [`CorrelatedSample`] carries the realized sample
/// correlation and its p-value, not the population parameter.
///
/// # Errors
///
/// `InvalidArgument` if `r` is outside [-1, 1] or `n == 0`; `Numeric` if
/// the realized sample is too small or too degenerate for a correlation
/// (`n < 3` or a zero-variance coordinate).
pub fn generate_correlated_samples<R: Rng + ?Sized>(
    rng: &mut R,
    r: f64,
    n: usize,
) -> Result<CorrelatedSample> {
    if !r.is_finite() || !(-1.0..=1.0).contains(&r) {
        return Err(SimError::invalid(
            "r",
            format!("population correlation must be in [-1, 1], got {}", r),
        ));
    }
    if n == 0 {
        return Err(SimError::invalid("n", "sample size must be > 0"));
    }

    let residual_scale = (1.0 - r * r).sqrt();
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    for _ in 0..n {
        let z1: f64 = rng.sample(StandardNormal);
        let z2: f64 = rng.sample(StandardNormal);
        x.push(z1);
        y.push(r * z1 + residual_scale * z2);
    }

    let realized = pearson_r(&x, &y)?;
    Ok(CorrelatedSample {
        x,
        y,
        r: round3(realized.r),
        p_value: round3(realized.p_value),
    })
}
