//! Standardized effect size from a test statistic.

use crate::error::{Result, SimError};

/// Cohen's d recovered from a two-sample t-statistic.
///
/// `d = 2t / sqrt(total_n - 1)` where `total_n` is the combined size of
/// both groups. Linear in `t`, so the sign of the statistic carries
/// through to the effect.
///
/// # Errors
///
/// `Numeric` when `total_n <= 1`: the denominator is zero or imaginary.
pub fn cohens_d(t: f64, total_n: usize) -> Result<f64> {
    if total_n <= 1 {
        return Err(SimError::numeric(
            "cohens_d",
            format!("total_n must be > 1, got {}", total_n),
        ));
    }
    Ok(2.0 * t / ((total_n - 1) as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_value() {
        // d = 2 * 3 / sqrt(36) = 1.0
        assert_eq!(cohens_d(3.0, 37).unwrap(), 1.0);
    }

    #[test]
    fn linear_in_t() {
        let t = 1.37;
        let d1 = cohens_d(t, 40).unwrap();
        let d2 = cohens_d(2.0 * t, 40).unwrap();
        assert!((d2 - 2.0 * d1).abs() < 1e-12);
    }

    #[test]
    fn preserves_sign() {
        assert!(cohens_d(-2.0, 50).unwrap() < 0.0);
        assert!(cohens_d(2.0, 50).unwrap() > 0.0);
    }

    #[test]
    fn degenerate_total_n() {
        for total_n in [0, 1] {
            let err = cohens_d(1.0, total_n).unwrap_err();
            assert!(matches!(err, SimError::Numeric { context: "cohens_d", .. }));
        }
    }
}
