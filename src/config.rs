//! Run configurations for the three simulation modes.
//!
//! Each configuration is an immutable record of the parameters driving one
//! batch of trials. Validation happens once, before any random draw, so a
//! bad configuration can never produce a partial run.

use serde::Serialize;

use crate::error::{Result, SimError};

/// Default significance threshold used by the demo parameter sets.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Shared standard deviation of the generated groups.
pub const GROUP_SD: f64 = 1.0;

fn check_alpha(alpha: f64) -> Result<()> {
    if !alpha.is_finite() || alpha <= 0.0 || alpha >= 1.0 {
        return Err(SimError::invalid(
            "alpha",
            format!("significance level must be in (0, 1), got {}", alpha),
        ));
    }
    Ok(())
}

/// Configuration for a power sweep across sample sizes (Mode A).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepConfig {
    /// Per-group sample sizes to sweep, in presentation order.
    pub sample_sizes: Vec<usize>,

    /// True standardized effect separating the two groups.
    pub effect_size: f64,

    /// Independent trials per sample size.
    pub n_trials: usize,

    /// Significance threshold for the per-trial t-test.
    pub alpha: f64,

    /// Optional deterministic seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl SweepConfig {
    /// Sweep the given sizes at the given effect, with 100 trials per size
    /// and `alpha` = 0.05.
    pub fn new(sample_sizes: Vec<usize>, effect_size: f64) -> Self {
        Self {
            sample_sizes,
            effect_size,
            n_trials: 100,
            alpha: DEFAULT_ALPHA,
            seed: None,
        }
    }

    /// Set the number of trials per sample size.
    pub fn with_trials(mut self, n_trials: usize) -> Self {
        self.n_trials = n_trials;
        self
    }

    /// Set the significance threshold.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set a deterministic seed for the whole sweep.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject the configuration before any trial executes.
    pub fn validate(&self) -> Result<()> {
        if self.sample_sizes.is_empty() {
            return Err(SimError::invalid("sample_sizes", "sweep must not be empty"));
        }
        if let Some(&size) = self.sample_sizes.iter().find(|&&s| s < 2) {
            return Err(SimError::invalid(
                "sample_sizes",
                format!("each sample size needs at least 2 per group, got {}", size),
            ));
        }
        if self.n_trials == 0 {
            return Err(SimError::invalid("n_trials", "trial count must be > 0"));
        }
        if !self.effect_size.is_finite() {
            return Err(SimError::invalid(
                "effect_size",
                format!("effect size must be finite, got {}", self.effect_size),
            ));
        }
        check_alpha(self.alpha)
    }
}

/// Configuration for a correlation sweep (Mode B).
///
/// Each target correlation is drawn once at a small and once at a large
/// sample size; the contrast between the two realized coefficients is the
/// output of interest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationConfig {
    /// Target population correlations, in presentation order.
    pub correlations: Vec<f64>,

    /// Sample size of the small draw.
    pub n_small: usize,

    /// Sample size of the large draw.
    pub n_large: usize,

    /// Optional deterministic seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl CorrelationConfig {
    /// Contrast the given correlations at the two sample sizes.
    pub fn new(correlations: Vec<f64>, n_small: usize, n_large: usize) -> Self {
        Self {
            correlations,
            n_small,
            n_large,
            seed: None,
        }
    }

    /// Set a deterministic seed for the whole sweep.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject the configuration before any trial executes.
    pub fn validate(&self) -> Result<()> {
        if self.correlations.is_empty() {
            return Err(SimError::invalid("correlations", "sweep must not be empty"));
        }
        if let Some(&r) = self
            .correlations
            .iter()
            .find(|&&r| !r.is_finite() || !(-1.0..=1.0).contains(&r))
        {
            return Err(SimError::invalid(
                "correlations",
                format!("target correlation must be in [-1, 1], got {}", r),
            ));
        }
        // A realized coefficient needs df > 0, hence at least 3 pairs.
        for (param, n) in [("n_small", self.n_small), ("n_large", self.n_large)] {
            if n < 3 {
                return Err(SimError::invalid(
                    param,
                    format!("correlation sample needs at least 3 pairs, got {}", n),
                ));
            }
        }
        Ok(())
    }
}

/// Configuration for the file-drawer simulation (Mode C).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileDrawerConfig {
    /// Samples per group in each simulated experiment.
    pub n_per_group: usize,

    /// Mean of the ground-truth effect-size distribution.
    pub effect_mu: f64,

    /// Standard deviation of the ground-truth effect-size distribution.
    pub effect_sigma: f64,

    /// Number of simulated experiments.
    pub n_trials: usize,

    /// Significance threshold deciding which effects get "published".
    pub alpha: f64,

    /// Optional deterministic seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl FileDrawerConfig {
    /// Simulate `n_trials` experiments against effects drawn from
    /// N(`effect_mu`, `effect_sigma`), with `alpha` = 0.05.
    pub fn new(n_per_group: usize, effect_mu: f64, effect_sigma: f64, n_trials: usize) -> Self {
        Self {
            n_per_group,
            effect_mu,
            effect_sigma,
            n_trials,
            alpha: DEFAULT_ALPHA,
            seed: None,
        }
    }

    /// Set the significance threshold.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set a deterministic seed for the whole run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject the configuration before any trial executes.
    pub fn validate(&self) -> Result<()> {
        if self.n_per_group < 2 {
            return Err(SimError::invalid(
                "n_per_group",
                format!("need at least 2 observations per group, got {}", self.n_per_group),
            ));
        }
        if self.n_trials == 0 {
            return Err(SimError::invalid("n_trials", "trial count must be > 0"));
        }
        if !self.effect_mu.is_finite() {
            return Err(SimError::invalid(
                "effect_mu",
                format!("effect mean must be finite, got {}", self.effect_mu),
            ));
        }
        if !self.effect_sigma.is_finite() || self.effect_sigma < 0.0 {
            return Err(SimError::invalid(
                "effect_sigma",
                format!(
                    "effect standard deviation must be non-negative and finite, got {}",
                    self.effect_sigma
                ),
            ));
        }
        check_alpha(self.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_defaults() {
        let config = SweepConfig::new(vec![5, 10, 20], 0.4);
        assert_eq!(config.n_trials, 100);
        assert_eq!(config.alpha, 0.05);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn sweep_builder_chain() {
        let config = SweepConfig::new(vec![10], 0.4)
            .with_trials(50)
            .with_alpha(0.01)
            .with_seed(7);
        assert_eq!(config.n_trials, 50);
        assert_eq!(config.alpha, 0.01);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn empty_sweep_is_rejected() {
        let err = SweepConfig::new(vec![], 0.4).validate().unwrap_err();
        assert!(matches!(err, SimError::InvalidArgument { param: "sample_sizes", .. }));
    }

    #[test]
    fn out_of_range_alpha_is_rejected() {
        for alpha in [0.0, 1.0, -0.5, 2.0, f64::NAN] {
            let err = SweepConfig::new(vec![10], 0.4)
                .with_alpha(alpha)
                .validate()
                .unwrap_err();
            assert!(matches!(err, SimError::InvalidArgument { param: "alpha", .. }));
        }
    }

    #[test]
    fn correlation_bounds_are_enforced() {
        let err = CorrelationConfig::new(vec![0.2, 1.1], 20, 2000)
            .validate()
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidArgument { param: "correlations", .. }));
    }

    #[test]
    fn correlation_sample_sizes_are_enforced() {
        let err = CorrelationConfig::new(vec![0.2], 2, 2000).validate().unwrap_err();
        assert!(matches!(err, SimError::InvalidArgument { param: "n_small", .. }));
    }

    #[test]
    fn file_drawer_sigma_must_be_nonnegative() {
        let err = FileDrawerConfig::new(20, 0.3, -0.1, 100).validate().unwrap_err();
        assert!(matches!(err, SimError::InvalidArgument { param: "effect_sigma", .. }));
    }

    #[test]
    fn file_drawer_defaults_are_valid() {
        assert!(FileDrawerConfig::new(30, 0.3, 0.1, 1000).validate().is_ok());
    }
}
