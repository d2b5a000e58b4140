//! Error types for simulation runs.

use std::fmt;

/// Error returned by generators, statistical primitives, and run modes.
///
/// Configuration problems are rejected up front, before any random draw
/// happens. Numeric degeneracies (zero-variance test input, undefined
/// denominators) surface from inside a trial and abort only that trial's
/// contribution to an aggregate.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Invalid configuration or argument.
    ///
    /// Non-positive sizes or counts, probabilities outside (0, 1),
    /// correlations outside [-1, 1], empty sweep inputs, non-finite
    /// parameters.
    InvalidArgument {
        /// Name of the offending parameter.
        param: &'static str,
        /// Description of the violation.
        message: String,
    },

    /// Degenerate statistical computation.
    ///
    /// Division by zero in Cohen's d when `total_n <= 1`, zero pooled
    /// variance in the t-test, too few observations for a correlation
    /// p-value.
    Numeric {
        /// The computation that degenerated.
        context: &'static str,
        /// Description of the degeneracy.
        message: String,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidArgument { param, message } => {
                write!(f, "invalid argument {}: {}", param, message)
            }
            SimError::Numeric { context, message } => {
                write!(f, "numeric error in {}: {}", context, message)
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Shorthand for an [`SimError::InvalidArgument`].
    pub(crate) fn invalid(param: &'static str, message: impl Into<String>) -> Self {
        SimError::InvalidArgument {
            param,
            message: message.into(),
        }
    }

    /// Shorthand for a [`SimError::Numeric`].
    pub(crate) fn numeric(context: &'static str, message: impl Into<String>) -> Self {
        SimError::Numeric {
            context,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_argument() {
        let err = SimError::invalid("alpha", "must be in (0, 1), got 1.5");
        assert_eq!(
            err.to_string(),
            "invalid argument alpha: must be in (0, 1), got 1.5"
        );
    }

    #[test]
    fn display_numeric() {
        let err = SimError::numeric("cohens_d", "total_n must be > 1");
        assert_eq!(err.to_string(), "numeric error in cohens_d: total_n must be > 1");
    }
}
