//! Error types for volatility estimation and option pricing.

use std::fmt;

/// Errors returned by the estimators, the pricer and the solver.
///
/// Variants are kept distinct so callers can react differently: an input
/// error is a caller bug, a convergence failure may justify falling back to
/// another volatility source.
#[derive(Debug, Clone, PartialEq)]
pub enum VolError {
    /// Malformed or out-of-contract argument.
    InvalidInput {
        /// Description of the invalid argument.
        message: String,
    },

    /// Not enough observations to compute anything.
    InsufficientData {
        /// Minimum number of observations required.
        required: usize,
        /// Number of observations supplied.
        actual: usize,
    },

    /// Newton-Raphson solver failed to reach the price tolerance.
    DidNotConverge {
        /// Number of iterations performed before giving up.
        iterations: u32,
        /// Last volatility estimate (decimal fraction).
        last_volatility: f64,
    },

    /// No option strike fell inside the at-the-money band.
    NoAtmOptions {
        /// Spot price used for the moneyness filter.
        spot: f64,
        /// Relative distance band, e.g. 0.05 for 5%.
        band: f64,
    },

    /// Every at-the-money candidate failed implied volatility inversion.
    AllImpliedVolFailed {
        /// Number of candidates attempted.
        attempted: usize,
    },

    /// Serialization or deserialization failure.
    Serialization {
        /// Underlying serde error message.
        message: String,
    },

    /// A volatility index provider failed to return a quote.
    Provider {
        /// Description reported by the provider.
        message: String,
    },
}

impl VolError {
    /// Shorthand for [`VolError::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        VolError::InvalidInput {
            message: message.into(),
        }
    }

    /// Shorthand for [`VolError::Provider`].
    pub fn provider(message: impl Into<String>) -> Self {
        VolError::Provider {
            message: message.into(),
        }
    }
}

impl fmt::Display for VolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolError::InvalidInput { message } => {
                write!(f, "invalid input: {message}")
            }
            VolError::InsufficientData { required, actual } => {
                write!(
                    f,
                    "insufficient data: need at least {required} observations, got {actual}"
                )
            }
            VolError::DidNotConverge {
                iterations,
                last_volatility,
            } => {
                write!(
                    f,
                    "implied volatility did not converge after {iterations} iterations, last estimate: {last_volatility:.4}"
                )
            }
            VolError::NoAtmOptions { spot, band } => {
                write!(
                    f,
                    "no option strikes within {:.1}% of spot {spot:.4}",
                    band * 100.0
                )
            }
            VolError::AllImpliedVolFailed { attempted } => {
                write!(
                    f,
                    "implied volatility failed for all {attempted} at-the-money options"
                )
            }
            VolError::Serialization { message } => {
                write!(f, "serialization error: {message}")
            }
            VolError::Provider { message } => {
                write!(f, "volatility index provider error: {message}")
            }
        }
    }
}

impl std::error::Error for VolError {}
