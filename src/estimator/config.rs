//! Estimator configuration.

use super::{DEFAULT_ANNUALIZATION_FACTOR, DEFAULT_WINDOW, FAST_LAMBDA, SLOW_LAMBDA};
use crate::error::VolError;
use serde::{Deserialize, Serialize};

/// Parameters shared by the historical, EWMA and ensemble estimators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Rolling window for historical volatility, in returns.
    pub window: usize,
    /// Periods per year used to annualize (252 trading days).
    pub annualization_factor: u32,
    /// Decay of the fast EWMA (about a 16 day half-life at 0.94).
    pub fast_lambda: f64,
    /// Decay of the slow EWMA (about a 33 day half-life at 0.97).
    pub slow_lambda: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            annualization_factor: DEFAULT_ANNUALIZATION_FACTOR,
            fast_lambda: FAST_LAMBDA,
            slow_lambda: SLOW_LAMBDA,
        }
    }
}

impl EstimatorConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rolling window.
    #[must_use]
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Sets the annualization factor.
    #[must_use]
    pub fn with_annualization_factor(mut self, annualization_factor: u32) -> Self {
        self.annualization_factor = annualization_factor;
        self
    }

    /// Sets the fast and slow EWMA decay factors.
    #[must_use]
    pub fn with_lambdas(mut self, fast_lambda: f64, slow_lambda: f64) -> Self {
        self.fast_lambda = fast_lambda;
        self.slow_lambda = slow_lambda;
        self
    }

    /// Serializes the configuration to JSON.
    pub fn to_json(&self) -> Result<String, VolError> {
        serde_json::to_string(self).map_err(|error| VolError::Serialization {
            message: error.to_string(),
        })
    }

    /// Deserializes a configuration from JSON. Missing fields take defaults.
    pub fn from_json(data: &str) -> Result<Self, VolError> {
        serde_json::from_str(data).map_err(|error| VolError::Serialization {
            message: error.to_string(),
        })
    }
}
