//! Chart-ready volatility report.
//!
//! Bundles the historical, EWMA and ensemble series for a dated price
//! history together with an optional implied volatility reading, in the
//! shape a charting layer consumes. Missing values serialize as `null`.

use crate::error::VolError;
use crate::estimator::{
    EstimatorConfig, ensemble_volatility_series, ewma_volatility_series, historical_volatility,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Aligned volatility series for a dated price history.
///
/// Every series has one entry per label. Values are annualized percentage
/// points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityReport {
    /// Date label of each observation.
    pub labels: Vec<String>,
    /// Rolling historical volatility; `None` during the warm-up window.
    pub historical: Vec<Option<f64>>,
    /// Fast EWMA volatility.
    pub forecast: Vec<Option<f64>>,
    /// Ensemble of historical and both EWMA series.
    pub ensemble: Vec<Option<f64>>,
    /// Implied volatility, only ever set on the last observation.
    pub implied_vol: Vec<Option<f64>>,
}

/// Latest value of each model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPredictions {
    /// Historical volatility at the last observation.
    pub historical: Option<f64>,
    /// Fast EWMA volatility at the last observation.
    pub ewma: Option<f64>,
    /// Ensemble volatility at the last observation.
    pub ensemble: Option<f64>,
    /// Implied volatility, when one was supplied.
    pub implied: Option<f64>,
    /// Most recent historical value that is not missing.
    pub historical_vol: Option<f64>,
}

fn to_options(series: Vec<f64>) -> Vec<Option<f64>> {
    series
        .into_iter()
        .map(|v| if v.is_finite() { Some(v) } else { None })
        .collect()
}

impl VolatilityReport {
    /// Computes every series for `prices` labelled by `labels`.
    ///
    /// `implied_vol`, in percentage points, is attached to the last label.
    ///
    /// # Errors
    /// - [`VolError::InvalidInput`] if `labels` and `prices` differ in length,
    ///   or for invalid prices or config.
    /// - [`VolError::InsufficientData`] for a single price.
    pub fn build(
        labels: Vec<String>,
        prices: &[f64],
        implied_vol: Option<f64>,
        config: &EstimatorConfig,
    ) -> Result<Self, VolError> {
        if labels.len() != prices.len() {
            return Err(VolError::invalid_input(format!(
                "got {} labels for {} prices",
                labels.len(),
                prices.len()
            )));
        }

        let historical =
            historical_volatility(prices, config.window, config.annualization_factor)?;
        let forecast =
            ewma_volatility_series(prices, config.fast_lambda, config.annualization_factor)?;
        let ensemble = ensemble_volatility_series(prices, config)?;

        let mut implied = vec![None; prices.len()];
        if let Some(last) = implied.last_mut() {
            *last = implied_vol.filter(|v| v.is_finite());
        }

        debug!(observations = prices.len(), "built volatility report");

        Ok(Self {
            labels,
            historical: to_options(historical),
            forecast: to_options(forecast),
            ensemble: to_options(ensemble),
            implied_vol: implied,
        })
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the report has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Values of each model at the last observation.
    #[must_use]
    pub fn summary(&self) -> ModelPredictions {
        let last = |series: &[Option<f64>]| series.last().copied().flatten();
        ModelPredictions {
            historical: last(&self.historical),
            ewma: last(&self.forecast),
            ensemble: last(&self.ensemble),
            implied: last(&self.implied_vol),
            historical_vol: self.historical.iter().rev().find_map(|v| *v),
        }
    }

    /// Serializes the report to JSON.
    pub fn to_json(&self) -> Result<String, VolError> {
        serde_json::to_string(self).map_err(|e| VolError::Serialization {
            message: e.to_string(),
        })
    }

    /// Parses a report from JSON.
    pub fn from_json(json: &str) -> Result<Self, VolError> {
        serde_json::from_str(json).map_err(|e| VolError::Serialization {
            message: e.to_string(),
        })
    }
}
