//! Naive ensemble of the historical and EWMA estimators.

use super::config::EstimatorConfig;
use super::ewma::{ewma_volatility, ewma_volatility_series};
use super::historical::{historical_volatility, last_valid};
use super::returns::validate_prices;
use crate::error::VolError;
use tracing::trace;

/// Ensemble volatility with the default lambdas and annualization factor.
///
/// See [`ensemble_volatility_with`].
pub fn ensemble_volatility(prices: &[f64], window: usize) -> Result<f64, VolError> {
    ensemble_volatility_with(prices, &EstimatorConfig::default().with_window(window))
}

/// Unweighted mean of the latest historical value, the fast EWMA and the slow EWMA.
///
/// Only estimates that are finite and strictly positive enter the mean.
/// Returns `0.0` if none qualifies (for example a constant price series).
///
/// # Errors
/// - [`VolError::InvalidInput`] for an empty series or invalid config.
/// - [`VolError::InsufficientData`] for a single price.
pub fn ensemble_volatility_with(
    prices: &[f64],
    config: &EstimatorConfig,
) -> Result<f64, VolError> {
    validate_prices(prices)?;

    let historical = historical_volatility(prices, config.window, config.annualization_factor)?;
    let fast = ewma_volatility(prices, config.fast_lambda, config.annualization_factor)?;
    let slow = ewma_volatility(prices, config.slow_lambda, config.annualization_factor)?;
    let latest_historical = last_valid(&historical).unwrap_or(0.0);

    trace!(
        "ensemble inputs: historical {:.4}, fast {:.4}, slow {:.4}",
        latest_historical, fast, slow
    );

    Ok(mean_of_valid(&[latest_historical, fast, slow], |v| v > 0.0).unwrap_or(0.0))
}

/// Ensemble value at every price index, aligned with `prices`.
///
/// At each index the mean of whichever of historical, fast EWMA and slow
/// EWMA values are not NaN; NaN if none is.
///
/// # Errors
/// Same as [`ensemble_volatility_with`].
pub fn ensemble_volatility_series(
    prices: &[f64],
    config: &EstimatorConfig,
) -> Result<Vec<f64>, VolError> {
    validate_prices(prices)?;

    let historical = historical_volatility(prices, config.window, config.annualization_factor)?;
    let fast = ewma_volatility_series(prices, config.fast_lambda, config.annualization_factor)?;
    let slow = ewma_volatility_series(prices, config.slow_lambda, config.annualization_factor)?;

    Ok(historical
        .iter()
        .zip(&fast)
        .zip(&slow)
        .map(|((h, f), s)| mean_of_valid(&[*h, *f, *s], |_| true).unwrap_or(f64::NAN))
        .collect())
}

fn mean_of_valid(values: &[f64], accept: impl Fn(f64) -> bool) -> Option<f64> {
    let valid: Vec<f64> = values
        .iter()
        .copied()
        .filter(|v| !v.is_nan() && accept(*v))
        .collect();
    if valid.is_empty() {
        None
    } else {
        Some(valid.iter().sum::<f64>() / valid.len() as f64)
    }
}
