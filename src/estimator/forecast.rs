//! Short horizon volatility forecasts built on the estimators.

use super::ewma::ewma_volatility;
use super::historical::{historical_volatility, last_valid};
use crate::error::VolError;
use crate::pricing::norm_inv;
use serde::{Deserialize, Serialize};

/// Forecast path with a symmetric confidence band, in percentage points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBands {
    /// Point forecast.
    pub forecast: Vec<f64>,
    /// Lower bound, floored at zero.
    pub lower: Vec<f64>,
    /// Upper bound.
    pub upper: Vec<f64>,
    /// Two-sided confidence level of the band.
    pub confidence: f64,
}

/// Geometric decay path from the latest historical volatility.
///
/// Element `i` is `current * decay^i`, so the first element is the current
/// estimate itself.
///
/// # Errors
/// - [`VolError::InvalidInput`] for invalid prices, window or a `decay`
///   outside `(0, 1]`.
/// - [`VolError::InsufficientData`] if no full window is available.
pub fn decay_forecast(
    prices: &[f64],
    horizon: usize,
    decay: f64,
    window: usize,
    annualization_factor: u32,
) -> Result<Vec<f64>, VolError> {
    if !(decay > 0.0 && decay <= 1.0) {
        return Err(VolError::invalid_input(format!(
            "decay must be in (0, 1], got {decay}"
        )));
    }

    let historical = historical_volatility(prices, window, annualization_factor)?;
    let current = last_valid(&historical).ok_or(VolError::InsufficientData {
        required: window + 1,
        actual: prices.len(),
    })?;

    Ok((0..horizon)
        .scan(current, |vol, _| {
            let value = *vol;
            *vol *= decay;
            Some(value)
        })
        .collect())
}

/// Flat EWMA forecast: the current EWMA estimate repeated `horizon` times.
///
/// # Errors
/// Same as [`ewma_volatility`].
pub fn ewma_forecast(
    prices: &[f64],
    horizon: usize,
    lambda: f64,
    annualization_factor: u32,
) -> Result<Vec<f64>, VolError> {
    let current = ewma_volatility(prices, lambda, annualization_factor)?;
    Ok(vec![current; horizon])
}

/// Two-sided confidence band `forecast ± z * volatility_std`, where `z` is
/// the standard normal quantile at `(1 + confidence) / 2`.
///
/// Lower bounds are floored at zero.
///
/// # Errors
/// [`VolError::InvalidInput`] if `confidence` is outside `(0, 1)` or
/// `volatility_std` is negative or not finite.
pub fn confidence_intervals(
    forecast: &[f64],
    volatility_std: f64,
    confidence: f64,
) -> Result<(Vec<f64>, Vec<f64>), VolError> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(VolError::invalid_input(format!(
            "confidence must be in (0, 1), got {confidence}"
        )));
    }
    if !(volatility_std.is_finite() && volatility_std >= 0.0) {
        return Err(VolError::invalid_input(format!(
            "volatility standard deviation must be non-negative, got {volatility_std}"
        )));
    }

    let half_width = norm_inv(0.5 * (1.0 + confidence)) * volatility_std;
    let lower = forecast.iter().map(|f| (f - half_width).max(0.0)).collect();
    let upper = forecast.iter().map(|f| f + half_width).collect();
    Ok((lower, upper))
}

/// [`decay_forecast`] with a confidence band sized by the dispersion of the
/// rolling historical volatility.
///
/// The band uses the population standard deviation of every valid
/// historical value.
///
/// # Errors
/// Same as [`decay_forecast`] and [`confidence_intervals`].
pub fn decay_forecast_bands(
    prices: &[f64],
    horizon: usize,
    decay: f64,
    window: usize,
    annualization_factor: u32,
    confidence: f64,
) -> Result<ForecastBands, VolError> {
    let forecast = decay_forecast(prices, horizon, decay, window, annualization_factor)?;

    let valid: Vec<f64> = historical_volatility(prices, window, annualization_factor)?
        .into_iter()
        .filter(|v| v.is_finite())
        .collect();
    let n = valid.len() as f64;
    let center = valid.iter().sum::<f64>() / n;
    let dispersion = (valid.iter().map(|v| (v - center).powi(2)).sum::<f64>() / n).sqrt();

    let (lower, upper) = confidence_intervals(&forecast, dispersion, confidence)?;
    Ok(ForecastBands {
        forecast,
        lower,
        upper,
        confidence,
    })
}
