//! Return series and sample statistics shared by the estimators.

use crate::error::VolError;

/// Checks that a price series is non-empty and strictly positive.
///
/// Returns [`VolError::InvalidInput`] for an empty series or for any price
/// that is zero, negative or not finite.
pub(crate) fn validate_prices(prices: &[f64]) -> Result<(), VolError> {
    if prices.is_empty() {
        return Err(VolError::invalid_input("price series cannot be empty"));
    }

    if let Some((index, price)) = prices
        .iter()
        .enumerate()
        .find(|(_, p)| !(p.is_finite() && **p > 0.0))
    {
        return Err(VolError::invalid_input(format!(
            "price at index {index} must be positive and finite, got {price}"
        )));
    }

    Ok(())
}

/// Fails with [`VolError::InsufficientData`] when fewer than two prices are given.
pub(crate) fn require_returns(prices: &[f64]) -> Result<(), VolError> {
    if prices.len() < 2 {
        return Err(VolError::InsufficientData {
            required: 2,
            actual: prices.len(),
        });
    }
    Ok(())
}

/// Natural-log returns `ln(p[i] / p[i-1])`.
///
/// The result always has exactly one element less than `prices`
/// (or none for fewer than two prices).
#[must_use]
pub fn log_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect()
}

/// Simple returns `(p[i] - p[i-1]) / p[i-1]`.
///
/// Pairs where either price is zero or not finite are skipped, so the
/// output may be shorter than `prices.len() - 1`.
#[must_use]
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .filter(|w| w[0].is_finite() && w[1].is_finite() && w[0] != 0.0 && w[1] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect()
}

/// Arithmetic mean. NaN for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance with Bessel's correction (`n - 1` denominator).
#[must_use]
pub fn sample_variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() as f64 - 1.0)
}

/// Annualizes a per-period variance and expresses it in percentage points.
#[inline]
pub(crate) fn annualized_percent(variance: f64, annualization_factor: u32) -> f64 {
    (variance * f64::from(annualization_factor)).sqrt() * 100.0
}
