//! Exponentially weighted moving average (RiskMetrics style) volatility.

use super::returns::{annualized_percent, log_returns, require_returns, validate_prices};
use crate::error::VolError;
use tracing::trace;

fn validate_lambda(lambda: f64) -> Result<(), VolError> {
    if !(lambda > 0.0 && lambda < 1.0) {
        return Err(VolError::invalid_input(format!(
            "lambda must be strictly between 0 and 1, got {lambda}"
        )));
    }
    Ok(())
}

/// Variance path `v[0] = r[0]^2`, `v[i] = lambda * v[i-1] + (1 - lambda) * r[i]^2`.
fn variance_path(returns: &[f64], lambda: f64) -> Vec<f64> {
    let mut variances = Vec::with_capacity(returns.len());
    let mut variance = returns[0] * returns[0];
    variances.push(variance);
    for r in &returns[1..] {
        variance = lambda * variance + (1.0 - lambda) * r * r;
        variances.push(variance);
    }
    variances
}

/// Current EWMA volatility in annualized percentage points.
///
/// Only the most recent state of the recursion is reported.
///
/// # Errors
/// - [`VolError::InvalidInput`] for an empty series, non-positive prices or
///   `lambda` outside `(0, 1)`.
/// - [`VolError::InsufficientData`] for a single price.
pub fn ewma_volatility(
    prices: &[f64],
    lambda: f64,
    annualization_factor: u32,
) -> Result<f64, VolError> {
    validate_prices(prices)?;
    validate_lambda(lambda)?;
    require_returns(prices)?;

    let returns = log_returns(prices);
    let variance = variance_path(&returns, lambda)
        .last()
        .copied()
        .unwrap_or_default();
    let vol = annualized_percent(variance, annualization_factor);
    trace!("ewma lambda {}: variance {:.8}, vol {:.4}", lambda, variance, vol);
    Ok(vol)
}

/// EWMA volatility at every price index, aligned with `prices`.
///
/// Index 0 has no return of its own and repeats the value of index 1.
///
/// # Errors
/// Same as [`ewma_volatility`].
pub fn ewma_volatility_series(
    prices: &[f64],
    lambda: f64,
    annualization_factor: u32,
) -> Result<Vec<f64>, VolError> {
    validate_prices(prices)?;
    validate_lambda(lambda)?;
    require_returns(prices)?;

    let returns = log_returns(prices);
    let vols: Vec<f64> = variance_path(&returns, lambda)
        .into_iter()
        .map(|v| annualized_percent(v, annualization_factor))
        .collect();

    let mut series = Vec::with_capacity(prices.len());
    series.push(vols[0]);
    series.extend(vols);
    Ok(series)
}
