//! Rolling close-to-close historical volatility.

use super::returns::{
    annualized_percent, log_returns, mean, require_returns, sample_variance, validate_prices,
};
use crate::error::VolError;
use tracing::trace;

/// Rolling historical volatility of log returns, in annualized percentage points.
///
/// The window is trailing: the value at price index `i` uses the `window`
/// returns ending at `i`. Entries without a full window are NaN. The output
/// always has the same length as `prices`.
///
/// # Errors
/// - [`VolError::InvalidInput`] for an empty series, non-positive prices or
///   `window < 2`.
/// - [`VolError::InsufficientData`] for a single price.
pub fn historical_volatility(
    prices: &[f64],
    window: usize,
    annualization_factor: u32,
) -> Result<Vec<f64>, VolError> {
    validate_prices(prices)?;
    if window < 2 {
        return Err(VolError::invalid_input(format!(
            "window must be at least 2, got {window}"
        )));
    }
    require_returns(prices)?;

    let returns = log_returns(prices);
    let warm_up = (window - 1).min(returns.len());

    let mut volatilities = Vec::with_capacity(prices.len());
    // Aligns the output with prices: returns start at price index 1.
    volatilities.push(f64::NAN);
    volatilities.extend(std::iter::repeat_n(f64::NAN, warm_up));

    for end in (window - 1)..returns.len() {
        let slice = &returns[end + 1 - window..=end];
        let variance = sample_variance(slice);
        trace!(
            "historical window ending at {}: mean {:.6}, variance {:.8}",
            end,
            mean(slice),
            variance
        );
        volatilities.push(annualized_percent(variance, annualization_factor));
    }

    Ok(volatilities)
}

/// Last non-NaN entry of a volatility series, if any.
#[must_use]
pub fn last_valid(series: &[f64]) -> Option<f64> {
    series.iter().rev().copied().find(|v| !v.is_nan())
}
