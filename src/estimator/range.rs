//! Parkinson high/low range volatility.

use crate::error::VolError;
use serde::{Deserialize, Serialize};
use std::f64::consts::LN_2;
use tracing::trace;

/// One daily OHLC bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Opening price.
    pub open: f64,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Closing price.
    pub close: f64,
}

impl PriceBar {
    /// Creates a new bar.
    #[must_use]
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }

    /// Parkinson per-bar variance estimator `ln(H/L)^2 / (4 ln 2)`.
    #[must_use]
    pub fn parkinson_variance(&self) -> f64 {
        (self.high / self.low).ln().powi(2) / (4.0 * LN_2)
    }

    fn is_valid(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && self.low > 0.0 && self.high >= self.low
    }
}

/// Rolling Parkinson volatility in annualized percentage points.
///
/// The output is aligned with `bars`; the first `window - 1` entries are NaN.
///
/// # Errors
/// [`VolError::InvalidInput`] for no bars, `window == 0`, or a bar whose
/// low is not positive or exceeds its high.
pub fn parkinson_volatility(
    bars: &[PriceBar],
    window: usize,
    annualization_factor: u32,
) -> Result<Vec<f64>, VolError> {
    if bars.is_empty() {
        return Err(VolError::invalid_input("bar series cannot be empty"));
    }
    if window == 0 {
        return Err(VolError::invalid_input("window must be at least 1"));
    }
    if let Some(index) = bars.iter().position(|bar| !bar.is_valid()) {
        return Err(VolError::invalid_input(format!(
            "bar at index {index} must have 0 < low <= high"
        )));
    }

    let estimators: Vec<f64> = bars.iter().map(PriceBar::parkinson_variance).collect();
    let mut volatilities = vec![f64::NAN; (window - 1).min(bars.len())];
    for end in (window - 1)..bars.len() {
        let slice = &estimators[end + 1 - window..=end];
        let variance = slice.iter().sum::<f64>() / window as f64;
        volatilities.push((variance * f64::from(annualization_factor)).sqrt() * 100.0);
    }

    trace!(
        "parkinson volatility over {} bars, window {}",
        bars.len(),
        window
    );
    Ok(volatilities)
}
