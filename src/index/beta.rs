//! Beta estimation and index-based implied volatility for single stocks.

use crate::error::VolError;
use crate::estimator::{mean, sample_variance, simple_returns};
use serde::{Deserialize, Serialize};

/// Premium applied to the index level for single-stock risk.
pub const SINGLE_STOCK_PREMIUM: f64 = 1.1;

/// Lower bound of a proxy implied volatility, percentage points.
pub const MIN_PROXY_VOL: f64 = 5.0;

/// Upper bound of a proxy implied volatility, percentage points.
pub const MAX_PROXY_VOL: f64 = 100.0;

const MIN_BETA: f64 = 0.1;
const MAX_BETA: f64 = 3.0;
const MIN_CORRELATION: f64 = 0.1;

/// Sensitivity of a stock to its benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaEstimate {
    /// Regression beta, clamped to `[0.1, 3.0]`.
    pub beta: f64,
    /// Absolute return correlation, floored at 0.1.
    pub correlation: f64,
}

impl Default for BetaEstimate {
    /// Market-like fallback used when no history is available.
    fn default() -> Self {
        Self {
            beta: 1.0,
            correlation: 0.7,
        }
    }
}

/// Estimates beta and correlation of `stock` against `benchmark` closes.
///
/// Both series are turned into simple daily returns and compared over
/// their common prefix.
///
/// # Errors
/// - [`VolError::InsufficientData`] if fewer than two common returns exist.
/// - [`VolError::InvalidInput`] if the benchmark returns have zero variance.
pub fn estimate_beta(stock: &[f64], benchmark: &[f64]) -> Result<BetaEstimate, VolError> {
    let stock_returns = simple_returns(stock);
    let benchmark_returns = simple_returns(benchmark);
    let n = stock_returns.len().min(benchmark_returns.len());

    if n < 2 {
        return Err(VolError::InsufficientData {
            required: 2,
            actual: n,
        });
    }

    let x = &stock_returns[..n];
    let y = &benchmark_returns[..n];
    let (x_mean, y_mean) = (mean(x), mean(y));
    let covariance = x
        .iter()
        .zip(y)
        .map(|(a, b)| (a - x_mean) * (b - y_mean))
        .sum::<f64>()
        / (n as f64 - 1.0);

    let benchmark_variance = sample_variance(y);
    if benchmark_variance <= 0.0 {
        return Err(VolError::invalid_input(
            "benchmark returns have zero variance",
        ));
    }

    let beta = covariance / benchmark_variance;
    let correlation = covariance / (sample_variance(x).sqrt() * benchmark_variance.sqrt());
    let correlation = if correlation.is_finite() {
        correlation.abs().max(MIN_CORRELATION)
    } else {
        MIN_CORRELATION
    };

    Ok(BetaEstimate {
        beta: beta.clamp(MIN_BETA, MAX_BETA),
        correlation,
    })
}

/// Scales an index level (percentage points) to a single stock.
///
/// `level * beta * correlation * 1.1`, clamped to `[5, 100]`.
#[must_use]
pub fn index_implied_vol(level: f64, estimate: &BetaEstimate) -> f64 {
    (level * estimate.beta * estimate.correlation * SINGLE_STOCK_PREMIUM)
        .clamp(MIN_PROXY_VOL, MAX_PROXY_VOL)
}
