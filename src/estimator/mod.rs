//! Volatility estimation from price series.
//!
//! All estimators return annualized volatility in percentage points
//! (`23.4` means 23.4% per year). Returns are natural-log close-to-close
//! returns and variances use the `n - 1` denominator.
//!
//! # Estimators
//!
//! - Rolling historical volatility: a series aligned with the input prices,
//!   NaN until a full trailing window of returns is available.
//! - EWMA volatility: the latest state of the RiskMetrics recursion
//!   `v[i] = lambda * v[i-1] + (1 - lambda) * r[i]^2`.
//! - Ensemble volatility: the unweighted mean of the latest historical value
//!   and two EWMA estimates with different decays.
//! - Parkinson volatility from daily high/low ranges.
//! - GARCH(1,1) forecasts fitted by quasi maximum likelihood.
//!
//! # Short input
//!
//! An empty series is always [`VolError::InvalidInput`](crate::VolError::InvalidInput).
//! A single price is [`VolError::InsufficientData`](crate::VolError::InsufficientData)
//! for every estimator.
//!
//! # Example
//!
//! ```
//! use volforecast::estimator::{ewma_volatility, historical_volatility};
//!
//! let prices = [100.0, 102.0, 99.0, 101.0, 103.0, 98.0, 100.0, 102.0, 101.0, 99.0];
//! let rolling = historical_volatility(&prices, 5, 252).unwrap();
//! assert_eq!(rolling.len(), prices.len());
//!
//! let current = ewma_volatility(&prices, 0.94, 252).unwrap();
//! assert!(current > 0.0);
//! ```

mod config;
mod ensemble;
mod ewma;
mod forecast;
mod garch;
mod historical;
mod range;
mod returns;

pub use config::EstimatorConfig;
pub use ensemble::{ensemble_volatility, ensemble_volatility_series, ensemble_volatility_with};
pub use ewma::{ewma_volatility, ewma_volatility_series};
pub use forecast::{
    ForecastBands, confidence_intervals, decay_forecast, decay_forecast_bands, ewma_forecast,
};
pub use garch::{GarchModel, GarchParams, MIN_GARCH_RETURNS, garch_forecast};
pub use historical::{historical_volatility, last_valid};
pub use range::{PriceBar, parkinson_volatility};
pub use returns::{log_returns, mean, sample_variance, simple_returns};

/// Default rolling window in returns.
pub const DEFAULT_WINDOW: usize = 30;

/// Trading days per year.
pub const DEFAULT_ANNUALIZATION_FACTOR: u32 = 252;

/// Fast EWMA decay (RiskMetrics daily).
pub const FAST_LAMBDA: f64 = 0.94;

/// Slow EWMA decay.
pub const SLOW_LAMBDA: f64 = 0.97;
