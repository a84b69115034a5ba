//! # volforecast
//!
//! Volatility estimation and implied volatility for trading tools.
//!
//! The crate has two independent numeric cores plus a couple of helpers
//! built on them:
//!
//! - [`estimator`]: rolling historical, EWMA, ensemble, Parkinson and
//!   GARCH(1,1) volatility from price series, in annualized **percentage points**.
//! - [`pricing`]: Bjerksund-Stensland (2002) American option pricing, a
//!   Newton-Raphson implied volatility solver and at-the-money aggregation
//!   over an option chain, with volatility as a **decimal fraction**.
//! - [`index`]: implied volatility proxies from CBOE volatility indices,
//!   with a TTL cache around the quote provider.
//! - [`report`]: chart-ready series for a dated price history.
//! - [`strategy`]: option strategy suggestions from the spread between
//!   forecast and implied volatility.
//!
//! All computations are pure and synchronous; they can be called from many
//! threads at once.
//!
//! ## Units
//!
//! The two cores use different volatility units. Convert explicitly at the
//! boundary with [`percent_to_decimal`] and [`decimal_to_percent`]:
//!
//! ```
//! use volforecast::prelude::*;
//!
//! let prices = [100.0, 102.0, 99.0, 101.0, 103.0, 98.0, 100.0, 102.0, 101.0, 99.0];
//! let ewma = ewma_volatility(&prices, FAST_LAMBDA, DEFAULT_ANNUALIZATION_FACTOR).unwrap();
//!
//! let params = OptionParams::put(100.0, 100.0, 0.25, 0.05);
//! let price = BjerksundStensland::price(&params, percent_to_decimal(ewma)).unwrap();
//! assert!(price > params.intrinsic_value());
//! ```
//!
//! ## Logging
//!
//! Library code logs through `tracing`. Binaries can install a subscriber
//! with [`utils::setup_logger`], controlled by the `LOGLEVEL` environment
//! variable.

pub mod error;
pub mod estimator;
pub mod index;
pub mod prelude;
pub mod pricing;
pub mod report;
pub mod strategy;
pub mod utils;

pub use error::VolError;
pub use report::{ModelPredictions, VolatilityReport};

/// Converts percentage points (`20.0`) to a decimal fraction (`0.2`).
#[must_use]
#[inline]
pub fn percent_to_decimal(percent: f64) -> f64 {
    percent / 100.0
}

/// Converts a decimal fraction (`0.2`) to percentage points (`20.0`).
#[must_use]
#[inline]
pub fn decimal_to_percent(decimal: f64) -> f64 {
    decimal * 100.0
}
