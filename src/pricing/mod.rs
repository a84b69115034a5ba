//! American option pricing and implied volatility.
//!
//! Implied volatility is the option's price translated into different
//! units. This module prices vanilla American options with the
//! Bjerksund-Stensland (2002) approximation and inverts observed prices
//! back into volatility with Newton-Raphson.
//!
//! # Units
//!
//! Volatility here is a decimal fraction (`0.2` = 20%), unlike the
//! percentage points returned by [`crate::estimator`]. Convert at the
//! boundary with [`crate::percent_to_decimal`] / [`crate::decimal_to_percent`].
//!
//! # Price Extraction
//!
//! For a quoted option the market price is the mid: `(bid + ask) / 2`.
//! [`atm_implied_vol_at`] inverts the strikes closest to spot and averages
//! them into a single at-the-money figure.
//!
//! # Example
//!
//! ```
//! use volforecast::pricing::{OptionParams, american_price, implied_volatility, OptionType};
//!
//! let price = american_price(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Put).unwrap();
//! let iv = implied_volatility(100.0, 1.0, 100.0, 0.05, price, OptionType::Put).unwrap();
//! assert!((iv - 0.2).abs() < 1e-3);
//! ```

mod bjerksund;
mod black_scholes;
mod chain;
mod normal;
mod solver;
mod types;

pub use bjerksund::{BjerksundStensland, american_price};
pub use black_scholes::{BlackScholes, Greeks};
pub use chain::{AtmConfig, atm_implied_vol_at, calculate_atm_implied_vol};
pub use normal::{bivariate_norm_cdf, norm_cdf, norm_inv, norm_pdf};
pub use solver::{SolverConfig, implied_volatility, solve_iv};
pub use types::{MILLIS_PER_YEAR, OptionParams, OptionQuote, OptionType};
