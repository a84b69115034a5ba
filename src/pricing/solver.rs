//! Newton-Raphson solver for implied volatility.
//!
//! Inverts the American pricer: finds the volatility at which
//! [`BjerksundStensland::price`] equals an observed market price. Vega is
//! taken numerically with a one-sided finite difference since the American
//! price has no closed-form derivative.

use super::bjerksund::BjerksundStensland;
use super::types::{OptionParams, OptionType};
use crate::error::VolError;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Configuration for the Newton-Raphson solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Convergence tolerance on the absolute price difference.
    pub tolerance: f64,
    /// Maximum iterations before giving up.
    pub max_iterations: u32,
    /// Fixed starting volatility (default: 0.5 = 50%).
    pub initial_guess: f64,
    /// Lower clamp applied after each step (default: 0.01 = 1%).
    pub min_volatility: f64,
    /// Upper clamp applied after each step (default: 5.0 = 500%).
    pub max_volatility: f64,
    /// Finite difference step for vega.
    pub bump: f64,
    /// Vega below this aborts the iteration.
    pub min_vega: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            max_iterations: 100,
            initial_guess: 0.5,
            min_volatility: 0.01,
            max_volatility: 5.0,
            bump: 1e-4,
            min_vega: 1e-10,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the starting volatility.
    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// Sets the volatility bounds.
    #[must_use]
    pub fn with_bounds(mut self, min_volatility: f64, max_volatility: f64) -> Self {
        self.min_volatility = min_volatility;
        self.max_volatility = max_volatility;
        self
    }

    /// Sets the finite difference step used for vega.
    #[must_use]
    pub fn with_bump(mut self, bump: f64) -> Self {
        self.bump = bump;
        self
    }

    /// Checks bounds, tolerance and step for consistency.
    pub fn validate(&self) -> Result<(), VolError> {
        if !(self.min_volatility > 0.0 && self.min_volatility < self.max_volatility) {
            return Err(VolError::invalid_input(format!(
                "volatility bounds must satisfy 0 < min < max, got [{}, {}]",
                self.min_volatility, self.max_volatility
            )));
        }
        if !(self.tolerance > 0.0 && self.bump > 0.0) {
            return Err(VolError::invalid_input(
                "tolerance and bump must be positive",
            ));
        }
        Ok(())
    }

    /// Serializes the configuration to JSON.
    pub fn to_json(&self) -> Result<String, VolError> {
        serde_json::to_string(self).map_err(|e| VolError::Serialization {
            message: e.to_string(),
        })
    }

    /// Parses a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, VolError> {
        serde_json::from_str(json).map_err(|e| VolError::Serialization {
            message: e.to_string(),
        })
    }
}

/// Solves for implied volatility using Newton-Raphson.
///
/// Starting from `config.initial_guess`, each step is
/// σ_{n+1} = clamp(σ_n - (price(σ_n) - market_price) / vega(σ_n)),
/// with vega = (price(σ_n + h) - price(σ_n)) / h.
///
/// # Returns
/// - `Ok((iv, iterations))`: volatility as a decimal fraction and the
///   number of iterations used
/// - `Err(VolError::InvalidInput)`: invalid contract, market price or config
/// - `Err(VolError::DidNotConverge)`: the iteration budget ran out or vega
///   became too flat to continue
///
/// # Example
/// ```
/// use volforecast::pricing::{BjerksundStensland, OptionParams, SolverConfig, solve_iv};
///
/// let params = OptionParams::put(100.0, 100.0, 0.5, 0.05);
/// let market_price = BjerksundStensland::price(&params, 0.3).unwrap();
///
/// let (iv, iterations) = solve_iv(&params, market_price, &SolverConfig::default()).unwrap();
/// assert!((iv - 0.3).abs() < 1e-3);
/// assert!(iterations < 20);
/// ```
pub fn solve_iv(
    params: &OptionParams,
    market_price: f64,
    config: &SolverConfig,
) -> Result<(f64, u32), VolError> {
    params.validate()?;
    config.validate()?;

    if !(market_price.is_finite() && market_price > 0.0) {
        return Err(VolError::invalid_input(format!(
            "market price must be positive, got {market_price}"
        )));
    }

    let mut iv = config
        .initial_guess
        .clamp(config.min_volatility, config.max_volatility);

    for iteration in 0..config.max_iterations {
        let price = BjerksundStensland::price(params, iv)?;
        let diff = price - market_price;

        trace!(iteration, iv, price, diff, "newton step");

        if diff.abs() < config.tolerance {
            debug!(
                strike = params.strike,
                iv,
                iterations = iteration + 1,
                "implied volatility converged"
            );
            return Ok((iv, iteration + 1));
        }

        let bumped = BjerksundStensland::price(params, iv + config.bump)?;
        let vega = (bumped - price) / config.bump;

        if !vega.is_finite() || vega.abs() < config.min_vega {
            debug!(strike = params.strike, iv, vega, "vega too flat, aborting");
            return Err(VolError::DidNotConverge {
                iterations: iteration + 1,
                last_volatility: iv,
            });
        }

        iv = (iv - diff / vega).clamp(config.min_volatility, config.max_volatility);
    }

    Err(VolError::DidNotConverge {
        iterations: config.max_iterations,
        last_volatility: iv,
    })
}

/// Implied volatility with the default solver configuration.
///
/// # Errors
/// Same as [`solve_iv`].
pub fn implied_volatility(
    strike: f64,
    time_to_expiry: f64,
    spot: f64,
    risk_free_rate: f64,
    market_price: f64,
    option_type: OptionType,
) -> Result<f64, VolError> {
    let params = OptionParams::new(spot, strike, time_to_expiry, risk_free_rate, option_type);
    solve_iv(&params, market_price, &SolverConfig::default()).map(|(iv, _)| iv)
}
