//! At-the-money implied volatility from an option chain.

use super::solver::{SolverConfig, solve_iv};
use super::types::{OptionParams, OptionQuote};
use crate::error::VolError;
use crate::utils::current_time_millis;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// Selection and solver settings for the at-the-money aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmConfig {
    /// Maximum relative strike distance `|K - S| / S` (exclusive).
    pub moneyness_band: f64,
    /// Number of closest strikes to invert.
    pub max_candidates: usize,
    /// Annualized risk-free rate as a decimal.
    pub risk_free_rate: f64,
    /// Solver settings applied to each candidate.
    pub solver: SolverConfig,
}

impl Default for AtmConfig {
    fn default() -> Self {
        Self {
            moneyness_band: 0.05,
            max_candidates: 2,
            risk_free_rate: 0.05,
            solver: SolverConfig::default(),
        }
    }
}

impl AtmConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the moneyness band.
    #[must_use]
    pub fn with_moneyness_band(mut self, moneyness_band: f64) -> Self {
        self.moneyness_band = moneyness_band;
        self
    }

    /// Sets how many of the closest strikes are inverted.
    #[must_use]
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Sets the risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    /// Sets the solver configuration.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}

/// Mean implied volatility of the strikes closest to spot, as of now.
///
/// Uses the default band (5%) and the two closest strikes.
///
/// # Errors
/// See [`atm_implied_vol_at`].
pub fn calculate_atm_implied_vol(
    options: &[OptionQuote],
    spot: f64,
    risk_free_rate: f64,
) -> Result<f64, VolError> {
    let config = AtmConfig::default().with_risk_free_rate(risk_free_rate);
    atm_implied_vol_at(options, spot, &config, current_time_millis())
}

/// Mean implied volatility of the strikes closest to spot as of `now_ms`.
///
/// Options whose strike lies strictly inside `config.moneyness_band` of
/// `spot` are sorted by distance and the closest `config.max_candidates`
/// are inverted from their mid price. A candidate that fails inversion is
/// logged and skipped.
///
/// # Errors
/// - [`VolError::InvalidInput`] if `spot` is not positive.
/// - [`VolError::NoAtmOptions`] if no strike is inside the band.
/// - [`VolError::AllImpliedVolFailed`] if every candidate failed.
pub fn atm_implied_vol_at(
    options: &[OptionQuote],
    spot: f64,
    config: &AtmConfig,
    now_ms: u64,
) -> Result<f64, VolError> {
    if !(spot.is_finite() && spot > 0.0) {
        return Err(VolError::invalid_input(format!(
            "spot price must be positive, got {spot}"
        )));
    }

    let distance = |quote: &OptionQuote| (quote.strike - spot).abs() / spot;

    let mut candidates: Vec<&OptionQuote> = options
        .iter()
        .filter(|quote| distance(*quote) < config.moneyness_band)
        .collect();

    if candidates.is_empty() {
        return Err(VolError::NoAtmOptions {
            spot,
            band: config.moneyness_band,
        });
    }

    candidates.sort_by(|a, b| distance(*a).total_cmp(&distance(*b)));
    candidates.truncate(config.max_candidates);

    let attempted = candidates.len();
    let vols: Vec<f64> = candidates
        .into_iter()
        .filter_map(|quote| {
            let params = OptionParams::new(
                spot,
                quote.strike,
                quote.time_to_expiry_at(now_ms),
                config.risk_free_rate,
                quote.option_type,
            );
            let market_price = quote.mid_price();
            trace!(strike = quote.strike, market_price, "inverting candidate");

            match solve_iv(&params, market_price, &config.solver) {
                Ok((iv, _)) => Some(iv),
                Err(e) => {
                    warn!(strike = quote.strike, error = %e, "skipping option");
                    None
                }
            }
        })
        .collect();

    if vols.is_empty() {
        return Err(VolError::AllImpliedVolFailed { attempted });
    }

    Ok(vols.iter().sum::<f64>() / vols.len() as f64)
}
