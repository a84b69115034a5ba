//! Option contract and quote types.

use crate::error::VolError;
use serde::{Deserialize, Serialize};

/// Milliseconds in a 365 day year.
pub const MILLIS_PER_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0 * 1000.0;

/// Option type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Call option (right to buy the underlying at strike price).
    Call,
    /// Put option (right to sell the underlying at strike price).
    Put,
}

/// Market inputs of an option contract, without volatility.
///
/// Prices are in the option's currency units, time in years and the rate
/// as a decimal (0.05 for 5%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionParams {
    /// Underlying spot price.
    pub spot: f64,
    /// Strike price.
    pub strike: f64,
    /// Time to expiration in years.
    pub time_to_expiry: f64,
    /// Annualized risk-free rate; may be negative.
    pub risk_free_rate: f64,
    /// Call or put.
    pub option_type: OptionType,
}

impl OptionParams {
    /// Creates new option parameters.
    #[must_use]
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            option_type,
        }
    }

    /// Creates parameters for a call option.
    #[must_use]
    pub fn call(spot: f64, strike: f64, time_to_expiry: f64, risk_free_rate: f64) -> Self {
        Self::new(
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            OptionType::Call,
        )
    }

    /// Creates parameters for a put option.
    #[must_use]
    pub fn put(spot: f64, strike: f64, time_to_expiry: f64, risk_free_rate: f64) -> Self {
        Self::new(
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            OptionType::Put,
        )
    }

    /// Intrinsic value: `max(0, S - K)` for calls, `max(0, K - S)` for puts.
    #[must_use]
    pub fn intrinsic_value(&self) -> f64 {
        match self.option_type {
            OptionType::Call => (self.spot - self.strike).max(0.0),
            OptionType::Put => (self.strike - self.spot).max(0.0),
        }
    }

    /// Relative distance of the strike from spot, `|K - S| / S`.
    #[must_use]
    pub fn moneyness_distance(&self) -> f64 {
        (self.strike - self.spot).abs() / self.spot
    }

    /// Checks that spot, strike and expiry are positive and the rate finite.
    pub fn validate(&self) -> Result<(), VolError> {
        if !(self.spot.is_finite() && self.spot > 0.0) {
            return Err(VolError::invalid_input(format!(
                "spot price must be positive, got {}",
                self.spot
            )));
        }
        if !(self.strike.is_finite() && self.strike > 0.0) {
            return Err(VolError::invalid_input(format!(
                "strike price must be positive, got {}",
                self.strike
            )));
        }
        if !(self.time_to_expiry.is_finite() && self.time_to_expiry > 0.0) {
            return Err(VolError::invalid_input(format!(
                "time to expiry must be positive, got {}",
                self.time_to_expiry
            )));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(VolError::invalid_input(format!(
                "risk-free rate must be finite, got {}",
                self.risk_free_rate
            )));
        }
        Ok(())
    }
}

/// One option from a chain as quoted by a data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionQuote {
    /// Strike price.
    pub strike: f64,
    /// Expiration timestamp in milliseconds since the Unix epoch.
    pub expiration_ms: u64,
    /// Call or put.
    #[serde(rename = "type")]
    pub option_type: OptionType,
    /// Best bid.
    pub bid: f64,
    /// Best ask.
    pub ask: f64,
}

impl OptionQuote {
    /// Creates a new quote.
    #[must_use]
    pub fn new(strike: f64, expiration_ms: u64, option_type: OptionType, bid: f64, ask: f64) -> Self {
        Self {
            strike,
            expiration_ms,
            option_type,
            bid,
            ask,
        }
    }

    /// Mid price `(bid + ask) / 2`, the observed market price for inversion.
    #[must_use]
    pub fn mid_price(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }

    /// Time to expiry in years as of `now_ms`. Negative once expired.
    #[must_use]
    pub fn time_to_expiry_at(&self, now_ms: u64) -> f64 {
        (self.expiration_ms as f64 - now_ms as f64) / MILLIS_PER_YEAR
    }
}
