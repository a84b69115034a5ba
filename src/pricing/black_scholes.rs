//! Black-Scholes pricing and Greeks.
//!
//! European closed form with a cost-of-carry term so the American
//! approximation can reuse it for the put-call transformation.

use super::normal::{norm_cdf, norm_pdf};
use super::types::{OptionParams, OptionType};
use crate::error::VolError;
use serde::{Deserialize, Serialize};

/// Black-Scholes pricing model implementation.
pub struct BlackScholes;

/// First-order and second-order sensitivities of a European option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// ∂price/∂spot.
    pub delta: f64,
    /// ∂²price/∂spot².
    pub gamma: f64,
    /// Time decay per calendar day.
    pub theta: f64,
    /// ∂price/∂σ per unit of volatility (1.0 = 100 vol points).
    pub vega: f64,
    /// ∂price/∂r per unit of rate.
    pub rho: f64,
}

impl BlackScholes {
    /// d1 = [ln(S/K) + (b + σ²/2)T] / (σ√T)
    #[must_use]
    pub fn d1(spot: f64, strike: f64, carry: f64, time: f64, vol: f64) -> f64 {
        ((spot / strike).ln() + (carry + 0.5 * vol * vol) * time) / (vol * time.sqrt())
    }

    /// d2 = d1 - σ√T
    #[must_use]
    pub fn d2(d1: f64, vol: f64, time: f64) -> f64 {
        d1 - vol * time.sqrt()
    }

    /// Generalized Black-Scholes-Merton price with cost of carry `carry`.
    ///
    /// For calls: C = S·e^((b-r)T)·N(d1) - K·e^(-rT)·N(d2)
    /// For puts:  P = K·e^(-rT)·N(-d2) - S·e^((b-r)T)·N(-d1)
    ///
    /// Inputs are not validated; callers go through [`BlackScholes::price`]
    /// or the American pricer.
    #[must_use]
    pub fn price_with_carry(
        spot: f64,
        strike: f64,
        time: f64,
        rate: f64,
        carry: f64,
        vol: f64,
        option_type: OptionType,
    ) -> f64 {
        let d1 = Self::d1(spot, strike, carry, time, vol);
        let d2 = Self::d2(d1, vol, time);
        let carry_factor = ((carry - rate) * time).exp();
        let discount = (-rate * time).exp();

        match option_type {
            OptionType::Call => {
                spot * carry_factor * norm_cdf(d1) - strike * discount * norm_cdf(d2)
            }
            OptionType::Put => {
                strike * discount * norm_cdf(-d2) - spot * carry_factor * norm_cdf(-d1)
            }
        }
    }

    /// European option price on a non-dividend underlying.
    ///
    /// # Errors
    /// [`VolError::InvalidInput`] for non-positive spot, strike, expiry or volatility.
    pub fn price(params: &OptionParams, vol: f64) -> Result<f64, VolError> {
        params.validate()?;
        validate_vol(vol)?;
        Ok(Self::price_with_carry(
            params.spot,
            params.strike,
            params.time_to_expiry,
            params.risk_free_rate,
            params.risk_free_rate,
            vol,
            params.option_type,
        ))
    }

    /// European Greeks on a non-dividend underlying.
    ///
    /// # Errors
    /// [`VolError::InvalidInput`] for non-positive spot, strike, expiry or volatility.
    pub fn greeks(params: &OptionParams, vol: f64) -> Result<Greeks, VolError> {
        params.validate()?;
        validate_vol(vol)?;

        let OptionParams {
            spot,
            strike,
            time_to_expiry: time,
            risk_free_rate: rate,
            option_type,
        } = *params;
        let sqrt_time = time.sqrt();
        let d1 = Self::d1(spot, strike, rate, time, vol);
        let d2 = Self::d2(d1, vol, time);
        let discount = (-rate * time).exp();
        let density = norm_pdf(d1);

        let gamma = density / (spot * vol * sqrt_time);
        let vega = spot * density * sqrt_time;
        let decay = -spot * density * vol / (2.0 * sqrt_time);

        let (delta, theta_annual, rho) = match option_type {
            OptionType::Call => (
                norm_cdf(d1),
                decay - rate * strike * discount * norm_cdf(d2),
                strike * time * discount * norm_cdf(d2),
            ),
            OptionType::Put => (
                norm_cdf(d1) - 1.0,
                decay + rate * strike * discount * norm_cdf(-d2),
                -strike * time * discount * norm_cdf(-d2),
            ),
        };

        Ok(Greeks {
            delta,
            gamma,
            theta: theta_annual / 365.0,
            vega,
            rho,
        })
    }
}

pub(crate) fn validate_vol(vol: f64) -> Result<(), VolError> {
    if !(vol.is_finite() && vol > 0.0) {
        return Err(VolError::invalid_input(format!(
            "volatility must be positive, got {vol}"
        )));
    }
    Ok(())
}
