//! Bjerksund-Stensland (2002) American option approximation.
//!
//! Calls on a non-dividend underlying are never exercised early when
//! `r >= 0`, so they fall back to Black-Scholes. Puts go through the
//! put-call transformation `P(S, K, T, r, b, σ) = C(K, S, T, r - b, -b, σ)`
//! and the two-boundary call formula, never priced below the European put
//! or exercise value.
//!
//! Power terms such as `S^β` are evaluated in log space together with
//! their normal probabilities, since `β` grows without bound as `σ → 0`.

use super::black_scholes::{BlackScholes, validate_vol};
use super::normal::{bivariate_norm_cdf, norm_cdf};
use super::types::{OptionParams, OptionType};
use crate::error::VolError;
use tracing::trace;

/// Bjerksund-Stensland American option pricer.
pub struct BjerksundStensland;

impl BjerksundStensland {
    /// American option price for volatility `vol` (decimal fraction).
    ///
    /// # Errors
    /// [`VolError::InvalidInput`] for non-positive spot, strike, expiry or volatility.
    pub fn price(params: &OptionParams, vol: f64) -> Result<f64, VolError> {
        params.validate()?;
        validate_vol(vol)?;

        let OptionParams {
            spot,
            strike,
            time_to_expiry: time,
            risk_free_rate: rate,
            option_type,
        } = *params;

        let value = match option_type {
            OptionType::Call => american_call(spot, strike, time, rate, rate, vol),
            OptionType::Put => {
                let european =
                    BlackScholes::price_with_carry(spot, strike, time, rate, rate, vol, option_type);
                american_call(strike, spot, time, 0.0, -rate, vol)
                    .max(european)
                    .max(params.intrinsic_value())
            }
        };
        Ok(value)
    }
}

/// Convenience wrapper over [`BjerksundStensland::price`] taking scalars.
///
/// # Errors
/// Same as [`BjerksundStensland::price`].
pub fn american_price(
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    vol: f64,
    option_type: OptionType,
) -> Result<f64, VolError> {
    BjerksundStensland::price(
        &OptionParams::new(spot, strike, time_to_expiry, risk_free_rate, option_type),
        vol,
    )
}

/// `exp(log_factor) * probability`, zero when the probability vanishes.
fn weighted(log_factor: f64, probability: f64) -> f64 {
    if probability <= 0.0 {
        0.0
    } else {
        (log_factor + probability.ln()).exp()
    }
}

/// Two-boundary American call with cost of carry `carry`.
fn american_call(spot: f64, strike: f64, time: f64, rate: f64, carry: f64, vol: f64) -> f64 {
    if carry >= rate {
        return BlackScholes::price_with_carry(
            spot,
            strike,
            time,
            rate,
            carry,
            vol,
            OptionType::Call,
        );
    }

    // Drift swamps diffusion: the boundary never rises above its floor and
    // early exercise has no value beyond immediate exercise.
    if carry * time + 2.0 * vol * time.sqrt() <= 0.0 {
        let european =
            BlackScholes::price_with_carry(spot, strike, time, rate, carry, vol, OptionType::Call);
        return european.max(spot - strike);
    }

    let var = vol * vol;
    let t1 = 0.5 * (5.0_f64.sqrt() - 1.0) * time;
    let beta = (0.5 - carry / var) + ((carry / var - 0.5).powi(2) + 2.0 * rate / var).sqrt();
    let b_infinity = beta / (beta - 1.0) * strike;
    let b_zero = strike.max(rate / (rate - carry) * strike);

    let boundary = |t: f64| {
        let h = -(carry * t + 2.0 * vol * t.sqrt()) * strike * strike
            / ((b_infinity - b_zero) * b_zero);
        b_zero + (b_infinity - b_zero) * (1.0 - h.exp())
    };
    let i1 = boundary(t1);
    let i2 = boundary(time);

    trace!(spot, strike, beta, i1, i2, "exercise boundaries");

    if spot >= i2 {
        return spot - strike;
    }

    let m = Model {
        rate,
        carry,
        vol,
        spot,
    };
    let log_i1 = i1.ln();
    let log_i2 = i2.ln();

    (i2 - strike) * (beta * (spot / i2).ln()).exp()
        - (i2 - strike) * m.phi(t1, beta, i2, i2, -beta * log_i2)
        + m.phi(t1, 1.0, i2, i2, 0.0)
        - m.phi(t1, 1.0, i1, i2, 0.0)
        - strike * m.phi(t1, 0.0, i2, i2, 0.0)
        + strike * m.phi(t1, 0.0, i1, i2, 0.0)
        + (i1 - strike) * m.phi(t1, beta, i1, i2, -beta * log_i1)
        - (i1 - strike) * m.psi(time, beta, i1, i2, i1, t1, -beta * log_i1)
        + m.psi(time, 1.0, i1, i2, i1, t1, 0.0)
        - m.psi(time, 1.0, strike, i2, i1, t1, 0.0)
        - strike * m.psi(time, 0.0, i1, i2, i1, t1, 0.0)
        + strike * m.psi(time, 0.0, strike, i2, i1, t1, 0.0)
}

/// Market state shared by the φ and ψ terms.
struct Model {
    rate: f64,
    carry: f64,
    vol: f64,
    spot: f64,
}

impl Model {
    fn lambda(&self, gamma: f64) -> f64 {
        -self.rate + gamma * self.carry + 0.5 * gamma * (gamma - 1.0) * self.vol * self.vol
    }

    fn kappa(&self, gamma: f64) -> f64 {
        2.0 * self.carry / (self.vol * self.vol) + 2.0 * gamma - 1.0
    }

    /// φ(S, t, γ, H, I) scaled by `exp(log_scale)`.
    fn phi(&self, t: f64, gamma: f64, h: f64, i: f64, log_scale: f64) -> f64 {
        let s = self.spot;
        let vol_t = self.vol * t.sqrt();
        let drift = (self.carry + (gamma - 0.5) * self.vol * self.vol) * t;
        let d = -((s / h).ln() + drift) / vol_t;
        let log_base = self.lambda(gamma) * t + gamma * s.ln() + log_scale;
        let log_ratio = (i / s).ln();

        weighted(log_base, norm_cdf(d))
            - weighted(
                log_base + self.kappa(gamma) * log_ratio,
                norm_cdf(d - 2.0 * log_ratio / vol_t),
            )
    }

    /// ψ(S, T, γ, H, I2, I1, t1) scaled by `exp(log_scale)`.
    #[allow(clippy::too_many_arguments)]
    fn psi(&self, t: f64, gamma: f64, h: f64, i2: f64, i1: f64, t1: f64, log_scale: f64) -> f64 {
        let s = self.spot;
        let drift = self.carry + (gamma - 0.5) * self.vol * self.vol;
        let vol_t1 = self.vol * t1.sqrt();
        let vol_t = self.vol * t.sqrt();

        let e1 = ((s / i1).ln() + drift * t1) / vol_t1;
        let e2 = ((i2 * i2 / (s * i1)).ln() + drift * t1) / vol_t1;
        let e3 = ((s / i1).ln() - drift * t1) / vol_t1;
        let e4 = ((i2 * i2 / (s * i1)).ln() - drift * t1) / vol_t1;

        let f1 = ((s / h).ln() + drift * t) / vol_t;
        let f2 = ((i2 * i2 / (s * h)).ln() + drift * t) / vol_t;
        let f3 = ((i1 * i1 / (s * h)).ln() + drift * t) / vol_t;
        let f4 = ((s * i1 * i1 / (h * i2 * i2)).ln() + drift * t) / vol_t;

        let rho = (t1 / t).sqrt();
        let kappa = self.kappa(gamma);
        let log_base = self.lambda(gamma) * t + gamma * s.ln() + log_scale;

        weighted(log_base, bivariate_norm_cdf(-e1, -f1, rho))
            - weighted(
                log_base + kappa * (i2 / s).ln(),
                bivariate_norm_cdf(-e2, -f2, rho),
            )
            - weighted(
                log_base + kappa * (i1 / s).ln(),
                bivariate_norm_cdf(-e3, -f3, -rho),
            )
            + weighted(
                log_base + kappa * (i1 / i2).ln(),
                bivariate_norm_cdf(-e4, -f4, -rho),
            )
    }
}
