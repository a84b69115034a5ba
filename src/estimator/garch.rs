//! GARCH(1,1) conditional volatility forecast.
//!
//! Parameters are fitted by Gaussian quasi maximum likelihood with variance
//! targeting: `omega = s² (1 - alpha - beta)` where `s²` is the sample
//! variance of the demeaned log returns. The likelihood is maximized over a
//! coarse grid of `(alpha, beta)` followed by a finer grid around the best
//! point, which keeps the fit deterministic.

use super::returns::{annualized_percent, log_returns, mean, sample_variance, validate_prices};
use crate::error::VolError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum number of returns needed for a fit.
pub const MIN_GARCH_RETURNS: usize = 20;

const MAX_PERSISTENCE: f64 = 0.999;

/// GARCH(1,1) parameters for `σ²[t] = omega + alpha * e²[t-1] + beta * σ²[t-1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GarchParams {
    pub omega: f64,
    pub alpha: f64,
    pub beta: f64,
}

impl GarchParams {
    /// Parameters whose long-run variance equals `target_variance`.
    #[must_use]
    pub fn with_variance_target(alpha: f64, beta: f64, target_variance: f64) -> Self {
        Self {
            omega: target_variance * (1.0 - alpha - beta),
            alpha,
            beta,
        }
    }

    /// `alpha + beta`; shocks decay by this factor per day.
    #[must_use]
    pub fn persistence(&self) -> f64 {
        self.alpha + self.beta
    }

    /// Unconditional daily variance, `None` for a non-stationary model.
    #[must_use]
    pub fn long_run_variance(&self) -> Option<f64> {
        let persistence = self.persistence();
        (persistence < 1.0).then(|| self.omega / (1.0 - persistence))
    }

    fn is_valid(&self) -> bool {
        self.omega > 0.0
            && self.alpha >= 0.0
            && self.beta >= 0.0
            && self.persistence() < 1.0
    }
}

/// Fitted GARCH(1,1) model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarchModel {
    pub params: GarchParams,
    /// Variance forecast for the day after the last return.
    pub next_variance: f64,
    /// Gaussian log-likelihood of the fit, up to a constant.
    pub log_likelihood: f64,
}

impl GarchModel {
    /// Fits a model to daily log returns.
    ///
    /// # Errors
    /// - [`VolError::InsufficientData`] for fewer than [`MIN_GARCH_RETURNS`] returns.
    /// - [`VolError::InvalidInput`] for non-finite returns or zero variance.
    pub fn fit(returns: &[f64]) -> Result<Self, VolError> {
        if returns.len() < MIN_GARCH_RETURNS {
            return Err(VolError::InsufficientData {
                required: MIN_GARCH_RETURNS,
                actual: returns.len(),
            });
        }
        if returns.iter().any(|r| !r.is_finite()) {
            return Err(VolError::invalid_input("returns must be finite"));
        }

        let residuals = demeaned(returns);
        let target = sample_variance(&residuals);
        if target <= 0.0 {
            return Err(VolError::invalid_input("returns have zero variance"));
        }

        let coarse = grid_search(&residuals, target, (0.01, 0.30), (0.50, 0.99), 0.01);
        let (alpha, beta) = coarse.unwrap_or((0.05, 0.90));
        let fine = grid_search(
            &residuals,
            target,
            ((alpha - 0.01).max(0.001), alpha + 0.01),
            ((beta - 0.01).max(0.0), beta + 0.01),
            0.001,
        );
        let (alpha, beta) = fine.unwrap_or((alpha, beta));

        let params = GarchParams::with_variance_target(alpha, beta, target);
        let (log_likelihood, next_variance) = filter(&residuals, &params, target);

        debug!(
            alpha,
            beta,
            omega = params.omega,
            log_likelihood,
            "fitted GARCH(1,1)"
        );

        Ok(Self {
            params,
            next_variance,
            log_likelihood,
        })
    }

    /// Gaussian log-likelihood of `params` on `returns`, on the same basis
    /// as [`GarchModel::log_likelihood`].
    #[must_use]
    pub fn log_likelihood_of(returns: &[f64], params: &GarchParams) -> f64 {
        let residuals = demeaned(returns);
        let start = sample_variance(&residuals);
        filter(&residuals, params, start).0
    }

    /// Daily variance forecasts for the next `horizon` days.
    ///
    /// Day `h` is `V + (alpha + beta)^(h-1) * (next_variance - V)` where `V`
    /// is the long-run variance.
    #[must_use]
    pub fn forecast_variance(&self, horizon: usize) -> Vec<f64> {
        let persistence = self.params.persistence();
        let long_run = self
            .params
            .long_run_variance()
            .unwrap_or(self.next_variance);

        (0..horizon)
            .scan(self.next_variance - long_run, |excess, _| {
                let variance = long_run + *excess;
                *excess *= persistence;
                Some(variance)
            })
            .collect()
    }
}

/// GARCH(1,1) volatility forecast in annualized percentage points.
///
/// # Errors
/// - [`VolError::InvalidInput`] for invalid prices or zero-variance returns.
/// - [`VolError::InsufficientData`] for fewer than [`MIN_GARCH_RETURNS`] returns.
pub fn garch_forecast(
    prices: &[f64],
    horizon: usize,
    annualization_factor: u32,
) -> Result<Vec<f64>, VolError> {
    validate_prices(prices)?;
    let model = GarchModel::fit(&log_returns(prices))?;

    Ok(model
        .forecast_variance(horizon)
        .into_iter()
        .map(|variance| annualized_percent(variance, annualization_factor))
        .collect())
}

fn demeaned(returns: &[f64]) -> Vec<f64> {
    let center = mean(returns);
    returns.iter().map(|r| r - center).collect()
}

/// Runs the variance recursion from `start`; returns the log-likelihood and
/// the one-step-ahead variance.
fn filter(residuals: &[f64], params: &GarchParams, start: f64) -> (f64, f64) {
    let mut variance = start;
    let mut log_likelihood = 0.0;
    for e in residuals {
        log_likelihood -= 0.5 * (variance.ln() + e * e / variance);
        variance = params.omega + params.alpha * e * e + params.beta * variance;
    }
    (log_likelihood, variance)
}

fn grid_search(
    residuals: &[f64],
    target: f64,
    alpha_range: (f64, f64),
    beta_range: (f64, f64),
    step: f64,
) -> Option<(f64, f64)> {
    let steps = |(low, high): (f64, f64)| {
        let count = ((high - low) / step).round() as usize;
        (0..=count).map(move |i| low + i as f64 * step)
    };

    let mut best: Option<(f64, f64, f64)> = None;
    for alpha in steps(alpha_range) {
        for beta in steps(beta_range) {
            if alpha + beta >= MAX_PERSISTENCE {
                continue;
            }
            let params = GarchParams::with_variance_target(alpha, beta, target);
            if !params.is_valid() {
                continue;
            }
            let (log_likelihood, _) = filter(residuals, &params, target);
            if log_likelihood.is_finite()
                && best.is_none_or(|(_, _, current)| log_likelihood > current)
            {
                best = Some((alpha, beta, log_likelihood));
            }
        }
    }
    best.map(|(alpha, beta, _)| (alpha, beta))
}
