//! Option strategy suggestions from the volatility spread.
//!
//! The spread is `forecast - implied` in percentage points. A positive
//! spread means realized volatility is expected to exceed what the market
//! prices, which favors buying volatility.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Spread beyond which a strategy change is suggested, in percentage points.
pub const SPREAD_THRESHOLD: f64 = 2.0;

/// Spread beyond which the signal leaves neutral, in percentage points.
pub const SIGNAL_THRESHOLD: f64 = 1.0;

/// Investor risk appetite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

/// Expected direction of the underlying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionalBias {
    Bullish,
    Bearish,
    Neutral,
}

/// Buy or sell volatility reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolSignal {
    BuyVolatility,
    SellVolatility,
    Neutral,
}

impl fmt::Display for VolSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolSignal::BuyVolatility => write!(f, "Buy Volatility"),
            VolSignal::SellVolatility => write!(f, "Sell Volatility"),
            VolSignal::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Classifies the spread between a forecast and implied volatility, both in
/// percentage points. A spread of exactly [`SIGNAL_THRESHOLD`] is neutral.
#[must_use]
pub fn vol_signal(forecast_vol: f64, implied_vol: f64) -> VolSignal {
    let spread = forecast_vol - implied_vol;
    if spread > SIGNAL_THRESHOLD {
        VolSignal::BuyVolatility
    } else if spread < -SIGNAL_THRESHOLD {
        VolSignal::SellVolatility
    } else {
        VolSignal::Neutral
    }
}

/// Volatility view used to pick strategies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    /// Implied volatility in percentage points.
    pub current_iv: f64,
    /// Forecast volatility in percentage points.
    pub forecast_vol: f64,
    /// `forecast_vol - current_iv`.
    pub vol_spread: f64,
    pub directional_bias: DirectionalBias,
}

impl MarketAnalysis {
    #[must_use]
    pub fn new(forecast_vol: f64, implied_vol: f64, directional_bias: DirectionalBias) -> Self {
        Self {
            current_iv: implied_vol,
            forecast_vol,
            vol_spread: forecast_vol - implied_vol,
            directional_bias,
        }
    }

    /// Signal for this analysis.
    #[must_use]
    pub fn signal(&self) -> VolSignal {
        vol_signal(self.forecast_vol, self.current_iv)
    }
}

/// A suggested option position with human-readable terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyRecommendation {
    pub name: String,
    pub description: String,
    pub risk: String,
    pub potential_return: String,
    /// Dollar amount such as `$20.00`, or `Unlimited`.
    pub max_loss: String,
    /// Strikes and legs to trade.
    pub setup: String,
}

impl StrategyRecommendation {
    fn new(
        name: &str,
        description: &str,
        risk: &str,
        potential_return: &str,
        max_loss: String,
        setup: String,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            risk: risk.to_string(),
            potential_return: potential_return.to_string(),
            max_loss,
            setup,
        }
    }
}

fn dollars(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Strategies that fit the analysis for a given spot and risk profile.
///
/// - Spread above [`SPREAD_THRESHOLD`]: long volatility (straddle, strangle
///   for aggressive profiles, or a backspread in the direction of the bias).
/// - Spread below `-SPREAD_THRESHOLD`: short volatility (strangle, iron
///   condor for conservative profiles, or a calendar spread for a
///   directional view).
/// - Otherwise, conservative profiles get income strategies and the rest
///   get nothing.
#[must_use]
pub fn strategy_recommendations(
    analysis: &MarketAnalysis,
    spot: f64,
    risk_profile: RiskProfile,
) -> Vec<StrategyRecommendation> {
    let spread = analysis.vol_spread;
    let bias = analysis.directional_bias;
    let mut recommendations = Vec::new();

    if spread > SPREAD_THRESHOLD {
        match bias {
            DirectionalBias::Neutral => {
                recommendations.push(StrategyRecommendation::new(
                    "Long Straddle",
                    "Buy ATM put and call options with the same strike and expiration",
                    "Limited to premium paid",
                    "Unlimited",
                    dollars(spot * 0.05),
                    format!("Buy {spot:.0} strike put and call"),
                ));
                if risk_profile == RiskProfile::Aggressive {
                    recommendations.push(StrategyRecommendation::new(
                        "Long Strangle",
                        "Buy OTM put and call options",
                        "Limited to premium paid",
                        "Unlimited",
                        dollars(spot * 0.03),
                        format!("Buy {:.0} put and {:.0} call", spot * 0.95, spot * 1.05),
                    ));
                }
            }
            DirectionalBias::Bullish => recommendations.push(StrategyRecommendation::new(
                "Call Backspread",
                "Sell ATM calls and buy more OTM calls",
                "Limited",
                "Unlimited to the upside",
                dollars(spot * 0.04),
                format!("Sell 1 {spot:.0} call, buy 2 {:.0} calls", spot * 1.05),
            )),
            DirectionalBias::Bearish => recommendations.push(StrategyRecommendation::new(
                "Put Backspread",
                "Sell ATM puts and buy more OTM puts",
                "Limited",
                "Unlimited to the downside",
                dollars(spot * 0.04),
                format!("Sell 1 {spot:.0} put, buy 2 {:.0} puts", spot * 0.95),
            )),
        }
    } else if spread < -SPREAD_THRESHOLD {
        match bias {
            DirectionalBias::Neutral => {
                recommendations.push(StrategyRecommendation::new(
                    "Short Strangle",
                    "Sell OTM put and call options",
                    "Unlimited",
                    "Limited to premium received",
                    "Unlimited".to_string(),
                    format!("Sell {:.0} put and {:.0} call", spot * 0.95, spot * 1.05),
                ));
                if risk_profile == RiskProfile::Conservative {
                    recommendations.push(StrategyRecommendation::new(
                        "Iron Condor",
                        "Sell OTM put and call spreads",
                        "Limited",
                        "Limited to premium received",
                        dollars(spot * 0.02),
                        format!(
                            "Sell {:.0}/{:.0} put spread and {:.0}/{:.0} call spread",
                            spot * 0.95,
                            spot * 0.93,
                            spot * 1.05,
                            spot * 1.07
                        ),
                    ));
                }
            }
            DirectionalBias::Bullish | DirectionalBias::Bearish => {
                if risk_profile != RiskProfile::Conservative {
                    let leg = if bias == DirectionalBias::Bullish {
                        "call"
                    } else {
                        "put"
                    };
                    recommendations.push(StrategyRecommendation::new(
                        "Calendar Spread",
                        "Sell near-term ATM option and buy longer-term ATM option",
                        "Limited to debit paid",
                        "Limited but potentially significant",
                        dollars(spot * 0.03),
                        format!("Sell 30-day {spot:.0} {leg}, buy 90-day {spot:.0} {leg}"),
                    ));
                }
            }
        }
    } else if risk_profile == RiskProfile::Conservative {
        recommendations.push(StrategyRecommendation::new(
            "Covered Call",
            "Own stock and sell OTM calls against it",
            "Limited to stock price minus premium received",
            "Limited to strike price minus stock price plus premium",
            dollars(spot * 0.95),
            format!("Buy stock at {spot:.2}, sell {:.0} call", spot * 1.05),
        ));
        recommendations.push(StrategyRecommendation::new(
            "Cash-Secured Put",
            "Sell ATM or OTM puts with cash collateral",
            "Limited to strike price minus premium received",
            "Limited to premium received",
            dollars(spot * 0.95),
            format!("Sell {:.0} put", spot * 0.95),
        ));
    }

    debug!(
        spread,
        ?bias,
        ?risk_profile,
        count = recommendations.len(),
        "strategy recommendations"
    );
    recommendations
}
