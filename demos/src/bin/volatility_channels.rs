//! Computes volatility dashboards for several symbols on worker threads
//!
//! This demo shows how to:
//! 1. Run the estimators and the implied volatility solver concurrently
//! 2. Route per-symbol results back to one consumer over a channel
//! 3. Bridge percentage-point estimates and decimal implied volatility
//! 4. Turn the forecast/implied spread into strategy suggestions
//! 5. Serialize the chart-ready report

use serde::Serialize;
use std::sync::mpsc;
use std::thread;
use tracing::{error, info, warn};
use volforecast::prelude::*;
use volforecast::pricing::MILLIS_PER_YEAR;

/// Result of one worker.
#[derive(Debug, Serialize)]
struct DashboardEvent {
    symbol: String,
    summary: ModelPredictions,
    atm_implied_vol: Option<f64>,
    signal: Option<VolSignal>,
    strategies: Vec<StrategyRecommendation>,
    timestamp: u64,
}

/// Synthetic daily closes with a symbol-specific amplitude.
fn synthetic_prices(seed: f64, days: usize) -> Vec<f64> {
    (0..days)
        .scan(100.0 * seed, |price, i| {
            let t = i as f64;
            let step = 0.015 * seed * (t * 0.61 + seed).sin() + 0.006 * (t * 1.7).cos();
            *price *= step.exp();
            Some(*price)
        })
        .collect()
}

/// Option chain around spot priced at `vol`, expiring in three months.
fn synthetic_chain(spot: f64, vol: f64, now_ms: u64) -> Vec<OptionQuote> {
    let expiration_ms = now_ms + (0.25 * MILLIS_PER_YEAR) as u64;
    (-4..=4)
        .filter_map(|step| {
            let strike = (spot * (1.0 + 0.025 * f64::from(step))).round();
            let option_type = if strike < spot {
                OptionType::Put
            } else {
                OptionType::Call
            };
            let mid = american_price(spot, strike, 0.25, 0.05, vol, option_type).ok()?;
            let half_spread = (mid * 0.01).max(0.01);
            Some(OptionQuote::new(
                strike,
                expiration_ms,
                option_type,
                mid - half_spread,
                mid + half_spread,
            ))
        })
        .collect()
}

fn build_dashboard(symbol: &str, seed: f64) -> Result<DashboardEvent, VolError> {
    let prices = synthetic_prices(seed, 120);
    let labels = (1..=prices.len()).map(|day| format!("D{day:03}")).collect();
    let now = current_time_millis();

    let ensemble = ensemble_volatility(&prices, DEFAULT_WINDOW)?;
    let spot = prices[prices.len() - 1];
    // Quote the chain slightly richer than realized volatility.
    let chain = synthetic_chain(spot, percent_to_decimal(ensemble) * 1.1, now);

    let atm_implied_vol = match atm_implied_vol_at(&chain, spot, &AtmConfig::default(), now) {
        Ok(iv) => Some(decimal_to_percent(iv)),
        Err(e) => {
            warn!("{}: no implied volatility: {}", symbol, e);
            None
        }
    };

    let report = VolatilityReport::build(
        labels,
        &prices,
        atm_implied_vol,
        &EstimatorConfig::default(),
    )?;

    let analysis = atm_implied_vol
        .map(|implied| MarketAnalysis::new(ensemble, implied, DirectionalBias::Neutral));
    let strategies = analysis
        .map(|a| strategy_recommendations(&a, spot, RiskProfile::Moderate))
        .unwrap_or_default();

    Ok(DashboardEvent {
        symbol: symbol.to_string(),
        summary: report.summary(),
        atm_implied_vol,
        signal: analysis.map(|a| a.signal()),
        strategies,
        timestamp: now,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();
    info!("Starting volatility channels demo");

    let (sender, receiver) = mpsc::channel::<DashboardEvent>();
    let symbols = [("AAPL", 1.0), ("MSFT", 0.8), ("TSLA", 2.2), ("XOM", 0.6)];

    let handles: Vec<_> = symbols
        .iter()
        .map(|(symbol, seed)| {
            let sender = sender.clone();
            let symbol = symbol.to_string();
            let seed = *seed;
            thread::spawn(move || match build_dashboard(&symbol, seed) {
                Ok(event) => {
                    if let Err(e) = sender.send(event) {
                        error!("Failed to send dashboard for {}: {}", symbol, e);
                    }
                }
                Err(e) => error!("Failed to build dashboard for {}: {}", symbol, e),
            })
        })
        .collect();
    drop(sender);

    for event in receiver {
        let summary = event.summary;
        info!(
            "{} - Historical: {:.2}%, EWMA: {:.2}%, Ensemble: {:.2}%, ATM IV: {:?}",
            event.symbol,
            summary.historical_vol.unwrap_or(f64::NAN),
            summary.ewma.unwrap_or(f64::NAN),
            summary.ensemble.unwrap_or(f64::NAN),
            event.atm_implied_vol.map(|iv| (iv * 100.0).round() / 100.0)
        );
        if let Some(signal) = event.signal {
            let names: Vec<_> = event.strategies.iter().map(|s| s.name.as_str()).collect();
            info!("{} - {}: {:?}", event.symbol, signal, names);
        }
        info!("{}", serde_json::to_string(&event)?);
    }

    for handle in handles {
        if handle.join().is_err() {
            error!("Worker thread panicked");
        }
    }

    info!("Demo completed successfully");
    Ok(())
}
