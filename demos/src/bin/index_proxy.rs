//! Implied volatility proxies from volatility index quotes
//!
//! This demo shows how to:
//! 1. Plug a market data source into `IndexVolatilityProxy`
//! 2. Resolve ETFs directly to their volatility index
//! 3. Scale VIX to single stocks through beta and correlation
//! 4. Observe cache lifetimes with a manual clock

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use volforecast::index::ProxySource;
use volforecast::prelude::*;

/// Fixed quotes and closes standing in for a market data service.
struct StaticProvider {
    levels: HashMap<&'static str, f64>,
    closes: HashMap<&'static str, Vec<f64>>,
}

impl StaticProvider {
    fn new() -> Self {
        let wave = |base: f64, amplitude: f64, phase: f64| -> Vec<f64> {
            (0..300)
                .map(|i| {
                    let t = i as f64;
                    base * (1.0 + amplitude * (t * 0.7).sin() + 0.002 * (t * 2.3 + phase).cos())
                })
                .collect()
        };

        Self {
            levels: HashMap::from([("^VIX", 17.4), ("^VXN", 22.8), ("^RVX", 24.1)]),
            closes: HashMap::from([
                ("SPY", wave(520.0, 0.010, 0.0)),
                ("NVDA", wave(120.0, 0.024, 1.1)),
                ("KO", wave(62.0, 0.005, 2.7)),
            ]),
        }
    }
}

impl IndexQuoteProvider for StaticProvider {
    fn index_quote(&self, index_symbol: &str) -> Result<IndexQuote, VolError> {
        let level = self
            .levels
            .get(index_symbol)
            .ok_or_else(|| VolError::provider(format!("no quote for {index_symbol}")))?;
        Ok(IndexQuote {
            symbol: index_symbol.to_string(),
            level: *level,
            timestamp_ms: current_time_millis(),
        })
    }

    fn daily_closes(&self, symbol: &str, days: usize) -> Result<Vec<f64>, VolError> {
        let closes = self
            .closes
            .get(symbol)
            .ok_or_else(|| VolError::provider(format!("no history for {symbol}")))?;
        let start = closes.len().saturating_sub(days);
        Ok(closes[start..].to_vec())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();
    info!("Starting index proxy demo");

    let clock = Arc::new(ManualClock::new(current_time_millis()));
    let config = CacheConfig::default();
    let proxy = IndexVolatilityProxy::with_config(StaticProvider::new(), &config, clock.clone());

    for symbol in ["SPY", "qqq", "IWM", "NVDA", "KO", "UNKNOWN"] {
        match proxy.implied_vol(symbol) {
            Ok(result) => {
                match &result.source {
                    ProxySource::Direct { index } => {
                        info!("{symbol}: {:.2}% straight from {index}", result.implied_vol)
                    }
                    ProxySource::BetaAdjusted { index, estimate } => info!(
                        "{symbol}: {:.2}% from {index} {:.2} (beta {:.2}, correlation {:.2})",
                        result.implied_vol, result.base_level, estimate.beta, estimate.correlation
                    ),
                }
                info!("{}", serde_json::to_string(&result)?);
            }
            Err(e) => warn!("{symbol}: {e}"),
        }
    }

    clock.advance(config.index_ttl_ms);
    info!("Index quotes expired, purged {} entries", proxy.purge_expired());

    clock.advance(config.beta_ttl_ms);
    info!("Beta estimates expired, purged {} entries", proxy.purge_expired());

    info!("Demo completed successfully");
    Ok(())
}
