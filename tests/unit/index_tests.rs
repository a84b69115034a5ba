use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use volforecast::index::{MAX_PROXY_VOL, ProxySource, VIX};
use volforecast::prelude::*;

/// In-memory provider recording every request.
struct RecordingProvider {
    levels: HashMap<&'static str, f64>,
    closes: HashMap<&'static str, Vec<f64>>,
    requests: Mutex<Vec<String>>,
}

impl RecordingProvider {
    fn new() -> Self {
        let spy: Vec<f64> = (0..60)
            .map(|i| 400.0 * (1.0 + 0.01 * ((i as f64) * 1.3).sin()))
            .collect();
        // Twice as volatile as the benchmark, perfectly correlated.
        let tech: Vec<f64> = (0..60)
            .map(|i| 150.0 * (1.0 + 0.02 * ((i as f64) * 1.3).sin()))
            .collect();

        Self {
            levels: HashMap::from([("^VIX", 16.0), ("^VXN", 21.0)]),
            closes: HashMap::from([("SPY", spy), ("TECH", tech)]),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

impl IndexQuoteProvider for RecordingProvider {
    fn index_quote(&self, index_symbol: &str) -> Result<IndexQuote, VolError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(index_symbol.to_string());
        }
        self.levels
            .get(index_symbol)
            .map(|level| IndexQuote {
                symbol: index_symbol.to_string(),
                level: *level,
                timestamp_ms: 1_700_000_000_000,
            })
            .ok_or_else(|| VolError::provider(format!("{index_symbol} not found")))
    }

    fn daily_closes(&self, symbol: &str, days: usize) -> Result<Vec<f64>, VolError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(symbol.to_string());
        }
        self.closes
            .get(symbol)
            .map(|closes| closes.iter().rev().take(days).rev().copied().collect())
            .ok_or_else(|| VolError::provider(format!("{symbol} not found")))
    }
}

#[test]
fn test_direct_and_beta_adjusted_paths() {
    let proxy = IndexVolatilityProxy::new(RecordingProvider::new());

    let spy = proxy.implied_vol("spy").unwrap();
    assert_eq!(spy.implied_vol, 16.0);
    assert_eq!(spy.source, ProxySource::Direct { index: VIX.into() });

    let tech = proxy.implied_vol("TECH").unwrap();
    match tech.source {
        ProxySource::BetaAdjusted { ref index, estimate } => {
            assert_eq!(index, VIX);
            assert!(estimate.beta > 1.5 && estimate.beta < 2.5, "beta {}", estimate.beta);
            assert!(estimate.correlation > 0.9);
            let expected = index_implied_vol(16.0, &estimate);
            assert!((tech.implied_vol - expected).abs() < 1e-12);
        }
        ProxySource::Direct { .. } => panic!("TECH is not index mapped"),
    }
}

#[test]
fn test_cache_lifetimes_with_manual_clock() {
    let provider = Arc::new(RecordingProvider::new());
    let clock = Arc::new(ManualClock::new(0));
    let config = CacheConfig::new()
        .with_index_ttl_ms(1_000)
        .with_beta_ttl_ms(10_000);
    let proxy = IndexVolatilityProxy::with_config(provider.clone(), &config, clock.clone());

    proxy.implied_vol("TECH").unwrap();
    assert_eq!(provider.request_count(), 3);

    proxy.implied_vol("TECH").unwrap();
    assert_eq!(provider.request_count(), 3);

    clock.advance(1_000);
    proxy.implied_vol("TECH").unwrap();
    assert_eq!(provider.request_count(), 4);

    clock.advance(9_000);
    proxy.implied_vol("TECH").unwrap();
    assert_eq!(provider.request_count(), 7);
}

#[test]
fn test_proxy_vol_is_bounded() {
    let estimate = BetaEstimate {
        beta: 3.0,
        correlation: 1.0,
    };
    assert_eq!(index_implied_vol(80.0, &estimate), MAX_PROXY_VOL);
}

#[test]
fn test_ttl_cache_shared_across_threads() {
    let cache = Arc::new(TtlCache::<f64>::new(60_000));
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                for i in 0..25 {
                    cache.insert(format!("{t}-{i}"), f64::from(i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(cache.len(), 100);
    assert_eq!(cache.get("3-24"), Some(24.0));
}

#[test]
fn test_volatility_index_mapping_is_public() {
    assert_eq!(volatility_index_for("SPX"), Some("^VIX"));
    assert_eq!(volatility_index_for("ndx"), Some("^VXN"));
    assert_eq!(volatility_index_for("TSLA"), None);
}
