//! Implied volatility proxy backed by volatility index quotes.

use super::beta::{BetaEstimate, estimate_beta, index_implied_vol};
use super::cache::{CacheConfig, Clock, SystemClock, TtlCache};
use super::mapping::{VIX, volatility_index_for};
use crate::error::VolError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Benchmark used to estimate single-stock beta.
pub const BENCHMARK_SYMBOL: &str = "SPY";

/// Trading days of history used for beta.
pub const BETA_LOOKBACK_DAYS: usize = 252;

/// Latest level of a volatility index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexQuote {
    /// Index symbol, e.g. `^VIX`.
    pub symbol: String,
    /// Index level in percentage points.
    pub level: f64,
    /// Quote time in milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

/// Market data the proxy needs. Implementations own transport and retries.
pub trait IndexQuoteProvider: Send + Sync {
    /// Latest quote of a volatility index.
    fn index_quote(&self, index_symbol: &str) -> Result<IndexQuote, VolError>;

    /// Up to `days` daily closes of `symbol`, oldest first.
    fn daily_closes(&self, symbol: &str, days: usize) -> Result<Vec<f64>, VolError>;
}

impl<P: IndexQuoteProvider + ?Sized> IndexQuoteProvider for Arc<P> {
    fn index_quote(&self, index_symbol: &str) -> Result<IndexQuote, VolError> {
        (**self).index_quote(index_symbol)
    }

    fn daily_closes(&self, symbol: &str, days: usize) -> Result<Vec<f64>, VolError> {
        (**self).daily_closes(symbol, days)
    }
}

/// How a proxy figure was obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProxySource {
    /// Symbol tracks the index directly.
    Direct {
        /// Index the symbol maps to.
        index: String,
    },
    /// Single stock scaled from the index through beta.
    BetaAdjusted {
        /// Index the figure is scaled from.
        index: String,
        /// Beta and correlation used.
        estimate: BetaEstimate,
    },
}

/// Implied volatility estimate from a volatility index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexImpliedVol {
    /// Implied volatility in percentage points.
    pub implied_vol: f64,
    /// Index level the estimate is based on.
    pub base_level: f64,
    /// Derivation of the figure.
    pub source: ProxySource,
    /// Timestamp of the underlying index quote.
    pub timestamp_ms: u64,
}

/// Derives implied volatility for any symbol from volatility indices.
///
/// Index quotes and beta estimates are cached with separate lifetimes.
pub struct IndexVolatilityProxy<P> {
    provider: P,
    quotes: TtlCache<IndexQuote>,
    betas: TtlCache<BetaEstimate>,
}

impl<P: IndexQuoteProvider> IndexVolatilityProxy<P> {
    /// Creates a proxy with default cache lifetimes on the wall clock.
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, &CacheConfig::default(), Arc::new(SystemClock))
    }

    /// Creates a proxy with explicit cache lifetimes and clock.
    pub fn with_config(provider: P, config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            provider,
            quotes: TtlCache::with_clock(config.index_ttl_ms, clock.clone()),
            betas: TtlCache::with_clock(config.beta_ttl_ms, clock),
        }
    }

    /// Latest quote of `index_symbol`, served from cache while fresh.
    pub fn index_quote(&self, index_symbol: &str) -> Result<IndexQuote, VolError> {
        let key = format!("vix_{index_symbol}");
        if let Some(quote) = self.quotes.get(&key) {
            return Ok(quote);
        }

        let quote = self.provider.index_quote(index_symbol)?;
        if !(quote.level.is_finite() && quote.level > 0.0) {
            return Err(VolError::provider(format!(
                "no usable level for {index_symbol}: {}",
                quote.level
            )));
        }
        info!(index = index_symbol, level = quote.level, "fetched index quote");
        self.quotes.insert(key, quote.clone());
        Ok(quote)
    }

    /// Beta of `symbol` against [`BENCHMARK_SYMBOL`], served from cache while fresh.
    ///
    /// Histories too short or degenerate for an estimate fall back to
    /// [`BetaEstimate::default`] without caching it; provider failures are
    /// returned.
    pub fn beta(&self, symbol: &str) -> Result<BetaEstimate, VolError> {
        let key = format!("beta_{symbol}_{BENCHMARK_SYMBOL}_{BETA_LOOKBACK_DAYS}");
        if let Some(estimate) = self.betas.get(&key) {
            return Ok(estimate);
        }

        let stock = self.provider.daily_closes(symbol, BETA_LOOKBACK_DAYS)?;
        let benchmark = self
            .provider
            .daily_closes(BENCHMARK_SYMBOL, BETA_LOOKBACK_DAYS)?;

        let estimate = match estimate_beta(&stock, &benchmark) {
            Ok(estimate) => estimate,
            Err(e) => {
                // Not cached: the next call retries with fresh history.
                warn!(symbol, error = %e, "beta estimate unavailable, using default");
                return Ok(BetaEstimate::default());
            }
        };
        info!(
            symbol,
            beta = estimate.beta,
            correlation = estimate.correlation,
            "estimated beta"
        );
        self.betas.insert(key, estimate);
        Ok(estimate)
    }

    /// Implied volatility proxy for `symbol` in percentage points.
    ///
    /// Mapped indices and ETFs return their index level unchanged; other
    /// symbols scale [`VIX`] by beta and correlation.
    ///
    /// # Errors
    /// [`VolError::Provider`] when a quote or history cannot be fetched.
    pub fn implied_vol(&self, symbol: &str) -> Result<IndexImpliedVol, VolError> {
        let symbol = symbol.trim().to_ascii_uppercase();
        if symbol.is_empty() {
            return Err(VolError::invalid_input("symbol cannot be empty"));
        }

        if let Some(index) = volatility_index_for(&symbol) {
            let quote = self.index_quote(index)?;
            return Ok(IndexImpliedVol {
                implied_vol: quote.level,
                base_level: quote.level,
                source: ProxySource::Direct {
                    index: index.to_string(),
                },
                timestamp_ms: quote.timestamp_ms,
            });
        }

        let quote = self.index_quote(VIX)?;
        let estimate = self.beta(&symbol)?;
        Ok(IndexImpliedVol {
            implied_vol: index_implied_vol(quote.level, &estimate),
            base_level: quote.level,
            source: ProxySource::BetaAdjusted {
                index: VIX.to_string(),
                estimate,
            },
            timestamp_ms: quote.timestamp_ms,
        })
    }

    /// Drops expired entries from both caches.
    pub fn purge_expired(&self) -> usize {
        self.quotes.purge_expired() + self.betas.purge_expired()
    }
}
