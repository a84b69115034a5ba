//! Implied volatility proxies from volatility indices.
//!
//! When no option chain is available, an implied volatility figure can be
//! read off a CBOE volatility index. Index ETFs map straight to their index;
//! single stocks scale the VIX by their beta and correlation to SPY.
//!
//! Quotes come from an [`IndexQuoteProvider`]; fetching over the network is
//! left to the implementor. Results are cached in a [`TtlCache`] driven by an
//! injected [`Clock`].

mod beta;
mod cache;
mod mapping;
mod proxy;

pub use beta::{
    BetaEstimate, MAX_PROXY_VOL, MIN_PROXY_VOL, SINGLE_STOCK_PREMIUM, estimate_beta,
    index_implied_vol,
};
pub use cache::{CacheConfig, Clock, ManualClock, SystemClock, TtlCache};
pub use mapping::{RVX, VIX, VXD, VXN, volatility_index_for};
pub use proxy::{
    BENCHMARK_SYMBOL, BETA_LOOKBACK_DAYS, IndexImpliedVol, IndexQuote, IndexQuoteProvider,
    IndexVolatilityProxy, ProxySource,
};
