//! Commonly used types and functions.
//!
//! ```
//! use volforecast::prelude::*;
//! ```

pub use crate::error::VolError;
pub use crate::estimator::{
    DEFAULT_ANNUALIZATION_FACTOR, DEFAULT_WINDOW, EstimatorConfig, FAST_LAMBDA, ForecastBands,
    GarchModel, GarchParams, PriceBar, SLOW_LAMBDA, confidence_intervals, decay_forecast,
    decay_forecast_bands, ensemble_volatility, ensemble_volatility_series,
    ensemble_volatility_with, ewma_forecast, ewma_volatility, ewma_volatility_series,
    garch_forecast, historical_volatility, last_valid, log_returns, parkinson_volatility,
};
pub use crate::index::{
    BetaEstimate, CacheConfig, Clock, IndexImpliedVol, IndexQuote, IndexQuoteProvider,
    IndexVolatilityProxy, ManualClock, SystemClock, TtlCache, estimate_beta, index_implied_vol,
    volatility_index_for,
};
pub use crate::pricing::{
    AtmConfig, BjerksundStensland, BlackScholes, Greeks, OptionParams, OptionQuote, OptionType,
    SolverConfig, american_price, atm_implied_vol_at, calculate_atm_implied_vol,
    implied_volatility, solve_iv,
};
pub use crate::report::{ModelPredictions, VolatilityReport};
pub use crate::strategy::{
    DirectionalBias, MarketAnalysis, RiskProfile, StrategyRecommendation, VolSignal,
    strategy_recommendations, vol_signal,
};
pub use crate::utils::{current_time_millis, setup_logger};
pub use crate::{decimal_to_percent, percent_to_decimal};
