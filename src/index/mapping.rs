//! Symbols quoted directly against a volatility index.

/// CBOE S&P 500 volatility index.
pub const VIX: &str = "^VIX";
/// CBOE Nasdaq-100 volatility index.
pub const VXN: &str = "^VXN";
/// CBOE Russell 2000 volatility index.
pub const RVX: &str = "^RVX";
/// CBOE DJIA volatility index.
pub const VXD: &str = "^VXD";

const DIRECT_MAPPINGS: &[(&str, &str)] = &[
    ("SPY", VIX),
    ("SPX", VIX),
    ("QQQ", VXN),
    ("NDX", VXN),
    ("IWM", RVX),
    ("RUT", RVX),
    ("DIA", VXD),
    ("EFA", VIX),
    ("EEM", VIX),
    // sectors
    ("XLF", VIX),
    ("XLK", VXN),
    ("XLE", VIX),
    ("XLV", VIX),
    ("XLI", VIX),
    ("XLP", VIX),
    ("XLY", VIX),
    ("XLU", VIX),
    ("XLB", VIX),
    ("XLRE", VIX),
];

/// Volatility index tracking `symbol`, if it is a mapped index or ETF.
///
/// Matching is case-insensitive. Single stocks return `None`; their
/// implied volatility is derived from [`VIX`] through beta instead.
#[must_use]
pub fn volatility_index_for(symbol: &str) -> Option<&'static str> {
    let symbol = symbol.trim();
    DIRECT_MAPPINGS
        .iter()
        .find(|(ticker, _)| ticker.eq_ignore_ascii_case(symbol))
        .map(|(_, index)| *index)
}
