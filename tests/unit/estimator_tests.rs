use volforecast::prelude::*;

const PRICES: [f64; 10] = [100.0, 102.0, 99.0, 101.0, 103.0, 98.0, 100.0, 102.0, 101.0, 99.0];

fn trending_prices(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 * (1.0 + 0.01 * ((i as f64) * 0.7).sin()) + i as f64 * 0.1)
        .collect()
}

#[test]
fn test_example_scenario() {
    let historical = historical_volatility(&PRICES, 5, DEFAULT_ANNUALIZATION_FACTOR).unwrap();
    assert_eq!(historical.len(), 10);
    assert!(historical[..5].iter().all(|v| v.is_nan()));
    assert!(historical[5..].iter().all(|v| v.is_finite() && *v > 0.0));

    let fast = ewma_volatility(&PRICES, FAST_LAMBDA, DEFAULT_ANNUALIZATION_FACTOR).unwrap();
    let slow = ewma_volatility(&PRICES, SLOW_LAMBDA, DEFAULT_ANNUALIZATION_FACTOR).unwrap();
    assert!(fast.is_finite() && fast > 0.0);

    // Default window 30 leaves no valid historical value for 10 prices.
    let ensemble = ensemble_volatility(&PRICES, DEFAULT_WINDOW).unwrap();
    assert!((ensemble - (fast + slow) / 2.0).abs() < 1e-10);

    let with_window = ensemble_volatility(&PRICES, 5).unwrap();
    let expected = (historical[9] + fast + slow) / 3.0;
    assert!((with_window - expected).abs() < 1e-10);
}

#[test]
fn test_empty_input_is_invalid() {
    assert!(matches!(
        historical_volatility(&[], 30, 252),
        Err(VolError::InvalidInput { .. })
    ));
    assert!(matches!(
        ewma_volatility(&[], 0.94, 252),
        Err(VolError::InvalidInput { .. })
    ));
    assert!(matches!(
        ensemble_volatility(&[], 30),
        Err(VolError::InvalidInput { .. })
    ));
}

#[test]
fn test_single_price_is_insufficient_everywhere() {
    let single = [100.0];
    let expected = VolError::InsufficientData {
        required: 2,
        actual: 1,
    };
    assert_eq!(historical_volatility(&single, 30, 252), Err(expected.clone()));
    assert_eq!(ewma_volatility(&single, 0.94, 252), Err(expected.clone()));
    assert_eq!(ensemble_volatility(&single, 30), Err(expected));
}

#[test]
fn test_lambda_boundaries() {
    for lambda in [1.5, -0.5, 0.0, 1.0] {
        assert!(matches!(
            ewma_volatility(&PRICES, lambda, 252),
            Err(VolError::InvalidInput { .. })
        ));
    }
    assert!(ewma_volatility(&[100.0, 101.0], 0.94, 252).is_ok());
}

#[test]
fn test_warm_up_region_is_all_nan() {
    for n in [2, 10, 30, 31] {
        let vols = historical_volatility(&trending_prices(n), 30, 252).unwrap();
        assert_eq!(vols.len(), n);
        assert!(vols.iter().all(|v| v.is_nan()), "n = {n}");
    }
    let vols = historical_volatility(&trending_prices(32), 30, 252).unwrap();
    assert!(vols[31].is_finite());
}

#[test]
fn test_ewma_fast_decay_forgets_spike_sooner() {
    let mut prices = vec![100.0, 100.0, 120.0];
    prices.extend(std::iter::repeat_n(120.0, 40));

    let fast = ewma_volatility(&prices, 0.94, 252).unwrap();
    let slow = ewma_volatility(&prices, 0.97, 252).unwrap();
    assert!(fast < slow, "fast {fast} should be below slow {slow}");
}

#[test]
fn test_constant_prices() {
    let flat = [50.0; 40];
    let historical = historical_volatility(&flat, 30, 252).unwrap();
    assert_eq!(historical[39], 0.0);
    assert_eq!(ewma_volatility(&flat, 0.94, 252).unwrap(), 0.0);
    assert_eq!(ensemble_volatility(&flat, 30).unwrap(), 0.0);
}

#[test]
fn test_series_helpers_are_aligned() {
    let prices = trending_prices(45);
    let config = EstimatorConfig::new().with_window(20);

    let ewma = ewma_volatility_series(&prices, FAST_LAMBDA, 252).unwrap();
    assert_eq!(ewma.len(), prices.len());
    assert_eq!(ewma[0], ewma[1]);
    let current = ewma_volatility(&prices, FAST_LAMBDA, 252).unwrap();
    assert!((ewma[44] - current).abs() < 1e-12);

    let ensemble = ensemble_volatility_series(&prices, &config).unwrap();
    assert_eq!(ensemble.len(), prices.len());
    assert!(ensemble.iter().all(|v| v.is_finite()));
    let latest = ensemble_volatility_with(&prices, &config).unwrap();
    assert!((ensemble[44] - latest).abs() < 1e-10);
}

#[test]
fn test_forecasts() {
    let prices = trending_prices(40);
    let decay = decay_forecast(&prices, 10, 0.95, 30, 252).unwrap();
    assert_eq!(decay.len(), 10);
    assert!(decay.windows(2).all(|w| w[1] < w[0]));

    let flat = ewma_forecast(&prices, 5, SLOW_LAMBDA, 252).unwrap();
    assert_eq!(flat.len(), 5);
}

#[test]
fn test_parkinson_matches_range_formula() {
    let bars: Vec<PriceBar> = (0..10)
        .map(|i| {
            let base = 100.0 + i as f64;
            PriceBar::new(base, base * 1.02, base * 0.99, base + 0.5)
        })
        .collect();
    let vols = parkinson_volatility(&bars, 5, 252).unwrap();
    assert_eq!(vols.len(), bars.len());
    assert!(vols[..4].iter().all(|v| v.is_nan()));

    let per_bar = (1.02f64 / 0.99).ln().powi(2) / (4.0 * 2f64.ln());
    let expected = (per_bar * 252.0).sqrt() * 100.0;
    assert!((vols[9] - expected).abs() < 1e-9);
}

#[test]
fn test_estimator_config_json() {
    let config = EstimatorConfig::from_json(r#"{"window": 20}"#).unwrap();
    assert_eq!(config.window, 20);
    assert_eq!(config.annualization_factor, 252);
    assert_eq!(config.fast_lambda, FAST_LAMBDA);

    let json = config.to_json().unwrap();
    assert_eq!(EstimatorConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_forecast_bands_contain_forecast() {
    let prices = trending_prices(120);
    let bands = decay_forecast_bands(&prices, 10, 0.9, 20, DEFAULT_ANNUALIZATION_FACTOR, 0.95)
        .unwrap();
    assert_eq!(bands.forecast.len(), 10);
    for i in 0..10 {
        assert!(bands.lower[i] >= 0.0);
        assert!(bands.lower[i] <= bands.forecast[i]);
        assert!(bands.upper[i] > bands.forecast[i]);
    }

    let narrow = decay_forecast_bands(&prices, 10, 0.9, 20, DEFAULT_ANNUALIZATION_FACTOR, 0.5)
        .unwrap();
    assert!(narrow.upper[0] < bands.upper[0]);
}

#[test]
fn test_garch_forecast_feeds_strategy_suggestions() {
    let prices = trending_prices(250);
    let garch = garch_forecast(&prices, 5, DEFAULT_ANNUALIZATION_FACTOR).unwrap();
    assert_eq!(garch.len(), 5);
    assert!(garch.iter().all(|v| v.is_finite() && *v > 0.0));

    // Implied far above any plausible forecast of this series.
    let analysis = MarketAnalysis::new(garch[0], garch[0] + 10.0, DirectionalBias::Neutral);
    assert_eq!(analysis.signal(), VolSignal::SellVolatility);
    let suggestions = strategy_recommendations(&analysis, 100.0, RiskProfile::Conservative);
    assert_eq!(suggestions[0].name, "Short Strangle");
    assert_eq!(suggestions[1].name, "Iron Condor");
}
