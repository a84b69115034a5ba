use volforecast::prelude::*;
use volforecast::pricing::MILLIS_PER_YEAR;

const NOW: u64 = 1_750_000_000_000;

#[test]
fn test_put_monotonic_in_spot() {
    let deep = american_price(80.0, 100.0, 1.0, 0.05, 0.2, OptionType::Put).unwrap();
    let atm = american_price(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Put).unwrap();
    assert!(deep > atm);

    let mut previous = 0.0;
    for spot in (60..=140).rev().step_by(5) {
        let value = american_price(spot as f64, 100.0, 0.5, 0.05, 0.3, OptionType::Put).unwrap();
        assert!(value >= previous - 1e-9, "spot {spot}: {value} < {previous}");
        previous = value;
    }
}

#[test]
fn test_american_put_at_least_european() {
    for strike in [90.0, 100.0, 110.0] {
        let params = OptionParams::put(100.0, strike, 1.0, 0.06);
        let american = BjerksundStensland::price(&params, 0.25).unwrap();
        let european = BlackScholes::price(&params, 0.25).unwrap();
        assert!(american >= european - 1e-9);
    }
}

#[test]
fn test_call_without_dividends_is_european() {
    let params = OptionParams::call(95.0, 100.0, 0.75, 0.03);
    let american = BjerksundStensland::price(&params, 0.4).unwrap();
    let european = BlackScholes::price(&params, 0.4).unwrap();
    assert!((american - european).abs() < 1e-12);
}

#[test]
fn test_negative_rate_is_accepted() {
    let value = american_price(100.0, 100.0, 1.0, -0.01, 0.2, OptionType::Put).unwrap();
    assert!(value > 0.0);
}

#[test]
fn test_implied_volatility_round_trip_examples() {
    for (spot, strike, time, rate, vol, option_type) in [
        (100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Put),
        (120.0, 110.0, 0.3, 0.02, 0.45, OptionType::Put),
        (75.0, 80.0, 1.5, 0.08, 0.3, OptionType::Call),
        (180.0, 170.0, 0.1, 0.0, 0.6, OptionType::Call),
    ] {
        let price = american_price(spot, strike, time, rate, vol, option_type).unwrap();
        let iv = implied_volatility(strike, time, spot, rate, price, option_type).unwrap();
        assert!((iv - vol).abs() < 1e-3, "expected {vol}, got {iv}");
    }
}

#[test]
fn test_solver_reports_non_convergence() {
    let params = OptionParams::call(100.0, 100.0, 1.0, 0.05);
    // A call can never be worth more than the underlying.
    let result = solve_iv(&params, 150.0, &SolverConfig::default());
    assert!(matches!(result, Err(VolError::DidNotConverge { .. })));
}

#[test]
fn test_greeks_from_prelude() {
    let greeks = BlackScholes::greeks(&OptionParams::put(100.0, 95.0, 0.5, 0.05), 0.3).unwrap();
    assert!(greeks.delta < 0.0);
    assert!(greeks.gamma > 0.0);
    assert!(greeks.vega > 0.0);
    assert!(greeks.theta < 0.0);
}

fn chain_quote(spot: f64, strike: f64, option_type: OptionType, vol: f64, spread: f64) -> OptionQuote {
    let mid = american_price(spot, strike, 0.25, 0.05, vol, option_type).unwrap();
    OptionQuote::new(
        strike,
        NOW + (0.25 * MILLIS_PER_YEAR) as u64,
        option_type,
        mid - spread / 2.0,
        mid + spread / 2.0,
    )
}

#[test]
fn test_atm_aggregation_from_quotes() {
    let spot = 250.0;
    let options = vec![
        chain_quote(spot, 200.0, OptionType::Put, 0.5, 0.1),
        chain_quote(spot, 245.0, OptionType::Put, 0.32, 0.2),
        chain_quote(spot, 252.5, OptionType::Call, 0.28, 0.2),
        chain_quote(spot, 260.0, OptionType::Call, 0.26, 0.2),
        chain_quote(spot, 300.0, OptionType::Call, 0.4, 0.1),
    ];
    let iv = atm_implied_vol_at(&options, spot, &AtmConfig::default(), NOW).unwrap();
    assert!((iv - 0.30).abs() < 1e-3, "got {iv}");
}

#[test]
fn test_atm_filter_rejects_far_strikes() {
    let spot = 100.0;
    let options = vec![
        chain_quote(spot, 90.0, OptionType::Put, 0.2, 0.1),
        chain_quote(spot, 111.0, OptionType::Call, 0.2, 0.1),
    ];
    let err = atm_implied_vol_at(&options, spot, &AtmConfig::default(), NOW).unwrap_err();
    assert!(matches!(err, VolError::NoAtmOptions { .. }));
    assert!(err.to_string().starts_with("no option strikes within 5.0%"));
}

#[test]
fn test_calculate_atm_implied_vol_uses_wall_clock() {
    let spot = 100.0;
    let expiration_ms = current_time_millis() + (0.5 * MILLIS_PER_YEAR) as u64;
    let mid = american_price(spot, 100.0, 0.5, 0.05, 0.25, OptionType::Call).unwrap();
    let options = vec![OptionQuote::new(100.0, expiration_ms, OptionType::Call, mid, mid)];

    // Expiry drifts by a few milliseconds between pricing and solving.
    let iv = calculate_atm_implied_vol(&options, spot, 0.05).unwrap();
    assert!((iv - 0.25).abs() < 1e-3);
}

#[test]
fn test_quote_json_from_provider() {
    let json = r#"[
        {"strike": 100.0, "expirationMs": 1781536000000, "type": "put", "bid": 4.1, "ask": 4.3},
        {"strike": 105.0, "expirationMs": 1781536000000, "type": "call", "bid": 2.0, "ask": 2.2}
    ]"#;
    let quotes: Vec<OptionQuote> = serde_json::from_str(json).unwrap();
    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes[0].option_type, OptionType::Put);
    assert!((quotes[1].mid_price() - 2.1).abs() < 1e-12);
}

#[test]
fn test_unit_bridge_between_components() {
    let prices: Vec<f64> = (0..60)
        .map(|i| 100.0 + 3.0 * ((i as f64) * 0.9).sin())
        .collect();
    let ensemble_pct = ensemble_volatility(&prices, 30).unwrap();
    let vol = percent_to_decimal(ensemble_pct);
    assert!(vol > 0.0 && vol < 5.0);

    let price = american_price(100.0, 100.0, 0.5, 0.05, vol, OptionType::Put).unwrap();
    let iv = implied_volatility(100.0, 0.5, 100.0, 0.05, price, OptionType::Put).unwrap();
    assert!((decimal_to_percent(iv) - ensemble_pct).abs() < 0.1);
}
