use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use volforecast::prelude::*;

/// Deterministic random-walk-like price series.
fn price_series(n: usize) -> Vec<f64> {
    (0..n)
        .scan(100.0_f64, |price, i| {
            let step = 0.012 * ((i as f64) * 0.37).sin() + 0.004 * ((i as f64) * 1.91).cos();
            *price *= step.exp();
            Some(*price)
        })
        .collect()
}

fn estimator_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimators");
    for n in [252, 1_260, 5_040] {
        let prices = price_series(n);
        group.bench_with_input(BenchmarkId::new("historical", n), &prices, |b, prices| {
            b.iter(|| historical_volatility(black_box(prices), 30, 252))
        });
        group.bench_with_input(BenchmarkId::new("ewma", n), &prices, |b, prices| {
            b.iter(|| ewma_volatility(black_box(prices), FAST_LAMBDA, 252))
        });
        group.bench_with_input(BenchmarkId::new("ensemble_series", n), &prices, |b, prices| {
            b.iter(|| ensemble_volatility_series(black_box(prices), &EstimatorConfig::default()))
        });
    }
    group.finish();
}

fn pricing_benchmarks(c: &mut Criterion) {
    let put = OptionParams::put(100.0, 105.0, 0.75, 0.05);
    let call = OptionParams::call(100.0, 105.0, 0.75, 0.05);

    c.bench_function("bjerksund_put", |b| {
        b.iter(|| BjerksundStensland::price(black_box(&put), black_box(0.3)))
    });
    c.bench_function("bjerksund_call", |b| {
        b.iter(|| BjerksundStensland::price(black_box(&call), black_box(0.3)))
    });

    let market_price = BjerksundStensland::price(&put, 0.3).unwrap_or(8.0);
    let config = SolverConfig::default();
    c.bench_function("solve_iv_put", |b| {
        b.iter(|| solve_iv(black_box(&put), black_box(market_price), &config))
    });

    let now = 1_700_000_000_000_u64;
    let expiry = now + (0.25 * volforecast::pricing::MILLIS_PER_YEAR) as u64;
    let chain: Vec<OptionQuote> = (80..=120)
        .map(|strike| {
            let strike = f64::from(strike);
            let option_type = if strike < 100.0 { OptionType::Put } else { OptionType::Call };
            let mid = american_price(100.0, strike, 0.25, 0.05, 0.25, option_type).unwrap_or(1.0);
            OptionQuote::new(strike, expiry, option_type, mid - 0.05, mid + 0.05)
        })
        .collect();
    let atm = AtmConfig::default();
    c.bench_function("atm_implied_vol", |b| {
        b.iter(|| atm_implied_vol_at(black_box(&chain), 100.0, &atm, now))
    });
}

criterion_group!(benches, estimator_benchmarks, pricing_benchmarks);
criterion_main!(benches);
