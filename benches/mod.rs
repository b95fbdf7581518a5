use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use options_analytics::prelude::*;
use std::hint::black_box;

fn bench_series(count: usize) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let mut close: f64 = 100.0;
    let bars = (0..count)
        .map(|i| {
            let t = i as f64;
            let open = close * (0.002 * (t * 1.7).sin()).exp();
            close = open * (0.012 * (t * 0.61).sin()).exp();
            PriceBar::new(
                start.checked_add_days(Days::new(i as u64)).unwrap(),
                open,
                open.max(close) * 1.007,
                open.min(close) * 0.993,
                close,
                1_000.0,
            )
        })
        .collect();
    PriceSeries::new(bars).unwrap()
}

fn bench_pricing(c: &mut Criterion) {
    let terms = ContractTerms::call(100.0, 100.0, 1.0, 0.05);

    c.bench_function("black_scholes_price", |b| {
        b.iter(|| BlackScholes::price(black_box(&terms), black_box(0.2)).unwrap())
    });
    c.bench_function("black_scholes_evaluate", |b| {
        b.iter(|| BlackScholes::evaluate(black_box(&terms), black_box(0.2)).unwrap())
    });

    let strikes: Vec<f64> = (0..41).map(|i| 16_000.0 + i as f64 * 100.0).collect();
    let mut group = c.benchmark_group("price_chain");
    group.throughput(Throughput::Elements(strikes.len() as u64));
    group.bench_function("41_strikes", |b| {
        b.iter(|| price_chain(black_box(18_000.0), black_box(&strikes), 30.0 / 365.0, 0.015, 0.18))
    });
    group.finish();
}

fn bench_implied_volatility(c: &mut Criterion) {
    let mut group = c.benchmark_group("implied_volatility");
    for (name, strike) in [("atm", 100.0), ("otm", 120.0), ("itm", 85.0)] {
        let terms = ContractTerms::call(100.0, strike, 0.5, 0.015);
        let price = BlackScholes::price(&terms, 0.35).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &price, |b, &price| {
            b.iter(|| implied_volatility(black_box(price), black_box(&terms)).unwrap())
        });
    }
    group.finish();
}

fn bench_estimators(c: &mut Criterion) {
    let series = bench_series(300);
    let mut group = c.benchmark_group("historical_volatility");
    for method in VolatilityMethod::ALL {
        group.bench_with_input(
            BenchmarkId::new(format!("{method:?}"), 60),
            &method,
            |b, &method| b.iter(|| historical_volatility(black_box(&series), 60, method, true)),
        );
    }
    group.bench_function("ewma_60", |b| {
        b.iter(|| ewma_volatility(black_box(&series), 60, DEFAULT_EWMA_LAMBDA))
    });
    group.finish();
}

fn bench_cone(c: &mut Criterion) {
    let series = bench_series(DEFAULT_LOOKBACK_DAYS + 253);
    c.bench_function("volatility_cone_default", |b| {
        b.iter(|| ConeBuilder::default().build(black_box(&series)))
    });
}

criterion_group!(
    benches,
    bench_pricing,
    bench_implied_volatility,
    bench_estimators,
    bench_cone
);
criterion_main!(benches);
