use chrono::{Days, NaiveDate};
use options_analytics::prelude::*;

pub const TOLERANCE: f64 = 1e-6;

pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 3).unwrap()
}

pub fn date(offset: usize) -> NaiveDate {
    start_date().checked_add_days(Days::new(offset as u64)).unwrap()
}

/// Closes following a fixed daily log return.
pub fn constant_return_closes(count: usize, daily_return: f64) -> Vec<f64> {
    (0..count)
        .map(|i| 100.0 * (daily_return * i as f64).exp())
        .collect()
}

/// Deterministic OHLC bars with overnight gaps and intraday ranges.
pub fn synthetic_series(count: usize) -> PriceSeries {
    let mut close: f64 = 100.0;
    let bars = (0..count)
        .map(|i| {
            let t = i as f64;
            let open = close * (0.002 * (t * 1.3).sin()).exp();
            close = open * (0.011 * (t * 0.7).sin() + 0.004 * (t * 0.17).cos()).exp();
            let high = open.max(close) * (1.0 + 0.006 + 0.003 * (t * 0.5).cos().abs());
            let low = open.min(close) * (1.0 - 0.005 - 0.002 * (t * 0.9).sin().abs());
            PriceBar::new(date(i), open, high, low, close, 10_000.0 + t)
        })
        .collect();
    PriceSeries::new(bars).unwrap()
}
