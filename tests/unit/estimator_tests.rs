use crate::common::{constant_return_closes, start_date, synthetic_series};
use options_analytics::prelude::*;

#[test]
fn test_constant_return_series() {
    let daily_return = -0.008;
    let closes = constant_return_closes(40, daily_return);
    let series = PriceSeries::from_closes(start_date(), &closes).unwrap();

    // Flat bars carry no range
    for method in [
        VolatilityMethod::Parkinson,
        VolatilityMethod::GarmanKlass,
        VolatilityMethod::RogersSatchell,
    ] {
        assert!(historical_volatility(&series, 20, method, true).is_none(), "{method:?}");
    }

    let zero_mean = VolatilityEstimator::new(EstimatorConfig::new().with_return_mean(ReturnMean::Zero));
    let hv = zero_mean
        .historical(&series, 20, VolatilityMethod::CloseToClose, true)
        .unwrap();
    assert!((hv - daily_return.abs() * TRADING_DAYS_PER_YEAR.sqrt()).abs() < 1e-10);

    let daily = zero_mean
        .historical(&series, 20, VolatilityMethod::CloseToClose, false)
        .unwrap();
    assert!((daily - daily_return.abs()).abs() < 1e-12);

    // Demeaned returns of a constant drift have no dispersion
    let sample = historical_volatility(&series, 20, VolatilityMethod::CloseToClose, true).unwrap();
    assert!(sample.abs() < 1e-10);
}

#[test]
fn test_insufficient_data_never_fails() {
    let series = synthetic_series(12);
    for method in VolatilityMethod::ALL {
        let required = method.window_len(30);
        assert!(series.len() < required);
        assert!(historical_volatility(&series, 30, method, true).is_none(), "{method:?}");
        assert!(historical_volatility(&PriceSeries::default(), 5, method, false).is_none());
    }
    assert!(ewma_volatility(&series, 30, DEFAULT_EWMA_LAMBDA).is_none());
    assert!(ewma_volatility(&series, 11, DEFAULT_EWMA_LAMBDA).is_some());
}

#[test]
fn test_estimators_on_ohlc_series() {
    let series = synthetic_series(120);
    for method in VolatilityMethod::ALL {
        for period in [10, 20, 60] {
            let hv = historical_volatility(&series, period, method, true)
                .unwrap_or_else(|| panic!("{method:?} over {period} days"));
            assert!(hv > 0.0 && hv < 2.0, "{method:?} over {period}: {hv}");

            let daily = historical_volatility(&series, period, method, false).unwrap();
            assert!((hv - daily * TRADING_DAYS_PER_YEAR.sqrt()).abs() < 1e-12);
        }
    }
}

#[test]
fn test_custom_annualization() {
    let series = synthetic_series(40);
    let weekly = VolatilityEstimator::new(EstimatorConfig::new().with_trading_days(52.0));
    let daily = historical_volatility(&series, 20, VolatilityMethod::Parkinson, false).unwrap();
    let annual = weekly
        .historical(&series, 20, VolatilityMethod::Parkinson, true)
        .unwrap();
    assert!((annual - daily * 52f64.sqrt()).abs() < 1e-12);
}

#[test]
fn test_ewma_weights_recent_returns() {
    // Calm history followed by a burst of large moves
    let mut closes: Vec<f64> = vec![100.0];
    for i in 1..60 {
        let r: f64 = if i < 50 { 0.002 } else { 0.03 };
        let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
        closes.push(closes[i - 1] * (sign * r).exp());
    }
    let series = PriceSeries::from_closes(start_date(), &closes).unwrap();

    let ewma = ewma_volatility(&series, 59, 0.94).unwrap();
    let hv = historical_volatility(&series, 59, VolatilityMethod::CloseToClose, true).unwrap();
    assert!(ewma > hv, "ewma {ewma} should react faster than equal weighting {hv}");

    let configured = VolatilityEstimator::default().ewma_configured(&series, 59);
    assert_eq!(configured, Some(ewma));
}

#[test]
fn test_estimate_round_trips_through_json() {
    let series = synthetic_series(30);
    let estimate = VolatilityEstimator::default()
        .estimate(&series, 20, VolatilityMethod::YangZhang, true)
        .unwrap();
    let json = serde_json::to_string(&estimate).unwrap();
    assert!(json.contains("\"yang_zhang\""));
    let back: VolatilityEstimate = serde_json::from_str(&json).unwrap();
    assert_eq!(back.method, estimate.method);
    assert_eq!(back.period_days, 20);
    assert!((back.value - estimate.value).abs() < 1e-12);
}

#[test]
fn test_series_rejects_unordered_dates() {
    let series = synthetic_series(5);
    let mut bars = series.bars().to_vec();
    bars.swap(1, 3);
    assert!(matches!(
        PriceSeries::new(bars),
        Err(AnalyticsError::InvalidSeries { index: 2, .. })
    ));
}
