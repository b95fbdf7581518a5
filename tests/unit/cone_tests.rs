use crate::common::{constant_return_closes, start_date, synthetic_series};
use options_analytics::prelude::*;

#[test]
fn test_default_cone_is_ordered() {
    let series = synthetic_series(DEFAULT_LOOKBACK_DAYS + 253);
    let cone = volatility_cone(&series, &DEFAULT_CONE_WINDOWS, DEFAULT_LOOKBACK_DAYS);

    assert_eq!(cone.len(), DEFAULT_CONE_WINDOWS.len());
    for band in &cone {
        assert!(band.is_ordered(), "window {}: {:?}", band.window, band.levels());
        assert!(band.current >= band.min && band.current <= band.max);
        assert_eq!(band.sample_count, DEFAULT_LOOKBACK_DAYS);
    }

    let windows: Vec<usize> = cone.iter().map(|band| band.window).collect();
    assert_eq!(windows, DEFAULT_CONE_WINDOWS.to_vec());
}

#[test]
fn test_cone_skips_windows_lacking_history() {
    let series = synthetic_series(300);
    // 300 bars with a 252 lookback only cover windows up to 47 days
    let cone = volatility_cone(&series, &DEFAULT_CONE_WINDOWS, 252);
    let windows: Vec<usize> = cone.iter().map(|band| band.window).collect();
    assert_eq!(windows, vec![10, 20, 30]);

    assert!(volatility_cone(&PriceSeries::default(), &[10], 20).is_empty());
}

#[test]
fn test_current_matches_latest_historical_volatility() {
    let series = synthetic_series(120);
    let cone = volatility_cone(&series, &[20], 60);
    let latest = historical_volatility(&series, 20, VolatilityMethod::CloseToClose, true).unwrap();
    assert!((cone[0].current - latest).abs() < 1e-12);
}

#[test]
fn test_constant_return_cone_collapses() {
    let closes = constant_return_closes(120, 0.004);
    let series = PriceSeries::from_closes(start_date(), &closes).unwrap();
    let cone = volatility_cone(&series, &[10, 30], 60);
    assert_eq!(cone.len(), 2);
    for band in cone {
        assert!(band.max < 1e-10);
        assert!(band.std_dev < 1e-10);
    }
}

#[test]
fn test_builder_min_samples() {
    let series = synthetic_series(60);
    let strict = ConeBuilder::new(
        ConeConfig::new()
            .with_windows(&[10])
            .with_lookback_days(20)
            .with_min_samples(25),
    );
    assert!(strict.build(&series).is_empty());

    let relaxed = ConeBuilder::new(
        ConeConfig::new()
            .with_windows(&[10])
            .with_lookback_days(20)
            .with_min_samples(20),
    );
    let bands = relaxed.build(&series);
    assert_eq!(bands.len(), 1);
    assert_eq!(bands[0].sample_count, 20);
}

#[test]
fn test_band_serializes_window() {
    let series = synthetic_series(80);
    let band = volatility_cone(&series, &[10], 30)[0];
    let json = serde_json::to_value(band).unwrap();
    assert_eq!(json["window"], 10);
    assert_eq!(json["sample_count"], 30);
    assert!(json["p90"].as_f64().unwrap() >= json["p10"].as_f64().unwrap());
}
