//! Historical volatility from daily OHLC bars.
//!
//! # Overview
//!
//! A [`PriceSeries`] holds bars oldest to newest with strictly increasing
//! dates. Estimators read the trailing window of the series for a given
//! lookback and return `None` when the window is too short or carries no
//! usable range, never an error.
//!
//! The [`ConeBuilder`] rolls close-to-close volatility over the recent history
//! for several window lengths and reports where the current reading sits in
//! each distribution.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use options_analytics::prelude::*;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.8).sin()).collect();
//! let series = PriceSeries::from_closes(start, &closes).unwrap();
//!
//! let cone = volatility_cone(&series, &[10, 20], 30);
//! assert_eq!(cone.len(), 2);
//! assert!(cone.iter().all(|band| band.is_ordered()));
//! ```

mod cone;
mod estimators;
mod series;
mod signals;

pub use cone::{
    ConeBand, ConeBuilder, ConeConfig, DEFAULT_CONE_WINDOWS, DEFAULT_LOOKBACK_DAYS,
    MIN_CONE_SAMPLES, volatility_cone,
};
pub use estimators::{
    DEFAULT_EWMA_LAMBDA, EstimatorConfig, ReturnMean, TRADING_DAYS_PER_YEAR, VolatilityEstimate,
    VolatilityEstimator, VolatilityMethod, close_to_close, ewma_volatility, garman_klass,
    historical_volatility, parkinson, rogers_satchell, yang_zhang,
};
pub use series::{PriceBar, PriceSeries};
pub use signals::{
    DEFAULT_OVERVALUED_THRESHOLD, DEFAULT_SNAPSHOT_PERIODS, DEFAULT_UNDERVALUED_THRESHOLD,
    IvLevel, LOW_IV_CEILING, MEDIUM_IV_CEILING, SpreadSignal, VolatilitySnapshot,
    VolatilitySpread, snapshots_with, volatility_snapshots,
};
