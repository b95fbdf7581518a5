//! Implied volatility level, HV/IV spread and per-period volatility snapshots.

use super::estimators::{VolatilityEstimator, VolatilityMethod};
use super::series::PriceSeries;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// Upper bound of the low implied volatility regime.
pub const LOW_IV_CEILING: f64 = 0.15;

/// Upper bound of the medium implied volatility regime.
pub const MEDIUM_IV_CEILING: f64 = 0.25;

/// Spread above which implied volatility is rich to realized.
pub const DEFAULT_OVERVALUED_THRESHOLD: f64 = 0.05;

/// Spread below which implied volatility is cheap to realized.
pub const DEFAULT_UNDERVALUED_THRESHOLD: f64 = -0.05;

/// Lookbacks reported by [`volatility_snapshots`] by default.
pub const DEFAULT_SNAPSHOT_PERIODS: [usize; 6] = [10, 20, 30, 60, 90, 120];

/// Implied volatility regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IvLevel {
    /// Below 15%.
    Low,
    /// 15% up to 25%.
    Medium,
    /// 25% and above.
    High,
}

impl IvLevel {
    /// Buckets a decimal implied volatility.
    #[must_use]
    pub fn classify(iv: f64) -> Self {
        if iv < LOW_IV_CEILING {
            IvLevel::Low
        } else if iv < MEDIUM_IV_CEILING {
            IvLevel::Medium
        } else {
            IvLevel::High
        }
    }
}

impl fmt::Display for IvLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IvLevel::Low => write!(f, "low"),
            IvLevel::Medium => write!(f, "medium"),
            IvLevel::High => write!(f, "high"),
        }
    }
}

/// How implied volatility is priced against realized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpreadSignal {
    /// Implied above realized by more than the threshold.
    Overvalued,
    /// Implied below realized by more than the threshold.
    Undervalued,
    /// Within the thresholds.
    Fair,
}

/// Historical against implied volatility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilitySpread {
    /// Historical volatility.
    pub historical: f64,
    /// Implied volatility.
    pub implied: f64,
}

impl VolatilitySpread {
    /// Creates a new spread.
    #[must_use]
    pub fn new(historical: f64, implied: f64) -> Self {
        Self {
            historical,
            implied,
        }
    }

    /// `implied - historical`.
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.implied - self.historical
    }

    /// Spread strictly above `threshold`.
    #[must_use]
    pub fn is_iv_overvalued(&self, threshold: f64) -> bool {
        self.spread() > threshold
    }

    /// Spread strictly below `threshold`.
    #[must_use]
    pub fn is_iv_undervalued(&self, threshold: f64) -> bool {
        self.spread() < threshold
    }

    /// Signal under the default thresholds.
    #[must_use]
    pub fn signal(&self) -> SpreadSignal {
        if self.is_iv_overvalued(DEFAULT_OVERVALUED_THRESHOLD) {
            SpreadSignal::Overvalued
        } else if self.is_iv_undervalued(DEFAULT_UNDERVALUED_THRESHOLD) {
            SpreadSignal::Undervalued
        } else {
            SpreadSignal::Fair
        }
    }
}

/// Historical and realized volatility over one lookback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilitySnapshot {
    /// Lookback in trading days.
    pub period_days: usize,
    /// Annualized close-to-close volatility.
    pub historical: f64,
    /// Annualized Parkinson volatility, if the bars carry a usable range.
    pub realized: Option<f64>,
}

/// One snapshot per period with the default estimator settings.
#[must_use]
pub fn volatility_snapshots(series: &PriceSeries, periods: &[usize]) -> Vec<VolatilitySnapshot> {
    snapshots_with(&VolatilityEstimator::default(), series, periods)
}

/// [`volatility_snapshots`] with an explicit estimator.
///
/// Periods without enough history for close-to-close volatility are omitted.
#[must_use]
pub fn snapshots_with(
    estimator: &VolatilityEstimator,
    series: &PriceSeries,
    periods: &[usize],
) -> Vec<VolatilitySnapshot> {
    periods
        .iter()
        .filter_map(|&period_days| {
            let Some(historical) =
                estimator.historical(series, period_days, VolatilityMethod::CloseToClose, true)
            else {
                debug!("snapshot {}d omitted: no historical volatility", period_days);
                return None;
            };
            let realized = estimator.historical(series, period_days, VolatilityMethod::Parkinson, true);

            let snapshot = VolatilitySnapshot {
                period_days,
                historical,
                realized,
            };
            trace!("snapshot: {:?}", snapshot);
            Some(snapshot)
        })
        .collect()
}
