//! Volatility cone: distribution of rolling historical volatility per window length.

use super::estimators::{TRADING_DAYS_PER_YEAR, log_returns, mean, sample_std_dev};
use super::series::PriceSeries;
use crate::analytics::error::AnalyticsError;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Window lengths (trading days) the cone is built over by default.
pub const DEFAULT_CONE_WINDOWS: [usize; 8] = [10, 20, 30, 60, 90, 120, 180, 252];

/// Default number of roll positions per window.
pub const DEFAULT_LOOKBACK_DAYS: usize = 252;

/// Fewest rolled samples a band is emitted with.
pub const MIN_CONE_SAMPLES: usize = 10;

/// Cone settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConeConfig {
    /// Window lengths in trading days.
    pub window_lengths: Vec<usize>,
    /// Number of trailing roll positions.
    pub lookback_days: usize,
    /// Minimum rolled samples per band.
    pub min_samples: usize,
    /// Trading days per year used for annualization.
    pub trading_days_per_year: f64,
}

impl Default for ConeConfig {
    fn default() -> Self {
        Self {
            window_lengths: DEFAULT_CONE_WINDOWS.to_vec(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            min_samples: MIN_CONE_SAMPLES,
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}

impl ConeConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window lengths.
    #[must_use]
    pub fn with_windows(mut self, window_lengths: &[usize]) -> Self {
        self.window_lengths = window_lengths.to_vec();
        self
    }

    /// Sets the number of roll positions.
    #[must_use]
    pub fn with_lookback_days(mut self, lookback_days: usize) -> Self {
        self.lookback_days = lookback_days;
        self
    }

    /// Sets the minimum sample count.
    #[must_use]
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    /// Checks windows and lookback are usable.
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if self.window_lengths.iter().any(|&window| window < 2) {
            return Err(AnalyticsError::invalid_config(format!(
                "cone windows must span at least 2 days, got {:?}",
                self.window_lengths
            )));
        }
        if self.lookback_days == 0 {
            return Err(AnalyticsError::invalid_config("cone lookback must be positive"));
        }
        if !(self.trading_days_per_year > 0.0) {
            return Err(AnalyticsError::invalid_config(format!(
                "trading days per year must be positive, got {}",
                self.trading_days_per_year
            )));
        }
        Ok(())
    }
}

/// Distribution of rolled volatility for one window length.
///
/// `min ≤ p10 ≤ p25 ≤ median ≤ p75 ≤ p90 ≤ max` always holds, and `current`
/// lies within `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConeBand {
    /// Window length in trading days.
    pub window: usize,
    /// Volatility at the most recent roll position.
    pub current: f64,
    /// Smallest rolled value.
    pub min: f64,
    /// 10th percentile.
    pub p10: f64,
    /// 25th percentile.
    pub p25: f64,
    /// 50th percentile.
    pub median: f64,
    /// 75th percentile.
    pub p75: f64,
    /// 90th percentile.
    pub p90: f64,
    /// Largest rolled value.
    pub max: f64,
    /// Mean of rolled values.
    pub mean: f64,
    /// Sample standard deviation of rolled values.
    pub std_dev: f64,
    /// Number of rolled values.
    pub sample_count: usize,
}

impl ConeBand {
    /// Percentile fields in ascending order, bracketed by min and max.
    #[must_use]
    pub fn levels(&self) -> [f64; 7] {
        [
            self.min,
            self.p10,
            self.p25,
            self.median,
            self.p75,
            self.p90,
            self.max,
        ]
    }

    /// True if every level is at least the previous one.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.levels().windows(2).all(|pair| pair[0] <= pair[1])
    }
}

/// Builds volatility cones from a price series.
#[derive(Debug, Clone, Default)]
pub struct ConeBuilder {
    config: ConeConfig,
}

impl ConeBuilder {
    /// Creates a builder with the given configuration.
    #[must_use]
    pub fn new(config: ConeConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ConeConfig {
        &self.config
    }

    /// One band per configured window that has enough history.
    #[must_use]
    pub fn build(&self, series: &PriceSeries) -> Vec<ConeBand> {
        let closes = series.closes();
        self.config
            .window_lengths
            .iter()
            .filter_map(|&window| self.band(&closes, window))
            .collect()
    }

    /// Rolls a `window`-day close-to-close volatility over the trailing
    /// `lookback_days` positions of `closes` and summarizes the samples.
    fn band(&self, closes: &[f64], window: usize) -> Option<ConeBand> {
        let lookback = self.config.lookback_days;
        let required = lookback + window + 1;
        if closes.len() < required {
            debug!(
                "cone window {}: {} closes available, {} required",
                window,
                closes.len(),
                required
            );
            return None;
        }

        let annualization = self.config.trading_days_per_year.sqrt();
        let first_end = closes.len() - lookback;

        let samples: Vec<f64> = (first_end..closes.len())
            .filter_map(|end| {
                let returns = log_returns(&closes[end - window..=end]);
                sample_std_dev(&returns).map(|daily| daily * annualization)
            })
            .collect();

        // Positional order is lost once sorted
        let current = *samples.last()?;

        if samples.len() < self.config.min_samples {
            debug!(
                "cone window {}: {} samples, {} required",
                window,
                samples.len(),
                self.config.min_samples
            );
            return None;
        }

        let mut sorted = samples.clone();
        sorted.sort_by(f64::total_cmp);

        let band = ConeBand {
            window,
            current,
            min: sorted[0],
            p10: nearest_rank(&sorted, 0.10),
            p25: nearest_rank(&sorted, 0.25),
            median: nearest_rank(&sorted, 0.50),
            p75: nearest_rank(&sorted, 0.75),
            p90: nearest_rank(&sorted, 0.90),
            max: sorted[sorted.len() - 1],
            mean: mean(&samples)?,
            std_dev: sample_std_dev(&samples)?,
            sample_count: samples.len(),
        };
        trace!("cone band: {:?}", band);
        Some(band)
    }
}

/// Value at index `floor(count × percentile)` of an ascending, non-empty slice.
fn nearest_rank(sorted: &[f64], percentile: f64) -> f64 {
    let index = (sorted.len() as f64 * percentile).floor() as usize;
    sorted[index.min(sorted.len() - 1)]
}

/// Volatility cone over `window_lengths` with `lookback_days` roll positions.
#[must_use]
pub fn volatility_cone(
    series: &PriceSeries,
    window_lengths: &[usize],
    lookback_days: usize,
) -> Vec<ConeBand> {
    let config = ConeConfig::default()
        .with_windows(window_lengths)
        .with_lookback_days(lookback_days);
    ConeBuilder::new(config).build(series)
}
