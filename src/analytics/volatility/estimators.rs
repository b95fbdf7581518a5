//! Historical and realized volatility estimators.
//!
//! Every estimator turns a window of daily bars into a per-day volatility and
//! optionally annualizes it by `sqrt(trading_days_per_year)`. Too few bars, or
//! a window in which every bar is degenerate, yields `None`.
//!
//! | Method          | Inputs      | Window (bars)        |
//! |-----------------|-------------|----------------------|
//! | Close-to-close  | C           | `period + 1`         |
//! | Parkinson       | H, L        | `max(period, 2)`     |
//! | Garman-Klass    | O, H, L, C  | `max(period, 2)`     |
//! | Rogers-Satchell | O, H, L, C  | `max(period, 2)`     |
//! | Yang-Zhang      | O, H, L, C  | `period + 1`, ≥ 3    |

use super::series::{PriceBar, PriceSeries};
use crate::analytics::error::AnalyticsError;
use serde::{Deserialize, Serialize};
use std::f64::consts::LN_2;
use tracing::{debug, trace, warn};

/// Trading days used to annualize daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// RiskMetrics decay factor for daily data.
pub const DEFAULT_EWMA_LAMBDA: f64 = 0.94;

/// Volatility estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityMethod {
    /// Standard deviation of close-to-close log returns.
    CloseToClose,
    /// High/low range estimator.
    Parkinson,
    /// OHLC estimator assuming no drift and no opening gap.
    GarmanKlass,
    /// OHLC estimator robust to drift.
    RogersSatchell,
    /// Overnight, open-to-close and Rogers-Satchell terms combined.
    YangZhang,
}

impl VolatilityMethod {
    /// All methods, in declaration order.
    pub const ALL: [VolatilityMethod; 5] = [
        VolatilityMethod::CloseToClose,
        VolatilityMethod::Parkinson,
        VolatilityMethod::GarmanKlass,
        VolatilityMethod::RogersSatchell,
        VolatilityMethod::YangZhang,
    ];

    /// Whether the method needs the previous bar's close.
    #[must_use]
    pub fn is_return_based(&self) -> bool {
        matches!(
            self,
            VolatilityMethod::CloseToClose | VolatilityMethod::YangZhang
        )
    }

    /// Number of trailing bars the method reads for `period_days`.
    #[must_use]
    pub fn window_len(&self, period_days: usize) -> usize {
        if self.is_return_based() {
            period_days + 1
        } else {
            period_days.max(2)
        }
    }
}

/// How close-to-close variance treats the mean return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnMean {
    /// Demeaned sample variance, n−1 divisor.
    #[default]
    Sample,
    /// Mean assumed zero, Σr²/n.
    Zero,
}

/// Estimator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Trading days per year used for annualization.
    pub trading_days_per_year: f64,
    /// Decay factor for [`VolatilityEstimator::ewma`].
    pub ewma_lambda: f64,
    /// Mean treatment for close-to-close variance.
    pub return_mean: ReturnMean,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
            ewma_lambda: DEFAULT_EWMA_LAMBDA,
            return_mean: ReturnMean::Sample,
        }
    }
}

impl EstimatorConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the annualization day count.
    #[must_use]
    pub fn with_trading_days(mut self, trading_days_per_year: f64) -> Self {
        self.trading_days_per_year = trading_days_per_year;
        self
    }

    /// Sets the EWMA decay factor.
    #[must_use]
    pub fn with_ewma_lambda(mut self, ewma_lambda: f64) -> Self {
        self.ewma_lambda = ewma_lambda;
        self
    }

    /// Sets the close-to-close mean treatment.
    #[must_use]
    pub fn with_return_mean(mut self, return_mean: ReturnMean) -> Self {
        self.return_mean = return_mean;
        self
    }

    /// Checks the day count is positive and lambda lies in (0, 1).
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if !(self.trading_days_per_year > 0.0) {
            return Err(AnalyticsError::invalid_config(format!(
                "trading days per year must be positive, got {}",
                self.trading_days_per_year
            )));
        }
        if !is_valid_lambda(self.ewma_lambda) {
            return Err(AnalyticsError::invalid_config(format!(
                "ewma lambda must be in (0, 1), got {}",
                self.ewma_lambda
            )));
        }
        Ok(())
    }
}

/// An estimated volatility tagged with how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityEstimate {
    /// Volatility as a decimal fraction.
    pub value: f64,
    /// Estimator used.
    pub method: VolatilityMethod,
    /// Lookback in trading days.
    pub period_days: usize,
    /// Whether `value` is annualized.
    pub annualized: bool,
}

/// Volatility estimators bound to a configuration.
#[derive(Debug, Clone, Default)]
pub struct VolatilityEstimator {
    config: EstimatorConfig,
}

impl VolatilityEstimator {
    /// Creates an estimator with the given configuration.
    #[must_use]
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimates volatility over the trailing `period_days` of `series`.
    #[must_use]
    pub fn estimate(
        &self,
        series: &PriceSeries,
        period_days: usize,
        method: VolatilityMethod,
        annualize: bool,
    ) -> Option<VolatilityEstimate> {
        if period_days == 0 {
            debug!("{:?}: zero-day period", method);
            return None;
        }

        let required = method.window_len(period_days);
        if series.len() < required {
            debug!(
                "{:?}: {} bars available, {} required",
                method,
                series.len(),
                required
            );
            return None;
        }

        let window = series.tail(required);
        let daily = match method {
            VolatilityMethod::CloseToClose => close_to_close(window, self.config.return_mean),
            VolatilityMethod::Parkinson => parkinson(window),
            VolatilityMethod::GarmanKlass => garman_klass(window),
            VolatilityMethod::RogersSatchell => rogers_satchell(window),
            VolatilityMethod::YangZhang => yang_zhang(window),
        }?;

        let value = if annualize {
            self.annualize(daily)
        } else {
            daily
        };
        trace!("{:?} volatility over {} days: {:.6}", method, period_days, value);

        Some(VolatilityEstimate {
            value,
            method,
            period_days,
            annualized: annualize,
        })
    }

    /// Estimated volatility value only.
    #[must_use]
    pub fn historical(
        &self,
        series: &PriceSeries,
        period_days: usize,
        method: VolatilityMethod,
        annualize: bool,
    ) -> Option<f64> {
        self.estimate(series, period_days, method, annualize)
            .map(|estimate| estimate.value)
    }

    /// Annualized EWMA volatility over the trailing `period_days` returns.
    ///
    /// σ²₀ = r₀², σ²ₜ = λ·σ²ₜ₋₁ + (1−λ)·rₜ²
    #[must_use]
    pub fn ewma(&self, series: &PriceSeries, period_days: usize, lambda: f64) -> Option<f64> {
        if !is_valid_lambda(lambda) {
            warn!("ewma lambda must be in (0, 1), got {}", lambda);
            return None;
        }
        if period_days == 0 || series.len() < period_days + 1 {
            debug!(
                "ewma: {} bars available, {} required",
                series.len(),
                period_days + 1
            );
            return None;
        }

        let closes: Vec<f64> = series
            .tail(period_days + 1)
            .iter()
            .map(|bar| bar.close)
            .collect();
        let returns = log_returns(&closes);
        let (first, rest) = returns.split_first()?;

        let variance = rest
            .iter()
            .fold(first * first, |variance, r| lambda * variance + (1.0 - lambda) * r * r);

        let value = self.annualize(variance.max(0.0).sqrt());
        trace!("ewma volatility over {} days: {:.6}", period_days, value);
        Some(value)
    }

    /// [`Self::ewma`] with the configured decay factor.
    #[must_use]
    pub fn ewma_configured(&self, series: &PriceSeries, period_days: usize) -> Option<f64> {
        self.ewma(series, period_days, self.config.ewma_lambda)
    }

    /// Multiplies a daily volatility by `sqrt(trading_days_per_year)`.
    #[must_use]
    pub fn annualize(&self, daily: f64) -> f64 {
        daily * self.config.trading_days_per_year.sqrt()
    }
}

/// Annualized or daily historical volatility with default settings.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use options_analytics::prelude::*;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let closes = [100.0, 101.0, 99.0, 102.0, 100.5, 103.0];
/// let series = PriceSeries::from_closes(start, &closes).unwrap();
///
/// let hv = historical_volatility(&series, 5, VolatilityMethod::CloseToClose, true);
/// assert!(hv.unwrap() > 0.0);
/// assert!(historical_volatility(&series, 10, VolatilityMethod::CloseToClose, true).is_none());
/// ```
#[must_use]
pub fn historical_volatility(
    series: &PriceSeries,
    period_days: usize,
    method: VolatilityMethod,
    annualize: bool,
) -> Option<f64> {
    VolatilityEstimator::default().historical(series, period_days, method, annualize)
}

/// Annualized EWMA volatility with the default day count.
#[must_use]
pub fn ewma_volatility(series: &PriceSeries, period_days: usize, lambda: f64) -> Option<f64> {
    VolatilityEstimator::default().ewma(series, period_days, lambda)
}

/// Daily close-to-close volatility of a window of bars.
///
/// Needs at least two valid log returns; a return is skipped if either close
/// is non-positive.
#[must_use]
pub fn close_to_close(bars: &[PriceBar], mean: ReturnMean) -> Option<f64> {
    let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
    let returns = log_returns(&closes);

    match mean {
        ReturnMean::Sample => sample_std_dev(&returns),
        ReturnMean::Zero => {
            if returns.len() < 2 {
                return None;
            }
            let mean_square = returns.iter().map(|r| r * r).sum::<f64>() / returns.len() as f64;
            Some(mean_square.sqrt())
        }
    }
}

/// Daily Parkinson volatility.
///
/// σ² = Σ ln(H/L)² / (4·ln2·N) over bars with H ≥ L > 0.
#[must_use]
pub fn parkinson(bars: &[PriceBar]) -> Option<f64> {
    let terms: Vec<f64> = bars
        .iter()
        .filter(|bar| bar.has_valid_range())
        .map(|bar| (bar.high / bar.low).ln().powi(2))
        .collect();

    positive_variance(&terms).map(|mean| (mean / (4.0 * LN_2)).sqrt())
}

/// Daily Garman-Klass volatility.
///
/// σ² = Σ [0.5·ln(H/L)² − (2ln2−1)·ln(C/O)²] / N
#[must_use]
pub fn garman_klass(bars: &[PriceBar]) -> Option<f64> {
    let close_open_weight = 2.0 * LN_2 - 1.0;
    let terms: Vec<f64> = bars
        .iter()
        .filter(|bar| bar.is_valid_ohlc())
        .map(|bar| {
            let range = (bar.high / bar.low).ln();
            let body = (bar.close / bar.open).ln();
            0.5 * range * range - close_open_weight * body * body
        })
        .collect();

    positive_variance(&terms).map(f64::sqrt)
}

/// Daily Rogers-Satchell volatility.
///
/// σ² = Σ [ln(H/C)·ln(H/O) + ln(L/C)·ln(L/O)] / N
#[must_use]
pub fn rogers_satchell(bars: &[PriceBar]) -> Option<f64> {
    let terms: Vec<f64> = bars
        .iter()
        .filter(|bar| bar.is_valid_ohlc())
        .map(rogers_satchell_term)
        .collect();

    positive_variance(&terms).map(f64::sqrt)
}

/// Daily Yang-Zhang volatility.
///
/// σ² = σ²_overnight + k·σ²_open-close + (1−k)·σ²_RS with
/// k = 0.34 / (1.34 + (n+1)/(n−1)), where n counts the bars that have a
/// previous close. Needs at least three bars.
#[must_use]
pub fn yang_zhang(bars: &[PriceBar]) -> Option<f64> {
    let mut overnight = Vec::with_capacity(bars.len());
    let mut open_close = Vec::with_capacity(bars.len());
    let mut rs = Vec::with_capacity(bars.len());

    for pair in bars.windows(2) {
        let (previous, bar) = (&pair[0], &pair[1]);
        if previous.close <= 0.0 || !bar.is_valid_ohlc() {
            continue;
        }
        overnight.push((bar.open / previous.close).ln());
        open_close.push((bar.close / bar.open).ln());
        rs.push(rogers_satchell_term(bar));
    }

    let n = overnight.len();
    if n < 2 {
        return None;
    }

    let overnight_var = sample_variance(&overnight)?;
    let open_close_var = sample_variance(&open_close)?;
    let rs_mean = rs.iter().sum::<f64>() / n as f64;

    let n = n as f64;
    let k = 0.34 / (1.34 + (n + 1.0) / (n - 1.0));
    let variance = overnight_var + k * open_close_var + (1.0 - k) * rs_mean;

    (variance > 0.0).then(|| variance.sqrt())
}

fn rogers_satchell_term(bar: &PriceBar) -> f64 {
    let high_close = (bar.high / bar.close).ln();
    let high_open = (bar.high / bar.open).ln();
    let low_close = (bar.low / bar.close).ln();
    let low_open = (bar.low / bar.open).ln();
    high_close * high_open + low_close * low_open
}

/// Mean of per-bar variance terms, `None` if empty or not positive.
fn positive_variance(terms: &[f64]) -> Option<f64> {
    if terms.is_empty() {
        return None;
    }
    let mean = terms.iter().sum::<f64>() / terms.len() as f64;
    (mean > 0.0).then_some(mean)
}

fn is_valid_lambda(lambda: f64) -> bool {
    lambda > 0.0 && lambda < 1.0
}

/// Log returns of consecutive closes, skipping pairs with a non-positive price.
pub(crate) fn log_returns(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .filter(|pair| pair[0] > 0.0 && pair[1] > 0.0)
        .map(|pair| (pair[1] / pair[0]).ln())
        .collect()
}

/// Arithmetic mean, `None` if empty.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance with n−1 divisor, `None` for fewer than two values.
pub(crate) fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    Some(sum_sq / (values.len() - 1) as f64)
}

/// Sample standard deviation with n−1 divisor.
pub(crate) fn sample_std_dev(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}
