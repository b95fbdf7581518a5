//! Daily OHLCV bars and validated price series.

use crate::analytics::error::AnalyticsError;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// One trading day's prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading date.
    pub date: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
}

impl PriceBar {
    /// Creates a new bar.
    #[must_use]
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// A bar whose open, high, low and close are all `price`.
    #[must_use]
    pub fn flat(date: NaiveDate, price: f64) -> Self {
        Self::new(date, price, price, price, price, 0.0)
    }

    /// High ≥ low > 0.
    #[must_use]
    pub fn has_valid_range(&self) -> bool {
        self.low > 0.0 && self.high >= self.low
    }

    /// Valid range and positive open and close.
    #[must_use]
    pub fn is_valid_ohlc(&self) -> bool {
        self.has_valid_range() && self.open > 0.0 && self.close > 0.0
    }
}

/// Bars ordered oldest to newest, strictly increasing in date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Builds a series, rejecting duplicate or out-of-order dates.
    ///
    /// # Errors
    /// [`AnalyticsError::InvalidSeries`] naming the first offending bar.
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, AnalyticsError> {
        if let Some(index) = bars
            .windows(2)
            .position(|pair| pair[1].date <= pair[0].date)
        {
            let (previous, current) = (bars[index].date, bars[index + 1].date);
            let message = if previous == current {
                format!("duplicate date {current}")
            } else {
                format!("date {current} precedes {previous}")
            };
            return Err(AnalyticsError::InvalidSeries {
                index: index + 1,
                message,
            });
        }

        Ok(Self { bars })
    }

    /// Builds a series of flat bars on consecutive calendar days.
    ///
    /// # Errors
    /// [`AnalyticsError::InvalidSeries`] if the dates run past the calendar range.
    pub fn from_closes(start: NaiveDate, closes: &[f64]) -> Result<Self, AnalyticsError> {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(index, &close)| {
                start
                    .checked_add_days(Days::new(index as u64))
                    .map(|date| PriceBar::flat(date, close))
                    .ok_or_else(|| AnalyticsError::InvalidSeries {
                        index,
                        message: "date out of range".to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(bars)
    }

    /// All bars, oldest first.
    #[must_use]
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// The most recent `count` bars, or all of them if the series is shorter.
    #[must_use]
    pub fn tail(&self, count: usize) -> &[PriceBar] {
        &self.bars[self.bars.len().saturating_sub(count)..]
    }

    /// Closing prices, oldest first.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// True if the series holds no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Date of the newest bar.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|bar| bar.date)
    }
}

impl TryFrom<Vec<PriceBar>> for PriceSeries {
    type Error = AnalyticsError;

    fn try_from(bars: Vec<PriceBar>) -> Result<Self, Self::Error> {
        Self::new(bars)
    }
}

impl<'de> Deserialize<'de> for PriceSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bars = Vec::<PriceBar>::deserialize(deserializer)?;
        Self::new(bars).map_err(serde::de::Error::custom)
    }
}
