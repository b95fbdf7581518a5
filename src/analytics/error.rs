//! Error types for the analytics core.

use std::fmt;

/// Validation failures raised by the pricing, solver and series layers.
///
/// Routine "no result" outcomes (solver non-convergence, too few bars,
/// degenerate bars) are not errors; those surface as `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Invalid input parameters (non-positive spot/strike/time, rate out of range, ...).
    InvalidParams {
        /// Description of the invalid parameter.
        message: String,
    },

    /// Volatility is outside the range the pricer accepts.
    VolatilityOutOfBounds {
        /// Supplied volatility.
        volatility: f64,
        /// Minimum bound (exclusive).
        min_bound: f64,
        /// Maximum bound (inclusive).
        max_bound: f64,
    },

    /// Price series is not strictly increasing in date.
    InvalidSeries {
        /// Index of the first offending bar.
        index: usize,
        /// Description of the violation.
        message: String,
    },

    /// Configuration value outside its domain.
    InvalidConfig {
        /// Description of the invalid setting.
        message: String,
    },
}

impl AnalyticsError {
    pub(crate) fn invalid_params(message: impl Into<String>) -> Self {
        AnalyticsError::InvalidParams {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        AnalyticsError::InvalidConfig {
            message: message.into(),
        }
    }
}

impl fmt::Display for AnalyticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyticsError::InvalidParams { message } => {
                write!(f, "invalid parameters: {message}")
            }
            AnalyticsError::VolatilityOutOfBounds {
                volatility,
                min_bound,
                max_bound,
            } => {
                write!(
                    f,
                    "volatility {volatility:.4} is outside bounds ({min_bound:.4}, {max_bound:.4}]"
                )
            }
            AnalyticsError::InvalidSeries { index, message } => {
                write!(f, "invalid price series at bar {index}: {message}")
            }
            AnalyticsError::InvalidConfig { message } => {
                write!(f, "invalid configuration: {message}")
            }
        }
    }
}

impl std::error::Error for AnalyticsError {}
