//! Options analytics: pricing, implied volatility and historical volatility.

pub mod config;
pub mod error;
pub mod pricing;
pub mod volatility;

pub use config::{AnalyticsConfig, DEFAULT_RISK_FREE_RATE};
pub use error::AnalyticsError;
