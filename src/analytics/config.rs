//! Top-level settings for pricing, solving and volatility estimation.

use super::error::AnalyticsError;
use super::pricing::SolverConfig;
use super::volatility::{ConeConfig, EstimatorConfig};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Risk-free rate used when none is supplied.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.015;

/// Settings for the whole analytics core.
///
/// Every field has a default, so a JSON document only needs the values it
/// overrides:
///
/// ```
/// use options_analytics::prelude::*;
///
/// let config = AnalyticsConfig::from_json(r#"{"risk_free_rate": 0.02, "cone": {"lookback_days": 126}}"#).unwrap();
/// assert_eq!(config.risk_free_rate, 0.02);
/// assert_eq!(config.cone.lookback_days, 126);
/// assert_eq!(config.solver.max_iterations, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Annualized risk-free rate as a decimal fraction.
    pub risk_free_rate: f64,
    /// Implied volatility solver settings.
    pub solver: SolverConfig,
    /// Historical volatility settings.
    pub estimator: EstimatorConfig,
    /// Volatility cone settings.
    pub cone: ConeConfig,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            solver: SolverConfig::default(),
            estimator: EstimatorConfig::default(),
            cone: ConeConfig::default(),
        }
    }
}

impl AnalyticsConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    /// Sets the solver settings.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Sets the estimator settings.
    #[must_use]
    pub fn with_estimator(mut self, estimator: EstimatorConfig) -> Self {
        self.estimator = estimator;
        self
    }

    /// Sets the cone settings.
    #[must_use]
    pub fn with_cone(mut self, cone: ConeConfig) -> Self {
        self.cone = cone;
        self
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    /// [`AnalyticsError::InvalidConfig`] if the document does not parse or a
    /// value is out of range.
    pub fn from_json(json: &str) -> Result<Self, AnalyticsError> {
        let config: Self =
            serde_json::from_str(json).map_err(|error| AnalyticsError::InvalidConfig {
                message: error.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every section.
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if !(0.0..=1.0).contains(&self.risk_free_rate) {
            warn!("rejected risk-free rate {}", self.risk_free_rate);
            return Err(AnalyticsError::invalid_config(format!(
                "risk-free rate must be in [0, 1], got {}",
                self.risk_free_rate
            )));
        }
        self.solver.validate()?;
        self.estimator.validate()?;
        self.cone.validate()
    }
}
