//! Value types for option pricing.

use crate::analytics::error::AnalyticsError;
use serde::{Deserialize, Serialize};

/// Option kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Call option (right to buy the underlying at strike price).
    Call,
    /// Put option (right to sell the underlying at strike price).
    Put,
}

/// Terms of a European option contract plus the market rate it is priced with.
///
/// Volatility is not part of the terms: the pricer takes it as an input and
/// the solver produces it as an output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContractTerms {
    /// Underlying spot price in price units.
    pub spot: f64,
    /// Option strike price in price units.
    pub strike: f64,
    /// Time to expiration in years (e.g., 30 days = 30.0 / 365.0).
    pub time_to_expiry: f64,
    /// Risk-free interest rate (annualized, e.g., 0.015 for 1.5%).
    pub risk_free_rate: f64,
    /// Call or Put.
    pub option_type: OptionType,
}

impl ContractTerms {
    /// Creates new contract terms.
    #[must_use]
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            option_type,
        }
    }

    /// Creates terms for a call option.
    #[must_use]
    pub fn call(spot: f64, strike: f64, time_to_expiry: f64, risk_free_rate: f64) -> Self {
        Self::new(
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            OptionType::Call,
        )
    }

    /// Creates terms for a put option.
    #[must_use]
    pub fn put(spot: f64, strike: f64, time_to_expiry: f64, risk_free_rate: f64) -> Self {
        Self::new(
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            OptionType::Put,
        )
    }

    /// Same contract with a different option type.
    #[must_use]
    pub fn with_option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    /// Checks spot, strike and time are positive and finite, and the rate lies in [0, 1].
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if !self.spot.is_finite() || self.spot <= 0.0 {
            return Err(AnalyticsError::invalid_params(format!(
                "spot price must be positive, got {}",
                self.spot
            )));
        }

        if !self.strike.is_finite() || self.strike <= 0.0 {
            return Err(AnalyticsError::invalid_params(format!(
                "strike price must be positive, got {}",
                self.strike
            )));
        }

        if !self.time_to_expiry.is_finite() || self.time_to_expiry <= 0.0 {
            return Err(AnalyticsError::invalid_params(format!(
                "time to expiry must be positive, got {}",
                self.time_to_expiry
            )));
        }

        if !(0.0..=1.0).contains(&self.risk_free_rate) {
            return Err(AnalyticsError::invalid_params(format!(
                "risk-free rate must be in [0, 1], got {}",
                self.risk_free_rate
            )));
        }

        Ok(())
    }

    /// Calculates the intrinsic value of the option.
    ///
    /// For calls: max(0, spot - strike)
    /// For puts: max(0, strike - spot)
    #[must_use]
    pub fn intrinsic_value(&self) -> f64 {
        match self.option_type {
            OptionType::Call => (self.spot - self.strike).max(0.0),
            OptionType::Put => (self.strike - self.spot).max(0.0),
        }
    }

    /// Spot over strike.
    #[must_use]
    pub fn moneyness(&self) -> f64 {
        self.spot / self.strike
    }

    /// Returns true if the option is in-the-money.
    #[must_use]
    pub fn is_itm(&self) -> bool {
        self.intrinsic_value() > 0.0
    }

    /// Returns true if the option is at-the-money (within 0.1% of strike).
    #[must_use]
    pub fn is_atm(&self) -> bool {
        (self.spot - self.strike).abs() / self.strike < 0.001
    }

    /// Returns true if the option is out-of-the-money.
    #[must_use]
    pub fn is_otm(&self) -> bool {
        !self.is_itm() && !self.is_atm()
    }
}

/// Option sensitivities.
///
/// Theta is per calendar day; vega and rho are per one percentage point move
/// in volatility and rate respectively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// ∂price/∂S.
    pub delta: f64,
    /// ∂²price/∂S².
    pub gamma: f64,
    /// Daily time decay.
    pub theta: f64,
    /// Price change for a 1 vol-point move.
    pub vega: f64,
    /// Price change for a 1 rate-point move.
    pub rho: f64,
}

/// Theoretical price together with its Greeks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Theoretical option price.
    pub price: f64,
    /// Sensitivities at the same inputs.
    pub greeks: Greeks,
}
