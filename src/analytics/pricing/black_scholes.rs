//! Black-Scholes pricing model and Greeks calculation.
//!
//! Two families of entry points are provided:
//!
//! - strict (`price`, `greeks`, `evaluate`): validate every input and return
//!   [`AnalyticsError`] on out-of-domain terms or volatility;
//! - lenient (`price_lenient`, `greeks_lenient`, `evaluate_lenient`): never
//!   fail, and short-circuit to a zero price with zero Greeks when volatility
//!   or time to expiry is not positive. Chain pricing uses this path so that
//!   expired or zero-vol strikes do not abort the whole chain.

use super::normal::{norm_cdf, norm_pdf};
use super::types::{ContractTerms, Greeks, OptionType, PricingResult};
use crate::analytics::error::AnalyticsError;

/// Largest volatility the strict pricer accepts (1000%).
pub const MAX_VOLATILITY: f64 = 10.0;

/// Calendar days used to quote theta per day.
const DAYS_PER_YEAR: f64 = 365.0;

/// Black-Scholes pricing model implementation.
pub struct BlackScholes;

impl BlackScholes {
    /// Calculates the d1 parameter of the Black-Scholes formula.
    ///
    /// d1 = [ln(S/K) + (r + σ²/2)T] / (σ√T)
    #[must_use]
    pub fn d1(spot: f64, strike: f64, rate: f64, time: f64, vol: f64) -> f64 {
        let sqrt_time = time.sqrt();
        ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * sqrt_time)
    }

    /// Calculates the d2 parameter of the Black-Scholes formula.
    ///
    /// d2 = d1 - σ√T
    #[must_use]
    pub fn d2(d1: f64, vol: f64, time: f64) -> f64 {
        d1 - vol * time.sqrt()
    }

    /// Theoretical option price.
    ///
    /// For calls: C = S·N(d1) - K·e^(-rT)·N(d2)
    /// For puts:  P = K·e^(-rT)·N(-d2) - S·N(-d1)
    ///
    /// # Errors
    /// Returns [`AnalyticsError`] if the terms or the volatility are out of domain.
    pub fn price(terms: &ContractTerms, vol: f64) -> Result<f64, AnalyticsError> {
        validate_inputs(terms, vol)?;
        Ok(Self::price_unchecked(terms, vol))
    }

    /// The five Greeks for validated inputs.
    ///
    /// # Errors
    /// Returns [`AnalyticsError`] if the terms or the volatility are out of domain.
    pub fn greeks(terms: &ContractTerms, vol: f64) -> Result<Greeks, AnalyticsError> {
        validate_inputs(terms, vol)?;
        Ok(Self::greeks_unchecked(terms, vol))
    }

    /// Price and Greeks for validated inputs.
    ///
    /// # Errors
    /// Returns [`AnalyticsError`] if the terms or the volatility are out of domain.
    pub fn evaluate(terms: &ContractTerms, vol: f64) -> Result<PricingResult, AnalyticsError> {
        validate_inputs(terms, vol)?;
        Ok(PricingResult {
            price: Self::price_unchecked(terms, vol),
            greeks: Self::greeks_unchecked(terms, vol),
        })
    }

    /// Price without validation; zero when volatility or time is not positive.
    #[must_use]
    pub fn price_lenient(terms: &ContractTerms, vol: f64) -> f64 {
        if is_degenerate(terms, vol) {
            return 0.0;
        }
        Self::price_unchecked(terms, vol)
    }

    /// Greeks without validation; all zero when volatility or time is not positive.
    #[must_use]
    pub fn greeks_lenient(terms: &ContractTerms, vol: f64) -> Greeks {
        if is_degenerate(terms, vol) {
            return Greeks::default();
        }
        Self::greeks_unchecked(terms, vol)
    }

    /// Price and Greeks without validation.
    #[must_use]
    pub fn evaluate_lenient(terms: &ContractTerms, vol: f64) -> PricingResult {
        if is_degenerate(terms, vol) {
            return PricingResult::default();
        }
        PricingResult {
            price: Self::price_unchecked(terms, vol),
            greeks: Self::greeks_unchecked(terms, vol),
        }
    }

    /// Vega (∂price/∂σ) per unit of volatility, not scaled to vol points.
    ///
    /// This is the derivative the Newton-Raphson step divides by.
    #[must_use]
    pub fn vega_raw(terms: &ContractTerms, vol: f64) -> f64 {
        if is_degenerate(terms, vol) {
            return 0.0;
        }
        let d1 = Self::d1(
            terms.spot,
            terms.strike,
            terms.risk_free_rate,
            terms.time_to_expiry,
            vol,
        );
        terms.spot * norm_pdf(d1) * terms.time_to_expiry.sqrt()
    }

    fn price_unchecked(terms: &ContractTerms, vol: f64) -> f64 {
        let d1 = Self::d1(
            terms.spot,
            terms.strike,
            terms.risk_free_rate,
            terms.time_to_expiry,
            vol,
        );
        let d2 = Self::d2(d1, vol, terms.time_to_expiry);
        let discount = (-terms.risk_free_rate * terms.time_to_expiry).exp();

        match terms.option_type {
            OptionType::Call => terms.spot * norm_cdf(d1) - terms.strike * discount * norm_cdf(d2),
            OptionType::Put => terms.strike * discount * norm_cdf(-d2) - terms.spot * norm_cdf(-d1),
        }
    }

    fn greeks_unchecked(terms: &ContractTerms, vol: f64) -> Greeks {
        let spot = terms.spot;
        let strike = terms.strike;
        let rate = terms.risk_free_rate;
        let time = terms.time_to_expiry;

        let d1 = Self::d1(spot, strike, rate, time, vol);
        let d2 = Self::d2(d1, vol, time);
        let sqrt_time = time.sqrt();
        let discount = (-rate * time).exp();
        let pdf_d1 = norm_pdf(d1);

        let delta = match terms.option_type {
            OptionType::Call => norm_cdf(d1),
            OptionType::Put => norm_cdf(d1) - 1.0,
        };

        let gamma = pdf_d1 / (spot * vol * sqrt_time);

        let decay = -spot * pdf_d1 * vol / (2.0 * sqrt_time);
        let theta_annual = match terms.option_type {
            OptionType::Call => decay - rate * strike * discount * norm_cdf(d2),
            OptionType::Put => decay + rate * strike * discount * norm_cdf(-d2),
        };

        let vega = spot * pdf_d1 * sqrt_time / 100.0;

        let rho = match terms.option_type {
            OptionType::Call => strike * time * discount * norm_cdf(d2) / 100.0,
            OptionType::Put => -strike * time * discount * norm_cdf(-d2) / 100.0,
        };

        Greeks {
            delta,
            gamma,
            theta: theta_annual / DAYS_PER_YEAR,
            vega,
            rho,
        }
    }
}

fn is_degenerate(terms: &ContractTerms, vol: f64) -> bool {
    vol.is_nan() || vol <= 0.0 || terms.time_to_expiry.is_nan() || terms.time_to_expiry <= 0.0
}

fn validate_inputs(terms: &ContractTerms, vol: f64) -> Result<(), AnalyticsError> {
    terms.validate()?;

    if !vol.is_finite() || vol <= 0.0 {
        return Err(AnalyticsError::invalid_params(format!(
            "volatility must be positive, got {vol}"
        )));
    }

    if vol > MAX_VOLATILITY {
        return Err(AnalyticsError::VolatilityOutOfBounds {
            volatility: vol,
            min_bound: 0.0,
            max_bound: MAX_VOLATILITY,
        });
    }

    Ok(())
}
