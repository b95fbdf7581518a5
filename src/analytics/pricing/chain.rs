//! Option chain pricing, volatility smile and skew.

use super::black_scholes::BlackScholes;
use super::solver::ImpliedVolSolver;
use super::types::{ContractTerms, OptionType, PricingResult};
use crate::analytics::error::AnalyticsError;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// One strike of a priced chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainRow {
    /// Strike price.
    pub strike: f64,
    /// Call price and Greeks.
    pub call: PricingResult,
    /// Put price and Greeks.
    pub put: PricingResult,
    /// Spot over strike.
    pub moneyness: f64,
}

/// Prices calls and puts across `strikes` with one volatility.
///
/// Uses the lenient pricer: expired or zero-vol inputs give zero rows
/// instead of failing the chain. Non-positive strikes are skipped.
#[must_use]
pub fn price_chain(
    spot: f64,
    strikes: &[f64],
    time_to_expiry: f64,
    risk_free_rate: f64,
    vol: f64,
) -> Vec<ChainRow> {
    let rows: Vec<ChainRow> = strikes
        .iter()
        .copied()
        .filter(|strike| *strike > 0.0)
        .map(|strike| {
            let call = ContractTerms::call(spot, strike, time_to_expiry, risk_free_rate);
            let put = call.with_option_type(OptionType::Put);
            ChainRow {
                strike,
                call: BlackScholes::evaluate_lenient(&call, vol),
                put: BlackScholes::evaluate_lenient(&put, vol),
                moneyness: spot / strike,
            }
        })
        .collect();

    trace!("priced chain: {} of {} strikes", rows.len(), strikes.len());
    rows
}

/// Observed option price at one strike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Strike price.
    pub strike: f64,
    /// Observed market price.
    pub market_price: f64,
    /// Call or Put.
    pub option_type: OptionType,
}

impl OptionQuote {
    /// Creates a new quote.
    #[must_use]
    pub fn new(strike: f64, market_price: f64, option_type: OptionType) -> Self {
        Self {
            strike,
            market_price,
            option_type,
        }
    }
}

/// Implied volatility at one strike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmilePoint {
    /// Strike price.
    pub strike: f64,
    /// Implied volatility as a decimal fraction.
    pub implied_volatility: f64,
    /// Spot over strike.
    pub moneyness: f64,
    /// Call or Put.
    pub option_type: OptionType,
}

/// Solves implied volatility for each quote with the default solver.
///
/// Quotes that do not converge are dropped.
///
/// # Errors
/// Returns [`AnalyticsError`] if spot, time, rate or any strike is invalid.
pub fn volatility_smile(
    spot: f64,
    quotes: &[OptionQuote],
    time_to_expiry: f64,
    risk_free_rate: f64,
) -> Result<Vec<SmilePoint>, AnalyticsError> {
    volatility_smile_with(
        &ImpliedVolSolver::default(),
        spot,
        quotes,
        time_to_expiry,
        risk_free_rate,
    )
}

/// [`volatility_smile`] with an explicit solver.
///
/// # Errors
/// Returns [`AnalyticsError`] if spot, time, rate or any strike is invalid.
pub fn volatility_smile_with(
    solver: &ImpliedVolSolver,
    spot: f64,
    quotes: &[OptionQuote],
    time_to_expiry: f64,
    risk_free_rate: f64,
) -> Result<Vec<SmilePoint>, AnalyticsError> {
    let mut smile = Vec::with_capacity(quotes.len());

    for quote in quotes {
        let terms = ContractTerms::new(
            spot,
            quote.strike,
            time_to_expiry,
            risk_free_rate,
            quote.option_type,
        );

        match solver.solve(quote.market_price, &terms)? {
            Some(solution) => smile.push(SmilePoint {
                strike: quote.strike,
                implied_volatility: solution.iv,
                moneyness: terms.moneyness(),
                option_type: quote.option_type,
            }),
            None => debug!(
                "no implied volatility for {:?} strike {} at price {}",
                quote.option_type, quote.strike, quote.market_price
            ),
        }
    }

    Ok(smile)
}

/// OTM put minus OTM call implied volatility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilitySkew {
    /// Spot the OTM split was made at.
    pub spot: f64,
    /// Mean IV of calls struck above spot.
    pub otm_call_iv: f64,
    /// Mean IV of puts struck below spot.
    pub otm_put_iv: f64,
    /// `otm_put_iv - otm_call_iv`.
    pub skew: f64,
    /// Skew relative to the OTM call IV, in percent.
    pub skew_percentage: f64,
}

/// Measures the put/call skew of a smile.
///
/// Returns `None` unless both OTM sides have at least one point.
#[must_use]
pub fn volatility_skew(spot: f64, smile: &[SmilePoint]) -> Option<VolatilitySkew> {
    let otm_call_iv = mean_iv(smile.iter().filter(|point| {
        point.option_type == OptionType::Call && point.strike > spot
    }))?;
    let otm_put_iv = mean_iv(smile.iter().filter(|point| {
        point.option_type == OptionType::Put && point.strike < spot
    }))?;

    let skew = otm_put_iv - otm_call_iv;
    Some(VolatilitySkew {
        spot,
        otm_call_iv,
        otm_put_iv,
        skew,
        skew_percentage: skew / otm_call_iv * 100.0,
    })
}

fn mean_iv<'a>(points: impl Iterator<Item = &'a SmilePoint>) -> Option<f64> {
    let (sum, count) = points.fold((0.0, 0usize), |(sum, count), point| {
        (sum + point.implied_volatility, count + 1)
    });
    (count > 0).then(|| sum / count as f64)
}
