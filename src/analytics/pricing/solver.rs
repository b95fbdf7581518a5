//! Newton-Raphson solver with bisection fallback for implied volatility.
//!
//! The solver inverts [`BlackScholes`] against an observed market price.
//! Failing to converge is an expected outcome and is reported as `None`;
//! only out-of-domain contract terms are errors.

use super::black_scholes::BlackScholes;
use super::types::ContractTerms;
use crate::analytics::error::AnalyticsError;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// Configuration for the implied volatility solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Iteration budget for each phase (Newton, then bisection).
    pub max_iterations: u32,
    /// Convergence tolerance on the absolute price difference.
    pub tolerance: f64,
    /// Starting volatility for Newton-Raphson (default: 0.30 = 30%).
    pub initial_guess: f64,
    /// Value a non-positive Newton step is reset to.
    pub newton_floor: f64,
    /// Ceiling applied after each Newton step.
    pub newton_cap: f64,
    /// Lower end of the bisection bracket.
    pub bisection_low: f64,
    /// Upper end of the bisection bracket.
    pub bisection_high: f64,
    /// Exclusive range an unconverged bisection midpoint must fall in to be returned.
    pub plausible_range: (f64, f64),
    /// Minimum vega below which Newton-Raphson gives up.
    pub min_vega: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-4,
            initial_guess: 0.30,
            newton_floor: 0.01,
            newton_cap: 5.0,
            bisection_low: 0.001,
            bisection_high: 5.0,
            plausible_range: (0.01, 3.0),
            min_vega: 1e-10,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of iterations per phase.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the initial IV guess.
    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// Sets the bisection bracket.
    #[must_use]
    pub fn with_bracket(mut self, low: f64, high: f64) -> Self {
        self.bisection_low = low;
        self.bisection_high = high;
        self
    }

    /// Checks that bounds are ordered and positive.
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if self.max_iterations == 0 {
            return Err(AnalyticsError::invalid_config(
                "solver max_iterations must be at least 1",
            ));
        }
        if !(self.tolerance > 0.0) {
            return Err(AnalyticsError::invalid_config(format!(
                "solver tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if !(self.bisection_low > 0.0 && self.bisection_low < self.bisection_high) {
            return Err(AnalyticsError::invalid_config(format!(
                "bisection bracket [{}, {}] is not a positive increasing interval",
                self.bisection_low, self.bisection_high
            )));
        }
        if !(self.newton_floor > 0.0 && self.newton_floor < self.newton_cap) {
            return Err(AnalyticsError::invalid_config(format!(
                "newton bounds [{}, {}] are not a positive increasing interval",
                self.newton_floor, self.newton_cap
            )));
        }
        Ok(())
    }
}

/// Phase of the solver that produced the volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverPhase {
    /// Newton-Raphson reached the price tolerance.
    Newton,
    /// Bisection reached the price tolerance.
    Bisection,
    /// Bisection ran out of iterations; the bracket midpoint was plausible.
    BisectionFallback,
}

/// A solved implied volatility with solver diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IvSolution {
    /// Implied volatility as a decimal fraction (0.25 = 25%).
    pub iv: f64,
    /// Total iterations spent across phases.
    pub iterations: u32,
    /// Phase that produced `iv`.
    pub phase: SolverPhase,
}

impl IvSolution {
    /// Returns the IV as a percentage (e.g., 25.0 for 25%).
    #[must_use]
    pub fn iv_percent(&self) -> f64 {
        self.iv * 100.0
    }
}

/// Implied volatility solver bound to a configuration.
#[derive(Debug, Clone, Default)]
pub struct ImpliedVolSolver {
    config: SolverConfig,
}

impl ImpliedVolSolver {
    /// Creates a solver with the given configuration.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves for the volatility that reprices `market_price`.
    ///
    /// σ_{n+1} = σ_n - (BS(σ_n) - market_price) / vega(σ_n), falling back to
    /// bisection on the configured bracket when Newton does not converge.
    ///
    /// # Returns
    /// - `Ok(Some(solution))` on convergence
    /// - `Ok(None)` if the price is below intrinsic or neither phase converges
    /// - `Err(AnalyticsError)` if the terms are invalid or the price is not finite
    pub fn solve(
        &self,
        market_price: f64,
        terms: &ContractTerms,
    ) -> Result<Option<IvSolution>, AnalyticsError> {
        terms.validate()?;

        if !market_price.is_finite() {
            return Err(AnalyticsError::invalid_params(format!(
                "market price must be finite, got {market_price}"
            )));
        }

        let intrinsic = terms.intrinsic_value();
        if market_price < intrinsic {
            trace!(
                "price {:.4} below intrinsic {:.4}, no implied volatility",
                market_price, intrinsic
            );
            return Ok(None);
        }

        let (newton, newton_iterations) = self.newton(market_price, terms);
        if let Some(iv) = newton {
            return Ok(Some(IvSolution {
                iv,
                iterations: newton_iterations,
                phase: SolverPhase::Newton,
            }));
        }

        let solution = self.bisection(market_price, terms).map(|mut solution| {
            solution.iterations += newton_iterations;
            solution
        });

        if solution.is_none() {
            warn!(
                "implied volatility did not converge: price {:.4}, spot {}, strike {}, expiry {:.4}",
                market_price, terms.spot, terms.strike, terms.time_to_expiry
            );
        }

        Ok(solution)
    }

    fn newton(&self, market_price: f64, terms: &ContractTerms) -> (Option<f64>, u32) {
        let config = &self.config;
        let mut iv = config.initial_guess;

        for iteration in 0..config.max_iterations {
            let diff = BlackScholes::price_lenient(terms, iv) - market_price;

            if diff.abs() < config.tolerance {
                trace!("newton converged to {:.6} after {} iterations", iv, iteration + 1);
                return (Some(iv), iteration + 1);
            }

            let vega = BlackScholes::vega_raw(terms, iv);

            // Flat price surface, no progress possible
            if vega < config.min_vega {
                return (None, iteration + 1);
            }

            iv -= diff / vega;

            if iv <= 0.0 {
                iv = config.newton_floor;
            } else if iv > config.newton_cap {
                iv = config.newton_cap;
            }
        }

        (None, config.max_iterations)
    }

    fn bisection(&self, market_price: f64, terms: &ContractTerms) -> Option<IvSolution> {
        let config = &self.config;
        let mut low = config.bisection_low;
        let mut high = config.bisection_high;

        for iteration in 0..config.max_iterations {
            let mid = (low + high) / 2.0;
            let diff = BlackScholes::price_lenient(terms, mid) - market_price;

            if diff.abs() < config.tolerance {
                return Some(IvSolution {
                    iv: mid,
                    iterations: iteration + 1,
                    phase: SolverPhase::Bisection,
                });
            }

            // Price is increasing in volatility
            if diff > 0.0 {
                high = mid;
            } else {
                low = mid;
            }
        }

        let mid = (low + high) / 2.0;
        let (min_plausible, max_plausible) = config.plausible_range;
        if mid > min_plausible && mid < max_plausible {
            Some(IvSolution {
                iv: mid,
                iterations: config.max_iterations,
                phase: SolverPhase::BisectionFallback,
            })
        } else {
            None
        }
    }
}

/// Implied volatility with the default solver configuration.
///
/// # Example
/// ```
/// use options_analytics::prelude::*;
///
/// let terms = ContractTerms::call(100.0, 100.0, 0.25, 0.05);
/// let market_price = BlackScholes::price(&terms, 0.25).unwrap();
///
/// let iv = implied_volatility(market_price, &terms).unwrap().unwrap();
/// assert!((iv - 0.25).abs() < 1e-4);
/// ```
pub fn implied_volatility(
    market_price: f64,
    terms: &ContractTerms,
) -> Result<Option<f64>, AnalyticsError> {
    Ok(ImpliedVolSolver::default()
        .solve(market_price, terms)?
        .map(|solution| solution.iv))
}
