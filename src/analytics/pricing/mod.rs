//! Black-Scholes pricing, Greeks and implied volatility.
//!
//! # Overview
//!
//! All pricing functions take scalar [`ContractTerms`] plus a volatility and
//! work with volatility as a decimal fraction (0.20 = 20%). Converting to
//! percentages is left to the presentation layer.
//!
//! The solver inverts the pricer with Newton-Raphson (vega is always positive,
//! so it usually converges in 3-5 iterations) and falls back to bisection
//! on a fixed bracket when Newton stalls.
//!
//! # Example
//!
//! ```
//! use options_analytics::prelude::*;
//!
//! let terms = ContractTerms::call(100.0, 100.0, 1.0, 0.05);
//! let result = BlackScholes::evaluate(&terms, 0.20).unwrap();
//! assert!((result.price - 10.4506).abs() < 1e-3);
//!
//! let iv = implied_volatility(result.price, &terms).unwrap();
//! assert!(iv.is_some());
//! ```

mod black_scholes;
mod chain;
pub mod normal;
mod solver;
mod types;

pub use black_scholes::{BlackScholes, MAX_VOLATILITY};
pub use chain::{
    ChainRow, OptionQuote, SmilePoint, VolatilitySkew, price_chain, volatility_skew,
    volatility_smile, volatility_smile_with,
};
pub use normal::{erf, norm_cdf, norm_pdf};
pub use solver::{ImpliedVolSolver, IvSolution, SolverConfig, SolverPhase, implied_volatility};
pub use types::{ContractTerms, Greeks, OptionType, PricingResult};
