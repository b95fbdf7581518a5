//! # Options Analytics
//!
//! Pricing and volatility analytics for European options on a single
//! underlying, working from scalar contract terms and a daily OHLC series.
//!
//! ## Key Features
//!
//! - **Black-Scholes pricing**: price and Greeks for calls and puts, with a
//!   strict entry point that validates its inputs and a lenient one for
//!   expired or zero-volatility contracts.
//!
//! - **Implied volatility**: Newton-Raphson seeded at 30% with a bisection
//!   fallback. Prices outside the no-arbitrage bounds have no solution.
//!
//! - **Historical volatility**: close-to-close, Parkinson, Garman-Klass,
//!   Rogers-Satchell and Yang-Zhang estimators plus EWMA, annualized with
//!   252 trading days.
//!
//! - **Volatility cone**: percentile bands of rolling volatility for several
//!   window lengths.
//!
//! - **Chain analytics**: batch chain pricing, volatility smile and skew,
//!   IV regime and HV/IV spread signals.
//!
//! Volatilities are decimal fractions throughout (0.20 = 20%). The library
//! keeps no state between calls and every function is safe to call from any
//! thread.
//!
//! ## Logging
//!
//! Diagnostics go through `tracing`. The library never installs a subscriber;
//! binaries choose their own.
//!
//! ## Example
//!
//! ```
//! use options_analytics::prelude::*;
//!
//! let terms = ContractTerms::put(100.0, 95.0, 0.25, 0.015);
//! let price = BlackScholes::price(&terms, 0.22).unwrap();
//! let solved = implied_volatility(price, &terms).unwrap().unwrap();
//! assert!((solved - 0.22).abs() < 1e-3);
//!
//! // Below intrinsic: no volatility reproduces the price
//! let deep = ContractTerms::put(100.0, 130.0, 0.25, 0.015);
//! assert_eq!(implied_volatility(10.0, &deep).unwrap(), None);
//! ```

pub mod analytics;

/// Commonly used types and functions.
pub mod prelude {
    pub use crate::analytics::pricing::{
        BlackScholes, ChainRow, ContractTerms, Greeks, ImpliedVolSolver, IvSolution,
        MAX_VOLATILITY, OptionQuote, OptionType, PricingResult, SmilePoint, SolverConfig,
        SolverPhase, VolatilitySkew, erf, implied_volatility, norm_cdf, norm_pdf, price_chain,
        volatility_skew, volatility_smile, volatility_smile_with,
    };
    pub use crate::analytics::volatility::{
        ConeBand, ConeBuilder, ConeConfig, DEFAULT_CONE_WINDOWS, DEFAULT_EWMA_LAMBDA,
        DEFAULT_LOOKBACK_DAYS, DEFAULT_OVERVALUED_THRESHOLD, DEFAULT_SNAPSHOT_PERIODS,
        DEFAULT_UNDERVALUED_THRESHOLD, EstimatorConfig, IvLevel, PriceBar, PriceSeries,
        ReturnMean, SpreadSignal, TRADING_DAYS_PER_YEAR, VolatilityEstimate, VolatilityEstimator,
        VolatilityMethod, VolatilitySnapshot, VolatilitySpread, ewma_volatility,
        historical_volatility, volatility_cone, volatility_snapshots,
    };
    pub use crate::analytics::{AnalyticsConfig, AnalyticsError, DEFAULT_RISK_FREE_RATE};
}
