//! Standard normal distribution primitives shared by the pricing code.

use std::f64::consts::{PI, SQRT_2};

/// Beyond this many standard deviations the CDF is returned as exactly 0 or 1.
const CDF_CUTOFF: f64 = 7.0;

/// Approximation of the error function (erf).
///
/// Uses Abramowitz and Stegun approximation (formula 7.1.26)
/// with maximum error of 1.5×10⁻⁷.
#[must_use]
pub fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

    sign * y
}

/// Standard normal cumulative distribution function, P(Z ≤ x).
///
/// Inputs further than seven standard deviations from zero short-circuit
/// to exactly 0.0 or 1.0.
#[must_use]
pub fn norm_cdf(x: f64) -> f64 {
    if x < -CDF_CUTOFF {
        return 0.0;
    }
    if x > CDF_CUTOFF {
        return 1.0;
    }
    0.5 * (1.0 + erf(x / SQRT_2))
}

/// Standard normal probability density function.
#[must_use]
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}
