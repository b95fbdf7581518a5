use crate::common::TOLERANCE;
use options_analytics::prelude::*;

#[test]
fn test_closed_form_benchmark() {
    let call = ContractTerms::call(100.0, 100.0, 1.0, 0.05);
    let put = call.with_option_type(OptionType::Put);

    let call_result = BlackScholes::evaluate(&call, 0.20).unwrap();
    let put_result = BlackScholes::evaluate(&put, 0.20).unwrap();

    assert!((call_result.price - 10.4506).abs() < 1e-3);
    assert!((put_result.price - 5.5735).abs() < 1e-3);
    assert!((call_result.greeks.delta - 0.6368).abs() < 1e-3);
    assert!((put_result.greeks.delta - (call_result.greeks.delta - 1.0)).abs() < TOLERANCE);
    assert!((call_result.greeks.gamma - put_result.greeks.gamma).abs() < TOLERANCE);
    assert!((call_result.greeks.vega - put_result.greeks.vega).abs() < TOLERANCE);
}

#[test]
fn test_put_call_parity() {
    for &(spot, strike, time, rate, vol) in &[
        (100.0, 100.0, 1.0, 0.05, 0.20),
        (100.0, 80.0, 0.25, 0.015, 0.35),
        (17_500.0, 18_000.0, 30.0 / 365.0, 0.015, 0.18),
        (50.0, 65.0, 2.0, 0.0, 0.9),
        (250.0, 240.0, 0.05, 0.1, 0.05),
    ] {
        let call = ContractTerms::call(spot, strike, time, rate);
        let put = call.with_option_type(OptionType::Put);
        let c = BlackScholes::price(&call, vol).unwrap();
        let p = BlackScholes::price(&put, vol).unwrap();
        let forward_gap = spot - strike * (-rate * time).exp();
        // Relative to the underlying's scale
        assert!(
            (c - p - forward_gap).abs() < TOLERANCE * spot.max(1.0),
            "parity broken for S={spot} K={strike}: {}",
            c - p - forward_gap
        );
    }
}

#[test]
fn test_price_increases_with_volatility() {
    for option_type in [OptionType::Call, OptionType::Put] {
        let terms = ContractTerms::new(100.0, 105.0, 0.5, 0.015, option_type);
        let prices: Vec<f64> = (1..=40)
            .map(|i| BlackScholes::price(&terms, i as f64 * 0.05).unwrap())
            .collect();
        assert!(prices.windows(2).all(|pair| pair[1] > pair[0]), "{option_type:?}");
        assert!(BlackScholes::vega_raw(&terms, 0.3) > 0.0);
    }
}

#[test]
fn test_short_expiry_tends_to_intrinsic() {
    let cases = [
        ContractTerms::call(100.0, 90.0, 1e-6, 0.05),
        ContractTerms::call(100.0, 110.0, 1e-6, 0.05),
        ContractTerms::put(100.0, 110.0, 1e-6, 0.05),
        ContractTerms::put(100.0, 90.0, 1e-6, 0.05),
    ];
    for terms in cases {
        let price = BlackScholes::price(&terms, 0.25).unwrap();
        assert!(
            (price - terms.intrinsic_value()).abs() < 1e-3,
            "{terms:?}: {price}"
        );
    }
}

#[test]
fn test_strict_path_rejects_bad_inputs() {
    let good = ContractTerms::call(100.0, 100.0, 1.0, 0.05);

    let bad_terms = [
        ContractTerms::call(0.0, 100.0, 1.0, 0.05),
        ContractTerms::call(100.0, -1.0, 1.0, 0.05),
        ContractTerms::call(100.0, 100.0, 0.0, 0.05),
        ContractTerms::call(100.0, 100.0, 1.0, 1.5),
        ContractTerms::call(100.0, 100.0, 1.0, -0.01),
        ContractTerms::call(f64::NAN, 100.0, 1.0, 0.05),
    ];
    for terms in bad_terms {
        assert!(matches!(
            BlackScholes::price(&terms, 0.2),
            Err(AnalyticsError::InvalidParams { .. })
        ));
    }

    assert!(matches!(
        BlackScholes::greeks(&good, 0.0),
        Err(AnalyticsError::InvalidParams { .. })
    ));
    assert!(matches!(
        BlackScholes::evaluate(&good, MAX_VOLATILITY + 1.0),
        Err(AnalyticsError::VolatilityOutOfBounds { .. })
    ));
    assert!(BlackScholes::price(&good, MAX_VOLATILITY).is_ok());
}

#[test]
fn test_lenient_path_zeroes_degenerate_inputs() {
    let expired = ContractTerms::call(100.0, 90.0, 0.0, 0.05);
    assert_eq!(BlackScholes::evaluate_lenient(&expired, 0.2), PricingResult::default());

    let live = ContractTerms::put(100.0, 90.0, 0.5, 0.05);
    assert_eq!(BlackScholes::price_lenient(&live, 0.0), 0.0);
    assert_eq!(BlackScholes::greeks_lenient(&live, -0.1), Greeks::default());
    assert_eq!(
        BlackScholes::price_lenient(&live, 0.3),
        BlackScholes::price(&live, 0.3).unwrap()
    );
}

#[test]
fn test_greek_signs() {
    let call = BlackScholes::greeks(&ContractTerms::call(100.0, 100.0, 0.5, 0.03), 0.25).unwrap();
    let put = BlackScholes::greeks(&ContractTerms::put(100.0, 100.0, 0.5, 0.03), 0.25).unwrap();

    assert!(call.delta > 0.0 && call.delta < 1.0);
    assert!(put.delta < 0.0 && put.delta > -1.0);
    assert!(call.gamma > 0.0);
    assert!(call.theta < 0.0);
    assert!(call.rho > 0.0);
    assert!(put.rho < 0.0);
}

#[test]
fn test_normal_kernel() {
    assert!((norm_cdf(0.0) - 0.5).abs() < 1e-7);
    assert!((norm_cdf(1.96) - 0.975).abs() < 1e-4);
    assert!((norm_cdf(-1.5) + norm_cdf(1.5) - 1.0).abs() < 1e-7);
    assert_eq!(norm_cdf(-8.0), 0.0);
    assert_eq!(norm_cdf(8.0), 1.0);
    assert!((norm_pdf(0.0) - 0.398_942_280_4).abs() < 1e-9);
    assert!((erf(0.5) - 0.520_499_877_8).abs() < 2e-7);
}

#[test]
fn test_pricing_result_serializes() {
    let result = BlackScholes::evaluate(&ContractTerms::call(100.0, 100.0, 1.0, 0.05), 0.2).unwrap();
    let json = serde_json::to_value(result).unwrap();
    assert!(json["price"].as_f64().unwrap() > 10.0);
    assert!(json["greeks"]["delta"].is_number());
}
