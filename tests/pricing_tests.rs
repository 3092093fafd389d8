
use approx::{assert_abs_diff_eq, assert_relative_eq};
use statrs::distribution::{ContinuousCDF, Normal};
use vanilla_lib::{
    compare_pricers, default_scenarios, norm_cdf, price_binomial, price_black_scholes,
    BinomialFactors, BinomialTreePricer, BlackScholesPricer, EuropeanPricer, PricingError,
};
use test_utils::{inputs, random_inputs, rng, textbook_atm};

/// Lattice reference run reproduces the published prices to full precision.
#[test]
fn test_binomial_reference_scenario() {
    let (inp, steps) = default_scenarios::binomial_reference();
    let prices = BinomialTreePricer::new(steps).price(&inp).unwrap();

    assert_abs_diff_eq!(prices.call, 652.293_323_567_074_8, epsilon = 1e-8);
    assert_abs_diff_eq!(prices.put, 499.230_031_500_894_4, epsilon = 1e-8);
}

/// Closed-form reference run is deep in the money: call is the discounted
/// intrinsic value and the put is worthless.
#[test]
fn test_black_scholes_reference_scenario() {
    let inp = default_scenarios::black_scholes_reference();
    let res = BlackScholesPricer.price_full(&inp).unwrap();

    let limit = inp.s0 - inp.k * inp.discount();
    assert_abs_diff_eq!(res.call, limit, epsilon = 1e-6);
    assert_abs_diff_eq!(res.put, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(res.omega, 37.548_471, epsilon = 1e-6);
}

/// The two reference runs use different contracts; pricing the lattice inputs
/// in closed form must not reproduce the closed-form reference numbers.
#[test]
fn test_reference_scenarios_are_independent() {
    let (lattice_inputs, _) = default_scenarios::binomial_reference();
    let closed_inputs = default_scenarios::black_scholes_reference();
    assert_ne!(lattice_inputs, closed_inputs);

    let a = BlackScholesPricer.price(&lattice_inputs).unwrap();
    let b = BlackScholesPricer.price(&closed_inputs).unwrap();
    assert!((a.call - b.call).abs() > 1000.0);
}

/// Binomial converges to the closed form (n = 1000, unit-scale contract).
#[test]
fn test_binomial_converges_to_black_scholes() {
    let cmp = compare_pricers(&textbook_atm(), 1000).unwrap();
    assert_abs_diff_eq!(cmp.binomial.call, cmp.black_scholes.call, epsilon = 1e-2);
    assert_abs_diff_eq!(cmp.binomial.put, cmp.black_scholes.put, epsilon = 1e-2);
    assert_abs_diff_eq!(cmp.black_scholes.call, 10.450_575_619_322_272, epsilon = 1e-8);

    // Same check on the lattice reference contract, relative to its scale
    let (inp, _) = default_scenarios::binomial_reference();
    let cmp = compare_pricers(&inp, 1000).unwrap();
    assert_relative_eq!(cmp.binomial.call, cmp.black_scholes.call, max_relative = 1e-3);
}

/// Put-call parity: C - P = S0 - K*exp(-rT), exact up to rounding.
#[test]
fn test_closed_form_parity() {
    let mut rng = rng();
    for _ in 0..200 {
        let inp = random_inputs(&mut rng, 1);
        let pair = BlackScholesPricer.price(&inp).unwrap();
        assert!(
            pair.parity_gap(&inp).abs() < 1e-9 * inp.s0.max(inp.k),
            "parity gap {} for {:?}",
            pair.parity_gap(&inp),
            inp
        );
    }
}

/// The lattice is arbitrage-free, so parity holds there too (to rounding).
#[test]
fn test_binomial_parity() {
    let mut rng = rng();
    for _ in 0..50 {
        let inp = random_inputs(&mut rng, 50);
        let pair = BinomialTreePricer::new(50).price(&inp).unwrap();
        assert!(pair.parity_gap(&inp).abs() < 1e-9 * inp.s0.max(inp.k));
    }
}

/// Prices are non-negative; the closed-form put may dip below zero only by the
/// CDF approximation error.
#[test]
fn test_prices_non_negative() {
    let mut rng = rng();
    for _ in 0..100 {
        let inp = random_inputs(&mut rng, 40);

        let lattice = BinomialTreePricer::new(40).price(&inp).unwrap();
        assert!(lattice.call >= 0.0 && lattice.put >= 0.0);

        let closed = BlackScholesPricer.price(&inp).unwrap();
        let tol = 1e-6 * inp.s0.max(inp.k);
        assert!(closed.call >= -tol, "call {} for {:?}", closed.call, inp);
        assert!(closed.put >= -tol, "put {} for {:?}", closed.put, inp);
    }
}

/// At the forward strike omega is sigma*sqrt(T)/2 and call equals put.
#[test]
fn test_at_the_money_forward() {
    let base = textbook_atm();
    let atmf = inputs(base.s0, base.forward(), base.t, base.r, base.sigma);
    let res = BlackScholesPricer.price_full(&atmf).unwrap();

    assert_abs_diff_eq!(res.omega, base.sigma * base.t.sqrt() / 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(res.call, res.put, epsilon = 1e-9);
}

/// Single-step lattice equals the one-period formula worked by hand.
#[test]
fn test_single_step_lattice() {
    let inp = inputs(100.0, 100.0, 1.0, 0.05, 0.2);
    let f = BinomialFactors::new(&inp, 1).unwrap();
    let up = (inp.s0 * f.u - inp.k).max(0.0);
    let down = (inp.s0 * f.d - inp.k).max(0.0);
    let expected = f.beta * (f.p * up + (1.0 - f.p) * down);

    let prices = price_binomial(inp.s0, inp.k, inp.t, inp.sigma, inp.r, 1).unwrap();
    assert_abs_diff_eq!(prices.call, expected, epsilon = 1e-12);
}

/// Polynomial CDF agrees with an independent implementation to ~1e-7 and is
/// exactly symmetric away from zero.
#[test]
fn test_norm_cdf_against_statrs() {
    let normal = Normal::new(0.0, 1.0).unwrap();
    for i in -600..=600 {
        let x = i as f64 / 100.0;
        assert!(
            (norm_cdf(x) - normal.cdf(x)).abs() < 1e-7,
            "Φ({}) off by {}",
            x,
            (norm_cdf(x) - normal.cdf(x)).abs()
        );
        if i != 0 {
            assert_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, "symmetry broken at {}", x);
        }
    }
    // Both zeros take the polynomial branch, so Φ(0) + Φ(-0) = 2Φ(0) carries
    // the approximation error twice.
    assert_abs_diff_eq!(norm_cdf(0.0), 0.5, epsilon = 1e-7);
    assert_abs_diff_eq!(norm_cdf(0.0) + norm_cdf(-0.0), 1.0, epsilon = 1e-7);
}

/// Errors surface instead of NaN/Inf.
#[test]
fn test_error_taxonomy() {
    assert!(matches!(
        price_black_scholes(100.0, 100.0, 1.0, 0.05, 0.0),
        Err(PricingError::InvalidParameter { .. })
    ));
    assert!(matches!(
        price_binomial(100.0, 100.0, 1.0, 0.01, 0.5, 10),
        Err(PricingError::ArbitrageInconsistent { .. })
    ));
    assert!(matches!(
        price_binomial(100.0, 100.0, 100.0, 100.0, 0.0, 2),
        Err(PricingError::NumericOverflow { .. })
    ));
}
