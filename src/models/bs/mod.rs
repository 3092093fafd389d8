// Closed-form Black-Scholes pricing for European calls and puts.  The normal
// CDF is the five-term Hastings polynomial (Abramowitz & Stegun 26.2.17,
// Zelen & Severo) rather than an erf call, so results carry its ~7.5e-8
// absolute error.  The put comes from put-call parity, not its own formula.

use std::f64::consts::PI;

use tracing::{debug, warn};

use crate::error::{PricingError, Result};
use crate::models::traits::EuropeanPricer;
use crate::models::utils::log_moneyness;
use crate::types::{BlackScholesResult, OptionInputs, PricePair};

const P: f64 = 0.2316419;
const A1: f64 = 0.319381530;
const A2: f64 = -0.356563782;
const A3: f64 = 1.781477937;
const A4: f64 = -1.821255978;
const A5: f64 = 1.330274429;

/// Polynomial evaluation of Φ on `x >= 0`.
#[inline]
fn cdf_non_negative(x: f64) -> f64 {
    debug_assert!(x >= 0.0, "non-negative branch called with {x}");
    let y = 1.0 / (1.0 + P * x);
    let poly = A1 * y
        + A2 * y.powf(2.0)
        + A3 * y.powf(3.0)
        + A4 * y.powf(4.0)
        + A5 * y.powf(5.0);
    1.0 - (1.0 / (2.0 * PI).sqrt()) * (-(x * x) / 2.0).exp() * poly
}

/// Approximate standard normal cumulative distribution function.
///
/// For `x >= 0` the polynomial is evaluated directly. Negative arguments use
/// `Φ(x) = 1 - Φ(-x)`, which lands on the non-negative branch in exactly one
/// step, so `norm_cdf(x) + norm_cdf(-x) == 1` holds for every finite non-zero
/// `x`. Both zeros take the polynomial branch, where `Φ(0)` is `0.5` only up to
/// the approximation error. `NaN` is passed through.
pub fn norm_cdf(x: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    if x >= 0.0 {
        cdf_non_negative(x)
    } else {
        1.0 - cdf_non_negative(-x)
    }
}

/// Standard normal CDF to full double precision, `0.5 * erfc(-x / sqrt(2))`.
///
/// Used as the yardstick for [`norm_cdf`]; the pricer never calls it.
pub fn exact_norm_cdf(x: f64) -> f64 {
    0.5 * libm::erfc(-x / std::f64::consts::SQRT_2)
}

/// Standardised normal variate `omega = (r*t + sigma^2*t/2 - ln(k/s0)) / (sigma*sqrt(t))`.
#[allow(non_snake_case)]
pub fn omega(S0: f64, K: f64, T: f64, r: f64, sigma: f64) -> f64 {
    (r * T + (sigma * sigma * T) / 2.0 - log_moneyness(K, S0)) / (sigma * T.sqrt())
}

/// Price a European call and put in closed form.
///
/// Inputs are validated up front: `S0`, `K`, `T` and `sigma` must be finite
/// and strictly positive, `r` finite. The call is
/// `S0*Φ(ω) - K*exp(-rT)*Φ(ω - σ√T)` and the put follows from parity,
/// `P = C + K*exp(-rT) - S0`, so `C - P = S0 - K*exp(-rT)` up to rounding.
///
/// # Errors
///
/// * [`PricingError::InvalidParameter`] for an input outside its domain
/// * [`PricingError::NumericOverflow`] if `ω` or either price is not finite
#[allow(non_snake_case)]
pub fn price_black_scholes(
    S0: f64,
    K: f64,
    T: f64,
    r: f64,
    sigma: f64,
) -> Result<BlackScholesResult> {
    OptionInputs {
        s0: S0,
        k: K,
        t: T,
        r,
        sigma,
    }
    .validate()?;

    let w = omega(S0, K, T, r, sigma);
    if !w.is_finite() {
        warn!(S0, K, T, r, sigma, "omega is not finite");
        return Err(PricingError::overflow(format!("omega = {w}")));
    }

    let discounted_strike = K * (-r * T).exp();
    let call = S0 * norm_cdf(w) - discounted_strike * norm_cdf(w - sigma * T.sqrt());
    let put = call + discounted_strike - S0;

    if !call.is_finite() || !put.is_finite() {
        warn!(S0, K, T, r, sigma, "closed-form prices are not finite");
        return Err(PricingError::overflow(format!(
            "closed-form prices call = {call}, put = {put}"
        )));
    }

    debug!(omega = w, call, put, "black-scholes priced");
    Ok(BlackScholesResult {
        call,
        put,
        omega: w,
    })
}

/// Closed-form pricer behind the [`EuropeanPricer`] interface.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholesPricer;

impl BlackScholesPricer {
    /// Full result including `omega`.
    pub fn price_full(&self, inputs: &OptionInputs) -> Result<BlackScholesResult> {
        price_black_scholes(inputs.s0, inputs.k, inputs.t, inputs.r, inputs.sigma)
    }
}

impl EuropeanPricer for BlackScholesPricer {
    fn name(&self) -> &str {
        "black-scholes"
    }

    fn price(&self, inputs: &OptionInputs) -> Result<PricePair> {
        self.price_full(inputs).map(PricePair::from)
    }
}
