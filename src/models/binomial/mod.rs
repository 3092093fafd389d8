//! Cox-Ross-Rubinstein binomial lattice for European options.
//!
//! The lattice recombines, so after `n` steps there are `n + 1` terminal nodes.
//! Node `j` is the path with `j` down-moves, priced at `s0 * u^(n-j) * d^j`.
//! Call and put values are rolled back to the root by discounted risk-neutral
//! expectation.
//!
//! # Lattice factors
//!
//! ```text
//! dt   = t / n
//! u    = exp(sigma * sqrt(dt))      d = exp(-sigma * sqrt(dt))
//! p    = (exp(r * dt) - d) / (u - d)
//! beta = exp(-r * dt)
//! ```
//!
//! `p` must lie strictly inside `(0, 1)`, i.e. `d < exp(r*dt) < u`. With a
//! large rate relative to `sigma * sqrt(dt)` this fails and the call is
//! rejected instead of using a meaningless "probability".

use tracing::{debug, warn};

use crate::error::{PricingError, Result};
use crate::models::traits::EuropeanPricer;
use crate::models::utils::{call_payoff, put_payoff};
use crate::types::{OptionInputs, PricePair};

/// Per-step quantities of a lattice with a fixed number of steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialFactors {
    /// Number of time steps
    pub steps: usize,
    /// Length of one step in years
    pub dt: f64,
    /// Up factor
    pub u: f64,
    /// Down factor
    pub d: f64,
    /// Risk-neutral probability of an up-move
    pub p: f64,
    /// One-step discount factor
    pub beta: f64,
}

impl BinomialFactors {
    /// Derive the factors for `steps >= 1` and check `0 < p < 1`.
    pub fn new(inputs: &OptionInputs, steps: usize) -> Result<Self> {
        inputs.validate()?;
        if steps == 0 {
            return Err(PricingError::InvalidParameter {
                name: "n",
                value: 0.0,
                reason: "lattice factors need at least one step",
            });
        }

        let dt = inputs.t / steps as f64;
        let u = (inputs.sigma * dt.sqrt()).exp();
        let d = (-inputs.sigma * dt.sqrt()).exp();
        if !u.is_finite() {
            return Err(PricingError::overflow(format!(
                "up factor exp(sigma*sqrt(dt)) with sigma*sqrt(dt) = {}",
                inputs.sigma * dt.sqrt()
            )));
        }

        let growth = (inputs.r * dt).exp();
        let p = (growth - d) / (u - d);
        let beta = (-inputs.r * dt).exp();

        if !(p > 0.0 && p < 1.0) {
            warn!(p, u, d, growth, steps, "risk-neutral probability outside (0, 1)");
            return Err(PricingError::ArbitrageInconsistent { p, u, d, growth });
        }

        debug!(steps, dt, u, d, p, beta, "binomial factors");
        Ok(Self {
            steps,
            dt,
            u,
            d,
            p,
            beta,
        })
    }

    /// Underlying price after `n - j` up-moves and `j` down-moves.
    #[inline]
    pub fn terminal_price(&self, s0: f64, j: usize) -> f64 {
        s0 * self.u.powf((self.steps - j) as f64) * self.d.powf(j as f64)
    }
}

/// Empty buffer with room for `len` lattice nodes.
///
/// A lattice too large to allocate is reported as
/// [`PricingError::NumericOverflow`] rather than aborting the process.
fn lattice_buffer(len: usize) -> Result<Vec<f64>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|e| {
        warn!(len, "lattice buffer allocation failed");
        PricingError::overflow(format!("lattice buffer of {len} nodes: {e}"))
    })?;
    Ok(buf)
}

/// Roll `call` and `put` back from maturity to the root in place.
///
/// Both buffers hold `n + 1` terminal values on entry; on exit index 0 is the
/// present value. At step `i` node `j` reads `[j]` and `[j + 1]` of step
/// `i + 1`. Walking `j` upwards means `[j + 1]` is still unwritten at step `i`
/// when it is read.
fn backward_induct(call: &mut [f64], put: &mut [f64], p: f64, beta: f64) {
    debug_assert_eq!(call.len(), put.len());
    let n = call.len() - 1;
    for i in (0..n).rev() {
        for j in 0..=i {
            call[j] = beta * (p * call[j] + (1.0 - p) * call[j + 1]);
            put[j] = beta * (p * put[j] + (1.0 - p) * put[j + 1]);
        }
    }
}

/// Price a European call and put on an `n`-step binomial lattice.
///
/// Argument order follows the lattice convention `(S0, K, T, sigma, r, n)`.
/// With `n = 0` no step is taken and the undiscounted intrinsic values at
/// `S0` are returned.
///
/// # Errors
///
/// * [`PricingError::InvalidParameter`] for an input outside its domain
/// * [`PricingError::ArbitrageInconsistent`] when `p` is not in `(0, 1)`
/// * [`PricingError::NumericOverflow`] when a terminal price or the result
///   is not finite (very large `n` or `sigma * sqrt(T)`)
///
/// # Example
///
/// ```rust
/// use vanilla_lib::price_binomial;
///
/// let prices = price_binomial(15600.0, 15700.0, 0.25, 0.1846, 0.065, 100)?;
/// assert!((prices.call - 652.2933).abs() < 1e-4);
/// # Ok::<(), vanilla_lib::PricingError>(())
/// ```
#[allow(non_snake_case)]
pub fn price_binomial(S0: f64, K: f64, T: f64, sigma: f64, r: f64, n: usize) -> Result<PricePair> {
    let inputs = OptionInputs {
        s0: S0,
        k: K,
        t: T,
        r,
        sigma,
    };
    inputs.validate()?;

    if n == 0 {
        return Ok(PricePair {
            call: call_payoff(S0, K),
            put: put_payoff(S0, K),
        });
    }

    let factors = BinomialFactors::new(&inputs, n)?;

    let top = factors.terminal_price(S0, 0);
    if !top.is_finite() {
        warn!(n, sigma, T, "terminal price overflowed");
        return Err(PricingError::overflow(format!(
            "terminal price S0 * u^{n} = {top}"
        )));
    }

    let nodes = n
        .checked_add(1)
        .ok_or_else(|| PricingError::overflow(format!("lattice of {n} steps")))?;
    let mut call = lattice_buffer(nodes)?;
    let mut put = lattice_buffer(nodes)?;
    for j in 0..=n {
        let s = factors.terminal_price(S0, j);
        if !s.is_finite() {
            return Err(PricingError::overflow(format!(
                "terminal price at node {j} = {s}"
            )));
        }
        call.push(call_payoff(s, K));
        put.push(put_payoff(s, K));
    }

    backward_induct(&mut call, &mut put, factors.p, factors.beta);

    let prices = PricePair {
        call: call[0],
        put: put[0],
    };
    if !prices.call.is_finite() || !prices.put.is_finite() {
        return Err(PricingError::overflow(format!(
            "lattice prices call = {}, put = {}",
            prices.call, prices.put
        )));
    }
    debug!(n, call = prices.call, put = prices.put, "binomial priced");
    Ok(prices)
}

/// Binomial lattice with a fixed step count behind the [`EuropeanPricer`] interface.
#[derive(Debug, Clone, Copy)]
pub struct BinomialTreePricer {
    /// Number of tree steps.
    pub steps: usize,
}

impl BinomialTreePricer {
    /// Lattice pricer with `steps` time steps.
    pub fn new(steps: usize) -> Self {
        Self { steps }
    }
}

impl EuropeanPricer for BinomialTreePricer {
    fn name(&self) -> &str {
        "binomial"
    }

    fn price(&self, inputs: &OptionInputs) -> Result<PricePair> {
        price_binomial(
            inputs.s0,
            inputs.k,
            inputs.t,
            inputs.sigma,
            inputs.r,
            self.steps,
        )
    }
}
