//! Side-by-side diagnostics for the two pricers.
//!
//! Nothing here feeds back into the kernels. The lattice and the closed form
//! are each run on identical inputs and their outputs compared.

use std::io::Write;

use anyhow::Context;
use tracing::{debug, info};

use crate::error::{PricingError, Result};
use crate::models::binomial::BinomialTreePricer;
use crate::models::bs::{exact_norm_cdf, norm_cdf, BlackScholesPricer};
use crate::models::traits::EuropeanPricer;
use crate::types::{BlackScholesResult, OptionInputs, PricePair};

/// Both pricers on one contract.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PricerComparison {
    pub inputs: OptionInputs,
    /// Lattice steps used for the binomial leg
    pub steps: usize,
    pub binomial: PricePair,
    pub black_scholes: BlackScholesResult,
}

impl PricerComparison {
    /// `binomial.call - black_scholes.call`
    pub fn call_diff(&self) -> f64 {
        self.binomial.call - self.black_scholes.call
    }

    /// `binomial.put - black_scholes.put`
    pub fn put_diff(&self) -> f64 {
        self.binomial.put - self.black_scholes.put
    }
}

/// Price `inputs` with an `steps`-step lattice and in closed form.
pub fn compare_pricers(inputs: &OptionInputs, steps: usize) -> Result<PricerComparison> {
    let binomial = BinomialTreePricer::new(steps).price(inputs)?;
    let black_scholes = BlackScholesPricer.price_full(inputs)?;
    let comparison = PricerComparison {
        inputs: *inputs,
        steps,
        binomial,
        black_scholes,
    };
    debug!(
        steps,
        call_diff = comparison.call_diff(),
        put_diff = comparison.put_diff(),
        "pricers compared"
    );
    Ok(comparison)
}

/// Lattice price at one step count against the closed form.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConvergencePoint {
    pub steps: usize,
    pub binomial_call: f64,
    pub binomial_put: f64,
    pub closed_form_call: f64,
    pub closed_form_put: f64,
}

impl ConvergencePoint {
    pub fn call_error(&self) -> f64 {
        self.binomial_call - self.closed_form_call
    }

    pub fn put_error(&self) -> f64 {
        self.binomial_put - self.closed_form_put
    }
}

/// Run the lattice for each entry of `steps` and measure it against the
/// closed form. Points come back in the order given.
pub fn convergence_study(inputs: &OptionInputs, steps: &[usize]) -> Result<Vec<ConvergencePoint>> {
    let closed_form = BlackScholesPricer.price(inputs)?;

    let points = steps
        .iter()
        .map(|&n| -> Result<ConvergencePoint> {
            let lattice = BinomialTreePricer::new(n).price(inputs)?;
            Ok(ConvergencePoint {
                steps: n,
                binomial_call: lattice.call,
                binomial_put: lattice.put,
                closed_form_call: closed_form.call,
                closed_form_put: closed_form.put,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(last) = points.last() {
        info!(
            runs = points.len(),
            finest = last.steps,
            call_error = last.call_error(),
            "convergence study finished"
        );
    }
    Ok(points)
}

/// Write a convergence table as CSV with a header row.
pub fn write_convergence_csv<W: Write>(points: &[ConvergencePoint], writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "steps",
        "binomial_call",
        "binomial_put",
        "closed_form_call",
        "closed_form_put",
        "call_error",
        "put_error",
    ])
    .context("failed to write CSV header")?;

    for p in points {
        wtr.write_record([
            p.steps.to_string(),
            p.binomial_call.to_string(),
            p.binomial_put.to_string(),
            p.closed_form_call.to_string(),
            p.closed_form_put.to_string(),
            p.call_error().to_string(),
            p.put_error().to_string(),
        ])
        .with_context(|| format!("failed to write CSV row for {} steps", p.steps))?;
    }
    wtr.flush().context("failed to flush CSV output")?;
    Ok(())
}

/// Worst-case error of the polynomial CDF on a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CdfAccuracy {
    pub max_abs_error: f64,
    /// Grid point where the maximum was attained
    pub worst_x: f64,
    pub samples: usize,
}

/// Compare [`norm_cdf`] with [`exact_norm_cdf`] at `samples` evenly spaced
/// points of `[lo, hi]`, endpoints included.
pub fn cdf_accuracy(lo: f64, hi: f64, samples: usize) -> Result<CdfAccuracy> {
    if !lo.is_finite() {
        return Err(PricingError::InvalidParameter {
            name: "lo",
            value: lo,
            reason: "grid bound must be finite",
        });
    }
    if !hi.is_finite() {
        return Err(PricingError::InvalidParameter {
            name: "hi",
            value: hi,
            reason: "grid bound must be finite",
        });
    }
    if lo >= hi {
        return Err(PricingError::InvalidParameter {
            name: "lo",
            value: lo,
            reason: "must be below hi",
        });
    }
    if samples < 2 {
        return Err(PricingError::InvalidParameter {
            name: "samples",
            value: samples as f64,
            reason: "need at least two grid points",
        });
    }

    let step = (hi - lo) / (samples - 1) as f64;
    let mut worst = CdfAccuracy {
        max_abs_error: 0.0,
        worst_x: lo,
        samples,
    };
    for i in 0..samples {
        let x = lo + i as f64 * step;
        let err = (norm_cdf(x) - exact_norm_cdf(x)).abs();
        if err > worst.max_abs_error {
            worst.max_abs_error = err;
            worst.worst_x = x;
        }
    }
    Ok(worst)
}
