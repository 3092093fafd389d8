//! Subcommand implementations. Each prints its report to stdout; logs go to stderr.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use vanilla_lib::{
    cdf_accuracy as measure_cdf, compare_pricers, convergence_study, price_binomial,
    price_black_scholes, write_convergence_csv, BinomialReport, BlackScholesReport,
    ComparisonReport, ConvergenceReport, PricingConfig,
};

pub fn binomial(config: &PricingConfig, steps: Option<usize>) -> Result<()> {
    let inputs = config.binomial.inputs();
    let steps = steps.unwrap_or(config.binomial.steps);
    info!("Pricing on a {}-step lattice", steps);

    let prices = price_binomial(inputs.s0, inputs.k, inputs.t, inputs.sigma, inputs.r, steps)
        .context("binomial pricing failed")?;
    println!(
        "{}",
        BinomialReport {
            inputs,
            steps,
            prices
        }
    );
    Ok(())
}

pub fn black_scholes(config: &PricingConfig) -> Result<()> {
    let inputs = config.black_scholes.inputs();
    let result = price_black_scholes(inputs.s0, inputs.k, inputs.t, inputs.r, inputs.sigma)
        .context("closed-form pricing failed")?;
    println!("{}", BlackScholesReport { inputs, result });
    Ok(())
}

pub fn compare(config: &PricingConfig, steps: Option<usize>) -> Result<()> {
    let inputs = config.binomial.inputs();
    let steps = steps.unwrap_or(config.binomial.steps);
    let comparison = compare_pricers(&inputs, steps).context("comparison failed")?;
    println!("{}", ComparisonReport(comparison));
    Ok(())
}

pub fn convergence(
    config: &PricingConfig,
    steps: Option<Vec<usize>>,
    output: Option<&Path>,
) -> Result<()> {
    let inputs = config.binomial.inputs();
    let steps = steps.unwrap_or_else(|| config.convergence.steps.clone());
    info!("Running convergence study over {:?}", steps);

    let points = convergence_study(&inputs, &steps).context("convergence study failed")?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_convergence_csv(&points, BufWriter::new(file))?;
            info!("Wrote {} rows to {}", points.len(), path.display());
        }
        None => print!("{}", ConvergenceReport(&points)),
    }
    Ok(())
}

pub fn cdf_accuracy(lo: f64, hi: f64, samples: usize) -> Result<()> {
    let acc = measure_cdf(lo, hi, samples).context("invalid CDF grid")?;
    println!("Grid: [{}, {}] with {} points", lo, hi, acc.samples);
    println!("Max |Φ_poly - Φ|: {:.3e} at x = {:.4}", acc.max_abs_error, acc.worst_x);
    Ok(())
}
