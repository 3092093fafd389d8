// demos/pricing_demo.rs

//! Demonstration of the two pricers
//!
//! This example shows how to:
//! 1. Price the lattice reference run
//! 2. Price the closed-form reference run
//! 3. Compare both pricers on the same contract
//! 4. Load a session from TOML

use anyhow::Result;
use vanilla_lib::{
    compare_pricers, default_configs, default_scenarios, price_binomial, price_black_scholes,
    BinomialReport, BlackScholesReport, ComparisonReport, PricingConfig,
};

fn main() -> Result<()> {
    println!("European Option Pricing Demo");
    println!("============================\n");

    // Step 1: binomial reference run
    let (inputs, steps) = default_scenarios::binomial_reference();
    let prices = price_binomial(inputs.s0, inputs.k, inputs.t, inputs.sigma, inputs.r, steps)?;
    println!(
        "{}\n",
        BinomialReport {
            inputs,
            steps,
            prices
        }
    );

    // Step 2: closed-form reference run (deep in the money)
    let bs_inputs = default_scenarios::black_scholes_reference();
    let result = price_black_scholes(
        bs_inputs.s0,
        bs_inputs.k,
        bs_inputs.t,
        bs_inputs.r,
        bs_inputs.sigma,
    )?;
    println!(
        "{}\n",
        BlackScholesReport {
            inputs: bs_inputs,
            result
        }
    );

    // Step 3: like-for-like comparison on the lattice inputs
    let fine = default_configs::fine();
    let comparison = compare_pricers(&inputs, fine.binomial.steps)?;
    println!("{}\n", ComparisonReport(comparison));

    // Step 4: a session from TOML
    let config = PricingConfig::from_toml_str(
        r#"
        [binomial]
        k = 15000.0
        steps = 500
        "#,
    )?;
    let custom = config.binomial.inputs();
    let prices = price_binomial(
        custom.s0,
        custom.k,
        custom.t,
        custom.sigma,
        custom.r,
        config.binomial.steps,
    )?;
    println!(
        "K = {}: call {:.4}, put {:.4}, parity gap {:.2e}",
        custom.k,
        prices.call,
        prices.put,
        prices.parity_gap(&custom)
    );

    Ok(())
}
