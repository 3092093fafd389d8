//! Plain-text reports for pricing runs.
//!
//! Reports only format values that were already computed; they never price.

use std::fmt;

use crate::analysis::{ConvergencePoint, PricerComparison};
use crate::types::{BlackScholesResult, OptionInputs, PricePair};

const RULE: &str = "----------------------------------------------------";

fn write_inputs(f: &mut fmt::Formatter<'_>, inputs: &OptionInputs) -> fmt::Result {
    writeln!(f, "Initial Stock Price (S0): {}", inputs.s0)?;
    writeln!(f, "Strike Price (K): {}", inputs.k)?;
    writeln!(f, "Time to Maturity (T): {} years", inputs.t)?;
    writeln!(f, "Volatility (sigma): {}", inputs.sigma)?;
    writeln!(f, "Risk-Free Rate (r): {}", inputs.r)
}

/// Inputs and results of one lattice run.
#[derive(Debug, Clone, Copy)]
pub struct BinomialReport {
    pub inputs: OptionInputs,
    pub steps: usize,
    pub prices: PricePair,
}

impl fmt::Display for BinomialReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, " European Option Pricing using Binomial Tree Model ")?;
        writeln!(f, "{RULE}")?;
        write_inputs(f, &self.inputs)?;
        writeln!(f, "Number of Steps (n): {}", self.steps)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "European Call Option Price: {:.4}", self.prices.call)?;
        writeln!(f, "European Put  Option Price: {:.4}", self.prices.put)?;
        write!(f, "{RULE}")
    }
}

/// Inputs and results of one closed-form run.
#[derive(Debug, Clone, Copy)]
pub struct BlackScholesReport {
    pub inputs: OptionInputs,
    pub result: BlackScholesResult,
}

impl fmt::Display for BlackScholesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, " European Option Pricing using Black-Scholes Model ")?;
        writeln!(f, "{RULE}")?;
        write_inputs(f, &self.inputs)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Omega (ω): {:.6}", self.result.omega)?;
        writeln!(f, "European Call Option Price: {:.4}", self.result.call)?;
        writeln!(f, "European Put  Option Price: {:.4}", self.result.put)?;
        write!(f, "{RULE}")
    }
}

/// Both pricers on the same contract, with their differences.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonReport(pub PricerComparison);

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.0;
        writeln!(f, "{RULE}")?;
        writeln!(f, " Binomial Tree vs Black-Scholes ")?;
        writeln!(f, "{RULE}")?;
        write_inputs(f, &c.inputs)?;
        writeln!(f, "Number of Steps (n): {}", c.steps)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "{:<14} {:>14} {:>14} {:>12}", "", "Binomial", "Black-Scholes", "Diff")?;
        writeln!(
            f,
            "{:<14} {:>14.4} {:>14.4} {:>12.6}",
            "Call",
            c.binomial.call,
            c.black_scholes.call,
            c.call_diff()
        )?;
        writeln!(
            f,
            "{:<14} {:>14.4} {:>14.4} {:>12.6}",
            "Put",
            c.binomial.put,
            c.black_scholes.put,
            c.put_diff()
        )?;
        write!(f, "{RULE}")
    }
}

/// Table view of a convergence study.
#[derive(Debug, Clone)]
pub struct ConvergenceReport<'a>(pub &'a [ConvergencePoint]);

impl fmt::Display for ConvergenceReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>8} {:>14} {:>14} {:>12} {:>12}",
            "Steps", "Call", "Put", "Call err", "Put err"
        )?;
        writeln!(f, "{}", "-".repeat(64))?;
        for p in self.0 {
            writeln!(
                f,
                "{:>8} {:>14.4} {:>14.4} {:>12.6} {:>12.6}",
                p.steps,
                p.binomial_call,
                p.binomial_put,
                p.call_error(),
                p.put_error()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{compare_pricers, convergence_study};
    use crate::{default_scenarios, price_binomial, price_black_scholes};

    #[test]
    fn test_binomial_report_layout() {
        let (inputs, steps) = default_scenarios::binomial_reference();
        let prices = price_binomial(inputs.s0, inputs.k, inputs.t, inputs.sigma, inputs.r, steps)
            .unwrap();
        let text = BinomialReport {
            inputs,
            steps,
            prices,
        }
        .to_string();

        assert!(text.contains("Initial Stock Price (S0): 15600\n"));
        assert!(text.contains("Time to Maturity (T): 0.25 years\n"));
        assert!(text.contains("Number of Steps (n): 100\n"));
        assert!(text.contains("European Call Option Price: 652.2933\n"));
        assert!(text.contains("European Put  Option Price: 499.2300\n"));
        assert!(text.starts_with(RULE));
        assert!(text.ends_with(RULE));
    }

    #[test]
    fn test_black_scholes_report_layout() {
        let inputs = default_scenarios::black_scholes_reference();
        let result =
            price_black_scholes(inputs.s0, inputs.k, inputs.t, inputs.r, inputs.sigma).unwrap();
        let text = BlackScholesReport { inputs, result }.to_string();

        assert!(text.contains("Strike Price (K): 500\n"));
        assert!(text.contains("Omega (ω): 37.548471\n"));
        assert!(text.contains("European Call Option Price: 15183.0593\n"));
        assert!(!text.contains("Number of Steps"));
    }

    #[test]
    fn test_comparison_and_convergence_tables() {
        let inputs = OptionInputs::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        let cmp = compare_pricers(&inputs, 50).unwrap();
        let text = ComparisonReport(cmp).to_string();
        assert!(text.contains("Binomial"));
        assert!(text.lines().any(|l| l.starts_with("Call")));
        assert!(text.lines().any(|l| l.starts_with("Put")));

        let points = convergence_study(&inputs, &[10, 20]).unwrap();
        let table = ConvergenceReport(&points).to_string();
        assert_eq!(table.lines().count(), 4);
    }
}
