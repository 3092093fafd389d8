use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::types::OptionInputs;

/// Inputs for a binomial lattice run
#[derive(Debug, Clone, Deserialize)]
pub struct BinomialConfig {
    /// Initial underlying price
    #[serde(default = "default_binomial_s0")]
    pub s0: f64,
    /// Strike price
    #[serde(default = "default_binomial_k")]
    pub k: f64,
    /// Time to maturity in years
    #[serde(default = "default_t")]
    pub t: f64,
    /// Risk-free rate
    #[serde(default = "default_r")]
    pub r: f64,
    /// Volatility
    #[serde(default = "default_sigma")]
    pub sigma: f64,
    /// Number of lattice steps
    #[serde(default = "default_steps")]
    pub steps: usize,
}

impl Default for BinomialConfig {
    fn default() -> Self {
        Self {
            s0: default_binomial_s0(),
            k: default_binomial_k(),
            t: default_t(),
            r: default_r(),
            sigma: default_sigma(),
            steps: default_steps(),
        }
    }
}

impl BinomialConfig {
    pub fn inputs(&self) -> OptionInputs {
        OptionInputs {
            s0: self.s0,
            k: self.k,
            t: self.t,
            r: self.r,
            sigma: self.sigma,
        }
    }
}

/// Inputs for a closed-form run
#[derive(Debug, Clone, Deserialize)]
pub struct BlackScholesConfig {
    #[serde(default = "default_bs_s0")]
    pub s0: f64,
    #[serde(default = "default_bs_k")]
    pub k: f64,
    #[serde(default = "default_t")]
    pub t: f64,
    #[serde(default = "default_r")]
    pub r: f64,
    #[serde(default = "default_sigma")]
    pub sigma: f64,
}

impl Default for BlackScholesConfig {
    fn default() -> Self {
        Self {
            s0: default_bs_s0(),
            k: default_bs_k(),
            t: default_t(),
            r: default_r(),
            sigma: default_sigma(),
        }
    }
}

impl BlackScholesConfig {
    pub fn inputs(&self) -> OptionInputs {
        OptionInputs {
            s0: self.s0,
            k: self.k,
            t: self.t,
            r: self.r,
            sigma: self.sigma,
        }
    }
}

/// Step counts swept by the convergence study
#[derive(Debug, Clone, Deserialize)]
pub struct ConvergenceConfig {
    #[serde(default = "default_sweep")]
    pub steps: Vec<usize>,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            steps: default_sweep(),
        }
    }
}

/// Main configuration struct for a pricing session
///
/// Every section and field is optional in TOML; missing values fall back to
/// the reference parameter sets.
///
/// ```toml
/// [binomial]
/// s0 = 15600.0
/// k = 15700.0
/// steps = 250
///
/// [black_scholes]
/// k = 15000.0
///
/// [convergence]
/// steps = [10, 100, 1000]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub binomial: BinomialConfig,

    #[serde(default)]
    pub black_scholes: BlackScholesConfig,

    #[serde(default)]
    pub convergence: ConvergenceConfig,
}

impl PricingConfig {
    /// Both reference runs with a 100-step lattice
    pub fn reference() -> Self {
        Self::default()
    }

    /// Coarse lattice for quick checks
    pub fn quick() -> Self {
        Self {
            binomial: BinomialConfig {
                steps: 25,
                ..BinomialConfig::default()
            },
            black_scholes: BlackScholesConfig::default(),
            convergence: ConvergenceConfig {
                steps: vec![5, 10, 25, 50],
            },
        }
    }

    /// Dense lattice for tight agreement with the closed form
    pub fn fine() -> Self {
        Self {
            binomial: BinomialConfig {
                steps: 2000,
                ..BinomialConfig::default()
            },
            black_scholes: BlackScholesConfig::default(),
            convergence: ConvergenceConfig {
                steps: vec![50, 100, 250, 500, 1000, 2000, 5000],
            },
        }
    }

    /// Parse a TOML document and validate it.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).context("failed to parse pricing config")?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid config in {}", path.display()))
    }

    /// Check both input sets and the sweep.
    pub fn validate(&self) -> Result<()> {
        self.binomial
            .inputs()
            .validate()
            .context("[binomial]")?;
        self.black_scholes
            .inputs()
            .validate()
            .context("[black_scholes]")?;
        if self.convergence.steps.is_empty() {
            return Err(anyhow!("[convergence] steps must not be empty"));
        }
        if self.convergence.steps.contains(&0) {
            return Err(anyhow!("[convergence] steps must all be >= 1"));
        }
        Ok(())
    }
}

fn default_binomial_s0() -> f64 {
    15600.0
}

fn default_binomial_k() -> f64 {
    15700.0
}

fn default_bs_s0() -> f64 {
    15675.0
}

fn default_bs_k() -> f64 {
    500.0
}

fn default_t() -> f64 {
    0.25
}

fn default_r() -> f64 {
    0.065
}

fn default_sigma() -> f64 {
    0.1846
}

fn default_steps() -> usize {
    100
}

fn default_sweep() -> Vec<usize> {
    vec![10, 25, 50, 100, 250, 500, 1000]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_reference() {
        let config = PricingConfig::from_toml_str("").unwrap();
        assert_eq!(config.binomial.s0, 15600.0);
        assert_eq!(config.binomial.k, 15700.0);
        assert_eq!(config.binomial.steps, 100);
        assert_eq!(config.black_scholes.s0, 15675.0);
        assert_eq!(config.black_scholes.k, 500.0);
        assert_eq!(config.black_scholes.sigma, 0.1846);
    }

    #[test]
    fn test_partial_override() {
        let config = PricingConfig::from_toml_str(
            r#"
            [binomial]
            steps = 250
            r = 0.01

            [convergence]
            steps = [10, 20]
            "#,
        )
        .unwrap();
        assert_eq!(config.binomial.steps, 250);
        assert_eq!(config.binomial.r, 0.01);
        assert_eq!(config.binomial.s0, 15600.0);
        assert_eq!(config.convergence.steps, vec![10, 20]);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = PricingConfig::from_toml_str("[black_scholes]\nsigma = 0.0\n").unwrap_err();
        assert!(format!("{:#}", err).contains("sigma"));

        assert!(PricingConfig::from_toml_str("[convergence]\nsteps = []\n").is_err());
        assert!(PricingConfig::from_toml_str("[convergence]\nsteps = [0, 5]\n").is_err());
        assert!(PricingConfig::from_toml_str("[binomial]\ns0 = \"abc\"\n").is_err());
    }

    #[test]
    fn test_presets_validate() {
        for config in [
            PricingConfig::reference(),
            PricingConfig::quick(),
            PricingConfig::fine(),
        ] {
            assert!(config.validate().is_ok());
        }
        assert!(PricingConfig::quick().binomial.steps < PricingConfig::fine().binomial.steps);
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = PricingConfig::from_file("/nonexistent/vanilla.toml").unwrap_err();
        assert!(format!("{}", err).contains("failed to read config file"));
    }
}
