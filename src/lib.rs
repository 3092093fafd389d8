//! # Vanilla-Lib: European Option Pricing by Lattice and Closed Form
//!
//! `vanilla-lib` prices European calls and puts with two independent methods so that
//! one can be checked against the other:
//!
//! - **Binomial lattice**: Cox-Ross-Rubinstein tree with in-place backward induction
//! - **Black-Scholes**: closed-form call with a fifth-order polynomial normal CDF,
//!   put from put-call parity
//!
//! ## Quick Start
//!
//! ```rust
//! use vanilla_lib::{price_binomial, price_black_scholes};
//!
//! // 100-step lattice: (S0, K, T, sigma, r, n)
//! let lattice = price_binomial(15600.0, 15700.0, 0.25, 0.1846, 0.065, 100)?;
//!
//! // Closed form: (S0, K, T, r, sigma)
//! let closed = price_black_scholes(15600.0, 15700.0, 0.25, 0.065, 0.1846)?;
//!
//! assert!((lattice.call - closed.call).abs() < 2.0);
//! # Ok::<(), vanilla_lib::PricingError>(())
//! ```
//!
//! ## Errors
//!
//! Kernels return [`PricingError`]: invalid inputs, arbitrage-inconsistent lattice
//! factors and floating-point overflow are reported instead of yielding `NaN`/`Inf`.
//!
//! ## Configuration Presets
//!
//! With the `serde` feature, pricing sessions can be loaded from TOML via
//! [`PricingConfig`], with presets in [`default_configs`]:
//! - `reference()`: the two reference runs, 100-step lattice
//! - `quick()`: coarse lattice for smoke checks
//! - `fine()`: dense lattice for tight agreement with the closed form

// ================================================================================================
// MODULES
// ================================================================================================

pub mod analysis;
#[cfg(feature = "serde")]
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod types;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

// Errors
pub use error::{PricingError, Result};

// Core types
pub use types::{BlackScholesResult, OptionInputs, PricePair};

// Pricers
pub use models::binomial::{price_binomial, BinomialFactors, BinomialTreePricer};
pub use models::bs::{exact_norm_cdf, norm_cdf, price_black_scholes, BlackScholesPricer};
pub use models::traits::EuropeanPricer;

// Diagnostics and reports
pub use analysis::{
    cdf_accuracy, compare_pricers, convergence_study, write_convergence_csv, CdfAccuracy,
    ConvergencePoint, PricerComparison,
};
pub use report::{BinomialReport, BlackScholesReport, ComparisonReport, ConvergenceReport};

#[cfg(feature = "serde")]
pub use config::{BinomialConfig, BlackScholesConfig, ConvergenceConfig, PricingConfig};

// ================================================================================================
// DEFAULT SCENARIOS
// ================================================================================================

/// Reference parameter sets for the two pricers.
///
/// The sets are deliberately different (the closed-form one is deep in the money) and are not
/// meant to be compared with each other. Use [`compare_pricers`] with a single [`OptionInputs`]
/// for a like-for-like check.
pub mod default_scenarios {
    use crate::types::OptionInputs;

    /// Lattice reference run: `S0 = 15600, K = 15700, T = 0.25, r = 0.065, sigma = 0.1846`
    /// with 100 steps.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vanilla_lib::{default_scenarios, BinomialTreePricer, EuropeanPricer};
    ///
    /// let (inputs, steps) = default_scenarios::binomial_reference();
    /// let prices = BinomialTreePricer::new(steps).price(&inputs)?;
    /// assert!(prices.call > prices.put);
    /// # Ok::<(), vanilla_lib::PricingError>(())
    /// ```
    pub fn binomial_reference() -> (OptionInputs, usize) {
        (
            OptionInputs {
                s0: 15600.0,
                k: 15700.0,
                t: 0.25,
                r: 0.065,
                sigma: 0.1846,
            },
            100,
        )
    }

    /// Closed-form reference run: `S0 = 15675, K = 500, T = 0.25, r = 0.065, sigma = 0.1846`.
    pub fn black_scholes_reference() -> OptionInputs {
        OptionInputs {
            s0: 15675.0,
            k: 500.0,
            t: 0.25,
            r: 0.065,
            sigma: 0.1846,
        }
    }
}

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured pricing sessions.
///
/// # Available Configurations
///
/// - [`reference()`](default_configs::reference): both reference runs, 100 lattice steps
/// - [`quick()`](default_configs::quick): 25 lattice steps, short convergence sweep
/// - [`fine()`](default_configs::fine): 2,000 lattice steps, sweep up to 5,000
#[cfg(feature = "serde")]
pub mod default_configs {
    use crate::config::PricingConfig;

    /// Reference runs as published with the two pricers.
    ///
    /// ```rust
    /// use vanilla_lib::default_configs;
    ///
    /// let config = default_configs::reference();
    /// assert_eq!(config.binomial.steps, 100);
    /// ```
    pub fn reference() -> PricingConfig {
        PricingConfig::reference()
    }

    /// Coarse lattice for smoke tests and debugging.
    pub fn quick() -> PricingConfig {
        PricingConfig::quick()
    }

    /// Dense lattice; expect O(n²) runtime to dominate.
    pub fn fine() -> PricingConfig {
        PricingConfig::fine()
    }
}
