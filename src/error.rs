//! Error types returned by the pricing kernels.
//!
//! Every failure is terminal for the single pricing call that produced it.
//! Nothing is retried and no `NaN` or `Inf` is handed back in place of an error.

use thiserror::Error;

/// Failure modes of a pricing run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PricingError {
    /// An input is outside the domain the formulas need (non-positive price,
    /// strike, maturity or volatility, or a non-finite value).
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Name of the offending input (`s0`, `k`, `t`, `r`, `sigma`).
        name: &'static str,
        /// Value that was rejected
        value: f64,
        /// Constraint that was violated
        reason: &'static str,
    },

    /// The lattice factors admit arbitrage: the risk-neutral probability
    /// falls outside `(0, 1)` because `d < exp(r*dt) < u` does not hold.
    #[error(
        "arbitrage-inconsistent lattice: p = {p} (u = {u}, d = {d}, growth = {growth}) not in (0, 1)"
    )]
    ArbitrageInconsistent {
        /// Risk-neutral up probability
        p: f64,
        /// Up factor
        u: f64,
        /// Down factor
        d: f64,
        /// One-step growth factor `exp(r*dt)`
        growth: f64,
    },

    /// A power, price or output left the representable range.
    #[error("numeric overflow: {context}")]
    NumericOverflow {
        /// Which quantity overflowed
        context: String,
    },
}

impl PricingError {
    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        Self::NumericOverflow {
            context: context.into(),
        }
    }
}

/// Shorthand `Result` used by the pricing kernels.
pub type Result<T, E = PricingError> = std::result::Result<T, E>;

/// Require `value` to be finite and strictly positive.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(PricingError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(PricingError::InvalidParameter {
            name,
            value,
            reason: "must be strictly positive",
        });
    }
    Ok(())
}

/// Require `value` to be finite; its sign is free.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        })
    }
}
