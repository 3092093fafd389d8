use crate::error::{ensure_finite, ensure_positive, Result};

/// Contract and market inputs shared by both pricers.
///
/// Values are plain scalars and stay immutable for the duration of a pricing run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionInputs {
    /// Initial underlying price
    pub s0: f64,
    /// Strike price
    pub k: f64,
    /// Time to maturity in years
    pub t: f64,
    /// Continuously compounded risk-free rate
    pub r: f64,
    /// Annualised volatility (as decimal, e.g., 0.20 for 20%)
    pub sigma: f64,
}

impl OptionInputs {
    /// Build a validated set of inputs.
    pub fn new(s0: f64, k: f64, t: f64, r: f64, sigma: f64) -> Result<Self> {
        let inputs = Self { s0, k, t, r, sigma };
        inputs.validate()?;
        Ok(inputs)
    }

    /// Check that prices, maturity and volatility are strictly positive and
    /// that the rate is finite.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("s0", self.s0)?;
        ensure_positive("k", self.k)?;
        ensure_positive("t", self.t)?;
        ensure_finite("r", self.r)?;
        ensure_positive("sigma", self.sigma)?;
        Ok(())
    }

    /// Discount factor to maturity, `exp(-r*t)`.
    pub fn discount(&self) -> f64 {
        (-self.r * self.t).exp()
    }

    /// Forward price of the underlying, `s0 * exp(r*t)`.
    pub fn forward(&self) -> f64 {
        self.s0 * (self.r * self.t).exp()
    }
}

/// Call and put value for one contract.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricePair {
    pub call: f64,
    pub put: f64,
}

impl PricePair {
    /// Deviation from put-call parity: `(call - put) - (s0 - k*exp(-r*t))`.
    pub fn parity_gap(&self, inputs: &OptionInputs) -> f64 {
        (self.call - self.put) - (inputs.s0 - inputs.k * inputs.discount())
    }
}

/// Output of the closed-form pricer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlackScholesResult {
    pub call: f64,
    pub put: f64,
    /// Standardised normal variate fed to the CDF
    pub omega: f64,
}

impl From<BlackScholesResult> for PricePair {
    fn from(r: BlackScholesResult) -> Self {
        PricePair {
            call: r.call,
            put: r.put,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricingError;

    #[test]
    fn test_inputs_validation() {
        assert!(OptionInputs::new(100.0, 100.0, 1.0, 0.05, 0.2).is_ok());
        assert!(OptionInputs::new(100.0, 100.0, 1.0, -0.01, 0.2).is_ok()); // negative rate

        assert!(OptionInputs::new(0.0, 100.0, 1.0, 0.05, 0.2).is_err()); // s0
        assert!(OptionInputs::new(100.0, -1.0, 1.0, 0.05, 0.2).is_err()); // k
        assert!(OptionInputs::new(100.0, 100.0, 0.0, 0.05, 0.2).is_err()); // t
        assert!(OptionInputs::new(100.0, 100.0, 1.0, f64::NAN, 0.2).is_err()); // r
        assert!(OptionInputs::new(100.0, 100.0, 1.0, 0.05, 0.0).is_err()); // sigma
    }

    #[test]
    fn test_first_invalid_field_is_reported() {
        let err = OptionInputs::new(100.0, 0.0, 0.0, 0.05, 0.2).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidParameter { name: "k", .. }
        ));
    }

    #[test]
    fn test_parity_gap_of_exact_pair() {
        let inputs = OptionInputs::new(100.0, 95.0, 0.5, 0.03, 0.25).unwrap();
        let call = 12.0;
        let put = call - (inputs.s0 - inputs.k * inputs.discount());
        let pair = PricePair { call, put };
        assert!(pair.parity_gap(&inputs).abs() < 1e-12);
    }

    #[test]
    fn test_forward_and_discount_are_reciprocal() {
        let inputs = OptionInputs::new(50.0, 50.0, 2.0, 0.04, 0.3).unwrap();
        assert!((inputs.forward() * inputs.discount() - inputs.s0).abs() < 1e-12);
    }
}
