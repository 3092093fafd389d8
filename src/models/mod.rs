pub mod binomial;
pub mod bs;

/// Common traits shared by the pricers
pub mod traits {
    use crate::error::Result;
    use crate::types::{OptionInputs, PricePair};

    /// A method that prices a European call and put from the same inputs.
    pub trait EuropeanPricer {
        /// Short identifier used in reports and logs (e.g., "binomial")
        fn name(&self) -> &str;

        /// Price both legs for the given contract.
        fn price(&self, inputs: &OptionInputs) -> Result<PricePair>;
    }
}

/// Payoff helpers shared by the pricers
pub mod utils {
    /// Call payoff at expiry, `max(s - k, 0)`.
    #[inline]
    pub fn call_payoff(spot: f64, strike: f64) -> f64 {
        (spot - strike).max(0.0)
    }

    /// Put payoff at expiry, `max(k - s, 0)`.
    #[inline]
    pub fn put_payoff(spot: f64, strike: f64) -> f64 {
        (strike - spot).max(0.0)
    }

    /// Log-moneyness: ln(K/S)
    pub fn log_moneyness(strike: f64, spot: f64) -> f64 {
        (strike / spot).ln()
    }
}
