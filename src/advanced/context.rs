// ============================================================================
// Math Context
// A validated configuration bundled with a factorial cache
// ============================================================================

use super::algorithms;
use super::factorial::FactorialCache;
use crate::config::MathConfig;
use crate::numeric::{Decimal, NumericError, NumericResult};
use std::sync::Arc;

/// Entry point applying one [`MathConfig`] to every operation.
///
/// # Example
/// ```
/// use digitwise::prelude::*;
///
/// let ctx = MathContext::new(MathConfig::fast()).unwrap();
/// let third = ctx.divide("1", "3").unwrap();
/// assert_eq!(third.as_str(), "0.33333333333333333333");
/// ```
#[derive(Debug, Clone)]
pub struct MathContext {
    config: MathConfig,
    factorials: Arc<FactorialCache>,
}

impl MathContext {
    /// Context over the process-wide factorial cache.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the configuration does not validate.
    pub fn new(config: MathConfig) -> NumericResult<Self> {
        Self::with_cache(config, FactorialCache::global())
    }

    /// Context over an explicit factorial cache.
    pub fn with_cache(config: MathConfig, factorials: Arc<FactorialCache>) -> NumericResult<Self> {
        config
            .validate()
            .map_err(|reason| NumericError::out_of_range(reason))?;
        Ok(Self { config, factorials })
    }

    pub fn standard() -> Self {
        Self {
            config: MathConfig::standard(),
            factorials: FactorialCache::global(),
        }
    }

    pub fn config(&self) -> &MathConfig {
        &self.config
    }

    pub fn factorials(&self) -> &Arc<FactorialCache> {
        &self.factorials
    }

    /// Parse text into a decimal carrying the configured precision.
    pub fn decimal(&self, text: &str) -> NumericResult<Decimal> {
        Ok(Decimal::parse(text)?.with_precision(self.config.precision))
    }

    pub fn divide(&self, dividend: &str, divisor: &str) -> NumericResult<Decimal> {
        self.decimal(dividend)?.checked_div(&self.decimal(divisor)?)
    }

    pub fn root(&self, value: &str, degree: &str) -> NumericResult<Decimal> {
        self.decimal(value)?
            .checked_root_with(&self.decimal(degree)?, self.config.root_iterations)
    }

    pub fn power(&self, base: &str, exponent: &str) -> NumericResult<Decimal> {
        self.decimal(base)?
            .checked_pow_with(&self.decimal(exponent)?, self.config.root_iterations)
    }

    pub fn log(&self, base: &str, value: &str) -> NumericResult<Decimal> {
        algorithms::log(
            &self.decimal(base)?,
            &self.decimal(value)?,
            self.config.log_tolerance,
        )
    }

    pub fn random(&self, min: &str, max: &str, allow_decimal: bool) -> NumericResult<Decimal> {
        let value = Decimal::random_with(
            &self.decimal(min)?,
            &self.decimal(max)?,
            allow_decimal,
            self.config.random_attempts,
            &mut rand::thread_rng(),
        )?;
        Ok(value.with_precision(self.config.precision))
    }

    pub fn factorial(&self, n: &str) -> NumericResult<Decimal> {
        self.factorials.calculate(&self.decimal(n)?)
    }
}

impl Default for MathContext {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_rejected() {
        let result = MathContext::new(MathConfig::new().with_precision(0));
        assert!(matches!(result, Err(NumericError::OutOfRange { .. })));
    }

    #[test]
    fn test_precision_flows_into_division() {
        let ctx = MathContext::new(MathConfig::new().with_precision(5)).unwrap();
        assert_eq!(ctx.divide("2", "3").unwrap().as_str(), "0.66666");
        assert_eq!(ctx.decimal("1.5").unwrap().precision(), 5);
        assert!(ctx.divide("1", "0").is_err());
    }

    #[test]
    fn test_roots_and_powers() {
        let ctx = MathContext::default();
        assert_eq!(ctx.root("27", "3").unwrap().as_str(), "3");
        assert_eq!(ctx.power("2", "10").unwrap().as_str(), "1024");
        assert_eq!(ctx.power("4", "0.5").unwrap().as_str(), "2");
    }

    #[test]
    fn test_log_uses_tolerance() {
        let ctx = MathContext::default();
        assert_eq!(ctx.log("2", "1024").unwrap().as_str(), "10");
    }

    #[test]
    fn test_random_within_bounds() {
        let ctx = MathContext::new(MathConfig::fast()).unwrap();
        let min = Decimal::from(-50);
        let max = Decimal::from(50);
        for _ in 0..20 {
            let value = ctx.random("-50", "50", true).unwrap();
            assert!(value >= min && value <= max, "{}", value);
        }
    }

    #[test]
    fn test_factorial_through_private_cache() {
        let cache = Arc::new(FactorialCache::new());
        let ctx = MathContext::with_cache(MathConfig::new(), Arc::clone(&cache)).unwrap();
        assert_eq!(ctx.factorial("21").unwrap().as_str(), "51090942171709440000");
        assert_eq!(cache.len(), 22);
        assert!(ctx.factorial("1.5").is_err());
    }
}
