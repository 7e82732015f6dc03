// ============================================================================
// Math Configuration
// Precision and iteration bounds for values created through a context
// ============================================================================

use crate::numeric::{DEFAULT_PRECISION, DEFAULT_RANDOM_ATTEMPTS, DEFAULT_ROOT_ITERATIONS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default logarithm tolerance (iterations = tolerance + 20).
pub const DEFAULT_LOG_TOLERANCE: usize = 20;

/// Bounds applied by [`MathContext`](crate::advanced::MathContext).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MathConfig {
    /// Maximum fractional digits a division generates before truncating
    pub precision: usize,

    /// Logarithm tolerance; bisection runs `log_tolerance + 20` steps
    pub log_tolerance: usize,

    /// Candidates drawn before random generation clamps to a bound
    pub random_attempts: usize,

    /// Newton iteration cap for roots and fractional powers
    pub root_iterations: usize,
}

impl MathConfig {
    /// Create a configuration with default bounds
    pub fn new() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            log_tolerance: DEFAULT_LOG_TOLERANCE,
            random_attempts: DEFAULT_RANDOM_ATTEMPTS,
            root_iterations: DEFAULT_ROOT_ITERATIONS,
        }
    }

    /// Builder method: Set division precision
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder method: Set logarithm tolerance
    pub fn with_log_tolerance(mut self, tolerance: usize) -> Self {
        self.log_tolerance = tolerance;
        self
    }

    /// Builder method: Set random retry cap
    pub fn with_random_attempts(mut self, attempts: usize) -> Self {
        self.random_attempts = attempts;
        self
    }

    /// Builder method: Set root iteration cap
    pub fn with_root_iterations(mut self, iterations: usize) -> Self {
        self.root_iterations = iterations;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.precision == 0 {
            return Err("Precision must be positive".to_string());
        }

        if self.random_attempts == 0 {
            return Err("Random attempts must be positive".to_string());
        }

        if self.root_iterations == 0 {
            return Err("Root iterations must be positive".to_string());
        }

        Ok(())
    }
}

impl Default for MathConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl MathConfig {
    /// Default bounds: 100 digits of precision
    pub fn standard() -> Self {
        Self::new()
    }

    /// 500 digits of precision, longer logarithm bisection
    pub fn high_precision() -> Self {
        Self::new().with_precision(500).with_log_tolerance(60)
    }

    /// 20 digits of precision and tighter iteration caps
    pub fn fast() -> Self {
        Self::new()
            .with_precision(20)
            .with_random_attempts(50)
            .with_root_iterations(50)
    }
}
