// ============================================================================
// Advanced Module
// Constants, higher-math algorithms, factorials and the math context
// ============================================================================

pub mod algorithms;
pub mod constants;
mod context;
mod factorial;

pub use algorithms::{
    euclid_algorithm, exp, gcf, lcm, log, prime_factor, to_degrees, to_radians,
};
pub use context::MathContext;
pub use factorial::{Factorial, FactorialCache};
