// ============================================================================
// Numeric Module
// Arbitrary-precision values built on textual digit manipulation
// ============================================================================
//
// This module provides:
// - Decimal: signed decimal held as a canonical digit string
// - Fraction: numerator/denominator pair of decimals with one sign bit
// - Numeric: closed union of the two
// - digits: validation and canonicalization of numeric text
// - NumericError: error types for parsing and arithmetic
//
// Design principles:
// - No native big-number type; every operation walks digits with explicit
//   carry, borrow and decimal-point alignment
// - All fallible arithmetic returns Result (no panics)
// - Non-terminating division is bounded by a per-value precision

mod compare;
mod decimal;
pub mod digits;
mod errors;
mod fraction;
mod magnitude;
mod random;
mod rounding;
mod value;

#[cfg(test)]
mod properties;

pub use compare::{compare_canonical, relation_holds, Relation, Symbols};
pub use decimal::{Decimal, DEFAULT_PRECISION, DEFAULT_ROOT_ITERATIONS};
pub use errors::{ErrorKind, NumericError, NumericResult};
pub use fraction::Fraction;
pub use random::DEFAULT_RANDOM_ATTEMPTS;
pub use value::Numeric;

pub(crate) use decimal::euclid;
