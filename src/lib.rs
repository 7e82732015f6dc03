// ============================================================================
// Digitwise Library
// Arbitrary-precision decimal, fraction and binary arithmetic on digit strings
// ============================================================================

//! # Digitwise
//!
//! Arbitrary-precision arithmetic where every value is a normalized digit
//! string and every operation walks those digits directly.
//!
//! ## Features
//!
//! - **Decimal values** with carry/borrow arithmetic and precision-bounded
//!   long division
//! - **Fractions** with simplification, common denominators and exact
//!   cross-multiplied comparison
//! - **Base conversion** (2 to 36) and fixed-width **binary logic**
//! - **Higher math**: GCF/LCM, logarithms, roots, prime factors and a
//!   shared factorial cache
//!
//! ## Example
//!
//! ```rust
//! use digitwise::prelude::*;
//!
//! let a: Decimal = "123.450".parse().unwrap();
//! let b = Decimal::from(2);
//! assert_eq!(a.as_str(), "123.45");
//! assert_eq!((&a * &b).as_str(), "246.9");
//!
//! let third = Decimal::one().with_precision(10).checked_div(&Decimal::from(3)).unwrap();
//! assert_eq!(third.as_str(), "0.3333333333");
//!
//! let mut ratio: Fraction = "8/12".parse().unwrap();
//! ratio.simplify().unwrap();
//! assert_eq!(ratio.to_string(), "2/3");
//! ```

pub mod advanced;
pub mod config;
pub mod convert;
pub mod interfaces;
pub mod numeric;

#[cfg(feature = "serde")]
pub mod serialization;

// Re-exports for convenience
pub mod prelude {
    pub use crate::advanced::constants;
    pub use crate::advanced::{
        euclid_algorithm, exp, gcf, lcm, log, prime_factor, to_degrees, to_radians, Factorial,
        FactorialCache, MathContext,
    };
    pub use crate::config::MathConfig;
    pub use crate::convert::{
        binary_to_text, from_base, from_binary, text_to_binary, to_base, to_binary, Binary,
    };
    pub use crate::interfaces::NumericValue;
    pub use crate::numeric::{
        Decimal, ErrorKind, Fraction, Numeric, NumericError, NumericResult, Relation, Symbols,
    };
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use std::sync::Arc;

    fn d(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    #[test]
    fn test_canonical_forms() {
        assert_eq!(d("123.450").to_string(), "123.45");
        assert_eq!(d("0005").to_string(), "5");
        assert_eq!(d("-0").to_string(), "0");
        assert_eq!(d("1.5e2").to_string(), "150");
    }

    #[test]
    fn test_divisors() {
        assert_eq!(gcf(&[d("12"), d("18")]).unwrap(), d("6"));
        assert_eq!(lcm(&[d("4"), d("6")]).unwrap(), d("12"));
    }

    #[test]
    fn test_factorial_cache_contract() {
        let cache = Arc::new(FactorialCache::new());
        let ctx = MathContext::with_cache(MathConfig::standard(), Arc::clone(&cache)).unwrap();

        assert_eq!(ctx.factorial("5").unwrap(), d("120"));
        assert_eq!(ctx.factorial("5").unwrap(), d("120"));

        let err = cache.insert(&d("5"), &d("120")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateKey);
    }

    #[test]
    fn test_binary_gates() {
        let x: Binary = "1010".parse().unwrap();
        let y: Binary = "0110".parse().unwrap();
        assert_eq!((&x & &y).as_str(), "0000000000000010");
        assert!((&x ^ &x).is_zero());
    }

    #[test]
    fn test_fraction_simplification() {
        let fraction = Fraction::new(d("8"), d("12"));
        assert_eq!(fraction.simplified().unwrap().to_string(), "2/3");
    }

    #[test]
    fn test_one_third_terminates() {
        let value = Decimal::one().checked_div(&d("3")).unwrap();
        let fraction = value.as_str().split_once('.').unwrap().1;
        assert!(fraction.len() <= value.precision() + 1);
        assert!(fraction.chars().all(|c| c == '3'));
    }

    #[test]
    fn test_mixed_numeric_pipeline() {
        let half = Numeric::parse("1/2").unwrap();
        let quarter = Numeric::parse("0.25").unwrap();
        let sum = half.checked_add(&quarter).unwrap();
        assert_eq!(sum.to_decimal().unwrap(), d("0.75"));
        assert!(sum.relation(Relation::Gt, &d("0.7")).unwrap());
        assert_eq!(d("-2.5").tagged(), "Decimal -;- -2.5");
    }

    #[test]
    fn test_base_round_trip() {
        let value = d("48879");
        let hex = to_base(&value, 16).unwrap();
        assert_eq!(hex, "beef");
        assert_eq!(from_base("BEEF", 16).unwrap(), value);

        let text = binary_to_text(&text_to_binary("ok").unwrap()).unwrap();
        assert_eq!(text, "ok");
    }

    #[test]
    fn test_errors_leave_value_unchanged() {
        let mut value = d("10");
        assert!(value.div_assign(&d("0")).is_err());
        assert_eq!(value, d("10"));

        value.div_assign(&d("4")).unwrap();
        assert_eq!(value, d("2.5"));
    }
}
