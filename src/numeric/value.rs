// ============================================================================
// Numeric Value
// Closed union over the two value representations
// ============================================================================

use super::compare::Symbols;
use super::decimal::Decimal;
use super::errors::{NumericError, NumericResult};
use super::fraction::Fraction;
use std::fmt;
use std::str::FromStr;

/// Either a decimal or a fraction.
///
/// Arithmetic between two decimals stays decimal; any fraction operand
/// promotes the operation (and result) to a fraction.
///
/// Equality is by exact value across representations, so `0.5 == 1/2`.
#[derive(Debug, Clone)]
pub enum Numeric {
    Decimal(Decimal),
    Fraction(Fraction),
}

impl Numeric {
    /// Parse text, choosing a fraction when it contains `/`.
    pub fn parse(text: &str) -> NumericResult<Self> {
        if text.contains('/') {
            Fraction::parse(text).map(Numeric::Fraction)
        } else {
            Decimal::parse(text).map(Numeric::Decimal)
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Numeric::Decimal(d) => d.is_negative(),
            Numeric::Fraction(f) => f.is_negative(),
        }
    }

    pub fn to_decimal(&self) -> NumericResult<Decimal> {
        match self {
            Numeric::Decimal(d) => Ok(d.clone()),
            Numeric::Fraction(f) => f.to_decimal(),
        }
    }

    pub fn to_fraction(&self) -> Fraction {
        match self {
            Numeric::Decimal(d) => Fraction::from_decimal(d),
            Numeric::Fraction(f) => f.clone(),
        }
    }

    /// Decimal text, falling back to the display form when the value cannot
    /// be evaluated (a fraction over zero).
    pub fn as_string(&self) -> String {
        self.to_decimal()
            .map(|d| d.to_string())
            .unwrap_or_else(|_| self.to_string())
    }

    /// Compare by value across representations.
    pub fn compare_signs(&self, other: &Numeric) -> NumericResult<Symbols> {
        let lhs = self.to_decimal()?;
        let rhs = other.to_decimal()?;
        Ok(lhs.compare_signs(&rhs))
    }

    fn combine(
        &self,
        rhs: &Numeric,
        decimal_op: fn(&Decimal, &Decimal) -> NumericResult<Decimal>,
        fraction_op: fn(&Fraction, &Fraction) -> NumericResult<Fraction>,
    ) -> NumericResult<Numeric> {
        match (self, rhs) {
            (Numeric::Decimal(a), Numeric::Decimal(b)) => decimal_op(a, b).map(Numeric::Decimal),
            _ => fraction_op(&self.to_fraction(), &rhs.to_fraction()).map(Numeric::Fraction),
        }
    }

    pub fn checked_add(&self, rhs: &Numeric) -> NumericResult<Numeric> {
        self.combine(rhs, Decimal::checked_add, Fraction::checked_add)
    }

    pub fn checked_sub(&self, rhs: &Numeric) -> NumericResult<Numeric> {
        self.combine(rhs, Decimal::checked_sub, Fraction::checked_sub)
    }

    pub fn checked_mul(&self, rhs: &Numeric) -> NumericResult<Numeric> {
        self.combine(rhs, Decimal::checked_mul, Fraction::checked_mul)
    }

    pub fn checked_div(&self, rhs: &Numeric) -> NumericResult<Numeric> {
        self.combine(rhs, Decimal::checked_div, Fraction::checked_div)
    }
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Numeric::Decimal(a), Numeric::Decimal(b)) => a == b,
            _ => self.to_fraction() == other.to_fraction(),
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Decimal(d) => fmt::Display::fmt(d, f),
            Numeric::Fraction(fr) => fmt::Display::fmt(fr, f),
        }
    }
}

impl FromStr for Numeric {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Decimal> for Numeric {
    fn from(value: Decimal) -> Self {
        Numeric::Decimal(value)
    }
}

impl From<Fraction> for Numeric {
    fn from(value: Fraction) -> Self {
        Numeric::Fraction(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(text: &str) -> Numeric {
        text.parse().unwrap()
    }

    #[test]
    fn test_parse_chooses_representation() {
        assert!(matches!(n("1.5"), Numeric::Decimal(_)));
        assert!(matches!(n("3/4"), Numeric::Fraction(_)));
    }

    #[test]
    fn test_decimal_arithmetic_stays_decimal() {
        let sum = n("1.5").checked_add(&n("2")).unwrap();
        assert!(matches!(sum, Numeric::Decimal(_)));
        assert_eq!(sum.to_string(), "3.5");
    }

    #[test]
    fn test_mixed_arithmetic_promotes() {
        let sum = n("0.5").checked_add(&n("1/4")).unwrap();
        assert!(matches!(sum, Numeric::Fraction(_)));
        assert_eq!(sum.as_string(), "0.75");

        let quotient = n("1/3").checked_div(&n("2")).unwrap();
        assert_eq!(quotient.to_string(), "1/6");
    }

    #[test]
    fn test_as_string_fallback() {
        assert_eq!(n("5/0").as_string(), "5/0");
        assert_eq!(n("-1/2").as_string(), "-0.5");
    }

    #[test]
    fn test_cross_representation_compare() {
        let symbols = n("1/2").compare_signs(&n("0.5")).unwrap();
        assert!(symbols.eq);
        assert!(n("-3/4").is_negative());
    }

    #[test]
    fn test_equality_by_value() {
        assert_eq!(n("1/2"), n("0.5"));
        assert_eq!(n("0.5"), n("2/4"));
        assert_eq!(n("0/0"), n("0"));
        assert_ne!(n("1/3"), n("0.3333"));
        assert_ne!(n("5/0"), n("5/0"));
    }
}
