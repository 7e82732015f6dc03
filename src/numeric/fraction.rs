// ============================================================================
// Fraction Value
// Numerator/denominator pair of decimals with an independent sign
// ============================================================================
//
// Both components are kept as non-negative integers: decimal components are
// scaled by a common power of ten on construction and any signs are folded
// into the single `negative` flag. A zero denominator is tolerated until the
// fraction is used; `0/0` is read as zero.

use super::decimal::{euclid, Decimal};
use super::digits;
use super::errors::{NumericError, NumericResult};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Clone)]
pub struct Fraction {
    numerator: Decimal,
    denominator: Decimal,
    negative: bool,
}

impl Fraction {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Build a fraction, clearing decimal points and folding signs.
    pub fn new(numerator: Decimal, denominator: Decimal) -> Self {
        let negative = numerator.is_negative() ^ denominator.is_negative();
        let places = numerator.scale().max(denominator.scale());
        let numerator = numerator.abs().shift_left(places);
        let denominator = denominator.abs().shift_left(places);

        Self {
            negative: negative && !numerator.is_zero(),
            numerator,
            denominator,
        }
    }

    /// Parse `"n/d"`, or a plain number as `n/1` scaled to integers.
    ///
    /// # Errors
    /// Returns `MalformedNumber` if either side fails the numeric grammar or
    /// is empty.
    pub fn parse(text: &str) -> NumericResult<Self> {
        if !digits::is_valid(text) {
            return Err(NumericError::malformed(text));
        }
        match text.split_once('/') {
            Some((numerator, denominator)) => {
                if numerator.trim().is_empty() || denominator.trim().is_empty() {
                    return Err(NumericError::malformed(text));
                }
                Ok(Self::new(
                    Decimal::parse(numerator)?,
                    Decimal::parse(denominator)?,
                ))
            },
            None => Ok(Self::from_decimal(&Decimal::parse(text)?)),
        }
    }

    /// Exact fraction `value * 10^k / 10^k` for a value with `k` fractional
    /// digits. Not simplified.
    pub fn from_decimal(value: &Decimal) -> Self {
        let places = value.scale();
        Self::new(value.shift_left(places), Decimal::one().shift_left(places))
    }

    pub fn from_integer(value: i64) -> Self {
        Self::new(Decimal::from(value), Decimal::one())
    }

    pub fn zero() -> Self {
        Self::from_integer(0)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Unsigned numerator.
    #[inline]
    pub fn numerator(&self) -> &Decimal {
        &self.numerator
    }

    /// Unsigned denominator.
    #[inline]
    pub fn denominator(&self) -> &Decimal {
        &self.denominator
    }

    /// Numerator carrying the fraction's sign.
    pub fn signed_numerator(&self) -> Decimal {
        if self.negative {
            self.numerator.negate()
        } else {
            self.numerator.clone()
        }
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn negate(&self) -> Fraction {
        Self {
            numerator: self.numerator.clone(),
            denominator: self.denominator.clone(),
            negative: !self.negative && !self.numerator.is_zero(),
        }
    }

    pub fn abs(&self) -> Fraction {
        Self {
            negative: false,
            ..self.clone()
        }
    }

    // ========================================================================
    // Simplification
    // ========================================================================

    /// Divide numerator and denominator by their greatest common divisor.
    ///
    /// `0/0` and `0/d` both reduce to `0/1`.
    ///
    /// # Errors
    /// Returns `ZeroDenominator` for a non-zero numerator over zero.
    pub fn simplify(&mut self) -> NumericResult<&mut Self> {
        let simplified = self.simplified()?;
        *self = simplified;
        Ok(self)
    }

    /// Simplified copy of this fraction.
    pub fn simplified(&self) -> NumericResult<Fraction> {
        let operand = self.operand()?;
        if operand.numerator.is_zero() {
            return Ok(Self::zero());
        }

        let gcd = euclid(&operand.numerator, &operand.denominator)?;
        Ok(Self {
            numerator: operand.numerator.checked_div(&gcd)?,
            denominator: operand.denominator.checked_div(&gcd)?,
            negative: operand.negative,
        })
    }

    /// Validate the denominator and map `0/0` to zero.
    fn operand(&self) -> NumericResult<Fraction> {
        if self.denominator.is_zero() {
            if self.numerator.is_zero() {
                return Ok(Self::zero());
            }
            return Err(NumericError::ZeroDenominator);
        }
        Ok(self.clone())
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Addition over a common denominator.
    ///
    /// Equal denominators add numerators directly; a denominator of one is
    /// scaled up to the other; otherwise both sides move to the least
    /// common denominator. The result is not simplified.
    pub fn checked_add(&self, rhs: &Fraction) -> NumericResult<Fraction> {
        let lhs = self.operand()?;
        let rhs = rhs.operand()?;
        let a = lhs.signed_numerator();
        let b = rhs.signed_numerator();

        if lhs.denominator == rhs.denominator {
            return Ok(Self::new(a.checked_add(&b)?, lhs.denominator));
        }
        if lhs.denominator.is_one() {
            let scaled = a.checked_mul(&rhs.denominator)?;
            return Ok(Self::new(scaled.checked_add(&b)?, rhs.denominator));
        }
        if rhs.denominator.is_one() {
            let scaled = b.checked_mul(&lhs.denominator)?;
            return Ok(Self::new(a.checked_add(&scaled)?, lhs.denominator));
        }

        let lcd = lcm_pair(&lhs.denominator, &rhs.denominator)?;
        let a = a.checked_mul(&lcd.checked_div(&lhs.denominator)?)?;
        let b = b.checked_mul(&lcd.checked_div(&rhs.denominator)?)?;
        Ok(Self::new(a.checked_add(&b)?, lcd))
    }

    pub fn checked_sub(&self, rhs: &Fraction) -> NumericResult<Fraction> {
        self.checked_add(&rhs.negate())
    }

    pub fn checked_mul(&self, rhs: &Fraction) -> NumericResult<Fraction> {
        let lhs = self.operand()?;
        let rhs = rhs.operand()?;
        Ok(Self::new(
            lhs.signed_numerator().checked_mul(&rhs.signed_numerator())?,
            lhs.denominator.checked_mul(&rhs.denominator)?,
        ))
    }

    /// Multiply by the reciprocal of `rhs`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero.
    pub fn checked_div(&self, rhs: &Fraction) -> NumericResult<Fraction> {
        self.checked_mul(&rhs.reciprocal()?)
    }

    /// Swap numerator and denominator.
    pub fn reciprocal(&self) -> NumericResult<Fraction> {
        let operand = self.operand()?;
        if operand.numerator.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Self {
            numerator: operand.denominator,
            denominator: operand.numerator,
            negative: operand.negative,
        })
    }

    /// Evaluate as a decimal (numerator divided by denominator).
    pub fn to_decimal(&self) -> NumericResult<Decimal> {
        let operand = self.operand()?;
        let value = operand.numerator.checked_div(&operand.denominator)?;
        Ok(if operand.negative { value.negate() } else { value })
    }

    // ========================================================================
    // Common Denominators
    // ========================================================================

    /// Rewrite every fraction over their least common denominator.
    ///
    /// # Errors
    /// Returns `ZeroDenominator` if any fraction has a zero denominator with
    /// a non-zero numerator; nothing is modified in that case.
    pub fn lcd(fractions: &mut [Fraction]) -> NumericResult<()> {
        let operands = fractions
            .iter()
            .map(Fraction::operand)
            .collect::<NumericResult<Vec<_>>>()?;

        let Some(first) = operands.first() else {
            return Ok(());
        };
        let lcd = operands
            .iter()
            .skip(1)
            .try_fold(first.denominator.clone(), |acc, f| lcm_pair(&acc, &f.denominator))?;

        for (slot, operand) in fractions.iter_mut().zip(operands) {
            let factor = lcd.checked_div(&operand.denominator)?;
            *slot = Self {
                numerator: operand.numerator.checked_mul(&factor)?,
                denominator: lcd.clone(),
                negative: operand.negative,
            };
        }
        Ok(())
    }

    fn commit(&mut self, result: Fraction) {
        *self = result;
    }
}

macro_rules! assign_ops {
    ($($assign:ident => $checked:ident),* $(,)?) => {
        impl Fraction {
            $(
                #[doc = concat!("In-place form of [`", stringify!($checked), "`](Self::", stringify!($checked), ").")]
                pub fn $assign(&mut self, rhs: &Fraction) -> NumericResult<&mut Self> {
                    let result = self.$checked(rhs)?;
                    self.commit(result);
                    Ok(self)
                }
            )*
        }
    };
}

assign_ops! {
    add_assign => checked_add,
    sub_assign => checked_sub,
    mul_assign => checked_mul,
    div_assign => checked_div,
}

/// Least common multiple of two positive integers.
fn lcm_pair(a: &Decimal, b: &Decimal) -> NumericResult<Decimal> {
    let gcd = euclid(a, b)?;
    a.checked_mul(b)?.checked_div(&gcd)
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for Fraction {
    fn default() -> Self {
        Self::zero()
    }
}

/// Value equality by cross-multiplication: `1/2 == 2/4`.
impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

/// `0/0` compares as zero; `n/0` with `n != 0` is unordered against everything.
impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let (this, other) = (self.operand().ok()?, other.operand().ok()?);
        let lhs = this.signed_numerator().checked_mul(&other.denominator).ok()?;
        let rhs = other.signed_numerator().checked_mul(&this.denominator).ok()?;
        Some(lhs.cmp(&rhs))
    }
}

impl fmt::Debug for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fraction({})", self)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for Fraction {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Fraction {
    type Error = NumericError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Decimal> for Fraction {
    fn from(value: Decimal) -> Self {
        Self::from_decimal(&value)
    }
}

impl From<&Decimal> for Fraction {
    fn from(value: &Decimal) -> Self {
        Self::from_decimal(value)
    }
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(text: &str) -> Fraction {
        text.parse().unwrap()
    }

    fn d(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    #[test]
    fn test_construction_folds_signs() {
        assert_eq!(f("-3/4").to_string(), "-3/4");
        assert_eq!(f("3/-4").to_string(), "-3/4");
        assert_eq!(f("-3/-4").to_string(), "3/4");
        assert_eq!(f("-0/5").to_string(), "0/5");
    }

    #[test]
    fn test_construction_clears_decimals() {
        assert_eq!(f("1.5/2.25").to_string(), "150/225");
        assert_eq!(f("0.75").to_string(), "75/100");
        assert_eq!(Fraction::from_decimal(&d("-1.25")).to_string(), "-125/100");
        assert_eq!(f("7").to_string(), "7/1");
    }

    #[test]
    fn test_parse_rejects() {
        assert!(Fraction::parse("1/2/3").is_err());
        assert!(Fraction::parse("a/2").is_err());
        assert!(Fraction::parse("/2").is_err());
        assert!(Fraction::parse("2/").is_err());
    }

    #[test]
    fn test_simplify() {
        let mut value = Fraction::new(d("8"), d("12"));
        value.simplify().unwrap();
        assert_eq!(value.to_string(), "2/3");

        assert_eq!(f("1.5/2.25").simplified().unwrap().to_string(), "2/3");
        assert_eq!(f("-10/4").simplified().unwrap().to_string(), "-5/2");
        assert_eq!(f("0/7").simplified().unwrap().to_string(), "0/1");
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(f("5/0").simplified().unwrap_err(), NumericError::ZeroDenominator);
        assert_eq!(f("5/0").to_decimal().unwrap_err(), NumericError::ZeroDenominator);
        assert_eq!(f("0/0").simplified().unwrap().to_string(), "0/1");
        assert_eq!(f("0/0").to_decimal().unwrap(), d("0"));
    }

    #[test]
    fn test_add_paths() {
        // equal denominators
        assert_eq!(f("1/5").checked_add(&f("2/5")).unwrap().to_string(), "3/5");
        // unit denominator scales
        assert_eq!(f("2/1").checked_add(&f("1/3")).unwrap().to_string(), "7/3");
        assert_eq!(f("1/3").checked_add(&f("2/1")).unwrap().to_string(), "7/3");
        // least common denominator
        assert_eq!(f("1/4").checked_add(&f("1/6")).unwrap().to_string(), "5/12");
        assert_eq!(f("-1/4").checked_add(&f("1/6")).unwrap().to_string(), "-1/12");
    }

    #[test]
    fn test_sub_mul_div() {
        assert_eq!(f("1/2").checked_sub(&f("3/4")).unwrap().to_string(), "-1/4");
        assert_eq!(f("2/3").checked_mul(&f("-3/4")).unwrap().to_string(), "-6/12");
        assert_eq!(f("1/2").checked_div(&f("1/4")).unwrap().to_string(), "4/2");
        assert_eq!(f("1/2").checked_div(&f("0/3")).unwrap_err(), NumericError::DivisionByZero);
    }

    #[test]
    fn test_assign_chain() {
        let mut value = f("1/2");
        value
            .add_assign(&f("1/3"))
            .unwrap()
            .mul_assign(&f("6/1"))
            .unwrap()
            .simplify()
            .unwrap();
        assert_eq!(value.to_string(), "5/1");
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(f("1/8").to_decimal().unwrap(), d("0.125"));
        assert_eq!(f("-7/2").to_decimal().unwrap(), d("-3.5"));
    }

    #[test]
    fn test_reciprocal() {
        assert_eq!(f("-2/3").reciprocal().unwrap().to_string(), "-3/2");
        assert!(f("0/3").reciprocal().is_err());
    }

    #[test]
    fn test_lcd() {
        let mut fractions = vec![f("1/4"), f("1/6"), f("-2/3")];
        Fraction::lcd(&mut fractions).unwrap();
        let shown: Vec<String> = fractions.iter().map(|x| x.to_string()).collect();
        assert_eq!(shown, vec!["3/12", "2/12", "-8/12"]);

        let mut bad = vec![f("1/2"), f("1/0")];
        assert!(Fraction::lcd(&mut bad).is_err());
        assert_eq!(bad[0].to_string(), "1/2");
    }

    #[test]
    fn test_value_comparison() {
        assert_eq!(f("1/2"), f("2/4"));
        assert!(f("1/3") < f("1/2"));
        assert!(f("-1/2") < f("1/3"));
        assert_ne!(f("1/2"), f("-1/2"));
    }

    #[test]
    fn test_comparison_with_zero_denominators() {
        assert_eq!(f("0/0"), f("0/1"));
        assert_ne!(f("0/0"), f("5/7"));
        assert!(f("0/0") < f("5/7"));

        assert_ne!(f("1/0"), f("2/0"));
        assert_eq!(f("1/0").partial_cmp(&f("3/4")), None);
        assert_eq!(f("3/4").partial_cmp(&f("1/0")), None);
    }
}
