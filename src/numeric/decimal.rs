// ============================================================================
// Decimal Value
// Arbitrary-precision signed decimal backed by a canonical digit string
// ============================================================================

use super::compare::{compare_canonical, Relation, Symbols};
use super::digits;
use super::errors::{NumericError, NumericResult};
use super::fraction::Fraction;
use super::magnitude::Magnitude;
use super::rounding::round_magnitude;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;
use tracing::{debug, trace};

/// Default number of fractional digits a division may generate.
pub const DEFAULT_PRECISION: usize = 100;

/// Default Newton iteration cap for roots.
pub const DEFAULT_ROOT_ITERATIONS: usize = 200;

/// Extra fractional digits carried while iterating a root.
const ROOT_GUARD_DIGITS: usize = 10;

/// Arbitrary-precision decimal number.
///
/// Holds the current canonical digit string, the canonical string captured
/// at construction (see [`Decimal::original`]), and the precision bound used
/// when this value is the dividend of a division.
///
/// Equality, ordering and hashing look only at the current digits.
///
/// # Example
/// ```ignore
/// use digitwise::numeric::Decimal;
///
/// let a: Decimal = "1.5".parse()?;
/// let b = Decimal::from(3);
/// let product = a.checked_mul(&b)?;        // 4.5
/// let third = Decimal::one().checked_div(&b)?;  // 0.333... (100 digits)
/// ```
#[derive(Clone)]
pub struct Decimal {
    digits: String,
    original: String,
    precision: usize,
}

impl Decimal {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Parse numeric text.
    ///
    /// Accepts plain and scientific notation. Text containing a `/` is read
    /// as a fraction and evaluated. Blank text is zero.
    ///
    /// # Errors
    /// Returns `MalformedNumber` if the text fails the numeric grammar.
    pub fn parse(text: &str) -> NumericResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::zero());
        }
        if text.contains('/') {
            return Fraction::parse(text)?.to_decimal();
        }
        Ok(Self::from_canonical(digits::normalize(text)?))
    }

    /// Wrap a string that is already canonical.
    pub(crate) fn from_canonical(digits: String) -> Self {
        Self {
            original: digits.clone(),
            digits,
            precision: DEFAULT_PRECISION,
        }
    }

    pub(crate) fn from_magnitude(magnitude: &Magnitude, negative: bool, precision: usize) -> Self {
        let mut value = Self::from_canonical(magnitude.to_canonical(negative));
        value.precision = precision;
        value
    }

    pub fn zero() -> Self {
        Self::from_canonical("0".to_string())
    }

    pub fn one() -> Self {
        Self::from_canonical("1".to_string())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The canonical digit string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// The value this instance was constructed with (or last `update`d to).
    pub fn original(&self) -> Decimal {
        let mut original = Self::from_canonical(self.original.clone());
        original.precision = self.precision;
        original
    }

    /// Replace both the current and original value, returning the old value.
    pub fn update(&mut self, other: &Decimal) -> Decimal {
        let old = self.clone();
        self.digits = other.digits.clone();
        self.original = other.digits.clone();
        old
    }

    #[inline]
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Set the division precision bound, returning the previous one.
    pub fn set_precision(&mut self, precision: usize) -> usize {
        std::mem::replace(&mut self.precision, precision)
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Derive the precision bound from an expected digit length
    /// (`len * 0.59 + len`), returning the stored bound.
    pub fn set_scaled_precision(&mut self, len: usize) -> usize {
        self.precision = len * 59 / 100 + len;
        self.precision
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.digits.starts_with('-')
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.digits == "0"
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.digits == "1"
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        !self.digits.contains('.')
    }

    /// Integer part, truncated toward zero.
    pub fn integer_part(&self) -> Decimal {
        let (magnitude, negative) = self.parts();
        self.derive(&magnitude.truncate_scale(0).0, negative)
    }

    /// Fractional part, carrying the sign of `self`.
    pub fn fractional_part(&self) -> Decimal {
        self.sub_value(&self.integer_part())
    }

    pub fn abs(&self) -> Decimal {
        let (magnitude, _) = self.parts();
        self.derive(&magnitude, false)
    }

    pub fn negate(&self) -> Decimal {
        let (magnitude, negative) = self.parts();
        self.derive(&magnitude, !negative)
    }

    /// Value as `i64`, if it is an integer in range.
    pub fn to_i64(&self) -> Option<i64> {
        if self.is_integer() {
            self.digits.parse().ok()
        } else {
            None
        }
    }

    /// Value as `u64`, if it is a non-negative integer in range.
    pub fn to_u64(&self) -> Option<u64> {
        if self.is_integer() {
            self.digits.parse().ok()
        } else {
            None
        }
    }

    /// Nearest `f64`, if finite.
    pub fn to_f64(&self) -> Option<f64> {
        self.digits.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Evaluate every relation between `self` and `other`.
    pub fn compare_signs(&self, other: &Decimal) -> Symbols {
        Symbols::from_ordering(compare_canonical(&self.digits, &other.digits))
    }

    /// Check one named relation, e.g. `a.relation(Relation::Le, &b)`.
    pub fn relation(&self, relation: Relation, other: &Decimal) -> bool {
        self.compare_signs(other).holds(relation)
    }

    // ========================================================================
    // Digit Algorithms (sign handling)
    // ========================================================================

    pub(crate) fn parts(&self) -> (Magnitude, bool) {
        Magnitude::from_canonical(&self.digits)
    }

    /// Number of fractional digits.
    pub(crate) fn scale(&self) -> usize {
        self.digits.split_once('.').map_or(0, |(_, frac)| frac.len())
    }

    /// Multiply by `10^places`.
    pub(crate) fn shift_left(&self, places: usize) -> Decimal {
        let (magnitude, negative) = self.parts();
        self.derive(&magnitude.shift_left(places), negative)
    }

    fn derive(&self, magnitude: &Magnitude, negative: bool) -> Decimal {
        Self::from_magnitude(magnitude, negative, self.precision)
    }

    fn add_value(&self, rhs: &Decimal) -> Decimal {
        let (a, a_neg) = self.parts();
        let (b, b_neg) = rhs.parts();

        let (magnitude, negative) = match (a_neg, b_neg) {
            (false, false) => (a.add(&b), false),
            (true, true) => (a.add(&b), true),
            (false, true) => a.sub(&b),
            (true, false) => b.sub(&a),
        };
        self.derive(&magnitude, negative)
    }

    fn sub_value(&self, rhs: &Decimal) -> Decimal {
        let (a, a_neg) = self.parts();
        let (b, b_neg) = rhs.parts();

        let (magnitude, negative) = match (a_neg, b_neg) {
            (false, false) => a.sub(&b),
            (true, true) => b.sub(&a),
            (false, true) => (a.add(&b), false),
            (true, false) => (a.add(&b), true),
        };
        self.derive(&magnitude, negative)
    }

    fn mul_value(&self, rhs: &Decimal) -> Decimal {
        if rhs.digits == "-1" {
            return self.negate();
        }
        let (a, a_neg) = self.parts();
        let (b, b_neg) = rhs.parts();
        self.derive(&a.mul(&b), a_neg ^ b_neg)
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Addition. Never fails; returns `Result` for uniformity with the rest
    /// of the checked family.
    pub fn checked_add(&self, rhs: &Decimal) -> NumericResult<Decimal> {
        Ok(self.add_value(rhs))
    }

    pub fn checked_sub(&self, rhs: &Decimal) -> NumericResult<Decimal> {
        Ok(self.sub_value(rhs))
    }

    pub fn checked_mul(&self, rhs: &Decimal) -> NumericResult<Decimal> {
        Ok(self.mul_value(rhs))
    }

    /// Long division generating at most `self.precision()` fractional digits.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero.
    pub fn checked_div(&self, rhs: &Decimal) -> NumericResult<Decimal> {
        let (a, a_neg) = self.parts();
        let (b, b_neg) = rhs.parts();

        if b.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        if b.is_one() {
            return Ok(self.derive(&a, a_neg ^ b_neg));
        }

        let quotient = a
            .div(&b, self.precision)
            .ok_or(NumericError::DivisionByZero)?;
        if quotient.truncated {
            trace!(
                dividend = %self,
                divisor = %rhs,
                precision = self.precision,
                "division truncated at digit cap"
            );
        }
        Ok(self.derive(&quotient.value, a_neg ^ b_neg))
    }

    /// Floored modulo: `self - floor(self / rhs) * rhs`.
    ///
    /// The result carries the sign of `rhs`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero.
    pub fn checked_rem(&self, rhs: &Decimal) -> NumericResult<Decimal> {
        let (a, a_neg) = self.parts();
        let (b, b_neg) = rhs.parts();

        // exact integer quotient; the precision cap does not apply
        let whole = a.div(&b, 0).ok_or(NumericError::DivisionByZero)?;
        let negative = a_neg ^ b_neg;
        let magnitude = if negative && whole.truncated {
            whole.value.add(&Magnitude::one())
        } else {
            whole.value
        };

        let floored = self.derive(&magnitude, negative);
        Ok(self.sub_value(&floored.mul_value(rhs)))
    }

    /// Raise to a power.
    ///
    /// Integer exponents multiply exactly; negative exponents take the
    /// reciprocal. Other exponents are reduced to a fraction `p/q`, raised
    /// to `p` and then rooted by `q`.
    ///
    /// # Errors
    /// - `DivisionByZero` for zero raised to a negative power
    /// - `InvalidRoot` when a fractional exponent needs an even root of a
    ///   negative value
    /// - `OutOfRange` if the exponent does not fit in `u64`
    pub fn checked_pow(&self, exponent: &Decimal) -> NumericResult<Decimal> {
        self.checked_pow_with(exponent, DEFAULT_ROOT_ITERATIONS)
    }

    /// [`checked_pow`](Self::checked_pow) with an explicit root iteration cap.
    pub fn checked_pow_with(
        &self,
        exponent: &Decimal,
        root_iterations: usize,
    ) -> NumericResult<Decimal> {
        if exponent.is_zero() {
            return Ok(Self::one().with_precision(self.precision));
        }
        if exponent.is_integer() {
            return self.pow_integer(exponent);
        }

        let ratio = Fraction::from_decimal(exponent).simplified()?;
        let power = ratio.signed_numerator();
        self.pow_integer(&power)?
            .root_integer(ratio.denominator(), root_iterations)
    }

    /// Take the `degree`-th root.
    ///
    /// # Errors
    /// - `InvalidRoot` for degree zero or an even root of a negative value
    /// - `DivisionByZero` for a negative degree of zero
    pub fn checked_root(&self, degree: &Decimal) -> NumericResult<Decimal> {
        self.checked_root_with(degree, DEFAULT_ROOT_ITERATIONS)
    }

    /// [`checked_root`](Self::checked_root) with an explicit iteration cap.
    pub fn checked_root_with(
        &self,
        degree: &Decimal,
        max_iterations: usize,
    ) -> NumericResult<Decimal> {
        if degree.is_zero() {
            return Err(NumericError::InvalidRoot {
                reason: "root of degree zero",
            });
        }
        if degree.is_integer() {
            return self.root_integer(degree, max_iterations);
        }

        // a^(1 / (p/q)) = a^(q/p)
        let ratio = Fraction::from_decimal(degree).simplified()?;
        let mut power = ratio.denominator().clone();
        if ratio.is_negative() {
            power = power.negate();
        }
        self.pow_integer(&power)?
            .root_integer(ratio.numerator(), max_iterations)
    }

    /// Square root.
    pub fn sqrt(&self) -> NumericResult<Decimal> {
        self.checked_root(&Decimal::from(2))
    }

    fn pow_integer(&self, exponent: &Decimal) -> NumericResult<Decimal> {
        let (e, reciprocal) = exponent.parts();
        let n = e.to_u64().ok_or_else(|| {
            NumericError::out_of_range(format!("exponent {} is too large", exponent))
        })?;

        let (base, base_neg) = self.parts();
        let result = self.derive(&pow_magnitude(&base, n, None), base_neg && n % 2 == 1);

        if reciprocal {
            Self::one()
                .with_precision(self.precision)
                .checked_div(&result)
        } else {
            Ok(result)
        }
    }

    fn root_integer(&self, degree: &Decimal, max_iterations: usize) -> NumericResult<Decimal> {
        let (d, reciprocal) = degree.parts();
        let n = d.to_u64().ok_or_else(|| {
            NumericError::out_of_range(format!("root degree {} is too large", degree))
        })?;
        if n == 0 {
            return Err(NumericError::InvalidRoot {
                reason: "root of degree zero",
            });
        }

        let (a, a_neg) = self.parts();
        if a_neg && n % 2 == 0 {
            return Err(NumericError::InvalidRoot {
                reason: "even root of a negative value",
            });
        }

        let root = if a.is_zero() || a.is_one() || n == 1 {
            a
        } else {
            newton_root(&a, n, self.precision, max_iterations)
        };
        let result = self.derive(&root, a_neg);

        if reciprocal {
            Self::one()
                .with_precision(self.precision)
                .checked_div(&result)
        } else {
            Ok(result)
        }
    }

    /// `self^n` with every intermediate product truncated to `places`
    /// fractional digits.
    pub(crate) fn pow_truncated(&self, n: u64, places: usize) -> Decimal {
        let (base, negative) = self.parts();
        self.derive(&pow_magnitude(&base, n, Some(places)), negative && n % 2 == 1)
    }

    fn commit(&mut self, result: Decimal) {
        self.digits = result.digits;
    }
}

// ============================================================================
// In-Place Mutators
// ============================================================================

macro_rules! assign_ops {
    ($($assign:ident => $checked:ident),* $(,)?) => {
        impl Decimal {
            $(
                #[doc = concat!("In-place form of [`", stringify!($checked), "`](Self::", stringify!($checked), "). `self` is unchanged on error.")]
                pub fn $assign(&mut self, rhs: &Decimal) -> NumericResult<&mut Self> {
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
    rem_assign => checked_rem,
    pow_assign => checked_pow,
    root_assign => checked_root,
}

// ============================================================================
// Power and Root Helpers
// ============================================================================

/// Square-and-multiply power, optionally truncating every product.
fn pow_magnitude(base: &Magnitude, mut exponent: u64, places: Option<usize>) -> Magnitude {
    let clip = |m: Magnitude| match places {
        Some(p) => m.truncate_scale(p).0,
        None => m,
    };

    let mut result = Magnitude::one();
    let mut square = base.clone();
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = clip(result.mul(&square));
        }
        exponent >>= 1;
        if exponent > 0 {
            square = clip(square.mul(&square));
        }
    }
    result
}

/// Newton iteration `x <- ((n-1)x + a / x^(n-1)) / n` on truncated digits.
///
/// The first step is always taken (it lands at or above the root); after
/// that iteration stops once an iterate no longer decreases.
fn newton_root(a: &Magnitude, n: u64, precision: usize, max_iterations: usize) -> Magnitude {
    let places = precision + ROOT_GUARD_DIGITS;
    let degree = Magnitude::from_u64(n);
    let lower = Magnitude::from_u64(n - 1);

    let mut x = root_seed(a, n);
    let mut iterations = 0;

    loop {
        let power = pow_magnitude(&x, n - 1, Some(places));
        let Some(quotient) = a.div(&power, places) else {
            break;
        };
        let Some(next) = lower.mul(&x).add(&quotient.value).div(&degree, places) else {
            break;
        };

        iterations += 1;
        if iterations > 1 && next.value.cmp_magnitude(&x) != Ordering::Less {
            break;
        }
        x = next.value;

        if iterations >= max_iterations {
            debug!(degree = n, iterations, "root iteration cap reached");
            break;
        }
    }

    let root = x.truncate_scale(precision).0;
    snap_exact_root(a, n, &root, precision).unwrap_or(root)
}

/// Starting point for Newton: the `f64` estimate when representable,
/// otherwise `10^ceil(int_len / n)`, which is always above the root.
fn root_seed(a: &Magnitude, n: u64) -> Magnitude {
    let estimate = a
        .to_canonical(false)
        .parse::<f64>()
        .ok()
        .map(|v| v.powf(1.0 / n as f64))
        .filter(|v| v.is_finite() && *v > 0.0)
        .and_then(|v| digits::normalize(&v.to_string()).ok())
        .map(|text| Magnitude::from_canonical(&text).0)
        .filter(|m| !m.is_zero());

    estimate.unwrap_or_else(|| {
        let n = usize::try_from(n).unwrap_or(usize::MAX);
        Magnitude::pow10(a.int_len().div_ceil(n))
    })
}

/// Return a short root `r` with `r^n == a` exactly, if the iterated root
/// rounds to one.
fn snap_exact_root(a: &Magnitude, n: u64, root: &Magnitude, precision: usize) -> Option<Magnitude> {
    let candidate = round_magnitude(root, precision / 2);
    let n_digits = usize::try_from(n).ok()?;
    // trailing digits 1-9 never vanish under powers, so scales must match
    if candidate.scale().checked_mul(n_digits)? != a.scale() {
        return None;
    }
    (pow_magnitude(&candidate, n, None) == *a).then_some(candidate)
}

/// Greatest common divisor by Euclid's algorithm on absolute values.
///
/// Returns `|a|` when `b` is zero.
pub(crate) fn euclid(a: &Decimal, b: &Decimal) -> NumericResult<Decimal> {
    let mut a = a.abs();
    let mut b = b.abs();
    while !b.is_zero() {
        let r = a.checked_rem(&b)?;
        a = b;
        b = r;
    }
    Ok(a)
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for Decimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialEq for Decimal {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.digits == other.digits
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        compare_canonical(&self.digits, &other.digits)
    }
}

impl Hash for Decimal {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.digits.hash(state);
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Neg for &Decimal {
    type Output = Decimal;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

// Only the operations that cannot fail get operator forms.
macro_rules! infallible_ops {
    ($($trait:ident :: $method:ident => $value_fn:ident),* $(,)?) => {
        $(
            impl $trait for Decimal {
                type Output = Decimal;

                fn $method(self, rhs: Decimal) -> Self::Output {
                    self.$value_fn(&rhs)
                }
            }

            impl<'a> $trait<&'a Decimal> for &'a Decimal {
                type Output = Decimal;

                fn $method(self, rhs: &'a Decimal) -> Self::Output {
                    self.$value_fn(rhs)
                }
            }
        )*
    };
}

infallible_ops! {
    Add::add => add_value,
    Sub::sub => sub_value,
    Mul::mul => mul_value,
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({}, precision={})", self.digits, self.precision)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl FromStr for Decimal {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Decimal {
    type Error = NumericError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Decimal {
    type Error = NumericError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Decimal {
                fn from(value: $t) -> Self {
                    Self::from_canonical(value.to_string())
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl TryFrom<f64> for Decimal {
    type Error = NumericError;

    /// Uses the shortest round-tripping representation of the float.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(NumericError::out_of_range(format!(
                "{} is not a finite number",
                value
            )));
        }
        Self::parse(&value.to_string())
    }
}

impl TryFrom<f32> for Decimal {
    type Error = NumericError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(NumericError::out_of_range(format!(
                "{} is not a finite number",
                value
            )));
        }
        Self::parse(&value.to_string())
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

impl TryFrom<rust_decimal::Decimal> for Decimal {
    type Error = NumericError;

    fn try_from(value: rust_decimal::Decimal) -> Result<Self, Self::Error> {
        Self::parse(&value.to_string())
    }
}

impl Decimal {
    /// Convert to `rust_decimal::Decimal`.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the value needs more than the 28 significant
    /// digits `rust_decimal` can hold.
    pub fn to_rust_decimal(&self) -> NumericResult<rust_decimal::Decimal> {
        rust_decimal::Decimal::from_str_exact(&self.digits).map_err(|e| {
            NumericError::out_of_range(format!("{} does not fit rust_decimal: {}", self.digits, e))
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
