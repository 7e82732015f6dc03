// ============================================================================
// Unsigned Digit Magnitudes
// Carry/borrow digit algorithms shared by every signed value type
// ============================================================================
//
// A magnitude is a most-significant-first digit buffer plus the number of
// those digits that sit after the decimal point. All arithmetic here is
// unsigned; callers decide the sign of the result.
//
// Invariants (after `normalized`):
// - at least one integer digit
// - no leading zero integer digits except a lone zero
// - no trailing zero fractional digits

use smallvec::{smallvec, SmallVec};
use std::cmp::Ordering;

/// Digit buffer; 64 digits inline covers the common case without allocating.
pub(crate) type DigitBuf = SmallVec<[u8; 64]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Magnitude {
    digits: DigitBuf,
    scale: usize,
}

/// Result of a long division.
#[derive(Debug, Clone)]
pub(crate) struct Quotient {
    pub value: Magnitude,
    /// A non-zero remainder was left when the digit cap was reached
    pub truncated: bool,
}

impl Magnitude {
    // ========================================================================
    // Construction
    // ========================================================================

    pub fn zero() -> Self {
        Self {
            digits: smallvec![0],
            scale: 0,
        }
    }

    pub fn one() -> Self {
        Self {
            digits: smallvec![1],
            scale: 0,
        }
    }

    pub fn from_u64(mut n: u64) -> Self {
        let mut digits = DigitBuf::new();
        loop {
            digits.push((n % 10) as u8);
            n /= 10;
            if n == 0 {
                break;
            }
        }
        digits.reverse();
        Self { digits, scale: 0 }
    }

    /// `10^exponent`
    pub fn pow10(exponent: usize) -> Self {
        let mut digits = DigitBuf::with_capacity(exponent + 1);
        digits.push(1);
        digits.extend(std::iter::repeat(0).take(exponent));
        Self { digits, scale: 0 }
    }

    /// Split a canonical digit string into its magnitude and sign.
    ///
    /// Input is expected to be canonical (or at least `-?[0-9]+(\.[0-9]*)?`);
    /// the result is normalized either way and zero is never negative.
    pub fn from_canonical(text: &str) -> (Self, bool) {
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (int_digits, frac_digits) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        let digits: DigitBuf = int_digits
            .bytes()
            .chain(frac_digits.bytes())
            .map(|b| b.wrapping_sub(b'0') % 10)
            .collect();

        let magnitude = Self {
            digits,
            scale: frac_digits.len(),
        }
        .normalized();
        let negative = negative && !magnitude.is_zero();
        (magnitude, negative)
    }

    fn normalized(mut self) -> Self {
        let trailing = self
            .digits
            .iter()
            .rev()
            .take(self.scale)
            .take_while(|&&d| d == 0)
            .count();
        let keep = self.digits.len() - trailing;
        self.digits.truncate(keep);
        self.scale -= trailing;

        if self.digits.len() < self.scale + 1 {
            let missing = self.scale + 1 - self.digits.len();
            self.digits.insert_many(0, std::iter::repeat(0).take(missing));
        }

        let leading = self.digits[..self.int_len() - 1]
            .iter()
            .take_while(|&&d| d == 0)
            .count();
        if leading > 0 {
            self.digits.drain(..leading);
        }

        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.digits.iter().all(|&d| d == 0)
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.scale == 0 && self.digits.as_slice() == [1]
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        self.scale == 0
    }

    /// Number of digits before the decimal point.
    #[inline]
    pub fn int_len(&self) -> usize {
        self.digits.len() - self.scale
    }

    /// Number of digits after the decimal point.
    #[inline]
    pub fn scale(&self) -> usize {
        self.scale
    }

    /// Digit at fractional position `index` (0 = tenths), zero past the end.
    pub fn fraction_digit(&self, index: usize) -> u8 {
        if index < self.scale {
            self.digits[self.int_len() + index]
        } else {
            0
        }
    }

    pub fn to_u64(&self) -> Option<u64> {
        if !self.is_integer() {
            return None;
        }
        self.digits.iter().try_fold(0u64, |acc, &d| {
            acc.checked_mul(10)?.checked_add(u64::from(d))
        })
    }

    pub fn to_canonical(&self, negative: bool) -> String {
        let int_len = self.int_len();
        let mut text = String::with_capacity(self.digits.len() + 2);
        if negative && !self.is_zero() {
            text.push('-');
        }
        text.extend(self.digits[..int_len].iter().map(|&d| char::from(b'0' + d)));
        if self.scale > 0 {
            text.push('.');
            text.extend(self.digits[int_len..].iter().map(|&d| char::from(b'0' + d)));
        }
        text
    }

    // ========================================================================
    // Alignment and Comparison
    // ========================================================================

    /// Zero-pad both operands to a common integer length and scale.
    fn aligned(&self, other: &Self) -> (DigitBuf, DigitBuf, usize) {
        let int_len = self.int_len().max(other.int_len());
        let scale = self.scale.max(other.scale);

        let pad = |m: &Self| -> DigitBuf {
            let mut out = DigitBuf::with_capacity(int_len + scale);
            out.extend(std::iter::repeat(0).take(int_len - m.int_len()));
            out.extend_from_slice(&m.digits);
            out.extend(std::iter::repeat(0).take(scale - m.scale));
            out
        };

        (pad(self), pad(other), scale)
    }

    pub fn cmp_magnitude(&self, other: &Self) -> Ordering {
        self.int_len().cmp(&other.int_len()).then_with(|| {
            let len = self.digits.len().max(other.digits.len());
            (0..len)
                .map(|i| {
                    let a = self.digits.get(i).copied().unwrap_or(0);
                    let b = other.digits.get(i).copied().unwrap_or(0);
                    a.cmp(&b)
                })
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        })
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Right-to-left addition with carry.
    pub fn add(&self, other: &Self) -> Self {
        let (a, b, scale) = self.aligned(other);
        let mut out = DigitBuf::with_capacity(a.len() + 1);
        let mut carry = 0u8;

        for (x, y) in a.iter().rev().zip(b.iter().rev()) {
            let sum = x + y + carry;
            out.push(sum % 10);
            carry = sum / 10;
        }
        if carry > 0 {
            out.push(carry);
        }
        out.reverse();

        Self { digits: out, scale }.normalized()
    }

    /// Right-to-left subtraction with borrow.
    ///
    /// Returns `(|self - other|, self < other)`. When a borrow escapes the
    /// most significant digit the raw digits hold the ten's complement of
    /// the true magnitude, which is recovered before returning.
    pub fn sub(&self, other: &Self) -> (Self, bool) {
        let (a, b, scale) = self.aligned(other);
        let mut out = DigitBuf::with_capacity(a.len());
        let mut borrow = 0i8;

        for (&x, &y) in a.iter().rev().zip(b.iter().rev()) {
            let mut diff = x as i8 - y as i8 - borrow;
            if diff < 0 {
                diff += 10;
                borrow = 1;
            } else {
                borrow = 0;
            }
            out.push(diff as u8);
        }

        let negative = borrow == 1;
        if negative {
            // out is little-endian here: 10^n - out = (9..9 - out) + 1
            let mut carry = 1u8;
            for d in out.iter_mut() {
                let v = 9 - *d + carry;
                *d = v % 10;
                carry = v / 10;
            }
        }
        out.reverse();

        (Self { digits: out, scale }.normalized(), negative)
    }

    /// Grade-school multiplication: one shifted partial product per digit of
    /// the multiplier, accumulated into the running sum.
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }

        let width = self.digits.len() + other.digits.len();
        let mut acc: SmallVec<[u32; 96]> = smallvec![0; width];

        for (i, &a) in self.digits.iter().enumerate().rev() {
            if a == 0 {
                continue;
            }
            let mut carry = 0u32;
            for (j, &b) in other.digits.iter().enumerate().rev() {
                let slot = &mut acc[i + j + 1];
                let t = *slot + u32::from(a) * u32::from(b) + carry;
                *slot = t % 10;
                carry = t / 10;
            }
            acc[i] += carry;
        }

        Self {
            digits: acc.into_iter().map(|d| d as u8).collect(),
            scale: self.scale + other.scale,
        }
        .normalized()
    }

    /// Long division producing at most `precision` fractional digits.
    ///
    /// Both operands are scaled to integers first; quotient digits are then
    /// produced one at a time by repeated subtraction. Digits past the cap
    /// are dropped (truncation, never rounding). Returns `None` for a zero
    /// divisor.
    pub fn div(&self, divisor: &Self, precision: usize) -> Option<Quotient> {
        if divisor.is_zero() {
            return None;
        }

        let shift = self.scale.max(divisor.scale);
        let dividend = self.shift_left(shift);
        let divisor = divisor.shift_left(shift);

        let mut quotient = DigitBuf::with_capacity(dividend.digits.len() + precision);
        let mut remainder = Self::zero();

        for &d in dividend.digits.iter() {
            remainder.push_digit(d);
            quotient.push(remainder.reduce_by(&divisor));
        }

        let mut produced = 0;
        while !remainder.is_zero() && produced < precision {
            remainder.push_digit(0);
            quotient.push(remainder.reduce_by(&divisor));
            produced += 1;
        }

        Some(Quotient {
            value: Self {
                digits: quotient,
                scale: produced,
            }
            .normalized(),
            truncated: !remainder.is_zero(),
        })
    }

    /// Append a digit to an integer remainder (`self * 10 + digit`).
    fn push_digit(&mut self, digit: u8) {
        if self.is_zero() {
            self.digits.clear();
        }
        self.digits.push(digit);
    }

    /// Subtract `divisor` from an integer remainder while possible, returning
    /// the count (one quotient digit).
    fn reduce_by(&mut self, divisor: &Self) -> u8 {
        let mut count = 0;
        while self.cmp_magnitude(divisor) != Ordering::Less {
            *self = self.sub(divisor).0;
            count += 1;
        }
        count
    }

    // ========================================================================
    // Digit Shifting
    // ========================================================================

    /// Multiply by `10^places`.
    pub fn shift_left(&self, places: usize) -> Self {
        let mut out = self.clone();
        if out.scale >= places {
            out.scale -= places;
        } else {
            let extra = places - out.scale;
            out.scale = 0;
            out.digits.extend(std::iter::repeat(0).take(extra));
        }
        out.normalized()
    }

    /// Divide by `10^places`.
    pub fn shift_right(&self, places: usize) -> Self {
        Self {
            digits: self.digits.clone(),
            scale: self.scale + places,
        }
        .normalized()
    }

    /// Keep at most `places` fractional digits. The flag reports whether any
    /// non-zero digit was discarded.
    pub fn truncate_scale(&self, places: usize) -> (Self, bool) {
        if self.scale <= places {
            return (self.clone(), false);
        }
        let keep = self.digits.len() - (self.scale - places);
        let discarded = self.digits[keep..].iter().any(|&d| d != 0);
        let mut digits = self.digits.clone();
        digits.truncate(keep);
        (
            Self {
                digits,
                scale: places,
            }
            .normalized(),
            discarded,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mag(text: &str) -> Magnitude {
        Magnitude::from_canonical(text).0
    }

    fn show(m: &Magnitude) -> String {
        m.to_canonical(false)
    }

    #[test]
    fn test_from_canonical_normalizes() {
        assert_eq!(show(&mag("007.500")), "7.5");
        assert_eq!(show(&mag("0.0")), "0");
        assert_eq!(show(&mag(".25")), "0.25");

        let (m, negative) = Magnitude::from_canonical("-0");
        assert!(m.is_zero());
        assert!(!negative);

        let (m, negative) = Magnitude::from_canonical("-12.5");
        assert_eq!(show(&m), "12.5");
        assert!(negative);
    }

    #[test]
    fn test_add_with_carry() {
        assert_eq!(show(&mag("999").add(&mag("1"))), "1000");
        assert_eq!(show(&mag("0.5").add(&mag("0.5"))), "1");
        assert_eq!(show(&mag("12.34").add(&mag("0.066"))), "12.406");
    }

    #[test]
    fn test_sub_with_borrow() {
        let (m, negative) = mag("1000").sub(&mag("1"));
        assert_eq!(show(&m), "999");
        assert!(!negative);

        let (m, negative) = mag("2.5").sub(&mag("2.5"));
        assert!(m.is_zero());
        assert!(!negative);
    }

    #[test]
    fn test_sub_ten_complement() {
        let (m, negative) = mag("3").sub(&mag("10"));
        assert_eq!(show(&m), "7");
        assert!(negative);

        let (m, negative) = mag("0.25").sub(&mag("1.5"));
        assert_eq!(show(&m), "1.25");
        assert!(negative);
    }

    #[test]
    fn test_mul() {
        assert_eq!(show(&mag("12").mul(&mag("12"))), "144");
        assert_eq!(show(&mag("1.5").mul(&mag("1.5"))), "2.25");
        assert_eq!(show(&mag("0.2").mul(&mag("0.5"))), "0.1");
        assert_eq!(show(&mag("99999").mul(&mag("99999"))), "9999800001");
        assert!(mag("123").mul(&mag("0")).is_zero());
    }

    #[test]
    fn test_div_exact() {
        let q = mag("144").div(&mag("12"), 10).unwrap();
        assert_eq!(show(&q.value), "12");
        assert!(!q.truncated);

        let q = mag("1").div(&mag("8"), 10).unwrap();
        assert_eq!(show(&q.value), "0.125");

        let q = mag("7.5").div(&mag("0.25"), 10).unwrap();
        assert_eq!(show(&q.value), "30");
    }

    #[test]
    fn test_div_truncates_at_cap() {
        let q = mag("1").div(&mag("3"), 5).unwrap();
        assert_eq!(show(&q.value), "0.33333");
        assert!(q.truncated);

        let q = mag("2").div(&mag("3"), 4).unwrap();
        assert_eq!(show(&q.value), "0.6666");
    }

    #[test]
    fn test_div_by_zero() {
        assert!(mag("1").div(&Magnitude::zero(), 10).is_none());
    }

    #[test]
    fn test_cmp_magnitude() {
        assert_eq!(mag("10").cmp_magnitude(&mag("9.99")), Ordering::Greater);
        assert_eq!(mag("1.5").cmp_magnitude(&mag("1.50")), Ordering::Equal);
        assert_eq!(mag("1.05").cmp_magnitude(&mag("1.5")), Ordering::Less);
        assert_eq!(mag("0").cmp_magnitude(&mag("0.001")), Ordering::Less);
    }

    #[test]
    fn test_shifts() {
        assert_eq!(show(&mag("1.25").shift_left(1)), "12.5");
        assert_eq!(show(&mag("1.25").shift_left(4)), "12500");
        assert_eq!(show(&mag("125").shift_right(2)), "1.25");
        assert_eq!(show(&mag("5").shift_right(3)), "0.005");
        assert_eq!(show(&Magnitude::pow10(3)), "1000");
    }

    #[test]
    fn test_truncate_scale() {
        let (m, discarded) = mag("3.14159").truncate_scale(2);
        assert_eq!(show(&m), "3.14");
        assert!(discarded);

        let (m, discarded) = mag("3.1").truncate_scale(4);
        assert_eq!(show(&m), "3.1");
        assert!(!discarded);

        assert_eq!(mag("2.718").fraction_digit(0), 7);
        assert_eq!(mag("2.718").fraction_digit(5), 0);
    }

    #[test]
    fn test_to_u64() {
        assert_eq!(mag("1234").to_u64(), Some(1234));
        assert_eq!(mag("1.5").to_u64(), None);
        assert_eq!(mag("99999999999999999999999").to_u64(), None);
    }

    #[test]
    fn test_values_past_inline_capacity() {
        let nines = mag(&"9".repeat(80));
        let power = nines.add(&Magnitude::one());
        assert_eq!(show(&power), format!("1{}", "0".repeat(80)));
        assert_eq!(power, Magnitude::pow10(80));

        let (back, negative) = power.sub(&Magnitude::one());
        assert!(!negative);
        assert_eq!(back, nines);
    }
}
