// ============================================================================
// Binary Value
// Fixed-width bit strings padded to whole 16-bit words
// ============================================================================

use super::base;
use crate::numeric::{Decimal, NumericError, NumericResult};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};
use std::str::FromStr;

/// Width granularity: every binary value is a whole number of words.
pub const WORD_BITS: usize = 16;

/// Unsigned bit string, most significant bit first.
///
/// The width is always a non-zero multiple of [`WORD_BITS`]; shorter input
/// is left-padded with zeros.
///
/// Equality compares width as well as value: a one-word `1` and a two-word
/// `1` are different bit strings. Compare [`to_decimal`](Self::to_decimal)
/// results for value equality.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Binary {
    bits: String,
}

impl Binary {
    /// Parse a string of `0` and `1`.
    ///
    /// # Errors
    /// Returns `MalformedBinary` for any other character.
    pub fn new(text: &str) -> NumericResult<Self> {
        if !text.chars().all(|c| c == '0' || c == '1') {
            return Err(NumericError::MalformedBinary {
                text: text.to_string(),
            });
        }
        Ok(Self::padded(text))
    }

    /// One word of zeros.
    pub fn zero() -> Self {
        Self {
            bits: "0".repeat(WORD_BITS),
        }
    }

    fn padded(bits: &str) -> Self {
        let width = bits.len().div_ceil(WORD_BITS).max(1) * WORD_BITS;
        Self {
            bits: format!("{:0>width$}", bits, width = width),
        }
    }

    /// Replace the bits, returning the previous value. On error the current
    /// value is kept.
    pub fn update(&mut self, text: &str) -> NumericResult<Binary> {
        let replacement = Self::new(text)?;
        Ok(std::mem::replace(self, replacement))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.bits
    }

    /// Width in bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always false; a binary value holds at least one word.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        !self.bits.contains('1')
    }

    /// Bit at `index`, counted from the most significant end.
    pub fn bit(&self, index: usize) -> NumericResult<bool> {
        self.bits
            .as_bytes()
            .get(index)
            .map(|&b| b == b'1')
            .ok_or_else(|| {
                NumericError::out_of_range(format!(
                    "bit index {} outside width {}",
                    index,
                    self.len()
                ))
            })
    }

    // ========================================================================
    // Logic Gates
    // ========================================================================

    /// Apply a truth table bit by bit after left-padding to equal width.
    fn gate(&self, other: &Binary, table: impl Fn(bool, bool) -> bool) -> Binary {
        let width = self.len().max(other.len());
        let lhs = format!("{:0>width$}", self.bits, width = width);
        let rhs = format!("{:0>width$}", other.bits, width = width);

        let bits: String = lhs
            .bytes()
            .zip(rhs.bytes())
            .map(|(a, b)| if table(a == b'1', b == b'1') { '1' } else { '0' })
            .collect();
        Self { bits }
    }

    pub fn and(&self, other: &Binary) -> Binary {
        self.gate(other, |a, b| a && b)
    }

    pub fn or(&self, other: &Binary) -> Binary {
        self.gate(other, |a, b| a || b)
    }

    pub fn xor(&self, other: &Binary) -> Binary {
        self.gate(other, |a, b| a != b)
    }

    pub fn nand(&self, other: &Binary) -> Binary {
        self.gate(other, |a, b| !(a && b))
    }

    pub fn nor(&self, other: &Binary) -> Binary {
        self.gate(other, |a, b| !(a || b))
    }

    pub fn xnor(&self, other: &Binary) -> Binary {
        self.gate(other, |a, b| a == b)
    }

    /// Flip every bit.
    pub fn invert(&self) -> Binary {
        let bits = self
            .bits
            .chars()
            .map(|c| if c == '1' { '0' } else { '1' })
            .collect();
        Self { bits }
    }

    // ========================================================================
    // Arithmetic and Shifts
    // ========================================================================

    /// Ripple-carry addition. A carry out of the top bit widens the result
    /// by one word.
    pub fn add_binary(&self, other: &Binary) -> Binary {
        let width = self.len().max(other.len());
        let lhs = format!("{:0>width$}", self.bits, width = width);
        let rhs = format!("{:0>width$}", other.bits, width = width);

        let mut sum = Vec::with_capacity(width + 1);
        let mut carry = false;
        for (a, b) in lhs.bytes().rev().zip(rhs.bytes().rev()) {
            let (a, b) = (a == b'1', b == b'1');
            sum.push(if a ^ b ^ carry { '1' } else { '0' });
            carry = (a && b) || (carry && (a ^ b));
        }
        if carry {
            sum.push('1');
        }

        let bits: String = sum.into_iter().rev().collect();
        Self::padded(&bits)
    }

    /// Shift toward the most significant end, keeping the width.
    pub fn left_shift(&self, places: usize) -> Binary {
        if places >= self.len() {
            return Self::padded(&"0".repeat(self.len()));
        }
        let mut bits = self.bits[places..].to_string();
        bits.push_str(&"0".repeat(places));
        Self { bits }
    }

    /// Shift toward the least significant end, keeping the width.
    pub fn right_shift(&self, places: usize) -> Binary {
        if places >= self.len() {
            return Self::padded(&"0".repeat(self.len()));
        }
        let mut bits = "0".repeat(places);
        bits.push_str(&self.bits[..self.len() - places]);
        Self { bits }
    }

    // ========================================================================
    // Decimal Conversion
    // ========================================================================

    pub fn to_decimal(&self) -> NumericResult<Decimal> {
        base::from_binary(self)
    }

    pub fn from_decimal(value: &Decimal) -> NumericResult<Binary> {
        base::to_binary(value)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for Binary {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Binary({})", self.bits)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bits)
    }
}

impl FromStr for Binary {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Not for Binary {
    type Output = Binary;

    fn not(self) -> Self::Output {
        self.invert()
    }
}

impl Not for &Binary {
    type Output = Binary;

    fn not(self) -> Self::Output {
        self.invert()
    }
}

macro_rules! gate_ops {
    ($($trait:ident :: $method:ident => $gate:ident),* $(,)?) => {
        $(
            impl $trait for Binary {
                type Output = Binary;

                fn $method(self, rhs: Binary) -> Self::Output {
                    Binary::$gate(&self, &rhs)
                }
            }

            impl<'a> $trait<&'a Binary> for &'a Binary {
                type Output = Binary;

                fn $method(self, rhs: &'a Binary) -> Self::Output {
                    Binary::$gate(self, rhs)
                }
            }
        )*
    };
}

gate_ops! {
    BitAnd::bitand => and,
    BitOr::bitor => or,
    BitXor::bitxor => xor,
}
