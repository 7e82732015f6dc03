// ============================================================================
// Base Conversion
// Positional conversion between decimals and bases 2 through 36
// ============================================================================

use super::binary::Binary;
use crate::numeric::{Decimal, NumericError, NumericResult};

/// Digit alphabet shared by every supported base.
pub const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = ALPHABET.len() as u32;

fn check_base(base: u32) -> NumericResult<()> {
    if (MIN_BASE..=MAX_BASE).contains(&base) {
        Ok(())
    } else {
        Err(NumericError::out_of_range(format!(
            "base must be between {} and {}: {}",
            MIN_BASE, MAX_BASE, base
        )))
    }
}

/// Write an integer in `base` by repeated division, most significant digit
/// first. Negative values keep a leading `-`.
///
/// # Errors
/// Returns `OutOfRange` for a base outside 2-36 or a non-integer value.
pub fn to_base(value: &Decimal, base: u32) -> NumericResult<String> {
    check_base(base)?;
    if !value.is_integer() {
        return Err(NumericError::out_of_range(format!(
            "only integers convert between bases: {}",
            value
        )));
    }
    if value.is_zero() {
        return Ok("0".to_string());
    }

    let radix = Decimal::from(base);
    let mut remaining = value.abs();
    let mut digits = Vec::new();

    while !remaining.is_zero() {
        let digit = remaining
            .checked_rem(&radix)?
            .to_u64()
            .and_then(|d| ALPHABET.get(d as usize))
            .ok_or_else(|| NumericError::out_of_range(format!("bad digit for base {}", base)))?;
        digits.push(char::from(*digit));
        remaining = remaining.checked_div(&radix)?.floor();
    }

    if value.is_negative() {
        digits.push('-');
    }
    Ok(digits.into_iter().rev().collect())
}

/// Read text written in `base` back into a decimal (Horner's rule).
///
/// Letters are case-insensitive.
///
/// # Errors
/// Returns `OutOfRange` for a base outside 2-36, empty text, or any
/// character that is not a digit of `base`.
pub fn from_base(text: &str, base: u32) -> NumericResult<Decimal> {
    check_base(base)?;
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if digits.is_empty() {
        return Err(NumericError::out_of_range("no digits to convert"));
    }

    let radix = Decimal::from(base);
    let mut value = Decimal::zero();
    for c in digits.chars() {
        let digit = ALPHABET
            .iter()
            .position(|&a| char::from(a) == c.to_ascii_lowercase())
            .filter(|&d| (d as u32) < base)
            .ok_or_else(|| {
                NumericError::out_of_range(format!("`{}` is not a base {} digit in {}", c, base, text))
            })?;
        value = value.checked_mul(&radix)?.checked_add(&Decimal::from(digit))?;
    }

    Ok(if negative { value.negate() } else { value })
}

/// Non-negative integer to a 16-bit-aligned binary value.
pub fn to_binary(value: &Decimal) -> NumericResult<Binary> {
    if value.is_negative() {
        return Err(NumericError::out_of_range(format!(
            "binary values are unsigned: {}",
            value
        )));
    }
    Binary::new(&to_base(value, 2)?)
}

pub fn from_binary(binary: &Binary) -> NumericResult<Decimal> {
    from_base(binary.as_str(), 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    #[test]
    fn test_to_base() {
        assert_eq!(to_base(&d("255"), 16).unwrap(), "ff");
        assert_eq!(to_base(&d("10"), 2).unwrap(), "1010");
        assert_eq!(to_base(&d("-35"), 36).unwrap(), "-z");
        assert_eq!(to_base(&d("0"), 7).unwrap(), "0");
        assert_eq!(to_base(&d("1296"), 36).unwrap(), "100");
    }

    #[test]
    fn test_from_base() {
        assert_eq!(from_base("ff", 16).unwrap(), d("255"));
        assert_eq!(from_base("FF", 16).unwrap(), d("255"));
        assert_eq!(from_base("-1010", 2).unwrap(), d("-10"));
        assert_eq!(from_base("zz", 36).unwrap(), d("1295"));
    }

    #[test]
    fn test_large_values_round_trip() {
        let big = d("123456789012345678901234567890");
        let hex = to_base(&big, 16).unwrap();
        assert_eq!(from_base(&hex, 16).unwrap(), big);
    }

    #[test]
    fn test_base_errors() {
        assert!(to_base(&d("5"), 1).is_err());
        assert!(to_base(&d("5"), 37).is_err());
        assert!(to_base(&d("1.5"), 2).is_err());
        assert!(from_base("12", 2).is_err());
        assert!(from_base("g", 16).is_err());
        assert!(from_base("", 10).is_err());
        assert!(from_base("1.5", 10).is_err());
    }

    #[test]
    fn test_binary_helpers() {
        let binary = to_binary(&d("5")).unwrap();
        assert_eq!(binary.as_str(), "0000000000000101");
        assert_eq!(from_binary(&binary).unwrap(), d("5"));
        assert!(to_binary(&d("-5")).is_err());
    }
}
