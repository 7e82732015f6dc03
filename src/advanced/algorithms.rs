// ============================================================================
// Algorithms
// Divisors, logarithms, factorization, and angle/exponential helpers
// ============================================================================

use super::constants;
use crate::numeric::{euclid, Decimal, NumericError, NumericResult};
use tracing::trace;

/// Iterations added on top of the caller's logarithm tolerance.
pub const LOG_EXTRA_ITERATIONS: usize = 20;

// ============================================================================
// Divisors
// ============================================================================

/// Greatest common divisor of two values by repeated floored modulo.
pub fn euclid_algorithm(a: &Decimal, b: &Decimal) -> NumericResult<Decimal> {
    euclid(a, b)
}

fn require_operands(operands: &[Decimal], operation: &str) -> NumericResult<()> {
    if operands.len() < 2 {
        return Err(NumericError::out_of_range(format!(
            "{} needs at least two operands, got {}",
            operation,
            operands.len()
        )));
    }
    Ok(())
}

/// Greatest common factor of every operand, reduced pairwise.
///
/// # Errors
/// Returns `OutOfRange` for fewer than two operands.
pub fn gcf(operands: &[Decimal]) -> NumericResult<Decimal> {
    require_operands(operands, "gcf")?;

    let mut result = operands[0].abs();
    for operand in &operands[1..] {
        result = euclid(&result, operand)?;
    }
    Ok(result)
}

/// Least common multiple, folded pairwise as `a * b / gcf(a, b)`.
///
/// # Errors
/// Returns `OutOfRange` for fewer than two operands.
pub fn lcm(operands: &[Decimal]) -> NumericResult<Decimal> {
    require_operands(operands, "lcm")?;

    let mut result = operands[0].abs();
    for operand in &operands[1..] {
        let divisor = euclid(&result, operand)?;
        if divisor.is_zero() {
            // both zero
            result = Decimal::zero();
            continue;
        }
        result = result.checked_mul(&operand.abs())?.checked_div(&divisor)?;
    }
    Ok(result)
}

// ============================================================================
// Logarithm
// ============================================================================

/// Logarithm of `value` in `base` by binary expansion of the exponent.
///
/// The integer part comes from scaling `value` into `[1, base)`; each of the
/// `tolerance + 20` following steps squares the remainder and contributes one
/// binary digit of the fraction. The result never exceeds the true value.
///
/// # Errors
/// Returns `OutOfRange` unless `value > 0`, `base > 0` and `base != 1`.
pub fn log(base: &Decimal, value: &Decimal, tolerance: usize) -> NumericResult<Decimal> {
    if value.is_negative() || value.is_zero() {
        return Err(NumericError::out_of_range(format!(
            "logarithm of non-positive value {}",
            value
        )));
    }
    if base.is_negative() || base.is_zero() || base.is_one() {
        return Err(NumericError::out_of_range(format!(
            "logarithm base {} must be positive and not one",
            base
        )));
    }

    let one = Decimal::one();
    if *base < one {
        let inverted = one.with_precision(value.precision()).checked_div(base)?;
        return Ok(log(&inverted, value, tolerance)?.negate());
    }

    let precision = value.precision();
    let mut y = value.clone();
    let mut whole: i64 = 0;
    while y >= *base {
        y = y.checked_div(base)?;
        whole += 1;
    }
    while y < one {
        y = y.checked_mul(base)?;
        whole -= 1;
    }
    trace!(%base, %value, whole, "logarithm bracketed");

    let half = Decimal::parse("0.5")?;
    let mut result = Decimal::from(whole).with_precision(precision);
    let mut bit = Decimal::one();
    let iterations = tolerance + LOG_EXTRA_ITERATIONS;

    let mut steps = 0;
    while steps < iterations && !y.is_one() {
        y = y.checked_mul(&y)?.truncate_places(precision);
        bit = bit.checked_mul(&half)?;
        if y >= *base {
            y = y.checked_div(base)?;
            result = result.checked_add(&bit)?;
        }
        steps += 1;
    }
    trace!(steps, iterations, "logarithm bisection finished");

    Ok(result)
}

// ============================================================================
// Factorization
// ============================================================================

/// Prime factors of a positive integer as `(prime, multiplicity)` pairs in
/// ascending order. `1` has no factors.
///
/// # Errors
/// Returns `OutOfRange` for non-integers and values below one.
pub fn prime_factor(value: &Decimal) -> NumericResult<Vec<(Decimal, Decimal)>> {
    if !value.is_integer() || value.is_negative() || value.is_zero() {
        return Err(NumericError::out_of_range(format!(
            "{} is not a positive integer",
            value
        )));
    }

    let one = Decimal::one();
    let two = Decimal::from(2);
    let mut cofactor = value.clone();
    let mut candidate = two.clone();
    let mut factors = Vec::new();

    while cofactor > one {
        if candidate.checked_mul(&candidate)? > cofactor {
            // no factor up to the square root, so the rest is prime
            factors.push((cofactor, one.clone()));
            break;
        }

        let mut multiplicity: u64 = 0;
        while cofactor.checked_rem(&candidate)?.is_zero() {
            cofactor = cofactor.checked_div(&candidate)?;
            multiplicity += 1;
        }
        if multiplicity > 0 {
            factors.push((candidate.clone(), Decimal::from(multiplicity)));
        }

        candidate = if candidate == two {
            Decimal::from(3)
        } else {
            candidate.checked_add(&two)?
        };
    }
    Ok(factors)
}

// ============================================================================
// Angles and Exponential
// ============================================================================

pub fn to_radians(degrees: &Decimal) -> NumericResult<Decimal> {
    degrees
        .checked_mul(&constants::pi())?
        .checked_div(&Decimal::from(180))
}

pub fn to_degrees(radians: &Decimal) -> NumericResult<Decimal> {
    radians
        .checked_mul(&Decimal::from(180))?
        .checked_div(&constants::pi())
}

/// `e^x`, truncated to `x.precision()` fractional digits.
///
/// The whole part of the exponent is an integer power of `e`; the fractional
/// part is summed as a Taylor series.
///
/// # Errors
/// Returns `OutOfRange` if the whole part of `x` does not fit in `u64`.
pub fn exp(x: &Decimal) -> NumericResult<Decimal> {
    let precision = x.precision();
    let magnitude = x.abs();
    let whole = magnitude.integer_part().to_u64().ok_or_else(|| {
        NumericError::out_of_range(format!("exponent {} is too large", x))
    })?;

    let e = constants::e().with_precision(precision);
    let integral = e.pow_truncated(whole, precision);

    // 1 + f + f^2/2! + ... until the terms vanish at this precision
    let fraction = magnitude.fractional_part().with_precision(precision);
    let mut series = Decimal::one().with_precision(precision);
    let mut term = Decimal::one().with_precision(precision);
    let mut k: u64 = 1;
    while !fraction.is_zero() {
        term = term
            .checked_mul(&fraction)?
            .truncate_places(precision)
            .checked_div(&Decimal::from(k))?;
        if term.is_zero() {
            break;
        }
        series = series.checked_add(&term)?;
        k += 1;
    }

    let result = integral.checked_mul(&series)?.truncate_places(precision);
    if x.is_negative() {
        Decimal::one().with_precision(precision).checked_div(&result)
    } else {
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    #[test]
    fn test_gcf() {
        assert_eq!(gcf(&[d("12"), d("18")]).unwrap(), d("6"));
        assert_eq!(gcf(&[d("48"), d("-36"), d("60")]).unwrap(), d("12"));
        assert_eq!(gcf(&[d("7"), d("0")]).unwrap(), d("7"));
        assert_eq!(euclid_algorithm(&d("1.5"), &d("0.6")).unwrap(), d("0.3"));
    }

    #[test]
    fn test_gcf_needs_two_operands() {
        assert!(matches!(
            gcf(&[d("5")]),
            Err(NumericError::OutOfRange { .. })
        ));
        assert!(lcm(&[]).is_err());
    }

    #[test]
    fn test_lcm() {
        assert_eq!(lcm(&[d("4"), d("6")]).unwrap(), d("12"));
        assert_eq!(lcm(&[d("2"), d("3"), d("4")]).unwrap(), d("12"));
        assert_eq!(lcm(&[d("0"), d("0")]).unwrap(), d("0"));
    }

    #[test]
    fn test_exact_logarithms() {
        assert_eq!(log(&d("2"), &d("8"), 20).unwrap(), d("3"));
        assert_eq!(log(&d("10"), &d("1000"), 20).unwrap(), d("3"));
        assert_eq!(log(&d("2"), &d("0.25"), 20).unwrap(), d("-2"));
        assert_eq!(log(&d("0.5"), &d("8"), 20).unwrap(), d("-3"));
        assert_eq!(log(&d("7"), &d("1"), 20).unwrap(), d("0"));
    }

    #[test]
    fn test_inexact_logarithm() {
        let value = log(&d("2"), &d("10"), 20).unwrap();
        assert!(value.as_str().starts_with("3.32192809"), "{}", value);
        assert!(value < d("3.3219280949"));
    }

    #[test]
    fn test_logarithm_domain() {
        assert!(log(&d("2"), &d("0"), 20).is_err());
        assert!(log(&d("2"), &d("-4"), 20).is_err());
        assert!(log(&d("1"), &d("4"), 20).is_err());
        assert!(log(&d("-2"), &d("4"), 20).is_err());
    }

    #[test]
    fn test_prime_factor() {
        let factors = prime_factor(&d("360")).unwrap();
        let expected = vec![
            (d("2"), d("3")),
            (d("3"), d("2")),
            (d("5"), d("1")),
        ];
        assert_eq!(factors, expected);

        assert_eq!(prime_factor(&d("97")).unwrap(), vec![(d("97"), d("1"))]);
        assert!(prime_factor(&d("1")).unwrap().is_empty());
    }

    #[test]
    fn test_prime_factor_domain() {
        assert!(prime_factor(&d("0")).is_err());
        assert!(prime_factor(&d("-6")).is_err());
        assert!(prime_factor(&d("4.5")).is_err());
    }

    #[test]
    fn test_angle_conversion() {
        assert_eq!(to_radians(&d("180")).unwrap(), constants::pi());
        assert_eq!(to_degrees(&constants::pi()).unwrap(), d("180"));
        let right = to_radians(&d("90")).unwrap();
        assert!(right.as_str().starts_with("1.5707963267"));
    }

    #[test]
    fn test_exp() {
        assert_eq!(exp(&d("0")).unwrap(), d("1"));
        assert_eq!(exp(&d("1")).unwrap(), constants::e());
        assert!(exp(&d("0.5")).unwrap().as_str().starts_with("1.6487212707"));
        assert!(exp(&d("2")).unwrap().as_str().starts_with("7.389056098"));
        assert!(exp(&d("-1")).unwrap().as_str().starts_with("0.3678794411"));
    }
}
