// ============================================================================
// Constants
// Mathematical and physical constants to 100 fractional digits
// ============================================================================

use crate::numeric::Decimal;

/// Euler's number.
pub const E_DIGITS: &str = "2.7182818284590452353602874713526624977572470936999595749669676277240766303535475945713821785251664274";

/// Ratio of a circle's circumference to its diameter.
pub const PI_DIGITS: &str = "3.1415926535897932384626433832795028841971693993751058209749445923078164062862089986280348253421170679";

/// `2 * pi`.
pub const TAU_DIGITS: &str = "6.2831853071795864769252867665590057683943387987502116419498891846156328125724179972560696506842341359";

/// The golden ratio.
pub const PHI_DIGITS: &str = "1.6180339887498948482045868343656381177203091798057628621354486227052604628189024497072072041893911374";

/// Speed of light in a vacuum, metres per second.
pub const SPEED_OF_LIGHT_DIGITS: &str = "299792458";

pub fn e() -> Decimal {
    Decimal::from_canonical(E_DIGITS.to_string())
}

pub fn pi() -> Decimal {
    Decimal::from_canonical(PI_DIGITS.to_string())
}

pub fn tau() -> Decimal {
    Decimal::from_canonical(TAU_DIGITS.to_string())
}

pub fn phi() -> Decimal {
    Decimal::from_canonical(PHI_DIGITS.to_string())
}

pub fn speed_of_light() -> Decimal {
    Decimal::from_canonical(SPEED_OF_LIGHT_DIGITS.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::digits;

    #[test]
    fn test_constants_are_canonical() {
        for text in [E_DIGITS, PI_DIGITS, TAU_DIGITS, PHI_DIGITS, SPEED_OF_LIGHT_DIGITS] {
            assert!(digits::is_canonical(text), "{} is not canonical", text);
        }
    }

    #[test]
    fn test_hundred_fractional_digits() {
        for value in [e(), pi(), tau(), phi()] {
            let fraction = value.as_str().split('.').nth(1).unwrap();
            assert_eq!(fraction.len(), 100);
        }
    }

    #[test]
    fn test_tau_is_two_pi() {
        let doubled = pi().checked_mul(&Decimal::from(2)).unwrap();
        // pi is truncated, so the last digit of 2*pi may differ by rounding
        assert_eq!(doubled.as_str()[..100], tau().as_str()[..100]);
    }

    #[test]
    fn test_phi_identity() {
        // phi^2 = phi + 1, to the digits carried
        let phi = phi();
        let squared = phi.checked_mul(&phi).unwrap().truncate_places(90);
        let shifted = phi.checked_add(&Decimal::one()).unwrap().truncate_places(90);
        assert_eq!(squared, shifted);
    }
}
