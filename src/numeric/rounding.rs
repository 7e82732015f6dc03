// ============================================================================
// Rounding
// Floor, ceiling, truncation and half-away-from-zero rounding
// ============================================================================

use super::decimal::Decimal;
use super::magnitude::Magnitude;

/// Round a magnitude half away from zero at `places` fractional digits.
pub(crate) fn round_magnitude(magnitude: &Magnitude, places: usize) -> Magnitude {
    let (truncated, _) = magnitude.truncate_scale(places);
    if magnitude.fraction_digit(places) >= 5 {
        truncated.add(&Magnitude::one().shift_right(places))
    } else {
        truncated
    }
}

impl Decimal {
    /// Largest integer not greater than `self`.
    pub fn floor(&self) -> Decimal {
        let (magnitude, negative) = self.parts();
        let (whole, discarded) = magnitude.truncate_scale(0);
        let whole = if negative && discarded {
            whole.add(&Magnitude::one())
        } else {
            whole
        };
        Decimal::from_magnitude(&whole, negative, self.precision())
    }

    /// Smallest integer not less than `self`.
    pub fn ceiling(&self) -> Decimal {
        let (magnitude, negative) = self.parts();
        let (whole, discarded) = magnitude.truncate_scale(0);
        let whole = if !negative && discarded {
            whole.add(&Magnitude::one())
        } else {
            whole
        };
        Decimal::from_magnitude(&whole, negative, self.precision())
    }

    /// Drop the fractional part (round toward zero).
    pub fn truncate(&self) -> Decimal {
        self.truncate_places(0)
    }

    /// Drop fractional digits past `places`.
    pub fn truncate_places(&self, places: usize) -> Decimal {
        let (magnitude, negative) = self.parts();
        Decimal::from_magnitude(&magnitude.truncate_scale(places).0, negative, self.precision())
    }

    /// Round half away from zero at `10^-places`.
    ///
    /// A negative `places` rounds inside the integer part:
    /// `round(1250, -2) == 1300`.
    pub fn round(&self, places: i32) -> Decimal {
        let (magnitude, negative) = self.parts();
        let rounded = if places >= 0 {
            round_magnitude(&magnitude, places as usize)
        } else {
            let shift = places.unsigned_abs() as usize;
            round_magnitude(&magnitude.shift_right(shift), 0).shift_left(shift)
        };
        Decimal::from_magnitude(&rounded, negative, self.precision())
    }
}
