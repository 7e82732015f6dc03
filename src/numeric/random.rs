// ============================================================================
// Random Generation
// Best-effort random digit strings within a closed range
// ============================================================================
//
// Values are built digit by digit rather than sampled uniformly: a digit
// count is drawn from the width of the bound, each position may stop the
// string early, and a decimal point may be placed near the end. Candidates
// outside [min, max] are retried a bounded number of times, then clamped to
// the nearest bound.

use super::decimal::Decimal;
use super::errors::{NumericError, NumericResult};
use rand::Rng;
use tracing::debug;

/// Default retry cap before clamping.
pub const DEFAULT_RANDOM_ATTEMPTS: usize = 200;

impl Decimal {
    /// Random value in `[min, max]` using the thread-local generator.
    ///
    /// # Errors
    /// Returns `OutOfRange` if `max <= min`.
    pub fn random(min: &Decimal, max: &Decimal, allow_decimal: bool) -> NumericResult<Decimal> {
        Self::random_with(
            min,
            max,
            allow_decimal,
            DEFAULT_RANDOM_ATTEMPTS,
            &mut rand::thread_rng(),
        )
    }

    /// Random value in `[min, max]` with an explicit retry cap and generator.
    pub fn random_with<R: Rng>(
        min: &Decimal,
        max: &Decimal,
        allow_decimal: bool,
        attempts: usize,
        rng: &mut R,
    ) -> NumericResult<Decimal> {
        if max <= min {
            return Err(NumericError::out_of_range(format!(
                "random range is empty: max {} <= min {}",
                max, min
            )));
        }

        let negative = max.is_negative()
            || (min.is_negative() && (max.is_zero() || rng.gen_bool(0.5)));
        let bound = if negative {
            integer_width(min)
        } else {
            integer_width(max)
        };
        let count = if bound <= 4 {
            bound
        } else {
            rng.gen_range(1..bound)
        };

        let mut candidate = Decimal::zero();
        for _ in 0..attempts.max(1) {
            candidate = random_digits(count, negative, allow_decimal, rng)?;
            if &candidate >= min && &candidate <= max {
                return Ok(candidate);
            }
        }

        let clamped = if &candidate < min {
            min.clone()
        } else {
            max.clone()
        };
        debug!(
            attempts,
            rejected = %candidate,
            clamped = %clamped,
            "random generation exhausted retries; clamping to bound"
        );
        Ok(clamped)
    }
}

/// Digit count of the integer part of `|value|`.
fn integer_width(value: &Decimal) -> usize {
    value.abs().integer_part().as_str().len()
}

fn random_digits<R: Rng>(
    count: usize,
    negative: bool,
    allow_decimal: bool,
    rng: &mut R,
) -> NumericResult<Decimal> {
    let mut text = String::with_capacity(count + 24);
    if negative {
        text.push('-');
    }

    let mut limit = count;
    let mut has_point = false;
    let mut position = 1;
    while position <= limit {
        text.push(char::from(b'0' + rng.gen_range(0..10u8)));

        if allow_decimal
            && !has_point
            && (position + 4 == limit || limit <= 4)
            && rng.gen_bool(0.5)
        {
            text.push('.');
            has_point = true;
            limit += limit + 16;
        }

        if !text.ends_with('.') && rng.gen_range(0..10) == 1 {
            break;
        }
        position += 1;
    }

    Decimal::parse(&text)
}
