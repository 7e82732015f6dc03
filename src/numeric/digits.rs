// ============================================================================
// Digit-String Validation
// Character grammar checks and reduction to canonical form
// ============================================================================
//
// Every value constructed from text passes through `normalize`, which:
// 1. rejects characters outside the allowed set (and too many markers)
// 2. expands scientific notation into positional form
// 3. strips redundant zeros, dangling points and the sign of zero
//
// Canonical form: -?(0|[1-9][0-9]*)(\.[0-9]*[1-9])?

use super::errors::{NumericError, NumericResult};

/// Characters accepted anywhere in numeric text.
pub const ALLOWED: [char; 19] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', // digits
    '.', '-', '+', '/', // structure
    'x', 'X', '*', 'e', 'E', // scientific markers
];

/// Display form of [`ALLOWED`], carried by malformed-number errors.
pub const ALLOWED_DISPLAY: &str = "[0-9, ., -, +, /, x, X, *, e, E]";

const SCIENTIFIC_MARKERS: [char; 5] = ['x', 'X', '*', 'e', 'E'];

/// Largest exponent magnitude scientific notation may shift by.
pub const MAX_EXPONENT: i64 = 1_000_000;

/// Check whether `c` belongs to the numeric character set.
#[inline]
pub fn is_allowed(c: char) -> bool {
    ALLOWED.contains(&c)
}

/// Check text against the numeric character grammar.
///
/// At most one `/` is allowed. Without it the text may hold one `.` and one
/// scientific marker; with it (two sub-numbers) two of each. A `^` is only
/// accepted as part of an `x`, `X` or `*` exponent.
pub fn is_valid(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    let power_marker = text.contains(['x', 'X', '*']);
    let mut slashes = 0;
    let mut dots = 0;
    let mut markers = 0;
    let mut carets = 0;

    for c in text.chars() {
        match c {
            '/' => slashes += 1,
            '.' => dots += 1,
            '^' if power_marker => carets += 1,
            c if SCIENTIFIC_MARKERS.contains(&c) => markers += 1,
            c if is_allowed(c) => {},
            _ => return false,
        }
    }

    let limit = match slashes {
        0 => 1,
        1 => 2,
        _ => return false,
    };

    dots <= limit && markers <= limit && carets <= markers
}

/// Expand scientific notation into positional notation.
///
/// Supported forms: `1.5e3`, `1.5E-3`, `1.5x10^3`, `1.5X10^-3`, `1.5*10^3`
/// and `1.5*^3`. Text without a marker is returned unchanged. The output is
/// not yet canonical.
pub fn expand_scientific(text: &str) -> NumericResult<String> {
    let Some((pos, marker)) = text
        .char_indices()
        .find(|(_, c)| SCIENTIFIC_MARKERS.contains(c))
    else {
        return Ok(text.to_string());
    };

    let mantissa = &text[..pos];
    let rest = &text[pos + marker.len_utf8()..];

    let exponent_text = match marker {
        'e' | 'E' => rest,
        _ => {
            let (base, exponent) = rest
                .split_once('^')
                .ok_or_else(|| NumericError::malformed(text))?;
            if !(base == "10" || (base.is_empty() && marker == '*')) {
                return Err(NumericError::malformed(text));
            }
            exponent
        },
    };

    let exponent: i64 = exponent_text
        .strip_prefix('+')
        .unwrap_or(exponent_text)
        .parse()
        .map_err(|_| NumericError::malformed(text))?;

    if exponent.abs() > MAX_EXPONENT {
        return Err(NumericError::out_of_range(format!(
            "exponent {} exceeds +/-{}",
            exponent, MAX_EXPONENT
        )));
    }

    let (sign, unsigned) = split_sign(mantissa);
    let (int_digits, frac_digits) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_digits.len() + frac_digits.len() == 0
        || !all_digits(int_digits)
        || !all_digits(frac_digits)
    {
        return Err(NumericError::malformed(text));
    }

    let combined = format!("{}{}", int_digits, frac_digits);
    let point = int_digits.len() as i64 + exponent;

    let mut expanded = String::with_capacity(combined.len() + exponent.unsigned_abs() as usize + 3);
    expanded.push_str(sign);
    if point <= 0 {
        expanded.push_str("0.");
        expanded.extend(std::iter::repeat('0').take((-point) as usize));
        expanded.push_str(&combined);
    } else if point as usize >= combined.len() {
        expanded.push_str(&combined);
        expanded.extend(std::iter::repeat('0').take(point as usize - combined.len()));
    } else {
        let (head, tail) = combined.split_at(point as usize);
        expanded.push_str(head);
        expanded.push('.');
        expanded.push_str(tail);
    }

    Ok(expanded)
}

/// Reduce numeric text to its canonical digit string.
///
/// # Examples
/// - "123.450" -> "123.45"
/// - "0005" -> "5"
/// - "-0" -> "0"
/// - "1.5e3" -> "1500"
/// - ".25" -> "0.25"
///
/// # Errors
/// Returns `MalformedNumber` if the text fails the grammar, contains a
/// fraction slash, or is not a single signed number after expansion.
pub fn normalize(text: &str) -> NumericResult<String> {
    if !is_valid(text) || text.contains('/') {
        return Err(NumericError::malformed(text));
    }

    let expanded = expand_scientific(text)?;
    let (sign, unsigned) = split_sign(&expanded);
    let (int_digits, frac_digits) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_digits.len() + frac_digits.len() == 0
        || !all_digits(int_digits)
        || !all_digits(frac_digits)
    {
        return Err(NumericError::malformed(text));
    }

    let int_digits = int_digits.trim_start_matches('0');
    let frac_digits = frac_digits.trim_end_matches('0');

    if int_digits.is_empty() && frac_digits.is_empty() {
        return Ok("0".to_string());
    }

    let mut canonical = String::with_capacity(int_digits.len() + frac_digits.len() + 3);
    if sign == "-" {
        canonical.push('-');
    }
    if int_digits.is_empty() {
        canonical.push('0');
    } else {
        canonical.push_str(int_digits);
    }
    if !frac_digits.is_empty() {
        canonical.push('.');
        canonical.push_str(frac_digits);
    }

    Ok(canonical)
}

/// Check whether text is already a canonical digit string.
pub fn is_canonical(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (int_digits, frac_digits) = match unsigned.split_once('.') {
        Some((int_digits, frac_digits)) => (int_digits, Some(frac_digits)),
        None => (unsigned, None),
    };

    let int_ok = int_digits == "0"
        || (!int_digits.is_empty()
            && !int_digits.starts_with('0')
            && int_digits.bytes().all(|b| b.is_ascii_digit()));

    let frac_ok = match frac_digits {
        None => true,
        Some(frac) => {
            !frac.is_empty() && !frac.ends_with('0') && frac.bytes().all(|b| b.is_ascii_digit())
        },
    };

    int_ok && frac_ok && text != "-0"
}

/// Split a leading `-` or `+` off numeric text, returning `("-" | "", rest)`.
fn split_sign(text: &str) -> (&'static str, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        ("-", rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        ("", rest)
    } else {
        ("", text)
    }
}
