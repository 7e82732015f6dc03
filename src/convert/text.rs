// ============================================================================
// Text Encoding
// Characters to and from per-character binary code points
// ============================================================================

use super::binary::Binary;
use crate::numeric::{Decimal, NumericError, NumericResult};

/// Encode each character's code point as its own binary value.
pub fn text_to_binary(text: &str) -> NumericResult<Vec<Binary>> {
    text.chars()
        .map(|c| Binary::from_decimal(&Decimal::from(u32::from(c))))
        .collect()
}

/// Decode binary code points back into text.
///
/// # Errors
/// Returns `OutOfRange` if a value is not a Unicode scalar value.
pub fn binary_to_text(binaries: &[Binary]) -> NumericResult<String> {
    binaries
        .iter()
        .map(|binary| {
            let code = binary.to_decimal()?;
            code.to_u64()
                .and_then(|c| u32::try_from(c).ok())
                .and_then(char::from_u32)
                .ok_or_else(|| {
                    NumericError::out_of_range(format!("{} is not a character code", code))
                })
        })
        .collect()
}
