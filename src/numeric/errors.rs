// ============================================================================
// Numeric Errors
// Error types for digit-string arithmetic operations
// ============================================================================

use std::fmt;

/// Broad classification of a [`NumericError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input text failed the numeric character grammar
    MalformedNumber,
    /// Input text contained something other than `0` and `1`
    MalformedBinary,
    /// Division by zero, invalid fraction, or an undefined root
    Arithmetic,
    /// Index, base, domain, or cache bound violated
    OutOfRange,
    /// Attempted to overwrite an append-only cache entry
    DuplicateKey,
}

/// Errors that can occur while parsing or operating on digit-string values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Text could not be read as a number
    MalformedNumber {
        /// The rejected input
        text: String,
        /// Display form of the accepted character set
        allowed: &'static str,
    },
    /// Text could not be read as a binary value
    MalformedBinary { text: String },
    /// Attempted division or modulo by zero
    DivisionByZero,
    /// A fraction with a zero denominator and a non-zero numerator was used
    ZeroDenominator,
    /// Root of degree zero, or an even root of a negative value
    InvalidRoot { reason: &'static str },
    /// A value fell outside the range an operation accepts
    OutOfRange { detail: String },
    /// The key already exists in an insert-only table
    DuplicateKey { key: String },
}

impl NumericError {
    /// Classify this error into one of the five error kinds.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NumericError::MalformedNumber { .. } => ErrorKind::MalformedNumber,
            NumericError::MalformedBinary { .. } => ErrorKind::MalformedBinary,
            NumericError::DivisionByZero
            | NumericError::ZeroDenominator
            | NumericError::InvalidRoot { .. } => ErrorKind::Arithmetic,
            NumericError::OutOfRange { .. } => ErrorKind::OutOfRange,
            NumericError::DuplicateKey { .. } => ErrorKind::DuplicateKey,
        }
    }

    pub(crate) fn malformed(text: impl Into<String>) -> Self {
        NumericError::MalformedNumber {
            text: text.into(),
            allowed: super::digits::ALLOWED_DISPLAY,
        }
    }

    pub(crate) fn out_of_range(detail: impl Into<String>) -> Self {
        NumericError::OutOfRange {
            detail: detail.into(),
        }
    }
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::MalformedNumber { text, allowed } => write!(
                f,
                "malformed number: `{}` must only include {}",
                text, allowed
            ),
            NumericError::MalformedBinary { text } => {
                write!(f, "malformed binary: `{}` is not binary", text)
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::ZeroDenominator => write!(
                f,
                "a fraction cannot have a denominator of zero when the numerator isn't zero"
            ),
            NumericError::InvalidRoot { reason } => write!(f, "invalid root: {}", reason),
            NumericError::OutOfRange { detail } => write!(f, "out of range: {}", detail),
            NumericError::DuplicateKey { key } => {
                write!(f, "duplicate key: `{}` already exists and cannot be updated", key)
            },
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(NumericError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            NumericError::malformed("12a").to_string(),
            "malformed number: `12a` must only include [0-9, ., -, +, /, x, X, *, e, E]"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(NumericError::DivisionByZero.kind(), ErrorKind::Arithmetic);
        assert_eq!(NumericError::ZeroDenominator.kind(), ErrorKind::Arithmetic);
        assert_eq!(
            NumericError::out_of_range("base 40").kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            NumericError::DuplicateKey { key: "5".into() }.kind(),
            ErrorKind::DuplicateKey
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::DivisionByZero, NumericError::DivisionByZero);
        assert_ne!(NumericError::DivisionByZero, NumericError::ZeroDenominator);
    }
}
