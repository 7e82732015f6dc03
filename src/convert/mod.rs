// ============================================================================
// Convert Module
// Base conversion, fixed-width binary logic, and text encoding
// ============================================================================

pub mod base;
mod binary;
mod text;

pub use base::{from_base, from_binary, to_base, to_binary, ALPHABET, MAX_BASE, MIN_BASE};
pub use binary::{Binary, WORD_BITS};
pub use text::{binary_to_text, text_to_binary};
