//! Structural codec errors.
//!
//! Every failure is synchronous and aborts the whole encode/decode call;
//! there is no partial-result mode. Decode-side variants carry the byte
//! offset at which the violation was detected.

use thiserror::Error;

/// Errors raised by the layout engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("value {value} does not fit in {width} unsigned big-endian bytes")]
    ValueOutOfRange { value: u64, width: usize },

    #[error("fixed-size field expected {expected} bytes, got {got}")]
    SizeMismatch { expected: usize, got: usize },

    #[error("truncated input at offset {offset}: need {need} more bytes, {got} available")]
    TruncatedInput {
        need: usize,
        got: usize,
        offset: usize,
    },

    #[error("unknown discriminator {id} at offset {offset}")]
    UnknownDiscriminator { id: u64, offset: usize },

    #[error("case {name:?} is not registered in the switch table")]
    UnknownCase { name: &'static str },

    #[error("expected a {expected} value, got {got}")]
    ShapeMismatch {
        expected: &'static str,
        got: &'static str,
    },

    #[error("record value is missing field {name:?}")]
    MissingField { name: &'static str },

    #[error("{remaining} trailing bytes after offset {offset}")]
    TrailingBytes { offset: usize, remaining: usize },
}

/// Result type for layout engine operations.
pub type LayoutResult<T> = Result<T, LayoutError>;
