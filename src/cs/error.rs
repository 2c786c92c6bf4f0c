//! Error types shared by the coding modules.

use thiserror::Error;

/// Errors raised by polynomial arithmetic, code construction and the
/// encode/decode entry points.
///
/// An uncorrectable received word is not an error: decoding reports it as
/// `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A bit sequence had the wrong length for the operation
    #[error("Invalid length: expected {expected} bits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Polynomial division by the all-zero polynomial
    #[error("Division by the zero polynomial")]
    DivisionByZero,

    /// Padding to a width that would drop a nonzero coefficient
    #[error("Width {width} too small, at least {required} bits are needed")]
    WidthTooSmall { width: usize, required: usize },

    /// Invalid parameters or malformed input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
