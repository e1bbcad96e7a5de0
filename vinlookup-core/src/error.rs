//! Error types for VIN Lookup core.

use thiserror::Error;

/// Error returned by a [`Validator`](crate::Validator).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The value has the wrong number of characters.
    #[error("expected {expected} characters, got {actual}")]
    Length {
        /// Required length.
        expected: usize,
        /// Length of the rejected value.
        actual: usize,
    },

    /// The value contains characters outside the allowed set.
    #[error("invalid characters in {0:?}")]
    InvalidCharacters(String),
}
