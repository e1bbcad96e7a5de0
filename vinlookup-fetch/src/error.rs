//! Lookup error types.

use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// Lookup Error
// ============================================================================

/// Error type for lookup operations.
///
/// Cloneable so a single failed request can be reported to every caller
/// waiting on the same key.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// The base URL and endpoint path do not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No well-formed HTTP response was received (connection failure, timeout).
    #[error("Bad response: {0}")]
    BadResponse(String),

    /// The API answered 429 Too Many Requests.
    #[error("Rate limited")]
    RateLimited,

    /// The API answered with a non-2xx status other than 429.
    #[error("Server error: HTTP {status}")]
    ServerError {
        /// HTTP status code.
        status: u16,
    },

    /// The response body did not match the expected shape.
    #[error("Decoding error: {0}")]
    Decoding(#[source] Arc<serde_json::Error>),

    /// Request encoding or internal failure.
    #[error("{0}")]
    Other(String),
}

impl LookupError {
    /// Returns true if the failure is transient and the request may be retried.
    ///
    /// Only rate limiting qualifies; everything else fails immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LookupError::RateLimited)
    }

    /// Returns the HTTP status code for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            LookupError::ServerError { status } => Some(*status),
            LookupError::RateLimited => Some(429),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::Decoding(Arc::new(err))
    }
}

impl From<url::ParseError> for LookupError {
    fn from(err: url::ParseError) -> Self {
        LookupError::InvalidUrl(err.to_string())
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::BadResponse(format!("request timed out: {err}"))
        } else {
            LookupError::BadResponse(err.to_string())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
