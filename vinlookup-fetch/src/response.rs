//! Response classification and decoding.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::LookupError;
use crate::transport::RawResponse;

/// HTTP 429 Too Many Requests.
const TOO_MANY_REQUESTS: u16 = 429;

/// Maps a raw response to its body or a structured error.
///
/// - 2xx: the body
/// - 429: [`LookupError::RateLimited`]
/// - anything else: [`LookupError::ServerError`]
pub fn classify(response: RawResponse) -> Result<Vec<u8>, LookupError> {
    match response.status {
        200..=299 => Ok(response.body),
        TOO_MANY_REQUESTS => Err(LookupError::RateLimited),
        status => Err(LookupError::ServerError { status }),
    }
}

/// Classifies a response and decodes a successful body as JSON.
pub fn decode<T: DeserializeOwned>(response: RawResponse) -> Result<T, LookupError> {
    let body = classify(response)?;
    serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Failed to parse response body");
        LookupError::from(e)
    })
}
