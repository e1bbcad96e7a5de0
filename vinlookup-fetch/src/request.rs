//! Wire request construction.
//!
//! Turns an [`Endpoint`] plus the API credential into a fully formed
//! [`WireRequest`]: URL with encoded query, headers, and an optional
//! multipart body for image uploads.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::endpoint::{API_BASE_URL, Endpoint};
use crate::error::LookupError;

/// Header carrying the API credential.
const API_KEY_HEADER: &str = "x-api-key";

/// Multipart field name for the uploaded image.
const IMAGE_FIELD: &str = "image";

/// Filename reported for the uploaded image.
const IMAGE_FILENAME: &str = "image.jpg";

/// Content type reported for the uploaded image.
const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

// ============================================================================
// Wire Request
// ============================================================================

/// A request ready to be handed to a [`Transport`](crate::transport::Transport).
#[derive(Debug, Clone)]
pub struct WireRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL including the query string.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request body, if any.
    pub body: Option<Vec<u8>>,
}

impl WireRequest {
    /// Returns a header value as a string.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

// ============================================================================
// Request Builder
// ============================================================================

/// Builds wire requests for API endpoints.
#[derive(Clone)]
pub struct RequestBuilder {
    base_url: String,
    api_key: String,
}

impl RequestBuilder {
    /// Creates a builder for the public API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(API_BASE_URL, api_key)
    }

    /// Creates a builder against a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Creates the wire request for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidUrl`] if the base URL and path do not
    /// form an absolute URL, or [`LookupError::Other`] if a header cannot be
    /// encoded.
    pub fn build(&self, endpoint: &Endpoint) -> Result<WireRequest, LookupError> {
        let url = self.url_for(endpoint)?;

        let mut headers = HeaderMap::new();
        for (name, value) in endpoint.headers() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| LookupError::Other(format!("Invalid header name: {e}")))?;
            headers.insert(name, HeaderValue::from_static(value));
        }

        let mut api_key = HeaderValue::from_str(&self.api_key)
            .map_err(|_| LookupError::Other("API key is not a valid header value".to_string()))?;
        api_key.set_sensitive(true);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);

        let body = match endpoint.payload() {
            Some(image) => {
                let boundary = Uuid::new_v4().to_string();
                let content_type = HeaderValue::from_str(&format!(
                    "multipart/form-data; boundary={boundary}"
                ))
                .map_err(|e| LookupError::Other(format!("Invalid content type: {e}")))?;
                headers.insert(CONTENT_TYPE, content_type);
                Some(multipart_body(&boundary, image))
            }
            None => None,
        };

        debug!(method = %endpoint.method(), url = %url, "Built request");

        Ok(WireRequest {
            method: endpoint.method(),
            url,
            headers,
            body,
        })
    }

    fn url_for(&self, endpoint: &Endpoint) -> Result<Url, LookupError> {
        let raw = format!("{}{}", self.base_url.trim_end_matches('/'), endpoint.path());
        let mut url = Url::parse(&raw)?;
        if url.cannot_be_a_base() {
            return Err(LookupError::InvalidUrl(raw));
        }

        let parameters = endpoint.parameters();
        if !parameters.is_empty() {
            url.query_pairs_mut().extend_pairs(parameters);
        }

        Ok(url)
    }
}

impl std::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Encodes a single-part `multipart/form-data` body holding the image.
pub(crate) fn multipart_body(boundary: &str, image: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(image.len() + 256);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{IMAGE_FIELD}\"; filename=\"{IMAGE_FILENAME}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {IMAGE_CONTENT_TYPE}\r\n\r\n").as_bytes());
    body.extend_from_slice(image);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

// ============================================================================
// Tests
// ============================================================================
