//! HTTP transport.
//!
//! A [`Transport`] executes a [`WireRequest`] and returns the raw status and
//! body. It carries no business logic: status codes are interpreted by the
//! [`response`](crate::response) module.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::LookupError;
use crate::request::WireRequest;

/// Default time allowed to establish a connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default time allowed for the whole request/response exchange.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// User agent string for VIN Lookup.
const USER_AGENT: &str = concat!("vinlookup/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Raw Response
// ============================================================================

/// Status code and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a new raw response.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Executes wire requests against the network.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the raw response.
    ///
    /// Any failure to obtain a well-formed HTTP response, including
    /// timeouts, is reported as [`LookupError::BadResponse`].
    async fn send(&self, request: WireRequest) -> Result<RawResponse, LookupError>;
}

// ============================================================================
// HTTP Transport
// ============================================================================

/// Transport backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
}

impl HttpTransport {
    /// Creates a transport with the default timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (broken TLS setup).
    pub fn new() -> Result<Self, LookupError> {
        Self::with_timeouts(DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Creates a transport with custom timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (broken TLS setup).
    pub fn with_timeouts(connect: Duration, request: Duration) -> Result<Self, LookupError> {
        let client = Client::builder()
            .connect_timeout(connect)
            .timeout(request)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LookupError::Other(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { inner: client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: WireRequest) -> Result<RawResponse, LookupError> {
        let mut builder = self
            .inner
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        debug!(status, "Response received");

        let body = response.bytes().await?;
        Ok(RawResponse::new(status, body.to_vec()))
    }
}
