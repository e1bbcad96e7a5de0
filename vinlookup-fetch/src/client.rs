//! API client: request building, transport, and decoding under a retry policy.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::endpoint::Endpoint;
use crate::error::LookupError;
use crate::request::RequestBuilder;
use crate::response;
use crate::retry::RetryPolicy;
use crate::transport::Transport;

/// Executes endpoint calls end to end.
///
/// One call runs the whole pipeline (build, send, classify, decode) and
/// repeats it per the retry policy when rate limited. It holds no cache;
/// deduplication happens in [`Coalescer`](crate::coalesce::Coalescer).
#[derive(Clone)]
pub struct ApiClient {
    requests: RequestBuilder,
    transport: Arc<dyn Transport>,
    retry_policy: RetryPolicy,
}

impl ApiClient {
    /// Creates a new client.
    pub fn new(requests: RequestBuilder, transport: Arc<dyn Transport>) -> Self {
        Self {
            requests,
            transport,
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Sets the retry policy for this client.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Performs the call, retrying rate-limited attempts.
    ///
    /// # Errors
    ///
    /// Returns the first non-retryable error, or the last
    /// [`LookupError::RateLimited`] once the attempt budget is spent.
    #[instrument(skip(self, endpoint), fields(path = endpoint.path()))]
    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, LookupError> {
        self.retry_policy.run(|| self.perform(endpoint)).await
    }

    /// Performs a single attempt without retrying.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built, sent, or decoded.
    pub async fn perform<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, LookupError> {
        let request = self.requests.build(endpoint)?;
        let raw = self.transport.send(request).await?;
        debug!(status = raw.status, bytes = raw.body.len(), "Classifying response");
        response::decode(raw)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("requests", &self.requests)
            .field("retry_policy", &self.retry_policy)
            .finish_non_exhaustive()
    }
}
