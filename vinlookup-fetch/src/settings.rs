//! Fetch settings.
//!
//! Base URL, transport timeouts, and retry knobs for a
//! [`LookupService`](crate::service::LookupService).

use std::time::Duration;

use crate::endpoint::API_BASE_URL;
use crate::retry::RetryPolicy;
use crate::transport::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for lookup operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    /// API base URL.
    pub base_url: String,
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    /// Time allowed for the full request/response exchange.
    pub request_timeout: Duration,
    /// Maximum attempts per request, including the first.
    pub max_attempts: u32,
    /// Delay after the first rate-limited attempt; doubles afterwards.
    pub retry_base_delay: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_attempts: 3,
            retry_base_delay: Duration::from_secs(1),
        }
    }
}

impl FetchSettings {
    /// Creates a builder for customizing settings.
    pub fn builder() -> FetchSettingsBuilder {
        FetchSettingsBuilder::new()
    }

    /// Returns the retry policy described by these settings.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts).with_base_delay(self.retry_base_delay)
    }
}

// ============================================================================
// Fetch Settings Builder
// ============================================================================

/// Builder for constructing [`FetchSettings`].
#[derive(Debug, Clone, Default)]
pub struct FetchSettingsBuilder {
    settings: FetchSettings,
}

impl FetchSettingsBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.settings.base_url = url.into();
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.settings.connect_timeout = timeout;
        self
    }

    /// Sets the request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.settings.request_timeout = timeout;
        self
    }

    /// Sets the maximum number of attempts.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.settings.max_attempts = attempts;
        self
    }

    /// Sets the base retry delay.
    pub fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.settings.retry_base_delay = delay;
        self
    }

    /// Builds the settings.
    pub fn build(self) -> FetchSettings {
        self.settings
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = FetchSettings::default();
        assert_eq!(settings.base_url, "https://api.api-ninjas.com/v1");
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
        assert_eq!(settings.request_timeout, Duration::from_secs(20));
        assert_eq!(settings.retry_policy(), RetryPolicy::default());
    }

    #[test]
    fn test_builder() {
        let settings = FetchSettings::builder()
            .base_url("http://localhost:9000")
            .max_attempts(5)
            .retry_base_delay(Duration::from_millis(250))
            .request_timeout(Duration::from_secs(60))
            .build();

        assert_eq!(settings.base_url, "http://localhost:9000");
        assert_eq!(settings.request_timeout, Duration::from_secs(60));

        let policy = settings.retry_policy();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(500));
    }
}
