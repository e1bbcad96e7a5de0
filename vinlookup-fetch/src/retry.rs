//! Retry policy for rate-limited requests.

use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::LookupError;

/// Policy for retrying operations that were rate limited.
///
/// Only [`LookupError::RateLimited`] is retried. The error from the final
/// attempt is returned unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub base_delay: Duration,
    /// Whether to double the delay after each failure.
    pub exponential_backoff: bool,
    /// Upper bound for a single delay.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given attempt budget.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::from_secs(1),
            exponential_backoff: true,
            max_delay: Duration::from_secs(60),
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            exponential_backoff: false,
            max_delay: Duration::ZERO,
        }
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Enables or disables exponential backoff.
    pub fn with_exponential_backoff(mut self, enabled: bool) -> Self {
        self.exponential_backoff = enabled;
        self
    }

    /// Calculates the delay after the given (1-based) failed attempt.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = if self.exponential_backoff {
            let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
            self.base_delay.saturating_mul(factor)
        } else {
            self.base_delay
        };

        delay.min(self.max_delay)
    }

    /// Determines if an error should be retried.
    pub fn should_retry(&self, error: &LookupError) -> bool {
        error.is_retryable()
    }

    /// Runs `operation` until it succeeds, fails with a non-retryable error,
    /// or the attempt budget is spent.
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempt.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, LookupError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LookupError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(attempt, max_attempts, "Running attempt");

            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) if attempt < max_attempts && self.should_retry(&error) => {
                    let delay = self.delay_for_attempt(attempt);
                    warn!(
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Rate limited, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use tokio::time::Instant;

    #[test]
    fn test_exponential_backoff() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(4));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_secs(8));
    }

    #[test]
    fn test_max_delay_cap() {
        let policy = RetryPolicy::new(10).with_base_delay(Duration::from_secs(10));

        // Should be capped at 60 seconds
        assert_eq!(policy.delay_for_attempt(5), Duration::from_secs(60));
    }

    #[test]
    fn test_constant_backoff() {
        let policy = RetryPolicy::default().with_exponential_backoff(false);
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(1));
    }

    /// Replays `results` in order, recording when each attempt started.
    async fn run_script(
        policy: &RetryPolicy,
        results: Vec<Result<u32, LookupError>>,
    ) -> (Result<u32, LookupError>, Vec<Duration>) {
        let start = Instant::now();
        let calls = AtomicU32::new(0);
        let times = Mutex::new(Vec::new());

        let result = policy
            .run(|| {
                let i = calls.fetch_add(1, Ordering::SeqCst) as usize;
                times.lock().unwrap().push(start.elapsed());
                let outcome = results[i].clone();
                async move { outcome }
            })
            .await;

        (result, times.into_inner().unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_rate_limit_then_succeeds() {
        let (result, times) = run_script(
            &RetryPolicy::default(),
            vec![Err(LookupError::RateLimited), Err(LookupError::RateLimited), Ok(7)],
        )
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(
            times,
            vec![Duration::ZERO, Duration::from_secs(1), Duration::from_secs(3)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_returns_rate_limited() {
        let (result, times) = run_script(
            &RetryPolicy::default(),
            vec![
                Err(LookupError::RateLimited),
                Err(LookupError::RateLimited),
                Err(LookupError::RateLimited),
                Ok(1),
            ],
        )
        .await;

        assert!(matches!(result, Err(LookupError::RateLimited)));
        assert_eq!(times.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_fails_immediately() {
        for error in [
            LookupError::ServerError { status: 404 },
            LookupError::ServerError { status: 500 },
            LookupError::BadResponse("timed out".into()),
        ] {
            let start = Instant::now();
            let (result, times) =
                run_script(&RetryPolicy::default(), vec![Err(error), Ok(1)]).await;

            assert!(result.is_err());
            assert_eq!(times.len(), 1);
            assert_eq!(start.elapsed(), Duration::ZERO);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_retry_policy() {
        let (result, times) = run_script(
            &RetryPolicy::no_retry(),
            vec![Err(LookupError::RateLimited), Ok(1)],
        )
        .await;

        assert!(matches!(result, Err(LookupError::RateLimited)));
        assert_eq!(times.len(), 1);
    }
}
