//! Retry with exponential back-off for provider requests.
//!
//! [`retry_with_backoff`] wraps any fallible async operation and retries on
//! rate-limit and server-error responses (plus connect/timeout failures).
//! Everything else (404s, other 4xx, malformed bodies) is returned
//! immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

/// How a request is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure. `0` disables retries.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on every subsequent retry.
    pub base_delay: Duration,
    /// Whether HTTP 429 is retried. Providers guarded by a circuit breaker
    /// turn this off so the breaker sees the rate-limit signal at once.
    pub retry_rate_limited: bool,
    /// Adds ±25 % jitter to each delay.
    pub jitter: bool,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            retry_rate_limited: true,
            jitter: true,
        }
    }

    /// No retries at all.
    #[must_use]
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    #[must_use]
    pub fn without_rate_limit_retry(mut self) -> Self {
        self.retry_rate_limited = false;
        self
    }

    #[must_use]
    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    fn is_retriable(&self, err: &FetchError) -> bool {
        match err {
            FetchError::RateLimited { .. } => self.retry_rate_limited,
            FetchError::ServerError { .. } => true,
            FetchError::Http(e) => e.is_timeout() || e.is_connect(),
            FetchError::NotFound { .. }
            | FetchError::UnexpectedStatus { .. }
            | FetchError::Deserialize { .. }
            | FetchError::InvalidUrl { .. } => false,
        }
    }

    /// Delay before retry number `attempt` (1-based): `base * 2^(attempt-1)`,
    /// capped at 60 s.
    fn delay_for(&self, attempt: u32) -> Duration {
        const MAX_DELAY_MS: u64 = 60_000;
        let base_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(MAX_DELAY_MS);
        let computed = base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
        let capped = computed.min(MAX_DELAY_MS);
        if !self.jitter || capped == 0 {
            return Duration::from_millis(capped);
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let jittered = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
        Duration::from_millis(jittered)
    }
}

/// Runs `operation` with up to `policy.max_retries` additional attempts on
/// retriable errors. Exhausting the retries returns the last error.
///
/// Back-off schedule with `base_delay = 1s`:
///
/// | Retry | Sleep before it |
/// |-------|-----------------|
/// | 1     | 1 s             |
/// | 2     | 2 s             |
/// | 3     | 4 s             |
pub async fn retry_with_backoff<T, F, Fut>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !policy.is_retriable(&err) || attempt >= policy.max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "transient fetch error, retrying after back-off"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn rate_limited() -> FetchError {
        FetchError::RateLimited {
            url: "https://example.com/api".to_owned(),
            retry_after_secs: 0,
        }
    }

    fn server_error() -> FetchError {
        FetchError::ServerError {
            status: 503,
            url: "https://example.com/api".to_owned(),
        }
    }

    fn policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(max_retries, Duration::ZERO)
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(policy(3), || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, FetchError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_rate_limited_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(policy(3), || {
            let c = Arc::clone(&c);
            async move {
                let n = c.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(rate_limited())
                } else {
                    Ok::<u32, FetchError>(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn propagates_last_error_after_exhausting_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(policy(2), || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, FetchError>(server_error())
            }
        })
        .await;
        // max_retries=2 → 3 total attempts
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(FetchError::ServerError { status: 503, .. })));
    }

    #[tokio::test]
    async fn does_not_retry_not_found() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(policy(3), || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, FetchError>(FetchError::NotFound {
                    url: "https://example.com/missing".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(FetchError::NotFound { .. })));
    }

    #[tokio::test]
    async fn does_not_retry_deserialize_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(policy(3), || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                let e = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
                Err::<u32, FetchError>(FetchError::Deserialize {
                    context: "test".to_owned(),
                    source: e,
                })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(FetchError::Deserialize { .. })));
    }

    #[tokio::test]
    async fn rate_limit_not_retried_when_disabled() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(policy(3).without_rate_limit_retry(), || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, FetchError>(rate_limited())
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(FetchError::RateLimited { .. })));
    }

    #[test]
    fn delay_doubles_without_jitter() {
        let p = RetryPolicy::new(5, Duration::from_millis(100)).without_jitter();
        assert_eq!(p.delay_for(1), Duration::from_millis(100));
        assert_eq!(p.delay_for(2), Duration::from_millis(200));
        assert_eq!(p.delay_for(3), Duration::from_millis(400));
    }

    #[test]
    fn delay_is_capped() {
        let p = RetryPolicy::new(20, Duration::from_secs(30)).without_jitter();
        assert_eq!(p.delay_for(8), Duration::from_secs(60));
    }

    #[test]
    fn jitter_stays_within_quarter_band() {
        let p = RetryPolicy::new(3, Duration::from_millis(1_000));
        for _ in 0..50 {
            let d = p.delay_for(1).as_millis();
            assert!((750..=1_250).contains(&d), "delay {d}ms outside jitter band");
        }
    }
}
