use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::error::EmbedError;

/// Bounded exponential backoff for retryable embedding failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry, doubled for each following one
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Single attempt, no retries
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Delay before retry number `retry` (1-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(retry.saturating_sub(1)))
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or
    /// the retry budget is spent.
    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> Result<T, EmbedError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, EmbedError>>,
    {
        let mut retry = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && retry < self.max_retries => {
                    retry += 1;
                    let delay = self.delay_for(retry);
                    warn!(
                        "{} failed (retry {}/{}): {}. Retrying in {:?}...",
                        what, retry, self.max_retries, e, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(max_retries, Duration::from_millis(1))
    }

    #[test]
    fn test_delay_doubles() {
        let policy = RetryPolicy::new(4, Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_retries_transport_then_succeeds() {
        let calls = &AtomicU32::new(0);
        let result = fast(3)
            .run("embed", move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(EmbedError::Transport("connection reset".into()))
                } else {
                    Ok(vec![1.0f32])
                }
            })
            .await;

        assert_eq!(result.unwrap(), vec![1.0]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_budget() {
        let calls = &AtomicU32::new(0);
        let result: Result<(), _> = fast(2)
            .run("embed", move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(EmbedError::Timeout("30s".into()))
            })
            .await;

        assert!(matches!(result, Err(EmbedError::Timeout(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_quota_is_not_retried() {
        let calls = &AtomicU32::new(0);
        let result: Result<(), _> = fast(5)
            .run("embed", move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(EmbedError::Quota("insufficient_quota".into()))
            })
            .await;

        assert!(matches!(result, Err(EmbedError::Quota(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
