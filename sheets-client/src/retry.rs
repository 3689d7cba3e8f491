//! Retry loop with exponential backoff
//!
//! A request is attempted `max_retries + 1` times in total. Between
//! attempts the loop sleeps `retry_delay * 2^attempt` (or a constant
//! `retry_delay` with backoff disabled). The per-attempt timeout is the
//! caller's job; a hung attempt must not eat the whole retry budget.

use std::time::Duration;

use crate::error::{ClientError, ClientResult};

/// Retry parameters for one logical call
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure
    pub max_retries: u32,
    /// Base delay between attempts
    pub retry_delay: Duration,
    /// Double the delay after every failed attempt
    pub backoff: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_millis(1000),
            backoff: true,
        }
    }
}

impl RetryPolicy {
    /// Delay before the retry following attempt number `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if self.backoff {
            self.retry_delay * 2u32.saturating_pow(attempt)
        } else {
            self.retry_delay
        }
    }

    /// Sum of all sleeps a fully-exhausted call would make.
    ///
    /// Used to bound how long callers wait for connectivity to return.
    pub fn total_delay(&self) -> Duration {
        (0..self.max_retries).map(|a| self.delay_for(a)).sum()
    }
}

/// Run `op` until it succeeds, the error is terminal, or the retry budget
/// is exhausted. The attempt number (0-based) is passed to `op`.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> ClientResult<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = ClientResult<T>>,
{
    let mut attempt = 0;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_retryable() || attempt >= policy.max_retries {
                    return Err(err);
                }
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    "Request failed, retrying: {err}"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counter() -> Arc<AtomicU32> {
        Arc::new(AtomicU32::new(0))
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_transient_failures() {
        let calls = counter();
        let calls2 = calls.clone();

        let result = with_retry(&RetryPolicy::default(), move |_| {
            let calls = calls2.clone();
            async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(ClientError::Status(502))
                } else {
                    Ok("data")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "data");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_the_budget_then_returns_the_last_error() {
        let calls = counter();
        let calls2 = calls.clone();
        let policy = RetryPolicy::default();

        let result: ClientResult<()> = with_retry(&policy, move |_| {
            let calls = calls2.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ClientError::Timeout(10))
            }
        })
        .await;

        assert!(matches!(result, Err(ClientError::Timeout(10))));
        // max_retries + 1 total attempts
        assert_eq!(calls.load(Ordering::SeqCst), policy.max_retries + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn terminal_errors_are_not_retried() {
        let calls = counter();
        let calls2 = calls.clone();

        let result: ClientResult<()> = with_retry(&RetryPolicy::default(), move |_| {
            let calls = calls2.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ClientError::Backend("no such action".to_string()))
            }
        })
        .await;

        assert!(matches!(result, Err(ClientError::Backend(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_doubles_the_delay() {
        let started = tokio::time::Instant::now();
        let calls = counter();
        let calls2 = calls.clone();

        let _: ClientResult<()> = with_retry(&RetryPolicy::default(), move |_| {
            let calls = calls2.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ClientError::Status(503))
            }
        })
        .await;

        // 1s + 2s + 4s of (auto-advanced) sleeping.
        assert_eq!(started.elapsed(), Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn constant_delay_without_backoff() {
        let policy = RetryPolicy {
            backoff: false,
            ..RetryPolicy::default()
        };
        let started = tokio::time::Instant::now();

        let _: ClientResult<()> =
            with_retry(&policy, |_| async { Err(ClientError::Status(503)) }).await;

        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    #[test]
    fn total_delay_matches_the_schedule() {
        assert_eq!(
            RetryPolicy::default().total_delay(),
            Duration::from_secs(7)
        );
    }
}
