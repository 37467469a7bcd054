//! Retry with exponential backoff for external-service calls.

use std::future::Future;

use tracing::warn;

use crate::config::RetryConfig;

/// Run `op` up to `policy.max_attempts` times, sleeping between attempts
/// with a doubling backoff. Every error is considered retryable; the last
/// error is returned when attempts are exhausted.
pub(crate) async fn with_retry<T, E, F, Fut>(
    policy: &RetryConfig,
    what: &str,
    mut op: F,
) -> std::result::Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
{
    let mut backoff = policy.initial_backoff;
    let mut attempt = 1u32;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < policy.max_attempts => {
                warn!(%what, attempt, error = %err, "Service call failed, retrying");
                tokio::time::sleep(backoff).await;
                backoff *= 2;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn fast_policy(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            initial_backoff: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn test_succeeds_first_try_without_sleeping() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = with_retry(&fast_policy(3), "op", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(7) }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = with_retry(&fast_policy(3), "op", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err("transient".to_string())
                } else {
                    Ok(99)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausted_attempts_return_last_error() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = with_retry(&fast_policy(2), "op", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("still down".to_string()) }
        })
        .await;

        assert_eq!(result.unwrap_err(), "still down");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
