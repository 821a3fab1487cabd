//! Attempt loop shared by the HTTP providers

use crate::LlmError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Outcome of one HTTP attempt
pub(crate) enum Attempt<T> {
    /// Finished; stop retrying
    Done(T),
    /// Transient failure; try again after a backoff
    Retry(LlmError),
}

/// Run `attempt` up to `max_attempts` times with exponential backoff
///
/// An `Err` from `attempt` is permanent and returned immediately; only
/// [`Attempt::Retry`] outcomes are retried. After the last attempt the most
/// recent transient error is returned.
pub(crate) async fn with_backoff<T, F, Fut>(
    provider: &str,
    max_attempts: u32,
    mut attempt: F,
) -> Result<T, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Attempt<T>, LlmError>>,
{
    let mut last_error = None;

    for n in 1..=max_attempts.max(1) {
        match attempt().await? {
            Attempt::Done(value) => return Ok(value),
            Attempt::Retry(error) => {
                if n < max_attempts {
                    let delay = backoff(n);
                    warn!("{} attempt {} failed ({}), retrying in {:?}", provider, n, error, delay);
                    tokio::time::sleep(delay).await;
                }
                last_error = Some(error);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| LlmError::Communication("No attempt was made".to_string())))
}

/// 1s, 2s, 4s, ... capped at 64s
fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(1 << attempt.saturating_sub(1).min(6))
}

/// Transient error carrying the status and body of a failed response
pub(crate) async fn http_error(response: reqwest::Response) -> LlmError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    LlmError::Communication(format!("HTTP {}: {}", status, body))
}

/// Transient error for a request that never got a response
pub(crate) fn send_error(error: reqwest::Error) -> LlmError {
    LlmError::Communication(format!("Request failed: {}", error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_backoff_doubles_then_caps() {
        assert_eq!(backoff(1), Duration::from_secs(1));
        assert_eq!(backoff(3), Duration::from_secs(4));
        assert_eq!(backoff(40), Duration::from_secs(64));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_done() {
        let calls = Cell::new(0);
        let result = with_backoff("test", 3, || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move {
                if n < 3 {
                    Ok(Attempt::Retry(LlmError::RateLimitExceeded))
                } else {
                    Ok(Attempt::Done("ok"))
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_transient_error_is_returned() {
        let result: Result<(), _> = with_backoff("test", 2, || async {
            Ok(Attempt::Retry(LlmError::RateLimitExceeded))
        })
        .await;
        assert!(matches!(result, Err(LlmError::RateLimitExceeded)));
    }

    #[tokio::test]
    async fn test_permanent_error_stops_immediately() {
        let calls = Cell::new(0);
        let result: Result<(), _> = with_backoff("test", 5, || {
            calls.set(calls.get() + 1);
            async { Err(LlmError::ModelNotAvailable("m".to_string())) }
        })
        .await;

        assert!(matches!(result, Err(LlmError::ModelNotAvailable(_))));
        assert_eq!(calls.get(), 1);
    }
}
