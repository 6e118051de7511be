//! Transport-level retry for ledger node calls.
//!
//! Only transport-class failures are retried; engine rejections and RPC
//! errors are deterministic and returned to the caller untouched.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::domain::error::AppError;

/// Backoff cap applied regardless of attempt count.
const MAX_BACKOFF_MS: u64 = 5_000;

/// Exponential backoff: 100ms * 2^attempt, capped at [`MAX_BACKOFF_MS`].
#[must_use]
pub fn calculate_backoff(attempt: u32) -> Duration {
    let exp = attempt.min(6);
    let millis = 100u64.saturating_mul(1u64 << exp);
    Duration::from_millis(millis.min(MAX_BACKOFF_MS))
}

/// Run `operation` up to `attempts` times, sleeping with exponential
/// backoff between tries. Retries happen only when the failure is a
/// retryable [`crate::domain::error::LedgerError`].
pub async fn with_transport_retry<T, F, Fut>(attempts: u32, operation: F) -> Result<T, AppError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let attempts = attempts.max(1);
    let mut last_error = None;

    for attempt in 0..attempts {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(AppError::Ledger(err)) if err.is_retryable() => {
                warn!(
                    attempt = attempt + 1,
                    max_attempts = attempts,
                    error = %err,
                    "Transport error, will retry"
                );
                last_error = Some(AppError::Ledger(err));
                if attempt + 1 < attempts {
                    tokio::time::sleep(calculate_backoff(attempt)).await;
                }
            }
            Err(err) => return Err(err),
        }
    }

    Err(last_error
        .unwrap_or_else(|| AppError::Internal("retry loop finished without a result".to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::LedgerError;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_backoff_growth_and_cap() {
        assert_eq!(calculate_backoff(0), Duration::from_millis(100));
        assert_eq!(calculate_backoff(1), Duration::from_millis(200));
        assert_eq!(calculate_backoff(3), Duration::from_millis(800));
        // Cap kicks in well before overflow territory
        assert_eq!(calculate_backoff(10), calculate_backoff(6));
        assert!(calculate_backoff(100) <= Duration::from_millis(MAX_BACKOFF_MS));
    }

    #[tokio::test]
    async fn test_transient_failure_then_success() {
        let calls = AtomicU32::new(0);
        let result = with_transport_retry(3, || async {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AppError::Ledger(LedgerError::Timeout("10s".into())))
            } else {
                Ok(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_terminal_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_transport_retry(5, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(AppError::Ledger(LedgerError::EngineResult {
                code: "tecUNFUNDED".into(),
                message: "unfunded".into(),
            }))
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exhausted_attempts_return_last_error() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_transport_retry(3, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(AppError::Ledger(LedgerError::Connection("refused".into())))
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(
            result,
            Err(AppError::Ledger(LedgerError::Connection(_)))
        ));
    }
}
