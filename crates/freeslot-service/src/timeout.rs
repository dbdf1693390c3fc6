//! Time-bounded fetches.
//!
//! Some provider calls have no native timeout. [`fetch_with_timeout`] races
//! such a call against a timer: whichever side finishes first wins, and the
//! loser is dropped. Dropping the future is cancellation in this runtime —
//! its pending awaits never resume and its drop guards run before the
//! wrapper returns, so repeated timeouts do not leak in-flight work. When
//! the operation wins, the timer is dropped the same way, leaving no
//! dangling scheduled wake-up.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use freeslot_store::{StoreError, StoreResult};

/// Races `operation` against a timer of `limit`.
///
/// Returns the operation's own result when it completes in time, otherwise
/// [`StoreError::Timeout`]. The losing side is cancelled, not merely
/// ignored.
pub async fn fetch_with_timeout<T, F>(operation: F, limit: Duration) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_elapsed) => {
            warn!(limit_ms = limit.as_millis() as u64, "fetch timed out, cancelled");
            Err(StoreError::Timeout { limit })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::pending;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Sets its flag when dropped, making cancellation observable.
    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn fast_operation_wins() {
        let result = fetch_with_timeout(async { Ok(42) }, Duration::from_secs(1)).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn operation_errors_pass_through() {
        let result: StoreResult<u32> = fetch_with_timeout(
            async { Err(StoreError::Unknown("backend offline".into())) },
            Duration::from_secs(1),
        )
        .await;
        assert!(matches!(result, Err(StoreError::Unknown(_))));
    }

    #[tokio::test]
    async fn hung_operation_is_cancelled() {
        let cancelled = Arc::new(AtomicBool::new(false));
        let guard = DropFlag(cancelled.clone());

        let operation = async move {
            let _guard = guard;
            pending::<StoreResult<Vec<u8>>>().await
        };

        let result = fetch_with_timeout(operation, Duration::from_millis(50)).await;

        assert!(matches!(result, Err(StoreError::Timeout { .. })));
        // The loser was dropped, not left running: its guard has fired.
        assert!(cancelled.load(Ordering::SeqCst));
    }
}
