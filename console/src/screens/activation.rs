//! Per-activation cancellation of in-flight screen calls.
//!
//! Each screen activation owns a token. Cancelling it (navigating away,
//! Ctrl+C) makes every pending and future call of that activation resolve as
//! `Cancelled`, so late responses can never overwrite screen state.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

use crate::errors::ConsoleError;

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Shared cancellation signal for one screen activation.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Resolves once `cancel` has been called.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }

    /// Runs `call` unless the activation is cancelled first; a result that
    /// arrives after cancellation is dropped.
    pub async fn guard<T, F>(&self, call: F) -> Result<T, ConsoleError>
    where
        F: Future<Output = Result<T, ConsoleError>>,
    {
        if self.is_cancelled() {
            return Err(ConsoleError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(ConsoleError::Cancelled),
            result = call => {
                if self.is_cancelled() {
                    Err(ConsoleError::Cancelled)
                } else {
                    result
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn passes_results_through_while_active() {
        let token = CancellationToken::new();
        let value = token.guard(async { Ok::<_, ConsoleError>(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn cancelled_token_short_circuits() {
        let token = CancellationToken::new();
        token.cancel();
        let result = token.guard(async { Ok::<_, ConsoleError>(7) }).await;
        assert!(matches!(result, Err(ConsoleError::Cancelled)));
    }

    #[tokio::test]
    async fn cancellation_aborts_pending_call() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let result = token
            .guard(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok::<_, ConsoleError>(())
            })
            .await;
        assert!(matches!(result, Err(ConsoleError::Cancelled)));
    }

    #[tokio::test]
    async fn late_result_is_discarded() {
        let token = CancellationToken::new();
        let inside = token.clone();
        let result = token
            .guard(async move {
                inside.cancel();
                Ok::<_, ConsoleError>("respuesta tardía")
            })
            .await;
        assert!(matches!(result, Err(ConsoleError::Cancelled)));
    }
}
