//! Process-wide cancellation context.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio_util::sync::CancellationToken;

/// Cancellation handle shared by the controller and the run loop.
///
/// Clones observe the same state. Cancellation happens at most once; later
/// calls to [`ProcessContext::cancel`] are no-ops.
#[derive(Debug, Clone, Default)]
pub struct ProcessContext {
    token: CancellationToken,
    fired: Arc<AtomicBool>,
}

impl ProcessContext {
    /// Create a fresh, uncancelled context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the context. Returns true only for the call that cancelled it.
    pub fn cancel(&self) -> bool {
        let first = !self.fired.swap(true, Ordering::AcqRel);
        if first {
            self.token.cancel();
        }
        first
    }

    /// Whether the context has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the context is cancelled.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_cancel_exactly_once() {
        let ctx = ProcessContext::new();
        let observer = ctx.clone();

        assert!(!observer.is_cancelled());
        assert!(ctx.cancel());
        assert!(!ctx.cancel());
        assert!(!observer.cancel());
        assert!(observer.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_wakes_waiters() {
        let ctx = ProcessContext::new();
        let waiter = ctx.clone();
        let handle = tokio::spawn(async move { waiter.cancelled().await });

        ctx.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("waiter not woken")
            .unwrap();
    }
}
