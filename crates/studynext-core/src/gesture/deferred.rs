//! Cancellable deferred callback for swipe commits.
//!
//! A [`DeferredCommit`] is owned by the list item that scheduled it.
//! Cancelling it, or dropping the item, aborts the task so the callback
//! can never run against an item that is gone.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// A callback scheduled to run once after a delay on the tokio runtime.
///
/// `T` is whatever the callback returns; [`DeferredCommit::wait`] hands it
/// back to the owner.
#[derive(Debug)]
pub struct DeferredCommit<T = ()> {
    handle: Option<JoinHandle<T>>,
    fired: Arc<AtomicBool>,
}

impl<T: Send + 'static> DeferredCommit<T> {
    /// Schedule `callback` to run after `delay`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(delay: Duration, callback: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let output = callback();
            flag.store(true, Ordering::Release);
            output
        });
        Self {
            handle: Some(handle),
            fired,
        }
    }
}

impl<T> DeferredCommit<T> {
    /// Whether the callback has run.
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    /// Whether the callback is still waiting to run.
    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Abort the callback if it has not run yet.
    ///
    /// Returns `true` if a pending callback was cancelled.
    pub fn cancel(&mut self) -> bool {
        let Some(handle) = self.handle.take() else {
            return false;
        };
        let was_pending = !handle.is_finished();
        handle.abort();
        if was_pending {
            tracing::debug!("deferred commit cancelled");
        }
        was_pending && !self.has_fired()
    }

    /// Wait for the callback. Returns its output, or `None` if it was
    /// cancelled before running.
    pub async fn wait(mut self) -> Option<T> {
        let handle = self.handle.take()?;
        // A JoinError here means the task was aborted or panicked.
        handle.await.ok()
    }
}

impl<T> Drop for DeferredCommit<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
        let calls = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&calls);
        (calls, move || {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_delay() {
        let (calls, callback) = counter();
        let commit = DeferredCommit::schedule(Duration::from_millis(300), callback);

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(commit.is_pending());

        assert!(commit.wait().await.is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_returns_callback_output() {
        let commit = DeferredCommit::schedule(Duration::from_millis(300), || 42);
        assert_eq!(commit.wait().await, Some(42));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_callback() {
        let (calls, callback) = counter();
        let mut commit = DeferredCommit::schedule(Duration::from_millis(300), callback);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(commit.cancel());
        assert!(!commit.cancel());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!commit.has_fired());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_callback() {
        let (calls, callback) = counter();
        {
            let _commit = DeferredCommit::schedule(Duration::from_millis(300), callback);
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_fire_reports_nothing_pending() {
        let (calls, callback) = counter();
        let mut commit = DeferredCommit::schedule(Duration::from_millis(300), callback);
        tokio::time::sleep(Duration::from_millis(400)).await;
        tokio::task::yield_now().await;

        assert!(commit.has_fired());
        assert!(!commit.cancel());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
