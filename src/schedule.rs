//! Cancelable one-shot deferred tasks
//!
//! A [`ScheduledTask`] runs its callback once after a delay unless it is
//! canceled first. Dropping the handle cancels it, so a screen that goes away
//! can never be hit by its own leftover timer.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Handle to a callback scheduled to run once after a delay
#[derive(Debug)]
pub struct ScheduledTask {
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    /// Run `f` once after `delay` on the current tokio runtime
    pub fn once<F>(delay: Duration, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::once_async(delay, async move { f() })
    }

    /// Run the future once after `delay`
    pub fn once_async<Fut>(delay: Duration, fut: Fut) -> Self
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fut.await;
        });
        Self {
            handle: Some(handle),
        }
    }

    /// True until the task has fired or been canceled
    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Revoke the task. Has no effect once it has fired.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
