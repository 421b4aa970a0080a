//! Tracking of background export tasks
//!
//! A job dispatched to the background must still reach a terminal state
//! before the runtime shuts down. [`BackgroundTasks`] counts live tasks so
//! the owner can wait for them with [`BackgroundTasks::wait_idle`].

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Inner {
    active: AtomicUsize,
    idle: Notify,
}

/// Counter of spawned export tasks, shared by coordinator clones
#[derive(Debug, Clone, Default)]
pub struct BackgroundTasks {
    inner: Arc<Inner>,
}

/// Decrements the counter when the task ends, including on panic
struct TaskGuard(Arc<Inner>);

impl Drop for TaskGuard {
    fn drop(&mut self) {
        if self.0.active.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

impl BackgroundTasks {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a tracked task on the current runtime
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.inner.active.fetch_add(1, Ordering::SeqCst);
        let guard = TaskGuard(Arc::clone(&self.inner));
        tokio::spawn(async move {
            let _guard = guard;
            task.await;
        });
    }

    /// Number of tasks still running
    pub fn active(&self) -> usize {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// Wait until no tracked task is running
    pub async fn wait_idle(&self) {
        loop {
            // Registered before the check so a concurrent last exit is not missed
            let notified = self.inner.idle.notified();
            if self.active() == 0 {
                return;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_wait_idle_returns_immediately_when_empty() {
        let tasks = BackgroundTasks::new();
        tasks.wait_idle().await;
        assert_eq!(tasks.active(), 0);
    }

    #[tokio::test]
    async fn test_wait_idle_waits_for_every_task() {
        let tasks = BackgroundTasks::new();
        let (tx, rx) = oneshot::channel::<()>();
        let finished = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&finished);
        tasks.spawn(async move {
            let _ = rx.await;
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&finished);
        tasks.spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(tasks.active(), 2);

        let _ = tx.send(());
        tasks.wait_idle().await;
        assert_eq!(finished.load(Ordering::SeqCst), 2);
        assert_eq!(tasks.active(), 0);
    }

    #[tokio::test]
    async fn test_panicking_task_is_released() {
        let tasks = BackgroundTasks::new();
        tasks.spawn(async { panic!("task failure") });
        tasks.wait_idle().await;
        assert_eq!(tasks.active(), 0);
    }
}
