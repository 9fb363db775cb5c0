//! Single-slot debounce timer
//!
//! Every call to [`Debouncer::schedule`] cancels the pending timer and starts
//! a new one. When a timer survives its full quiet period, its task is handed
//! off to its own tokio task, so a later `schedule` or `cancel` never aborts
//! work that has already started.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Delays work until input has been quiet for a fixed interval
#[derive(Debug)]
pub struct Debouncer {
    /// Quiet period before the pending task fires
    delay: Duration,
    /// The one pending timer, if any
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the pending timer with one that runs `task` after the quiet period
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let deadline = tokio::time::Instant::now() + self.delay;
        let timer = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            tokio::spawn(task);
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(timer);

        if let Some(previous) = previous {
            previous.abort();
            tracing::trace!("Debounce timer restarted");
        }
    }

    /// Drop the pending timer without firing it
    pub fn cancel(&self) {
        if let Some(pending) = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pending.abort();
            tracing::trace!("Debounce timer cancelled");
        }
    }

    /// Whether a timer is still waiting out its quiet period
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(pending) = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::Mutex as AsyncMutex;

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_schedules_fire_once_with_last_value() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let fired = Arc::new(AsyncMutex::new(Vec::new()));

        for (i, term) in ["p", "pi", "pik"].into_iter().enumerate() {
            let fired = fired.clone();
            debouncer.schedule(async move {
                fired.lock().await.push(term);
            });
            if i < 2 {
                tokio::time::advance(Duration::from_millis(40)).await;
            }
        }

        tokio::time::advance(Duration::from_millis(299)).await;
        settle().await;
        assert!(fired.lock().await.is_empty());

        tokio::time::advance(Duration::from_millis(2)).await;
        settle().await;
        assert_eq!(*fired.lock().await, vec!["pik"]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let fired = Arc::new(AsyncMutex::new(0u32));

        let counter = fired.clone();
        debouncer.schedule(async move {
            *counter.lock().await += 1;
        });
        assert!(debouncer.is_pending());

        debouncer.cancel();
        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;

        assert_eq!(*fired.lock().await, 0);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_schedules_each_fire() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let fired = Arc::new(AsyncMutex::new(Vec::new()));

        for term in ["bulba", "char"] {
            let fired = fired.clone();
            debouncer.schedule(async move {
                fired.lock().await.push(term);
            });
            tokio::time::advance(Duration::from_millis(150)).await;
            settle().await;
        }

        assert_eq!(*fired.lock().await, vec!["bulba", "char"]);
    }
}
