//! Debounced search input.
//!
//! A [`SearchBox`] turns raw keystrokes into at most one search request per
//! pause in typing. Clearing the box leaves search mode and reloads the
//! paginated list.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::dashboard::Dashboard;
use crate::error::ClientError;
use crate::store::Resource;

/// Runs the most recently scheduled task after a quiet period.
///
/// Scheduling replaces any task still waiting, so at most one timer is live.
/// Cancelling (or dropping the debouncer) stops the timer only: once the
/// quiet period has elapsed the task runs to completion, so a request that
/// has already started always settles.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// A debouncer that waits `delay` before running.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The quiet period.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` after the quiet period unless rescheduled or cancelled
    /// first.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detached: aborting the timer handle no longer reaches the task
            if let Err(e) = tokio::spawn(task).await {
                warn!(error = %e, "Debounced task panicked");
            }
        }));
    }

    /// Stop the timer, if one is waiting. A task already past its timer
    /// keeps running.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a task is scheduled and has not finished.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the scheduled task (timer included) to finish.
    pub async fn flush(&mut self) {
        let Some(handle) = self.pending.take() else {
            return;
        };
        match handle.await {
            Err(e) if !e.is_cancelled() => warn!(error = %e, "Debounced task panicked"),
            _ => {}
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Search box bound to one resource list.
#[derive(Debug)]
pub struct SearchBox {
    dashboard: Dashboard,
    resource: Resource,
    debouncer: Debouncer,
}

impl SearchBox {
    /// A search box for `resource` using the dashboard's debounce delay.
    #[must_use]
    pub fn new(dashboard: Dashboard, resource: Resource) -> Self {
        let debouncer = Debouncer::new(dashboard.search_debounce());
        Self {
            dashboard,
            resource,
            debouncer,
        }
    }

    /// The list this box searches.
    #[must_use]
    pub const fn resource(&self) -> Resource {
        self.resource
    }

    /// Handle new box contents.
    ///
    /// Non-blank text (re)starts the debounce timer for a search on the
    /// trimmed text. Blank text cancels the timer and immediately reloads the
    /// first page of the list.
    ///
    /// # Errors
    ///
    /// Returns the reload error when the box is cleared. Debounced search
    /// failures are recorded in the slice and logged.
    pub async fn input(&mut self, text: &str) -> Result<(), ClientError> {
        self.dashboard.set_search_query(self.resource, text).await;

        let query = text.trim();
        if query.is_empty() {
            self.debouncer.cancel();
            debug!(resource = ?self.resource, "Search cleared");
            return self.dashboard.exit_search(self.resource).await;
        }

        let dashboard = self.dashboard.clone();
        let resource = self.resource;
        let query = query.to_string();
        self.debouncer.schedule(async move {
            match dashboard.search(resource, &query).await {
                Ok(()) | Err(ClientError::Superseded) => {}
                Err(e) => warn!(error = %e, query = %query, "Search failed"),
            }
        });
        Ok(())
    }

    /// The debounce delay.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.debouncer.delay()
    }

    /// Whether a search is waiting or running.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Wait for any scheduled search to complete.
    pub async fn settle(&mut self) {
        self.debouncer.flush().await;
    }

    /// Drop any search still waiting for its timer.
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Fired = Arc<Mutex<Vec<&'static str>>>;

    fn record(fired: &Fired, value: &'static str) -> impl Future<Output = ()> + Send + 'static {
        let fired = fired.clone();
        async move {
            fired.lock().unwrap().push(value);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_schedule_fires() {
        let fired = Fired::default();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.schedule(record(&fired, "s"));
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.schedule(record(&fired, "sh"));
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.schedule(record(&fired, "shoe"));

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(fired.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(*fired.lock().unwrap(), vec!["shoe"]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let fired = Fired::default();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.schedule(record(&fired, "x"));
        debouncer.cancel();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(fired.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let fired = Fired::default();
        {
            let mut debouncer = Debouncer::new(Duration::from_millis(500));
            debouncer.schedule(record(&fired, "x"));
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(fired.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_timer_lets_task_finish() {
        let fired = Fired::default();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        let slow = {
            let fired = fired.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(300)).await;
                fired.lock().unwrap().push("done");
            }
        };
        debouncer.schedule(slow);
        tokio::time::sleep(Duration::from_millis(600)).await;
        drop(debouncer);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(*fired.lock().unwrap(), vec!["done"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_waits_for_task() {
        let fired = Fired::default();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.schedule(record(&fired, "x"));
        debouncer.flush().await;
        assert_eq!(*fired.lock().unwrap(), vec!["x"]);
        // Nothing left to wait for
        debouncer.flush().await;
    }
}
