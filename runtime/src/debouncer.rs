//! Tokio-backed trailing-edge debouncer
//!
//! Each trigger aborts the previously scheduled task and schedules a new one
//! a full window later, so a burst of triggers runs the action once.

use bmi_widget_shared::debounce::clamp_window;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Create a debouncer; the window is clamped to 100-250ms
    pub fn new(window: Duration) -> Self {
        Self {
            window: clamp_window(window),
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedule `action` after the quiet period, superseding any pending one
    ///
    /// Must be called from within a Tokio runtime.
    pub fn trigger<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let window = self.window;
        trace!(window_ms = window.as_millis() as u64, "Debounce scheduled");
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            action();
        }));
    }

    /// Drop the pending action without running it
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
