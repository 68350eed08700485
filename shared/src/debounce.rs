//! Time-agnostic debounce gate
//!
//! The host supplies the current time on every call, so the gate works the
//! same under a browser event loop (`performance.now()`) and in tests.
//! Every trigger supersedes the pending one and pushes the deadline out by
//! one full window.

use std::time::Duration;

/// Shortest accepted quiet period
pub const MIN_DEBOUNCE_WINDOW: Duration = Duration::from_millis(100);

/// Longest accepted quiet period
pub const MAX_DEBOUNCE_WINDOW: Duration = Duration::from_millis(250);

/// Default quiet period
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = MAX_DEBOUNCE_WINDOW;

/// Clamp a requested window into the accepted range
pub fn clamp_window(window: Duration) -> Duration {
    window.clamp(MIN_DEBOUNCE_WINDOW, MAX_DEBOUNCE_WINDOW)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceGate {
    window: Duration,
    deadline: Option<Duration>,
    generation: u64,
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_WINDOW)
    }
}

impl DebounceGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window: clamp_window(window),
            deadline: None,
            generation: 0,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Number of triggers seen so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Register a trigger at `now`, replacing any pending one
    pub fn trigger(&mut self, now: Duration) -> u64 {
        self.generation += 1;
        self.deadline = Some(now + self.window);
        self.generation
    }

    /// Drop the pending trigger without firing
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns `true` exactly once when the quiet period has elapsed
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
