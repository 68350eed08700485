//! Runtime error handling
//!
//! Calculation failures never surface here: the shared core turns them into
//! the placeholder report. These errors cover the host side only.

use thiserror::Error;

/// Errors raised while configuring or driving a widget
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Debounce window of {0}ms is outside 100-250ms")]
    InvalidDebounceWindow(u64),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error("Widget session lock was poisoned")]
    SessionPoisoned,
}

impl RuntimeError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            RuntimeError::Config(_) => "CONFIG_ERROR",
            RuntimeError::InvalidDebounceWindow(_) => "INVALID_DEBOUNCE_WINDOW",
            RuntimeError::Logging(_) => "LOGGING_ERROR",
            RuntimeError::SessionPoisoned => "SESSION_POISONED",
        }
    }
}

/// Result type alias for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;
