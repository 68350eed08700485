//! Error types for the BMI widget calculator

use thiserror::Error;

/// Calculation error types
///
/// These never escape the calculator as panics: `calculator::calculate`
/// folds them into `Outcome::NoResult` so the caller can render a
/// placeholder.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
}

impl MetricsError {
    /// Stable error code for the presentation layer
    pub fn code(&self) -> &'static str {
        match self {
            MetricsError::InvalidMeasurement(_) => "invalid_measurement",
            MetricsError::InvalidProfile(_) => "invalid_profile",
        }
    }
}

/// Error returned when a wire name does not match any known variant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
