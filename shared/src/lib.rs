//! BMI Widget Shared Library
//!
//! This crate contains the calculation core of the BMI widget: unit
//! conversion, health metrics, classification, display formatting and the
//! session state machine. It is used by the WASM bindings and the native
//! runtime.

pub mod advice;
pub mod calculator;
pub mod debounce;
pub mod display;
pub mod errors;
pub mod health_metrics;
pub mod session;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use calculator::{calculate, CalculationRequest, HealthMetrics, Outcome};
pub use display::{CalorieDisplay, DisplayReport};
pub use errors::*;
pub use health_metrics::*;
pub use session::{CalculatorSession, FieldValues, InputSnapshot, Settings, ToggleOutcome};
pub use units::*;
