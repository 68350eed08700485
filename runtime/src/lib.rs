//! BMI Widget Runtime Library
//!
//! Native host for the calculation core: layered configuration, tracing
//! setup, a Tokio debouncer and the controller that wires a session to a
//! renderer. The `bmi-widget` binary drives it from a terminal.

pub mod config;
pub mod controller;
pub mod debouncer;
pub mod error;
pub mod logging;
pub mod terminal;

pub use controller::{Renderer, WidgetController};
pub use error::{RuntimeError, RuntimeResult};
