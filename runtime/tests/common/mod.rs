//! Common test utilities for integration tests
//!
//! Provides a renderer that records everything the controller draws.

use bmi_widget_runtime::{Renderer, WidgetController};
use bmi_widget_shared::{DisplayReport, FieldValues, Settings};
use std::sync::Mutex;
use std::time::Duration;

/// Renderer that keeps every call for later inspection
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    reports: Mutex<Vec<DisplayReport>>,
    rewrites: Mutex<Vec<FieldValues>>,
}

impl RecordingRenderer {
    pub fn reports(&self) -> Vec<DisplayReport> {
        self.reports.lock().unwrap().clone()
    }

    pub fn rewrites(&self) -> Vec<FieldValues> {
        self.rewrites.lock().unwrap().clone()
    }

    pub fn render_count(&self) -> usize {
        self.reports.lock().unwrap().len()
    }

    pub fn last_report(&self) -> DisplayReport {
        self.reports
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("at least the initial report is rendered")
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, report: &DisplayReport) {
        self.reports.lock().unwrap().push(report.clone());
    }

    fn rewrite_fields(&self, fields: &FieldValues) {
        self.rewrites.lock().unwrap().push(fields.clone());
    }
}

pub const WINDOW: Duration = Duration::from_millis(250);

/// Controller with default settings and a recording renderer
pub fn test_widget() -> WidgetController<RecordingRenderer> {
    WidgetController::new(Settings::default(), WINDOW, RecordingRenderer::default())
}

/// Let the debounce window elapse under paused time
pub async fn settle() {
    tokio::time::sleep(WINDOW + Duration::from_millis(10)).await;
}
