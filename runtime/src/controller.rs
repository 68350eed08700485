//! Widget controller
//!
//! Binds a [`CalculatorSession`] to a [`Renderer`] and a [`Debouncer`].
//! Input changes are debounced; toggles apply immediately. The session and
//! the pending input snapshot live behind one mutex shared with the
//! scheduled recalculation task.

use crate::config::WidgetConfig;
use crate::debouncer::Debouncer;
use crate::error::{RuntimeError, RuntimeResult};
use bmi_widget_shared::{
    CalculatorSession, DisplayReport, FieldValues, Gender, InputSnapshot, Settings,
    ToggleOutcome, UnitSystem,
};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, error, info};

/// Presentation adapter the controller draws into
pub trait Renderer: Send + Sync + 'static {
    /// Show a freshly computed report
    fn render(&self, report: &DisplayReport);

    /// Replace the text of the height and weight fields after a unit switch
    fn rewrite_fields(&self, fields: &FieldValues);
}

#[derive(Debug)]
struct WidgetState {
    session: CalculatorSession,
    pending: Option<InputSnapshot>,
    /// Bumped on every input event; a scheduled task only fires for the latest
    generation: u64,
}

impl WidgetState {
    fn new(session: CalculatorSession) -> Self {
        Self {
            session,
            pending: None,
            generation: 0,
        }
    }

    /// Store a snapshot and return the generation its task must present
    fn stage(&mut self, snapshot: InputSnapshot) -> u64 {
        self.generation += 1;
        self.pending = Some(snapshot);
        self.generation
    }

    /// Apply the pending snapshot, if any, returning the new report
    fn flush(&mut self) -> Option<DisplayReport> {
        let snapshot = self.pending.take()?;
        Some(self.session.update_inputs(snapshot).clone())
    }

    /// Flush on behalf of a scheduled task
    ///
    /// A task that was superseded after it woke up must not apply the newer
    /// snapshot early; the newer trigger's own task does that.
    fn flush_scheduled(&mut self, generation: u64) -> Option<DisplayReport> {
        if generation != self.generation {
            return None;
        }
        self.flush()
    }
}

fn lock(state: &Mutex<WidgetState>) -> RuntimeResult<MutexGuard<'_, WidgetState>> {
    state.lock().map_err(|_| RuntimeError::SessionPoisoned)
}

pub struct WidgetController<R: Renderer> {
    state: Arc<Mutex<WidgetState>>,
    renderer: Arc<R>,
    debouncer: Debouncer,
}

impl<R: Renderer> WidgetController<R> {
    /// Create a controller and render the initial placeholder report
    pub fn new(settings: Settings, window: Duration, renderer: R) -> Self {
        let session = CalculatorSession::new(settings);
        renderer.render(session.report());
        info!(
            unit = %settings.unit,
            gender = %settings.gender,
            "Widget initialized"
        );

        Self {
            state: Arc::new(Mutex::new(WidgetState::new(session))),
            renderer: Arc::new(renderer),
            debouncer: Debouncer::new(window),
        }
    }

    pub fn from_config(config: &WidgetConfig, renderer: R) -> Self {
        Self::new(config.settings(), config.debounce_window(), renderer)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Record new input values; the report is recomputed once input settles
    ///
    /// Must be called from within a Tokio runtime.
    pub fn on_input(&mut self, snapshot: InputSnapshot) -> RuntimeResult<()> {
        let generation = lock(&self.state)?.stage(snapshot);

        let state = Arc::clone(&self.state);
        let renderer = Arc::clone(&self.renderer);
        self.debouncer.trigger(move || match lock(&state) {
            Ok(mut guard) => {
                if let Some(report) = guard.flush_scheduled(generation) {
                    drop(guard);
                    debug!(bmi = %report.bmi, "Debounced recalculation");
                    renderer.render(&report);
                }
            }
            Err(e) => error!(code = e.code(), "Debounced recalculation failed: {}", e),
        });
        Ok(())
    }

    /// Record raw field text as typed by the user
    pub fn on_fields(
        &mut self,
        height: &str,
        weight: &str,
        age: &str,
        activity: &str,
    ) -> RuntimeResult<()> {
        self.on_input(InputSnapshot::from_fields(height, weight, age, activity))
    }

    /// Apply any pending input now instead of waiting for the quiet period
    ///
    /// Returns whether there was anything to apply.
    pub fn flush(&mut self) -> RuntimeResult<bool> {
        self.debouncer.cancel();
        let report = lock(&self.state)?.flush();
        match report {
            Some(report) => {
                self.renderer.render(&report);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Switch the unit system, converting the entered values
    pub fn select_unit(&mut self, unit: UnitSystem) -> RuntimeResult<ToggleOutcome> {
        self.debouncer.cancel();
        let mut state = lock(&self.state)?;
        let flushed = state.flush().is_some();
        let outcome = state.session.select_unit(unit);
        let report = state.session.report().clone();
        drop(state);

        if let ToggleOutcome::Updated {
            rewritten_fields: Some(fields),
        } = &outcome
        {
            self.renderer.rewrite_fields(fields);
        }
        if flushed || outcome.is_changed() {
            self.renderer.render(&report);
        }
        Ok(outcome)
    }

    /// Switch the gender used for the energy estimate
    pub fn select_gender(&mut self, gender: Gender) -> RuntimeResult<ToggleOutcome> {
        self.debouncer.cancel();
        let mut state = lock(&self.state)?;
        let flushed = state.flush().is_some();
        let outcome = state.session.select_gender(gender);
        let report = state.session.report().clone();
        drop(state);

        if flushed || outcome.is_changed() {
            self.renderer.render(&report);
        }
        Ok(outcome)
    }

    pub fn report(&self) -> RuntimeResult<DisplayReport> {
        Ok(lock(&self.state)?.session.report().clone())
    }

    pub fn settings(&self) -> RuntimeResult<Settings> {
        Ok(lock(&self.state)?.session.settings())
    }

    pub fn field_values(&self) -> RuntimeResult<FieldValues> {
        Ok(lock(&self.state)?.session.field_values())
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
