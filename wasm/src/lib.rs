//! BMI Widget WASM Module
//!
//! This crate provides the WebAssembly surface the in-browser presentation
//! adapter calls. Reports cross the boundary as JSON strings.

use bmi_widget_shared::debounce::DebounceGate;
use bmi_widget_shared::session::calculate_snapshot;
use bmi_widget_shared::{
    calculate_bmr_mifflin, ActivityLevel, CalculatorSession, DisplayReport, FieldValues, Gender,
    InputSnapshot, Settings, ToggleOutcome, UnitSystem,
};
use serde::Serialize;
use std::time::Duration;
use wasm_bindgen::prelude::*;

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// Convert a `performance.now()` reading into a gate timestamp
fn timestamp(now_ms: f64) -> Duration {
    if now_ms.is_finite() && now_ms > 0.0 {
        Duration::from_micros((now_ms * 1000.0).round() as u64)
    } else {
        Duration::ZERO
    }
}

/// Convert a debounce window given in milliseconds
///
/// Non-finite and negative values become zero; the gate clamps the result.
fn window_from_ms(window_ms: f64) -> Duration {
    if window_ms.is_finite() && window_ms > 0.0 {
        Duration::from_secs_f64(window_ms.min(60_000.0) / 1000.0)
    } else {
        Duration::ZERO
    }
}

fn parse_unit(unit: &str) -> UnitSystem {
    unit.parse().unwrap_or_default()
}

/// Calculate BMI from weight (kg) and height (cm)
///
/// Returns `undefined` for invalid input.
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    bmi_widget_shared::calculate_bmi(weight_kg, height_cm).ok()
}

/// Calculate TDEE (Total Daily Energy Expenditure)
/// Uses Mifflin-St Jeor equation
///
/// Returns `undefined` when the age is outside 1-120.
#[wasm_bindgen]
pub fn calculate_tdee(
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
    is_male: bool,
    activity_level: &str,
) -> Option<f64> {
    bmi_widget_shared::validation::validate_age(age_years).ok()?;
    let gender = if is_male { Gender::Male } else { Gender::Female };
    let bmr = calculate_bmr_mifflin(weight_kg, height_cm, age_years, gender);
    let level = ActivityLevel::parse_or_default(activity_level);
    Some(bmi_widget_shared::calculate_tdee(bmr, level) as f64)
}

/// Stateless one-shot calculation from raw form values
#[wasm_bindgen]
pub fn calculate_report(
    height: &str,
    weight: &str,
    age: &str,
    gender: &str,
    activity: &str,
    unit: &str,
) -> String {
    let settings = Settings::new(parse_unit(unit), Gender::parse_or_default(gender));
    let snapshot = InputSnapshot::from_fields(height, weight, age, activity);
    let outcome = calculate_snapshot(&snapshot, &settings);
    to_json(&DisplayReport::from_outcome(&outcome, settings.unit))
}

#[derive(Serialize)]
struct ToggleResponse {
    changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<FieldValues>,
}

impl From<ToggleOutcome> for ToggleResponse {
    fn from(outcome: ToggleOutcome) -> Self {
        match outcome {
            ToggleOutcome::Unchanged => Self {
                changed: false,
                fields: None,
            },
            ToggleOutcome::Updated { rewritten_fields } => Self {
                changed: true,
                fields: rewritten_fields,
            },
        }
    }
}

/// Stateful widget handle owning the settings, inputs and debounce gate
#[wasm_bindgen]
pub struct BmiWidget {
    session: CalculatorSession,
    gate: DebounceGate,
    pending: Option<InputSnapshot>,
}

#[wasm_bindgen]
impl BmiWidget {
    #[wasm_bindgen(constructor)]
    pub fn new(unit: &str, gender: &str, debounce_ms: f64) -> BmiWidget {
        let settings = Settings::new(parse_unit(unit), Gender::parse_or_default(gender));
        BmiWidget {
            session: CalculatorSession::new(settings),
            gate: DebounceGate::new(window_from_ms(debounce_ms)),
            pending: None,
        }
    }

    /// Record an input event; returns the time (ms) at which to call `poll`
    pub fn on_input(
        &mut self,
        height: &str,
        weight: &str,
        age: &str,
        activity: &str,
        now_ms: f64,
    ) -> f64 {
        self.pending = Some(InputSnapshot::from_fields(height, weight, age, activity));
        self.gate.trigger(timestamp(now_ms));
        self.gate
            .deadline()
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(now_ms)
    }

    /// Run the debounced recalculation if it is due; returns the report JSON
    pub fn poll(&mut self, now_ms: f64) -> Option<String> {
        if !self.gate.poll(timestamp(now_ms)) {
            return None;
        }
        let snapshot = self.pending.take()?;
        Some(to_json(self.session.update_inputs(snapshot)))
    }

    /// Select a unit system; returns `{changed, fields}` JSON
    pub fn set_unit(&mut self, unit: &str) -> String {
        self.flush();
        let response: ToggleResponse = self.session.select_unit(parse_unit(unit)).into();
        to_json(&response)
    }

    /// Select a gender; returns whether anything changed
    pub fn set_gender(&mut self, gender: &str) -> bool {
        self.flush();
        self.session
            .select_gender(Gender::parse_or_default(gender))
            .is_changed()
    }

    pub fn report_json(&self) -> String {
        to_json(self.session.report())
    }

    pub fn unit(&self) -> String {
        self.session.settings().unit.to_string()
    }

    pub fn gender(&self) -> String {
        self.session.settings().gender.to_string()
    }
}

impl BmiWidget {
    /// Apply any pending input immediately, cancelling the timer
    fn flush(&mut self) {
        self.gate.cancel();
        if let Some(snapshot) = self.pending.take() {
            self.session.update_inputs(snapshot);
        }
    }
}
