//! Widget session state
//!
//! The session owns the two toggle settings and the current input snapshot
//! and keeps the last outcome so a gender switch can recompute only the
//! BMR-dependent outputs.

use crate::calculator::{calculate, CalculationRequest, Outcome};
use crate::display::{format_one_decimal, DisplayReport};
use crate::errors::MetricsError;
use crate::health_metrics::{ActivityLevel, Gender};
use crate::units::{Measurement, UnitSystem};
use crate::validation::{parse_decimal_field, parse_integer_field};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Unit and gender selections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    pub unit: UnitSystem,
    pub gender: Gender,
}

impl Settings {
    pub fn new(unit: UnitSystem, gender: Gender) -> Self {
        Self { unit, gender }
    }

    pub fn with_unit(self, unit: UnitSystem) -> Self {
        Self { unit, ..self }
    }

    pub fn with_gender(self, gender: Gender) -> Self {
        Self { gender, ..self }
    }
}

/// A field value a unit switch should convert; zero counts as blank
fn convertible(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

/// Parsed form state, expressed in the current unit system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct InputSnapshot {
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub age_years: Option<i32>,
    #[serde(default)]
    pub activity_level: ActivityLevel,
}

impl InputSnapshot {
    /// Parse raw form field text
    pub fn from_fields(height: &str, weight: &str, age: &str, activity: &str) -> Self {
        Self {
            height: parse_decimal_field(height),
            weight: parse_decimal_field(weight),
            age_years: parse_integer_field(age),
            activity_level: ActivityLevel::parse_or_default(activity),
        }
    }

    /// Translate present height/weight values between unit systems
    ///
    /// Blank and zero values are left as they are.
    pub fn converted(&self, from: UnitSystem, to: UnitSystem) -> Self {
        if from == to {
            return *self;
        }
        Self {
            height: convertible(self.height)
                .map(|h| to.height_unit().from_cm(from.height_unit().to_cm(h)))
                .or(self.height),
            weight: convertible(self.weight)
                .map(|w| to.weight_unit().from_kg(from.weight_unit().to_kg(w)))
                .or(self.weight),
            ..*self
        }
    }

    /// Build a calculator request, if both measurement fields hold numbers
    pub fn request(&self, settings: &Settings) -> Result<CalculationRequest, MetricsError> {
        let height = self
            .height
            .ok_or_else(|| MetricsError::InvalidMeasurement("Height is required".to_string()))?;
        let weight = self
            .weight
            .ok_or_else(|| MetricsError::InvalidMeasurement("Weight is required".to_string()))?;
        Ok(CalculationRequest {
            measurement: Measurement::new(height, weight, settings.unit),
            age_years: self.age_years,
            gender: settings.gender,
            activity_level: self.activity_level,
        })
    }
}

/// Field text to write back after a unit switch
///
/// `None` leaves the field untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FieldValues {
    pub height: Option<String>,
    pub weight: Option<String>,
}

impl FieldValues {
    pub fn from_snapshot(snapshot: &InputSnapshot) -> Self {
        Self {
            height: convertible(snapshot.height).map(format_one_decimal),
            weight: convertible(snapshot.weight).map(format_one_decimal),
        }
    }
}

/// Result of a toggle selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The option was already active
    Unchanged,
    Updated {
        rewritten_fields: Option<FieldValues>,
    },
}

impl ToggleOutcome {
    pub fn is_changed(&self) -> bool {
        !matches!(self, ToggleOutcome::Unchanged)
    }
}

/// Calculate the outcome for a snapshot under the given settings
pub fn calculate_snapshot(snapshot: &InputSnapshot, settings: &Settings) -> Outcome {
    match snapshot.request(settings) {
        Ok(request) => calculate(&request),
        Err(err) => Outcome::NoResult(err),
    }
}

/// One widget's live state
#[derive(Debug, Clone)]
pub struct CalculatorSession {
    settings: Settings,
    inputs: InputSnapshot,
    outcome: Outcome,
    report: DisplayReport,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl CalculatorSession {
    pub fn new(settings: Settings) -> Self {
        let inputs = InputSnapshot::default();
        let outcome = calculate_snapshot(&inputs, &settings);
        Self {
            settings,
            inputs,
            report: DisplayReport::from_outcome(&outcome, settings.unit),
            outcome,
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn inputs(&self) -> &InputSnapshot {
        &self.inputs
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn report(&self) -> &DisplayReport {
        &self.report
    }

    /// Field text for the current inputs
    pub fn field_values(&self) -> FieldValues {
        FieldValues::from_snapshot(&self.inputs)
    }

    /// Replace the input snapshot and run the full calculation
    pub fn update_inputs(&mut self, inputs: InputSnapshot) -> &DisplayReport {
        self.inputs = inputs;
        self.recalculate()
    }

    /// Run the full calculation for the current state
    pub fn recalculate(&mut self) -> &DisplayReport {
        self.outcome = calculate_snapshot(&self.inputs, &self.settings);
        self.report = DisplayReport::from_outcome(&self.outcome, self.settings.unit);
        &self.report
    }

    /// Switch unit system, translating the inputs in place
    pub fn select_unit(&mut self, unit: UnitSystem) -> ToggleOutcome {
        if unit == self.settings.unit {
            return ToggleOutcome::Unchanged;
        }

        let previous = self.settings.unit;
        self.inputs = self.inputs.converted(previous, unit);
        self.settings = self.settings.with_unit(unit);
        debug!(from = %previous, to = %unit, "Unit system switched");

        self.recalculate();
        ToggleOutcome::Updated {
            rewritten_fields: Some(self.field_values()),
        }
    }

    /// Switch gender, recomputing only the BMR-dependent outputs
    pub fn select_gender(&mut self, gender: Gender) -> ToggleOutcome {
        if gender == self.settings.gender {
            return ToggleOutcome::Unchanged;
        }

        self.settings = self.settings.with_gender(gender);
        debug!(gender = %gender, "Gender switched");

        if let Outcome::Metrics(metrics) = &self.outcome {
            if let Ok(request) = self.inputs.request(&self.settings) {
                let updated = metrics.with_profile(&request);
                self.report = DisplayReport::from_metrics(&updated);
                self.outcome = Outcome::Metrics(updated);
            }
        }

        ToggleOutcome::Updated {
            rewritten_fields: None,
        }
    }
}
