//! Display formatting
//!
//! This is the only place values are rounded. Everything upstream keeps full
//! precision.

use crate::advice::ADVICE_PLACEHOLDER;
use crate::calculator::{HealthMetrics, Outcome};
use crate::health_metrics::{
    category_style, CalorieGoal, EnergyMetrics, HEALTHY_BMI_MAX, HEALTHY_BMI_MIN,
};
use crate::units::UnitSystem;
use serde::{Deserialize, Serialize};

/// Text shown in any slot without a value
pub const PLACEHOLDER: &str = "-";

/// Category color used while there is no result
pub const PLACEHOLDER_COLOR: &str = "inherit";

/// Format a value with one decimal place
pub fn format_one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

/// Format a daily calorie figure
pub fn format_kcal_per_day(kcal: i64) -> String {
    format!("{} kcal/day", kcal)
}

/// Calorie section state
///
/// Either every slot shows the placeholder, or exactly one target is
/// visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CalorieDisplay {
    Placeholder,
    Target { goal: CalorieGoal, text: String },
}

impl CalorieDisplay {
    pub fn from_energy(energy: &EnergyMetrics) -> Self {
        CalorieDisplay::Target {
            goal: energy.goal,
            text: format_kcal_per_day(energy.targets.for_goal(energy.goal)),
        }
    }

    /// Text for one slot, or `None` if the slot is hidden
    pub fn slot_text(&self, slot: CalorieGoal) -> Option<&str> {
        match self {
            CalorieDisplay::Placeholder => Some(PLACEHOLDER),
            CalorieDisplay::Target { goal, text } if *goal == slot => Some(text.as_str()),
            CalorieDisplay::Target { .. } => None,
        }
    }
}

/// Everything the presentation adapter writes to the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayReport {
    pub unit: UnitSystem,
    pub height_unit: String,
    pub weight_unit: String,
    pub bmi: String,
    pub bmi_unit_label: String,
    pub category_label: String,
    pub category_color: String,
    pub healthy_bmi_range: String,
    pub healthy_weight_range: String,
    /// Pointer offset in percent of the gauge width
    pub gauge_position: f64,
    pub bmi_prime: String,
    pub ponderal_index: String,
    pub calories: CalorieDisplay,
    pub fitness_advice: String,
}

impl DisplayReport {
    /// Neutral state shown before valid input exists
    pub fn placeholder(unit: UnitSystem) -> Self {
        Self {
            unit,
            height_unit: unit.height_unit().to_string(),
            weight_unit: unit.weight_unit().to_string(),
            bmi: PLACEHOLDER.to_string(),
            bmi_unit_label: unit.bmi_unit_label().to_string(),
            category_label: PLACEHOLDER.to_string(),
            category_color: PLACEHOLDER_COLOR.to_string(),
            healthy_bmi_range: healthy_bmi_range(unit),
            healthy_weight_range: PLACEHOLDER.to_string(),
            gauge_position: 0.0,
            bmi_prime: PLACEHOLDER.to_string(),
            ponderal_index: PLACEHOLDER.to_string(),
            calories: CalorieDisplay::Placeholder,
            fitness_advice: ADVICE_PLACEHOLDER.to_string(),
        }
    }

    pub fn from_metrics(metrics: &HealthMetrics) -> Self {
        let unit = metrics.unit;
        let body = &metrics.body;
        let style = category_style(body.category);
        let range = body.healthy_weight_range_kg.to_unit(unit.weight_unit());

        Self {
            bmi: format_one_decimal(body.bmi),
            category_label: style.label.to_string(),
            category_color: style.color.to_string(),
            healthy_weight_range: format!(
                "{} - {} {}",
                format_one_decimal(range.min),
                format_one_decimal(range.max),
                unit.weight_unit()
            ),
            gauge_position: body.gauge_position,
            bmi_prime: format!("{:.2}", body.bmi_prime),
            ponderal_index: format!(
                "{} {}",
                format_one_decimal(body.ponderal_index.value),
                body.ponderal_index.suffix
            ),
            calories: metrics
                .energy
                .as_ref()
                .map(CalorieDisplay::from_energy)
                .unwrap_or(CalorieDisplay::Placeholder),
            fitness_advice: metrics
                .fitness_advice
                .clone()
                .unwrap_or_else(|| ADVICE_PLACEHOLDER.to_string()),
            ..Self::placeholder(unit)
        }
    }

    /// Placeholder for `NoResult`, formatted metrics otherwise
    pub fn from_outcome(outcome: &Outcome, unit: UnitSystem) -> Self {
        match outcome {
            Outcome::Metrics(metrics) => Self::from_metrics(metrics),
            Outcome::NoResult(_) => Self::placeholder(unit),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.bmi == PLACEHOLDER
    }
}

/// Healthy BMI band with the unit system's BMI label
pub fn healthy_bmi_range(unit: UnitSystem) -> String {
    format!(
        "{} - {} {}",
        HEALTHY_BMI_MIN,
        HEALTHY_BMI_MAX,
        unit.bmi_unit_label()
    )
}
