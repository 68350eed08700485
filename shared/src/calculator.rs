//! Health metrics calculator
//!
//! Combines the individual formulas into one snapshot calculation. The
//! calculator never fails outward: invalid measurements produce
//! `Outcome::NoResult`, and an invalid profile only drops the BMR-dependent
//! outputs.

use crate::advice::fitness_advice;
use crate::errors::MetricsError;
use crate::health_metrics::{
    bmi_prime, calculate_bmi, calculate_energy, classify_bmi, gauge_position,
    healthy_weight_range_kg, ponderal_index, ActivityLevel, BmiCategory, EnergyMetrics, Gender,
    PonderalIndex, Profile, WeightRange,
};
use crate::units::{Measurement, UnitSystem};
use serde::Serialize;
use tracing::debug;

/// Everything the calculator needs for one recalculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationRequest {
    pub measurement: Measurement,
    /// Age in whole years, if the field holds a number
    pub age_years: Option<i32>,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
}

impl CalculationRequest {
    /// The validated profile, or why calorie advice cannot be given
    pub fn profile(&self) -> Result<Profile, MetricsError> {
        let age = self
            .age_years
            .ok_or_else(|| MetricsError::InvalidProfile("Age is required".to_string()))?;
        Profile::new(age, self.gender, self.activity_level)
    }
}

/// Outputs that depend only on height and weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyMetrics {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bmi: f64,
    pub category: Option<BmiCategory>,
    pub healthy_weight_range_kg: WeightRange,
    pub bmi_prime: f64,
    pub ponderal_index: PonderalIndex,
    pub gauge_position: f64,
}

/// A full set of metrics for a valid measurement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthMetrics {
    /// Unit system the request was expressed in
    pub unit: UnitSystem,
    pub body: BodyMetrics,
    /// Absent when the profile is invalid
    pub energy: Option<EnergyMetrics>,
    pub fitness_advice: Option<String>,
}

impl HealthMetrics {
    /// Recompute only the BMR-dependent outputs for a changed profile
    pub fn with_profile(&self, request: &CalculationRequest) -> HealthMetrics {
        let (energy, fitness_advice) = profile_outputs(&self.body, request);
        HealthMetrics {
            unit: self.unit,
            body: self.body,
            energy,
            fitness_advice,
        }
    }
}

/// Tagged calculation result
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Metrics(HealthMetrics),
    /// The measurement was invalid; the caller shows a placeholder
    NoResult(MetricsError),
}

impl Outcome {
    pub fn metrics(&self) -> Option<&HealthMetrics> {
        match self {
            Outcome::Metrics(metrics) => Some(metrics),
            Outcome::NoResult(_) => None,
        }
    }

    pub fn is_no_result(&self) -> bool {
        matches!(self, Outcome::NoResult(_))
    }
}

/// Calculate the height/weight dependent metrics
pub fn calculate_body_metrics(measurement: &Measurement) -> Result<BodyMetrics, MetricsError> {
    measurement.validate()?;

    let height_cm = measurement.height_cm();
    let weight_kg = measurement.weight_kg();
    let bmi = calculate_bmi(weight_kg, height_cm)?;

    Ok(BodyMetrics {
        height_cm,
        weight_kg,
        bmi,
        category: classify_bmi(bmi),
        healthy_weight_range_kg: healthy_weight_range_kg(height_cm / 100.0),
        bmi_prime: bmi_prime(bmi),
        ponderal_index: ponderal_index(measurement),
        gauge_position: gauge_position(bmi),
    })
}

/// Calculate BMR-dependent outputs for already computed body metrics
pub fn calculate_energy_metrics(
    body: &BodyMetrics,
    request: &CalculationRequest,
) -> Result<EnergyMetrics, MetricsError> {
    let profile = request.profile()?;
    let category = body.category.ok_or_else(|| {
        MetricsError::InvalidMeasurement(format!("BMI {:.1} has no category", body.bmi))
    })?;
    Ok(calculate_energy(
        body.weight_kg,
        body.height_cm,
        &profile,
        category,
    ))
}

fn profile_outputs(
    body: &BodyMetrics,
    request: &CalculationRequest,
) -> (Option<EnergyMetrics>, Option<String>) {
    match calculate_energy_metrics(body, request) {
        Ok(energy) => {
            let advice = body
                .category
                .map(|category| fitness_advice(category, request.activity_level));
            (Some(energy), advice)
        }
        Err(err) => {
            debug!(error = %err, "Skipping calorie advice");
            (None, None)
        }
    }
}

/// Run the full calculation for one input snapshot
pub fn calculate(request: &CalculationRequest) -> Outcome {
    let body = match calculate_body_metrics(&request.measurement) {
        Ok(body) => body,
        Err(err) => {
            debug!(error = %err, "No result for measurement");
            return Outcome::NoResult(err);
        }
    };

    let (energy, fitness_advice) = profile_outputs(&body, request);

    debug!(
        bmi = body.bmi,
        category = ?body.category,
        has_energy = energy.is_some(),
        "Calculated health metrics"
    );

    Outcome::Metrics(HealthMetrics {
        unit: request.measurement.unit,
        body,
        energy,
        fitness_advice,
    })
}
