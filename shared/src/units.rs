//! Unit conversion and normalization module
//!
//! All calculations run on metric values (cm, kg). Imperial input is
//! normalized on the way in and converted back only for display.
//!
//! Rounding is never applied here; the display layer rounds to one decimal
//! so repeated unit switches do not compound error.

use crate::errors::{MetricsError, ParseEnumError};
use crate::validation::validate_positive_finite;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Pounds per kilogram
pub const LBS_PER_KG: f64 = 2.20462;

/// Convert centimeters to inches
pub fn cm_to_inches(cm: f64) -> f64 {
    cm / CM_PER_INCH
}

/// Convert inches to centimeters
pub fn inches_to_cm(inches: f64) -> f64 {
    inches * CM_PER_INCH
}

/// Convert kilograms to pounds
pub fn kg_to_lbs(kg: f64) -> f64 {
    kg * LBS_PER_KG
}

/// Convert pounds to kilograms
pub fn lbs_to_kg(lbs: f64) -> f64 {
    lbs / LBS_PER_KG
}

// ============================================================================
// Weight Units
// ============================================================================

/// Weight unit used for input and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    /// Convert from this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => lbs_to_kg(value),
        }
    }

    /// Convert from kilograms to this unit
    pub fn from_kg(&self, kg: f64) -> f64 {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lbs => kg_to_lbs(kg),
        }
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

// ============================================================================
// Height Units
// ============================================================================

/// Height unit used for input and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    #[default]
    Cm,
    Inches,
}

impl HeightUnit {
    /// Convert from this unit to centimeters
    pub fn to_cm(&self, value: f64) -> f64 {
        match self {
            HeightUnit::Cm => value,
            HeightUnit::Inches => inches_to_cm(value),
        }
    }

    /// Convert from centimeters to this unit
    pub fn from_cm(&self, cm: f64) -> f64 {
        match self {
            HeightUnit::Cm => cm,
            HeightUnit::Inches => cm_to_inches(cm),
        }
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            HeightUnit::Cm => "cm",
            HeightUnit::Inches => "in",
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

// ============================================================================
// Unit System
// ============================================================================

/// The unit system selected in the widget's unit switcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    #[serde(alias = "us")]
    Imperial,
}

impl UnitSystem {
    pub fn height_unit(&self) -> HeightUnit {
        match self {
            UnitSystem::Metric => HeightUnit::Cm,
            UnitSystem::Imperial => HeightUnit::Inches,
        }
    }

    pub fn weight_unit(&self) -> WeightUnit {
        match self {
            UnitSystem::Metric => WeightUnit::Kg,
            UnitSystem::Imperial => WeightUnit::Lbs,
        }
    }

    /// Unit label shown next to BMI values
    pub fn bmi_unit_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg/m²",
            UnitSystem::Imperial => "lb/in²",
        }
    }

    /// Wire name used by the presentation layer
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "si" => Ok(UnitSystem::Metric),
            "imperial" | "us" => Ok(UnitSystem::Imperial),
            _ => Err(ParseEnumError::new("unit system", s)),
        }
    }
}

// ============================================================================
// Measurement
// ============================================================================

/// Height and weight expressed in a single unit system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Height in cm (metric) or inches (imperial)
    pub height: f64,
    /// Weight in kg (metric) or lbs (imperial)
    pub weight: f64,
    pub unit: UnitSystem,
}

impl Measurement {
    pub fn new(height: f64, weight: f64, unit: UnitSystem) -> Self {
        Self {
            height,
            weight,
            unit,
        }
    }

    /// Check that both values are finite and positive
    pub fn validate(&self) -> Result<(), MetricsError> {
        validate_positive_finite("Height", self.height)?;
        validate_positive_finite("Weight", self.weight)?;
        Ok(())
    }

    pub fn height_cm(&self) -> f64 {
        self.unit.height_unit().to_cm(self.height)
    }

    pub fn weight_kg(&self) -> f64 {
        self.unit.weight_unit().to_kg(self.weight)
    }

    /// Normalize to metric
    pub fn to_metric(&self) -> Measurement {
        self.converted_to(UnitSystem::Metric)
    }

    /// Translate the values into another unit system without rounding
    pub fn converted_to(&self, unit: UnitSystem) -> Measurement {
        if unit == self.unit {
            return *self;
        }
        Measurement {
            height: unit.height_unit().from_cm(self.height_cm()),
            weight: unit.weight_unit().from_kg(self.weight_kg()),
            unit,
        }
    }
}
