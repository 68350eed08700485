//! Input validation and form field parsing
//!
//! Form fields arrive as raw text. Parsing is lenient the way browsers parse
//! number inputs: the leading numeric prefix is used and anything else is
//! treated as an empty field.

use crate::errors::MetricsError;
use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Youngest age accepted for calorie advice
pub const MIN_AGE_YEARS: i32 = 1;

/// Oldest age accepted for calorie advice
pub const MAX_AGE_YEARS: i32 = 120;

static DECIMAL_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("decimal prefix pattern is valid")
});

static INTEGER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("integer prefix pattern is valid"));

/// Parse a decimal form field, using its leading numeric prefix
///
/// Returns `None` for empty or non-numeric text.
pub fn parse_decimal_field(raw: &str) -> Option<f64> {
    let caps = DECIMAL_PREFIX.captures(raw)?;
    caps.get(1)?.as_str().parse::<f64>().ok()
}

/// Parse an integer form field, truncating any fractional part
pub fn parse_integer_field(raw: &str) -> Option<i32> {
    let caps = INTEGER_PREFIX.captures(raw)?;
    caps.get(1)?.as_str().parse::<i32>().ok()
}

/// Validate that a measurement value is finite and strictly positive
pub fn validate_positive_finite(field: &str, value: f64) -> Result<(), MetricsError> {
    if !value.is_finite() {
        return Err(MetricsError::InvalidMeasurement(format!(
            "{} must be a valid number",
            field
        )));
    }
    if value <= 0.0 {
        return Err(MetricsError::InvalidMeasurement(format!(
            "{} must be greater than zero",
            field
        )));
    }
    Ok(())
}

/// Validate age for BMR calculation
pub fn validate_age(age_years: i32) -> Result<(), MetricsError> {
    if !(MIN_AGE_YEARS..=MAX_AGE_YEARS).contains(&age_years) {
        return Err(MetricsError::InvalidProfile(format!(
            "Age must be between {} and {} years",
            MIN_AGE_YEARS, MAX_AGE_YEARS
        )));
    }
    Ok(())
}

/// Valid activity levels
pub const VALID_ACTIVITY_LEVELS: &[&str] = &[
    "sedentary",
    "lightly-active",
    "moderately-active",
    "very-active",
    "extra-active",
];

/// Normalize an activity level wire name (snake_case is accepted too)
pub fn normalize_activity_level(level: &str) -> String {
    level.trim().to_lowercase().replace('_', "-")
}

/// Check whether an activity level is recognized
pub fn is_known_activity_level(level: &str) -> bool {
    VALID_ACTIVITY_LEVELS.contains(&normalize_activity_level(level).as_str())
}

/// Valid gender values
pub const VALID_GENDERS: &[&str] = &["male", "female"];

/// Check whether a gender value is recognized
pub fn is_known_gender(gender: &str) -> bool {
    VALID_GENDERS.contains(&gender.trim().to_lowercase().as_str())
}
