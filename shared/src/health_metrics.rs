//! Health metrics calculations module
//!
//! Provides calculations for BMI, BMI classification, healthy weight ranges,
//! BMR/TDEE and the derived ratios shown by the widget.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Metric Inside**: Every formula takes cm and kg; conversion happens in `units`
//! 3. **Explicit Invalidity**: Bad input yields `MetricsError`, never NaN or a panic

use crate::errors::{MetricsError, ParseEnumError};
use crate::units::{Measurement, UnitSystem, WeightUnit};
use crate::validation::{is_known_activity_level, is_known_gender, normalize_activity_level};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;
use validator::Validate;

// ============================================================================
// Profile Types
// ============================================================================

/// Gender selected in the widget, used only for the BMR formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Parse a gender selection, falling back to the default when unknown
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_else(|err: ParseEnumError| {
            warn!(error = %err, "Unrecognized gender, using default");
            Gender::default()
        })
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_known_gender(s) {
            return Err(ParseEnumError::new("gender", s));
        }
        match s.trim().to_lowercase().as_str() {
            "female" => Ok(Gender::Female),
            _ => Ok(Gender::Male),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    /// Little or no exercise
    #[default]
    Sedentary,
    /// Light exercise 1-3 days/week
    #[serde(alias = "lightly_active")]
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    #[serde(alias = "moderately_active")]
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    #[serde(alias = "very_active")]
    VeryActive,
    /// Very hard exercise, physical job
    #[serde(alias = "extra_active")]
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::LightlyActive => "Light exercise 1-3 days/week",
            ActivityLevel::ModeratelyActive => "Moderate exercise 3-5 days/week",
            ActivityLevel::VeryActive => "Hard exercise 6-7 days/week",
            ActivityLevel::ExtraActive => "Very hard exercise or physical job",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly-active",
            ActivityLevel::ModeratelyActive => "moderately-active",
            ActivityLevel::VeryActive => "very-active",
            ActivityLevel::ExtraActive => "extra-active",
        }
    }

    /// Parse a selector value; unknown levels fall back to sedentary (1.2)
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_else(|err: ParseEnumError| {
            warn!(error = %err, "Unrecognized activity level, using sedentary");
            ActivityLevel::default()
        })
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_known_activity_level(s) {
            return Err(ParseEnumError::new("activity level", s));
        }
        let normalized = normalize_activity_level(s);
        ActivityLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| ParseEnumError::new("activity level", s))
    }
}

/// Profile data needed for calorie advice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Profile {
    /// Age in whole years
    #[validate(range(min = 1, max = 120))]
    pub age_years: i32,
    pub gender: Gender,
    #[serde(default)]
    pub activity_level: ActivityLevel,
}

impl Profile {
    /// Build a validated profile
    pub fn new(
        age_years: i32,
        gender: Gender,
        activity_level: ActivityLevel,
    ) -> Result<Self, MetricsError> {
        let profile = Self {
            age_years,
            gender,
            activity_level,
        };
        profile
            .validate()
            .map_err(|e| MetricsError::InvalidProfile(format!("Age must be between 1 and 120 years ({})", e)))?;
        Ok(profile)
    }
}

// ============================================================================
// BMI Calculations
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
    SeverelyObese,
    MorbidlyObese,
}

/// Label and color the presentation layer shows for a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStyle {
    pub label: &'static str,
    pub color: &'static str,
}

/// Neutral style used when no category matches
pub const NOT_APPLICABLE: CategoryStyle = CategoryStyle {
    label: "N/A",
    color: "#333",
};

impl BmiCategory {
    /// Categories in classification order
    pub const ALL: [BmiCategory; 6] = [
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::Obese,
        BmiCategory::SeverelyObese,
        BmiCategory::MorbidlyObese,
    ];

    /// Half-open BMI range `[low, high)` for this category
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiCategory::Underweight => (0.0, 18.5),
            BmiCategory::Normal => (18.5, 25.0),
            BmiCategory::Overweight => (25.0, 30.0),
            BmiCategory::Obese => (30.0, 35.0),
            BmiCategory::SeverelyObese => (35.0, 40.0),
            BmiCategory::MorbidlyObese => (40.0, f64::INFINITY),
        }
    }

    pub fn contains(&self, bmi: f64) -> bool {
        let (low, high) = self.range();
        bmi >= low && bmi < high
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
            BmiCategory::SeverelyObese => "Severely Obese",
            BmiCategory::MorbidlyObese => "Morbidly Obese",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "#4198ff",
            BmiCategory::Normal => "#42d7a0",
            BmiCategory::Overweight => "#ffeb3b",
            BmiCategory::Obese => "#ffa726",
            BmiCategory::SeverelyObese => "#ff7043",
            BmiCategory::MorbidlyObese => "#ff5252",
        }
    }

    pub fn style(&self) -> CategoryStyle {
        CategoryStyle {
            label: self.label(),
            color: self.color(),
        }
    }
}

/// Style for an optional classification, `N/A` when absent
pub fn category_style(category: Option<BmiCategory>) -> CategoryStyle {
    category.map(|c| c.style()).unwrap_or(NOT_APPLICABLE)
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Result<f64, MetricsError> {
    Measurement::new(height_cm, weight_kg, UnitSystem::Metric).validate()?;
    let height_m = height_cm / 100.0;
    Ok(weight_kg / (height_m * height_m))
}

/// Classify BMI into category
///
/// Returns `None` for values outside every range (negative or NaN).
pub fn classify_bmi(bmi: f64) -> Option<BmiCategory> {
    BmiCategory::ALL.into_iter().find(|c| c.contains(bmi))
}

// ============================================================================
// Healthy Weight Range
// ============================================================================

/// Lowest BMI in the healthy band
pub const HEALTHY_BMI_MIN: f64 = 18.5;

/// Highest BMI shown for the healthy band (one step below Overweight)
pub const HEALTHY_BMI_MAX: f64 = 24.9;

/// Inclusive weight interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: f64,
    pub max: f64,
}

impl WeightRange {
    /// Re-express a kilogram range in another weight unit
    pub fn to_unit(&self, unit: WeightUnit) -> WeightRange {
        WeightRange {
            min: unit.from_kg(self.min),
            max: unit.from_kg(self.max),
        }
    }
}

/// Calculate healthy weight range in kg for a height in meters
///
/// Based on BMI 18.5-24.9 (normal range)
pub fn healthy_weight_range_kg(height_m: f64) -> WeightRange {
    let height_m_sq = height_m * height_m;
    WeightRange {
        min: HEALTHY_BMI_MIN * height_m_sq,
        max: HEALTHY_BMI_MAX * height_m_sq,
    }
}

// ============================================================================
// Derived Ratios
// ============================================================================

/// Upper bound of the normal BMI range, the BMI Prime denominator
pub const BMI_PRIME_REFERENCE: f64 = 25.0;

/// BMI Prime: ratio of BMI to the upper limit of normal
pub fn bmi_prime(bmi: f64) -> f64 {
    bmi / BMI_PRIME_REFERENCE
}

/// Ponderal index value with its unit suffix
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PonderalIndex {
    pub value: f64,
    pub suffix: &'static str,
}

/// Calculate the ponderal index in the measurement's unit system
///
/// Metric: weight(kg) / height(m)³.
/// Imperial: height(in) / ∛weight(lb).
pub fn ponderal_index(measurement: &Measurement) -> PonderalIndex {
    match measurement.unit {
        UnitSystem::Metric => {
            let height_m = measurement.height_cm() / 100.0;
            PonderalIndex {
                value: measurement.weight_kg() / (height_m * height_m * height_m),
                suffix: "kg/m³",
            }
        }
        UnitSystem::Imperial => PonderalIndex {
            value: measurement.height / measurement.weight.cbrt(),
            suffix: "in/∛lb",
        },
    }
}

// ============================================================================
// BMR and TDEE Calculations
// ============================================================================

/// Calorie offset applied for weight loss and gain targets
pub const CALORIE_ADJUSTMENT_KCAL: i64 = 500;

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr_mifflin(weight_kg: f64, height_cm: f64, age_years: i32, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = round(BMR × Activity Multiplier)
pub fn calculate_tdee(bmr: f64, activity_level: ActivityLevel) -> i64 {
    (bmr * activity_level.multiplier()).round() as i64
}

/// Which calorie target the widget surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalorieGoal {
    Gain,
    Maintain,
    Lose,
}

impl CalorieGoal {
    /// Underweight gains, Normal maintains, everything heavier loses
    pub fn for_category(category: BmiCategory) -> Self {
        match category {
            BmiCategory::Underweight => CalorieGoal::Gain,
            BmiCategory::Normal => CalorieGoal::Maintain,
            BmiCategory::Overweight
            | BmiCategory::Obese
            | BmiCategory::SeverelyObese
            | BmiCategory::MorbidlyObese => CalorieGoal::Lose,
        }
    }
}

/// Daily calorie targets derived from TDEE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalorieTargets {
    pub maintenance: i64,
    pub loss: i64,
    pub gain: i64,
}

impl CalorieTargets {
    pub fn from_tdee(tdee: i64) -> Self {
        Self {
            maintenance: tdee,
            loss: tdee - CALORIE_ADJUSTMENT_KCAL,
            gain: tdee + CALORIE_ADJUSTMENT_KCAL,
        }
    }

    pub fn for_goal(&self, goal: CalorieGoal) -> i64 {
        match goal {
            CalorieGoal::Gain => self.gain,
            CalorieGoal::Maintain => self.maintenance,
            CalorieGoal::Lose => self.loss,
        }
    }
}

/// BMR-dependent outputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyMetrics {
    pub bmr: f64,
    pub tdee: i64,
    pub activity_multiplier: f64,
    pub targets: CalorieTargets,
    /// The single target to surface
    pub goal: CalorieGoal,
}

/// Calculate BMR, TDEE and the surfaced calorie target
pub fn calculate_energy(
    weight_kg: f64,
    height_cm: f64,
    profile: &Profile,
    category: BmiCategory,
) -> EnergyMetrics {
    let bmr = calculate_bmr_mifflin(weight_kg, height_cm, profile.age_years, profile.gender);
    let tdee = calculate_tdee(bmr, profile.activity_level);
    EnergyMetrics {
        bmr,
        tdee,
        activity_multiplier: profile.activity_level.multiplier(),
        targets: CalorieTargets::from_tdee(tdee),
        goal: CalorieGoal::for_category(category),
    }
}

// ============================================================================
// Gauge
// ============================================================================

/// BMI at the left edge of the gauge (start of Normal)
pub const GAUGE_MIN_BMI: f64 = 18.5;

/// BMI at the right edge of the gauge (start of Morbidly Obese)
pub const GAUGE_MAX_BMI: f64 = 40.0;

/// Pointer position on the gauge as a percentage in [0, 100]
pub fn gauge_position(bmi: f64) -> f64 {
    let position = (bmi - GAUGE_MIN_BMI) / (GAUGE_MAX_BMI - GAUGE_MIN_BMI) * 100.0;
    if position.is_nan() {
        return 0.0;
    }
    position.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    // =========================================================================
    // BMI Tests
    // =========================================================================

    #[test]
    fn test_bmi_calculation() {
        // 75kg, 180cm -> BMI ~23.15
        let bmi = calculate_bmi(75.0, 180.0).unwrap();
        assert!((bmi - 23.148).abs() < 0.01);
        assert_eq!(classify_bmi(bmi), Some(BmiCategory::Normal));
    }

    #[test]
    fn test_bmi_imperial_example() {
        let m = Measurement::new(70.0, 200.0, UnitSystem::Imperial);
        let bmi = calculate_bmi(m.weight_kg(), m.height_cm()).unwrap();
        assert!((bmi - 28.7).abs() < 0.05);
        assert_eq!(classify_bmi(bmi), Some(BmiCategory::Overweight));
    }

    #[rstest]
    #[case(0.0, 75.0)]
    #[case(180.0, 0.0)]
    #[case(180.0, -5.0)]
    #[case(-180.0, 75.0)]
    #[case(f64::NAN, 75.0)]
    #[case(180.0, f64::INFINITY)]
    fn test_bmi_rejects_invalid_input(#[case] height_cm: f64, #[case] weight_kg: f64) {
        let err = calculate_bmi(weight_kg, height_cm).unwrap_err();
        assert!(matches!(err, MetricsError::InvalidMeasurement(_)));
    }

    #[rstest]
    #[case(0.0, BmiCategory::Underweight)]
    #[case(18.499, BmiCategory::Underweight)]
    #[case(18.5, BmiCategory::Normal)]
    #[case(24.999, BmiCategory::Normal)]
    #[case(25.0, BmiCategory::Overweight)]
    #[case(29.99, BmiCategory::Overweight)]
    #[case(30.0, BmiCategory::Obese)]
    #[case(35.0, BmiCategory::SeverelyObese)]
    #[case(40.0, BmiCategory::MorbidlyObese)]
    #[case(95.0, BmiCategory::MorbidlyObese)]
    fn test_bmi_category_boundaries(#[case] bmi: f64, #[case] expected: BmiCategory) {
        assert_eq!(classify_bmi(bmi), Some(expected));
    }

    #[test]
    fn test_unclassifiable_bmi_is_not_applicable() {
        assert_eq!(classify_bmi(-1.0), None);
        assert_eq!(classify_bmi(f64::NAN), None);
        assert_eq!(category_style(None), NOT_APPLICABLE);
        assert_eq!(category_style(None).label, "N/A");
    }

    #[test]
    fn test_category_ranges_partition() {
        // Each range starts where the previous one ended
        let mut expected_low = 0.0;
        for category in BmiCategory::ALL {
            let (low, high) = category.range();
            assert_eq!(low, expected_low, "{:?} leaves a gap", category);
            assert!(high > low);
            expected_low = high;
        }
        assert_eq!(expected_low, f64::INFINITY);
    }

    #[test]
    fn test_category_styles() {
        assert_eq!(BmiCategory::Normal.style().label, "Normal");
        assert_eq!(BmiCategory::Normal.style().color, "#42d7a0");
        assert_eq!(BmiCategory::SeverelyObese.label(), "Severely Obese");
    }

    #[test]
    fn test_healthy_weight_range() {
        // For 1.80m, healthy range should be ~59.9-80.7 kg
        let range = healthy_weight_range_kg(1.8);
        assert!((range.min - 59.94).abs() < 0.01);
        assert!((range.max - 80.676).abs() < 0.01);

        let lbs = range.to_unit(WeightUnit::Lbs);
        assert!((lbs.min - 132.14).abs() < 0.05);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: BMI matches the defining formula
        #[test]
        fn prop_bmi_formula(weight in 1.0f64..500.0, height in 50.0f64..250.0) {
            let bmi = calculate_bmi(weight, height).unwrap();
            let height_m = height / 100.0;
            prop_assert!((bmi - weight / (height_m * height_m)).abs() < 1e-9);
        }

        /// Property: BMI is the same whichever unit system the input uses
        #[test]
        fn prop_bmi_unit_invariant(weight in 2.0f64..300.0, height in 80.0f64..230.0) {
            let metric = Measurement::new(height, weight, UnitSystem::Metric);
            let imperial = metric.converted_to(UnitSystem::Imperial);
            let bmi_metric = calculate_bmi(metric.weight_kg(), metric.height_cm()).unwrap();
            let bmi_imperial = calculate_bmi(imperial.weight_kg(), imperial.height_cm()).unwrap();
            prop_assert!((bmi_metric - bmi_imperial).abs() < 0.1);
        }

        /// Property: Doubling height quadruples both bounds
        #[test]
        fn prop_healthy_range_scales_with_height_squared(height in 0.5f64..2.5) {
            let single = healthy_weight_range_kg(height);
            let double = healthy_weight_range_kg(height * 2.0);
            prop_assert!((double.min - 4.0 * single.min).abs() < 1e-9);
            prop_assert!((double.max - 4.0 * single.max).abs() < 1e-9);
        }

        /// Property: Healthy weight range maps back to the Normal category
        #[test]
        fn prop_healthy_range_produces_normal_bmi(height_cm in 120.0f64..220.0) {
            let range = healthy_weight_range_kg(height_cm / 100.0);
            for weight in [range.min, (range.min + range.max) / 2.0, range.max] {
                let bmi = calculate_bmi(weight, height_cm).unwrap();
                prop_assert_eq!(classify_bmi(bmi + 1e-9), Some(BmiCategory::Normal));
            }
        }

        /// Property: Gauge position never leaves [0, 100]
        #[test]
        fn prop_gauge_clamped(bmi in -50.0f64..150.0) {
            let position = gauge_position(bmi);
            prop_assert!((0.0..=100.0).contains(&position));
        }
    }

    // =========================================================================
    // Derived Ratio Tests
    // =========================================================================

    #[test]
    fn test_bmi_prime() {
        assert!((bmi_prime(25.0) - 1.0).abs() < 1e-12);
        assert!((bmi_prime(23.148) - 0.926).abs() < 0.001);
    }

    #[test]
    fn test_ponderal_index_metric() {
        let pi = ponderal_index(&Measurement::new(180.0, 75.0, UnitSystem::Metric));
        // 75 / 1.8³ = 12.86
        assert!((pi.value - 12.86).abs() < 0.01);
        assert_eq!(pi.suffix, "kg/m³");
    }

    #[test]
    fn test_ponderal_index_imperial() {
        let pi = ponderal_index(&Measurement::new(70.0, 200.0, UnitSystem::Imperial));
        // 70 / ∛200 = 11.97
        assert!((pi.value - 11.97).abs() < 0.01);
        assert_eq!(pi.suffix, "in/∛lb");
    }

    #[test]
    fn test_gauge_position() {
        assert_eq!(gauge_position(18.5), 0.0);
        assert_eq!(gauge_position(40.0), 100.0);
        assert_eq!(gauge_position(10.0), 0.0);
        assert_eq!(gauge_position(55.0), 100.0);
        assert!((gauge_position(29.25) - 50.0).abs() < 1e-9);
        assert_eq!(gauge_position(f64::NAN), 0.0);
    }

    #[test]
    fn test_gauge_bounds_match_category_table() {
        assert_eq!(GAUGE_MIN_BMI, BmiCategory::Normal.range().0);
        assert_eq!(GAUGE_MAX_BMI, BmiCategory::MorbidlyObese.range().0);
    }

    // =========================================================================
    // BMR/TDEE Tests
    // =========================================================================

    #[test]
    fn test_bmr_mifflin() {
        // 30yo male, 80kg, 180cm -> 800 + 1125 - 150 + 5 = 1780
        let bmr = calculate_bmr_mifflin(80.0, 180.0, 30, Gender::Male);
        assert!((bmr - 1780.0).abs() < 1e-9);

        // 30yo female, 60kg, 165cm -> 600 + 1031.25 - 150 - 161 = 1320.25
        let bmr = calculate_bmr_mifflin(60.0, 165.0, 30, Gender::Female);
        assert!((bmr - 1320.25).abs() < 1e-9);
    }

    #[test]
    fn test_tdee_rounds() {
        assert_eq!(calculate_tdee(1780.0, ActivityLevel::ModeratelyActive), 2759);
        assert_eq!(calculate_tdee(1780.0, ActivityLevel::Sedentary), 2136);
    }

    #[test]
    fn test_unknown_activity_falls_back_to_sedentary() {
        let level = ActivityLevel::parse_or_default("marathon-every-day");
        assert_eq!(level, ActivityLevel::Sedentary);
        assert_eq!(level.multiplier(), 1.2);
        assert_eq!(calculate_tdee(1500.0, level), 1800);
    }

    #[rstest]
    #[case("sedentary", ActivityLevel::Sedentary, 1.2)]
    #[case("lightly-active", ActivityLevel::LightlyActive, 1.375)]
    #[case("moderately_active", ActivityLevel::ModeratelyActive, 1.55)]
    #[case("very-active", ActivityLevel::VeryActive, 1.725)]
    #[case("Extra-Active", ActivityLevel::ExtraActive, 1.9)]
    fn test_activity_level_parsing(
        #[case] raw: &str,
        #[case] expected: ActivityLevel,
        #[case] multiplier: f64,
    ) {
        let level: ActivityLevel = raw.parse().unwrap();
        assert_eq!(level, expected);
        assert_eq!(level.multiplier(), multiplier);
    }

    #[test]
    fn test_activity_level_serde_names() {
        let level: ActivityLevel = serde_json::from_str("\"very_active\"").unwrap();
        assert_eq!(level, ActivityLevel::VeryActive);
        assert_eq!(
            serde_json::to_string(&ActivityLevel::LightlyActive).unwrap(),
            "\"lightly-active\""
        );
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("MALE".parse::<Gender>().unwrap(), Gender::Male);
        assert!("unknown".parse::<Gender>().is_err());
        assert_eq!(Gender::parse_or_default("unknown"), Gender::Male);
    }

    #[test]
    fn test_profile_validation() {
        assert!(Profile::new(30, Gender::Male, ActivityLevel::Sedentary).is_ok());
        assert!(Profile::new(1, Gender::Female, ActivityLevel::Sedentary).is_ok());
        assert!(Profile::new(120, Gender::Female, ActivityLevel::Sedentary).is_ok());

        for age in [0, 121, 200, -1] {
            let err = Profile::new(age, Gender::Male, ActivityLevel::Sedentary).unwrap_err();
            assert!(matches!(err, MetricsError::InvalidProfile(_)), "age {}", age);
        }
    }

    #[rstest]
    #[case(BmiCategory::Underweight, CalorieGoal::Gain)]
    #[case(BmiCategory::Normal, CalorieGoal::Maintain)]
    #[case(BmiCategory::Overweight, CalorieGoal::Lose)]
    #[case(BmiCategory::Obese, CalorieGoal::Lose)]
    #[case(BmiCategory::SeverelyObese, CalorieGoal::Lose)]
    #[case(BmiCategory::MorbidlyObese, CalorieGoal::Lose)]
    fn test_calorie_goal_selection(#[case] category: BmiCategory, #[case] goal: CalorieGoal) {
        assert_eq!(CalorieGoal::for_category(category), goal);
    }

    #[test]
    fn test_energy_metrics() {
        let profile = Profile::new(30, Gender::Male, ActivityLevel::ModeratelyActive).unwrap();
        let energy = calculate_energy(80.0, 180.0, &profile, BmiCategory::Normal);

        assert!((energy.bmr - 1780.0).abs() < 1e-9);
        assert_eq!(energy.tdee, 2759);
        assert_eq!(energy.targets.maintenance, 2759);
        assert_eq!(energy.targets.loss, 2259);
        assert_eq!(energy.targets.gain, 3259);
        assert_eq!(energy.goal, CalorieGoal::Maintain);
        assert_eq!(energy.targets.for_goal(energy.goal), 2759);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: Male BMR exceeds female BMR by exactly 166
        #[test]
        fn prop_gender_offset(
            weight in 20.0f64..200.0,
            height in 100.0f64..220.0,
            age in 1i32..=120
        ) {
            let male = calculate_bmr_mifflin(weight, height, age, Gender::Male);
            let female = calculate_bmr_mifflin(weight, height, age, Gender::Female);
            prop_assert!((male - female - 166.0).abs() < 1e-9);
        }

        /// Property: BMR rises with weight and height, falls with age
        #[test]
        fn prop_bmr_monotonic(
            weight in 20.0f64..200.0,
            height in 100.0f64..220.0,
            age in 1i32..120,
            female in any::<bool>()
        ) {
            let gender = if female { Gender::Female } else { Gender::Male };
            let base = calculate_bmr_mifflin(weight, height, age, gender);
            prop_assert!(calculate_bmr_mifflin(weight + 1.0, height, age, gender) > base);
            prop_assert!(calculate_bmr_mifflin(weight, height + 1.0, age, gender) > base);
            prop_assert!(calculate_bmr_mifflin(weight, height, age + 1, gender) < base);
        }

        /// Property: TDEE is the rounded product of BMR and multiplier
        #[test]
        fn prop_tdee_rounding(bmr in 500.0f64..4000.0, index in 0usize..5) {
            let level = ActivityLevel::ALL[index];
            let tdee = calculate_tdee(bmr, level);
            prop_assert!(((tdee as f64) - bmr * level.multiplier()).abs() <= 0.5);
        }
    }
}
