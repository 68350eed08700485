//! Fitness advice text
//!
//! Advice is picked by BMI band and followed by one sentence tailored to
//! the selected activity level.

use crate::health_metrics::{ActivityLevel, BmiCategory};
use serde::{Deserialize, Serialize};

/// Shown whenever there is no valid profile to advise on
pub const ADVICE_PLACEHOLDER: &str = "Enter your details to get personalized fitness advice.";

/// Coarse BMI band used for advice (all obese classes share one text)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceBand {
    Underweight,
    Healthy,
    Overweight,
    Obese,
}

impl From<BmiCategory> for AdviceBand {
    fn from(category: BmiCategory) -> Self {
        match category {
            BmiCategory::Underweight => AdviceBand::Underweight,
            BmiCategory::Normal => AdviceBand::Healthy,
            BmiCategory::Overweight => AdviceBand::Overweight,
            BmiCategory::Obese | BmiCategory::SeverelyObese | BmiCategory::MorbidlyObese => {
                AdviceBand::Obese
            }
        }
    }
}

impl AdviceBand {
    fn lines(&self) -> &'static [&'static str] {
        match self {
            AdviceBand::Underweight => &[
                "Your BMI suggests you are underweight.",
                "To gain weight healthily, increase your calorie intake with nutrient-rich foods like nuts and avocados.",
                "Incorporate strength training 2-3 times weekly to build muscle mass effectively.",
                "Ensure a balanced diet with adequate protein and healthy fats.",
                "Consult a nutritionist for a tailored plan, and track your progress weekly.",
            ],
            AdviceBand::Healthy => &[
                "You are in a healthy BMI range. Well done!",
                "Maintain this with a balanced diet of fruits, vegetables, and lean proteins.",
                "Engage in 150 minutes of moderate exercise weekly, mixing cardio and strength training.",
                "Monitor your weight monthly to ensure consistency.",
                "Stay hydrated and adjust activity if needed to maintain your current weight.",
            ],
            AdviceBand::Overweight => &[
                "Your BMI indicates you are overweight.",
                "Aim for a moderate calorie deficit with whole foods and smaller portions.",
                "Incorporate 150-300 minutes of cardio weekly, like brisk walking or cycling.",
                "Strength training can help preserve muscle during weight loss.",
                "Seek support from a dietitian for sustainable changes and track your progress.",
            ],
            AdviceBand::Obese => &[
                "Your BMI is in the obese range, suggesting a need for weight management.",
                "Start with a calorie deficit using low-glycemic foods and reduced sugars.",
                "Begin with low-impact exercises like walking or swimming for 150 minutes weekly.",
                "Consult a healthcare provider for a safe, personalized plan.",
                "Track health metrics and celebrate small milestones to stay motivated.",
            ],
        }
    }
}

/// One-sentence tip for the selected activity level
pub fn activity_advice(level: ActivityLevel) -> &'static str {
    match level {
        ActivityLevel::Sedentary => {
            "With a sedentary lifestyle, add 10-minute walks daily to boost activity."
        }
        ActivityLevel::LightlyActive => {
            "Enhance your light activity with one extra day of exercise weekly."
        }
        ActivityLevel::ModeratelyActive => {
            "Maintain your routine and vary exercises to avoid plateaus."
        }
        ActivityLevel::VeryActive => "Focus on recovery with rest days and proper nutrition.",
        ActivityLevel::ExtraActive => {
            "Prioritize stretching and balanced meals to prevent injury."
        }
    }
}

/// Full advice paragraph for a category and activity level
pub fn fitness_advice(category: BmiCategory, level: ActivityLevel) -> String {
    let mut lines: Vec<&str> = AdviceBand::from(category).lines().to_vec();
    lines.push(activity_advice(level));
    lines.join("\n")
}
