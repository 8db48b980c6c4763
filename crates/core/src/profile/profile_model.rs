//! User profile value objects consumed by the risk models.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ValidationError;

// =============================================================================
// Sex
// =============================================================================

/// Biological sex, which selects sex-specific coefficients and thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ValidationError;

    /// Accepts "male"/"m" and "female"/"f" in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            _ => Err(ValidationError::unknown_value("sex", s)),
        }
    }
}

// =============================================================================
// Exercise Frequency
// =============================================================================

/// Self-reported exercise frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseFrequency {
    #[serde(rename = "never")]
    Never,
    #[serde(rename = "1-2/week")]
    OnceOrTwiceWeekly,
    #[serde(rename = "3-4/week")]
    SeveralTimesWeekly,
    #[serde(rename = "daily")]
    Daily,
}

impl ExerciseFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseFrequency::Never => "never",
            ExerciseFrequency::OnceOrTwiceWeekly => "1-2/week",
            ExerciseFrequency::SeveralTimesWeekly => "3-4/week",
            ExerciseFrequency::Daily => "daily",
        }
    }

    /// Three or more sessions a week counts as a regular exercise habit.
    pub fn is_regular(&self) -> bool {
        matches!(
            self,
            ExerciseFrequency::SeveralTimesWeekly | ExerciseFrequency::Daily
        )
    }
}

impl FromStr for ExerciseFrequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "never" => Ok(ExerciseFrequency::Never),
            "1-2/week" => Ok(ExerciseFrequency::OnceOrTwiceWeekly),
            "3-4/week" => Ok(ExerciseFrequency::SeveralTimesWeekly),
            "daily" => Ok(ExerciseFrequency::Daily),
            _ => Err(ValidationError::unknown_value("exercise_frequency", s)),
        }
    }
}

// =============================================================================
// User Demographics
// =============================================================================

/// Account-level demographic data for a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDemographics {
    pub user_id: String,
    pub age: Option<u32>,
    pub sex: Option<Sex>,
}

// =============================================================================
// Health Profile
// =============================================================================

/// Physiological and lifestyle fields recorded for a user.
///
/// Every measurement is optional: the profile is filled in over time. Callers
/// default missing fields before handing them to a risk model.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserHealthProfile {
    pub user_id: String,

    // Anthropometrics
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub bmi: Option<f64>,
    pub waist_cm: Option<f64>,

    // Blood pressure
    pub systolic_bp: Option<f64>,
    pub diastolic_bp: Option<f64>,
    pub on_bp_medication: bool,

    // Lipid panel (mg/dL)
    pub total_cholesterol: Option<f64>,
    pub hdl_cholesterol: Option<f64>,
    pub ldl_cholesterol: Option<f64>,
    pub triglycerides: Option<f64>,

    // Glucose
    /// Fasting plasma glucose (mmol/L)
    pub fasting_glucose: Option<f64>,
    pub hba1c: Option<f64>,

    // Lifestyle
    pub is_smoker: bool,
    pub smoking_years: Option<u32>,
    pub exercise_frequency: Option<ExerciseFrequency>,
    pub exercise_minutes_per_week: Option<u32>,
    pub daily_fruit_vegetable: Option<bool>,
    pub high_salt_diet: bool,

    // Conditions
    pub has_diabetes: bool,
    pub has_hypertension: bool,
    pub has_heart_disease: bool,

    // Family history
    pub family_diabetes: bool,
    pub family_heart_disease: bool,
    pub family_hypertension: bool,
}

impl UserHealthProfile {
    /// Returns the recorded BMI, or derives it from height and weight.
    pub fn effective_bmi(&self) -> Option<f64> {
        if let Some(bmi) = self.bmi.filter(|b| *b > 0.0) {
            return Some(bmi);
        }
        match (self.height_cm, self.weight_kg) {
            (Some(height), Some(weight)) if height > 0.0 && weight > 0.0 => {
                let meters = height / 100.0;
                Some(weight / (meters * meters))
            }
            _ => None,
        }
    }

    /// Whether the user exercises three or more times a week.
    pub fn exercises_regularly(&self) -> bool {
        self.exercise_frequency
            .map(|f| f.is_regular())
            .unwrap_or(false)
    }
}
