//! Input value objects for the risk models.
//!
//! Each input is created fresh for one assessment and validated against the
//! model's documented domain before scoring.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ValidationError;
use crate::profile::Sex;

/// Youngest age covered by the Framingham equations.
pub const FRAMINGHAM_MIN_AGE: u32 = 30;
/// Oldest age covered by the Framingham equations.
pub const FRAMINGHAM_MAX_AGE: u32 = 79;

fn require_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::not_positive(field, value))
    }
}

// =============================================================================
// Family History
// =============================================================================

/// Closest relatives diagnosed with diabetes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyHistory {
    #[default]
    None,
    /// Grandparent, aunt, uncle or first cousin
    SecondDegree,
    /// Parent, sibling or child
    FirstDegree,
}

impl FamilyHistory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FamilyHistory::None => "none",
            FamilyHistory::SecondDegree => "second_degree",
            FamilyHistory::FirstDegree => "first_degree",
        }
    }
}

impl FromStr for FamilyHistory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(FamilyHistory::None),
            "second_degree" => Ok(FamilyHistory::SecondDegree),
            "first_degree" => Ok(FamilyHistory::FirstDegree),
            _ => Err(ValidationError::unknown_value("family_diabetes", s)),
        }
    }
}

// =============================================================================
// Cardiovascular
// =============================================================================

/// Inputs of the Framingham 10-year cardiovascular risk equation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardiovascularRiskInput {
    /// Years, 30 to 79
    pub age: u32,
    pub sex: Sex,
    /// mg/dL
    pub total_cholesterol: f64,
    /// mg/dL
    pub hdl_cholesterol: f64,
    /// mmHg
    pub systolic_bp: f64,
    pub on_bp_medication: bool,
    pub is_smoker: bool,
    pub has_diabetes: bool,
}

impl CardiovascularRiskInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(FRAMINGHAM_MIN_AGE..=FRAMINGHAM_MAX_AGE).contains(&self.age) {
            return Err(ValidationError::out_of_range(
                "age",
                f64::from(self.age),
                f64::from(FRAMINGHAM_MIN_AGE),
                f64::from(FRAMINGHAM_MAX_AGE),
            ));
        }
        require_positive("total_cholesterol", self.total_cholesterol)?;
        require_positive("hdl_cholesterol", self.hdl_cholesterol)?;
        require_positive("systolic_bp", self.systolic_bp)?;
        Ok(())
    }
}

// =============================================================================
// Diabetes
// =============================================================================

/// Inputs of the FINDRISC questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiabetesRiskInput {
    pub age: u32,
    /// kg/m²
    pub bmi: f64,
    /// Waist circumference in cm
    pub waist_cm: f64,
    pub sex: Sex,
    pub on_bp_medication: bool,
    pub history_high_glucose: bool,
    /// At least 30 minutes of activity every day
    pub daily_physical_activity: bool,
    pub daily_fruit_vegetable: bool,
    pub family_diabetes: FamilyHistory,
}

impl DiabetesRiskInput {
    /// Builds an input with the questionnaire's optional answers at their
    /// most favourable values.
    pub fn with_defaults(age: u32, bmi: f64, waist_cm: f64, sex: Sex) -> Self {
        Self {
            age,
            bmi,
            waist_cm,
            sex,
            on_bp_medication: false,
            history_high_glucose: false,
            daily_physical_activity: true,
            daily_fruit_vegetable: true,
            family_diabetes: FamilyHistory::None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_positive("bmi", self.bmi)?;
        require_positive("waist_cm", self.waist_cm)?;
        Ok(())
    }
}

// =============================================================================
// Metabolic
// =============================================================================

/// Inputs of the metabolic syndrome criteria.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetabolicRiskInput {
    /// Waist circumference in cm
    pub waist_cm: f64,
    pub sex: Sex,
    /// mg/dL
    pub triglycerides: f64,
    /// mg/dL
    pub hdl_cholesterol: f64,
    /// mmHg
    pub systolic_bp: f64,
    /// mmHg
    pub diastolic_bp: f64,
    /// mmol/L
    pub fasting_glucose: f64,
    pub on_bp_medication: bool,
    pub on_lipid_medication: bool,
    pub on_glucose_medication: bool,
}

impl MetabolicRiskInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_positive("waist_cm", self.waist_cm)?;
        require_positive("triglycerides", self.triglycerides)?;
        require_positive("hdl_cholesterol", self.hdl_cholesterol)?;
        require_positive("systolic_bp", self.systolic_bp)?;
        require_positive("diastolic_bp", self.diastolic_bp)?;
        require_positive("fasting_glucose", self.fasting_glucose)?;
        Ok(())
    }
}
