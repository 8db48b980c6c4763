//! Heuristic assessment for risk types without a validated model.
//!
//! Starts from a base score and adjusts it for age, BMI, smoking and
//! exercise. Results are low-confidence placeholders.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::profile::UserHealthProfile;
use crate::risk::risk_model::{RiskAssessmentResult, RiskFactor, RiskLevel, RiskModelKind};

const BASE_SCORE: i32 = 30;

/// Simple additive heuristic over whatever basic data is known.
pub struct GenericRiskModel;

impl GenericRiskModel {
    pub fn new() -> Self {
        Self
    }

    /// Scores the known data. Works without a profile; only age is used then.
    pub fn assess(
        &self,
        age: Option<u32>,
        profile: Option<&UserHealthProfile>,
    ) -> RiskAssessmentResult {
        let mut factors = Vec::new();
        let mut score = BASE_SCORE;

        if let Some(age) = age {
            let detail = format!("{} years", age);
            if age >= 60 {
                factors.push(RiskFactor::adverse("Older age", detail));
                score += 15;
            } else if age >= 45 {
                factors.push(RiskFactor::adverse("Middle age", detail));
                score += 5;
            } else {
                factors.push(RiskFactor::protective("Younger age", detail));
            }
        }

        if let Some(profile) = profile {
            match profile.effective_bmi() {
                Some(bmi) if bmi >= 25.0 => {
                    factors.push(RiskFactor::adverse("High BMI", format!("BMI {:.1}", bmi)));
                    score += 10;
                }
                Some(bmi) => {
                    factors.push(RiskFactor::protective("Normal BMI", format!("BMI {:.1}", bmi)));
                }
                None => {}
            }

            if profile.is_smoker {
                factors.push(RiskFactor::adverse("Smoker", ""));
                score += 15;
            } else {
                factors.push(RiskFactor::protective("Non-smoker", ""));
            }

            if profile.exercises_regularly() {
                factors.push(RiskFactor::protective("Regular exercise", ""));
                score -= 10;
            } else {
                factors.push(RiskFactor::adverse("Insufficient exercise", ""));
                score += 5;
            }
        }

        let score = score.clamp(0, 100) as u8;
        let risk_level = if score < 30 {
            RiskLevel::Low
        } else if score < 60 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        };

        let mut recommendations = vec![
            "Keep a healthy lifestyle".to_string(),
            "Have regular health check-ups".to_string(),
            "Keep a balanced diet".to_string(),
            "Exercise moderately".to_string(),
        ];
        if risk_level == RiskLevel::High {
            recommendations.insert(0, "See a doctor for a professional examination".to_string());
        }
        recommendations.push(
            "This estimate uses basic data only; a dedicated model is not available for this risk type"
                .to_string(),
        );

        let mut model_details = BTreeMap::new();
        model_details.insert(
            "model".to_string(),
            Value::from(RiskModelKind::Generic.model_name()),
        );
        model_details.insert(
            "note".to_string(),
            Value::from("Simple estimate based on basic health data"),
        );
        model_details.insert("confidence".to_string(), Value::from("low"));

        RiskAssessmentResult {
            model: RiskModelKind::Generic,
            risk_level,
            score,
            factors,
            recommendations,
            model_details,
        }
    }
}

impl Default for GenericRiskModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ExerciseFrequency;

    #[test]
    fn test_base_score_without_data() {
        let result = GenericRiskModel::new().assess(None, None);
        assert_eq!(result.score, 30);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert!(result.factors.is_empty());
        assert_eq!(result.recommendations.len(), 5);
        assert_eq!(
            result.model_details.get("confidence"),
            Some(&Value::from("low"))
        );
    }

    #[test]
    fn test_healthy_young_profile_is_low() {
        let profile = UserHealthProfile {
            bmi: Some(22.0),
            exercise_frequency: Some(ExerciseFrequency::Daily),
            ..Default::default()
        };
        let result = GenericRiskModel::new().assess(Some(30), Some(&profile));
        assert_eq!(result.score, 20);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(result.factors.iter().all(|f| f.positive));
        assert_eq!(result.factors[1].detail, "BMI 22.0");
    }

    #[test]
    fn test_high_risk_adds_doctor_visit_first() {
        let profile = UserHealthProfile {
            bmi: Some(28.4),
            is_smoker: true,
            ..Default::default()
        };
        let result = GenericRiskModel::new().assess(Some(65), Some(&profile));
        // 30 + 15 + 10 + 15 + 5
        assert_eq!(result.score, 75);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(
            result.recommendations[0],
            "See a doctor for a professional examination"
        );
        assert_eq!(result.recommendations.len(), 6);
    }

    #[test]
    fn test_middle_age_without_bmi() {
        let profile = UserHealthProfile::default();
        let result = GenericRiskModel::new().assess(Some(50), Some(&profile));
        // 30 + 5 + 5, no BMI factor
        assert_eq!(result.score, 40);
        assert_eq!(result.factors.len(), 3);
        assert_eq!(result.factors[0].name, "Middle age");
    }
}
