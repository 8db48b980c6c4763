//! Risk assessment domain models.
//!
//! This module contains the data structures shared by every risk model:
//! - Risk levels and the model selector
//! - Contributing factors
//! - The assessment result and its stored record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::constants::MAX_RISK_RECOMMENDATIONS;

// =============================================================================
// Risk Level
// =============================================================================

/// Risk tier reported by an assessment.
///
/// `Unknown` is a first-class outcome: it is returned whenever the inputs
/// cannot be assessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unknown,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Risk Model Kind
// =============================================================================

/// Selects the scoring strategy for an assessment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskModelKind {
    /// Framingham 10-year cardiovascular risk
    Cardiovascular,
    /// FINDRISC 10-year type 2 diabetes risk
    Diabetes,
    /// IDF/NCEP ATP III metabolic syndrome criteria
    Metabolic,
    /// Simplified heuristic for risk types without a validated model
    Generic,
}

impl RiskModelKind {
    /// Maps an assessment type name onto a model. Names without a dedicated
    /// model fall back to the generic strategy.
    pub fn from_assessment_type(assessment_type: &str) -> Self {
        match assessment_type.trim().to_ascii_lowercase().as_str() {
            "cardiovascular" => RiskModelKind::Cardiovascular,
            "diabetes" => RiskModelKind::Diabetes,
            "metabolic" => RiskModelKind::Metabolic,
            _ => RiskModelKind::Generic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskModelKind::Cardiovascular => "cardiovascular",
            RiskModelKind::Diabetes => "diabetes",
            RiskModelKind::Metabolic => "metabolic",
            RiskModelKind::Generic => "generic",
        }
    }

    /// Name of the published model behind this strategy.
    pub fn model_name(&self) -> &'static str {
        match self {
            RiskModelKind::Cardiovascular => "Framingham Risk Score (2008)",
            RiskModelKind::Diabetes => "FINDRISC (Finnish Diabetes Risk Score)",
            RiskModelKind::Metabolic => "IDF/NCEP ATP III",
            RiskModelKind::Generic => "generic",
        }
    }
}

impl std::fmt::Display for RiskModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display name for an assessment type.
pub fn assessment_display_name(assessment_type: &str) -> &'static str {
    match assessment_type.trim().to_ascii_lowercase().as_str() {
        "cardiovascular" => "Cardiovascular disease risk",
        "diabetes" => "Diabetes risk",
        "metabolic" => "Metabolic syndrome risk",
        "osteoporosis" => "Osteoporosis risk",
        _ => "Health risk",
    }
}

// =============================================================================
// Risk Factor
// =============================================================================

/// One analysed input dimension of an assessment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    /// Short label (e.g., "High total cholesterol")
    pub name: String,
    /// True when the factor lowers risk
    pub positive: bool,
    /// Measured value and, when abnormal, the recommended target
    pub detail: String,
}

impl RiskFactor {
    /// Creates a protective factor.
    pub fn protective(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positive: true,
            detail: detail.into(),
        }
    }

    /// Creates a factor that raises risk.
    pub fn adverse(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positive: false,
            detail: detail.into(),
        }
    }
}

// =============================================================================
// Risk Assessment Result
// =============================================================================

/// Outcome of a single risk model invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessmentResult {
    /// Strategy that produced the result
    pub model: RiskModelKind,
    pub risk_level: RiskLevel,
    /// Normalized risk score, 0 to 100 (higher is riskier)
    pub score: u8,
    pub factors: Vec<RiskFactor>,
    pub recommendations: Vec<String>,
    /// Diagnostic metadata (inputs, intermediate values, model name)
    pub model_details: BTreeMap<String, Value>,
}

impl RiskAssessmentResult {
    /// Result returned when the inputs fall outside the model's domain.
    pub fn unable_to_assess(model: RiskModelKind, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let mut model_details = BTreeMap::new();
        model_details.insert("model".to_string(), Value::from(model.model_name()));
        model_details.insert("error".to_string(), Value::from(reason.clone()));

        Self {
            model,
            risk_level: RiskLevel::Unknown,
            score: 0,
            factors: vec![RiskFactor::adverse("Incomplete health data", reason)],
            recommendations: vec![
                "Please complete your health profile with valid measurements to get an assessment"
                    .to_string(),
            ],
            model_details,
        }
    }

    /// Result returned when the user has no health profile at all.
    pub fn incomplete_profile(model: RiskModelKind, assessment_type: &str) -> Self {
        let mut model_details = BTreeMap::new();
        model_details.insert("error".to_string(), Value::from("incomplete_profile"));
        model_details.insert("assessmentType".to_string(), Value::from(assessment_type));

        Self {
            model,
            risk_level: RiskLevel::Unknown,
            score: 0,
            factors: vec![RiskFactor::adverse(
                "Incomplete health profile",
                "Complete your health profile to get an accurate assessment",
            )],
            recommendations: vec![
                "Please complete your health profile".to_string(),
                "Record basic data such as height, weight and blood pressure".to_string(),
                "If you have a recent check-up report, add its lab values".to_string(),
                "A complete profile gives a more accurate risk assessment".to_string(),
            ],
            model_details,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.risk_level == RiskLevel::Unknown
    }
}

/// Caps a recommendation list at the per-model maximum.
pub(crate) fn cap_recommendations(mut recommendations: Vec<String>) -> Vec<String> {
    recommendations.truncate(MAX_RISK_RECOMMENDATIONS);
    recommendations
}

// =============================================================================
// Stored Assessment
// =============================================================================

/// An assessment ready to be persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewRiskAssessment {
    pub user_id: String,
    pub assessment_type: String,
    pub name: String,
    pub assessed_at: DateTime<Utc>,
    pub result: RiskAssessmentResult,
}

/// A persisted assessment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub id: String,
    pub user_id: String,
    pub assessment_type: String,
    pub name: String,
    pub assessed_at: DateTime<Utc>,
    pub result: RiskAssessmentResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_kind_dispatch() {
        assert_eq!(
            RiskModelKind::from_assessment_type("cardiovascular"),
            RiskModelKind::Cardiovascular
        );
        assert_eq!(
            RiskModelKind::from_assessment_type(" Diabetes "),
            RiskModelKind::Diabetes
        );
        assert_eq!(
            RiskModelKind::from_assessment_type("metabolic"),
            RiskModelKind::Metabolic
        );
        assert_eq!(
            RiskModelKind::from_assessment_type("osteoporosis"),
            RiskModelKind::Generic
        );
    }

    #[test]
    fn test_display_names() {
        assert_eq!(assessment_display_name("osteoporosis"), "Osteoporosis risk");
        assert_eq!(assessment_display_name("kidney"), "Health risk");
    }

    #[test]
    fn test_risk_level_serialization() {
        assert_eq!(serde_json::to_string(&RiskLevel::Medium).unwrap(), "\"medium\"");
        assert_eq!(
            serde_json::from_str::<RiskLevel>("\"unknown\"").unwrap(),
            RiskLevel::Unknown
        );
    }

    #[test]
    fn test_unable_to_assess() {
        let result = RiskAssessmentResult::unable_to_assess(
            RiskModelKind::Cardiovascular,
            "age must be between 30 and 79, got 25",
        );
        assert!(result.is_unknown());
        assert_eq!(result.score, 0);
        assert_eq!(result.factors.len(), 1);
        assert!(!result.factors[0].positive);
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(
            result.model_details.get("error"),
            Some(&Value::from("age must be between 30 and 79, got 25"))
        );
    }

    #[test]
    fn test_incomplete_profile() {
        let result = RiskAssessmentResult::incomplete_profile(RiskModelKind::Diabetes, "diabetes");
        assert_eq!(result.risk_level, RiskLevel::Unknown);
        assert_eq!(result.recommendations.len(), 4);
        assert_eq!(
            result.model_details.get("error"),
            Some(&Value::from("incomplete_profile"))
        );
    }
}
