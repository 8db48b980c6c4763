//! Framingham 10-year cardiovascular risk model.
//!
//! Implements the 2008 general cardiovascular disease equations
//! (D'Agostino et al.) with sex-specific coefficients.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::errors::ValidationError;
use crate::profile::Sex;
use crate::risk::risk_errors::RiskError;
use crate::risk::risk_inputs::CardiovascularRiskInput;
use crate::risk::risk_model::{
    cap_recommendations, RiskAssessmentResult, RiskFactor, RiskLevel, RiskModelKind,
};
use crate::utils::math_utils::round_to;

/// Sex-specific coefficients of the Framingham equation.
#[derive(Debug, Clone, Copy)]
struct FraminghamCoefficients {
    ln_age: f64,
    ln_total_cholesterol: f64,
    ln_hdl: f64,
    ln_sbp_untreated: f64,
    ln_sbp_treated: f64,
    smoker: f64,
    diabetes: f64,
    baseline_survival: f64,
    mean_coefficient_sum: f64,
}

const MALE_COEFFICIENTS: FraminghamCoefficients = FraminghamCoefficients {
    ln_age: 3.06117,
    ln_total_cholesterol: 1.12370,
    ln_hdl: -0.93263,
    ln_sbp_untreated: 1.93303,
    ln_sbp_treated: 1.99881,
    smoker: 0.65451,
    diabetes: 0.57367,
    baseline_survival: 0.88936,
    mean_coefficient_sum: 23.9802,
};

const FEMALE_COEFFICIENTS: FraminghamCoefficients = FraminghamCoefficients {
    ln_age: 2.32888,
    ln_total_cholesterol: 1.20904,
    ln_hdl: -0.70833,
    ln_sbp_untreated: 2.76157,
    ln_sbp_treated: 2.82263,
    smoker: 0.52873,
    diabetes: 0.69154,
    baseline_survival: 0.95012,
    mean_coefficient_sum: 26.1931,
};

fn coefficients_for(sex: Sex) -> &'static FraminghamCoefficients {
    match sex {
        Sex::Male => &MALE_COEFFICIENTS,
        Sex::Female => &FEMALE_COEFFICIENTS,
    }
}

/// Framingham result with the model-specific values alongside the common result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardiovascularAssessment {
    #[serde(flatten)]
    pub result: RiskAssessmentResult,
    /// 10-year risk in percent, one decimal
    pub risk_percentage: f64,
    /// Linear predictor, four decimals
    pub coefficient_sum: f64,
}

impl From<CardiovascularAssessment> for RiskAssessmentResult {
    fn from(assessment: CardiovascularAssessment) -> Self {
        assessment.result
    }
}

/// Framingham cardiovascular risk calculator.
pub struct FraminghamModel;

impl FraminghamModel {
    /// Creates a new Framingham model.
    pub fn new() -> Self {
        Self
    }

    /// Scores the input, failing when it lies outside the model's domain.
    pub fn try_assess(
        &self,
        input: &CardiovascularRiskInput,
    ) -> Result<CardiovascularAssessment, RiskError> {
        input
            .validate()
            .map_err(|e| RiskError::invalid_input(RiskModelKind::Cardiovascular, e))?;

        let coefficient_sum = Self::coefficient_sum(input);
        let coef = coefficients_for(input.sex);
        let risk = 1.0
            - coef
                .baseline_survival
                .powf((coefficient_sum - coef.mean_coefficient_sum).exp());
        let risk_percentage = round_to(risk * 100.0, 1);
        let risk_level = Self::risk_level(risk_percentage);
        let score = (risk_percentage * 3.0).round().clamp(0.0, 100.0) as u8;

        let mut model_details = BTreeMap::new();
        model_details.insert("age".to_string(), Value::from(input.age));
        model_details.insert("sex".to_string(), Value::from(input.sex.as_str()));
        model_details.insert(
            "totalCholesterol".to_string(),
            json!(input.total_cholesterol),
        );
        model_details.insert("hdlCholesterol".to_string(), json!(input.hdl_cholesterol));
        model_details.insert("systolicBp".to_string(), json!(input.systolic_bp));
        model_details.insert(
            "coefficientSum".to_string(),
            json!(round_to(coefficient_sum, 4)),
        );
        model_details.insert(
            "model".to_string(),
            Value::from(RiskModelKind::Cardiovascular.model_name()),
        );

        Ok(CardiovascularAssessment {
            result: RiskAssessmentResult {
                model: RiskModelKind::Cardiovascular,
                risk_level,
                score,
                factors: Self::analyze_factors(input),
                recommendations: Self::recommendations(input, risk_level),
                model_details,
            },
            risk_percentage,
            coefficient_sum: round_to(coefficient_sum, 4),
        })
    }

    /// Scores the input, returning an "unknown" result for invalid inputs.
    pub fn assess(&self, input: &CardiovascularRiskInput) -> CardiovascularAssessment {
        self.try_assess(input).unwrap_or_else(|err| {
            debug!("Framingham assessment rejected input: {}", err);
            Self::unknown(err.to_string())
        })
    }

    fn unknown(reason: String) -> CardiovascularAssessment {
        CardiovascularAssessment {
            result: RiskAssessmentResult::unable_to_assess(RiskModelKind::Cardiovascular, reason),
            risk_percentage: 0.0,
            coefficient_sum: 0.0,
        }
    }

    /// Linear predictor: weighted log-measurements plus the binary terms.
    fn coefficient_sum(input: &CardiovascularRiskInput) -> f64 {
        let coef = coefficients_for(input.sex);
        let sbp_coefficient = if input.on_bp_medication {
            coef.ln_sbp_treated
        } else {
            coef.ln_sbp_untreated
        };

        coef.ln_age * f64::from(input.age).ln()
            + coef.ln_total_cholesterol * input.total_cholesterol.ln()
            + coef.ln_hdl * input.hdl_cholesterol.ln()
            + sbp_coefficient * input.systolic_bp.ln()
            + if input.is_smoker { coef.smoker } else { 0.0 }
            + if input.has_diabetes { coef.diabetes } else { 0.0 }
    }

    fn risk_level(risk_percentage: f64) -> RiskLevel {
        if risk_percentage < 10.0 {
            RiskLevel::Low
        } else if risk_percentage < 20.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    fn analyze_factors(input: &CardiovascularRiskInput) -> Vec<RiskFactor> {
        let mut factors = Vec::with_capacity(7);

        let age_detail = format!("{} years", input.age);
        if input.age >= 55 {
            factors.push(RiskFactor::adverse("Older age", age_detail));
        } else {
            factors.push(RiskFactor::protective("Age", age_detail));
        }

        let tc = input.total_cholesterol;
        if tc >= 240.0 {
            factors.push(RiskFactor::adverse(
                "High total cholesterol",
                format!("{} mg/dL (recommended <200)", tc),
            ));
        } else if tc >= 200.0 {
            factors.push(RiskFactor::adverse(
                "Borderline total cholesterol",
                format!("{} mg/dL", tc),
            ));
        } else {
            factors.push(RiskFactor::protective(
                "Normal total cholesterol",
                format!("{} mg/dL", tc),
            ));
        }

        let hdl = input.hdl_cholesterol;
        if hdl < 40.0 {
            factors.push(RiskFactor::adverse(
                "Low HDL cholesterol",
                format!("{} mg/dL (recommended >40)", hdl),
            ));
        } else if hdl >= 60.0 {
            factors.push(RiskFactor::protective(
                "Good HDL cholesterol",
                format!("{} mg/dL", hdl),
            ));
        } else {
            factors.push(RiskFactor::protective(
                "Normal HDL cholesterol",
                format!("{} mg/dL", hdl),
            ));
        }

        let sbp = input.systolic_bp;
        if sbp >= 140.0 {
            factors.push(RiskFactor::adverse(
                "High blood pressure",
                format!("{} mmHg (recommended <140)", sbp),
            ));
        } else if sbp >= 130.0 {
            factors.push(RiskFactor::adverse(
                "Borderline blood pressure",
                format!("{} mmHg", sbp),
            ));
        } else {
            factors.push(RiskFactor::protective(
                "Normal blood pressure",
                format!("{} mmHg", sbp),
            ));
        }

        if input.is_smoker {
            factors.push(RiskFactor::adverse(
                "Smoker",
                "Smoking significantly raises cardiovascular risk",
            ));
        } else {
            factors.push(RiskFactor::protective("Non-smoker", ""));
        }

        if input.has_diabetes {
            factors.push(RiskFactor::adverse(
                "Diabetes",
                "Diabetes raises cardiovascular risk",
            ));
        } else {
            factors.push(RiskFactor::protective("No diabetes", ""));
        }

        if input.on_bp_medication {
            factors.push(RiskFactor::adverse(
                "On blood pressure medication",
                "Indicates a history of hypertension",
            ));
        }

        factors
    }

    fn recommendations(input: &CardiovascularRiskInput, level: RiskLevel) -> Vec<String> {
        let mut recs: Vec<&str> = Vec::new();

        match level {
            RiskLevel::High => {
                recs.push("See a doctor promptly for a detailed cardiovascular examination");
                recs.push("Take medication exactly as prescribed and attend regular follow-ups");
            }
            RiskLevel::Medium => {
                recs.push("Have a cardiovascular health check every year");
                recs.push("Improve your lifestyle to keep the risk from rising");
            }
            _ => {}
        }

        if input.total_cholesterol >= 200.0 {
            recs.push("Limit saturated fat and dietary cholesterol");
            recs.push("Eat more dietary fiber, such as oats and legumes");
        }

        if input.hdl_cholesterol < 40.0 {
            recs.push("Do at least 150 minutes of aerobic exercise per week");
            recs.push("Include healthy fats such as olive oil and nuts");
        }

        if input.systolic_bp >= 130.0 {
            recs.push("Keep salt intake under 6 g per day");
            recs.push("Maintain a healthy weight and avoid obesity");
        }

        if input.is_smoker {
            recs.push("Quit smoking: cardiovascular risk falls steadily after quitting");
        }

        if input.has_diabetes {
            recs.push("Keep blood sugar under tight control and monitor HbA1c regularly");
        }

        recs.push("Keep a regular schedule and get enough sleep");
        recs.push("Stay positive and avoid excessive stress");

        cap_recommendations(recs.into_iter().map(String::from).collect())
    }
}

impl Default for FraminghamModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience entry point taking plain values.
///
/// `sex` accepts "male"/"m"/"female"/"f"; anything else yields an "unknown" result.
#[allow(clippy::too_many_arguments)]
pub fn calculate_cardiovascular_risk(
    age: u32,
    sex: &str,
    total_cholesterol: f64,
    hdl_cholesterol: f64,
    systolic_bp: f64,
    on_bp_medication: bool,
    is_smoker: bool,
    has_diabetes: bool,
) -> CardiovascularAssessment {
    let sex = match sex.parse::<Sex>() {
        Ok(sex) => sex,
        Err(err) => return FraminghamModel::unknown(reject(err)),
    };

    FraminghamModel::new().assess(&CardiovascularRiskInput {
        age,
        sex,
        total_cholesterol,
        hdl_cholesterol,
        systolic_bp,
        on_bp_medication,
        is_smoker,
        has_diabetes,
    })
}

fn reject(err: ValidationError) -> String {
    RiskError::invalid_input(RiskModelKind::Cardiovascular, err).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(age: u32, sex: Sex, tc: f64, hdl: f64, sbp: f64) -> CardiovascularRiskInput {
        CardiovascularRiskInput {
            age,
            sex,
            total_cholesterol: tc,
            hdl_cholesterol: hdl,
            systolic_bp: sbp,
            on_bp_medication: false,
            is_smoker: false,
            has_diabetes: false,
        }
    }

    #[test]
    fn test_low_risk_male() {
        let assessment = FraminghamModel::new().assess(&input(40, Sex::Male, 180.0, 55.0, 115.0));
        assert_eq!(assessment.risk_percentage, 2.8);
        assert_eq!(assessment.coefficient_sum, 22.5623);
        assert_eq!(assessment.result.risk_level, RiskLevel::Low);
        assert_eq!(assessment.result.score, 8);
    }

    #[test]
    fn test_medium_risk_male() {
        let assessment = FraminghamModel::new().assess(&input(50, Sex::Male, 220.0, 45.0, 135.0));
        assert_eq!(assessment.risk_percentage, 10.9);
        assert_eq!(assessment.result.risk_level, RiskLevel::Medium);
        assert_eq!(assessment.result.score, 33);
    }

    #[test]
    fn test_high_risk_smoker() {
        let mut smoker = input(55, Sex::Male, 220.0, 45.0, 135.0);
        smoker.is_smoker = true;
        let assessment = FraminghamModel::new().assess(&smoker);
        assert_eq!(assessment.risk_percentage, 25.8);
        assert_eq!(assessment.result.risk_level, RiskLevel::High);
        assert_eq!(assessment.result.score, 77);
    }

    #[test]
    fn test_score_capped_at_100() {
        let mut worst = input(60, Sex::Male, 250.0, 35.0, 150.0);
        worst.on_bp_medication = true;
        worst.is_smoker = true;
        worst.has_diabetes = true;
        let assessment = FraminghamModel::new().assess(&worst);
        assert_eq!(assessment.risk_percentage, 82.1);
        assert_eq!(assessment.result.score, 100);
    }

    #[test]
    fn test_female_coefficients() {
        let assessment =
            FraminghamModel::new().assess(&input(45, Sex::Female, 190.0, 65.0, 110.0));
        assert_eq!(assessment.risk_percentage, 1.9);
        assert_eq!(assessment.coefficient_sum, 25.233);
        assert_eq!(assessment.result.score, 6);
    }

    #[test]
    fn test_treated_bp_uses_treated_coefficient() {
        let untreated = input(50, Sex::Male, 220.0, 45.0, 135.0);
        let treated = CardiovascularRiskInput {
            on_bp_medication: true,
            ..untreated.clone()
        };
        let model = FraminghamModel::new();
        assert!(
            model.assess(&treated).coefficient_sum > model.assess(&untreated).coefficient_sum
        );
    }

    #[test]
    fn test_factor_order_and_details() {
        let mut data = input(60, Sex::Male, 250.0, 35.0, 150.0);
        data.on_bp_medication = true;
        let factors = FraminghamModel::new().assess(&data).result.factors;

        let names: Vec<&str> = factors.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Older age",
                "High total cholesterol",
                "Low HDL cholesterol",
                "High blood pressure",
                "Non-smoker",
                "No diabetes",
                "On blood pressure medication",
            ]
        );
        assert_eq!(factors[0].detail, "60 years");
        assert_eq!(factors[1].detail, "250 mg/dL (recommended <200)");
        assert_eq!(factors[2].detail, "35 mg/dL (recommended >40)");
        assert_eq!(factors[3].detail, "150 mmHg (recommended <140)");
    }

    #[test]
    fn test_recommendations_are_capped_and_ordered() {
        let mut data = input(60, Sex::Male, 250.0, 35.0, 150.0);
        data.is_smoker = true;
        data.has_diabetes = true;
        let recs = FraminghamModel::new().assess(&data).result.recommendations;

        assert_eq!(recs.len(), 8);
        assert_eq!(
            recs[0],
            "See a doctor promptly for a detailed cardiovascular examination"
        );
        // Smoking, diabetes and closing advice fall past the cap
        assert!(!recs.iter().any(|r| r.starts_with("Quit smoking")));
    }

    #[test]
    fn test_low_risk_gets_only_closing_advice() {
        let recs = FraminghamModel::new()
            .assess(&input(40, Sex::Male, 180.0, 55.0, 115.0))
            .result
            .recommendations;
        assert_eq!(
            recs,
            vec![
                "Keep a regular schedule and get enough sleep".to_string(),
                "Stay positive and avoid excessive stress".to_string(),
            ]
        );
    }

    #[test]
    fn test_invalid_input_returns_unknown() {
        let model = FraminghamModel::new();

        let too_old = model.assess(&input(80, Sex::Male, 200.0, 50.0, 120.0));
        assert_eq!(too_old.result.risk_level, RiskLevel::Unknown);
        assert_eq!(too_old.result.score, 0);
        assert_eq!(too_old.risk_percentage, 0.0);
        assert_eq!(too_old.result.factors.len(), 1);
        assert_eq!(too_old.result.recommendations.len(), 1);

        let no_hdl = model.assess(&input(50, Sex::Male, 200.0, 0.0, 120.0));
        assert!(no_hdl.result.is_unknown());

        assert!(matches!(
            model.try_assess(&input(25, Sex::Female, 200.0, 50.0, 120.0)),
            Err(RiskError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_convenience_entry_point() {
        let assessment =
            calculate_cardiovascular_risk(40, "male", 180.0, 55.0, 115.0, false, false, false);
        assert_eq!(assessment.risk_percentage, 2.8);

        let unknown =
            calculate_cardiovascular_risk(40, "other", 180.0, 55.0, 115.0, false, false, false);
        assert_eq!(unknown.result.risk_level, RiskLevel::Unknown);
    }

    #[test]
    fn test_deterministic() {
        let data = input(55, Sex::Female, 230.0, 48.0, 138.0);
        let model = FraminghamModel::new();
        assert_eq!(model.assess(&data), model.assess(&data));
    }
}
