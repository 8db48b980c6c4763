//! Metabolic syndrome criteria (IDF / NCEP ATP III, Asian waist thresholds).
//!
//! Five independent criteria. A criterion is met when the measurement is
//! abnormal or the user is already treated for it; three or more met
//! criteria constitute metabolic syndrome.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::constants::HIGH_FASTING_GLUCOSE;
use crate::profile::Sex;
use crate::risk::risk_errors::RiskError;
use crate::risk::risk_inputs::MetabolicRiskInput;
use crate::risk::risk_model::{
    cap_recommendations, RiskAssessmentResult, RiskFactor, RiskLevel, RiskModelKind,
};

/// Number of criteria evaluated.
pub const TOTAL_CRITERIA: u8 = 5;

/// Criteria required for a metabolic syndrome diagnosis.
pub const DIAGNOSTIC_THRESHOLD: u8 = 3;

const TRIGLYCERIDES_THRESHOLD: f64 = 150.0;
const SYSTOLIC_THRESHOLD: f64 = 130.0;
const DIASTOLIC_THRESHOLD: f64 = 85.0;

fn waist_threshold(sex: Sex) -> f64 {
    match sex {
        Sex::Male => 90.0,
        Sex::Female => 80.0,
    }
}

fn hdl_threshold(sex: Sex) -> f64 {
    match sex {
        Sex::Male => 40.0,
        Sex::Female => 50.0,
    }
}

// =============================================================================
// Criteria
// =============================================================================

/// The five diagnostic criteria, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetabolicCriterion {
    AbdominalObesity,
    ElevatedTriglycerides,
    ReducedHdl,
    ElevatedBloodPressure,
    ElevatedFastingGlucose,
}

impl MetabolicCriterion {
    /// Name of the abnormality.
    pub fn name(&self) -> &'static str {
        match self {
            MetabolicCriterion::AbdominalObesity => "Abdominal obesity",
            MetabolicCriterion::ElevatedTriglycerides => "Elevated triglycerides",
            MetabolicCriterion::ReducedHdl => "Reduced HDL cholesterol",
            MetabolicCriterion::ElevatedBloodPressure => "Elevated blood pressure",
            MetabolicCriterion::ElevatedFastingGlucose => "Elevated fasting glucose",
        }
    }

    /// Name of the measurement behind the criterion.
    pub fn measure(&self) -> &'static str {
        match self {
            MetabolicCriterion::AbdominalObesity => "Waist circumference",
            MetabolicCriterion::ElevatedTriglycerides => "Triglycerides",
            MetabolicCriterion::ReducedHdl => "HDL cholesterol",
            MetabolicCriterion::ElevatedBloodPressure => "Blood pressure",
            MetabolicCriterion::ElevatedFastingGlucose => "Fasting glucose",
        }
    }

    /// Targeted advice given when the criterion is met.
    fn advice(&self) -> [&'static str; 2] {
        match self {
            MetabolicCriterion::AbdominalObesity => [
                "Reducing abdominal fat is key to improving your metabolism",
                "Lose weight through diet control and exercise",
            ],
            MetabolicCriterion::ElevatedTriglycerides => [
                "Cut down on refined carbohydrates and alcohol",
                "Eat more omega-3 rich foods such as oily fish",
            ],
            MetabolicCriterion::ReducedHdl => [
                "Aerobic exercise helps raise HDL levels",
                "Quitting smoking helps raise HDL cholesterol",
            ],
            MetabolicCriterion::ElevatedBloodPressure => [
                "Keep salt intake under 6 g per day",
                "Eat more potassium-rich vegetables and fruit",
            ],
            MetabolicCriterion::ElevatedFastingGlucose => [
                "Control carbohydrate intake and choose low-GI foods",
                "Light activity after meals helps control blood sugar",
            ],
        }
    }
}

/// Evaluation of one criterion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CriterionOutcome {
    pub criterion: MetabolicCriterion,
    pub name: String,
    /// Diagnostic rule (e.g., "waist ≥90cm")
    pub threshold: String,
    /// Measured value as displayed (e.g., "96cm")
    pub value: String,
    /// Measurement outside the normal range
    pub abnormal: bool,
    /// Already treated for this abnormality
    pub on_treatment: bool,
    /// Abnormal or on treatment
    pub met: bool,
}

impl CriterionOutcome {
    fn new(
        criterion: MetabolicCriterion,
        threshold: String,
        value: String,
        abnormal: bool,
        on_treatment: bool,
    ) -> Self {
        Self {
            criterion,
            name: criterion.name().to_string(),
            threshold,
            value,
            abnormal,
            on_treatment,
            met: abnormal || on_treatment,
        }
    }
}

/// Metabolic syndrome result with the per-criterion evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetabolicAssessment {
    #[serde(flatten)]
    pub result: RiskAssessmentResult,
    /// Criteria met, 0 to 5
    pub criteria_met: u8,
    pub has_metabolic_syndrome: bool,
    pub criteria: Vec<CriterionOutcome>,
}

impl From<MetabolicAssessment> for RiskAssessmentResult {
    fn from(assessment: MetabolicAssessment) -> Self {
        assessment.result
    }
}

// =============================================================================
// Model
// =============================================================================

/// Metabolic syndrome criteria counter.
pub struct MetabolicSyndromeModel;

impl MetabolicSyndromeModel {
    /// Creates a new metabolic syndrome model.
    pub fn new() -> Self {
        Self
    }

    /// Evaluates the criteria, failing when a measurement is not a positive number.
    pub fn try_assess(
        &self,
        input: &MetabolicRiskInput,
    ) -> Result<MetabolicAssessment, RiskError> {
        input
            .validate()
            .map_err(|e| RiskError::invalid_input(RiskModelKind::Metabolic, e))?;

        let criteria = Self::evaluate_criteria(input);
        let criteria_met = criteria.iter().filter(|c| c.met).count() as u8;
        let has_metabolic_syndrome = criteria_met >= DIAGNOSTIC_THRESHOLD;
        let risk_level = match criteria_met {
            0 => RiskLevel::Low,
            1 | 2 => RiskLevel::Medium,
            _ => RiskLevel::High,
        };

        let mut model_details = BTreeMap::new();
        model_details.insert(
            "model".to_string(),
            Value::from(RiskModelKind::Metabolic.model_name()),
        );
        model_details.insert(
            "diagnosisThreshold".to_string(),
            Value::from(format!("{} of {} criteria", DIAGNOSTIC_THRESHOLD, TOTAL_CRITERIA)),
        );
        model_details.insert("totalCriteria".to_string(), Value::from(TOTAL_CRITERIA));
        model_details.insert("population".to_string(), Value::from("Asian"));

        Ok(MetabolicAssessment {
            result: RiskAssessmentResult {
                model: RiskModelKind::Metabolic,
                risk_level,
                score: criteria_met * 20,
                factors: Self::analyze_factors(&criteria),
                recommendations: Self::recommendations(&criteria, has_metabolic_syndrome),
                model_details,
            },
            criteria_met,
            has_metabolic_syndrome,
            criteria,
        })
    }

    /// Evaluates the criteria, returning an "unknown" result for invalid inputs.
    pub fn assess(&self, input: &MetabolicRiskInput) -> MetabolicAssessment {
        self.try_assess(input).unwrap_or_else(|err| {
            debug!("Metabolic syndrome assessment rejected input: {}", err);
            Self::unknown(err.to_string())
        })
    }

    fn unknown(reason: String) -> MetabolicAssessment {
        MetabolicAssessment {
            result: RiskAssessmentResult::unable_to_assess(RiskModelKind::Metabolic, reason),
            criteria_met: 0,
            has_metabolic_syndrome: false,
            criteria: Vec::new(),
        }
    }

    fn evaluate_criteria(input: &MetabolicRiskInput) -> Vec<CriterionOutcome> {
        let waist_limit = waist_threshold(input.sex);
        let hdl_limit = hdl_threshold(input.sex);

        vec![
            CriterionOutcome::new(
                MetabolicCriterion::AbdominalObesity,
                format!("waist ≥{}cm", waist_limit),
                format!("{:.0}cm", input.waist_cm),
                input.waist_cm >= waist_limit,
                false,
            ),
            CriterionOutcome::new(
                MetabolicCriterion::ElevatedTriglycerides,
                format!("≥{} mg/dL or on treatment", TRIGLYCERIDES_THRESHOLD),
                format!("{:.0} mg/dL", input.triglycerides),
                input.triglycerides >= TRIGLYCERIDES_THRESHOLD,
                input.on_lipid_medication,
            ),
            CriterionOutcome::new(
                MetabolicCriterion::ReducedHdl,
                format!("<{} mg/dL or on treatment", hdl_limit),
                format!("{:.0} mg/dL", input.hdl_cholesterol),
                input.hdl_cholesterol < hdl_limit,
                input.on_lipid_medication,
            ),
            CriterionOutcome::new(
                MetabolicCriterion::ElevatedBloodPressure,
                format!(
                    "≥{}/{} mmHg or on treatment",
                    SYSTOLIC_THRESHOLD, DIASTOLIC_THRESHOLD
                ),
                format!("{:.0}/{:.0} mmHg", input.systolic_bp, input.diastolic_bp),
                input.systolic_bp >= SYSTOLIC_THRESHOLD || input.diastolic_bp >= DIASTOLIC_THRESHOLD,
                input.on_bp_medication,
            ),
            CriterionOutcome::new(
                MetabolicCriterion::ElevatedFastingGlucose,
                format!("≥{} mmol/L or on treatment", HIGH_FASTING_GLUCOSE),
                format!("{:.1} mmol/L", input.fasting_glucose),
                input.fasting_glucose >= HIGH_FASTING_GLUCOSE,
                input.on_glucose_medication,
            ),
        ]
    }

    fn analyze_factors(criteria: &[CriterionOutcome]) -> Vec<RiskFactor> {
        criteria
            .iter()
            .map(|c| {
                if c.met {
                    RiskFactor::adverse(c.name.clone(), format!("{} ({})", c.value, c.threshold))
                } else {
                    RiskFactor::protective(
                        format!("{} normal", c.criterion.measure()),
                        c.value.clone(),
                    )
                }
            })
            .collect()
    }

    fn recommendations(criteria: &[CriterionOutcome], has_syndrome: bool) -> Vec<String> {
        let mut recs: Vec<&str> = Vec::new();

        if has_syndrome {
            recs.push("You meet the diagnostic criteria for metabolic syndrome; see a doctor soon");
            recs.push("Metabolic syndrome significantly raises cardiovascular and diabetes risk");
            recs.push("Comprehensive treatment under medical supervision is needed");
        }

        for outcome in criteria.iter().filter(|c| c.met) {
            recs.extend(outcome.criterion.advice());
        }

        if !has_syndrome {
            recs.push("Keep a healthy lifestyle to prevent metabolic syndrome");
        }
        recs.push("Have regular check-ups to monitor your metabolic markers");

        cap_recommendations(recs.into_iter().map(String::from).collect())
    }
}

impl Default for MetabolicSyndromeModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience entry point taking plain values.
///
/// `sex` accepts "male"/"m"/"female"/"f"; anything else yields an "unknown" result.
#[allow(clippy::too_many_arguments)]
pub fn calculate_metabolic_risk(
    waist_cm: f64,
    sex: &str,
    triglycerides: f64,
    hdl_cholesterol: f64,
    systolic_bp: f64,
    diastolic_bp: f64,
    fasting_glucose: f64,
    on_bp_medication: bool,
    on_lipid_medication: bool,
    on_glucose_medication: bool,
) -> MetabolicAssessment {
    let sex = match sex.parse::<Sex>() {
        Ok(sex) => sex,
        Err(err) => {
            return MetabolicSyndromeModel::unknown(
                RiskError::invalid_input(RiskModelKind::Metabolic, err).to_string(),
            )
        }
    };

    MetabolicSyndromeModel::new().assess(&MetabolicRiskInput {
        waist_cm,
        sex,
        triglycerides,
        hdl_cholesterol,
        systolic_bp,
        diastolic_bp,
        fasting_glucose,
        on_bp_medication,
        on_lipid_medication,
        on_glucose_medication,
    })
}
