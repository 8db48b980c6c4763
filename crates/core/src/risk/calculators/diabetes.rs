//! FINDRISC 10-year type 2 diabetes risk model.
//!
//! An additive questionnaire: eight dimensions are scored independently and
//! summed into a total between 0 and 26.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::profile::Sex;
use crate::risk::risk_errors::RiskError;
use crate::risk::risk_inputs::{DiabetesRiskInput, FamilyHistory};
use crate::risk::risk_model::{
    cap_recommendations, RiskAssessmentResult, RiskFactor, RiskLevel, RiskModelKind,
};
use crate::utils::math_utils::round_to;

/// Highest attainable FINDRISC total.
pub const FINDRISC_MAX_SCORE: u8 = 26;

/// Questionnaire dimensions, in scoring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindriscDimension {
    Age,
    Bmi,
    Waist,
    Activity,
    Diet,
    BpMedication,
    HighGlucose,
    Family,
}

impl FindriscDimension {
    pub fn label(&self) -> &'static str {
        match self {
            FindriscDimension::Age => "Age",
            FindriscDimension::Bmi => "BMI",
            FindriscDimension::Waist => "Waist circumference",
            FindriscDimension::Activity => "Daily physical activity",
            FindriscDimension::Diet => "Daily fruit and vegetables",
            FindriscDimension::BpMedication => "Blood pressure medication",
            FindriscDimension::HighGlucose => "History of high blood glucose",
            FindriscDimension::Family => "Family history of diabetes",
        }
    }
}

/// Points awarded for one dimension.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponent {
    pub dimension: FindriscDimension,
    /// The answer as scored (number or yes/no)
    pub value: Value,
    pub points: u8,
    pub label: String,
}

impl ScoreComponent {
    fn new(dimension: FindriscDimension, value: Value, points: u8) -> Self {
        Self {
            dimension,
            value,
            points,
            label: dimension.label().to_string(),
        }
    }
}

/// FINDRISC result with the questionnaire total and per-dimension points.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiabetesAssessment {
    #[serde(flatten)]
    pub result: RiskAssessmentResult,
    /// Sum of the breakdown points, 0 to 26
    pub total_score: u8,
    /// Literal 10-year risk attached to the score tier
    pub risk_percentage: f64,
    pub breakdown: Vec<ScoreComponent>,
}

impl DiabetesAssessment {
    /// Points awarded for `dimension`, 0 when the breakdown is empty.
    pub fn points_for(&self, dimension: FindriscDimension) -> u8 {
        self.breakdown
            .iter()
            .find(|c| c.dimension == dimension)
            .map(|c| c.points)
            .unwrap_or(0)
    }
}

impl From<DiabetesAssessment> for RiskAssessmentResult {
    fn from(assessment: DiabetesAssessment) -> Self {
        assessment.result
    }
}

fn yes_no(answer: bool) -> Value {
    Value::from(if answer { "yes" } else { "no" })
}

/// FINDRISC diabetes risk calculator.
pub struct FindriscModel;

impl FindriscModel {
    /// Creates a new FINDRISC model.
    pub fn new() -> Self {
        Self
    }

    /// Scores the input, failing when it lies outside the model's domain.
    pub fn try_assess(&self, input: &DiabetesRiskInput) -> Result<DiabetesAssessment, RiskError> {
        input
            .validate()
            .map_err(|e| RiskError::invalid_input(RiskModelKind::Diabetes, e))?;

        let breakdown = Self::score_breakdown(input);
        let total_score: u8 = breakdown.iter().map(|c| c.points).sum();
        let (risk_level, risk_percentage) = Self::risk_tier(total_score);
        let score = (f64::from(total_score) * 100.0 / f64::from(FINDRISC_MAX_SCORE))
            .round()
            .min(100.0) as u8;
        let waist_points = breakdown
            .iter()
            .find(|c| c.dimension == FindriscDimension::Waist)
            .map(|c| c.points)
            .unwrap_or(0);

        let mut model_details = BTreeMap::new();
        model_details.insert(
            "model".to_string(),
            Value::from(RiskModelKind::Diabetes.model_name()),
        );
        model_details.insert("maxScore".to_string(), Value::from(FINDRISC_MAX_SCORE));
        model_details.insert("assessmentPeriod".to_string(), Value::from("10 years"));

        Ok(DiabetesAssessment {
            result: RiskAssessmentResult {
                model: RiskModelKind::Diabetes,
                risk_level,
                score,
                factors: Self::analyze_factors(input, &breakdown),
                recommendations: Self::recommendations(input, risk_level, waist_points),
                model_details,
            },
            total_score,
            risk_percentage,
            breakdown,
        })
    }

    /// Scores the input, returning an "unknown" result for invalid inputs.
    pub fn assess(&self, input: &DiabetesRiskInput) -> DiabetesAssessment {
        self.try_assess(input).unwrap_or_else(|err| {
            debug!("FINDRISC assessment rejected input: {}", err);
            Self::unknown(err.to_string())
        })
    }

    fn unknown(reason: String) -> DiabetesAssessment {
        DiabetesAssessment {
            result: RiskAssessmentResult::unable_to_assess(RiskModelKind::Diabetes, reason),
            total_score: 0,
            risk_percentage: 0.0,
            breakdown: Vec::new(),
        }
    }

    /// Scores all eight dimensions. No dimension short-circuits another.
    fn score_breakdown(input: &DiabetesRiskInput) -> Vec<ScoreComponent> {
        vec![
            ScoreComponent::new(
                FindriscDimension::Age,
                Value::from(input.age),
                Self::age_points(input.age),
            ),
            ScoreComponent::new(
                FindriscDimension::Bmi,
                json!(round_to(input.bmi, 1)),
                Self::bmi_points(input.bmi),
            ),
            ScoreComponent::new(
                FindriscDimension::Waist,
                json!(round_to(input.waist_cm, 1)),
                Self::waist_points(input.waist_cm, input.sex),
            ),
            ScoreComponent::new(
                FindriscDimension::Activity,
                yes_no(input.daily_physical_activity),
                if input.daily_physical_activity { 0 } else { 2 },
            ),
            ScoreComponent::new(
                FindriscDimension::Diet,
                yes_no(input.daily_fruit_vegetable),
                if input.daily_fruit_vegetable { 0 } else { 1 },
            ),
            ScoreComponent::new(
                FindriscDimension::BpMedication,
                yes_no(input.on_bp_medication),
                if input.on_bp_medication { 2 } else { 0 },
            ),
            ScoreComponent::new(
                FindriscDimension::HighGlucose,
                yes_no(input.history_high_glucose),
                if input.history_high_glucose { 5 } else { 0 },
            ),
            ScoreComponent::new(
                FindriscDimension::Family,
                Value::from(input.family_diabetes.as_str()),
                Self::family_points(input.family_diabetes),
            ),
        ]
    }

    fn age_points(age: u32) -> u8 {
        match age {
            0..=44 => 0,
            45..=54 => 2,
            55..=64 => 3,
            _ => 4,
        }
    }

    fn bmi_points(bmi: f64) -> u8 {
        if bmi < 25.0 {
            0
        } else if bmi < 30.0 {
            1
        } else {
            3
        }
    }

    fn waist_thresholds(sex: Sex) -> (f64, f64) {
        match sex {
            Sex::Male => (94.0, 102.0),
            Sex::Female => (80.0, 88.0),
        }
    }

    fn waist_points(waist_cm: f64, sex: Sex) -> u8 {
        let (elevated, high) = Self::waist_thresholds(sex);
        if waist_cm < elevated {
            0
        } else if waist_cm < high {
            3
        } else {
            4
        }
    }

    fn family_points(family: FamilyHistory) -> u8 {
        match family {
            FamilyHistory::FirstDegree => 5,
            FamilyHistory::SecondDegree => 3,
            FamilyHistory::None => 0,
        }
    }

    /// Tier label and literal 10-year risk for a total score.
    fn risk_tier(total_score: u8) -> (RiskLevel, f64) {
        match total_score {
            0..=6 => (RiskLevel::Low, 1.0),
            7..=11 => (RiskLevel::Low, 4.0),
            12..=14 => (RiskLevel::Medium, 17.0),
            15..=20 => (RiskLevel::High, 33.0),
            _ => (RiskLevel::High, 50.0),
        }
    }

    fn analyze_factors(input: &DiabetesRiskInput, breakdown: &[ScoreComponent]) -> Vec<RiskFactor> {
        let mut factors = Vec::with_capacity(8);

        let age_points = breakdown
            .iter()
            .find(|c| c.dimension == FindriscDimension::Age)
            .map(|c| c.points)
            .unwrap_or(0);
        let age_detail = format!("{} years", input.age);
        if age_points >= 3 {
            factors.push(RiskFactor::adverse("Older age", age_detail));
        } else {
            factors.push(RiskFactor::protective("Age", age_detail));
        }

        if input.bmi >= 30.0 {
            factors.push(RiskFactor::adverse(
                "High BMI (obese)",
                format!("BMI {:.1} (recommended <25)", input.bmi),
            ));
        } else if input.bmi >= 25.0 {
            factors.push(RiskFactor::adverse(
                "High BMI (overweight)",
                format!("BMI {:.1} (recommended <25)", input.bmi),
            ));
        } else {
            factors.push(RiskFactor::protective(
                "Normal BMI",
                format!("BMI {:.1}", input.bmi),
            ));
        }

        let (threshold, _) = Self::waist_thresholds(input.sex);
        if input.waist_cm >= threshold {
            factors.push(RiskFactor::adverse(
                "Large waist circumference",
                format!("{:.0}cm (recommended <{}cm)", input.waist_cm, threshold),
            ));
        } else {
            factors.push(RiskFactor::protective(
                "Normal waist circumference",
                format!("{:.0}cm", input.waist_cm),
            ));
        }

        if input.daily_physical_activity {
            factors.push(RiskFactor::protective(
                "Good exercise habits",
                "At least 30 minutes of activity daily",
            ));
        } else {
            factors.push(RiskFactor::adverse(
                "Insufficient exercise",
                "Aim for at least 30 minutes of activity daily",
            ));
        }

        if input.daily_fruit_vegetable {
            factors.push(RiskFactor::protective(
                "Good eating habits",
                "Fruit and vegetables every day",
            ));
        } else {
            factors.push(RiskFactor::adverse(
                "Too few fruit and vegetables",
                "Eat fruit and vegetables every day",
            ));
        }

        if input.history_high_glucose {
            factors.push(RiskFactor::adverse(
                "History of high blood glucose",
                "Elevated blood glucose has been detected before",
            ));
        } else {
            factors.push(RiskFactor::protective("No history of high blood glucose", ""));
        }

        match input.family_diabetes {
            FamilyHistory::FirstDegree => factors.push(RiskFactor::adverse(
                "Diabetes in first-degree relatives",
                "Parent or sibling",
            )),
            FamilyHistory::SecondDegree => factors.push(RiskFactor::adverse(
                "Diabetes in second-degree relatives",
                "Grandparent, aunt or uncle",
            )),
            FamilyHistory::None => {
                factors.push(RiskFactor::protective("No family history of diabetes", ""))
            }
        }

        if input.on_bp_medication {
            factors.push(RiskFactor::adverse(
                "On blood pressure medication",
                "Hypertension is associated with diabetes risk",
            ));
        }

        factors
    }

    fn recommendations(input: &DiabetesRiskInput, level: RiskLevel, waist_points: u8) -> Vec<String> {
        let mut recs: Vec<&str> = Vec::new();

        match level {
            RiskLevel::High => {
                recs.push("See a doctor soon for an oral glucose tolerance test (OGTT)");
                recs.push("Monitor fasting blood glucose and HbA1c regularly");
            }
            RiskLevel::Medium => {
                recs.push("Have your fasting blood glucose tested every year");
                recs.push("Improve your lifestyle to prevent diabetes");
            }
            _ => {}
        }

        if input.bmi >= 25.0 {
            recs.push("Lose weight with a target BMI below 25");
            recs.push("Losing 5% of body weight can cut diabetes risk by more than half");
        }

        if waist_points > 0 {
            recs.push("Reduce abdominal fat and keep your waist circumference in check");
        }

        if !input.daily_physical_activity {
            recs.push("Get at least 30 minutes of moderate exercise every day");
            recs.push("Try aerobic activities such as brisk walking, swimming or cycling");
        }

        if !input.daily_fruit_vegetable {
            recs.push("Eat at least 500 g of fruit and vegetables every day");
        }

        if input.history_high_glucose {
            recs.push("With a history of high glucose, monitor your blood sugar closely");
        }

        recs.push("Cut down on refined carbohydrates and sugary drinks");
        recs.push("Keep a regular schedule and get enough sleep");

        cap_recommendations(recs.into_iter().map(String::from).collect())
    }
}

impl Default for FindriscModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience entry point taking plain values.
///
/// The optional answers default to their most favourable values: no blood
/// pressure medication, no glucose history, daily activity, daily fruit and
/// vegetables, no family history.
#[allow(clippy::too_many_arguments)]
pub fn calculate_diabetes_risk(
    age: u32,
    bmi: f64,
    waist_cm: f64,
    sex: &str,
    on_bp_medication: Option<bool>,
    history_high_glucose: Option<bool>,
    daily_physical_activity: Option<bool>,
    daily_fruit_vegetable: Option<bool>,
    family_diabetes: Option<FamilyHistory>,
) -> DiabetesAssessment {
    let sex = match sex.parse::<Sex>() {
        Ok(sex) => sex,
        Err(err) => {
            return FindriscModel::unknown(
                RiskError::invalid_input(RiskModelKind::Diabetes, err).to_string(),
            )
        }
    };

    let defaults = DiabetesRiskInput::with_defaults(age, bmi, waist_cm, sex);
    let input = DiabetesRiskInput {
        on_bp_medication: on_bp_medication.unwrap_or(defaults.on_bp_medication),
        history_high_glucose: history_high_glucose.unwrap_or(defaults.history_high_glucose),
        daily_physical_activity: daily_physical_activity
            .unwrap_or(defaults.daily_physical_activity),
        daily_fruit_vegetable: daily_fruit_vegetable.unwrap_or(defaults.daily_fruit_vegetable),
        family_diabetes: family_diabetes.unwrap_or(defaults.family_diabetes),
        ..defaults
    };

    FindriscModel::new().assess(&input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy(age: u32, sex: Sex) -> DiabetesRiskInput {
        DiabetesRiskInput::with_defaults(age, 22.0, 75.0, sex)
    }

    #[test]
    fn test_age_points() {
        let model = FindriscModel::new();
        let points = |age| model.assess(&healthy(age, Sex::Male)).points_for(FindriscDimension::Age);
        assert_eq!(points(44), 0);
        assert_eq!(points(45), 2);
        assert_eq!(points(54), 2);
        assert_eq!(points(55), 3);
        assert_eq!(points(64), 3);
        assert_eq!(points(65), 4);
    }

    #[test]
    fn test_waist_thresholds_differ_by_sex() {
        let model = FindriscModel::new();
        let points = |waist, sex| {
            model
                .assess(&DiabetesRiskInput::with_defaults(40, 22.0, waist, sex))
                .points_for(FindriscDimension::Waist)
        };
        assert_eq!(points(93.9, Sex::Male), 0);
        assert_eq!(points(94.0, Sex::Male), 3);
        assert_eq!(points(102.0, Sex::Male), 4);
        assert_eq!(points(79.9, Sex::Female), 0);
        assert_eq!(points(80.0, Sex::Female), 3);
        assert_eq!(points(88.0, Sex::Female), 4);
    }

    #[test]
    fn test_low_risk_baseline() {
        let assessment = FindriscModel::new().assess(&healthy(40, Sex::Female));
        assert_eq!(assessment.total_score, 0);
        assert_eq!(assessment.risk_percentage, 1.0);
        assert_eq!(assessment.result.risk_level, RiskLevel::Low);
        assert_eq!(assessment.result.score, 0);
        assert_eq!(assessment.breakdown.len(), 8);
    }

    #[test]
    fn test_tier_boundaries() {
        let model = FindriscModel::new();

        // 2 (age 45) + 5 (glucose) = 7
        let mut input = healthy(45, Sex::Male);
        input.history_high_glucose = true;
        let a = model.assess(&input);
        assert_eq!(a.total_score, 7);
        assert_eq!((a.result.risk_level, a.risk_percentage), (RiskLevel::Low, 4.0));

        // + 5 (first-degree family) = 12
        input.family_diabetes = FamilyHistory::FirstDegree;
        let a = model.assess(&input);
        assert_eq!(a.total_score, 12);
        assert_eq!((a.result.risk_level, a.risk_percentage), (RiskLevel::Medium, 17.0));
        assert_eq!(a.result.score, 46);

        // + 3 (waist 94..101 male) = 15
        input.waist_cm = 96.0;
        let a = model.assess(&input);
        assert_eq!(a.total_score, 15);
        assert_eq!((a.result.risk_level, a.risk_percentage), (RiskLevel::High, 33.0));

        // age 65 (+2), obese (+3), inactive (+2) = 22
        input.age = 65;
        input.bmi = 31.0;
        input.daily_physical_activity = false;
        let a = model.assess(&input);
        assert_eq!(a.total_score, 22);
        assert_eq!((a.result.risk_level, a.risk_percentage), (RiskLevel::High, 50.0));
    }

    #[test]
    fn test_maximum_score() {
        let input = DiabetesRiskInput {
            age: 70,
            bmi: 35.0,
            waist_cm: 110.0,
            sex: Sex::Male,
            on_bp_medication: true,
            history_high_glucose: true,
            daily_physical_activity: false,
            daily_fruit_vegetable: false,
            family_diabetes: FamilyHistory::FirstDegree,
        };
        let assessment = FindriscModel::new().assess(&input);
        assert_eq!(assessment.total_score, FINDRISC_MAX_SCORE);
        assert_eq!(assessment.result.score, 100);
        assert_eq!(assessment.result.recommendations.len(), 8);
    }

    #[test]
    fn test_factor_details() {
        let mut input = DiabetesRiskInput::with_defaults(50, 27.34, 96.0, Sex::Male);
        input.on_bp_medication = true;
        let factors = FindriscModel::new().assess(&input).result.factors;

        assert_eq!(factors[0].name, "Age");
        assert_eq!(factors[1].name, "High BMI (overweight)");
        assert_eq!(factors[1].detail, "BMI 27.3 (recommended <25)");
        assert_eq!(factors[2].detail, "96cm (recommended <94cm)");
        assert_eq!(factors.len(), 8);
        assert_eq!(factors[7].name, "On blood pressure medication");
    }

    #[test]
    fn test_recommendations_follow_factors() {
        let mut input = DiabetesRiskInput::with_defaults(40, 22.0, 75.0, Sex::Female);
        input.daily_fruit_vegetable = false;
        let recs = FindriscModel::new().assess(&input).result.recommendations;
        assert_eq!(
            recs,
            vec![
                "Eat at least 500 g of fruit and vegetables every day".to_string(),
                "Cut down on refined carbohydrates and sugary drinks".to_string(),
                "Keep a regular schedule and get enough sleep".to_string(),
            ]
        );
    }

    #[test]
    fn test_invalid_input_returns_unknown() {
        let input = DiabetesRiskInput::with_defaults(40, 0.0, 80.0, Sex::Male);
        let assessment = FindriscModel::new().assess(&input);
        assert_eq!(assessment.result.risk_level, RiskLevel::Unknown);
        assert_eq!(assessment.total_score, 0);
        assert!(assessment.breakdown.is_empty());
        assert!(FindriscModel::new().try_assess(&input).is_err());
    }

    #[test]
    fn test_convenience_defaults() {
        let assessment =
            calculate_diabetes_risk(50, 26.0, 90.0, "female", None, None, None, None, None);
        // age 2 + bmi 1 + waist 4
        assert_eq!(assessment.total_score, 7);

        let with_family = calculate_diabetes_risk(
            50,
            26.0,
            90.0,
            "female",
            None,
            None,
            None,
            None,
            Some(FamilyHistory::SecondDegree),
        );
        assert_eq!(with_family.total_score, 10);

        let unknown = calculate_diabetes_risk(50, 26.0, 90.0, "?", None, None, None, None, None);
        assert!(unknown.result.is_unknown());
    }
}
