//! Risk service implementation.
//!
//! Builds model inputs from a user's profile, dispatches to the model for the
//! requested assessment type, and stores the result.

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;

use super::calculators::{FindriscModel, FraminghamModel, GenericRiskModel, MetabolicSyndromeModel};
use super::risk_inputs::{
    CardiovascularRiskInput, DiabetesRiskInput, FamilyHistory, MetabolicRiskInput,
};
use super::risk_model::{
    assessment_display_name, NewRiskAssessment, RiskAssessment, RiskAssessmentResult,
    RiskModelKind,
};
use super::risk_traits::{RiskAssessmentRepositoryTrait, RiskServiceTrait};
use crate::constants::HIGH_FASTING_GLUCOSE;
use crate::errors::{Error, Result};
use crate::profile::{HealthProfileRepositoryTrait, Sex, UserDemographics, UserHealthProfile};

// Population defaults for profile fields that have not been recorded yet
const DEFAULT_AGE: u32 = 40;
const DEFAULT_SEX: Sex = Sex::Male;
const DEFAULT_TOTAL_CHOLESTEROL: f64 = 200.0;
const DEFAULT_HDL_CHOLESTEROL: f64 = 50.0;
const DEFAULT_SYSTOLIC_BP: f64 = 120.0;
const DEFAULT_DIASTOLIC_BP: f64 = 80.0;
const DEFAULT_BMI: f64 = 24.0;
const DEFAULT_WAIST_CM: f64 = 85.0;
const DEFAULT_TRIGLYCERIDES: f64 = 120.0;
const DEFAULT_FASTING_GLUCOSE: f64 = 5.0;

/// Service for running and storing risk assessments.
pub struct RiskService {
    profile_repository: Arc<dyn HealthProfileRepositoryTrait>,
    assessment_repository: Arc<dyn RiskAssessmentRepositoryTrait>,
    framingham: FraminghamModel,
    findrisc: FindriscModel,
    metabolic: MetabolicSyndromeModel,
    generic: GenericRiskModel,
}

impl RiskService {
    /// Creates a new RiskService instance
    pub fn new(
        profile_repository: Arc<dyn HealthProfileRepositoryTrait>,
        assessment_repository: Arc<dyn RiskAssessmentRepositoryTrait>,
    ) -> Self {
        Self {
            profile_repository,
            assessment_repository,
            framingham: FraminghamModel::new(),
            findrisc: FindriscModel::new(),
            metabolic: MetabolicSyndromeModel::new(),
            generic: GenericRiskModel::new(),
        }
    }

    /// Runs the model for `assessment_type` without touching storage.
    ///
    /// The dedicated models need a health profile; without one they return
    /// an "incomplete profile" result. The generic fallback works from
    /// demographics alone.
    pub fn evaluate(
        &self,
        assessment_type: &str,
        demographics: &UserDemographics,
        profile: Option<&UserHealthProfile>,
    ) -> RiskAssessmentResult {
        let kind = RiskModelKind::from_assessment_type(assessment_type);

        let profile = match (kind, profile) {
            (RiskModelKind::Generic, _) => {
                return self.generic.assess(demographics.age, profile);
            }
            (_, Some(profile)) => profile,
            (_, None) => {
                debug!(
                    "No health profile for user {}, skipping {} model",
                    demographics.user_id, kind
                );
                return RiskAssessmentResult::incomplete_profile(kind, assessment_type);
            }
        };

        match kind {
            RiskModelKind::Cardiovascular => self
                .framingham
                .assess(&cardiovascular_input(demographics, profile))
                .into(),
            RiskModelKind::Diabetes => self
                .findrisc
                .assess(&diabetes_input(demographics, profile))
                .into(),
            RiskModelKind::Metabolic => self
                .metabolic
                .assess(&metabolic_input(demographics, profile))
                .into(),
            RiskModelKind::Generic => self.generic.assess(demographics.age, Some(profile)),
        }
    }
}

#[async_trait]
impl RiskServiceTrait for RiskService {
    async fn assess(&self, user_id: &str, assessment_type: &str) -> Result<RiskAssessment> {
        let demographics = self
            .profile_repository
            .get_user_demographics(user_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("User {}", user_id)))?;
        let profile = self.profile_repository.get_health_profile(user_id).await?;

        let result = self.evaluate(assessment_type, &demographics, profile.as_ref());
        info!(
            "Risk assessment '{}' for user {}: {} (score {})",
            assessment_type, user_id, result.risk_level, result.score
        );

        self.assessment_repository
            .save_assessment(NewRiskAssessment {
                user_id: user_id.to_string(),
                assessment_type: assessment_type.to_string(),
                name: assessment_display_name(assessment_type).to_string(),
                assessed_at: Utc::now(),
                result,
            })
            .await
    }

    async fn list_assessments(&self, user_id: &str) -> Result<Vec<RiskAssessment>> {
        let mut assessments = self.assessment_repository.get_assessments(user_id).await?;
        assessments.sort_by(|a, b| b.assessed_at.cmp(&a.assessed_at));
        Ok(assessments)
    }

    async fn get_latest_assessment(
        &self,
        user_id: &str,
        assessment_type: &str,
    ) -> Result<Option<RiskAssessment>> {
        let assessments = self.assessment_repository.get_assessments(user_id).await?;
        Ok(assessments
            .into_iter()
            .filter(|a| a.assessment_type == assessment_type)
            .max_by_key(|a| a.assessed_at))
    }
}

// =============================================================================
// Profile Mapping
// =============================================================================

/// Profile values of 0 mean the field was never filled in.
fn recorded_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| *v > 0.0).unwrap_or(default)
}

fn cardiovascular_input(
    demographics: &UserDemographics,
    profile: &UserHealthProfile,
) -> CardiovascularRiskInput {
    CardiovascularRiskInput {
        age: demographics.age.filter(|age| *age > 0).unwrap_or(DEFAULT_AGE),
        sex: demographics.sex.unwrap_or(DEFAULT_SEX),
        total_cholesterol: recorded_or(profile.total_cholesterol, DEFAULT_TOTAL_CHOLESTEROL),
        hdl_cholesterol: recorded_or(profile.hdl_cholesterol, DEFAULT_HDL_CHOLESTEROL),
        systolic_bp: recorded_or(profile.systolic_bp, DEFAULT_SYSTOLIC_BP),
        on_bp_medication: profile.on_bp_medication,
        is_smoker: profile.is_smoker,
        has_diabetes: profile.has_diabetes,
    }
}

fn diabetes_input(demographics: &UserDemographics, profile: &UserHealthProfile) -> DiabetesRiskInput {
    DiabetesRiskInput {
        age: demographics.age.filter(|age| *age > 0).unwrap_or(DEFAULT_AGE),
        bmi: profile.effective_bmi().unwrap_or(DEFAULT_BMI),
        waist_cm: recorded_or(profile.waist_cm, DEFAULT_WAIST_CM),
        sex: demographics.sex.unwrap_or(DEFAULT_SEX),
        on_bp_medication: profile.on_bp_medication,
        history_high_glucose: profile
            .fasting_glucose
            .is_some_and(|g| g >= HIGH_FASTING_GLUCOSE),
        daily_physical_activity: profile.exercises_regularly(),
        daily_fruit_vegetable: profile.daily_fruit_vegetable.unwrap_or(true),
        family_diabetes: if profile.family_diabetes {
            FamilyHistory::FirstDegree
        } else {
            FamilyHistory::None
        },
    }
}

fn metabolic_input(demographics: &UserDemographics, profile: &UserHealthProfile) -> MetabolicRiskInput {
    MetabolicRiskInput {
        waist_cm: recorded_or(profile.waist_cm, DEFAULT_WAIST_CM),
        sex: demographics.sex.unwrap_or(DEFAULT_SEX),
        triglycerides: recorded_or(profile.triglycerides, DEFAULT_TRIGLYCERIDES),
        hdl_cholesterol: recorded_or(profile.hdl_cholesterol, DEFAULT_HDL_CHOLESTEROL),
        systolic_bp: recorded_or(profile.systolic_bp, DEFAULT_SYSTOLIC_BP),
        diastolic_bp: recorded_or(profile.diastolic_bp, DEFAULT_DIASTOLIC_BP),
        fasting_glucose: recorded_or(profile.fasting_glucose, DEFAULT_FASTING_GLUCOSE),
        on_bp_medication: profile.on_bp_medication,
        // Lipid medication is not recorded in the profile
        on_lipid_medication: false,
        on_glucose_medication: profile.has_diabetes,
    }
}
