use async_trait::async_trait;

use crate::errors::Result;
use crate::risk::risk_model::{NewRiskAssessment, RiskAssessment};

/// Trait for risk assessment repository operations
#[async_trait]
pub trait RiskAssessmentRepositoryTrait: Send + Sync {
    async fn save_assessment(&self, assessment: NewRiskAssessment) -> Result<RiskAssessment>;
    /// Stored assessments for a user, in any order.
    async fn get_assessments(&self, user_id: &str) -> Result<Vec<RiskAssessment>>;
}

/// Trait for risk service operations
#[async_trait]
pub trait RiskServiceTrait: Send + Sync {
    /// Runs the model for `assessment_type` against the user's profile and stores the result.
    async fn assess(&self, user_id: &str, assessment_type: &str) -> Result<RiskAssessment>;
    /// Assessments for a user, newest first.
    async fn list_assessments(&self, user_id: &str) -> Result<Vec<RiskAssessment>>;
    async fn get_latest_assessment(
        &self,
        user_id: &str,
        assessment_type: &str,
    ) -> Result<Option<RiskAssessment>>;
}
