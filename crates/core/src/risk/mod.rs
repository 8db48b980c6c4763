//! Risk assessment module.
//!
//! Scores a user's risk of developing a chronic condition with published
//! clinical models:
//!
//! ```text
//! RiskService → RiskModelKind → FraminghamModel | FindriscModel
//!      ↓                        | MetabolicSyndromeModel | GenericRiskModel
//! RiskAssessmentRepository            ↓
//!                              RiskAssessmentResult
//! ```
//!
//! - **Models** (`risk_model.rs`) - Risk levels, factors and results
//! - **Inputs** (`risk_inputs.rs`) - Validated model inputs
//! - **Calculators** (`calculators/`) - The scoring strategies
//! - **Service** (`risk_service.rs`) - Profile mapping and persistence
//!
//! Invalid or incomplete inputs never fail an assessment: they produce a
//! result with `RiskLevel::Unknown`. The `try_assess` methods on the models
//! surface the underlying `RiskError` instead.

pub mod calculators;
pub mod risk_errors;
pub mod risk_inputs;
pub mod risk_model;
pub mod risk_service;
pub mod risk_traits;

pub use calculators::{
    calculate_cardiovascular_risk, calculate_diabetes_risk, calculate_metabolic_risk,
    CardiovascularAssessment, CriterionOutcome, DiabetesAssessment, FindriscDimension,
    FindriscModel, FraminghamModel, GenericRiskModel, MetabolicAssessment, MetabolicCriterion,
    MetabolicSyndromeModel, ScoreComponent, FINDRISC_MAX_SCORE,
};
pub use risk_errors::RiskError;
pub use risk_inputs::{
    CardiovascularRiskInput, DiabetesRiskInput, FamilyHistory, MetabolicRiskInput,
    FRAMINGHAM_MAX_AGE, FRAMINGHAM_MIN_AGE,
};
pub use risk_model::{
    assessment_display_name, NewRiskAssessment, RiskAssessment, RiskAssessmentResult,
    RiskFactor, RiskLevel, RiskModelKind,
};
pub use risk_service::RiskService;
pub use risk_traits::{RiskAssessmentRepositoryTrait, RiskServiceTrait};
