//! Risk model implementations.
//!
//! This module contains the individual scoring strategies:
//! - Framingham cardiovascular risk
//! - FINDRISC diabetes risk
//! - Metabolic syndrome criteria
//! - Generic fallback heuristic

pub mod cardiovascular;
pub mod diabetes;
pub mod generic;
pub mod metabolic;

// Re-export model implementations
pub use cardiovascular::FraminghamModel;
pub use diabetes::FindriscModel;
pub use generic::GenericRiskModel;
pub use metabolic::MetabolicSyndromeModel;

// Re-export model-specific result types
pub use cardiovascular::CardiovascularAssessment;
pub use diabetes::{DiabetesAssessment, FindriscDimension, ScoreComponent, FINDRISC_MAX_SCORE};
pub use metabolic::{CriterionOutcome, MetabolicAssessment, MetabolicCriterion};

// Re-export convenience entry points
pub use cardiovascular::calculate_cardiovascular_risk;
pub use diabetes::calculate_diabetes_risk;
pub use metabolic::calculate_metabolic_risk;
