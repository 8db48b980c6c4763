//! Profile module - user demographics and health profile value objects.

mod profile_model;
mod profile_traits;

pub use profile_model::{ExerciseFrequency, Sex, UserDemographics, UserHealthProfile};
pub use profile_traits::HealthProfileRepositoryTrait;
