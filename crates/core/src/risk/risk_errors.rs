//! Risk assessment error types.

use thiserror::Error;

use super::risk_model::RiskModelKind;
use crate::errors::ValidationError;

/// Errors returned by the strict risk model entry points.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    /// The inputs fall outside the model's documented domain.
    #[error("Invalid input for {model} risk model: {source}")]
    InvalidInput {
        model: RiskModelKind,
        #[source]
        source: ValidationError,
    },
}

impl RiskError {
    /// Creates an InvalidInput error.
    pub fn invalid_input(model: RiskModelKind, source: ValidationError) -> Self {
        Self::InvalidInput { model, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RiskError::invalid_input(
            RiskModelKind::Cardiovascular,
            ValidationError::out_of_range("age", 85.0, 30.0, 79.0),
        );
        assert_eq!(
            err.to_string(),
            "Invalid input for cardiovascular risk model: age must be between 30 and 79, got 85"
        );
    }
}
