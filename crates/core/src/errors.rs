//! Core error types for the health analytics core.
//!
//! This module defines storage-agnostic error types. Errors raised by a
//! storage or transport layer are converted to these types before they reach
//! the services in this crate.

use thiserror::Error;

use crate::risk::RiskError;
use crate::trends::TrendError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the analytics core.
///
/// Calculators never return this type for domain problems: invalid inputs
/// and short histories produce "unknown" results instead. It is used by the
/// services, where collaborators can fail, and by the strict entry points.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Risk assessment failed: {0}")]
    Risk(#[from] RiskError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Errors raised while validating caller-supplied values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be a positive number, got {value}")]
    NotPositive { field: String, value: f64 },

    #[error("Unrecognized value for {field}: '{value}'")]
    UnknownValue { field: String, value: String },
}

impl ValidationError {
    /// Creates an OutOfRange error.
    pub fn out_of_range(field: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            field: field.into(),
            value,
            min,
            max,
        }
    }

    /// Creates a NotPositive error.
    pub fn not_positive(field: impl Into<String>, value: f64) -> Self {
        Self::NotPositive {
            field: field.into(),
            value,
        }
    }

    /// Creates an UnknownValue error.
    pub fn unknown_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownValue {
            field: field.into(),
            value: value.into(),
        }
    }
}

// Trend errors are all configuration problems at the service boundary.
impl From<TrendError> for Error {
    fn from(err: TrendError) -> Self {
        match err {
            TrendError::InvalidConfig(message) => Error::InvalidConfigValue(message),
        }
    }
}
