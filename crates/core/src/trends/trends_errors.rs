//! Trend analysis error types.

use thiserror::Error;

/// Errors specific to trend analysis.
///
/// Short or degenerate histories are not errors: the analyzers return
/// "unknown" results for them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrendError {
    /// Configuration validation error.
    #[error("Invalid analytics configuration: {0}")]
    InvalidConfig(String),
}
