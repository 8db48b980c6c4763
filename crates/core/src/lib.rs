//! HealthPulse Core - Health analytics domain models, calculators and services.
//!
//! This crate scores chronic-disease risk and analyses health metric
//! histories. It is storage-agnostic: data is loaded through the repository
//! traits, which the host application implements.

pub mod constants;
pub mod errors;
pub mod metrics;
pub mod profile;
pub mod risk;
pub mod trends;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
