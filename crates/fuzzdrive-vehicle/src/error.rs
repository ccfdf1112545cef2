//! Error types for vehicle control

use fuzzdrive_engine::{ConfigError, FuzzyError};
use thiserror::Error;

/// Result type alias for vehicle operations
pub type Result<T> = std::result::Result<T, VehicleError>;

/// Errors that can occur while building or driving the controller
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VehicleError {
    /// Inference failed or the rule base is inconsistent
    #[error(transparent)]
    Fuzzy(#[from] FuzzyError),

    /// Configuration failed validation
    #[error("Invalid vehicle configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed or serialized
    #[error("Configuration format error: {0}")]
    Format(String),

    /// Unrecognized system name
    #[error("Unknown system '{0}' (expected braking, steering or acceleration)")]
    UnknownSystem(String),
}

impl From<ConfigError> for VehicleError {
    fn from(err: ConfigError) -> Self {
        VehicleError::Fuzzy(FuzzyError::Config(err))
    }
}
