//! Error types for kmeans3d

use thiserror::Error;

/// Main error type for kmeans3d operations
///
/// The clustering core itself is total over clamped inputs, so errors only
/// surface where configuration or caller-supplied parameters are checked.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for kmeans3d operations
pub type Result<T> = std::result::Result<T, Error>;
