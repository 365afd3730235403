//! Error types for the plugin registry

use thiserror::Error;
use yunpack_core::ConfigError;

/// Result type alias for registry operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors raised while loading or starting plugin services
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The platform config could not be read
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No service is registered under the name
    #[error("unknown service: {0}")]
    UnknownService(String),

    /// A service is not in a valid state for the requested operation
    #[error("invalid service state: expected {expected}, got {actual}")]
    InvalidState { expected: String, actual: String },

    /// Starting a service failed
    #[error("failed to start service {name}: {reason}")]
    StartFailed { name: String, reason: String },
}
