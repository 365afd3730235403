//! Error types for prepare operations.

use std::path::PathBuf;
use thiserror::Error;
use yunpack_core::ConfigError;

/// Errors that can occur while preparing or cleaning a platform.
#[derive(Debug, Error)]
pub enum PrepareError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific path.
    #[error("I/O error at {}: {source}", path.display())]
    FileOp {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Descriptor read/write error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Settings file could not be parsed.
    #[error("Settings error: {0}")]
    Settings(#[from] toml::de::Error),

    /// Directory traversal error.
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// A required input file or directory does not exist.
    #[error("Source path does not exist: {}", .0.display())]
    MissingSource(PathBuf),

    /// Manifest structure error.
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// Recorded plugin munge could not be applied.
    #[error("Invalid config munge: {0}")]
    InvalidMunge(String),
}

impl PrepareError {
    /// Wrap an I/O error with the path it concerns.
    pub fn file_op(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PrepareError::FileOp {
            path: path.into(),
            source,
        }
    }
}
