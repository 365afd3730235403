//! Error types for descriptor access

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for descriptor operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while reading or writing XML descriptors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Descriptor file does not exist
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// XML syntax error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Document has no root element
    #[error("XML document has no root element")]
    MissingRoot,

    /// Document is well-formed but not a usable descriptor
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<quick_xml::events::attributes::AttrError> for ConfigError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        ConfigError::Xml(err.into())
    }
}
