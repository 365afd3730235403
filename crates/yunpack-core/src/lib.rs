//! yunpack-core - Descriptor model and shared types
//!
//! This crate provides the foundational types used by the yunpack platform layer:
//! - [`Element`] a small owned XML element tree with read/write support
//! - [`ProjectConfig`] accessor over a `config.xml` descriptor
//! - [`version_code`] deriving an integer build code from a version string
//! - [`ConfigError`] for error handling
//! - [`LogLevel`] shared between the logging crate and the CLI

mod config;
mod error;
mod version;
mod xml;

pub use config::{Feature, FeatureParam, ImageResource, ProjectConfig};
pub use error::{ConfigError, ConfigResult};
pub use version::version_code;
pub use xml::Element;

/// Default platform name, also used as the XML attribute namespace.
pub const DEFAULT_PLATFORM: &str = "yunos";

/// Log levels understood by the diagnostic sink
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }

    /// Parse a level name (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" | "verbose" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            "off" => Some(LogLevel::Off),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ConfigError, ConfigResult, Element, Feature, FeatureParam, ImageResource, LogLevel,
        ProjectConfig, version_code,
    };
}
