//! yunpack-logging - Tracing setup and diagnostic sink
//!
//! This crate provides:
//! - [`DiagnosticSink`] a level-filtered callback receiving leveled text messages
//! - [`DiagnosticLayer`] tracing layer that forwards events to a sink
//! - [`ReloadHandle`] for changing the log level at runtime
//! - [`init_logging`] installing the stderr formatter plus the above, and
//!   [`set_log_level`] to adjust it afterwards

mod callback;
mod layer;
mod reload;

pub use callback::{DiagnosticCallback, DiagnosticSink};
pub use layer::{DiagnosticLayer, init_logging, set_log_level};
pub use reload::{ReloadError, ReloadHandle};
pub use yunpack_core::LogLevel;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        DiagnosticLayer, DiagnosticSink, LogLevel, ReloadHandle, init_logging, set_log_level,
    };
}
