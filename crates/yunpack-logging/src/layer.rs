//! Tracing layer that forwards to the diagnostic sink

use crate::callback::DiagnosticSink;
use crate::reload::{ReloadError, ReloadHandle, level_filter};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};
use yunpack_core::LogLevel;

/// Tracing layer that forwards log events to a [`DiagnosticSink`]
pub struct DiagnosticLayer {
    sink: &'static DiagnosticSink,
}

impl DiagnosticLayer {
    /// Create a layer using the global sink
    pub fn new() -> Self {
        Self {
            sink: DiagnosticSink::global(),
        }
    }

    /// Create a layer with a specific sink
    pub fn with_sink(sink: &'static DiagnosticSink) -> Self {
        Self { sink }
    }

    fn convert_level(level: &Level) -> LogLevel {
        match *level {
            Level::TRACE => LogLevel::Trace,
            Level::DEBUG => LogLevel::Debug,
            Level::INFO => LogLevel::Info,
            Level::WARN => LogLevel::Warn,
            Level::ERROR => LogLevel::Error,
        }
    }
}

impl Default for DiagnosticLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for DiagnosticLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::convert_level(metadata.level());

        if !self.sink.is_enabled(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let message = visitor.message.unwrap_or_default();
        self.sink.log(level, metadata.target(), &message);
    }
}

/// Visitor to extract the message field from tracing events
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" || self.message.is_none() {
            self.message = Some(format!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" || self.message.is_none() {
            self.message = Some(value.to_string());
        }
    }
}

/// Initialize logging for the process.
///
/// Installs a reloadable level filter, an optional `RUST_LOG` filter, a
/// compact stderr formatter and the [`DiagnosticLayer`]. Calling this more
/// than once keeps the first subscriber.
pub fn init_logging(level: LogLevel) {
    use tracing_subscriber::prelude::*;

    let (level_layer, handle) = tracing_subscriber::reload::Layer::new(level_filter(level));

    let env_filter = std::env::var_os(EnvFilter::DEFAULT_ENV)
        .and_then(|_| EnvFilter::try_from_default_env().ok());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr);

    let subscriber = tracing_subscriber::registry()
        .with(level_layer)
        .with(env_filter)
        .with(fmt_layer)
        .with(DiagnosticLayer::new());

    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        ReloadHandle::global().install(handle, level);
        DiagnosticSink::global().set_level(level);
    }
}

/// Change the level of stderr output and the global diagnostic sink.
pub fn set_log_level(level: LogLevel) -> Result<(), ReloadError> {
    ReloadHandle::global().set_level(level)?;
    DiagnosticSink::global().set_level(level);
    Ok(())
}

#[cfg(test)]
#[path = "layer/layer_tests.rs"]
mod layer_tests;
