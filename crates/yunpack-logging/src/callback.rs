//! Diagnostic sink management

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use yunpack_core::LogLevel;

/// Callback receiving `(level, target, message)` for every enabled event
pub type DiagnosticCallback = Arc<dyn Fn(LogLevel, &str, &str) + Send + Sync>;

/// Global diagnostic sink
static DIAGNOSTIC_SINK: OnceCell<DiagnosticSink> = OnceCell::new();

/// Level-filtered holder for a diagnostic callback.
///
/// Embedding build tools register a callback here to receive the same
/// messages the CLI prints to stderr.
pub struct DiagnosticSink {
    callback: RwLock<Option<DiagnosticCallback>>,
    level: AtomicU8,
}

impl DiagnosticSink {
    /// Create a new sink with no callback and level `Info`
    pub fn new() -> Self {
        Self {
            callback: RwLock::new(None),
            level: AtomicU8::new(LogLevel::Info as u8),
        }
    }

    /// Get the global sink instance
    pub fn global() -> &'static DiagnosticSink {
        DIAGNOSTIC_SINK.get_or_init(DiagnosticSink::new)
    }

    /// Set or clear the callback
    pub fn set_callback(&self, callback: Option<DiagnosticCallback>) {
        *self.callback.write() = callback;
    }

    pub fn get_callback(&self) -> Option<DiagnosticCallback> {
        self.callback.read().clone()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::SeqCst))
    }

    /// Check if a log level is enabled
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= self.level()
    }

    /// Invoke the callback if set and the level is enabled
    pub fn log(&self, level: LogLevel, target: &str, message: &str) {
        if !self.is_enabled(level) {
            return;
        }

        // Clone out of the lock so the callback may itself log
        let Some(callback) = self.get_callback() else {
            return;
        };

        callback(level, target, message);
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}
