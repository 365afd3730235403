//! Warning summary for commands

use parking_lot::Mutex;
use std::sync::Arc;
use yunpack_logging::{DiagnosticSink, LogLevel};

/// Captures warnings and errors reaching a diagnostic sink until dropped.
pub struct WarningCollector {
    sink: &'static DiagnosticSink,
    captured: Arc<Mutex<Vec<String>>>,
}

impl WarningCollector {
    /// Collect from the sink fed by the process subscriber.
    pub fn install() -> Self {
        Self::on(DiagnosticSink::global())
    }

    pub fn on(sink: &'static DiagnosticSink) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let store = Arc::clone(&captured);
        sink.set_callback(Some(Arc::new(
            move |level: LogLevel, _target: &str, message: &str| {
                if level >= LogLevel::Warn {
                    store.lock().push(message.to_string());
                }
            },
        )));
        Self { sink, captured }
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.captured.lock())
    }

    /// Print everything collected so far.
    pub fn report(&self) {
        let warnings = self.take();
        if warnings.is_empty() {
            return;
        }
        println!("\n{} warning(s):", warnings.len());
        for warning in &warnings {
            println!("  ! {warning}");
        }
    }
}

impl Drop for WarningCollector {
    fn drop(&mut self) {
        self.sink.set_callback(None);
    }
}
