//! Changing the log level after the subscriber is installed
//!
//! The CLI starts logging from its command line flags and switches to the
//! level configured in `yunpack.toml` once the settings file has been read.

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU8, Ordering};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{Registry, reload};
use yunpack_core::LogLevel;

type LevelHandle = reload::Handle<LevelFilter, Registry>;

#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    #[error("logging has not been initialized")]
    NotInstalled,

    #[error("failed to reload level filter: {0}")]
    Subscriber(String),
}

/// The level filter of the installed subscriber.
pub struct ReloadHandle {
    handle: Mutex<Option<LevelHandle>>,
    level: AtomicU8,
}

impl ReloadHandle {
    pub fn new() -> Self {
        Self {
            handle: Mutex::new(None),
            level: AtomicU8::new(LogLevel::Info as u8),
        }
    }

    /// Handle of the process-wide subscriber installed by [`crate::init_logging`].
    pub fn global() -> &'static ReloadHandle {
        static INSTANCE: OnceCell<ReloadHandle> = OnceCell::new();
        INSTANCE.get_or_init(ReloadHandle::new)
    }

    pub(crate) fn install(&self, handle: LevelHandle, level: LogLevel) {
        *self.handle.lock() = Some(handle);
        self.level.store(level as u8, Ordering::SeqCst);
    }

    pub fn is_installed(&self) -> bool {
        self.handle.lock().is_some()
    }

    /// Level currently applied by the filter.
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::SeqCst))
    }

    /// Swap the filter to `level`.
    pub fn set_level(&self, level: LogLevel) -> Result<(), ReloadError> {
        let guard = self.handle.lock();
        let handle = guard.as_ref().ok_or(ReloadError::NotInstalled)?;
        handle
            .reload(level_filter(level))
            .map_err(|e| ReloadError::Subscriber(e.to_string()))?;
        self.level.store(level as u8, Ordering::SeqCst);
        Ok(())
    }
}

impl Default for ReloadHandle {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}
