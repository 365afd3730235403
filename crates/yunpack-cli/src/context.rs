//! Project root, settings and log level for a CLI invocation

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing::debug;
use yunpack_core::LogLevel;
use yunpack_prepare::{PlatformLocations, PlatformSettings};

pub struct Context {
    pub root: PathBuf,
    pub settings: PlatformSettings,
    pub log_level: LogLevel,
}

impl Context {
    /// Read `yunpack.toml` from the project root and apply CLI overrides.
    pub fn load(project: Option<PathBuf>, log_level: Option<&str>, verbose: bool) -> Result<Self> {
        let root = project.unwrap_or_else(|| PathBuf::from("."));
        let settings = PlatformSettings::load(&root)
            .with_context(|| format!("Failed to load settings from {}", root.display()))?;
        let log_level = resolve_level(verbose, log_level, &settings.log_level)?;
        debug!(
            "Project {} targets {} at log level {log_level:?}",
            root.display(),
            settings.platform
        );

        Ok(Self {
            root,
            settings,
            log_level,
        })
    }

    pub fn locations(&self) -> PlatformLocations {
        PlatformLocations::new(
            &self.root,
            &self.settings.platform,
            &self.settings.locations,
        )
    }
}

/// `--verbose` wins over `--log-level`, which wins over the settings file.
pub fn resolve_level(verbose: bool, flag: Option<&str>, configured: &str) -> Result<LogLevel> {
    if verbose {
        return Ok(LogLevel::Debug);
    }
    let name = flag.unwrap_or(configured);
    LogLevel::parse(name).with_context(|| format!("Unknown log level: {name}"))
}

#[cfg(test)]
#[path = "context/context_tests.rs"]
mod context_tests;
