//! Read-modify-write cycles against the on-disk manifest.

use crate::{Manifest, PrepareError, PrepareResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use yunpack_core::ProjectConfig;

/// Applies manifest updates, each as its own load/patch/persist cycle.
#[derive(Debug, Clone)]
pub struct ManifestPatcher {
    path: PathBuf,
}

impl ManifestPatcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the manifest.
    pub fn load(&self) -> PrepareResult<Manifest> {
        if !self.path.exists() {
            return Err(PrepareError::MissingSource(self.path.clone()));
        }
        let content =
            fs::read_to_string(&self.path).map_err(|e| PrepareError::file_op(&self.path, e))?;
        Manifest::from_json(&content).map_err(|e| {
            PrepareError::InvalidManifest(format!("{}: {e}", self.path.display()))
        })
    }

    pub fn save(&self, manifest: &Manifest) -> PrepareResult<()> {
        let json = manifest.to_json()?;
        fs::write(&self.path, json).map_err(|e| PrepareError::file_op(&self.path, e))
    }

    /// Load, apply `patch`, persist.
    pub fn update<F>(&self, patch: F) -> PrepareResult<()>
    where
        F: FnOnce(&mut Manifest),
    {
        let mut manifest = self.load()?;
        patch(&mut manifest);
        self.save(&manifest)
    }

    /// Identity, version, orientation, fullscreen and user agent from the
    /// merged platform configuration.
    pub fn apply_project_settings(&self, config: &ProjectConfig, platform: &str) -> PrepareResult<()> {
        let orientation = config.preference("orientation", Some(platform));
        let fullscreen = config.preference("fullscreen", Some(platform));
        let append = config.preference("AppendUserAgent", Some(platform));
        let override_agent = config.preference("OverrideUserAgent", Some(platform));

        self.update(|manifest| {
            manifest.set_identity(config.package_name(), config.name(), config.version());
            manifest.first_page_mut().display_mut();
            if !manifest.set_orientation(&orientation) && !orientation.is_empty() {
                debug!("Ignoring unsupported orientation preference \"{orientation}\"");
            }
            manifest.set_fullscreen(&fullscreen);
            manifest.set_user_agent(&append, &override_agent);
        })?;

        debug!("Wrote out {platform} manifest.");
        Ok(())
    }

    /// Merge `uses-permission` and `event` declarations of the platform
    /// configuration into the manifest.
    pub fn update_permissions(&self, config: &ProjectConfig, namespace: &str) -> PrepareResult<()> {
        let permissions = config.permissions(namespace);
        let events = config.events(namespace);

        self.update(|manifest| {
            manifest.merge_permissions(&permissions);
            manifest.merge_events(&events);
        })?;

        debug!(
            "Merged {} permission(s) and {} event(s) into manifest",
            permissions.len(),
            events.len()
        );
        Ok(())
    }

    pub fn set_icon(&self, file_name: &str) -> PrepareResult<()> {
        self.update(|manifest| manifest.set_icon(file_name))?;
        debug!("Updating manifest.json for icon.");
        Ok(())
    }

    pub fn set_splash(&self, file_name: &str) -> PrepareResult<()> {
        self.update(|manifest| manifest.set_splash(file_name))?;
        debug!("Updating manifest.json for splash.");
        Ok(())
    }
}

#[cfg(test)]
#[path = "patcher/patcher_tests.rs"]
mod patcher_tests;
