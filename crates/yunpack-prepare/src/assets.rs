//! Web asset synchronization.

use crate::PrepareResult;
use crate::file_updater::{SyncReport, merge_and_update_dir};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Keeps the platform `www/` in step with the project's asset directories.
#[derive(Debug, Clone)]
pub struct AssetSynchronizer {
    project_root: PathBuf,
}

impl AssetSynchronizer {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    /// Ordered source list: base `www`, the platform overlay, then the
    /// project's `merges/<platform>` directory when it exists.
    pub fn source_dirs(&self, base_www: &Path, platform_www: &Path, merges: &Path) -> Vec<PathBuf> {
        let mut sources = vec![base_www.to_path_buf(), platform_www.to_path_buf()];
        if self.project_root.join(merges).is_dir() {
            sources.push(merges.to_path_buf());
        } else {
            debug!("No merges directory at {}", merges.display());
        }
        sources
    }

    /// Synchronize `target` against the source list.
    pub fn sync(
        &self,
        base_www: &Path,
        platform_www: &Path,
        merges: &Path,
        target: &Path,
    ) -> PrepareResult<SyncReport> {
        let sources = self.source_dirs(base_www, platform_www, merges);
        let report = merge_and_update_dir(&sources, target, &self.project_root)?;
        info!(
            "Updated {}: {} copied, {} unchanged, {} deleted",
            target.display(),
            report.copied.len(),
            report.unchanged,
            report.deleted.len()
        );
        Ok(report)
    }

    /// Remove every file from `target`.
    pub fn clean(&self, target: &Path) -> PrepareResult<SyncReport> {
        let report = merge_and_update_dir(&[], target, &self.project_root)?;
        info!("Cleaned {}: {} deleted", target.display(), report.deleted.len());
        Ok(report)
    }
}
