//! Rebuilding the platform configuration file.

use crate::merge::merge_xml;
use crate::munge::ConfigMunger;
use crate::{PrepareError, PrepareResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use yunpack_core::ProjectConfig;

/// Produces the platform `config.xml` from a template, recorded plugin
/// edits and the project descriptor.
#[derive(Debug, Clone)]
pub struct ConfigMerger {
    template: PathBuf,
    target: PathBuf,
    platform: String,
}

impl ConfigMerger {
    pub fn new(
        template: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            template: template.into(),
            target: target.into(),
            platform: platform.into(),
        }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Reset the target from the template, replay plugin edits, then merge
    /// `source` on top with clobber semantics.
    ///
    /// Every run starts from the template, so the result depends only on
    /// the current inputs. A failure after the reset leaves the target
    /// reset but unmerged; the next run repeats all steps.
    pub fn sync(
        &self,
        source: &ProjectConfig,
        munger: &mut dyn ConfigMunger,
    ) -> PrepareResult<ProjectConfig> {
        if !self.template.exists() {
            return Err(PrepareError::MissingSource(self.template.clone()));
        }
        if let Some(parent) = self.target.parent() {
            fs::create_dir_all(parent).map_err(|e| PrepareError::file_op(parent, e))?;
        }

        fs::copy(&self.template, &self.target)
            .map_err(|e| PrepareError::file_op(&self.target, e))?;
        debug!(
            "Reset {} from {}",
            self.target.display(),
            self.template.display()
        );

        munger.reapply_all()?;
        munger.persist()?;

        let mut config = ProjectConfig::load(&self.target)?;
        merge_xml(source.root(), config.root_mut(), Some(&self.platform), true);
        config.write()?;

        info!("Merged project config.xml into {}", self.target.display());
        Ok(config)
    }
}
