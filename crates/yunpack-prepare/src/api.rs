//! Prepare and clean entry points for a platform.

use crate::assets::AssetSynchronizer;
use crate::config_files::ConfigMerger;
use crate::file_updater::{SyncReport, remove_paths, update_paths};
use crate::locations::{PlatformLocations, PlatformSettings, ProjectLocations, relative_to};
use crate::munge::{ConfigMunger, PlatformMunger};
use crate::patcher::ManifestPatcher;
use crate::resources::{Discarded, ResourceKind, ResourceSelector};
use crate::PrepareResult;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use yunpack_core::{ImageResource, ProjectConfig};

/// Options for [`PlatformApi::clean`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanOptions {
    /// Leave prepared files alone.
    pub no_prepare: bool,
}

/// Outcome of [`PlatformApi::prepare`].
#[derive(Debug, Clone, Default)]
pub struct PrepareReport {
    pub www: SyncReport,
    pub icons: SyncReport,
    pub splashes: SyncReport,
    /// Icon and splash declarations that were not used.
    pub discarded: Vec<Discarded>,
}

/// Outcome of [`PlatformApi::clean`].
#[derive(Debug, Clone, Default)]
pub struct CleanReport {
    pub www: SyncReport,
    pub icons: Vec<PathBuf>,
    pub splashes: Vec<PathBuf>,
}

/// A project paired with one of its platforms.
pub struct PlatformApi {
    platform: String,
    project: ProjectLocations,
    locations: PlatformLocations,
    munger: Box<dyn ConfigMunger>,
}

impl PlatformApi {
    /// Resolve locations for `project_root` and load the recorded plugin
    /// edits of the platform.
    pub fn open(project_root: impl AsRef<Path>, settings: &PlatformSettings) -> PrepareResult<Self> {
        let project_root = project_root.as_ref();
        let locations =
            PlatformLocations::new(project_root, &settings.platform, &settings.locations);
        let munger = PlatformMunger::load(
            &locations.platform_json,
            &locations.root,
            &locations.config_xml,
        )?;

        Ok(Self {
            platform: settings.platform.clone(),
            project: ProjectLocations::new(project_root, &settings.platform),
            locations,
            munger: Box::new(munger),
        })
    }

    /// Replace the munger used during prepare.
    #[must_use]
    pub fn with_munger(mut self, munger: Box<dyn ConfigMunger>) -> Self {
        self.munger = munger;
        self
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn project(&self) -> &ProjectLocations {
        &self.project
    }

    pub fn locations(&self) -> &PlatformLocations {
        &self.locations
    }

    /// Bring the platform directory up to date with the project.
    ///
    /// Steps run strictly in order: config merge, `www` sync, manifest
    /// settings, icons, splash screens, permissions. Any failure aborts the
    /// run; re-running from scratch is always safe.
    pub fn prepare(&mut self, project_config: &ProjectConfig) -> PrepareResult<PrepareReport> {
        let merger = ConfigMerger::new(
            &self.locations.default_config_xml,
            &self.locations.config_xml,
            &self.platform,
        );
        let platform_config = merger.sync(project_config, self.munger.as_mut())?;

        let root = &self.project.root;
        let www = AssetSynchronizer::new(root).sync(
            &relative_to(root, &self.project.www),
            &relative_to(root, &self.locations.platform_www),
            &relative_to(root, &self.project.merges),
            &relative_to(root, &self.locations.www),
        )?;

        let patcher = ManifestPatcher::new(&self.locations.manifest);
        patcher.apply_project_settings(&platform_config, &self.platform)?;

        let (icons, mut discarded) = self.update_resources(
            ResourceKind::Icon,
            &project_config.icons(&self.platform),
            &patcher,
        )?;
        let (splashes, splash_discarded) = self.update_resources(
            ResourceKind::Splash,
            &project_config.splash_screens(&self.platform),
            &patcher,
        )?;
        discarded.extend(splash_discarded);

        patcher.update_permissions(&platform_config, &self.platform)?;

        info!("Prepared {} project successfully", self.platform);
        Ok(PrepareReport {
            www,
            icons,
            splashes,
            discarded,
        })
    }

    /// Remove prepared files.
    ///
    /// Returns `None` without touching anything when `no_prepare` is set or
    /// the platform has no `config.xml` yet.
    pub fn clean(&self, options: &CleanOptions) -> PrepareResult<Option<CleanReport>> {
        if options.no_prepare || !self.locations.config_xml.exists() {
            debug!("Nothing to clean for {}", self.platform);
            return Ok(None);
        }

        let platform_config = ProjectConfig::load(&self.locations.config_xml)?;
        let root = &self.project.root;

        let www = AssetSynchronizer::new(root).clean(&relative_to(root, &self.locations.www))?;
        let icons = self.clean_resources(ResourceKind::Icon, &platform_config.icons(&self.platform))?;
        let splashes = self.clean_resources(
            ResourceKind::Splash,
            &platform_config.splash_screens(&self.platform),
        )?;

        info!(
            "Cleaned {} project: {} icons, {} splash screens",
            self.platform,
            icons.len(),
            splashes.len()
        );
        Ok(Some(CleanReport {
            www,
            icons,
            splashes,
        }))
    }

    fn res_dir(&self) -> PathBuf {
        relative_to(&self.project.root, &self.locations.res)
    }

    fn update_resources(
        &self,
        kind: ResourceKind,
        declarations: &[ImageResource],
        patcher: &ManifestPatcher,
    ) -> PrepareResult<(SyncReport, Vec<Discarded>)> {
        let selection = ResourceSelector::new(kind).select(declarations);
        if selection.is_empty() {
            info!("This app does not have any {} defined", kind.base_name());
            return Ok((SyncReport::default(), selection.discarded().to_vec()));
        }

        let report = update_paths(&selection.resource_map(&self.res_dir()), &self.project.root)?;
        if let Some(file_name) = selection.chosen_file_name() {
            match kind {
                ResourceKind::Icon => patcher.set_icon(&file_name)?,
                ResourceKind::Splash => patcher.set_splash(&file_name)?,
            }
        }
        Ok((report, selection.discarded().to_vec()))
    }

    fn clean_resources(
        &self,
        kind: ResourceKind,
        declarations: &[ImageResource],
    ) -> PrepareResult<Vec<PathBuf>> {
        let targets = ResourceSelector::new(kind).candidate_targets(declarations, &self.res_dir());
        remove_paths(&targets, &self.project.root)
    }
}
