//! Platform preparation for yunpack projects
//!
//! This crate turns a platform-agnostic project (a `config.xml` descriptor,
//! a `www/` asset tree and installed plugins) into the native project layout
//! of the platform: a merged platform `config.xml`, a JSON `manifest.json`,
//! density-bucketed icons and splash screens, and a synchronized `www/`.
//!
//! # Platform Layout
//!
//! ```text
//! <project>/
//! ├── config.xml                  # project descriptor
//! ├── www/                        # base web assets
//! ├── merges/yunos/               # optional project-level overrides
//! └── platforms/yunos/
//!     ├── config.xml              # rebuilt from the template every prepare
//!     ├── cordova/defaults.xml    # platform default template
//!     ├── yunos.json              # recorded plugin config munges
//!     ├── manifest.json           # native manifest
//!     ├── platform_www/           # platform-specific web assets
//!     ├── www/                    # synchronized output
//!     └── res/
//!         ├── default/icon.png
//!         └── mdpi/splashScreen.png
//! ```
//!
//! # Example
//!
//! ```no_run
//! use yunpack_core::ProjectConfig;
//! use yunpack_prepare::{PlatformApi, PlatformSettings};
//!
//! let settings = PlatformSettings::load("my-app")?;
//! let mut api = PlatformApi::open("my-app", &settings)?;
//! let project = ProjectConfig::load("my-app/config.xml")?;
//! api.prepare(&project)?;
//! # Ok::<(), yunpack_prepare::PrepareError>(())
//! ```

mod error;
mod file_updater;
mod locations;
mod manifest;
mod merge;
mod patcher;
mod resources;

pub mod api;
pub mod assets;
pub mod config_files;
pub mod munge;

pub use api::{CleanOptions, CleanReport, PlatformApi, PrepareReport};
pub use assets::AssetSynchronizer;
pub use config_files::ConfigMerger;
pub use error::PrepareError;
pub use file_updater::{SyncReport, merge_and_update_dir, remove_paths, update_paths};
pub use locations::{LocationOverrides, PlatformLocations, PlatformSettings, ProjectLocations};
pub use manifest::{Display, Domain, Extension, Field, Manifest, Page, Permission, WebApp};
pub use merge::merge_xml;
pub use munge::{ConfigMunger, NoopMunger, PlatformMunger};
pub use patcher::ManifestPatcher;
pub use resources::{
    DensityBucket, DiscardReason, Discarded, ResourceKind, ResourceMap, ResourceSelection,
    ResourceSelector,
};

/// Result type for prepare operations.
pub type PrepareResult<T> = Result<T, PrepareError>;

/// Project settings file name, looked up in the project root.
pub const SETTINGS_FILE: &str = "yunpack.toml";

/// Manifest file name within the platform root.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Descriptor file name, used both in the project and the platform root.
pub const CONFIG_FILE: &str = "config.xml";
