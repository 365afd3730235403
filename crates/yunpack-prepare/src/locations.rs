//! Project settings and on-disk locations

use crate::{CONFIG_FILE, MANIFEST_FILE, PrepareError, PrepareResult, SETTINGS_FILE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use yunpack_core::DEFAULT_PLATFORM;

/// Settings read from `yunpack.toml` in the project root.
///
/// Every field is optional; a missing file yields the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformSettings {
    /// Platform name, also the XML attribute namespace (default: "yunos")
    #[serde(default = "default_platform")]
    pub platform: String,

    /// Initial log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Path overrides, relative to the platform root
    #[serde(default)]
    pub locations: LocationOverrides,
}

/// Optional overrides for the fixed platform-relative paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationOverrides {
    #[serde(default)]
    pub config_xml: Option<PathBuf>,
    #[serde(default)]
    pub default_config_xml: Option<PathBuf>,
    #[serde(default)]
    pub www: Option<PathBuf>,
    #[serde(default)]
    pub platform_www: Option<PathBuf>,
    #[serde(default)]
    pub res: Option<PathBuf>,
    #[serde(default)]
    pub manifest: Option<PathBuf>,
    #[serde(default)]
    pub platform_json: Option<PathBuf>,
}

fn default_platform() -> String {
    DEFAULT_PLATFORM.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            platform: default_platform(),
            log_level: default_log_level(),
            locations: LocationOverrides::default(),
        }
    }
}

impl PlatformSettings {
    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> PrepareResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `yunpack.toml` from a project root, falling back to defaults
    pub fn load(project_root: impl AsRef<Path>) -> PrepareResult<Self> {
        let path = project_root.as_ref().join(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).map_err(|e| PrepareError::file_op(&path, e))?;
        Self::from_toml(&content)
    }
}

/// Locations on the project side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLocations {
    pub root: PathBuf,
    pub config_xml: PathBuf,
    pub www: PathBuf,
    /// `merges/<platform>`; only used when it exists
    pub merges: PathBuf,
}

impl ProjectLocations {
    pub fn new(root: impl Into<PathBuf>, platform: &str) -> Self {
        let root = root.into();
        Self {
            config_xml: root.join(CONFIG_FILE),
            www: root.join("www"),
            merges: root.join("merges").join(platform),
            root,
        }
    }
}

/// Locations inside the platform directory (`platforms/<platform>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformLocations {
    pub root: PathBuf,
    /// Materialized platform configuration
    pub config_xml: PathBuf,
    /// Template the platform configuration is reset from
    pub default_config_xml: PathBuf,
    pub www: PathBuf,
    pub platform_www: PathBuf,
    pub res: PathBuf,
    pub manifest: PathBuf,
    /// Recorded plugin munges
    pub platform_json: PathBuf,
}

impl PlatformLocations {
    pub fn new(project_root: &Path, platform: &str, overrides: &LocationOverrides) -> Self {
        let root = project_root.join("platforms").join(platform);
        let pick = |value: &Option<PathBuf>, fallback: &str| {
            root.join(value.as_deref().unwrap_or(Path::new(fallback)))
        };

        Self {
            config_xml: pick(&overrides.config_xml, CONFIG_FILE),
            default_config_xml: pick(&overrides.default_config_xml, "cordova/defaults.xml"),
            www: pick(&overrides.www, "www"),
            platform_www: pick(&overrides.platform_www, "platform_www"),
            res: pick(&overrides.res, "res"),
            manifest: pick(&overrides.manifest, MANIFEST_FILE),
            platform_json: pick(&overrides.platform_json, &format!("{platform}.json")),
            root,
        }
    }
}

/// Express `path` relative to `root` when it lies underneath it.
pub(crate) fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
