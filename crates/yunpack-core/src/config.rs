//! Accessor over a `config.xml` project descriptor

use crate::{ConfigError, ConfigResult, Element};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A project or platform descriptor (`<widget>` document).
///
/// Reads are answered from the in-memory tree; [`ProjectConfig::write`]
/// persists it back to the file it was loaded from.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    path: Option<PathBuf>,
    root: Element,
}

/// An icon or splash declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResource {
    /// Source path, relative to the project root
    pub src: String,

    /// Set when the declaration came from a `<platform>` section
    #[serde(default)]
    pub platform: Option<String>,

    /// Density tag (e.g. `mdpi`)
    #[serde(default)]
    pub density: Option<String>,

    /// Pixel width
    #[serde(default)]
    pub width: Option<u32>,

    /// Pixel height
    #[serde(default)]
    pub height: Option<u32>,

    /// Raw size attribute that is not a pixel count (e.g. `48px`)
    #[serde(default)]
    pub malformed_size: Option<String>,

    #[serde(default)]
    pub target: Option<String>,
}

/// A `<feature>` declaration with its ordered parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    #[serde(default)]
    pub params: Vec<FeatureParam>,
}

/// A single `<param name=".." value=".."/>` of a feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureParam {
    pub name: String,
    pub value: String,
}

impl Feature {
    /// Value of the first param with the given name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

impl ProjectConfig {
    /// Load a descriptor from disk
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let root = Element::from_file(path)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            root,
        })
    }

    /// Parse a descriptor that is not backed by a file
    pub fn parse(xml: &str) -> ConfigResult<Self> {
        Ok(Self {
            path: None,
            root: Element::parse(xml)?,
        })
    }

    pub fn from_root(root: Element) -> Self {
        Self { path: None, root }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Package identifier (`widget@id`), empty when undeclared
    pub fn package_name(&self) -> &str {
        self.root.attr("id").unwrap_or_default()
    }

    /// Human-readable application name (`<name>` text)
    pub fn name(&self) -> &str {
        self.root
            .find("name")
            .and_then(Element::text)
            .map(str::trim)
            .unwrap_or_default()
    }

    /// Semantic version (`widget@version`), empty when undeclared
    pub fn version(&self) -> &str {
        self.root.attr("version").unwrap_or_default()
    }

    /// Preference value; a platform section entry wins over a global one.
    ///
    /// Names match case-insensitively. Absent preferences read as `""`.
    pub fn preference(&self, name: &str, platform: Option<&str>) -> String {
        let platform_value = platform
            .map(|p| {
                find_preference(
                    self.platform_sections(p)
                        .flat_map(|section| section.find_all("preference")),
                    name,
                )
            })
            .unwrap_or_default();

        if !platform_value.is_empty() {
            return platform_value;
        }
        find_preference(self.root.find_all("preference"), name)
    }

    /// Icon declarations: the platform section first, then global ones
    pub fn icons(&self, platform: &str) -> Vec<ImageResource> {
        self.static_resources("icon", platform)
    }

    /// Splash declarations: the platform section first, then global ones
    pub fn splash_screens(&self, platform: &str) -> Vec<ImageResource> {
        self.static_resources("splash", platform)
    }

    /// Feature declarations in document order
    pub fn features(&self) -> Vec<Feature> {
        self.root
            .find_all("feature")
            .map(|feature| {
                let params = feature
                    .find_all("param")
                    .map(|param| FeatureParam {
                        name: param.attr("name").unwrap_or_default().to_string(),
                        value: param.attr("value").unwrap_or_default().to_string(),
                    })
                    .collect();
                Feature {
                    name: feature.attr("name").unwrap_or_default().to_string(),
                    params,
                }
            })
            .collect()
    }

    /// Names of `<uses-permission {ns}:name=".."/>` declarations
    pub fn permissions(&self, namespace: &str) -> Vec<String> {
        self.namespaced_names("uses-permission", namespace)
    }

    /// Names of `<event {ns}:name=".."/>` declarations
    pub fn events(&self, namespace: &str) -> Vec<String> {
        self.namespaced_names("event", namespace)
    }

    /// Check the fields the platform layer depends on
    pub fn validate(&self) -> ConfigResult<()> {
        if self.root.tag() != "widget" {
            return Err(ConfigError::Invalid(format!(
                "root element must be <widget>, found <{}>",
                self.root.tag()
            )));
        }
        if self.package_name().is_empty() {
            return Err(ConfigError::Invalid("widget@id is required".to_string()));
        }
        if self.version().is_empty() {
            return Err(ConfigError::Invalid(
                "widget@version is required".to_string(),
            ));
        }
        if self.name().is_empty() {
            return Err(ConfigError::Invalid("<name> is required".to_string()));
        }
        Ok(())
    }

    /// Persist to the file this descriptor was loaded from
    pub fn write(&self) -> ConfigResult<()> {
        let path = self.path.as_ref().ok_or_else(|| {
            ConfigError::Invalid("descriptor is not backed by a file".to_string())
        })?;
        self.root.write_file(path)
    }

    /// Persist to an explicit path
    pub fn write_to(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        self.root.write_file(path)
    }

    fn platform_sections<'a>(&'a self, platform: &'a str) -> impl Iterator<Item = &'a Element> {
        self.root
            .find_all("platform")
            .filter(move |section| section.attr("name") == Some(platform))
    }

    fn static_resources(&self, tag: &str, platform: &str) -> Vec<ImageResource> {
        let scoped = self
            .platform_sections(platform)
            .flat_map(|section| section.find_all(tag))
            .map(|el| image_resource(el, Some(platform)));
        let global = self.root.find_all(tag).map(|el| image_resource(el, None));
        scoped.chain(global).collect()
    }

    fn namespaced_names(&self, tag: &str, namespace: &str) -> Vec<String> {
        let key = format!("{namespace}:name");
        self.root
            .find_all(tag)
            .filter_map(|el| el.attr(&key))
            .map(str::to_string)
            .collect()
    }
}

fn find_preference<'a>(candidates: impl Iterator<Item = &'a Element>, name: &str) -> String {
    candidates
        .filter(|pref| {
            pref.attr("name")
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
        .find_map(|pref| pref.attr("value"))
        .unwrap_or_default()
        .to_string()
}

fn image_resource(el: &Element, platform: Option<&str>) -> ImageResource {
    let non_empty = |name: &str| el.attr(name).filter(|v| !v.is_empty()).map(str::to_string);
    let pixels = |name: &str| el.attr(name).and_then(|v| v.trim().parse().ok());
    // width takes precedence over height, so only the first declared one counts
    let malformed_size = ["width", "height"]
        .into_iter()
        .find_map(|name| el.attr(name).filter(|v| !v.is_empty()))
        .filter(|size| size.trim().parse::<u32>().is_err())
        .map(str::to_string);

    ImageResource {
        src: el.attr("src").unwrap_or_default().to_string(),
        platform: platform.map(str::to_string),
        density: non_empty("density"),
        width: pixels("width"),
        height: pixels("height"),
        malformed_size,
        target: non_empty("target"),
    }
}
