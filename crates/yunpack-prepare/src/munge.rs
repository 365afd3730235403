//! Replaying plugin-contributed XML edits.
//!
//! Installed plugins record the XML fragments they add to platform files in
//! the platform state file (`<platform>.json`):
//!
//! ```json
//! {
//!   "config_munge": {
//!     "files": {
//!       "config.xml": {
//!         "parents": {
//!           "/*": [{ "xml": "<feature name=\"Device\"/>", "count": 1 }]
//!         }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Because the platform `config.xml` is reset from its template on every
//! prepare, these edits have to be replayed before the project descriptor
//! is merged in.

use crate::{CONFIG_FILE, PrepareError, PrepareResult};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use yunpack_core::Element;

/// Reapplies recorded XML edits to the files they target.
pub trait ConfigMunger {
    /// Replay every recorded edit against the current on-disk files.
    fn reapply_all(&mut self) -> PrepareResult<()>;

    /// Write the edited documents back to disk.
    fn persist(&self) -> PrepareResult<()>;
}

/// A munger with nothing to apply.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMunger;

impl ConfigMunger for NoopMunger {
    fn reapply_all(&mut self) -> PrepareResult<()> {
        Ok(())
    }

    fn persist(&self) -> PrepareResult<()> {
        Ok(())
    }
}

/// One recorded fragment under a parent selector.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MungeFragment {
    pub xml: String,
    #[serde(default = "default_count")]
    pub count: u32,
    /// `;`-separated tags; the fragment is inserted after the last sibling
    /// carrying one of them.
    #[serde(default)]
    pub after: Option<String>,
}

fn default_count() -> u32 {
    1
}

#[derive(Debug, Clone)]
struct FileMunge {
    file: String,
    parents: Vec<(String, Vec<MungeFragment>)>,
}

/// [`ConfigMunger`] backed by the platform state file.
#[derive(Debug)]
pub struct PlatformMunger {
    platform_root: PathBuf,
    config_xml: PathBuf,
    files: Vec<FileMunge>,
    documents: Vec<(PathBuf, Element)>,
}

impl PlatformMunger {
    /// Read the munge state from `platform_json`.
    ///
    /// A missing state file means no plugins have recorded edits.
    pub fn load(
        platform_json: impl AsRef<Path>,
        platform_root: impl Into<PathBuf>,
        config_xml: impl Into<PathBuf>,
    ) -> PrepareResult<Self> {
        let platform_json = platform_json.as_ref();
        let files = if platform_json.exists() {
            let content = std::fs::read_to_string(platform_json)
                .map_err(|e| PrepareError::file_op(platform_json, e))?;
            parse_state(&serde_json::from_str(&content)?)?
        } else {
            debug!("No platform state at {}", platform_json.display());
            Vec::new()
        };

        Ok(Self {
            platform_root: platform_root.into(),
            config_xml: config_xml.into(),
            files,
            documents: Vec::new(),
        })
    }

    /// Number of recorded fragments across all files.
    pub fn fragment_count(&self) -> usize {
        self.files
            .iter()
            .flat_map(|f| f.parents.iter())
            .map(|(_, fragments)| fragments.len())
            .sum()
    }

    fn target_path(&self, file: &str) -> PathBuf {
        if file == CONFIG_FILE {
            self.config_xml.clone()
        } else {
            self.platform_root.join(file)
        }
    }

    fn document_mut(&mut self, path: &Path) -> PrepareResult<Option<&mut Element>> {
        let index = match self.documents.iter().position(|(p, _)| p == path) {
            Some(index) => index,
            None => {
                if !path.exists() {
                    warn!("Munge target {} does not exist, skipping", path.display());
                    return Ok(None);
                }
                let root = Element::from_file(path)?;
                self.documents.push((path.to_path_buf(), root));
                self.documents.len() - 1
            }
        };
        Ok(self.documents.get_mut(index).map(|(_, root)| root))
    }
}

impl ConfigMunger for PlatformMunger {
    fn reapply_all(&mut self) -> PrepareResult<()> {
        self.documents.clear();
        let files = self.files.clone();
        let mut applied = 0usize;

        for munge in &files {
            if !munge.file.ends_with(".xml") {
                debug!("Skipping non-XML munge target {}", munge.file);
                continue;
            }
            let path = self.target_path(&munge.file);
            let Some(root) = self.document_mut(&path)? else {
                continue;
            };

            for (selector, fragments) in &munge.parents {
                for fragment in fragments.iter().filter(|f| f.count > 0) {
                    let children = Element::parse_fragment(&fragment.xml).map_err(|e| {
                        PrepareError::InvalidMunge(format!("{} {selector}: {e}", munge.file))
                    })?;
                    for parent in resolve(root, selector) {
                        graft(parent, &children, fragment.after.as_deref());
                    }
                    applied += 1;
                }
            }
        }

        info!("Reapplied {applied} plugin config fragments");
        Ok(())
    }

    fn persist(&self) -> PrepareResult<()> {
        for (path, root) in &self.documents {
            debug!("Writing munged {}", path.display());
            root.write_file(path)?;
        }
        Ok(())
    }
}

fn parse_state(state: &Value) -> PrepareResult<Vec<FileMunge>> {
    let Some(files) = state.pointer("/config_munge/files") else {
        return Ok(Vec::new());
    };
    let files = files
        .as_object()
        .ok_or_else(|| PrepareError::InvalidMunge("config_munge.files must be an object".into()))?;

    let mut result = Vec::with_capacity(files.len());
    for (file, entry) in files {
        let mut parents = Vec::new();
        if let Some(map) = entry.get("parents").and_then(Value::as_object) {
            for (selector, fragments) in map {
                let fragments: Vec<MungeFragment> = serde_json::from_value(fragments.clone())
                    .map_err(|e| PrepareError::InvalidMunge(format!("{file} {selector}: {e}")))?;
                parents.push((selector.clone(), fragments));
            }
        }
        result.push(FileMunge {
            file: file.clone(),
            parents,
        });
    }
    Ok(result)
}

/// Elements addressed by a parent selector.
///
/// `/*` and `/<root tag>` name the root; further segments descend from it.
/// Selectors without a leading slash are resolved below the root.
fn resolve<'a>(root: &'a mut Element, selector: &str) -> Vec<&'a mut Element> {
    match selector.strip_prefix('/') {
        Some(absolute) => {
            let (head, rest) = absolute.split_once('/').unwrap_or((absolute, ""));
            if head == "*" || head == root.tag() {
                root.find_path_mut(rest)
            } else {
                Vec::new()
            }
        }
        None => root.find_path_mut(selector),
    }
}

fn graft(parent: &mut Element, children: &[Element], after: Option<&str>) {
    for child in children {
        if parent.children().contains(child) {
            continue;
        }

        let anchor = after.and_then(|tags| {
            let tags: Vec<&str> = tags.split(';').map(str::trim).collect();
            parent
                .children()
                .iter()
                .rposition(|c| tags.contains(&c.tag()))
        });

        match anchor {
            Some(index) => parent.children_mut().insert(index + 1, child.clone()),
            None => parent.append(child.clone()),
        }
    }
}
