//! Icon and splash screen selection.
//!
//! Declarations are sorted into density buckets, at most one source per
//! bucket. The resulting [`ResourceMap`] maps target paths under the
//! platform resource directory to source paths in the project.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::warn;
use yunpack_core::ImageResource;

/// Target path → source path, both relative to the project root.
pub type ResourceMap = BTreeMap<PathBuf, PathBuf>;

/// Pixel size → density bucket.
const SIZE_TO_DENSITY: [(u32, DensityBucket); 6] = [
    (36, DensityBucket::Ldpi),
    (48, DensityBucket::Mdpi),
    (72, DensityBucket::Hdpi),
    (96, DensityBucket::Xhdpi),
    (144, DensityBucket::Xxhdpi),
    (192, DensityBucket::Xxxhdpi),
];

/// What kind of image a selection is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Icon,
    Splash,
}

impl ResourceKind {
    /// File stem of the copied resource.
    pub fn base_name(&self) -> &'static str {
        match self {
            ResourceKind::Icon => "icon",
            ResourceKind::Splash => "splashScreen",
        }
    }
}

/// A resolution tier; variants are ordered by precedence when a single
/// file name has to represent the whole selection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DensityBucket {
    Default,
    Ldpi,
    Mdpi,
    Hdpi,
    Xhdpi,
    Xxhdpi,
    Xxxhdpi,
    /// A density tag outside the standard table, kept verbatim.
    Named(String),
}

impl DensityBucket {
    /// Parse a density tag; unknown tags become [`DensityBucket::Named`].
    ///
    /// Returns `None` for tags that are not a single plain directory name.
    pub fn parse(tag: &str) -> Option<Self> {
        let bucket = match tag {
            "default" => Self::Default,
            "ldpi" => Self::Ldpi,
            "mdpi" => Self::Mdpi,
            "hdpi" => Self::Hdpi,
            "xhdpi" => Self::Xhdpi,
            "xxhdpi" => Self::Xxhdpi,
            "xxxhdpi" => Self::Xxxhdpi,
            other if is_plain_dir_name(other) => Self::Named(other.to_string()),
            _ => return None,
        };
        Some(bucket)
    }

    /// Bucket for a square pixel size, if it is one of the standard sizes.
    pub fn from_size(size: u32) -> Option<Self> {
        SIZE_TO_DENSITY
            .iter()
            .find(|(px, _)| *px == size)
            .map(|(_, bucket)| bucket.clone())
    }

    /// Directory name under the resource root.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Default => "default",
            Self::Ldpi => "ldpi",
            Self::Mdpi => "mdpi",
            Self::Hdpi => "hdpi",
            Self::Xhdpi => "xhdpi",
            Self::Xxhdpi => "xxhdpi",
            Self::Xxxhdpi => "xxxhdpi",
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for DensityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a declaration was not selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscardReason {
    /// A second declaration without density or size.
    ExtraDefault { kept: String },
    /// Neither a density tag nor a known size.
    Unresolvable,
    /// A density tag that cannot name a bucket directory.
    InvalidDensity { tag: String },
    /// The bucket was already taken.
    BucketTaken { bucket: DensityBucket, kept: String },
}

/// A declaration dropped during selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discarded {
    pub src: String,
    pub reason: DiscardReason,
}

impl fmt::Display for Discarded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            DiscardReason::ExtraDefault { kept } => {
                write!(f, "Found extra default {} (ignoring in favor of {kept})", self.src)
            }
            DiscardReason::Unresolvable => {
                write!(f, "Invalid definition {} (no density or unsupported size)", self.src)
            }
            DiscardReason::InvalidDensity { tag } => {
                write!(f, "Invalid definition {} (bad density \"{tag}\")", self.src)
            }
            DiscardReason::BucketTaken { bucket, kept } => {
                write!(f, "Ignoring {} for {bucket} (already provided by {kept})", self.src)
            }
        }
    }
}

/// Sorts image declarations into density buckets.
#[derive(Debug, Clone, Copy)]
pub struct ResourceSelector {
    kind: ResourceKind,
}

/// Outcome of a selection run.
#[derive(Debug, Clone)]
pub struct ResourceSelection {
    kind: ResourceKind,
    selected: BTreeMap<DensityBucket, ImageResource>,
    discarded: Vec<Discarded>,
}

impl ResourceSelector {
    pub fn new(kind: ResourceKind) -> Self {
        Self { kind }
    }

    /// Select one source per bucket.
    ///
    /// The first declaration without density or size becomes the default.
    /// A bucket keeps the first declaration that claims it unless a later
    /// one comes from a platform section and the holder does not.
    pub fn select(&self, declarations: &[ImageResource]) -> ResourceSelection {
        let mut selected: BTreeMap<DensityBucket, ImageResource> = BTreeMap::new();
        let mut discarded = Vec::new();

        for declaration in declarations {
            let bucket = match bucket_for(declaration) {
                Ok(bucket) => bucket,
                Err(reason) => {
                    discarded.push(Discarded {
                        src: declaration.src.clone(),
                        reason,
                    });
                    continue;
                }
            };

            let Some(existing) = selected.get(&bucket) else {
                selected.insert(bucket, declaration.clone());
                continue;
            };

            if bucket != DensityBucket::Default && outranks(declaration, existing) {
                selected.insert(bucket, declaration.clone());
                continue;
            }

            let kept = existing.src.clone();
            let reason = if bucket == DensityBucket::Default {
                DiscardReason::ExtraDefault { kept }
            } else {
                DiscardReason::BucketTaken { bucket, kept }
            };
            discarded.push(Discarded {
                src: declaration.src.clone(),
                reason,
            });
        }

        for entry in &discarded {
            warn!("{}: {entry}", self.kind.base_name());
        }

        ResourceSelection {
            kind: self.kind,
            selected,
            discarded,
        }
    }

    /// Every target path any of `declarations` could have been copied to,
    /// selected or not.
    pub fn candidate_targets(&self, declarations: &[ImageResource], res_dir: &Path) -> Vec<PathBuf> {
        let mut targets: Vec<PathBuf> = declarations
            .iter()
            .filter_map(|declaration| {
                let bucket = bucket_for(declaration).ok()?;
                Some(
                    res_dir
                        .join(bucket.as_str())
                        .join(file_name(self.kind, &declaration.src)),
                )
            })
            .collect();
        targets.sort();
        targets.dedup();
        targets
    }
}

/// Bucket a declaration claims.
///
/// A declaration with neither density nor size is the default; a size
/// attribute that is present but not a pixel count resolves to nothing.
fn bucket_for(declaration: &ImageResource) -> Result<DensityBucket, DiscardReason> {
    if let Some(tag) = &declaration.density {
        return DensityBucket::parse(tag)
            .ok_or_else(|| DiscardReason::InvalidDensity { tag: tag.clone() });
    }
    if declaration.malformed_size.is_some() {
        return Err(DiscardReason::Unresolvable);
    }
    match declaration.width.or(declaration.height) {
        None => Ok(DensityBucket::Default),
        Some(size) => DensityBucket::from_size(size).ok_or(DiscardReason::Unresolvable),
    }
}

/// A single normal path component without separators.
fn is_plain_dir_name(tag: &str) -> bool {
    let mut components = Path::new(tag).components();
    !tag.contains(['/', '\\'])
        && matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none()
}

fn file_name(kind: ResourceKind, src: &str) -> String {
    let base = kind.base_name();
    match Path::new(src).extension() {
        Some(ext) => format!("{base}.{}", ext.to_string_lossy()),
        None => base.to_string(),
    }
}

/// A platform-scoped declaration outranks a global one.
fn outranks(candidate: &ImageResource, holder: &ImageResource) -> bool {
    candidate.platform.is_some() && holder.platform.is_none()
}

impl ResourceSelection {
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected declarations, by bucket.
    pub fn selected(&self) -> &BTreeMap<DensityBucket, ImageResource> {
        &self.selected
    }

    pub fn discarded(&self) -> &[Discarded] {
        &self.discarded
    }

    /// Source of the default (untagged) declaration.
    pub fn default_source(&self) -> Option<&str> {
        self.selected
            .get(&DensityBucket::Default)
            .map(|r| r.src.as_str())
    }

    /// Target file name for a source: `<base>.<source extension>`.
    pub fn file_name_for(&self, src: &str) -> String {
        file_name(self.kind, src)
    }

    /// File name to record in the manifest.
    ///
    /// The default bucket wins; otherwise the lowest-resolution bucket.
    pub fn chosen_file_name(&self) -> Option<String> {
        self.selected
            .values()
            .next()
            .map(|resource| self.file_name_for(&resource.src))
    }

    /// Target → source map under `res_dir`.
    pub fn resource_map(&self, res_dir: &Path) -> ResourceMap {
        self.selected
            .iter()
            .map(|(bucket, resource)| {
                let target = res_dir
                    .join(bucket.as_str())
                    .join(self.file_name_for(&resource.src));
                (target, PathBuf::from(&resource.src))
            })
            .collect()
    }
}
