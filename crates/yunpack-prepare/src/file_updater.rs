//! Content-aware file copying and directory synchronization.

use crate::locations::relative_to;
use crate::resources::ResourceMap;
use crate::{PrepareError, PrepareResult};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// What a synchronization changed. Paths are relative to the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub copied: Vec<PathBuf>,
    pub unchanged: usize,
    pub deleted: Vec<PathBuf>,
}

impl SyncReport {
    pub fn is_noop(&self) -> bool {
        self.copied.is_empty() && self.deleted.is_empty()
    }
}

/// Make `target` mirror the union of `sources`.
///
/// Later sources override earlier ones file by file. Files are copied only
/// when their content differs. Target files not present in any source are
/// deleted and directories left empty are removed. An empty `sources`
/// list empties `target`. Relative paths are resolved against `root`.
pub fn merge_and_update_dir(
    sources: &[PathBuf],
    target: &Path,
    root: &Path,
) -> PrepareResult<SyncReport> {
    let target = root.join(target);
    let mut wanted: BTreeMap<PathBuf, PathBuf> = BTreeMap::new();

    for source in sources {
        let source = root.join(source);
        if !source.is_dir() {
            return Err(PrepareError::MissingSource(source));
        }
        for entry in WalkDir::new(&source).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }
            let rel = relative_to(&source, entry.path());
            wanted.insert(rel, entry.path().to_path_buf());
        }
    }

    let mut report = SyncReport::default();
    fs::create_dir_all(&target).map_err(|e| PrepareError::file_op(&target, e))?;

    for (rel, src) in &wanted {
        let dest = target.join(rel);
        if copy_if_changed(src, &dest)? {
            debug!("copy {} -> {}", src.display(), dest.display());
            report.copied.push(relative_to(root, &dest));
        } else {
            report.unchanged += 1;
        }
    }

    for entry in WalkDir::new(&target).min_depth(1).contents_first(true) {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_dir() {
            if is_empty_dir(path)? {
                fs::remove_dir(path).map_err(|e| PrepareError::file_op(path, e))?;
            }
            continue;
        }
        if !wanted.contains_key(&relative_to(&target, path)) {
            debug!("delete {}", path.display());
            fs::remove_file(path).map_err(|e| PrepareError::file_op(path, e))?;
            report.deleted.push(relative_to(root, path));
        }
    }

    Ok(report)
}

/// Copy every source of `map` to its target, skipping unchanged files.
///
/// A missing source is fatal. Paths are relative to `root`.
pub fn update_paths(map: &ResourceMap, root: &Path) -> PrepareResult<SyncReport> {
    let mut report = SyncReport::default();
    for (target, source) in map {
        let src = root.join(source);
        if !src.is_file() {
            return Err(PrepareError::MissingSource(source.clone()));
        }
        let dest = root.join(target);
        if copy_if_changed(&src, &dest)? {
            debug!("copy {} -> {}", source.display(), target.display());
            report.copied.push(target.clone());
        } else {
            report.unchanged += 1;
        }
    }
    Ok(report)
}

/// Delete `targets` (relative to `root`) and prune parents left empty.
///
/// Returns the paths that existed and were removed.
pub fn remove_paths<I, P>(targets: I, root: &Path) -> PrepareResult<Vec<PathBuf>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut removed = Vec::new();
    for target in targets {
        let target = target.as_ref();
        let path = root.join(target);
        if !path.is_file() {
            continue;
        }
        fs::remove_file(&path).map_err(|e| PrepareError::file_op(&path, e))?;
        debug!("delete {}", target.display());
        removed.push(target.to_path_buf());

        if let Some(parent) = path.parent()
            && parent != root
            && is_empty_dir(parent)?
        {
            fs::remove_dir(parent).map_err(|e| PrepareError::file_op(parent, e))?;
        }
    }
    Ok(removed)
}

/// Copy `src` over `dest` unless both hold the same bytes.
fn copy_if_changed(src: &Path, dest: &Path) -> PrepareResult<bool> {
    if dest.is_dir() {
        fs::remove_dir_all(dest).map_err(|e| PrepareError::file_op(dest, e))?;
    } else if dest.is_file() && file_digest(src)? == file_digest(dest)? {
        return Ok(false);
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| PrepareError::file_op(parent, e))?;
    }
    fs::copy(src, dest).map_err(|e| PrepareError::file_op(dest, e))?;
    Ok(true)
}

/// Hex-encoded SHA-256 of a file's contents.
fn file_digest(path: &Path) -> PrepareResult<String> {
    let data = fs::read(path).map_err(|e| PrepareError::file_op(path, e))?;
    Ok(hex::encode(Sha256::digest(&data)))
}

fn is_empty_dir(path: &Path) -> PrepareResult<bool> {
    let mut entries = fs::read_dir(path).map_err(|e| PrepareError::file_op(path, e))?;
    Ok(entries.next().is_none())
}

#[cfg(test)]
#[path = "file_updater/file_updater_tests.rs"]
mod file_updater_tests;
