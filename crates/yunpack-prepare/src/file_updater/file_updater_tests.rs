#![allow(non_snake_case)]

use super::*;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "www/index.html", "base index");
    write(dir.path(), "www/js/app.js", "base app");
    write(dir.path(), "platform_www/js/app.js", "platform app");
    write(dir.path(), "platform_www/cordova.js", "bridge");
    dir
}

fn sources() -> Vec<PathBuf> {
    vec![PathBuf::from("www"), PathBuf::from("platform_www")]
}

#[test]
fn merge_and_update_dir___later_sources_override_earlier() {
    let dir = project();

    let report = merge_and_update_dir(&sources(), Path::new("out"), dir.path()).unwrap();

    assert_eq!(read(dir.path(), "out/index.html"), "base index");
    assert_eq!(read(dir.path(), "out/js/app.js"), "platform app");
    assert_eq!(read(dir.path(), "out/cordova.js"), "bridge");
    assert_eq!(report.copied.len(), 3);
    assert!(report.copied.contains(&PathBuf::from("out/js/app.js")));
}

#[test]
fn merge_and_update_dir___second_run___copies_nothing() {
    let dir = project();
    merge_and_update_dir(&sources(), Path::new("out"), dir.path()).unwrap();

    let report = merge_and_update_dir(&sources(), Path::new("out"), dir.path()).unwrap();

    assert!(report.is_noop());
    assert_eq!(report.unchanged, 3);
}

#[test]
fn merge_and_update_dir___stale_files_and_dirs___are_removed() {
    let dir = project();
    write(dir.path(), "out/old/stale.txt", "stale");
    write(dir.path(), "out/index.html", "outdated");

    let report = merge_and_update_dir(&sources(), Path::new("out"), dir.path()).unwrap();

    assert!(!dir.path().join("out/old").exists());
    assert_eq!(report.deleted, vec![PathBuf::from("out/old/stale.txt")]);
    assert_eq!(read(dir.path(), "out/index.html"), "base index");
}

#[test]
fn merge_and_update_dir___no_sources___empties_target() {
    let dir = project();
    merge_and_update_dir(&sources(), Path::new("out"), dir.path()).unwrap();

    let report = merge_and_update_dir(&[], Path::new("out"), dir.path()).unwrap();

    assert_eq!(report.deleted.len(), 3);
    assert_eq!(fs::read_dir(dir.path().join("out")).unwrap().count(), 0);
}

#[test]
fn merge_and_update_dir___missing_source___is_fatal() {
    let dir = project();

    let result = merge_and_update_dir(
        &[PathBuf::from("nowhere")],
        Path::new("out"),
        dir.path(),
    );

    assert!(matches!(result, Err(PrepareError::MissingSource(_))));
}

#[test]
fn update_paths___copies_and_skips_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "res/icon.png", "png bytes");
    let mut map = ResourceMap::new();
    map.insert(
        PathBuf::from("platforms/yunos/res/default/icon.png"),
        PathBuf::from("res/icon.png"),
    );

    let first = update_paths(&map, dir.path()).unwrap();
    let second = update_paths(&map, dir.path()).unwrap();

    assert_eq!(first.copied.len(), 1);
    assert_eq!(second.unchanged, 1);
    assert_eq!(
        read(dir.path(), "platforms/yunos/res/default/icon.png"),
        "png bytes"
    );
}

#[test]
fn update_paths___missing_source___is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut map = ResourceMap::new();
    map.insert(PathBuf::from("out/icon.png"), PathBuf::from("res/missing.png"));

    let result = update_paths(&map, dir.path());

    match result {
        Err(PrepareError::MissingSource(path)) => {
            assert_eq!(path, PathBuf::from("res/missing.png"))
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn remove_paths___deletes_files_and_prunes_empty_parent() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "res/mdpi/icon.png", "a");
    write(dir.path(), "res/default/icon.png", "b");
    write(dir.path(), "res/default/keep.txt", "c");

    let removed = remove_paths(
        ["res/mdpi/icon.png", "res/default/icon.png", "res/none.png"],
        dir.path(),
    )
    .unwrap();

    assert_eq!(removed.len(), 2);
    assert!(!dir.path().join("res/mdpi").exists());
    assert!(dir.path().join("res/default/keep.txt").exists());
}
