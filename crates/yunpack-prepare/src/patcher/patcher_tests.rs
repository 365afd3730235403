#![allow(non_snake_case)]

use super::*;
use serde_json::{Value, json};
use tempfile::TempDir;

const MANIFEST: &str = r#"{
    "domain": { "name": "placeholder", "vendor": "acme" },
    "pages": [{ "main": true, "theme": "light" }]
}"#;

fn setup(manifest: &str) -> (TempDir, ManifestPatcher) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    fs::write(&path, manifest).unwrap();
    (dir, ManifestPatcher::new(path))
}

fn read_json(patcher: &ManifestPatcher) -> Value {
    serde_json::from_str(&fs::read_to_string(patcher.path()).unwrap()).unwrap()
}

fn config(preferences: &str) -> ProjectConfig {
    ProjectConfig::parse(&format!(
        r#"<widget id="com.example.hello" version="1.2.3" xmlns:yunos="http://yunos.com">
            <name>Hello</name>
            {preferences}
        </widget>"#
    ))
    .unwrap()
}

#[test]
fn ManifestPatcher___load___missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let patcher = ManifestPatcher::new(dir.path().join("manifest.json"));

    let result = patcher.load();

    assert!(matches!(result, Err(PrepareError::MissingSource(_))));
}

#[test]
fn ManifestPatcher___load___malformed_json_is_invalid_manifest() {
    let (_dir, patcher) = setup("{ not json");

    let result = patcher.load();

    assert!(matches!(result, Err(PrepareError::InvalidManifest(_))));
}

#[test]
fn ManifestPatcher___apply_project_settings___writes_all_fields() {
    let (_dir, patcher) = setup(MANIFEST);
    let config = config(
        r#"<preference name="Orientation" value="all" />
           <preference name="Fullscreen" value="true" />
           <preference name="OverrideUserAgent" value="Custom/1.0" />"#,
    );

    patcher.apply_project_settings(&config, "yunos").unwrap();

    let json = read_json(&patcher);
    assert_eq!(json["domain"]["name"], json!("com.example.hello"));
    assert_eq!(json["domain"]["version"], json!("1.2.3"));
    assert_eq!(json["domain"]["version_code"], json!(10203));
    assert_eq!(json["domain"]["vendor"], json!("acme"));
    assert_eq!(json["pages"][0]["uri"], json!("page://com.example.hello/Hello"));
    assert_eq!(json["pages"][0]["display"]["orientation"], json!("auto"));
    assert_eq!(json["pages"][0]["display"]["fullscreen"], json!(true));
    assert_eq!(
        json["pages"][0]["extension"]["web_app"]["override_user_agent"],
        json!("Custom/1.0")
    );
    assert_eq!(json["pages"][0]["theme"], json!("light"));
}

#[test]
fn ManifestPatcher___apply_project_settings___creates_display_without_preferences() {
    let (_dir, patcher) = setup(MANIFEST);

    patcher.apply_project_settings(&config(""), "yunos").unwrap();

    let json = read_json(&patcher);
    assert_eq!(json["pages"][0]["display"], json!({ "fullscreen": false }));
    assert!(json["pages"][0].get("extension").is_none());
}

#[test]
fn ManifestPatcher___user_agent___cleared_on_second_run() {
    let (_dir, patcher) = setup(MANIFEST);
    let with_agent = config(r#"<preference name="AppendUserAgent" value="Suffix/1.0" />"#);

    patcher.apply_project_settings(&with_agent, "yunos").unwrap();
    patcher.apply_project_settings(&config(""), "yunos").unwrap();

    let json = read_json(&patcher);
    let web_app = &json["pages"][0]["extension"]["web_app"];
    assert!(web_app.get("append_user_agent").is_none());
    assert!(web_app.get("override_user_agent").is_none());
}

#[test]
fn ManifestPatcher___update_permissions___twice_has_no_duplicates() {
    let (_dir, patcher) = setup(MANIFEST);
    let config = config(
        r#"<uses-permission yunos:name="yunos.permission.NETWORK" />
           <uses-permission yunos:name="yunos.permission.CAMERA" />
           <event yunos:name="battery" />"#,
    );

    patcher.update_permissions(&config, "yunos").unwrap();
    let first = fs::read_to_string(patcher.path()).unwrap();
    patcher.update_permissions(&config, "yunos").unwrap();
    let second = fs::read_to_string(patcher.path()).unwrap();

    assert_eq!(first, second);
    let json = read_json(&patcher);
    assert_eq!(
        json["domain"]["permission"]["use_permission"],
        json!(["yunos.permission.NETWORK", "yunos.permission.CAMERA"])
    );
    assert_eq!(json["pages"][0]["events"], json!([{ "name": "battery" }]));
}

#[test]
fn ManifestPatcher___set_icon___writes_file_name_only() {
    let (_dir, patcher) = setup(MANIFEST);

    patcher.set_icon("icon.png").unwrap();
    patcher.set_splash("splashScreen.png").unwrap();

    let json = read_json(&patcher);
    assert_eq!(json["pages"][0]["icon"], json!("icon.png"));
    assert_eq!(json["pages"][0]["splash"], json!("splashScreen.png"));
}

#[test]
fn ManifestPatcher___set_icon___keeps_null_fields_of_other_pages() {
    let (_dir, patcher) = setup(r#"{"pages":[{"uri":"u"},{"uri":"v","icon":null}]}"#);

    patcher.set_icon("icon.png").unwrap();

    let json = read_json(&patcher);
    assert_eq!(json["pages"][0]["icon"], json!("icon.png"));
    assert_eq!(json["pages"][1], json!({ "uri": "v", "icon": null }));
}

#[test]
fn ManifestPatcher___set_icon___tolerates_mistyped_secondary_page() {
    let secondary = json!({ "uri": "v", "main": "yes", "display": { "fullscreen": "no" } });
    let (_dir, patcher) = setup(&json!({ "pages": [{ "uri": "u" }, secondary.clone()] }).to_string());

    patcher.set_icon("icon.png").unwrap();
    patcher
        .update_permissions(&config(r#"<event yunos:name="battery" />"#), "yunos")
        .unwrap();

    let json = read_json(&patcher);
    assert_eq!(json["pages"][1], secondary);
    assert_eq!(json["pages"][0]["icon"], json!("icon.png"));
}
