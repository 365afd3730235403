#![allow(non_snake_case)]

use super::*;

fn parse(xml: &str) -> Element {
    Element::parse(xml).unwrap()
}

fn preferences(el: &Element) -> Vec<(String, String)> {
    el.find_all("preference")
        .map(|p| {
            (
                p.attr("name").unwrap().to_string(),
                p.attr("value").unwrap().to_string(),
            )
        })
        .collect()
}

#[test]
fn merge_xml___clobber___overwrites_root_attributes() {
    let src = parse(r#"<widget id="com.app" version="2.0.0"/>"#);
    let mut dest = parse(r#"<widget id="io.cordova.hello" xmlns:yunos="urn:yunos"/>"#);

    merge_xml(&src, &mut dest, Some("yunos"), true);

    assert_eq!(dest.attr("id"), Some("com.app"));
    assert_eq!(dest.attr("version"), Some("2.0.0"));
    assert_eq!(dest.attr("xmlns:yunos"), Some("urn:yunos"));
}

#[test]
fn merge_xml___no_clobber___only_fills_missing_attributes() {
    let src = parse(r#"<widget id="com.app" version="2.0.0"/>"#);
    let mut dest = parse(r#"<widget id="io.cordova.hello"/>"#);

    merge_xml(&src, &mut dest, None, false);

    assert_eq!(dest.attr("id"), Some("io.cordova.hello"));
    assert_eq!(dest.attr("version"), Some("2.0.0"));
}

#[test]
fn merge_xml___singleton___replaces_existing_name() {
    let src = parse(r#"<widget><name>New Name</name></widget>"#);
    let mut dest = parse(r#"<widget><name>Hello Cordova</name><content src="index.html"/></widget>"#);

    merge_xml(&src, &mut dest, None, true);

    let names: Vec<_> = dest.find_all("name").collect();
    assert_eq!(names.len(), 1);
    assert_eq!(names[0].text(), Some("New Name"));
    assert_eq!(dest.find("content").and_then(|c| c.attr("src")), Some("index.html"));
}

#[test]
fn merge_xml___preferences___source_value_wins_and_no_duplicates() {
    let src = parse(r#"<widget><preference name="Fullscreen" value="true"/></widget>"#);
    let mut dest = parse(
        r#"<widget>
            <preference name="Fullscreen" value="false"/>
            <preference name="Orientation" value="default"/>
        </widget>"#,
    );

    merge_xml(&src, &mut dest, None, true);

    assert_eq!(
        preferences(&dest),
        vec![
            ("Fullscreen".to_string(), "true".to_string()),
            ("Orientation".to_string(), "default".to_string()),
        ]
    );
}

#[test]
fn merge_xml___platform_section___children_merge_into_root() {
    let src = parse(
        r#"<widget>
            <preference name="Orientation" value="portrait"/>
            <platform name="yunos">
                <preference name="Orientation" value="landscape"/>
                <icon src="res/yunos.png"/>
            </platform>
            <platform name="android">
                <icon src="res/android.png"/>
            </platform>
        </widget>"#,
    );
    let mut dest = parse("<widget/>");

    merge_xml(&src, &mut dest, Some("yunos"), true);

    assert!(dest.find("platform").is_none());
    let icons: Vec<_> = dest.find_all("icon").filter_map(|i| i.attr("src")).collect();
    assert_eq!(icons, vec!["res/yunos.png"]);
    assert_eq!(
        preferences(&dest),
        vec![("Orientation".to_string(), "landscape".to_string())]
    );
}

#[test]
fn merge_xml___blacklisted_tags___are_not_copied() {
    let src = parse(
        r#"<widget>
            <feature name="Camera"/>
            <plugin name="cordova-plugin-camera"/>
            <engine name="yunos"/>
        </widget>"#,
    );
    let mut dest = parse(r#"<widget><feature name="Device"/></widget>"#);

    merge_xml(&src, &mut dest, Some("yunos"), true);

    assert_eq!(dest.children().len(), 1);
    assert_eq!(dest.find("feature").and_then(|f| f.attr("name")), Some("Device"));
}

#[test]
fn merge_xml___identical_element___is_not_duplicated() {
    let src = parse(r#"<widget><access origin="*"/></widget>"#);
    let mut dest = parse(r#"<widget><access origin="*"/></widget>"#);

    merge_xml(&src, &mut dest, None, true);

    assert_eq!(dest.find_all("access").count(), 1);
}

#[test]
fn merge_xml___differing_element___is_appended() {
    let src = parse(r#"<widget><allow-navigation href="https://example.com/*"/></widget>"#);
    let mut dest = parse(r#"<widget><allow-navigation href="data:*"/></widget>"#);

    merge_xml(&src, &mut dest, None, true);

    assert_eq!(dest.find_all("allow-navigation").count(), 2);
}

#[test]
fn merge_xml___repeated_merge___adds_nothing_new() {
    let src = parse(
        r#"<widget id="com.app">
            <name>App</name>
            <preference name="A" value="1"/>
            <access origin="*"/>
        </widget>"#,
    );
    let mut dest = parse(r#"<widget><feature name="Device"/></widget>"#);

    merge_xml(&src, &mut dest, Some("yunos"), true);
    merge_xml(&src, &mut dest, Some("yunos"), true);

    assert_eq!(dest.children().len(), 4);
    for tag in ["feature", "name", "preference", "access"] {
        assert_eq!(dest.find_all(tag).count(), 1, "{tag}");
    }
}
