//! Merging a project descriptor into the platform configuration.

use yunpack_core::Element;

/// Tags never copied from the source document.
const BLACKLIST: [&str; 4] = ["platform", "feature", "plugin", "engine"];

/// Tags that may occur once; the source element replaces the target one.
const SINGLETONS: [&str; 3] = ["content", "author", "name"];

/// Merge `src` into `dest`.
///
/// With `clobber`, source attributes and text overwrite the target's.
/// Children of `<platform name="{platform}">` sections are merged as if they
/// were direct children of `src`. Non-conflicting target content (such as
/// plugin-contributed elements) is kept. Duplicate `preference` elements are
/// collapsed afterwards, last value winning.
pub fn merge_xml(src: &Element, dest: &mut Element, platform: Option<&str>, clobber: bool) {
    if BLACKLIST.contains(&src.tag()) {
        return;
    }

    for (name, value) in src.attributes() {
        let absent = dest.attr(name).is_none_or(str::is_empty);
        if clobber || absent {
            dest.set_attr(name.clone(), value.clone());
        }
    }

    if let Some(text) = src.text()
        && (clobber || dest.text().is_none())
    {
        dest.set_text(Some(text.to_string()));
    }

    for child in src.children() {
        merge_child(child, dest, platform, clobber);
    }

    if let Some(platform) = platform {
        let sections = src
            .find_all("platform")
            .filter(|section| section.attr("name") == Some(platform));
        for section in sections {
            for child in section.children() {
                merge_child(child, dest, Some(platform), clobber);
            }
        }
    }

    remove_duplicate_preferences(dest);
}

fn merge_child(src_child: &Element, dest: &mut Element, platform: Option<&str>, clobber: bool) {
    let tag = src_child.tag();
    if BLACKLIST.contains(&tag) {
        return;
    }

    let mut dest_child = Element::new(tag);
    let mut should_merge = true;

    if SINGLETONS.contains(&tag) {
        if let Some(index) = dest.children().iter().position(|c| c.tag() == tag) {
            dest_child = dest.remove_child(index);
        }
    } else if let Some(index) = dest
        .children()
        .iter()
        .position(|c| c.tag() == tag && text_match(src_child, c) && attrib_match(src_child, c))
    {
        // An identical element already exists: keep it, do not clobber
        dest_child = dest.remove_child(index);
        should_merge = false;
    }

    merge_xml(src_child, &mut dest_child, platform, clobber && should_merge);
    dest.append(dest_child);
}

fn text_match(a: &Element, b: &Element) -> bool {
    let strip = |el: &Element| -> String {
        el.text()
            .unwrap_or_default()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    };
    let left = strip(a);
    left.is_empty() || left == strip(b)
}

fn attrib_match(a: &Element, b: &Element) -> bool {
    a.attributes().len() == b.attributes().len()
        && a
            .attributes()
            .iter()
            .all(|(name, value)| b.attr(name) == Some(value.as_str()))
}

/// Collapse `<preference name value>` elements to one per name.
///
/// The surviving preferences are re-appended at the end in first-appearance
/// order carrying the last value seen.
fn remove_duplicate_preferences(dest: &mut Element) {
    let is_pref = |el: &Element| {
        el.tag() == "preference" && el.attr("name").is_some() && el.attr("value").is_some()
    };

    let mut merged: Vec<(String, String)> = Vec::new();
    for pref in dest.children().iter().filter(|el| is_pref(*el)) {
        let name = pref.attr("name").unwrap_or_default();
        let value = pref.attr("value").unwrap_or_default();
        match merged.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => merged.push((name.to_string(), value.to_string())),
        }
    }

    if merged.is_empty() {
        return;
    }

    dest.children_mut().retain(|el| !is_pref(el));
    for (name, value) in merged {
        dest.append(
            Element::new("preference")
                .with_attr("name", name)
                .with_attr("value", value),
        );
    }
}

#[cfg(test)]
#[path = "merge/merge_tests.rs"]
mod merge_tests;
