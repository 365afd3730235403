//! Native `manifest.json` model.
//!
//! Every object carries a flattened `extra` map so fields the platform layer
//! does not address survive a read-modify-write cycle. Addressed fields are
//! [`Field`] slots: a value of an unexpected type (including `null`) is kept
//! verbatim until a patch step overwrites it, and a cleared slot is omitted
//! on write.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value, json};

/// Orientation preference values and their manifest equivalents.
const ORIENTATIONS: [(&str, &str); 4] = [
    ("all", "auto"),
    ("default", "default"),
    ("landscape", "landscape_left"),
    ("portrait", "portrait"),
];

/// A manifest field as found on disk.
///
/// Holds either the typed value, the raw JSON of a value that did not have
/// the expected type (`null` included), or nothing when the key is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<T> {
    typed: Option<T>,
    raw: Option<Value>,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self {
            typed: None,
            raw: None,
        }
    }
}

impl<T> Field<T> {
    pub fn new(value: T) -> Self {
        Self {
            typed: Some(value),
            raw: None,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.typed.is_none() && self.raw.is_none()
    }

    /// The typed value, if the field holds one.
    pub fn get(&self) -> Option<&T> {
        self.typed.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.typed.as_mut()
    }

    /// The value as read when it did not have the expected type.
    pub fn raw(&self) -> Option<&Value> {
        self.raw.as_ref()
    }

    pub fn set(&mut self, value: T) {
        self.raw = None;
        self.typed = Some(value);
    }

    /// Remove the key on the next write.
    pub fn clear(&mut self) {
        self.raw = None;
        self.typed = None;
    }

    /// The typed value, replacing an absent or mistyped one with `f()`.
    pub fn get_or_insert_with(&mut self, f: impl FnOnce() -> T) -> &mut T {
        self.raw = None;
        self.typed.get_or_insert_with(f)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match (&self.typed, &self.raw) {
            (Some(value), _) => value.serialize(serializer),
            (None, Some(raw)) => raw.serialize(serializer),
            (None, None) => serializer.serialize_none(),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match T::deserialize(&value) {
            Ok(typed) => Field::new(typed),
            Err(_) => Field {
                typed: None,
                raw: Some(value),
            },
        })
    }
}

/// The application manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Application identity block.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub domain: Field<Domain>,

    /// Pages; the first one is the launch page.
    #[serde(default)]
    pub pages: Vec<Field<Page>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Application identity, version and permissions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub version: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub version_code: Field<u64>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub permission: Field<Permission>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    /// Permission names; entries of other types are kept as they are.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub use_permission: Field<Vec<Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single page entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub uri: Field<String>,

    /// Marks the page that receives system events; only `true` counts.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub main: Field<bool>,

    /// Icon file name within the resource buckets.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub icon: Field<String>,

    /// Splash file name within the resource buckets.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub splash: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub display: Field<Display>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub extension: Field<Extension>,

    /// Event objects keyed by `name`.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub events: Field<Vec<Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Display {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub orientation: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub fullscreen: Field<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub web_app: Field<WebApp>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebApp {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub append_user_agent: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub override_user_agent: Field<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Manifest {
    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON with four-space indentation.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only ever emits UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// The identity block, created if absent.
    pub fn domain_mut(&mut self) -> &mut Domain {
        self.domain.get_or_insert_with(Domain::default)
    }

    /// The launch page, created if the manifest has none.
    pub fn first_page_mut(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Field::default());
        }
        self.pages[0].get_or_insert_with(Page::default)
    }

    pub fn first_page(&self) -> Option<&Page> {
        self.pages.first().and_then(Field::get)
    }

    /// Set domain name, launch page URI, version and version code.
    pub fn set_identity(&mut self, package: &str, name: &str, version: &str) {
        let domain = self.domain_mut();
        domain.name.set(package.to_string());
        domain.version.set(version.to_string());
        domain.version_code.set(yunpack_core::version_code(version));
        self.first_page_mut().uri.set(format!("page://{package}/{name}"));
    }

    /// Map an orientation preference onto the launch page.
    ///
    /// Returns `false` and leaves the manifest untouched for unknown values.
    pub fn set_orientation(&mut self, preference: &str) -> bool {
        let Some((_, mapped)) = ORIENTATIONS.iter().find(|(key, _)| *key == preference) else {
            return false;
        };
        self.first_page_mut().display_mut().orientation.set((*mapped).to_string());
        true
    }

    /// Fullscreen is on only for the exact preference value `"true"`.
    pub fn set_fullscreen(&mut self, preference: &str) {
        self.first_page_mut().display_mut().fullscreen.set(preference == "true");
    }

    /// Apply the append/override user agent preferences.
    ///
    /// An empty preference clears its field. When both are empty the
    /// `web_app` block is only touched if it already exists.
    pub fn set_user_agent(&mut self, append: &str, override_agent: &str) {
        let assign = |field: &mut Field<String>, value: &str| {
            if value.is_empty() {
                field.clear();
            } else {
                field.set(value.to_string());
            }
        };
        let page = self.first_page_mut();

        if !append.is_empty() || !override_agent.is_empty() {
            let web_app = page.web_app_mut();
            assign(&mut web_app.append_user_agent, append);
            assign(&mut web_app.override_user_agent, override_agent);
        } else if let Some(web_app) = page
            .extension
            .get_mut()
            .and_then(|extension| extension.web_app.get_mut())
        {
            web_app.append_user_agent.clear();
            web_app.override_user_agent.clear();
        }
    }

    /// Append permissions not yet listed, keeping first-appearance order.
    pub fn merge_permissions(&mut self, permissions: &[String]) {
        let listed = self
            .domain_mut()
            .permission
            .get_or_insert_with(Permission::default)
            .use_permission
            .get_or_insert_with(Vec::new);

        for permission in permissions {
            if !listed.iter().any(|p| p.as_str() == Some(permission)) {
                listed.push(Value::String(permission.clone()));
            }
        }
    }

    /// Append events not yet present to every page marked `main`.
    pub fn merge_events(&mut self, events: &[String]) {
        if events.is_empty() {
            return;
        }
        let main_pages = self
            .pages
            .iter_mut()
            .filter_map(Field::get_mut)
            .filter(|page| page.is_main());
        for page in main_pages {
            let listed = page.events.get_or_insert_with(Vec::new);
            for event in events {
                if !listed.iter().any(|e| event_name(e) == Some(event)) {
                    listed.push(json!({ "name": event }));
                }
            }
        }
    }

    pub fn set_icon(&mut self, file_name: &str) {
        self.first_page_mut().icon.set(file_name.to_string());
    }

    pub fn set_splash(&mut self, file_name: &str) {
        self.first_page_mut().splash.set(file_name.to_string());
    }
}

impl Page {
    pub fn is_main(&self) -> bool {
        self.main.get() == Some(&true)
    }

    /// The `display` block, created if absent.
    pub fn display_mut(&mut self) -> &mut Display {
        self.display.get_or_insert_with(Display::default)
    }

    /// The `extension.web_app` block, creating both levels if absent.
    pub fn web_app_mut(&mut self) -> &mut WebApp {
        self.extension
            .get_or_insert_with(Extension::default)
            .web_app
            .get_or_insert_with(WebApp::default)
    }

    /// Names of the listed events.
    pub fn event_names(&self) -> Vec<&str> {
        self.events
            .get()
            .map(|events| events.iter().filter_map(event_name).collect())
            .unwrap_or_default()
    }
}

fn event_name(event: &Value) -> Option<&str> {
    event.get("name").and_then(Value::as_str)
}
