//! Building the registry from `<feature>` declarations

use crate::{PluginRegistry, RuntimeResult};
use std::path::Path;
use tracing::info;
use yunpack_core::ProjectConfig;

/// Feature param naming the package that implements the service.
pub const PACKAGE_PARAM: &str = "yunos-package";

/// Feature param requesting a start at application load.
pub const ONLOAD_PARAM: &str = "onload";

/// Register one service per feature of `config`.
///
/// Only `onload="true"` starts a service at load; any other value, or no
/// param at all, does not. A feature without a package param registers
/// with an empty path. When a param repeats, the last occurrence wins.
pub fn load_plugins(config: &ProjectConfig) -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    for feature in config.features() {
        let mut path = String::new();
        let mut onload = false;
        for param in &feature.params {
            match param.name.as_str() {
                PACKAGE_PARAM => path = param.value.clone(),
                ONLOAD_PARAM => onload = param.value == "true",
                _ => {}
            }
        }
        registry.add_service(feature.name, path, onload);
    }
    info!("Loaded {} plugin services", registry.len());
    registry
}

/// Read a materialized platform config and build its registry.
pub fn load_plugins_from(config_xml: impl AsRef<Path>) -> RuntimeResult<PluginRegistry> {
    let config = ProjectConfig::load(config_xml)?;
    Ok(load_plugins(&config))
}
