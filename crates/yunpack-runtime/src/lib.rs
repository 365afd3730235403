//! yunpack-runtime - plugin services declared in the platform config
//!
//! This crate provides:
//! - [`PluginRegistry`] holding one [`PluginDescriptor`] per service name
//! - [`load_plugins`] building a registry from `<feature>` declarations
//! - [`ServiceState`] tracking whether a service has been started

mod error;
mod loader;
mod registry;
mod state;

pub use error::{RuntimeError, RuntimeResult};
pub use loader::{ONLOAD_PARAM, PACKAGE_PARAM, load_plugins, load_plugins_from};
pub use registry::{PluginDescriptor, PluginRegistry};
pub use state::ServiceState;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        PluginDescriptor, PluginRegistry, RuntimeError, RuntimeResult, ServiceState, load_plugins,
    };
}
