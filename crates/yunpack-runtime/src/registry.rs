//! Registered plugin services

use crate::{RuntimeError, RuntimeResult, ServiceState};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// A service declared by a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Service name (the `<feature name>`)
    pub name: String,
    /// Package implementing the service; empty when undeclared
    pub path: String,
    /// Start the service when the application loads
    pub onload: bool,
    #[serde(default)]
    pub state: ServiceState,
}

impl PluginDescriptor {
    pub fn new(name: impl Into<String>, path: impl Into<String>, onload: bool) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            onload,
            state: ServiceState::Registered,
        }
    }
}

/// Services in registration order, at most one per name.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    services: Vec<PluginDescriptor>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service.
    ///
    /// Registering an existing name replaces the previous descriptor in
    /// place, keeping its position.
    pub fn add_service(&mut self, name: impl Into<String>, path: impl Into<String>, onload: bool) {
        let descriptor = PluginDescriptor::new(name, path, onload);
        debug!(
            "Registering service {} (package: {:?}, onload: {})",
            descriptor.name, descriptor.path, descriptor.onload
        );
        match self.services.iter_mut().find(|s| s.name == descriptor.name) {
            Some(slot) => *slot = descriptor,
            None => self.services.push(descriptor),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PluginDescriptor> {
        self.services.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginDescriptor> {
        self.services.iter()
    }

    /// Start every `onload` service that has not been started yet.
    ///
    /// Services start in registration order. The first failure marks that
    /// service [`ServiceState::Failed`] and aborts; services after it stay
    /// registered. Returns the names started by this call.
    pub fn startup<F>(&mut self, mut start: F) -> RuntimeResult<Vec<String>>
    where
        F: FnMut(&PluginDescriptor) -> Result<(), String>,
    {
        let mut started = Vec::new();
        for service in self.services.iter_mut().filter(|s| s.onload) {
            if start_service(service, &mut start)? {
                started.push(service.name.clone());
            }
        }
        Ok(started)
    }

    /// Start a single service by name, regardless of `onload`.
    pub fn start<F>(&mut self, name: &str, start: F) -> RuntimeResult<()>
    where
        F: FnOnce(&PluginDescriptor) -> Result<(), String>,
    {
        let service = self
            .services
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| RuntimeError::UnknownService(name.to_string()))?;
        start_service(service, start)?;
        Ok(())
    }
}

/// Returns `false` when the service was already running.
fn start_service<F>(service: &mut PluginDescriptor, start: F) -> RuntimeResult<bool>
where
    F: FnOnce(&PluginDescriptor) -> Result<(), String>,
{
    if service.state.is_running() {
        return Ok(false);
    }
    if !service.state.can_transition_to(ServiceState::Running) {
        return Err(RuntimeError::InvalidState {
            expected: ServiceState::Registered.to_string(),
            actual: service.state.to_string(),
        });
    }

    match start(&*service) {
        Ok(()) => {
            service.state = ServiceState::Running;
            info!("Started service {}", service.name);
            Ok(true)
        }
        Err(reason) => {
            service.state = ServiceState::Failed;
            error!("Service {} failed to start: {reason}", service.name);
            Err(RuntimeError::StartFailed {
                name: service.name.clone(),
                reason,
            })
        }
    }
}

impl<'a> IntoIterator for &'a PluginRegistry {
    type Item = &'a PluginDescriptor;
    type IntoIter = std::slice::Iter<'a, PluginDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.services.iter()
    }
}

#[cfg(test)]
#[path = "registry/registry_tests.rs"]
mod registry_tests;
