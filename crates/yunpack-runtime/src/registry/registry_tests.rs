#![allow(non_snake_case)]

use super::*;

fn registry() -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    registry.add_service("Device", "device", true);
    registry.add_service("Camera", "camera", false);
    registry.add_service("Network", "network", true);
    registry
}

#[test]
fn PluginRegistry___new___is_empty() {
    let registry = PluginRegistry::new();

    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
}

#[test]
fn PluginRegistry___add_service___keeps_registration_order() {
    let registry = registry();

    let names: Vec<_> = registry.iter().map(|s| s.name.as_str()).collect();

    assert_eq!(names, vec!["Device", "Camera", "Network"]);
}

#[test]
fn PluginRegistry___add_service___replaces_existing_name_in_place() {
    let mut registry = registry();

    registry.add_service("Device", "device2", false);

    assert_eq!(registry.len(), 3);
    let first = registry.iter().next().unwrap();
    assert_eq!(first.path, "device2");
    assert!(!first.onload);
}

#[test]
fn PluginRegistry___get___unknown_name_is_none() {
    let registry = registry();

    assert!(registry.get("Battery").is_none());
    assert_eq!(registry.get("Camera").unwrap().path, "camera");
}

#[test]
fn PluginRegistry___startup___starts_onload_services_once() {
    let mut registry = registry();
    let mut calls = Vec::new();

    let started = registry
        .startup(|service| {
            calls.push(service.path.clone());
            Ok(())
        })
        .unwrap();
    let again = registry.startup(|_| Ok(())).unwrap();

    assert_eq!(started, vec!["Device", "Network"]);
    assert_eq!(calls, vec!["device", "network"]);
    assert!(again.is_empty());
    assert_eq!(registry.get("Camera").unwrap().state, ServiceState::Registered);
}

#[test]
fn PluginRegistry___startup___failure_marks_service_and_aborts() {
    let mut registry = registry();

    let result = registry.startup(|service| {
        if service.name == "Device" {
            Err("package not found".to_string())
        } else {
            Ok(())
        }
    });

    assert!(matches!(result, Err(RuntimeError::StartFailed { .. })));
    assert_eq!(registry.get("Device").unwrap().state, ServiceState::Failed);
    assert_eq!(registry.get("Network").unwrap().state, ServiceState::Registered);
}

#[test]
fn PluginRegistry___start___failed_service_cannot_restart() {
    let mut registry = registry();
    let _ = registry.start("Camera", |_| Err("boom".to_string()));

    let result = registry.start("Camera", |_| Ok(()));

    assert!(matches!(result, Err(RuntimeError::InvalidState { .. })));
}

#[test]
fn PluginRegistry___start___unknown_service_is_error() {
    let mut registry = registry();

    let result = registry.start("Battery", |_| Ok(()));

    assert!(matches!(result, Err(RuntimeError::UnknownService(name)) if name == "Battery"));
}

#[test]
fn PluginRegistry___start___ignores_onload_flag() {
    let mut registry = registry();

    registry.start("Camera", |_| Ok(())).unwrap();

    assert!(registry.get("Camera").unwrap().state.is_running());
}
