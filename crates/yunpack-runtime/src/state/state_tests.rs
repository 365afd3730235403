#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case(ServiceState::Registered, ServiceState::Running, true)]
#[test_case(ServiceState::Registered, ServiceState::Failed, true)]
#[test_case(ServiceState::Running, ServiceState::Registered, false)]
#[test_case(ServiceState::Running, ServiceState::Running, false)]
#[test_case(ServiceState::Failed, ServiceState::Running, false)]
fn ServiceState___can_transition_to(from: ServiceState, to: ServiceState, expected: bool) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[test]
fn ServiceState___default___is_registered() {
    assert_eq!(ServiceState::default(), ServiceState::Registered);
}

#[test]
fn ServiceState___display___names_state() {
    assert_eq!(ServiceState::Running.to_string(), "Running");
    assert!(ServiceState::Running.is_running());
    assert!(!ServiceState::Failed.is_running());
}
