//! Service start state

use serde::{Deserialize, Serialize};

/// Where a registered service is in its lifecycle.
///
/// ```text
/// Registered → Running
///      │
///      └─────→ Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceState {
    /// Known to the registry, not started
    #[default]
    Registered,
    /// Started successfully
    Running,
    /// Starting failed
    Failed,
}

impl ServiceState {
    pub fn can_transition_to(&self, target: ServiceState) -> bool {
        use ServiceState::*;
        matches!((self, target), (Registered, Running) | (Registered, Failed))
    }

    pub fn is_running(&self) -> bool {
        matches!(self, ServiceState::Running)
    }
}

impl std::fmt::Display for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceState::Registered => write!(f, "Registered"),
            ServiceState::Running => write!(f, "Running"),
            ServiceState::Failed => write!(f, "Failed"),
        }
    }
}

#[cfg(test)]
#[path = "state/state_tests.rs"]
mod state_tests;
