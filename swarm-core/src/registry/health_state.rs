// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
// (none)

/// An agent's classification in the health state machine (§4.4).
///
/// The registry only stores this value — it never decides transitions;
/// those are the Health Monitor's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthState {
    /// Last heartbeat age ≤ `healthy_max`.
    Healthy,
    /// `healthy_max` < age ≤ `degraded_max`.
    Degraded,
    /// `degraded_max` < age ≤ `critical_max`.
    Critical,
    /// age > `critical_max`; only an explicit heartbeat or unregister
    /// exits this state.
    Failed,
}

impl HealthState {
    /// True for every state but `Failed` — used by `list_active`.
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Failed)
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_healthy() {
        assert_eq!(HealthState::default(), HealthState::Healthy);
    }

    #[test]
    fn test_is_active() {
        assert!(HealthState::Healthy.is_active());
        assert!(HealthState::Degraded.is_active());
        assert!(HealthState::Critical.is_active());
        assert!(!HealthState::Failed.is_active());
    }
}
