// Layer 1: Standard library imports
use std::collections::BTreeMap;

// Layer 3: Internal module imports
use super::kind::TopologyKind;
use crate::registry::HealthState;

/// Read-only summary returned by `get_topology_info` (§4.8).
#[derive(Debug, Clone)]
pub struct TopologyInfo {
    pub kind: TopologyKind,
    pub agent_count: usize,
    pub edge_count: usize,
    pub health_tally: BTreeMap<HealthStateKey, usize>,
}

/// `HealthState` doesn't implement `Ord`; this wraps it for use as a
/// deterministic map key in summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HealthStateKey {
    Healthy,
    Degraded,
    Critical,
    Failed,
}

impl From<HealthState> for HealthStateKey {
    fn from(value: HealthState) -> Self {
        match value {
            HealthState::Healthy => Self::Healthy,
            HealthState::Degraded => Self::Degraded,
            HealthState::Critical => Self::Critical,
            HealthState::Failed => Self::Failed,
        }
    }
}
