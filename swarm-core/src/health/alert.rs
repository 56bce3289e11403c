// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY

// Layer 3: Internal module imports
use crate::registry::HealthState;
use crate::util::AgentId;

/// Alert severity, one-to-one with the transition it reports (§4.4):
/// info on a drop into degraded, warning into critical, critical into
/// failed. Upward transitions (recovery) are reported at info.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

/// One health-state transition, emitted by a sweep and consumed by the
/// self-healer (§4.10).
#[derive(Debug, Clone)]
pub struct HealthAlert {
    pub agent: AgentId,
    pub from: HealthState,
    pub to: HealthState,
    pub severity: AlertSeverity,
    pub heartbeat_age: Duration,
    pub at: DateTime<Utc>,
}

impl HealthAlert {
    pub fn severity_for(from: HealthState, to: HealthState) -> AlertSeverity {
        match to {
            HealthState::Failed => AlertSeverity::Critical,
            HealthState::Critical if from != HealthState::Failed => AlertSeverity::Warning,
            _ => AlertSeverity::Info,
        }
    }
}
