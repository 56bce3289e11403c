// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY

// Layer 3: Internal module imports
use crate::registry::HealthState;

/// Derived (never stored canonically) per-agent health summary (§3).
#[derive(Debug, Clone)]
pub struct HealthRecord {
    pub heartbeat_age: Duration,
    pub state: HealthState,
    pub consecutive_missed: u64,
    pub last_transition: DateTime<Utc>,
}
