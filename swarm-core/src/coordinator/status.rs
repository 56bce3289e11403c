// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY

// Layer 3: Internal module imports
use crate::registry::HealthState;
use crate::util::AgentId;

/// Snapshot returned by `get_agent_status` (§4.8): metadata, health,
/// mailbox depth, uptime window.
#[derive(Debug, Clone)]
pub struct AgentStatus {
    pub id: AgentId,
    pub type_tag: String,
    pub metadata: HashMap<String, serde_json::Value>,
    pub health: HealthState,
    pub mailbox_depth: usize,
    pub last_heartbeat: DateTime<Utc>,
    pub registered_at: DateTime<Utc>,
    pub uptime_ratio: f64,
}
