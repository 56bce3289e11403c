// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY

// Layer 3: Internal module imports
use super::health_state::HealthState;
use crate::mailbox::Mailbox;
use crate::util::{AgentId, VectorClock};

/// A registered agent and everything the registry owns about it.
///
/// Per `spec.md` §3: agents are exclusively owned by the registry; every
/// other subsystem holds only identities and queries through here.
#[derive(Debug, Clone)]
pub struct Agent {
    /// Stable identity, unique within a coordinator.
    pub id: AgentId,

    /// Free-form application tag (e.g. "worker", "coordinator-shadow").
    pub type_tag: String,

    /// Arbitrary caller-supplied metadata.
    pub metadata: HashMap<String, serde_json::Value>,

    /// Timestamp of the most recent heartbeat (any send also counts).
    pub last_heartbeat: DateTime<Utc>,

    /// Current health classification.
    pub health: HealthState,

    /// Timestamp this agent was registered.
    pub registered_at: DateTime<Utc>,

    /// The agent's inbound mailbox.
    pub mailbox: Mailbox,

    /// Logical clock used for causal version comparisons, if this agent
    /// participates in conflict resolution.
    pub clock: VectorClock,
}

impl Agent {
    /// Create a freshly registered agent: healthy, clocked at `now`, with
    /// an empty vector clock and a bounded mailbox of `mailbox_capacity`.
    pub fn new(id: AgentId, type_tag: impl Into<String>, metadata: HashMap<String, serde_json::Value>, mailbox_capacity: usize) -> Self {
        let now = Utc::now(); // §3.2 chrono standard
        Self {
            id,
            type_tag: type_tag.into(),
            metadata,
            last_heartbeat: now,
            health: HealthState::default(),
            registered_at: now,
            mailbox: Mailbox::bounded(mailbox_capacity),
            clock: VectorClock::new(),
        }
    }

    /// Seconds elapsed since the last heartbeat, as of `now`.
    pub fn heartbeat_age(&self, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(self.last_heartbeat)
            .num_seconds()
            .max(0)
    }
}
