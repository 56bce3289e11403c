// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::util::{AgentId, VectorClock};

/// CRDT type tag carried by a version when its value should merge
/// type-directed instead of by timestamp (§3, §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrdtType {
    Counter,
    PnCounter,
    Register,
    OrSet,
    GSet,
    LwwMap,
}

/// One value of a state key, as produced by a write or a synchronization
/// round (§3). Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateVersion {
    pub state_key: String,
    pub value: serde_json::Value,
    pub version: u64,
    pub timestamp: DateTime<Utc>,
    pub owner: AgentId,
    pub vector_clock: Option<VectorClock>,
    pub crdt_type: Option<CrdtType>,
}

impl StateVersion {
    pub fn new(state_key: impl Into<String>, value: serde_json::Value, version: u64, owner: AgentId) -> Self {
        Self {
            state_key: state_key.into(),
            value,
            version,
            timestamp: Utc::now(), // §3.2 chrono standard
            owner,
            vector_clock: None,
            crdt_type: None,
        }
    }

    pub fn with_vector_clock(mut self, clock: VectorClock) -> Self {
        self.vector_clock = Some(clock);
        self
    }

    pub fn with_crdt_type(mut self, crdt_type: CrdtType) -> Self {
        self.crdt_type = Some(crdt_type);
        self
    }
}
