// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use super::traits::{MessageKind, MessagePriority};
use crate::util::{AgentId, MessageId};

/// Target of an [`Envelope`]: a single named agent, or every agent the
/// topology currently considers reachable from the sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    /// A single addressed agent.
    Agent(AgentId),
    /// Every reachable agent except the ones in the exclude-set.
    Broadcast,
}

/// A message in flight between two agents (or a sender and a broadcast
/// set). The payload is an opaque mapping — `serde_json::Value` — because
/// traffic on this bus is heterogeneous: consensus votes, CRDT deltas and
/// application data all share one wire shape.
///
/// Messages are first-class values with no shared mutable state; once
/// enqueued they are owned by the recipient's mailbox until dequeue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Runtime-assigned identifier, unique per envelope.
    pub id: MessageId,

    /// Identity of the sending agent.
    pub sender: AgentId,

    /// Addressed recipient or broadcast marker.
    pub recipient: Recipient,

    /// Opaque payload.
    pub payload: serde_json::Value,

    /// What role this envelope plays on the bus.
    pub kind: MessageKind,

    /// Enqueue timestamp (§3.2 chrono standard).
    pub timestamp: DateTime<Utc>,

    /// Monotonic sequence number within the sender, used to preserve FIFO
    /// ordering per (sender, recipient) pair across retries and replays.
    pub sequence: u64,

    /// Delivery priority.
    pub priority: MessagePriority,

    /// Correlation id tying a state-sync round together
    /// (state-request → state-reply* → state-update).
    pub correlation_id: Option<crate::util::CorrelationId>,
}

impl Envelope {
    /// Build a new envelope addressed to a single agent.
    pub fn new(sender: AgentId, recipient: AgentId, payload: serde_json::Value, sequence: u64) -> Self {
        Self {
            id: MessageId::new(),
            sender,
            recipient: Recipient::Agent(recipient),
            payload,
            kind: MessageKind::default(),
            timestamp: Utc::now(), // §3.2 chrono standard
            sequence,
            priority: MessagePriority::default(),
            correlation_id: None,
        }
    }

    /// Build a new broadcast envelope.
    pub fn broadcast(sender: AgentId, payload: serde_json::Value, sequence: u64) -> Self {
        Self {
            id: MessageId::new(),
            sender,
            recipient: Recipient::Broadcast,
            payload,
            kind: MessageKind::default(),
            timestamp: Utc::now(),
            sequence,
            priority: MessagePriority::default(),
            correlation_id: None,
        }
    }

    /// Builder method: set the message kind.
    pub fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builder method: set the priority.
    pub fn with_priority(mut self, priority: MessagePriority) -> Self {
        self.priority = priority;
        self
    }

    /// Builder method: set the correlation id.
    pub fn with_correlation_id(mut self, id: crate::util::CorrelationId) -> Self {
        self.correlation_id = Some(id);
        self
    }

    /// True when this envelope targets a single agent equal to `agent`.
    pub fn is_addressed_to(&self, agent: &AgentId) -> bool {
        matches!(&self.recipient, Recipient::Agent(id) if id == agent)
    }
}
