// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
// (none)

/// Classifies the role an [`super::Envelope`] plays on the bus.
///
/// `StateRequest`/`StateReply`/`StateUpdate` are used by the state
/// synchronizer's full-sync protocol; `Heartbeat` is a liveness-only
/// message that updates a sender's last-heartbeat without carrying
/// application payload; `Custom` covers ordinary agent traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    /// Ordinary application-level traffic between agents.
    Custom,
    /// Liveness ping; updates the sender's last-heartbeat timestamp.
    Heartbeat,
    /// State-sync request for a set of keys.
    StateRequest,
    /// Reply to a `StateRequest`, carrying one agent's view of a key.
    StateReply,
    /// Final resolved state broadcast after a full-sync round.
    StateUpdate,
}

impl Default for MessageKind {
    fn default() -> Self {
        Self::Custom
    }
}

/// Message priority levels for mailbox eviction and diagnostics.
///
/// # Priority Ordering
/// Critical > High > Normal > Low
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MessagePriority {
    /// Background traffic, first to be dropped on overflow.
    Low = 0,
    /// Default priority for ordinary agent traffic.
    Normal = 1,
    /// Elevated priority, e.g. consensus votes.
    High = 2,
    /// Never dropped ahead of lower priorities, e.g. health alerts.
    Critical = 3,
}

impl Default for MessagePriority {
    fn default() -> Self {
        Self::Normal
    }
}
