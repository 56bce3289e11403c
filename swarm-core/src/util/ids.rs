// Layer 1: Standard library imports
use std::fmt::{self, Display};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Layer 3: Internal module imports
// (none)

/// Stable identity of an agent in the swarm.
///
/// Unlike messages and proposals, agent identity is not generated by the
/// runtime — callers choose it at `register` time and it must remain
/// stable for the agent's lifetime so that peers, topology edges and
/// state-version ownership can all refer to it consistently.
///
/// # Example
/// ```rust
/// use swarm_core::util::AgentId;
///
/// let a = AgentId::new("worker-1");
/// let b = AgentId::new("worker-1");
/// assert_eq!(a, b); // Identity is the string itself, not a fresh token
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(String);

impl AgentId {
    /// Create an `AgentId` from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AgentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AgentId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Unique identifier for a message envelope.
///
/// Generated by the runtime on enqueue, used for correlation and
/// diagnostics, never chosen by the caller.
///
/// # Example
/// ```rust
/// use swarm_core::util::MessageId;
///
/// let id = MessageId::new();
/// println!("message id: {id}");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Generate a new random message id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a consensus proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProposalId(Uuid);

impl ProposalId {
    /// Generate a new random proposal id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProposalId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Correlation identifier shared across a full state-sync round
/// (state-request → state-reply* → state-update).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    /// Generate a new random correlation id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_id_equality_by_value() {
        let a = AgentId::new("a1");
        let b = AgentId::new("a1");
        let c = AgentId::new("a2");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_agent_id_display() {
        let a = AgentId::new("worker-7");
        assert_eq!(format!("{a}"), "worker-7");
    }

    #[test]
    fn test_agent_id_from_str_and_string() {
        let a: AgentId = "x".into();
        let b: AgentId = String::from("x").into();
        assert_eq!(a, b);
    }

    #[test]
    fn test_message_id_uniqueness() {
        let a = MessageId::new();
        let b = MessageId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_proposal_id_default_is_fresh() {
        let a = ProposalId::default();
        let b = ProposalId::default();
        assert_ne!(a, b);
    }

    #[test]
    fn test_correlation_id_display_nonempty() {
        let c = CorrelationId::new();
        assert!(!format!("{c}").is_empty());
    }
}
