// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use crate::util::AgentId;

/// Topology Engine errors (§4.3, §7).
#[derive(Error, Debug)]
pub enum TopologyError {
    /// An edge the topology forbids was attempted (e.g. spoke-to-spoke in
    /// a star, a non-successor hop in a ring, a cyclic parent in a tree).
    #[error("topology forbids {from} -> {to}: {reason}")]
    TopologyViolation {
        from: AgentId,
        to: AgentId,
        reason: String,
    },

    /// `switch_topology` was called with a kind the engine does not build.
    #[error("unsupported topology kind: {0}")]
    UnsupportedKind(String),

    /// A topology operation referenced an identity not present.
    #[error("agent not found in topology: {0}")]
    UnknownAgent(AgentId),
}

impl TopologyError {
    pub fn is_caller_error(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display() {
        let err = TopologyError::TopologyViolation {
            from: AgentId::new("a"),
            to: AgentId::new("b"),
            reason: "spoke-to-spoke without hub relay".into(),
        };
        assert!(err.to_string().contains("spoke-to-spoke"));
    }

    #[test]
    fn test_unsupported_kind_display() {
        let err = TopologyError::UnsupportedKind("bus".into());
        assert!(err.to_string().contains("bus"));
    }
}
