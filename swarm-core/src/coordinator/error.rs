// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use crate::conflict::ConflictError;
use crate::consensus::ConsensusError;
use crate::registry::RegistryError;
use crate::sync::SyncError;
use crate::topology::TopologyError;

/// Top-level coordinator error, composing every subsystem's error type
/// (§4.8, §7), following the teacher's `SystemError` `#[from]`-composition
/// pattern.
#[derive(Error, Debug)]
pub enum CoordinatorError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Consensus(#[from] ConsensusError),

    #[error(transparent)]
    Conflict(#[from] ConflictError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    /// The operation requires a subsystem disabled at construction.
    #[error("feature disabled: {0}")]
    FeatureDisabled(&'static str),
}

impl CoordinatorError {
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Registry(e) if e.is_caller_error())
            || matches!(self, Self::Topology(e) if e.is_caller_error())
            || matches!(self, Self::FeatureDisabled(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::AgentId;

    #[test]
    fn test_registry_error_converts() {
        let err: CoordinatorError = RegistryError::NotFound(AgentId::new("a")).into();
        assert!(matches!(err, CoordinatorError::Registry(_)));
    }

    #[test]
    fn test_feature_disabled_display() {
        let err = CoordinatorError::FeatureDisabled("consensus");
        assert!(err.to_string().contains("consensus"));
    }
}
