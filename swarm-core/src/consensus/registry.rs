//! Named-algorithm dispatch (§4.6): look up a registered
//! `ConsensusAlgorithm` by name and run it against a proposal.

// Layer 1: Standard library imports
use std::collections::HashMap;
use std::sync::Arc;

// Layer 3: Internal module imports
use super::algorithm::ConsensusAlgorithm;
use super::error::ConsensusError;
use super::types::{ConsensusResult, Proposal, Vote};

#[derive(Clone, Default)]
pub struct ConsensusRegistry {
    algorithms: HashMap<String, Arc<dyn ConsensusAlgorithm + Send + Sync>>,
}

impl ConsensusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, algorithm: Arc<dyn ConsensusAlgorithm + Send + Sync>) {
        self.algorithms.insert(algorithm.name().to_string(), algorithm);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.algorithms.contains_key(name)
    }

    pub fn decide(&self, name: &str, proposal: &Proposal, votes: &[Vote]) -> Result<ConsensusResult, ConsensusError> {
        let algorithm = self.algorithms.get(name).ok_or_else(|| ConsensusError::UnknownAlgorithm(name.to_string()))?;
        algorithm.decide(proposal, votes)
    }
}
