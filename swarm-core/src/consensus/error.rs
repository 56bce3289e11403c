// Layer 2: Third-party crate imports
use thiserror::Error;

/// Consensus Algorithm Registry errors (§4.6, §7).
#[derive(Error, Debug)]
pub enum ConsensusError {
    #[error("no consensus algorithm registered under {0:?}")]
    UnknownAlgorithm(String),

    #[error("algorithm requires at least {required} participants, got {supplied}")]
    InsufficientParticipants { required: usize, supplied: usize },
}
