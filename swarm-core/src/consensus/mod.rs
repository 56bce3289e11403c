//! Pluggable consensus algorithms (§4.6): quorum, weighted, byzantine,
//! and gossip share one `ConsensusAlgorithm` trait and are looked up by
//! name through `ConsensusRegistry`.

mod algorithm;
mod byzantine;
mod error;
mod gossip;
mod quorum;
mod registry;
mod types;
mod weighted;

pub use algorithm::ConsensusAlgorithm;
pub use byzantine::Byzantine;
pub use error::ConsensusError;
pub use gossip::Gossip;
pub use quorum::Quorum;
pub use registry::ConsensusRegistry;
pub use types::{Choice, ConsensusResult, Decision, Proposal, RoundRecord, Tally, Vote, WeightMap};
pub use weighted::Weighted;
