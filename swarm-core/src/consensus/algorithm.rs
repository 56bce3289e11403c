// Layer 3: Internal module imports
use super::error::ConsensusError;
use super::types::{ConsensusResult, Proposal, Vote};

/// Contract shared by every consensus algorithm (§4.6): decide over a
/// proposal and the votes cast for it. Stateful for the duration of one
/// proposal, stateless between proposals — implementations must not
/// assume `decide` is ever called twice for the same proposal id.
pub trait ConsensusAlgorithm {
    /// Stable name this algorithm is registered under.
    fn name(&self) -> &'static str;

    /// Minimum participant count this algorithm accepts.
    fn min_participants(&self) -> usize;

    /// Decide a proposal from the votes observed before its deadline.
    fn decide(&self, proposal: &Proposal, votes: &[Vote]) -> Result<ConsensusResult, ConsensusError>;
}
