//! Simple-majority quorum (§4.6): single round, approve iff for >
//! threshold * participants.

// Layer 3: Internal module imports
use super::algorithm::ConsensusAlgorithm;
use super::error::ConsensusError;
use super::types::{Choice, ConsensusResult, Decision, Proposal, Tally, Vote};

const DEFAULT_THRESHOLD: f64 = 0.51;

pub struct Quorum {
    threshold: f64,
}

impl Default for Quorum {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD }
    }
}

impl Quorum {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl ConsensusAlgorithm for Quorum {
    fn name(&self) -> &'static str {
        "quorum"
    }

    fn min_participants(&self) -> usize {
        1
    }

    fn decide(&self, proposal: &Proposal, votes: &[Vote]) -> Result<ConsensusResult, ConsensusError> {
        if proposal.participants.len() < self.min_participants() {
            return Err(ConsensusError::InsufficientParticipants {
                required: self.min_participants(),
                supplied: proposal.participants.len(),
            });
        }

        let mut tally = Tally::default();
        for vote in votes {
            match vote.choice {
                Choice::For => tally.for_votes += 1.0,
                Choice::Against => tally.against_votes += 1.0,
                Choice::Abstain => tally.abstain_votes += 1.0,
            }
        }

        let decision = if tally.for_votes > self.threshold * proposal.participants.len() as f64 {
            Decision::Approved
        } else {
            Decision::Rejected
        };

        Ok(ConsensusResult {
            proposal_id: proposal.id,
            decision,
            tally,
            threshold: self.threshold,
            participants: proposal.participants.clone(),
            detected_malicious: Vec::new(),
            round_history: Vec::new(),
            convergence_ratio: None,
        })
    }
}
