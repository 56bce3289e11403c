//! Weighted voting (§4.6): decision by weighted-for / (weighted-for +
//! weighted-against) >= 0.5; unknown voters default to weight 1.0.

// Layer 3: Internal module imports
use super::algorithm::ConsensusAlgorithm;
use super::error::ConsensusError;
use super::types::{Choice, ConsensusResult, Decision, Proposal, Tally, Vote, WeightMap};

pub struct Weighted {
    weights: WeightMap,
}

impl Weighted {
    pub fn new(weights: WeightMap) -> Self {
        Self { weights }
    }
}

impl ConsensusAlgorithm for Weighted {
    fn name(&self) -> &'static str {
        "weighted"
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
            let weight = self.weights.weight_of(&vote.voter);
            match vote.choice {
                Choice::For => tally.for_votes += weight,
                Choice::Against => tally.against_votes += weight,
                Choice::Abstain => tally.abstain_votes += weight,
            }
        }

        let denominator = tally.for_votes + tally.against_votes;
        let decision = if denominator <= 0.0 {
            Decision::Rejected
        } else if tally.for_votes / denominator >= 0.5 {
            Decision::Approved
        } else {
            Decision::Rejected
        };

        Ok(ConsensusResult {
            proposal_id: proposal.id,
            decision,
            tally,
            threshold: 0.5,
            participants: proposal.participants.clone(),
            detected_malicious: Vec::new(),
            round_history: Vec::new(),
            convergence_ratio: None,
        })
    }
}
