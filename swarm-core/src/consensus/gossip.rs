//! Epidemic (gossip) consensus (§4.6): each round every participant
//! forwards its opinion to `fanout` random peers; converges once the
//! agreement ratio reaches `threshold` or `max_rounds` is exhausted.

// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 2: Third-party crate imports
use rand::seq::SliceRandom;
use rand::thread_rng;

// Layer 3: Internal module imports
use super::algorithm::ConsensusAlgorithm;
use super::error::ConsensusError;
use super::types::{Choice, ConsensusResult, Decision, Proposal, RoundRecord, Tally, Vote};
use crate::util::AgentId;

const DEFAULT_THRESHOLD: f64 = 0.95;

pub struct Gossip {
    fanout: usize,
    max_rounds: u32,
    threshold: f64,
}

impl Gossip {
    pub fn new(fanout: usize, max_rounds: u32) -> Self {
        Self { fanout: fanout.max(1), max_rounds: max_rounds.max(1), threshold: DEFAULT_THRESHOLD }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    fn tally_of(opinions: &HashMap<AgentId, Choice>) -> Tally {
        let mut tally = Tally::default();
        for choice in opinions.values() {
            match choice {
                Choice::For => tally.for_votes += 1.0,
                Choice::Against => tally.against_votes += 1.0,
                Choice::Abstain => tally.abstain_votes += 1.0,
            }
        }
        tally
    }

    fn majority_opinion(opinions: &HashMap<AgentId, Choice>) -> (Choice, f64) {
        let tally = Self::tally_of(opinions);
        let total = opinions.len().max(1) as f64;
        if tally.for_votes >= tally.against_votes && tally.for_votes >= tally.abstain_votes {
            (Choice::For, tally.for_votes / total)
        } else if tally.against_votes >= tally.abstain_votes {
            (Choice::Against, tally.against_votes / total)
        } else {
            (Choice::Abstain, tally.abstain_votes / total)
        }
    }
}

impl ConsensusAlgorithm for Gossip {
    fn name(&self) -> &'static str {
        "gossip"
    }

    fn min_participants(&self) -> usize {
        1
    }

    fn decide(&self, proposal: &Proposal, votes: &[Vote]) -> Result<ConsensusResult, ConsensusError> {
        if proposal.participants.len() < self.min_participants() {
            return Err(ConsensusError::InsufficientParticipants { required: self.min_participants(), supplied: proposal.participants.len() });
        }

        let mut opinions: HashMap<AgentId, Choice> = proposal.participants.iter().map(|p| (p.clone(), Choice::Abstain)).collect();
        for vote in votes {
            if proposal.participants.contains(&vote.voter) {
                opinions.insert(vote.voter.clone(), vote.choice);
            }
        }

        let mut round_history = Vec::new();
        let mut rng = thread_rng();
        let mut converged_ratio = 0.0;

        for round in 0..self.max_rounds {
            let snapshot = opinions.clone();
            let peers: Vec<AgentId> = proposal.participants.clone();

            let mut next = snapshot.clone();
            for participant in &proposal.participants {
                let mut candidates: Vec<AgentId> = peers.iter().filter(|p| *p != participant).cloned().collect();
                candidates.shuffle(&mut rng);
                let chosen: Vec<AgentId> = candidates.into_iter().take(self.fanout).collect();

                let mut received = vec![snapshot[participant]];
                for peer in &chosen {
                    if let Some(choice) = snapshot.get(peer) {
                        received.push(*choice);
                    }
                }

                let for_count = received.iter().filter(|c| **c == Choice::For).count();
                let against_count = received.iter().filter(|c| **c == Choice::Against).count();
                let abstain_count = received.len() - for_count - against_count;

                let adopted = if for_count >= against_count && for_count >= abstain_count {
                    Choice::For
                } else if against_count >= abstain_count {
                    Choice::Against
                } else {
                    Choice::Abstain
                };
                next.insert(participant.clone(), adopted);
            }

            opinions = next;
            let tally = Self::tally_of(&opinions);
            round_history.push(RoundRecord { round, tally, votes_cast: opinions.len() });

            let (_, ratio) = Self::majority_opinion(&opinions);
            converged_ratio = ratio;
            if ratio >= self.threshold {
                break;
            }
        }

        let (majority, ratio) = Self::majority_opinion(&opinions);
        converged_ratio = converged_ratio.max(ratio);

        let decision = if ratio >= self.threshold && majority == Choice::For {
            Decision::Approved
        } else {
            Decision::Rejected
        };

        Ok(ConsensusResult {
            proposal_id: proposal.id,
            decision,
            tally: Self::tally_of(&opinions),
            threshold: self.threshold,
            participants: proposal.participants.clone(),
            detected_malicious: Vec::new(),
            round_history,
            convergence_ratio: Some(converged_ratio),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn proposal(n: usize) -> Proposal {
        let participants: Vec<AgentId> = (0..n).map(|i| AgentId::new(format!("a{i}"))).collect();
        Proposal::new(AgentId::new("origin"), serde_json::json!("payload"), participants, Duration::from_secs(5))
    }

    #[test]
    fn test_unanimous_for_converges_and_approves() {
        let p = proposal(6);
        let votes: Vec<Vote> = p.participants.iter().map(|voter| Vote::new(p.id, voter.clone(), Choice::For, 0)).collect();

        let algorithm = Gossip::new(2, 5);
        let result = algorithm.decide(&p, &votes).unwrap();
        assert_eq!(result.decision, Decision::Approved);
        assert!(result.convergence_ratio.unwrap() >= 0.95);
    }

    #[test]
    fn test_unanimous_against_is_rejected() {
        let p = proposal(6);
        let votes: Vec<Vote> = p.participants.iter().map(|voter| Vote::new(p.id, voter.clone(), Choice::Against, 0)).collect();

        let algorithm = Gossip::new(2, 5);
        let result = algorithm.decide(&p, &votes).unwrap();
        assert_eq!(result.decision, Decision::Rejected);
    }

    #[test]
    fn test_round_history_recorded() {
        let p = proposal(4);
        let votes: Vec<Vote> = p.participants.iter().map(|voter| Vote::new(p.id, voter.clone(), Choice::For, 0)).collect();
        let algorithm = Gossip::new(1, 3);
        let result = algorithm.decide(&p, &votes).unwrap();
        assert!(!result.round_history.is_empty());
    }
}
