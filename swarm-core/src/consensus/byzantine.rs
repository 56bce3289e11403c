//! Byzantine-tolerant consensus (§4.6): parameterized by fault tolerance
//! `f` and round count `R`. Rejects proposals with fewer than 3f+1
//! participants. A voter whose choice differs across rounds is flagged
//! malicious and excluded from the final tally.

// Layer 1: Standard library imports
use std::collections::{BTreeMap, HashSet};

// Layer 3: Internal module imports
use super::algorithm::ConsensusAlgorithm;
use super::error::ConsensusError;
use super::types::{Choice, ConsensusResult, Decision, Proposal, RoundRecord, Tally, Vote};
use crate::util::AgentId;

pub struct Byzantine {
    f: usize,
    rounds: u32,
}

impl Byzantine {
    /// `rounds` is clamped up to the spec minimum of 3.
    pub fn new(f: usize, rounds: u32) -> Self {
        Self { f, rounds: rounds.max(3) }
    }

    fn min_participants_for(f: usize) -> usize {
        3 * f + 1
    }
}

impl ConsensusAlgorithm for Byzantine {
    fn name(&self) -> &'static str {
        "byzantine"
    }

    fn min_participants(&self) -> usize {
        Self::min_participants_for(self.f)
    }

    fn decide(&self, proposal: &Proposal, votes: &[Vote]) -> Result<ConsensusResult, ConsensusError> {
        let required = self.min_participants();
        if proposal.participants.len() < required {
            return Err(ConsensusError::InsufficientParticipants { required, supplied: proposal.participants.len() });
        }

        // Group votes by round, then by voter within round.
        let mut by_round: BTreeMap<u32, BTreeMap<AgentId, Choice>> = BTreeMap::new();
        for vote in votes {
            if vote.round >= self.rounds {
                continue;
            }
            by_round.entry(vote.round).or_default().insert(vote.voter.clone(), vote.choice);
        }

        let round_history: Vec<RoundRecord> = by_round
            .iter()
            .map(|(round, choices)| {
                let mut tally = Tally::default();
                for choice in choices.values() {
                    match choice {
                        Choice::For => tally.for_votes += 1.0,
                        Choice::Against => tally.against_votes += 1.0,
                        Choice::Abstain => tally.abstain_votes += 1.0,
                    }
                }
                RoundRecord { round: *round, tally, votes_cast: choices.len() }
            })
            .collect();

        // A voter is malicious if its choice differs across any two rounds.
        let mut per_voter_choices: BTreeMap<AgentId, HashSet<Choice>> = BTreeMap::new();
        for round_votes in by_round.values() {
            for (voter, choice) in round_votes {
                per_voter_choices.entry(voter.clone()).or_default().insert(*choice);
            }
        }

        let malicious: Vec<AgentId> = per_voter_choices
            .iter()
            .filter(|(_, choices)| choices.len() > 1)
            .map(|(voter, _)| voter.clone())
            .collect();
        let malicious_set: HashSet<&AgentId> = malicious.iter().collect();

        // Final tally: each honest voter's consistent choice, from the
        // last round it voted in.
        let mut honest_tally = Tally::default();
        for (voter, choices) in &per_voter_choices {
            if malicious_set.contains(voter) {
                continue;
            }
            if let Some(choice) = choices.iter().next() {
                match choice {
                    Choice::For => honest_tally.for_votes += 1.0,
                    Choice::Against => honest_tally.against_votes += 1.0,
                    Choice::Abstain => honest_tally.abstain_votes += 1.0,
                }
            }
        }

        let quorum = (2 * self.f + 1) as f64;
        let decision = if honest_tally.for_votes >= quorum {
            Decision::Approved
        } else if honest_tally.against_votes >= quorum {
            Decision::Rejected
        } else {
            Decision::Timeout
        };

        Ok(ConsensusResult {
            proposal_id: proposal.id,
            decision,
            tally: honest_tally,
            threshold: quorum,
            participants: proposal.participants.clone(),
            detected_malicious: malicious,
            round_history,
            convergence_ratio: None,
        })
    }
}
