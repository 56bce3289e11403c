// Layer 1: Standard library imports
use std::collections::HashMap;
use std::time::Duration;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::util::{AgentId, ProposalId};

/// A voter's choice on a proposal (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    For,
    Against,
    Abstain,
}

/// One cast vote (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub proposal_id: ProposalId,
    pub voter: AgentId,
    pub choice: Choice,
    pub weight: f64,
    pub timestamp: DateTime<Utc>,
    pub round: u32,
}

impl Vote {
    pub fn new(proposal_id: ProposalId, voter: AgentId, choice: Choice, round: u32) -> Self {
        Self { proposal_id, voter, choice, weight: 1.0, timestamp: Utc::now(), round }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// A proposal submitted for a decision (§3).
#[derive(Debug, Clone)]
pub struct Proposal {
    pub id: ProposalId,
    pub originator: AgentId,
    pub payload: serde_json::Value,
    pub participants: Vec<AgentId>,
    pub created_at: DateTime<Utc>,
    pub timeout: Duration,
}

impl Proposal {
    pub fn new(originator: AgentId, payload: serde_json::Value, participants: Vec<AgentId>, timeout: Duration) -> Self {
        Self { id: ProposalId::new(), originator, payload, participants, created_at: Utc::now(), timeout }
    }
}

/// The outcome of a `decide` call (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Approved,
    Rejected,
    Timeout,
}

/// Vote tallies, weighted where the algorithm uses weights.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Tally {
    pub for_votes: f64,
    pub against_votes: f64,
    pub abstain_votes: f64,
}

/// One completed voting round, recorded for multi-round protocols.
#[derive(Debug, Clone)]
pub struct RoundRecord {
    pub round: u32,
    pub tally: Tally,
    pub votes_cast: usize,
}

/// Immutable result of an algorithm's `decide` (§3). Uniform shape plus
/// algorithm-specific extensions (detected-malicious, convergence ratio).
#[derive(Debug, Clone)]
pub struct ConsensusResult {
    pub proposal_id: ProposalId,
    pub decision: Decision,
    pub tally: Tally,
    pub threshold: f64,
    pub participants: Vec<AgentId>,
    pub detected_malicious: Vec<AgentId>,
    pub round_history: Vec<RoundRecord>,
    pub convergence_ratio: Option<f64>,
}

/// Per-voter weight map used by the weighted algorithm; unknown voters
/// default to 1.0 (§4.6).
#[derive(Debug, Clone, Default)]
pub struct WeightMap(pub HashMap<AgentId, f64>);

impl WeightMap {
    pub fn weight_of(&self, voter: &AgentId) -> f64 {
        self.0.get(voter).copied().unwrap_or(1.0)
    }
}
