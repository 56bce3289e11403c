// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::util::AgentId;

/// A classified failure signal feeding the strategy table (§4.10).
#[derive(Debug, Clone, PartialEq)]
pub enum FailureKind {
    AgentFailed { agent: AgentId },
    TaskTimeout { agent: AgentId, task_id: String },
    ResourceExhaustion { agents: Vec<AgentId> },
    QuorumLoss { agents: Vec<AgentId> },
    SlowAgent { agent: AgentId },
}

/// The recovery strategy the table maps a [`FailureKind`] onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealingStrategy {
    RestartAgent,
    RetryTask,
    RebalanceResources,
    QuorumRecovery,
    GradualDegradation,
}

impl HealingStrategy {
    /// The default strategy-table mapping (§4.10). Data-driven, matching
    /// the teacher's `should_restart`/`should_restart_any` pattern of
    /// pure functions over a policy value rather than a dispatch trait.
    pub fn for_failure(kind: &FailureKind) -> Self {
        match kind {
            FailureKind::AgentFailed { .. } => Self::RestartAgent,
            FailureKind::TaskTimeout { .. } => Self::RetryTask,
            FailureKind::ResourceExhaustion { .. } => Self::RebalanceResources,
            FailureKind::QuorumLoss { .. } => Self::QuorumRecovery,
            FailureKind::SlowAgent { .. } => Self::GradualDegradation,
        }
    }
}

/// One attempted recovery, recorded after `SelfHealer::apply` completes.
#[derive(Debug, Clone)]
pub struct HealingOutcome {
    pub strategy: HealingStrategy,
    pub success: bool,
    pub duration: Duration,
    /// Set only for preventive-mode actions: did the predicted failure
    /// actually happen afterward? `None` until calibrated.
    pub prediction_confirmed: Option<bool>,
    pub recorded_at: DateTime<Utc>,
}

/// Direction of a strategy's success rate over its own recent history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Improving,
    Stable,
    Degrading,
}

/// Per-strategy effectiveness summary (§4.10).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effectiveness {
    pub strategy: HealingStrategy,
    pub sample_count: usize,
    pub success_rate: f64,
    pub mean_time_to_recovery: Duration,
    pub trend: Trend,
}
