// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::util::AgentId;

/// Finding category (§3 `Bottleneck`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BottleneckKind {
    TokenExhaustion,
    QuotaExceeded,
    SlowAgent,
    QueueBacklog,
    ConsensusTimeout,
}

/// Severity derived from a finding's impact score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// §4.9 mapping: impact ≥ 0.8 → critical, ≥ 0.6 → high, ≥ 0.4 →
    /// medium, else low.
    pub fn from_impact(impact: f64) -> Self {
        if impact >= 0.8 {
            Self::Critical
        } else if impact >= 0.6 {
            Self::High
        } else if impact >= 0.4 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// One detector finding, carrying enough context to act on (§4.10 consumes
/// these directly).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bottleneck {
    pub kind: BottleneckKind,
    pub severity: Severity,
    pub affected: Vec<AgentId>,
    pub impact_score: f64,
    pub metrics_snapshot: HashMap<String, f64>,
    pub remediations: Vec<String>,
    pub detected_at: DateTime<Utc>,
}

/// A window's worth of raw signal the detector scans each cycle (§4.9).
#[derive(Debug, Clone, Default)]
pub struct MetricsWindow {
    /// Per-agent mean task duration, in milliseconds, over the window.
    pub agent_durations_ms: HashMap<AgentId, f64>,
    /// Per-agent success rate in [0, 1] over the window.
    pub agent_success_rates: HashMap<AgentId, f64>,
    /// Minimum sample count required before `slow_agent` fires for an
    /// agent; below this, data is too thin to judge.
    pub agent_sample_counts: HashMap<AgentId, u64>,
    /// Per-mailbox queue depth.
    pub mailbox_depths: HashMap<AgentId, usize>,
    /// Opaque token-budget accounting from an external resource controller.
    pub tokens_consumed: f64,
    pub tokens_total: f64,
    /// Active vs. max participants (quota pressure).
    pub active_participants: usize,
    pub max_participants: usize,
    /// Total pending tasks and the high-priority share of them, in [0, 1].
    pub pending_tasks: usize,
    pub high_priority_share: f64,
    /// Recent consensus proposals and how many timed out.
    pub recent_proposals: u64,
    pub timed_out_proposals: u64,
}
