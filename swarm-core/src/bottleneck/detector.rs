//! Rolling-window bottleneck analyzer (§4.9). Pure over its input window:
//! calling `analyze` twice with the same window and `now` produces
//! identical findings.

// Layer 1: Standard library imports
use std::collections::HashMap;
use std::time::Duration;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY

// Layer 3: Internal module imports
use super::types::{Bottleneck, BottleneckKind, MetricsWindow, Severity};

/// Minimum window age a `slow_agent` finding requires to be considered
/// statistically meaningful (§4.9's "at least a minimum sample count").
const DEFAULT_MIN_SAMPLE_COUNT: u64 = 5;

/// Default rolling-window length the detector is meant to be fed from.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

pub struct BottleneckDetector {
    min_sample_count: u64,
}

impl Default for BottleneckDetector {
    fn default() -> Self {
        Self { min_sample_count: DEFAULT_MIN_SAMPLE_COUNT }
    }
}

impl BottleneckDetector {
    pub fn new(min_sample_count: u64) -> Self {
        Self { min_sample_count }
    }

    /// Scan `window` and return every finding it contains, stamped `now`.
    pub fn analyze(&self, window: &MetricsWindow, now: DateTime<Utc>) -> Vec<Bottleneck> {
        let mut findings = Vec::new();

        if let Some(finding) = self.token_exhaustion(window, now) {
            findings.push(finding);
        }
        if let Some(finding) = self.quota_exceeded(window, now) {
            findings.push(finding);
        }
        findings.extend(self.slow_agents(window, now));
        if let Some(finding) = self.queue_backlog(window, now) {
            findings.push(finding);
        }
        if let Some(finding) = self.consensus_timeout(window, now) {
            findings.push(finding);
        }

        findings
    }

    fn token_exhaustion(&self, window: &MetricsWindow, now: DateTime<Utc>) -> Option<Bottleneck> {
        if window.tokens_total <= 0.0 {
            return None;
        }
        let ratio = window.tokens_consumed / window.tokens_total;
        if ratio <= 0.8 {
            return None;
        }
        let impact = ratio.min(1.0);
        Some(Bottleneck {
            kind: BottleneckKind::TokenExhaustion,
            severity: Severity::from_impact(impact),
            affected: Vec::new(),
            impact_score: impact,
            metrics_snapshot: HashMap::from([("token_ratio".to_string(), ratio)]),
            remediations: vec!["raise token budget".to_string(), "reduce concurrent submissions".to_string()],
            detected_at: now,
        })
    }

    fn quota_exceeded(&self, window: &MetricsWindow, now: DateTime<Utc>) -> Option<Bottleneck> {
        if window.max_participants == 0 {
            return None;
        }
        let ratio = window.active_participants as f64 / window.max_participants as f64;
        if ratio <= 0.9 {
            return None;
        }
        let queue_pressure = (window.pending_tasks as f64 / 100.0).min(1.0);
        let impact = (ratio * 0.7 + queue_pressure * 0.3).min(1.0);
        Some(Bottleneck {
            kind: BottleneckKind::QuotaExceeded,
            severity: Severity::from_impact(impact),
            affected: Vec::new(),
            impact_score: impact,
            metrics_snapshot: HashMap::from([
                ("participant_ratio".to_string(), ratio),
                ("queue_pressure".to_string(), queue_pressure),
            ]),
            remediations: vec!["raise quota".to_string(), "shed low-priority participants".to_string()],
            detected_at: now,
        })
    }

    fn slow_agents(&self, window: &MetricsWindow, now: DateTime<Utc>) -> Vec<Bottleneck> {
        if window.agent_durations_ms.is_empty() {
            return Vec::new();
        }
        let mean: f64 = window.agent_durations_ms.values().sum::<f64>() / window.agent_durations_ms.len() as f64;

        window
            .agent_durations_ms
            .iter()
            .filter_map(|(agent, duration)| {
                let samples = *window.agent_sample_counts.get(agent).unwrap_or(&0);
                if samples < self.min_sample_count {
                    return None;
                }
                let success_rate = *window.agent_success_rates.get(agent).unwrap_or(&1.0);
                let is_slow = *duration > mean * 2.0;
                let is_unreliable = success_rate < 0.7;
                if !is_slow && !is_unreliable {
                    return None;
                }

                let duration_ratio = if mean > 0.0 { (*duration / mean / 4.0).min(1.0) } else { 0.0 };
                let failure_weight = (1.0 - success_rate).min(1.0);
                let impact = (duration_ratio * 0.5 + failure_weight * 0.5).min(1.0);

                Some(Bottleneck {
                    kind: BottleneckKind::SlowAgent,
                    severity: Severity::from_impact(impact),
                    affected: vec![agent.clone()],
                    impact_score: impact,
                    metrics_snapshot: HashMap::from([
                        ("duration_ms".to_string(), *duration),
                        ("population_mean_ms".to_string(), mean),
                        ("success_rate".to_string(), success_rate),
                    ]),
                    remediations: vec!["route new work away from this agent".to_string(), "investigate agent workload".to_string()],
                    detected_at: now,
                })
            })
            .collect()
    }

    fn queue_backlog(&self, window: &MetricsWindow, now: DateTime<Utc>) -> Option<Bottleneck> {
        if window.pending_tasks <= 50 {
            return None;
        }
        let backlog_ratio = (window.pending_tasks as f64 / 200.0).min(1.0);
        let impact = (backlog_ratio * 0.6 + window.high_priority_share * 0.4).min(1.0);
        Some(Bottleneck {
            kind: BottleneckKind::QueueBacklog,
            severity: Severity::from_impact(impact),
            affected: window.mailbox_depths.keys().cloned().collect(),
            impact_score: impact,
            metrics_snapshot: HashMap::from([
                ("pending_tasks".to_string(), window.pending_tasks as f64),
                ("high_priority_share".to_string(), window.high_priority_share),
            ]),
            remediations: vec!["add worker capacity".to_string(), "deprioritize low-urgency tasks".to_string()],
            detected_at: now,
        })
    }

    fn consensus_timeout(&self, window: &MetricsWindow, now: DateTime<Utc>) -> Option<Bottleneck> {
        if window.recent_proposals == 0 {
            return None;
        }
        let timeout_ratio = window.timed_out_proposals as f64 / window.recent_proposals as f64;
        if timeout_ratio <= 0.1 {
            return None;
        }
        Some(Bottleneck {
            kind: BottleneckKind::ConsensusTimeout,
            severity: Severity::from_impact(timeout_ratio),
            affected: Vec::new(),
            impact_score: timeout_ratio.min(1.0),
            metrics_snapshot: HashMap::from([("timeout_ratio".to_string(), timeout_ratio)]),
            remediations: vec!["increase consensus timeout budget".to_string(), "reduce participant count".to_string()],
            detected_at: now,
        })
    }
}
