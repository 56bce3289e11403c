//! The closed-loop recovery controller (§4.10): detector findings and
//! health transitions in, a strategy dispatch and bounded outcome
//! history out.
//!
//! Grounded on the teacher's `supervisor::strategy` (`should_restart`,
//! data-driven policy selection) and `supervisor::backoff`
//! (`RestartBackoff`'s bounded sliding history), generalized from
//! child-restart policy to failure-kind → recovery-strategy selection.

// Layer 1: Standard library imports
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

// Layer 2: Third-party crate imports
use chrono::Utc; // §3.2 MANDATORY
use dashmap::DashMap;
use parking_lot::Mutex;

// Layer 3: Internal module imports
use super::error::HealerError;
use super::types::{Effectiveness, FailureKind, HealingOutcome, HealingStrategy, Trend};
use crate::registry::AgentRegistry;
use crate::util::AgentId;

const DEFAULT_HISTORY_CAPACITY: usize = 500;
const DEFAULT_MAX_RETRY_ATTEMPTS: u32 = 3;
const DEFAULT_PREVENTIVE_THRESHOLD: f64 = 0.7;

pub struct SelfHealer {
    registry: AgentRegistry,
    history: Mutex<VecDeque<HealingOutcome>>,
    history_capacity: usize,
    retry_attempts: DashMap<(AgentId, String), u32>,
    max_retry_attempts: u32,
    preventive_threshold: f64,
}

impl SelfHealer {
    pub fn new(registry: AgentRegistry) -> Self {
        Self {
            registry,
            history: Mutex::new(VecDeque::new()),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            retry_attempts: DashMap::new(),
            max_retry_attempts: DEFAULT_MAX_RETRY_ATTEMPTS,
            preventive_threshold: DEFAULT_PREVENTIVE_THRESHOLD,
        }
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_max_retry_attempts(mut self, attempts: u32) -> Self {
        self.max_retry_attempts = attempts;
        self
    }

    pub fn with_preventive_threshold(mut self, threshold: f64) -> Self {
        self.preventive_threshold = threshold;
        self
    }

    /// Select a strategy by the §4.10 table and apply it once. The
    /// outcome is always recorded, success or failure.
    pub fn apply(&self, failure: FailureKind) -> Result<HealingOutcome, HealerError> {
        let strategy = HealingStrategy::for_failure(&failure);
        let started = Instant::now();

        let result = match &failure {
            FailureKind::AgentFailed { agent } => self.restart_agent(agent),
            FailureKind::TaskTimeout { agent, task_id } => self.retry_task(agent, task_id),
            FailureKind::ResourceExhaustion { agents } => Ok(self.rebalance_resources(agents)),
            FailureKind::QuorumLoss { agents } => self.quorum_recovery(agents),
            FailureKind::SlowAgent { agent } => self.degrade_gradually(agent),
        };

        let duration = started.elapsed();
        match result {
            Ok(success) => {
                let outcome = HealingOutcome {
                    strategy,
                    success,
                    duration,
                    prediction_confirmed: None,
                    recorded_at: Utc::now(),
                };
                self.record(outcome.clone());
                Ok(outcome)
            }
            Err(err) => {
                self.record(HealingOutcome {
                    strategy,
                    success: false,
                    duration,
                    prediction_confirmed: None,
                    recorded_at: Utc::now(),
                });
                Err(err)
            }
        }
    }

    /// Apply a strategy ahead of an actual failure when a prediction's
    /// confidence clears `preventive_threshold`. Returns `None` if the
    /// prediction wasn't confident enough to act on.
    pub fn apply_preventive(&self, failure: FailureKind, confidence: f64) -> Result<Option<HealingOutcome>, HealerError> {
        if confidence < self.preventive_threshold {
            return Ok(None);
        }
        self.apply(failure).map(Some)
    }

    /// Calibrate the most recent matching-strategy outcome against
    /// whether the predicted failure actually happened.
    pub fn confirm_prediction(&self, strategy: HealingStrategy, happened: bool) {
        let mut history = self.history.lock();
        if let Some(outcome) = history.iter_mut().rev().find(|o| o.strategy == strategy) {
            outcome.prediction_confirmed = Some(happened);
        }
    }

    fn restart_agent(&self, agent: &AgentId) -> Result<bool, HealerError> {
        let existing = self.registry.unregister(agent)?;
        self.registry.register(existing.id, existing.type_tag, existing.metadata)?;
        Ok(true)
    }

    fn retry_task(&self, agent: &AgentId, task_id: &str) -> Result<bool, HealerError> {
        let key = (agent.clone(), task_id.to_string());
        let attempts = {
            let mut entry = self.retry_attempts.entry(key).or_insert(0);
            *entry += 1;
            *entry
        };
        if attempts > self.max_retry_attempts {
            return Err(HealerError::RetryBudgetExhausted { agent: agent.clone(), attempts });
        }
        Ok(true)
    }

    fn rebalance_resources(&self, agents: &[AgentId]) -> bool {
        if agents.is_empty() {
            return false;
        }
        let weight = 1.0 / agents.len() as f64;
        for agent in agents {
            let mut updates = HashMap::new();
            updates.insert("resource_weight".to_string(), serde_json::json!(weight));
            let _ = self.registry.update_metadata(agent, updates);
        }
        true
    }

    fn quorum_recovery(&self, agents: &[AgentId]) -> Result<bool, HealerError> {
        if agents.is_empty() {
            return Err(HealerError::NothingToRecover);
        }
        for agent in agents {
            if let Ok(existing) = self.registry.unregister(agent) {
                self.registry.register(existing.id, existing.type_tag, existing.metadata)?;
            }
        }
        Ok(true)
    }

    fn degrade_gradually(&self, agent: &AgentId) -> Result<bool, HealerError> {
        let mut updates = HashMap::new();
        updates.insert("degraded".to_string(), serde_json::json!(true));
        self.registry.update_metadata(agent, updates)?;
        Ok(true)
    }

    fn record(&self, outcome: HealingOutcome) {
        let mut history = self.history.lock();
        history.push_back(outcome);
        while history.len() > self.history_capacity {
            history.pop_front();
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.lock().len()
    }

    /// Success rate, mean time to recovery, and trend of the last third
    /// of a strategy's outcomes against its earlier two-thirds (§4.10).
    pub fn effectiveness(&self, strategy: HealingStrategy) -> Option<Effectiveness> {
        let history = self.history.lock();
        let records: Vec<&HealingOutcome> = history.iter().filter(|o| o.strategy == strategy).collect();
        if records.is_empty() {
            return None;
        }

        let sample_count = records.len();
        let successes = records.iter().filter(|o| o.success).count();
        let success_rate = successes as f64 / sample_count as f64;
        let total_duration: Duration = records.iter().map(|o| o.duration).sum();
        let mean_time_to_recovery = total_duration / sample_count as u32;

        let trend = if sample_count < 3 {
            Trend::Stable
        } else {
            let last_third = sample_count / 3;
            let earlier = &records[..sample_count - last_third];
            let later = &records[sample_count - last_third..];
            let earlier_rate = earlier.iter().filter(|o| o.success).count() as f64 / earlier.len() as f64;
            let later_rate = later.iter().filter(|o| o.success).count() as f64 / later.len() as f64;
            if later_rate > earlier_rate + 0.05 {
                Trend::Improving
            } else if later_rate < earlier_rate - 0.05 {
                Trend::Degrading
            } else {
                Trend::Stable
            }
        };

        Some(Effectiveness { strategy, sample_count, success_rate, mean_time_to_recovery, trend })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(agent: &AgentId) -> AgentRegistry {
        let registry = AgentRegistry::new();
        registry.register(agent.clone(), "worker", HashMap::new()).unwrap();
        registry
    }

    #[test]
    fn test_agent_failed_maps_to_restart_strategy() {
        let agent = AgentId::new("a");
        let healer = SelfHealer::new(registry_with(&agent));
        let outcome = healer.apply(FailureKind::AgentFailed { agent: agent.clone() }).unwrap();
        assert_eq!(outcome.strategy, HealingStrategy::RestartAgent);
        assert!(outcome.success);
        assert!(healer.registry.contains(&agent));
    }

    #[test]
    fn test_retry_task_exhausts_budget() {
        let agent = AgentId::new("a");
        let healer = SelfHealer::new(registry_with(&agent)).with_max_retry_attempts(2);
        let failure = || FailureKind::TaskTimeout { agent: agent.clone(), task_id: "t1".to_string() };

        healer.apply(failure()).unwrap();
        healer.apply(failure()).unwrap();
        let err = healer.apply(failure()).unwrap_err();
        assert!(matches!(err, HealerError::RetryBudgetExhausted { attempts: 3, .. }));
    }

    #[test]
    fn test_quorum_recovery_requires_agents() {
        let healer = SelfHealer::new(AgentRegistry::new());
        let err = healer.apply(FailureKind::QuorumLoss { agents: vec![] }).unwrap_err();
        assert!(matches!(err, HealerError::NothingToRecover));
    }

    #[test]
    fn test_preventive_mode_respects_threshold() {
        let agent = AgentId::new("a");
        let healer = SelfHealer::new(registry_with(&agent));
        let below = healer.apply_preventive(FailureKind::SlowAgent { agent: agent.clone() }, 0.5).unwrap();
        assert!(below.is_none());

        let above = healer.apply_preventive(FailureKind::SlowAgent { agent: agent.clone() }, 0.9).unwrap();
        assert!(above.is_some());
    }

    #[test]
    fn test_effectiveness_tracks_success_rate() {
        let agent = AgentId::new("a");
        let healer = SelfHealer::new(registry_with(&agent));
        for _ in 0..3 {
            healer.apply(FailureKind::AgentFailed { agent: agent.clone() }).unwrap();
        }
        let effectiveness = healer.effectiveness(HealingStrategy::RestartAgent).unwrap();
        assert_eq!(effectiveness.sample_count, 3);
        assert_eq!(effectiveness.success_rate, 1.0);
    }

    #[test]
    fn test_history_is_bounded() {
        let agent = AgentId::new("a");
        let healer = SelfHealer::new(registry_with(&agent)).with_history_capacity(2);
        for _ in 0..5 {
            healer.apply(FailureKind::AgentFailed { agent: agent.clone() }).unwrap();
        }
        assert_eq!(healer.history_len(), 2);
    }
}
