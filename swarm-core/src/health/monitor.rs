//! Periodic heartbeat sweeper (§4.4).
//!
//! Grounded on `supervisor::health_monitor::spawn_health_monitor`'s
//! `tokio::select!` ticker loop with an `oneshot` shutdown channel,
//! generalized from a binary healthy/unhealthy child check to the
//! four-state machine and widened from one supervisor's children to an
//! entire registry.

// Layer 1: Standard library imports
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY
use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{info, warn};

// Layer 3: Internal module imports
use super::alert::{AlertSeverity, HealthAlert};
use super::classify::classify;
use super::config::HealthMonitorConfig;
use super::record::HealthRecord;
use crate::registry::{AgentRegistry, HealthState};
use crate::util::AgentId;

const SAMPLE_HISTORY_CAP: usize = 4096;

struct AgentTracking {
    last_transition: DateTime<Utc>,
    samples: VecDeque<(DateTime<Utc>, HealthState)>,
}

/// Sweeps an [`AgentRegistry`], classifying every agent's heartbeat age
/// and writing transitions back via `set_health_state`.
pub struct HealthMonitor {
    registry: AgentRegistry,
    config: HealthMonitorConfig,
    tracking: DashMap<AgentId, AgentTracking>,
}

impl HealthMonitor {
    pub fn new(registry: AgentRegistry, config: HealthMonitorConfig) -> Self {
        Self { registry, config, tracking: DashMap::new() }
    }

    /// Run one sweep synchronously, returning the alerts raised by any
    /// state transition this cycle.
    pub fn sweep(&self) -> Vec<HealthAlert> {
        let now = Utc::now();
        let mut alerts = Vec::new();

        for agent in self.registry.list_all() {
            let age = agent.heartbeat_age(now);
            let age_duration = Duration::from_secs(age.max(0) as u64);
            let new_state = classify(age_duration, &self.config.thresholds);

            let mut entry = self
                .tracking
                .entry(agent.id.clone())
                .or_insert_with(|| AgentTracking { last_transition: agent.registered_at, samples: VecDeque::new() });

            if new_state != agent.health {
                let severity = HealthAlert::severity_for(agent.health, new_state);
                let _ = self.registry.set_health_state(&agent.id, new_state);
                entry.last_transition = now;

                match severity {
                    AlertSeverity::Info => info!(agent = %agent.id, from = ?agent.health, to = ?new_state, "health transition"),
                    AlertSeverity::Warning => warn!(agent = %agent.id, from = ?agent.health, to = ?new_state, "health transition"),
                    AlertSeverity::Critical => warn!(agent = %agent.id, from = ?agent.health, to = ?new_state, "agent failed"),
                }

                alerts.push(HealthAlert {
                    agent: agent.id.clone(),
                    from: agent.health,
                    to: new_state,
                    severity,
                    heartbeat_age: age_duration,
                    at: now,
                });
            }

            entry.samples.push_back((now, new_state));
            if entry.samples.len() > SAMPLE_HISTORY_CAP {
                entry.samples.pop_front();
            }
        }

        alerts
    }

    /// Per-agent derived summary (§3 `HealthRecord`).
    pub fn record_for(&self, agent_id: &AgentId) -> Option<HealthRecord> {
        let agent = self.registry.lookup(agent_id)?;
        let tracking = self.tracking.get(agent_id)?;
        let age = Duration::from_secs(agent.heartbeat_age(Utc::now()).max(0) as u64);

        Some(HealthRecord {
            heartbeat_age: age,
            state: agent.health,
            consecutive_missed: age.as_secs() / self.config.sweep_interval.as_secs().max(1),
            last_transition: tracking.last_transition,
        })
    }

    /// Fraction of `window` the agent spent in `Healthy`, over recorded
    /// sweep samples within the window.
    pub fn uptime(&self, agent_id: &AgentId, window: Duration) -> f64 {
        let Some(tracking) = self.tracking.get(agent_id) else {
            return 0.0;
        };
        let cutoff = Utc::now() - chrono::Duration::from_std(window).unwrap_or_default();
        let in_window: Vec<&HealthState> = tracking
            .samples
            .iter()
            .filter(|(t, _)| *t >= cutoff)
            .map(|(_, s)| s)
            .collect();

        if in_window.is_empty() {
            return 0.0;
        }
        let healthy = in_window.iter().filter(|s| ***s == HealthState::Healthy).count();
        healthy as f64 / in_window.len() as f64
    }

    /// Spawn a background ticker that sweeps at `config.sweep_interval`
    /// and forwards alerts on `alerts_tx`, until the returned sender is
    /// used to request shutdown.
    pub fn spawn_sweeper(monitor: Arc<Self>, alerts_tx: mpsc::UnboundedSender<HealthAlert>) -> (tokio::task::JoinHandle<()>, tokio::sync::oneshot::Sender<()>) {
        let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel();
        let sweep_interval = monitor.config.sweep_interval;

        let handle = tokio::spawn(async move {
            let mut ticker = interval(sweep_interval);
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        for alert in monitor.sweep() {
                            if alerts_tx.send(alert).is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        });

        (handle, shutdown_tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn registry_with_one() -> AgentRegistry {
        let registry = AgentRegistry::new();
        registry.register(AgentId::new("a1"), "worker", HashMap::new()).unwrap();
        registry
    }

    #[test]
    fn test_fresh_agent_stays_healthy() {
        let registry = registry_with_one();
        let monitor = HealthMonitor::new(registry.clone(), HealthMonitorConfig::default());

        assert!(monitor.sweep().is_empty());
        assert_eq!(registry.lookup(&AgentId::new("a1")).unwrap().health, HealthState::Healthy);
    }

    #[test]
    fn test_stale_heartbeat_transitions_to_failed() {
        let registry = registry_with_one();
        let monitor = HealthMonitor::new(registry.clone(), HealthMonitorConfig {
            thresholds: super::super::config::HealthThresholds {
                healthy_max: Duration::from_secs(0),
                degraded_max: Duration::from_secs(0),
                critical_max: Duration::from_secs(0),
            },
            sweep_interval: Duration::from_secs(5),
        });

        let alerts = monitor.sweep();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].to, HealthState::Failed);
        assert_eq!(alerts[0].severity, AlertSeverity::Critical);
    }

    #[test]
    fn test_uptime_with_no_samples_is_zero() {
        let registry = registry_with_one();
        let monitor = HealthMonitor::new(registry, HealthMonitorConfig::default());
        assert_eq!(monitor.uptime(&AgentId::new("a1"), Duration::from_secs(60)), 0.0);
    }

    #[test]
    fn test_uptime_after_sweep_is_full_when_healthy() {
        let registry = registry_with_one();
        let monitor = HealthMonitor::new(registry, HealthMonitorConfig::default());
        monitor.sweep();
        assert_eq!(monitor.uptime(&AgentId::new("a1"), Duration::from_secs(60)), 1.0);
    }
}
