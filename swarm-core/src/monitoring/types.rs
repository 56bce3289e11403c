//! Monitoring event types and configuration structures.
//!
//! Five event kinds cover the swarm's observable transitions (§6 Event
//! stream): a health-state change, a topology switch, a consensus
//! decision, a bottleneck finding, and a healing action. Kept in the
//! shape of the teacher's per-subsystem event structs (`timestamp` +
//! a `*Kind` enum + free-form `metadata`), specialized away from actor
//! lifecycle/broker/mailbox events toward this crate's own subsystems.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::traits::{EventSeverity, MonitoringEvent};
use crate::bottleneck::{BottleneckKind, Severity as BottleneckSeverity};
use crate::consensus::Decision;
use crate::healer::HealingStrategy;
use crate::registry::HealthState;
use crate::topology::TopologyKind;
use crate::util::AgentId;

/// Configuration for monitoring behavior.
///
/// Controls how events are recorded, filtered, and stored in the monitor.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringConfig {
    /// Whether monitoring is enabled
    pub enabled: bool,

    /// Maximum number of events to keep in history
    pub max_history_size: usize,

    /// Minimum severity level to record (events below this are filtered)
    pub severity_filter: EventSeverity,

    /// Interval for snapshot generation (if using background snapshots)
    #[serde(with = "crate::util::duration_serde")]
    pub snapshot_interval: Duration,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_history_size: 1000,
            severity_filter: EventSeverity::Info,
            snapshot_interval: Duration::from_secs(60),
        }
    }
}

/// Snapshot of monitoring state at a point in time.
///
/// Provides queryable access to monitoring counters and recent event history.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringSnapshot<E: MonitoringEvent> {
    /// Timestamp when snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Total number of events recorded
    pub total_events: u64,

    /// Number of trace-level events
    pub trace_count: u64,

    /// Number of debug-level events
    pub debug_count: u64,

    /// Number of info-level events
    pub info_count: u64,

    /// Number of warning-level events
    pub warning_count: u64,

    /// Number of error-level events
    pub error_count: u64,

    /// Number of critical-level events
    pub critical_count: u64,

    /// Recent events (up to max_history_size)
    pub recent_events: Vec<E>,
}

// ============================================================================
// Health Transition Events
// ============================================================================

/// An agent's health-state transition, mirroring `health::HealthAlert`
/// but reshaped into the monitoring event surface so it can flow through
/// `Monitor<E>` alongside every other event kind.
#[derive(Debug, Clone, Serialize)]
pub struct HealthTransitionEvent {
    pub timestamp: DateTime<Utc>,
    pub agent: AgentId,
    pub event_kind: HealthTransitionEventKind,
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for HealthTransitionEvent {
    const EVENT_TYPE: &'static str = "health_transition";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match self.event_kind.to {
            HealthState::Failed => EventSeverity::Critical,
            HealthState::Critical => EventSeverity::Warning,
            HealthState::Degraded => EventSeverity::Info,
            HealthState::Healthy => EventSeverity::Info,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthTransitionEventKind {
    pub from: HealthState,
    pub to: HealthState,
    #[serde(with = "crate::util::duration_serde")]
    pub heartbeat_age: Duration,
}

// ============================================================================
// Topology Switch Events
// ============================================================================

/// A topology migration, successful or not, with the agents that fell
/// out of reach.
#[derive(Debug, Clone, Serialize)]
pub struct TopologySwitchEvent {
    pub timestamp: DateTime<Utc>,
    pub from: TopologyKind,
    pub to: TopologyKind,
    pub unreachable: Vec<AgentId>,
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for TopologySwitchEvent {
    const EVENT_TYPE: &'static str = "topology_switch";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        if self.unreachable.is_empty() {
            EventSeverity::Info
        } else {
            EventSeverity::Warning
        }
    }
}

// ============================================================================
// Consensus Decision Events
// ============================================================================

/// The outcome of a `request_consensus` call.
#[derive(Debug, Clone, Serialize)]
pub struct ConsensusDecisionEvent {
    pub timestamp: DateTime<Utc>,
    pub algorithm: String,
    pub decision: Decision,
    pub participant_count: usize,
    pub detected_malicious: Vec<AgentId>,
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for ConsensusDecisionEvent {
    const EVENT_TYPE: &'static str = "consensus_decision";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match self.decision {
            Decision::Approved => EventSeverity::Info,
            Decision::Rejected => EventSeverity::Info,
            Decision::Timeout => EventSeverity::Warning,
        }
    }
}

// ============================================================================
// Bottleneck Finding Events
// ============================================================================

/// A detector finding (§4.9), carried through the event stream at the
/// severity the detector already assigned it.
#[derive(Debug, Clone, Serialize)]
pub struct BottleneckFindingEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: BottleneckKind,
    pub finding_severity: BottleneckSeverity,
    pub affected: Vec<AgentId>,
    pub impact_score: f64,
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for BottleneckFindingEvent {
    const EVENT_TYPE: &'static str = "bottleneck_finding";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match self.finding_severity {
            BottleneckSeverity::Low => EventSeverity::Info,
            BottleneckSeverity::Medium => EventSeverity::Warning,
            BottleneckSeverity::High => EventSeverity::Warning,
            BottleneckSeverity::Critical => EventSeverity::Critical,
        }
    }
}

// ============================================================================
// Healing Action Events
// ============================================================================

/// A recovery action applied by the self-healer, success or failure.
#[derive(Debug, Clone, Serialize)]
pub struct HealingActionEvent {
    pub timestamp: DateTime<Utc>,
    pub strategy: HealingStrategy,
    pub success: bool,
    #[serde(with = "crate::util::duration_serde")]
    pub duration: Duration,
    pub preventive: bool,
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for HealingActionEvent {
    const EVENT_TYPE: &'static str = "healing_action";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        if self.success {
            EventSeverity::Info
        } else {
            EventSeverity::Error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitoring_config_default() {
        let config = MonitoringConfig::default();
        assert!(config.enabled);
        assert_eq!(config.max_history_size, 1000);
        assert_eq!(config.severity_filter, EventSeverity::Info);
        assert_eq!(config.snapshot_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_health_transition_event_severity() {
        let event = HealthTransitionEvent {
            timestamp: Utc::now(),
            agent: AgentId::new("a"),
            event_kind: HealthTransitionEventKind {
                from: HealthState::Critical,
                to: HealthState::Failed,
                heartbeat_age: Duration::from_secs(31),
            },
            metadata: HashMap::new(),
        };

        assert_eq!(event.severity(), EventSeverity::Critical);
        assert_eq!(HealthTransitionEvent::EVENT_TYPE, "health_transition");
    }

    #[test]
    fn test_topology_switch_event_severity() {
        let event = TopologySwitchEvent {
            timestamp: Utc::now(),
            from: TopologyKind::Mesh,
            to: TopologyKind::Star,
            unreachable: vec![AgentId::new("a")],
            metadata: HashMap::new(),
        };

        assert_eq!(event.severity(), EventSeverity::Warning);
        assert_eq!(TopologySwitchEvent::EVENT_TYPE, "topology_switch");
    }

    #[test]
    fn test_consensus_decision_event_severity() {
        let event = ConsensusDecisionEvent {
            timestamp: Utc::now(),
            algorithm: "quorum".to_string(),
            decision: Decision::Timeout,
            participant_count: 5,
            detected_malicious: vec![],
            metadata: HashMap::new(),
        };

        assert_eq!(event.severity(), EventSeverity::Warning);
        assert_eq!(ConsensusDecisionEvent::EVENT_TYPE, "consensus_decision");
    }

    #[test]
    fn test_bottleneck_finding_event_severity() {
        let event = BottleneckFindingEvent {
            timestamp: Utc::now(),
            kind: BottleneckKind::QueueBacklog,
            finding_severity: BottleneckSeverity::Critical,
            affected: vec![AgentId::new("a")],
            impact_score: 0.95,
            metadata: HashMap::new(),
        };

        assert_eq!(event.severity(), EventSeverity::Critical);
        assert_eq!(BottleneckFindingEvent::EVENT_TYPE, "bottleneck_finding");
    }

    #[test]
    fn test_healing_action_event_severity() {
        let event = HealingActionEvent {
            timestamp: Utc::now(),
            strategy: HealingStrategy::RestartAgent,
            success: false,
            duration: Duration::from_millis(5),
            preventive: false,
            metadata: HashMap::new(),
        };

        assert_eq!(event.severity(), EventSeverity::Error);
        assert_eq!(HealingActionEvent::EVENT_TYPE, "healing_action");
    }

    #[test]
    fn test_monitoring_snapshot_creation() {
        let snapshot = MonitoringSnapshot::<HealthTransitionEvent> {
            timestamp: Utc::now(),
            total_events: 100,
            trace_count: 10,
            debug_count: 20,
            info_count: 30,
            warning_count: 25,
            error_count: 10,
            critical_count: 5,
            recent_events: vec![],
        };

        assert_eq!(snapshot.total_events, 100);
        assert_eq!(snapshot.trace_count, 10);
        assert_eq!(snapshot.critical_count, 5);
    }
}
