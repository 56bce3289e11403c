//! The event-recording contract every subsystem's monitor shares (§6).

// Layer 1: Standard library imports
use std::fmt::Debug;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::error::MonitoringError;
use super::types::MonitoringSnapshot;

/// How significant a recorded event is, lowest to highest.
///
/// Never set by a caller directly — each event type in `types.rs` derives
/// its own severity from the domain state it carries (a health transition
/// to `Failed` is `Critical`, a clean topology switch is `Info`, and so
/// on), so this enum exists purely for ordering and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum EventSeverity {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

/// One of the five observable transitions in §6's event stream.
///
/// Implemented by [`HealthTransitionEvent`](super::types::HealthTransitionEvent),
/// [`TopologySwitchEvent`](super::types::TopologySwitchEvent),
/// [`ConsensusDecisionEvent`](super::types::ConsensusDecisionEvent),
/// [`BottleneckFindingEvent`](super::types::BottleneckFindingEvent) and
/// [`HealingActionEvent`](super::types::HealingActionEvent) — never by
/// arbitrary caller-defined event types, since `Monitor<E>` only ever
/// gets instantiated over this fixed set.
pub trait MonitoringEvent: Send + Sync + Clone + Debug + Serialize + 'static {
    /// Static identifier used when exporting events to an external sink.
    const EVENT_TYPE: &'static str;

    fn timestamp(&self) -> DateTime<Utc>;

    /// Severity computed from this event's own fields (§6: "severity is a
    /// function of the event, not a caller-supplied tag").
    fn severity(&self) -> EventSeverity;
}

/// Records, snapshots and resets a stream of `E`-typed events.
///
/// One monitor instance exists per event kind — a coordinator wires up
/// five, one each for health, topology, consensus, bottleneck and healing
/// events — so implementations stay generic over `E` rather than
/// collapsing everything into one untyped event bus.
#[async_trait]
pub trait Monitor<E: MonitoringEvent>: Send + Sync + Clone {
    /// Records `event`, subject to the monitor's configured severity
    /// filter and history capacity.
    async fn record(&self, event: E) -> Result<(), MonitoringError>;

    /// Current counters and recent history.
    async fn snapshot(&self) -> Result<MonitoringSnapshot<E>, MonitoringError>;

    /// Clears counters and history back to empty.
    async fn reset(&self) -> Result<(), MonitoringError>;
}
