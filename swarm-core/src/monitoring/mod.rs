//! Event stream (§6): five observable transitions, one [`Monitor`] per
//! kind, recorded into a bounded in-memory history or discarded entirely
//! via [`NoopMonitor`].
//!
//! - [`HealthTransitionEvent`]: agent health-state transitions (§4.4)
//! - [`TopologySwitchEvent`]: topology migrations (§4.3)
//! - [`ConsensusDecisionEvent`]: consensus outcomes (§4.6)
//! - [`BottleneckFindingEvent`]: detector findings (§4.9)
//! - [`HealingActionEvent`]: self-healer recovery actions (§4.10)
//!
//! ```
//! use swarm_core::monitoring::{InMemoryMonitor, Monitor, MonitoringConfig, HealingActionEvent};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let monitor = InMemoryMonitor::<HealingActionEvent>::new(MonitoringConfig::default())?;
//! let snapshot = monitor.snapshot().await?;
//! assert_eq!(snapshot.total_events, 0);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod in_memory;
pub mod noop;
pub mod traits;
pub mod types;

pub use error::MonitoringError;
pub use in_memory::InMemoryMonitor;
pub use noop::NoopMonitor;
pub use traits::{EventSeverity, Monitor, MonitoringEvent};
pub use types::{
    BottleneckFindingEvent, ConsensusDecisionEvent, HealingActionEvent, HealthTransitionEvent,
    HealthTransitionEventKind, MonitoringConfig, MonitoringSnapshot, TopologySwitchEvent,
};
