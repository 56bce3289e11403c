//! # swarm-core - Coordination Runtime for Multi-Agent Swarms
//!
//! A coordination layer for swarms of autonomous agents: agent
//! registration and health tracking, pluggable network topologies,
//! consensus algorithms (majority quorum, weighted voting, gossip,
//! Byzantine-tolerant), CRDT-backed state synchronization, bottleneck
//! detection and self-healing recovery, all observed through a single
//! generic event stream.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use swarm_core::prelude::*;
//! use std::collections::HashMap;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut coordinator = SwarmCoordinator::new(CoordinatorConfig::default())?;
//!
//!     let agent = AgentId::new("worker-1");
//!     coordinator.register_agent(agent.clone(), HashMap::new())?;
//!
//!     coordinator.update_agent_heartbeat(&agent)?;
//!     let status = coordinator.get_agent_status(&agent)?;
//!     println!("{:?}", status.health);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! ## Agents & messaging
//! - [`util`] - identifiers, vector clocks, shared serde helpers
//! - [`registry`] - agent registration, metadata, health state
//! - [`message`] - envelopes, priorities, recipient addressing
//! - [`mailbox`] - bounded per-agent mailboxes with backpressure
//!
//! ## Topology & health
//! - [`topology`] - mesh/star/ring/hierarchical/adaptive topology engines
//! - [`health`] - heartbeat-driven health classification and alerts
//! - [`bottleneck`] - resource and consensus bottleneck detection
//!
//! ## Agreement & state
//! - [`consensus`] - quorum, weighted, gossip and Byzantine algorithms
//! - [`conflict`] - last-writer-wins and CRDT conflict resolution
//! - [`sync`] - full and delta state synchronization
//!
//! ## Recovery & observability
//! - [`healer`] - failure-kind to recovery-strategy healing
//! - [`monitoring`] - the generic `Monitor<E>` event stream
//!
//! ## Facade
//! - [`coordinator`] - `SwarmCoordinator`, the single integration point
//!
//! # Architecture Principles
//!
//! ## Zero-cost generic dispatch
//! `SwarmCoordinator<P: MemoryProvider>` and `Monitor<E: MonitoringEvent>`
//! are generic over their provider/event types rather than boxed trait
//! objects, so routing and recording monomorphize at compile time.
//!
//! ## Feature-flag gating, not silent no-ops
//! Consensus, conflict resolution and synchronization are each gated by
//! a `CoordinatorConfig` flag; calling a gated operation while its flag
//! is off returns `CoordinatorError::FeatureDisabled` rather than
//! quietly doing nothing.
//!
//! ## Bounded history everywhere
//! Health records, consensus round history, healing outcomes and the
//! monitoring event stream are all bounded ring buffers - no subsystem
//! grows without limit under sustained load.

pub mod bottleneck;
pub mod conflict;
pub mod consensus;
pub mod coordinator;
pub mod health;
pub mod healer;
pub mod mailbox;
pub mod message;
pub mod monitoring;
pub mod prelude;
pub mod registry;
pub mod sync;
pub mod topology;
pub mod util;

// Re-export commonly used types
pub use bottleneck::{Bottleneck, BottleneckDetector, BottleneckKind, MetricsWindow, Severity};
pub use conflict::{
    resolve, ConflictError, CrdtType, Explanation, Resolution, StateVersion, Strategy,
};
pub use consensus::{
    Byzantine, Choice, ConsensusAlgorithm, ConsensusError, ConsensusRegistry, ConsensusResult,
    Decision, Gossip, Proposal, Quorum, Tally, Vote, Weighted,
};
pub use coordinator::{
    AgentStatus, CoordinatorConfig, CoordinatorConfigBuilder, CoordinatorError, SwarmCoordinator,
};
pub use health::{AlertSeverity, HealthAlert, HealthMonitor, HealthMonitorConfig, HealthRecord};
pub use healer::{
    Effectiveness, FailureKind, HealerError, HealingOutcome, HealingStrategy, SelfHealer,
};
pub use mailbox::{Mailbox, MailboxCapacity, MailboxError};
pub use message::{Envelope, MessageKind, MessagePriority, Recipient};
pub use monitoring::{
    BottleneckFindingEvent, ConsensusDecisionEvent, EventSeverity, HealingActionEvent,
    HealthTransitionEvent, InMemoryMonitor, Monitor, MonitoringConfig, MonitoringError,
    MonitoringEvent, MonitoringSnapshot, NoopMonitor, TopologySwitchEvent,
};
pub use registry::{Agent, AgentRegistry, HealthState, RegistryError};
pub use sync::{InMemoryMemoryProvider, MemoryProvider, StateSynchronizer, SyncError, SyncOutcome};
pub use topology::{TopologyEngine, TopologyError, TopologyInfo, TopologyKind};
pub use util::{AgentId, CorrelationId, MessageId, VectorClock};
