//! Prelude module for convenient imports.
//!
//! Re-exports the types most call sites need to stand up a coordinator,
//! register agents, and run consensus/sync/healing operations:
//!
//! ```rust,ignore
//! use swarm_core::prelude::*;
//! ```
//!
//! # What's Included
//!
//! ## Facade
//! - [`SwarmCoordinator`] - the single integration point
//! - [`CoordinatorConfig`] / [`CoordinatorConfigBuilder`] - facade configuration
//! - [`CoordinatorError`] - unified error type across every subsystem
//! - [`AgentStatus`] - point-in-time agent snapshot
//!
//! ## Registry & identity
//! - [`AgentRegistry`] - agent registration and lookup
//! - [`Agent`] - registry record
//! - [`AgentId`] - agent identifier
//! - [`HealthState`] - Healthy/Degraded/Critical/Failed
//!
//! ## Messaging
//! - [`Envelope`] - message wrapper with sequence and metadata
//! - [`Recipient`] - direct or broadcast addressing
//! - [`MessagePriority`] - priority levels
//! - [`Mailbox`] - bounded per-agent mailbox
//!
//! ## Topology
//! - [`TopologyEngine`] - mesh/star/ring/hierarchical/adaptive routing
//! - [`TopologyKind`] - selectable topology variants
//! - [`TopologyError`] - routing violations
//!
//! ## Health
//! - [`HealthMonitor`] - heartbeat-driven health classification
//! - [`HealthAlert`] - a health-state transition
//!
//! ## Consensus
//! - [`ConsensusRegistry`] - named-algorithm dispatch
//! - [`Quorum`] / [`Weighted`] / [`Gossip`] / [`Byzantine`] - algorithms
//! - [`Proposal`] / [`Vote`] / [`ConsensusResult`] / [`Decision`] - voting types
//!
//! ## Conflict & synchronization
//! - [`StateVersion`] - versioned state with an owner
//! - [`resolve`] / [`Strategy`] / [`Resolution`] - conflict resolution
//! - [`StateSynchronizer`] - full/delta sync over a [`MemoryProvider`]
//!
//! ## Self-healing
//! - [`SelfHealer`] - failure-kind to recovery-strategy healing
//! - [`FailureKind`] / [`HealingStrategy`] / [`HealingOutcome`] - healing vocabulary
//!
//! ## Monitoring
//! - [`Monitor`] - generic event-recording trait
//! - [`InMemoryMonitor`] / [`NoopMonitor`] - reference implementations
//! - [`MonitoringEvent`] / [`EventSeverity`] - event trait and severity

// Facade
pub use crate::coordinator::{
    AgentStatus, CoordinatorConfig, CoordinatorConfigBuilder, CoordinatorError, SwarmCoordinator,
};

// Registry & identity
pub use crate::registry::{Agent, AgentRegistry, HealthState, RegistryError};
pub use crate::util::AgentId;

// Messaging
pub use crate::mailbox::Mailbox;
pub use crate::message::{Envelope, MessagePriority, Recipient};

// Topology
pub use crate::topology::{TopologyEngine, TopologyError, TopologyKind};

// Health
pub use crate::health::{HealthAlert, HealthMonitor};

// Consensus
pub use crate::consensus::{
    Byzantine, ConsensusRegistry, ConsensusResult, Decision, Gossip, Proposal, Quorum, Vote,
    Weighted,
};

// Conflict & synchronization
pub use crate::conflict::{resolve, Resolution, StateVersion, Strategy};
pub use crate::sync::{MemoryProvider, StateSynchronizer};

// Self-healing
pub use crate::healer::{FailureKind, HealingOutcome, HealingStrategy, SelfHealer};

// Monitoring
pub use crate::monitoring::{EventSeverity, InMemoryMonitor, Monitor, MonitoringEvent, NoopMonitor};
