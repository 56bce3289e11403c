//! Swarm Coordinator (§4.8): the single public facade integrating the
//! agent registry, messaging, topology, health monitor, consensus
//! registry, conflict resolver and state synchronizer.
//!
//! Grounded on the teacher's `ActorSystem`/`SystemConfig`/`SystemError`
//! triangle (`system/actor_system.rs`, `system/builder.rs`,
//! `system/errors.rs`): the facade owns every subsystem behind one
//! struct and exposes a single public surface, exactly as `ActorSystem`
//! owns the registry and broker.

mod config;
mod error;
mod status;

pub use config::{CoordinatorConfig, CoordinatorConfigBuilder};
pub use error::CoordinatorError;
pub use status::AgentStatus;

// Layer 1: Standard library imports
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

// Layer 3: Internal module imports
use crate::conflict::{resolve, Resolution, StateVersion, Strategy};
use crate::consensus::{ConsensusAlgorithm, ConsensusRegistry, ConsensusResult, Proposal, Vote};
use crate::health::HealthMonitor;
use crate::message::Envelope;
use crate::registry::AgentRegistry;
use crate::sync::{InMemoryMemoryProvider, MemoryProvider, StateSynchronizer, SyncOutcome};
use crate::topology::{TopologyEngine, TopologyInfo, TopologyKind};
use crate::util::AgentId;

/// Unified coordination facade (§4.8). Generic over the memory provider
/// backing state synchronization; defaults to the in-process reference
/// implementation.
pub struct SwarmCoordinator<P: MemoryProvider = InMemoryMemoryProvider> {
    registry: AgentRegistry,
    topology: TopologyEngine,
    health_monitor: HealthMonitor,
    consensus: ConsensusRegistry,
    synchronizer: Option<StateSynchronizer<P>>,
    config: CoordinatorConfig,
    sequence: AtomicU64,
}

impl SwarmCoordinator<InMemoryMemoryProvider> {
    /// Build a coordinator with the reference in-memory provider.
    pub fn new(config: CoordinatorConfig) -> Result<Self, CoordinatorError> {
        Self::with_provider(config, Arc::new(InMemoryMemoryProvider::new()))
    }
}

impl<P: MemoryProvider> SwarmCoordinator<P> {
    pub fn with_provider(config: CoordinatorConfig, provider: Arc<P>) -> Result<Self, CoordinatorError> {
        let registry = AgentRegistry::with_mailbox_capacity(config.mailbox_capacity);
        let topology = TopologyEngine::new(config.default_topology, &registry)?;
        let health_monitor = HealthMonitor::new(registry.clone(), config.health);
        let synchronizer = config
            .synchronization_enabled
            .then(|| StateSynchronizer::new(registry.clone(), provider, config.resolve_strategy).with_timeout(config.sync_timeout));

        Ok(Self {
            registry,
            topology,
            health_monitor,
            consensus: ConsensusRegistry::new(),
            synchronizer,
            config,
            sequence: AtomicU64::new(0),
        })
    }

    /// Register an algorithm under its own name so `request_consensus`
    /// can dispatch to it later.
    pub fn register_consensus_algorithm(&mut self, algorithm: Arc<dyn ConsensusAlgorithm + Send + Sync>) {
        self.consensus.register(algorithm);
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }

    fn refresh_topology(&self) -> Result<(), CoordinatorError> {
        self.topology.switch_topology(self.topology.kind(), &self.registry)?;
        Ok(())
    }

    pub fn register_agent(&self, id: AgentId, metadata: HashMap<String, serde_json::Value>) -> Result<(), CoordinatorError> {
        self.registry.register(id, "agent", metadata)?;
        self.refresh_topology()
    }

    /// Register `id` as an explicit child of `parent` under a hierarchical
    /// topology (§4.3's "Add operation specifies parent"). `parent` must
    /// already be registered; cycles are impossible here since a brand new
    /// agent cannot be anyone's ancestor yet, but `Hierarchical::add` still
    /// checks it as the tree's own invariant.
    ///
    /// Only meaningful while the current topology is
    /// [`TopologyKind::Hierarchical`] — every other topology kind ignores
    /// parent/child structure entirely, so this rejects the call instead of
    /// silently recording a hint nothing will ever consult.
    pub fn register_agent_under(&self, id: AgentId, parent: AgentId, metadata: HashMap<String, serde_json::Value>) -> Result<(), CoordinatorError> {
        if self.topology.kind() != TopologyKind::Hierarchical {
            return Err(CoordinatorError::FeatureDisabled("register_agent_under requires a hierarchical topology"));
        }
        if !self.registry.contains(&parent) {
            return Err(crate::topology::TopologyError::UnknownAgent(parent).into());
        }
        self.registry.register(id.clone(), "agent", metadata)?;
        self.topology.register_parent(id, parent);
        self.refresh_topology()
    }

    pub fn unregister_agent(&self, id: &AgentId) -> Result<(), CoordinatorError> {
        self.registry.unregister(id)?;
        self.topology.forget_parent(id);
        self.refresh_topology()
    }

    pub fn send_message(&self, from: AgentId, to: AgentId, payload: serde_json::Value) -> Result<(), CoordinatorError> {
        if from != to && !self.topology.edge_exists(&from, &to) {
            return Err(crate::topology::TopologyError::TopologyViolation {
                from: from.clone(),
                to: to.clone(),
                reason: "no direct edge under the current topology".to_string(),
            }
            .into());
        }
        let envelope = Envelope::new(from.clone(), to.clone(), payload, self.next_sequence());
        self.registry.deliver(&to, envelope)?;
        self.registry.update_heartbeat(&from)?;
        Ok(())
    }

    pub fn broadcast_message(&self, from: AgentId, payload: serde_json::Value, exclude: &[AgentId]) -> Result<usize, CoordinatorError> {
        let recipients = self.topology.direct_recipients(&from);
        let mut delivered = 0usize;
        for recipient in recipients {
            if exclude.contains(&recipient) {
                continue;
            }
            let envelope = Envelope::broadcast(from.clone(), payload.clone(), self.next_sequence());
            if self.registry.deliver(&recipient, envelope).is_ok() {
                delivered += 1;
            }
        }
        self.registry.update_heartbeat(&from)?;
        Ok(delivered)
    }

    pub fn update_agent_heartbeat(&self, id: &AgentId) -> Result<(), CoordinatorError> {
        Ok(self.registry.update_heartbeat(id)?)
    }

    pub fn get_agent_status(&self, id: &AgentId) -> Result<AgentStatus, CoordinatorError> {
        let agent = self.registry.lookup(id).ok_or_else(|| crate::registry::RegistryError::NotFound(id.clone()))?;
        Ok(AgentStatus {
            id: agent.id,
            type_tag: agent.type_tag,
            metadata: agent.metadata,
            health: agent.health,
            mailbox_depth: agent.mailbox.len(),
            last_heartbeat: agent.last_heartbeat,
            registered_at: agent.registered_at,
            uptime_ratio: self.health_monitor.uptime(id, Duration::from_secs(3600)),
        })
    }

    pub fn get_topology_info(&self) -> TopologyInfo {
        self.topology.info(&self.registry)
    }

    pub fn switch_topology(&self, new_kind: TopologyKind) -> Result<Vec<AgentId>, CoordinatorError> {
        Ok(self.topology.switch_topology(new_kind, &self.registry)?)
    }

    pub fn sweep_health(&self) -> Vec<crate::health::HealthAlert> {
        self.health_monitor.sweep()
    }

    pub fn request_consensus(&self, algorithm: &str, proposal: &Proposal, votes: &[Vote]) -> Result<ConsensusResult, CoordinatorError> {
        if !self.config.consensus_enabled {
            return Err(CoordinatorError::FeatureDisabled("consensus"));
        }
        Ok(self.consensus.decide(algorithm, proposal, votes)?)
    }

    pub async fn synchronize_state(&self, key: &str, requester: AgentId) -> Result<SyncOutcome, CoordinatorError> {
        if !self.config.synchronization_enabled {
            return Err(CoordinatorError::FeatureDisabled("synchronization"));
        }
        let synchronizer = self.synchronizer.as_ref().expect("synchronization_enabled implies a synchronizer was built");
        Ok(synchronizer.full_sync(key, requester).await?)
    }

    pub async fn delta_sync(&self, key: &str, since_version: u64) -> Result<Vec<StateVersion>, CoordinatorError> {
        if !self.config.synchronization_enabled {
            return Err(CoordinatorError::FeatureDisabled("synchronization"));
        }
        let synchronizer = self.synchronizer.as_ref().expect("synchronization_enabled implies a synchronizer was built");
        Ok(synchronizer.delta_sync(key, since_version).await?)
    }

    pub fn resolve_conflicts(&self, versions: &[StateVersion]) -> Result<Resolution, CoordinatorError> {
        if !self.config.conflict_resolution_enabled {
            return Err(CoordinatorError::FeatureDisabled("conflict_resolution"));
        }
        Ok(resolve(versions, self.config.resolve_strategy)?)
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::{Choice, Quorum};

    fn coordinator() -> SwarmCoordinator {
        SwarmCoordinator::new(CoordinatorConfig::default()).unwrap()
    }

    #[test]
    fn test_register_agent_updates_topology() {
        let mut coordinator = coordinator();
        coordinator.register_agent(AgentId::new("a"), HashMap::new()).unwrap();
        coordinator.register_agent(AgentId::new("b"), HashMap::new()).unwrap();
        assert_eq!(coordinator.get_topology_info().agent_count, 2);

        let _ = &mut coordinator;
    }

    #[test]
    fn test_send_message_requires_edge() {
        let coordinator = coordinator();
        coordinator.register_agent(AgentId::new("a"), HashMap::new()).unwrap();
        coordinator.register_agent(AgentId::new("b"), HashMap::new()).unwrap();

        coordinator.send_message(AgentId::new("a"), AgentId::new("b"), serde_json::json!("hi")).unwrap();
        let status = coordinator.get_agent_status(&AgentId::new("b")).unwrap();
        assert_eq!(status.mailbox_depth, 1);
    }

    #[test]
    fn test_unregister_agent_removes_from_topology() {
        let coordinator = coordinator();
        coordinator.register_agent(AgentId::new("a"), HashMap::new()).unwrap();
        coordinator.unregister_agent(&AgentId::new("a")).unwrap();
        assert_eq!(coordinator.get_topology_info().agent_count, 0);
    }

    #[test]
    fn test_register_agent_under_builds_deep_hierarchy() {
        let config = CoordinatorConfig { default_topology: TopologyKind::Hierarchical, ..CoordinatorConfig::default() };
        let coordinator = SwarmCoordinator::new(config).unwrap();

        let root = AgentId::new("root");
        let manager = AgentId::new("manager");
        let worker = AgentId::new("worker");

        coordinator.register_agent(root.clone(), HashMap::new()).unwrap();
        coordinator.register_agent_under(manager.clone(), root.clone(), HashMap::new()).unwrap();
        coordinator.register_agent_under(worker.clone(), manager.clone(), HashMap::new()).unwrap();

        assert!(coordinator.topology.edge_exists(&root, &manager));
        assert!(coordinator.topology.edge_exists(&manager, &worker));
        assert!(!coordinator.topology.edge_exists(&root, &worker));
    }

    #[test]
    fn test_register_agent_under_requires_known_parent() {
        let config = CoordinatorConfig { default_topology: TopologyKind::Hierarchical, ..CoordinatorConfig::default() };
        let coordinator = SwarmCoordinator::new(config).unwrap();
        coordinator.register_agent(AgentId::new("root"), HashMap::new()).unwrap();

        let err = coordinator.register_agent_under(AgentId::new("orphan"), AgentId::new("ghost"), HashMap::new()).unwrap_err();
        assert!(matches!(err, CoordinatorError::Topology(crate::topology::TopologyError::UnknownAgent(_))));
    }

    #[test]
    fn test_register_agent_under_rejected_outside_hierarchical() {
        let coordinator = coordinator();
        coordinator.register_agent(AgentId::new("root"), HashMap::new()).unwrap();

        let err = coordinator.register_agent_under(AgentId::new("a"), AgentId::new("root"), HashMap::new()).unwrap_err();
        assert!(matches!(err, CoordinatorError::FeatureDisabled(_)));
    }

    #[test]
    fn test_consensus_disabled_by_config() {
        let config = CoordinatorConfig::builder().with_consensus_enabled(false).build().unwrap();
        let coordinator = SwarmCoordinator::new(config).unwrap();
        let proposal = Proposal::new(AgentId::new("a"), serde_json::json!(null), vec![AgentId::new("a")], Duration::from_secs(1));
        let err = coordinator.request_consensus("quorum", &proposal, &[]).unwrap_err();
        assert!(matches!(err, CoordinatorError::FeatureDisabled("consensus")));
    }

    #[test]
    fn test_request_consensus_dispatches_to_registered_algorithm() {
        let mut coordinator = coordinator();
        coordinator.register_consensus_algorithm(Arc::new(Quorum::default()));

        let proposal = Proposal::new(AgentId::new("a"), serde_json::json!(null), vec![AgentId::new("a"), AgentId::new("b")], Duration::from_secs(1));
        let votes = vec![Vote::new(proposal.id, AgentId::new("a"), Choice::For, 0), Vote::new(proposal.id, AgentId::new("b"), Choice::For, 0)];
        let result = coordinator.request_consensus("quorum", &proposal, &votes).unwrap();
        assert_eq!(result.decision, crate::consensus::Decision::Approved);
    }

    #[tokio::test]
    async fn test_synchronize_state_no_participants() {
        let coordinator = coordinator();
        let outcome = coordinator.synchronize_state("k", AgentId::new("coordinator")).await.unwrap();
        assert!(matches!(outcome, SyncOutcome::NoParticipants));
    }

    #[test]
    fn test_resolve_conflicts_disabled_by_config() {
        let config = CoordinatorConfig::builder().with_conflict_resolution_enabled(false).build().unwrap();
        let coordinator = SwarmCoordinator::new(config).unwrap();
        let versions = vec![StateVersion::new("k", serde_json::json!(1), 1, AgentId::new("a"))];
        assert!(matches!(coordinator.resolve_conflicts(&versions).unwrap_err(), CoordinatorError::FeatureDisabled("conflict_resolution")));
    }
}
