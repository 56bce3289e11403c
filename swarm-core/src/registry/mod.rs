//! Agent registry: the single owner of agent identity, metadata, mailboxes
//! and health state (§4.1).
//!
//! Grounded on the teacher's `ActorRegistry` (`broker/registry.rs`): a
//! `DashMap`-backed table giving O(1) lookup without a global lock. Unlike
//! the teacher's registry, which maps addresses to mailbox *senders* for a
//! generic message type, this one owns the [`Agent`] itself — identity,
//! metadata, health and mailbox all live here because every other
//! subsystem (topology, health monitor, coordinator) only ever needs to
//! resolve an [`AgentId`] to agent state, never to hold it.

pub mod agent;
pub mod error;
pub mod health_state;

pub use agent::Agent;
pub use error::RegistryError;
pub use health_state::HealthState;

// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 2: Third-party crate imports
use chrono::Utc; // §3.2 MANDATORY
use dashmap::DashMap;

// Layer 3: Internal module imports
use crate::message::Envelope;
use crate::util::AgentId;

/// Default mailbox capacity for newly registered agents.
const DEFAULT_MAILBOX_CAPACITY: usize = 256;

/// Lock-free table of every agent known to a coordinator.
///
/// Cheaply cloneable: internally an `Arc<DashMap<..>>` via `DashMap`'s own
/// sharded locking, matching the teacher's `routing_table: Arc<DashMap<..>>`
/// sharing model so a registry handle can be held by the coordinator,
/// topology and health monitor simultaneously without contention on the
/// whole table.
#[derive(Clone, Default)]
pub struct AgentRegistry {
    agents: std::sync::Arc<DashMap<AgentId, Agent>>,
    mailbox_capacity: usize,
}

impl AgentRegistry {
    /// Create an empty registry using the default mailbox capacity.
    pub fn new() -> Self {
        Self {
            agents: std::sync::Arc::new(DashMap::new()),
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
        }
    }

    /// Create an empty registry whose agents get mailboxes of `capacity`.
    pub fn with_mailbox_capacity(capacity: usize) -> Self {
        Self {
            agents: std::sync::Arc::new(DashMap::new()),
            mailbox_capacity: capacity,
        }
    }

    /// Register a new agent. Fails with [`RegistryError::AlreadyRegistered`]
    /// if `id` is already present; the existing entry is left untouched.
    pub fn register(
        &self,
        id: AgentId,
        type_tag: impl Into<String>,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Result<(), RegistryError> {
        if self.agents.contains_key(&id) {
            return Err(RegistryError::AlreadyRegistered(id));
        }

        let agent = Agent::new(id.clone(), type_tag, metadata, self.mailbox_capacity);
        self.agents.insert(id, agent);
        Ok(())
    }

    /// Remove an agent and close its mailbox. Fails with
    /// [`RegistryError::NotFound`] if `id` is absent.
    pub fn unregister(&self, id: &AgentId) -> Result<Agent, RegistryError> {
        self.agents
            .remove(id)
            .map(|(_, agent)| {
                agent.mailbox.close();
                agent
            })
            .ok_or_else(|| RegistryError::NotFound(id.clone()))
    }

    /// Merge `updates` into an agent's metadata map (existing keys are
    /// overwritten, new keys are added).
    pub fn update_metadata(
        &self,
        id: &AgentId,
        updates: HashMap<String, serde_json::Value>,
    ) -> Result<(), RegistryError> {
        let mut agent = self.agents.get_mut(id).ok_or_else(|| RegistryError::NotFound(id.clone()))?;
        agent.metadata.extend(updates);
        Ok(())
    }

    /// Stamp `last_heartbeat` to now. Any inbound message from an agent
    /// should also call this (§4.4: "any send also counts").
    pub fn update_heartbeat(&self, id: &AgentId) -> Result<(), RegistryError> {
        let mut agent = self.agents.get_mut(id).ok_or_else(|| RegistryError::NotFound(id.clone()))?;
        agent.last_heartbeat = Utc::now();
        Ok(())
    }

    /// Overwrite an agent's health classification. The health monitor is
    /// the only expected caller; the registry itself never infers this.
    pub fn set_health_state(&self, id: &AgentId, state: HealthState) -> Result<(), RegistryError> {
        let mut agent = self.agents.get_mut(id).ok_or_else(|| RegistryError::NotFound(id.clone()))?;
        agent.health = state;
        Ok(())
    }

    /// Snapshot a single agent's current state.
    pub fn lookup(&self, id: &AgentId) -> Option<Agent> {
        self.agents.get(id).map(|entry| entry.value().clone())
    }

    /// True if `id` is currently registered.
    pub fn contains(&self, id: &AgentId) -> bool {
        self.agents.contains_key(id)
    }

    /// Snapshot every agent whose health is not [`HealthState::Failed`].
    pub fn list_active(&self) -> Vec<Agent> {
        self.agents
            .iter()
            .filter(|entry| entry.value().health.is_active())
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Snapshot every registered agent, regardless of health.
    pub fn list_all(&self) -> Vec<Agent> {
        self.agents.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// True when no agents are registered.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Deliver `envelope` into the addressed agent's mailbox. Used by the
    /// coordinator's `send_message`/`broadcast_message` operations (§4.8)
    /// once a topology has authorized the route.
    pub fn deliver(&self, recipient: &AgentId, envelope: Envelope) -> Result<bool, RegistryError> {
        let agent = self.agents.get(recipient).ok_or_else(|| RegistryError::NotFound(recipient.clone()))?;
        agent.mailbox.push(envelope).map_err(|_| RegistryError::NotFound(recipient.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_then_lookup() {
        let registry = AgentRegistry::new();
        registry.register(AgentId::new("a1"), "worker", HashMap::new()).unwrap();

        let agent = registry.lookup(&AgentId::new("a1")).unwrap();
        assert_eq!(agent.type_tag, "worker");
        assert_eq!(agent.health, HealthState::Healthy);
    }

    #[test]
    fn test_double_register_fails() {
        let registry = AgentRegistry::new();
        registry.register(AgentId::new("a1"), "worker", HashMap::new()).unwrap();

        let err = registry.register(AgentId::new("a1"), "worker", HashMap::new()).unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyRegistered(_)));
    }

    #[test]
    fn test_unregister_removes_and_closes_mailbox() {
        let registry = AgentRegistry::new();
        registry.register(AgentId::new("a1"), "worker", HashMap::new()).unwrap();

        let agent = registry.unregister(&AgentId::new("a1")).unwrap();
        assert!(agent.mailbox.is_closed());
        assert!(registry.lookup(&AgentId::new("a1")).is_none());
    }

    #[test]
    fn test_unregister_missing_fails() {
        let registry = AgentRegistry::new();
        assert!(matches!(
            registry.unregister(&AgentId::new("ghost")).unwrap_err(),
            RegistryError::NotFound(_)
        ));
    }

    #[test]
    fn test_update_metadata_merges() {
        let registry = AgentRegistry::new();
        let mut initial = HashMap::new();
        initial.insert("role".to_string(), serde_json::json!("scout"));
        registry.register(AgentId::new("a1"), "worker", initial).unwrap();

        let mut updates = HashMap::new();
        updates.insert("region".to_string(), serde_json::json!("us-east"));
        registry.update_metadata(&AgentId::new("a1"), updates).unwrap();

        let agent = registry.lookup(&AgentId::new("a1")).unwrap();
        assert_eq!(agent.metadata["role"], serde_json::json!("scout"));
        assert_eq!(agent.metadata["region"], serde_json::json!("us-east"));
    }

    #[test]
    fn test_update_heartbeat_advances_timestamp() {
        let registry = AgentRegistry::new();
        registry.register(AgentId::new("a1"), "worker", HashMap::new()).unwrap();

        let before = registry.lookup(&AgentId::new("a1")).unwrap().last_heartbeat;
        std::thread::sleep(std::time::Duration::from_millis(5));
        registry.update_heartbeat(&AgentId::new("a1")).unwrap();
        let after = registry.lookup(&AgentId::new("a1")).unwrap().last_heartbeat;

        assert!(after > before);
    }

    #[test]
    fn test_set_health_state() {
        let registry = AgentRegistry::new();
        registry.register(AgentId::new("a1"), "worker", HashMap::new()).unwrap();
        registry.set_health_state(&AgentId::new("a1"), HealthState::Critical).unwrap();

        assert_eq!(registry.lookup(&AgentId::new("a1")).unwrap().health, HealthState::Critical);
    }

    #[test]
    fn test_list_active_excludes_failed() {
        let registry = AgentRegistry::new();
        registry.register(AgentId::new("a1"), "worker", HashMap::new()).unwrap();
        registry.register(AgentId::new("a2"), "worker", HashMap::new()).unwrap();
        registry.set_health_state(&AgentId::new("a2"), HealthState::Failed).unwrap();

        let active = registry.list_active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, AgentId::new("a1"));
        assert_eq!(registry.list_all().len(), 2);
    }

    #[test]
    fn test_deliver_enqueues_into_mailbox() {
        let registry = AgentRegistry::new();
        registry.register(AgentId::new("a1"), "worker", HashMap::new()).unwrap();

        let envelope = Envelope::new(AgentId::new("a0"), AgentId::new("a1"), serde_json::json!("hi"), 1);
        registry.deliver(&AgentId::new("a1"), envelope).unwrap();

        let agent = registry.lookup(&AgentId::new("a1")).unwrap();
        assert_eq!(agent.mailbox.len(), 1);
    }

    #[test]
    fn test_reregister_after_unregister_succeeds_cleanly() {
        let registry = AgentRegistry::new();
        let id = AgentId::new("a1");

        let mut initial = HashMap::new();
        initial.insert("role".to_string(), serde_json::json!("scout"));
        registry.register(id.clone(), "worker", initial).unwrap();
        registry.set_health_state(&id, HealthState::Critical).unwrap();

        registry.unregister(&id).unwrap();
        assert!(!registry.contains(&id));

        registry.register(id.clone(), "worker", HashMap::new()).unwrap();

        let agent = registry.lookup(&id).unwrap();
        assert_eq!(agent.health, HealthState::Healthy);
        assert!(agent.metadata.is_empty());
        assert!(!agent.mailbox.is_closed());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_clone_shares_table() {
        let registry = AgentRegistry::new();
        let handle = registry.clone();

        registry.register(AgentId::new("a1"), "worker", HashMap::new()).unwrap();
        assert!(handle.contains(&AgentId::new("a1")));
    }
}
