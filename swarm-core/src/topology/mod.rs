//! Topology Engine: five routing disciplines sharing one contract, plus
//! live migration that preserves the registry (§4.3).
//!
//! No direct teacher analogue — the teacher has one fixed point-to-point
//! broker, not five routing disciplines. Structure shapes are grounded on
//! swarm-topology examples elsewhere in the retrieval pack; the
//! `parking_lot::RwLock`-guarded mutable-structure pattern mirrors the
//! teacher's supervisor tree, generalized to five variants instead of one.

pub mod adaptive;
pub mod contract;
pub mod error;
pub mod hierarchical;
pub mod info;
pub mod kind;
pub mod mesh;
pub mod non_adaptive;
pub mod ring;
pub mod star;

pub use adaptive::Adaptive;
pub use contract::RoutingContract;
pub use error::TopologyError;
pub use hierarchical::Hierarchical;
pub use info::{HealthStateKey, TopologyInfo};
pub use kind::{SelectionPolicy, TopologyKind};
pub use mesh::Mesh;
pub use non_adaptive::NonAdaptive;
pub use ring::Ring;
pub use star::{HubLoad, Star};

// Layer 1: Standard library imports
use std::collections::BTreeMap;

// Layer 2: Third-party crate imports
use parking_lot::RwLock;

// Layer 3: Internal module imports
use crate::registry::AgentRegistry;
use crate::util::AgentId;

/// The discriminated topology value itself (§3): a concrete variant, or an
/// adaptive wrapper holding one.
#[derive(Debug, Clone)]
pub enum Topology {
    Concrete(NonAdaptive),
    Adaptive(Adaptive),
}

impl RoutingContract for Topology {
    fn direct_recipients(&self, sender: &AgentId) -> Vec<AgentId> {
        match self {
            Self::Concrete(t) => t.direct_recipients(sender),
            Self::Adaptive(a) => a.direct_recipients(sender),
        }
    }

    fn edge_exists(&self, from: &AgentId, to: &AgentId) -> bool {
        match self {
            Self::Concrete(t) => t.edge_exists(from, to),
            Self::Adaptive(a) => a.edge_exists(from, to),
        }
    }

    fn members(&self) -> Vec<AgentId> {
        match self {
            Self::Concrete(t) => t.members(),
            Self::Adaptive(a) => a.members(),
        }
    }

    fn visualize(&self) -> String {
        match self {
            Self::Concrete(t) => t.visualize(),
            Self::Adaptive(a) => a.visualize(),
        }
    }
}

impl Topology {
    pub fn kind(&self) -> TopologyKind {
        match self {
            Self::Concrete(NonAdaptive::Mesh(_)) => TopologyKind::Mesh,
            Self::Concrete(NonAdaptive::Hierarchical(_)) => TopologyKind::Hierarchical,
            Self::Concrete(NonAdaptive::Star(_)) => TopologyKind::Star,
            Self::Concrete(NonAdaptive::Ring(_)) => TopologyKind::Ring,
            Self::Adaptive(_) => TopologyKind::Adaptive,
        }
    }

    /// Deterministically rebuild `kind` from the agents currently in
    /// `registry`, ordered by registration time (ties by id) so the same
    /// registry always yields the same structure (§4.3 invariant).
    ///
    /// `explicit_parents` carries caller-supplied parent assignments
    /// recorded by [`TopologyEngine::register_parent`] — without it every
    /// rebuild would attach every non-root agent directly under the root,
    /// since the registry itself tracks no parent/child relationship.
    /// Agents with no recorded hint fall back to the root, preserving the
    /// original flat shape for topologies that never call that method.
    fn build(kind: TopologyKind, registry: &AgentRegistry, explicit_parents: &BTreeMap<AgentId, AgentId>) -> Result<Topology, TopologyError> {
        let mut agents = registry.list_all();
        agents.sort_by(|a, b| a.registered_at.cmp(&b.registered_at).then_with(|| a.id.cmp(&b.id)));
        let ids: Vec<AgentId> = agents.into_iter().map(|a| a.id).collect();

        let concrete = match kind {
            TopologyKind::Mesh => NonAdaptive::Mesh(Mesh::from_members(ids)),
            TopologyKind::Ring => NonAdaptive::Ring(Ring::from_members(ids)),
            TopologyKind::Star => {
                let mut iter = ids.into_iter();
                let hub = iter.next();
                let mut star = Star::new(hub.unwrap_or_else(|| AgentId::new("__no_hub__")));
                for spoke in iter {
                    star.add_spoke(spoke);
                }
                NonAdaptive::Star(star)
            }
            TopologyKind::Hierarchical => {
                let mut iter = ids.into_iter();
                let mut tree = Hierarchical::new();
                if let Some(root) = iter.next() {
                    tree.set_root(root.clone());
                    for child in iter {
                        let parent = explicit_parents.get(&child).cloned().unwrap_or_else(|| root.clone());
                        tree.add(child, parent)?;
                    }
                }
                NonAdaptive::Hierarchical(tree)
            }
            TopologyKind::Adaptive => {
                return Err(TopologyError::UnsupportedKind("adaptive has no flat build".to_string()));
            }
        };
        Ok(Topology::Concrete(concrete))
    }
}

/// Reader-writer-locked topology structure, owned by the coordinator.
///
/// `switch_topology` takes the writer lock and completes before any new
/// send observes the new topology, satisfying the atomic-migration-barrier
/// requirement (§5).
pub struct TopologyEngine {
    current: RwLock<Topology>,
    /// Caller-supplied parent assignments for [`TopologyKind::Hierarchical`]
    /// (§4.3's "Add operation specifies parent"), consulted by every
    /// rebuild so an explicit tree shape survives `switch_topology`. Unused
    /// by every other topology kind.
    hierarchy_parents: RwLock<BTreeMap<AgentId, AgentId>>,
}

impl TopologyEngine {
    /// Build a fresh engine of `kind` from whatever is currently in
    /// `registry` (typically empty at construction time).
    pub fn new(kind: TopologyKind, registry: &AgentRegistry) -> Result<Self, TopologyError> {
        let empty = BTreeMap::new();
        let topology = if kind == TopologyKind::Adaptive {
            Topology::Adaptive(Adaptive::new(
                Topology::build(TopologyKind::Mesh, registry, &empty)?.into_concrete(),
                SelectionPolicy::default(),
            ))
        } else {
            Topology::build(kind, registry, &empty)?
        };
        Ok(Self { current: RwLock::new(topology), hierarchy_parents: RwLock::new(BTreeMap::new()) })
    }

    /// Record that `agent` should hang off `parent` on every future
    /// hierarchical rebuild, instead of the default flat attachment to the
    /// tree's root. Does not itself trigger a rebuild; callers rebuild via
    /// [`Self::switch_topology`] afterwards.
    pub fn register_parent(&self, agent: AgentId, parent: AgentId) {
        self.hierarchy_parents.write().insert(agent, parent);
    }

    /// Drop any recorded parent hint for `agent`, so a later re-registration
    /// under the same id starts out flat again unless re-parented.
    pub fn forget_parent(&self, agent: &AgentId) {
        self.hierarchy_parents.write().remove(agent);
    }

    /// Direct recipients for `sender` under the current topology.
    pub fn direct_recipients(&self, sender: &AgentId) -> Vec<AgentId> {
        self.current.read().direct_recipients(sender)
    }

    /// Whether `from -> to` is a direct edge under the current topology.
    pub fn edge_exists(&self, from: &AgentId, to: &AgentId) -> bool {
        self.current.read().edge_exists(from, to)
    }

    /// ASCII rendering of the current structure.
    pub fn visualize(&self) -> String {
        self.current.read().visualize()
    }

    pub fn kind(&self) -> TopologyKind {
        self.current.read().kind()
    }

    /// Live-migrate to `new_kind`, rebuilding from `registry`. Agents in
    /// `registry` that the new structure cannot place (currently: only
    /// possible for an empty registry) are returned as unreachable, per
    /// the "receive a warning event" contract — callers surface those as
    /// monitoring events.
    pub fn switch_topology(&self, new_kind: TopologyKind, registry: &AgentRegistry) -> Result<Vec<AgentId>, TopologyError> {
        let before: std::collections::BTreeSet<AgentId> = self.current.read().members().into_iter().collect();

        let parents = self.hierarchy_parents.read().clone();
        let mut guard = self.current.write();
        let rebuilt = if new_kind == TopologyKind::Adaptive {
            let inner = Topology::build(TopologyKind::Mesh, registry, &parents)?.into_concrete();
            Topology::Adaptive(Adaptive::new(inner, SelectionPolicy::default()))
        } else {
            Topology::build(new_kind, registry, &parents)?
        };
        let after: std::collections::BTreeSet<AgentId> = rebuilt.members().into_iter().collect();
        *guard = rebuilt;
        drop(guard);

        Ok(before.difference(&after).cloned().collect())
    }

    /// Switch to adaptive with an explicit initial inner topology instead
    /// of the default (mesh).
    pub fn switch_topology_to_adaptive(&self, initial: TopologyKind, registry: &AgentRegistry) -> Result<Vec<AgentId>, TopologyError> {
        if initial == TopologyKind::Adaptive {
            return Err(TopologyError::UnsupportedKind("adaptive cannot nest itself".to_string()));
        }
        let before: std::collections::BTreeSet<AgentId> = self.current.read().members().into_iter().collect();
        let parents = self.hierarchy_parents.read().clone();
        let inner = Topology::build(initial, registry, &parents)?.into_concrete();
        let rebuilt = Topology::Adaptive(Adaptive::new(inner, SelectionPolicy::default()));
        let after: std::collections::BTreeSet<AgentId> = rebuilt.members().into_iter().collect();

        *self.current.write() = rebuilt;
        Ok(before.difference(&after).cloned().collect())
    }

    /// Build the `get_topology_info` summary (§4.8): kind, agent count,
    /// edge summary, health tally.
    pub fn info(&self, registry: &AgentRegistry) -> TopologyInfo {
        let guard = self.current.read();
        let members = guard.members();
        let edge_count = members
            .iter()
            .flat_map(|from| members.iter().map(move |to| (from, to)))
            .filter(|(from, to)| from != to && guard.edge_exists(from, to))
            .count();

        let mut health_tally = std::collections::BTreeMap::new();
        for agent in registry.list_all() {
            *health_tally.entry(HealthStateKey::from(agent.health)).or_insert(0) += 1;
        }

        TopologyInfo {
            kind: guard.kind(),
            agent_count: members.len(),
            edge_count,
            health_tally,
        }
    }
}

impl Topology {
    fn into_concrete(self) -> NonAdaptive {
        match self {
            Self::Concrete(c) => c,
            Self::Adaptive(a) => (*a.inner()).clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn registry_with(ids: &[&str]) -> AgentRegistry {
        let registry = AgentRegistry::new();
        for id in ids {
            registry.register(AgentId::new(*id), "worker", HashMap::new()).unwrap();
        }
        registry
    }

    #[test]
    fn test_mesh_build_connects_all() {
        let registry = registry_with(&["a", "b", "c"]);
        let engine = TopologyEngine::new(TopologyKind::Mesh, &registry).unwrap();
        assert_eq!(engine.direct_recipients(&AgentId::new("a")).len(), 2);
    }

    #[test]
    fn test_switch_topology_preserves_registry() {
        let registry = registry_with(&["a", "b", "c"]);
        let engine = TopologyEngine::new(TopologyKind::Mesh, &registry).unwrap();

        let unreachable = engine.switch_topology(TopologyKind::Ring, &registry).unwrap();
        assert!(unreachable.is_empty());
        assert_eq!(engine.kind(), TopologyKind::Ring);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_adaptive_defaults_to_mesh_inner() {
        let registry = registry_with(&["a", "b"]);
        let engine = TopologyEngine::new(TopologyKind::Adaptive, &registry).unwrap();
        assert_eq!(engine.kind(), TopologyKind::Adaptive);
        assert_eq!(engine.direct_recipients(&AgentId::new("a")).len(), 1);
    }

    #[test]
    fn test_switch_to_adaptive_with_explicit_initial() {
        let registry = registry_with(&["a", "b", "c"]);
        let engine = TopologyEngine::new(TopologyKind::Mesh, &registry).unwrap();
        engine.switch_topology_to_adaptive(TopologyKind::Ring, &registry).unwrap();
        assert_eq!(engine.kind(), TopologyKind::Adaptive);
    }

    #[test]
    fn test_topology_info_reports_health_tally() {
        let registry = registry_with(&["a", "b"]);
        registry.set_health_state(&AgentId::new("b"), crate::registry::HealthState::Failed).unwrap();
        let engine = TopologyEngine::new(TopologyKind::Mesh, &registry).unwrap();

        let info = engine.info(&registry);
        assert_eq!(info.agent_count, 2);
        assert_eq!(*info.health_tally.get(&HealthStateKey::Failed).unwrap(), 1);
    }

    #[test]
    fn test_hierarchical_build_flattens_without_parent_hints() {
        let registry = registry_with(&["root", "a", "b"]);
        let engine = TopologyEngine::new(TopologyKind::Hierarchical, &registry).unwrap();
        assert_eq!(engine.direct_recipients(&AgentId::new("root")).len(), 2);
    }

    #[test]
    fn test_hierarchical_register_parent_builds_deep_tree() {
        let root = AgentId::new("root");
        let branch = AgentId::new("branch");
        let leaf = AgentId::new("leaf");

        let registry = registry_with(&["root"]);
        let engine = TopologyEngine::new(TopologyKind::Hierarchical, &registry).unwrap();

        registry.register(branch.clone(), "worker", HashMap::new()).unwrap();
        engine.register_parent(branch.clone(), root.clone());
        engine.switch_topology(TopologyKind::Hierarchical, &registry).unwrap();

        registry.register(leaf.clone(), "worker", HashMap::new()).unwrap();
        engine.register_parent(leaf.clone(), branch.clone());
        engine.switch_topology(TopologyKind::Hierarchical, &registry).unwrap();

        // root -> branch -> leaf, three levels deep, not root -> {branch, leaf}.
        assert!(engine.edge_exists(&root, &branch));
        assert!(engine.edge_exists(&branch, &leaf));
        assert!(!engine.edge_exists(&root, &leaf));

        let Topology::Concrete(NonAdaptive::Hierarchical(tree)) = &*engine.current.read() else {
            panic!("expected a hierarchical topology");
        };
        let descendants = tree.descendants(&root);
        assert_eq!(descendants.len(), 2);
        assert!(descendants.contains(&branch));
        assert!(descendants.contains(&leaf));
        assert_eq!(tree.descendants(&branch), vec![leaf.clone()]);
    }

    #[test]
    fn test_forget_parent_clears_hint_on_reregistration() {
        let root = AgentId::new("root");
        let branch = AgentId::new("branch");
        let a = AgentId::new("a");

        let registry = registry_with(&["root"]);
        let engine = TopologyEngine::new(TopologyKind::Hierarchical, &registry).unwrap();

        registry.register(branch.clone(), "worker", HashMap::new()).unwrap();
        engine.register_parent(branch.clone(), root.clone());
        engine.switch_topology(TopologyKind::Hierarchical, &registry).unwrap();

        registry.register(a.clone(), "worker", HashMap::new()).unwrap();
        engine.register_parent(a.clone(), branch.clone());
        engine.switch_topology(TopologyKind::Hierarchical, &registry).unwrap();
        assert!(engine.edge_exists(&branch, &a));

        // Unregistering without forgetting the hint would leave a stale
        // branch -> a assignment for whoever re-registers under "a" next.
        registry.unregister(&a).unwrap();
        engine.forget_parent(&a);

        registry.register(a.clone(), "worker", HashMap::new()).unwrap();
        engine.switch_topology(TopologyKind::Hierarchical, &registry).unwrap();

        assert!(engine.edge_exists(&root, &a));
        assert!(!engine.edge_exists(&branch, &a));
    }
}
