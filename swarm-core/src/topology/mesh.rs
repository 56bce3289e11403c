//! Undirected full graph over registered agents (§4.3). Best for 3-6 agents.

// Layer 1: Standard library imports
use std::collections::BTreeSet;

// Layer 3: Internal module imports
use super::contract::RoutingContract;
use crate::util::AgentId;

#[derive(Debug, Clone, Default)]
pub struct Mesh {
    agents: BTreeSet<AgentId>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_members(members: impl IntoIterator<Item = AgentId>) -> Self {
        Self { agents: members.into_iter().collect() }
    }

    pub fn add(&mut self, agent: AgentId) {
        self.agents.insert(agent);
    }

    pub fn remove(&mut self, agent: &AgentId) {
        self.agents.remove(agent);
    }
}

impl RoutingContract for Mesh {
    fn direct_recipients(&self, sender: &AgentId) -> Vec<AgentId> {
        self.agents.iter().filter(|a| *a != sender).cloned().collect()
    }

    fn edge_exists(&self, from: &AgentId, to: &AgentId) -> bool {
        from != to && self.agents.contains(from) && self.agents.contains(to)
    }

    fn members(&self) -> Vec<AgentId> {
        self.agents.iter().cloned().collect()
    }

    fn visualize(&self) -> String {
        let names: Vec<String> = self.agents.iter().map(|a| a.to_string()).collect();
        if names.is_empty() {
            return "mesh: (empty)".to_string();
        }
        format!("mesh: {{{}}} (fully connected)", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pair_adjacent() {
        let mesh = Mesh::from_members([AgentId::new("a"), AgentId::new("b"), AgentId::new("c")]);
        assert!(mesh.edge_exists(&AgentId::new("a"), &AgentId::new("c")));
        assert_eq!(mesh.direct_recipients(&AgentId::new("a")).len(), 2);
    }

    #[test]
    fn test_no_self_edge() {
        let mesh = Mesh::from_members([AgentId::new("a")]);
        assert!(!mesh.edge_exists(&AgentId::new("a"), &AgentId::new("a")));
    }
}
