//! Unidirectional cycle topology (§4.3). Each agent has exactly one
//! successor; a send to anyone else is a violation.

// Layer 1: Standard library imports
// (none)

// Layer 3: Internal module imports
use super::contract::RoutingContract;
use crate::util::AgentId;

#[derive(Debug, Clone, Default)]
pub struct Ring {
    /// Insertion order defines the cycle; `order[i]`'s successor is
    /// `order[(i + 1) % len]`.
    order: Vec<AgentId>,
}

impl Ring {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_members(members: impl IntoIterator<Item = AgentId>) -> Self {
        Self { order: members.into_iter().collect() }
    }

    /// Insert at the tail of the cycle.
    pub fn push(&mut self, agent: AgentId) {
        if !self.order.contains(&agent) {
            self.order.push(agent);
        }
    }

    pub fn remove(&mut self, agent: &AgentId) {
        self.order.retain(|a| a != agent);
    }

    /// The single successor of `agent`, if it's a member.
    pub fn successor(&self, agent: &AgentId) -> Option<AgentId> {
        let idx = self.order.iter().position(|a| a == agent)?;
        let next = (idx + 1) % self.order.len();
        Some(self.order[next].clone())
    }
}

impl RoutingContract for Ring {
    fn direct_recipients(&self, sender: &AgentId) -> Vec<AgentId> {
        self.successor(sender).into_iter().collect()
    }

    fn edge_exists(&self, from: &AgentId, to: &AgentId) -> bool {
        self.successor(from).as_ref() == Some(to)
    }

    fn members(&self) -> Vec<AgentId> {
        self.order.clone()
    }

    fn visualize(&self) -> String {
        if self.order.is_empty() {
            return "ring: (empty)".to_string();
        }
        let mut parts: Vec<String> = self.order.iter().map(|a| a.to_string()).collect();
        parts.push(self.order[0].to_string());
        format!("ring: {}", parts.join(" -> "))
    }
}
