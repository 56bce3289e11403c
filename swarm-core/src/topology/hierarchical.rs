//! Rooted tree topology (§4.3). Broadcast from the root reaches every
//! descendant; a non-root send to a non-descendant is logically a tree
//! walk, though the mailbox push itself is direct.

// Layer 1: Standard library imports
use std::collections::{BTreeMap, BTreeSet};

// Layer 3: Internal module imports
use super::contract::RoutingContract;
use super::error::TopologyError;
use crate::util::AgentId;

#[derive(Debug, Clone, Default)]
pub struct Hierarchical {
    root: Option<AgentId>,
    parent_of: BTreeMap<AgentId, AgentId>,
    children_of: BTreeMap<AgentId, BTreeSet<AgentId>>,
}

impl Hierarchical {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `root` as the tree's root, with no parent.
    pub fn set_root(&mut self, root: AgentId) {
        self.children_of.entry(root.clone()).or_default();
        self.root = Some(root);
    }

    /// Attach `agent` under `parent`. Fails if `parent` is unknown or if
    /// attaching `agent` would create a cycle.
    pub fn add(&mut self, agent: AgentId, parent: AgentId) -> Result<(), TopologyError> {
        if !self.children_of.contains_key(&parent) && self.root.as_ref() != Some(&parent) {
            return Err(TopologyError::UnknownAgent(parent));
        }
        if self.is_ancestor(&agent, &parent) {
            return Err(TopologyError::TopologyViolation {
                from: agent.clone(),
                to: parent,
                reason: "would create a cycle".to_string(),
            });
        }

        self.parent_of.insert(agent.clone(), parent.clone());
        self.children_of.entry(parent).or_default().insert(agent.clone());
        self.children_of.entry(agent).or_default();
        Ok(())
    }

    fn is_ancestor(&self, candidate: &AgentId, of: &AgentId) -> bool {
        let mut current = Some(of.clone());
        while let Some(node) = current {
            if &node == candidate {
                return true;
            }
            current = self.parent_of.get(&node).cloned();
        }
        false
    }

    /// All descendants of `agent` (not including itself).
    pub fn descendants(&self, agent: &AgentId) -> Vec<AgentId> {
        let mut out = Vec::new();
        let mut stack: Vec<AgentId> = self.children_of.get(agent).cloned().unwrap_or_default().into_iter().collect();
        while let Some(node) = stack.pop() {
            stack.extend(self.children_of.get(&node).cloned().unwrap_or_default());
            out.push(node);
        }
        out
    }

    pub fn parent(&self, agent: &AgentId) -> Option<&AgentId> {
        self.parent_of.get(agent)
    }
}

impl RoutingContract for Hierarchical {
    fn direct_recipients(&self, sender: &AgentId) -> Vec<AgentId> {
        let mut out: Vec<AgentId> = self.children_of.get(sender).cloned().unwrap_or_default().into_iter().collect();
        if let Some(parent) = self.parent_of.get(sender) {
            out.push(parent.clone());
        }
        out
    }

    fn edge_exists(&self, from: &AgentId, to: &AgentId) -> bool {
        self.parent_of.get(to) == Some(from) || self.parent_of.get(from) == Some(to)
    }

    fn members(&self) -> Vec<AgentId> {
        self.children_of.keys().cloned().collect()
    }

    fn visualize(&self) -> String {
        let Some(root) = &self.root else {
            return "hierarchical: (empty)".to_string();
        };
        let mut lines = Vec::new();
        self.visualize_node(root, 0, &mut lines);
        lines.join("\n")
    }
}

impl Hierarchical {
    fn visualize_node(&self, node: &AgentId, depth: usize, lines: &mut Vec<String>) {
        lines.push(format!("{}{}", "  ".repeat(depth), node));
        for child in self.children_of.get(node).cloned().unwrap_or_default() {
            self.visualize_node(&child, depth + 1, lines);
        }
    }
}
