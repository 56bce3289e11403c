//! Hub-and-spoke topology (§4.3). Spoke-to-spoke traffic must relay
//! through the hub; there is no direct spoke-spoke edge.

// Layer 1: Standard library imports
use std::collections::BTreeSet;

// Layer 3: Internal module imports
use super::contract::RoutingContract;
use super::error::TopologyError;
use crate::util::AgentId;

/// Hub mailbox-depth classification, derived by the coordinator and fed
/// back in here for `get_topology_info` summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubLoad {
    Low,
    Medium,
    High,
    Critical,
}

impl HubLoad {
    /// Classify from a mailbox depth against a configured bounded capacity.
    pub fn from_depth(depth: usize, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let ratio = depth as f64 / capacity as f64;
        if ratio >= 0.9 {
            Self::Critical
        } else if ratio >= 0.6 {
            Self::High
        } else if ratio >= 0.3 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone)]
pub struct Star {
    hub: AgentId,
    spokes: BTreeSet<AgentId>,
}

impl Star {
    pub fn new(hub: AgentId) -> Self {
        Self { hub, spokes: BTreeSet::new() }
    }

    pub fn hub(&self) -> &AgentId {
        &self.hub
    }

    pub fn add_spoke(&mut self, spoke: AgentId) {
        if spoke != self.hub {
            self.spokes.insert(spoke);
        }
    }

    pub fn remove_spoke(&mut self, spoke: &AgentId) {
        self.spokes.remove(spoke);
    }

    /// True when `to` may receive directly from `from` under this topology.
    pub fn can_send_direct(&self, from: &AgentId, to: &AgentId) -> bool {
        *from == self.hub || *to == self.hub
    }

    /// Spoke-to-spoke messages must be relayed; this returns the hub as
    /// the mandatory relay point for a `from -> to` spoke pair.
    pub fn relay_for(&self, from: &AgentId, to: &AgentId) -> Result<AgentId, TopologyError> {
        if self.can_send_direct(from, to) {
            return Ok(to.clone());
        }
        if self.spokes.contains(from) && self.spokes.contains(to) {
            return Ok(self.hub.clone());
        }
        Err(TopologyError::TopologyViolation {
            from: from.clone(),
            to: to.clone(),
            reason: "neither endpoint is a member of this star".to_string(),
        })
    }
}

impl RoutingContract for Star {
    fn direct_recipients(&self, sender: &AgentId) -> Vec<AgentId> {
        if *sender == self.hub {
            self.spokes.iter().cloned().collect()
        } else if self.spokes.contains(sender) {
            vec![self.hub.clone()]
        } else {
            Vec::new()
        }
    }

    fn edge_exists(&self, from: &AgentId, to: &AgentId) -> bool {
        (from == &self.hub && self.spokes.contains(to)) || (to == &self.hub && self.spokes.contains(from))
    }

    fn members(&self) -> Vec<AgentId> {
        let mut members = vec![self.hub.clone()];
        members.extend(self.spokes.iter().cloned());
        members
    }

    fn visualize(&self) -> String {
        let spokes: Vec<String> = self.spokes.iter().map(|s| s.to_string()).collect();
        format!("star: hub={} spokes=[{}]", self.hub, spokes.join(", "))
    }
}
