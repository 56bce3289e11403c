//! Adaptive topology: owns one concrete topology plus a selection policy,
//! and may hot-switch its inner structure (§4.3).

// Layer 3: Internal module imports
use super::contract::RoutingContract;
use super::kind::SelectionPolicy;
use super::non_adaptive::NonAdaptive;
use crate::util::AgentId;

#[derive(Debug, Clone)]
pub struct Adaptive {
    inner: Box<NonAdaptive>,
    policy: SelectionPolicy,
}

impl Adaptive {
    pub fn new(inner: NonAdaptive, policy: SelectionPolicy) -> Self {
        Self { inner: Box::new(inner), policy }
    }

    pub fn inner(&self) -> &NonAdaptive {
        &self.inner
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Replace the inner concrete topology, keeping the policy.
    pub fn set_inner(&mut self, inner: NonAdaptive) {
        self.inner = Box::new(inner);
    }

    /// Evaluate the configured policy against the current member count and
    /// return the kind it recommends, if different from a manual policy.
    pub fn recommend(&self, member_count: usize) -> Option<super::kind::TopologyKind> {
        match self.policy {
            SelectionPolicy::Manual => None,
            SelectionPolicy::SizeThreshold { threshold } => {
                if member_count >= threshold {
                    Some(super::kind::TopologyKind::Star)
                } else {
                    Some(super::kind::TopologyKind::Mesh)
                }
            }
        }
    }
}

impl RoutingContract for Adaptive {
    fn direct_recipients(&self, sender: &AgentId) -> Vec<AgentId> {
        self.inner.direct_recipients(sender)
    }

    fn edge_exists(&self, from: &AgentId, to: &AgentId) -> bool {
        self.inner.edge_exists(from, to)
    }

    fn members(&self) -> Vec<AgentId> {
        self.inner.members()
    }

    fn visualize(&self) -> String {
        format!("adaptive({:?}) ->\n{}", self.policy, self.inner.visualize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::mesh::Mesh;
    use super::super::kind::TopologyKind;

    #[test]
    fn test_delegates_to_inner() {
        let mesh = Mesh::from_members([AgentId::new("a"), AgentId::new("b")]);
        let adaptive = Adaptive::new(NonAdaptive::Mesh(mesh), SelectionPolicy::Manual);
        assert_eq!(adaptive.direct_recipients(&AgentId::new("a")).len(), 1);
    }

    #[test]
    fn test_size_threshold_recommendation() {
        let mesh = Mesh::new();
        let adaptive = Adaptive::new(NonAdaptive::Mesh(mesh), SelectionPolicy::SizeThreshold { threshold: 10 });
        assert_eq!(adaptive.recommend(3), Some(TopologyKind::Mesh));
        assert_eq!(adaptive.recommend(12), Some(TopologyKind::Star));
    }
}
