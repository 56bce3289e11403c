//! Sum type over the four concrete topology variants, excluding adaptive
//! itself — what an [`super::adaptive::Adaptive`] may hold as its inner
//! structure.

// Layer 3: Internal module imports
use super::contract::RoutingContract;
use super::hierarchical::Hierarchical;
use super::mesh::Mesh;
use super::ring::Ring;
use super::star::Star;
use crate::util::AgentId;

#[derive(Debug, Clone)]
pub enum NonAdaptive {
    Mesh(Mesh),
    Hierarchical(Hierarchical),
    Star(Star),
    Ring(Ring),
}

impl RoutingContract for NonAdaptive {
    fn direct_recipients(&self, sender: &AgentId) -> Vec<AgentId> {
        match self {
            Self::Mesh(m) => m.direct_recipients(sender),
            Self::Hierarchical(h) => h.direct_recipients(sender),
            Self::Star(s) => s.direct_recipients(sender),
            Self::Ring(r) => r.direct_recipients(sender),
        }
    }

    fn edge_exists(&self, from: &AgentId, to: &AgentId) -> bool {
        match self {
            Self::Mesh(m) => m.edge_exists(from, to),
            Self::Hierarchical(h) => h.edge_exists(from, to),
            Self::Star(s) => s.edge_exists(from, to),
            Self::Ring(r) => r.edge_exists(from, to),
        }
    }

    fn members(&self) -> Vec<AgentId> {
        match self {
            Self::Mesh(m) => m.members(),
            Self::Hierarchical(h) => h.members(),
            Self::Star(s) => s.members(),
            Self::Ring(r) => r.members(),
        }
    }

    fn visualize(&self) -> String {
        match self {
            Self::Mesh(m) => m.visualize(),
            Self::Hierarchical(h) => h.visualize(),
            Self::Star(s) => s.visualize(),
            Self::Ring(r) => r.visualize(),
        }
    }
}
