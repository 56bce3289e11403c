// Layer 3: Internal module imports
use crate::util::AgentId;

/// The uniform contract every topology variant implements (§4.3): given a
/// sender, yield its direct recipients; given a pair, answer whether the
/// edge exists; render an ASCII view for tests and operators.
pub trait RoutingContract {
    /// Agents `sender` may enqueue to directly under this topology.
    fn direct_recipients(&self, sender: &AgentId) -> Vec<AgentId>;

    /// Whether a direct edge `from -> to` exists.
    fn edge_exists(&self, from: &AgentId, to: &AgentId) -> bool;

    /// Every agent known to this topology structure.
    fn members(&self) -> Vec<AgentId>;

    /// Read-only ASCII rendering of the current structure.
    fn visualize(&self) -> String;
}
