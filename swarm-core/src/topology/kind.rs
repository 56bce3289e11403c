// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

/// The discriminated topology kind (§3), used to request a build via
/// `switch_topology` without exposing internal structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopologyKind {
    Mesh,
    Hierarchical,
    Star,
    Ring,
    Adaptive,
}

/// Policy an adaptive topology consults when deciding whether to hot-switch
/// its inner concrete topology. `Manual` never switches on its own; the
/// policy exists as a seam for future data-driven selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    #[default]
    Manual,
    /// Prefer mesh below `threshold` members, star at or above it.
    SizeThreshold { threshold: usize },
}
