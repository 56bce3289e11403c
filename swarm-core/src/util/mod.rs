//! Clock and identity primitives shared across the coordination core.

pub mod clock;
pub mod ids;
pub mod serde_helpers;

pub use clock::{CausalOrder, VectorClock, VersionCounter};
pub use ids::{AgentId, CorrelationId, MessageId, ProposalId};
pub use serde_helpers::duration_serde;
