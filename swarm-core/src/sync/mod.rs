//! State Synchronizer (§4.7): converge a named state key across the
//! swarm by gathering versions, resolving conflicts, persisting and
//! rebroadcasting the winner.
//!
//! No teacher analogue; the protocol is built from the `message`,
//! `mailbox` and `conflict` primitives already in this crate plus an
//! external `MemoryProvider` persistence boundary.

mod error;
mod provider;
mod synchronizer;

pub use error::SyncError;
pub use provider::{InMemoryMemoryProvider, MemoryProvider};
pub use synchronizer::{StateSynchronizer, SyncOutcome};
