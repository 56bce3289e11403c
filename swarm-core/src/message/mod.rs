//! Message envelopes exchanged over the messaging substrate.
//!
//! Unlike the teacher's zero-cost `Message<M>` generics, traffic on a
//! swarm bus is heterogeneous at the type level (consensus votes, CRDT
//! deltas and application payloads share one wire), so [`Envelope`] is a
//! single concrete type carrying an opaque [`serde_json::Value`] payload.

pub mod envelope;
pub mod traits;

pub use envelope::{Envelope, Recipient};
pub use traits::{MessageKind, MessagePriority};
