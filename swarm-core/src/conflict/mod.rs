//! Conflict Resolver: a pure function mapping (state key, non-empty
//! version set, strategy) to one winning version (§4.5).
//!
//! Grounded on `other_examples/9d5394c1_lspecian-vexfs__...distributed_coordination.rs`
//! (`GCounter`/`PNCounter`/`LWWRegister`/`ORSet` struct shapes) for the CRDT
//! type definitions; the merge rules themselves come directly from the
//! component design this implements.

pub mod crdt;
pub mod error;
pub mod lww;
pub mod resolver;
pub mod state_version;

pub use error::ConflictError;
pub use resolver::{resolve, Explanation, Resolution, Strategy};
pub use state_version::{CrdtType, StateVersion};
