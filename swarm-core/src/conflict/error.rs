// Layer 2: Third-party crate imports
use thiserror::Error;

/// Conflict Resolver errors (§7).
#[derive(Error, Debug)]
pub enum ConflictError {
    /// `resolve_conflicts` was called with an empty version set.
    #[error("resolve_conflicts requires at least one version")]
    EmptyInput,
}
