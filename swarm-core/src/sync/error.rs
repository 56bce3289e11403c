// Layer 2: Third-party crate imports
use thiserror::Error;

/// State Synchronizer errors (§4.7, §7).
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("memory provider unavailable: {0}")]
    MemoryUnavailable(String),

    #[error("conflict resolution received an empty version set")]
    EmptyInput,
}

impl SyncError {
    /// `StateError` per the crate-wide taxonomy — retryable by the
    /// caller once the provider recovers.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::MemoryUnavailable(_))
    }
}
