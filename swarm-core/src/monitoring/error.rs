//! Monitoring subsystem errors (§6).

// Layer 2: Third-party crate imports
use thiserror::Error;

/// Errors a [`Monitor`](super::traits::Monitor) implementation can raise.
///
/// Narrower than a generic `{message: String}` catch-all would be: every
/// variant names the one failure this module can actually hit — bad
/// configuration at construction, or the ring-buffer history's lock being
/// poisoned by a panicking holder.
#[derive(Error, Debug)]
pub enum MonitoringError {
    /// `MonitoringConfig::max_history_size` was zero; a monitor built from
    /// it could never retain the event it just recorded.
    #[error("monitoring history capacity must be non-zero")]
    HistoryCapacityZero,

    /// The history lock was poisoned by a panic while `operation` held it.
    #[error("monitor history lock poisoned during {operation}")]
    HistoryLockPoisoned { operation: &'static str },
}

impl MonitoringError {
    /// Caller errors are config mistakes a retry can't fix; a poisoned
    /// lock means another task already panicked and left it that way,
    /// which is this process's problem, not the caller's.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::HistoryCapacityZero)
    }
}
