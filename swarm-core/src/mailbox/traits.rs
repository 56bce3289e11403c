//! Core mailbox error and capacity types.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY

// Layer 3: Internal module imports
// (none)

/// Mailbox capacity configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxCapacity {
    /// Bounded mailbox with maximum capacity; overflow drops the oldest
    /// queued envelope per the messaging substrate's fixed eviction policy.
    Bounded(usize),
    /// Unbounded mailbox (no capacity limit, no overflow).
    Unbounded,
}

/// Mailbox error types.
#[derive(Debug, thiserror::Error)]
pub enum MailboxError {
    /// Mailbox is closed (no longer accepting deliveries).
    #[error("mailbox is closed")]
    Closed,

    /// Message TTL expired before delivery (§3.2 chrono `DateTime<Utc>`).
    #[error("TTL expired for message at {timestamp}")]
    TtlExpired { timestamp: DateTime<Utc> },
}

/// Non-blocking receive error.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TryRecvError {
    /// No messages are currently queued.
    #[error("mailbox is empty")]
    Empty,
    /// The mailbox is closed and drained.
    #[error("mailbox is closed")]
    Closed,
}
