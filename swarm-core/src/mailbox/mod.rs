//! Bounded, FIFO, drop-oldest mailboxes for agent message delivery.
//!
//! Every registered agent owns exactly one [`Mailbox`]. Delivery is
//! non-blocking: a full bounded mailbox evicts its oldest envelope to make
//! room for the newest (§4.2), and the eviction count is always
//! observable via [`Mailbox::overflow_count`].

pub mod metrics;
pub mod ring;
pub mod traits;

pub use metrics::{AtomicMetrics, MetricsRecorder};
pub use ring::Mailbox;
pub use traits::{MailboxCapacity, MailboxError, TryRecvError};
