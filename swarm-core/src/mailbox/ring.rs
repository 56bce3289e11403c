//! Bounded FIFO mailbox with non-destructive peek and drop-oldest overflow.
//!
//! The teacher's mailbox wraps `tokio::sync::mpsc`, whose only overflow
//! behaviors are block/drop-newest/error. The messaging substrate fixes
//! drop-oldest as the eviction policy (newest messages are preserved), so
//! delivery here is a `parking_lot::Mutex`-guarded ring buffer instead of
//! a channel — push and pop never block, matching the substrate's
//! "overflow discarded from the tail" contract.

// Layer 1: Standard library imports
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use chrono::Utc; // §3.2 MANDATORY
use parking_lot::Mutex;

// Layer 3: Internal module imports
use super::metrics::{AtomicMetrics, MetricsRecorder};
use super::traits::{MailboxCapacity, MailboxError, TryRecvError};
use crate::message::Envelope;

#[derive(Debug)]
struct Inner {
    queue: Mutex<VecDeque<Envelope>>,
    capacity: MailboxCapacity,
    metrics: AtomicMetrics,
    closed: AtomicBool,
}

/// A single agent's mailbox.
///
/// Cheaply cloneable (shares one `Arc<Inner>`), so a sender handle and the
/// owning agent's receiver handle can both hold a `Mailbox` without any
/// split sender/receiver pair, matching the registry's "mailboxes are
/// owned by the recipient" model (§4.1).
#[derive(Debug, Clone)]
pub struct Mailbox {
    inner: Arc<Inner>,
}

impl Mailbox {
    /// Create a bounded mailbox. Capacity zero behaves as capacity one —
    /// a mailbox that can never hold a message would defeat delivery.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                queue: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
                capacity: MailboxCapacity::Bounded(capacity.max(1)),
                metrics: AtomicMetrics::new(),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Create an unbounded mailbox (no overflow, no eviction).
    pub fn unbounded() -> Self {
        Self {
            inner: Arc::new(Inner {
                queue: Mutex::new(VecDeque::new()),
                capacity: MailboxCapacity::Unbounded,
                metrics: AtomicMetrics::new(),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Enqueue an envelope. Returns `Ok(true)` when an older envelope was
    /// evicted to make room, `Ok(false)` when it was enqueued without
    /// eviction. Fails with `MailboxError::Closed` once the mailbox has
    /// been closed.
    pub fn push(&self, envelope: Envelope) -> Result<bool, MailboxError> {
        if self.inner.closed.load(Ordering::Acquire) {
            return Err(MailboxError::Closed);
        }

        let mut queue = self.inner.queue.lock();
        let mut evicted = false;

        if let MailboxCapacity::Bounded(capacity) = self.inner.capacity {
            if queue.len() >= capacity {
                queue.pop_front();
                self.inner.metrics.record_dropped();
                evicted = true;
            }
        }

        queue.push_back(envelope);
        self.inner.metrics.record_sent();
        self.inner.metrics.update_last_message(Utc::now());
        Ok(evicted)
    }

    /// Dequeue the oldest envelope, if any.
    pub fn pop(&self) -> Result<Envelope, TryRecvError> {
        let mut queue = self.inner.queue.lock();
        match queue.pop_front() {
            Some(envelope) => {
                self.inner.metrics.record_received();
                Ok(envelope)
            }
            None if self.inner.closed.load(Ordering::Acquire) => Err(TryRecvError::Closed),
            None => Err(TryRecvError::Empty),
        }
    }

    /// Non-destructively observe the oldest envelope without dequeuing it.
    pub fn peek(&self) -> Option<Envelope> {
        self.inner.queue.lock().front().cloned()
    }

    /// Current queue depth.
    pub fn len(&self) -> usize {
        self.inner.queue.lock().len()
    }

    /// True when the mailbox holds no envelopes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The configured capacity.
    pub fn capacity(&self) -> MailboxCapacity {
        self.inner.capacity
    }

    /// Count of envelopes evicted due to overflow since creation.
    pub fn overflow_count(&self) -> u64 {
        self.inner.metrics.dropped_count()
    }

    /// Total envelopes ever enqueued.
    pub fn sent_count(&self) -> u64 {
        self.inner.metrics.sent_count()
    }

    /// Total envelopes ever dequeued.
    pub fn received_count(&self) -> u64 {
        self.inner.metrics.received_count()
    }

    /// Close the mailbox; further `push` calls fail, `pop` on a drained
    /// mailbox returns `TryRecvError::Closed` instead of `Empty`.
    pub fn close(&self) {
        self.inner.closed.store(true, Ordering::Release);
    }

    /// True once `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::AgentId;

    fn envelope(seq: u64) -> Envelope {
        Envelope::new(AgentId::new("a"), AgentId::new("b"), serde_json::json!(seq), seq)
    }

    #[test]
    fn test_fifo_order() {
        let mailbox = Mailbox::bounded(10);
        mailbox.push(envelope(1)).unwrap();
        mailbox.push(envelope(2)).unwrap();

        assert_eq!(mailbox.pop().unwrap().sequence, 1);
        assert_eq!(mailbox.pop().unwrap().sequence, 2);
    }

    #[test]
    fn test_peek_is_non_destructive() {
        let mailbox = Mailbox::bounded(10);
        mailbox.push(envelope(1)).unwrap();

        assert_eq!(mailbox.peek().unwrap().sequence, 1);
        assert_eq!(mailbox.len(), 1);
        assert_eq!(mailbox.pop().unwrap().sequence, 1);
    }

    #[test]
    fn test_overflow_drops_oldest_preserves_newest() {
        let mailbox = Mailbox::bounded(2);
        mailbox.push(envelope(1)).unwrap();
        mailbox.push(envelope(2)).unwrap();
        let evicted = mailbox.push(envelope(3)).unwrap();

        assert!(evicted);
        assert_eq!(mailbox.overflow_count(), 1);
        assert_eq!(mailbox.pop().unwrap().sequence, 2);
        assert_eq!(mailbox.pop().unwrap().sequence, 3);
    }

    #[test]
    fn test_pop_empty_returns_empty_error() {
        let mailbox = Mailbox::bounded(10);
        assert_eq!(mailbox.pop().unwrap_err(), TryRecvError::Empty);
    }

    #[test]
    fn test_closed_mailbox_rejects_push() {
        let mailbox = Mailbox::bounded(10);
        mailbox.close();
        assert!(matches!(mailbox.push(envelope(1)), Err(MailboxError::Closed)));
    }

    #[test]
    fn test_closed_drained_mailbox_pop_reports_closed() {
        let mailbox = Mailbox::bounded(10);
        mailbox.push(envelope(1)).unwrap();
        mailbox.close();

        assert_eq!(mailbox.pop().unwrap().sequence, 1);
        assert_eq!(mailbox.pop().unwrap_err(), TryRecvError::Closed);
    }

    #[test]
    fn test_unbounded_never_evicts() {
        let mailbox = Mailbox::unbounded();
        for i in 0..1000 {
            assert_eq!(mailbox.push(envelope(i)).unwrap(), false);
        }
        assert_eq!(mailbox.len(), 1000);
        assert_eq!(mailbox.overflow_count(), 0);
    }

    #[test]
    fn test_shared_clone_sees_same_queue() {
        let mailbox = Mailbox::bounded(10);
        let handle = mailbox.clone();

        mailbox.push(envelope(1)).unwrap();
        assert_eq!(handle.len(), 1);
        assert_eq!(handle.pop().unwrap().sequence, 1);
    }
}
