//! Reference [`Monitor`] backed by atomic counters and a bounded ring
//! buffer, shared via `Arc<Inner>` so every subsystem holding a clone
//! observes the same counts.

// Layer 1: Standard library imports
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::Utc;

use super::error::MonitoringError;
use super::traits::{EventSeverity, Monitor, MonitoringEvent};
use super::types::{MonitoringConfig, MonitoringSnapshot};

/// Number of [`EventSeverity`] variants, and the width of the counter
/// table indexed by `severity as usize`.
const SEVERITY_LEVELS: usize = 6;

fn severity_index(severity: EventSeverity) -> usize {
    severity as usize
}

/// `Arc`-cloned in-memory event recorder: atomic per-severity counters
/// plus a fixed-size history ring buffer guarded by an `RwLock` (reads
/// for `snapshot` vastly outnumber the writes from `record`/`reset`).
#[derive(Debug)]
pub struct InMemoryMonitor<E: MonitoringEvent> {
    inner: Arc<Inner<E>>,
}

#[derive(Debug)]
struct Inner<E: MonitoringEvent> {
    config: MonitoringConfig,
    total_events: AtomicU64,
    severity_counts: [AtomicU64; SEVERITY_LEVELS],
    history: RwLock<VecDeque<E>>,
}

impl<E: MonitoringEvent> InMemoryMonitor<E> {
    /// Builds a monitor from `config`. Rejects a zero-sized history
    /// buffer up front rather than silently discarding every event later.
    pub fn new(config: MonitoringConfig) -> Result<Self, MonitoringError> {
        if config.max_history_size == 0 {
            return Err(MonitoringError::HistoryCapacityZero);
        }
        Ok(Self {
            inner: Arc::new(Inner {
                config,
                total_events: AtomicU64::new(0),
                severity_counts: std::array::from_fn(|_| AtomicU64::new(0)),
                history: RwLock::new(VecDeque::new()),
            }),
        })
    }

    fn counter_snapshot(&self) -> [u64; SEVERITY_LEVELS] {
        std::array::from_fn(|i| self.inner.severity_counts[i].load(Ordering::Relaxed))
    }
}

impl<E: MonitoringEvent> Clone for InMemoryMonitor<E> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

#[async_trait]
impl<E: MonitoringEvent> Monitor<E> for InMemoryMonitor<E> {
    async fn record(&self, event: E) -> Result<(), MonitoringError> {
        if !self.inner.config.enabled {
            return Ok(());
        }

        let severity = event.severity();
        if severity < self.inner.config.severity_filter {
            return Ok(());
        }

        self.inner.total_events.fetch_add(1, Ordering::Relaxed);
        self.inner.severity_counts[severity_index(severity)].fetch_add(1, Ordering::Relaxed);

        let mut history = self.inner.history.write().map_err(|_| MonitoringError::HistoryLockPoisoned { operation: "record" })?;
        if history.len() >= self.inner.config.max_history_size {
            history.pop_front();
        }
        history.push_back(event);

        Ok(())
    }

    async fn snapshot(&self) -> Result<MonitoringSnapshot<E>, MonitoringError> {
        let counts = self.counter_snapshot();
        let history = self.inner.history.read().map_err(|_| MonitoringError::HistoryLockPoisoned { operation: "snapshot" })?;

        Ok(MonitoringSnapshot {
            timestamp: Utc::now(),
            total_events: self.inner.total_events.load(Ordering::Relaxed),
            trace_count: counts[severity_index(EventSeverity::Trace)],
            debug_count: counts[severity_index(EventSeverity::Debug)],
            info_count: counts[severity_index(EventSeverity::Info)],
            warning_count: counts[severity_index(EventSeverity::Warning)],
            error_count: counts[severity_index(EventSeverity::Error)],
            critical_count: counts[severity_index(EventSeverity::Critical)],
            recent_events: history.iter().cloned().collect(),
        })
    }

    async fn reset(&self) -> Result<(), MonitoringError> {
        self.inner.total_events.store(0, Ordering::Relaxed);
        for counter in &self.inner.severity_counts {
            counter.store(0, Ordering::Relaxed);
        }

        let mut history = self.inner.history.write().map_err(|_| MonitoringError::HistoryLockPoisoned { operation: "reset" })?;
        history.clear();
        Ok(())
    }
}
