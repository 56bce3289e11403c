//! A [`Monitor`] that discards everything, for swarms that want the
//! monitoring hooks wired up without paying for them.

// Layer 1: Standard library imports
use std::marker::PhantomData;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::Utc;

use super::error::MonitoringError;
use super::traits::{Monitor, MonitoringEvent};
use super::types::MonitoringSnapshot;

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMonitor<E: MonitoringEvent> {
    _phantom: PhantomData<E>,
}

impl<E: MonitoringEvent> NoopMonitor<E> {
    pub fn new() -> Self {
        Self { _phantom: PhantomData }
    }
}

#[async_trait]
impl<E: MonitoringEvent> Monitor<E> for NoopMonitor<E> {
    async fn record(&self, _event: E) -> Result<(), MonitoringError> {
        Ok(())
    }

    async fn snapshot(&self) -> Result<MonitoringSnapshot<E>, MonitoringError> {
        Ok(MonitoringSnapshot {
            timestamp: Utc::now(),
            total_events: 0,
            trace_count: 0,
            debug_count: 0,
            info_count: 0,
            warning_count: 0,
            error_count: 0,
            critical_count: 0,
            recent_events: Vec::new(),
        })
    }

    async fn reset(&self) -> Result<(), MonitoringError> {
        Ok(())
    }
}
