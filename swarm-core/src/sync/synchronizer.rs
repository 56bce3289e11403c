//! State Synchronizer (§4.7): converges a named state key across the
//! swarm by collecting versions, resolving conflicts, persisting the
//! winner and rebroadcasting it.

// Layer 1: Standard library imports
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};

// Layer 3: Internal module imports
use super::error::SyncError;
use super::provider::MemoryProvider;
use crate::conflict::{resolve, StateVersion, Strategy};
use crate::message::{Envelope, MessageKind};
use crate::registry::AgentRegistry;
use crate::util::{AgentId, CorrelationId};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of a full-sync round. Zero replies is non-fatal (§4.7.6).
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    Resolved(StateVersion),
    NoParticipants,
}

pub struct StateSynchronizer<P: MemoryProvider> {
    registry: AgentRegistry,
    provider: Arc<P>,
    strategy: Strategy,
    timeout: Duration,
    pending: DashMap<CorrelationId, mpsc::UnboundedSender<StateVersion>>,
}

impl<P: MemoryProvider> StateSynchronizer<P> {
    pub fn new(registry: AgentRegistry, provider: Arc<P>, strategy: Strategy) -> Self {
        Self { registry, provider, strategy, timeout: DEFAULT_TIMEOUT, pending: DashMap::new() }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// A participant's reply to an in-flight `state-request`. Agent
    /// execution lives outside this crate; callers wire this into
    /// whatever receives `StateRequest` envelopes from a mailbox.
    pub fn submit_reply(&self, correlation_id: CorrelationId, version: StateVersion) {
        if let Some(tx) = self.pending.get(&correlation_id) {
            let _ = tx.send(version);
        }
    }

    pub async fn full_sync(&self, key: &str, requester: AgentId) -> Result<SyncOutcome, SyncError> {
        let active = self.registry.list_active();
        if active.is_empty() {
            return Ok(SyncOutcome::NoParticipants);
        }

        let correlation_id = CorrelationId::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        self.pending.insert(correlation_id, tx);

        let mut delivered = 0usize;
        for agent in &active {
            let envelope = Envelope::new(requester.clone(), agent.id.clone(), serde_json::json!({"key": key}), 0)
                .with_kind(MessageKind::StateRequest)
                .with_correlation_id(correlation_id);
            if self.registry.deliver(&agent.id, envelope).is_ok() {
                delivered += 1;
            }
        }
        if delivered == 0 {
            self.pending.remove(&correlation_id);
            return Ok(SyncOutcome::NoParticipants);
        }

        let mut versions = self.collect_replies(&mut rx).await;
        self.pending.remove(&correlation_id);

        if let Some(cached) = self.provider.get(key).await? {
            versions.push(cached);
        }
        if versions.is_empty() {
            debug!(key, "full sync: no replies arrived");
            return Ok(SyncOutcome::NoParticipants);
        }

        let resolution = resolve(&versions, self.strategy).map_err(|_| SyncError::EmptyInput)?;
        let resolved = StateVersion::new(key, resolution.value, resolution.version, resolution.owner);
        self.provider.put(key, resolved.clone()).await?;

        let update_payload = serde_json::json!({
            "key": key,
            "version": resolved.version,
            "value": resolved.value,
        });
        for agent in &active {
            let envelope = Envelope::new(requester.clone(), agent.id.clone(), update_payload.clone(), 0).with_kind(MessageKind::StateUpdate);
            if self.registry.deliver(&agent.id, envelope).is_err() {
                warn!(agent = %agent.id, "state-update delivery failed, agent may have unregistered mid-sync");
            }
        }

        Ok(SyncOutcome::Resolved(resolved))
    }

    async fn collect_replies(&self, rx: &mut mpsc::UnboundedReceiver<StateVersion>) -> Vec<StateVersion> {
        let mut versions = Vec::new();
        let deadline = tokio::time::Instant::now() + self.timeout;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                break;
            }
            match tokio::time::timeout(remaining, rx.recv()).await {
                Ok(Some(version)) => versions.push(version),
                Ok(None) | Err(_) => break,
            }
        }
        versions
    }

    /// Reconnection fast path (§4.7): newer versions of `key`, no
    /// broadcast, no conflict resolution invoked.
    pub async fn delta_sync(&self, key: &str, since_version: u64) -> Result<Vec<StateVersion>, SyncError> {
        self.provider.delta(key, since_version).await
    }
}
