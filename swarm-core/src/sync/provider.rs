//! Memory provider (§6): the sole persistence boundary consumed by the
//! State Synchronizer. The core assumes a successful `put` is durable on
//! return but does not assume cross-provider replication.

// Layer 1: Standard library imports
use std::collections::BTreeMap;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;

// Layer 3: Internal module imports
use super::error::SyncError;
use crate::conflict::StateVersion;

#[async_trait]
pub trait MemoryProvider: Send + Sync {
    async fn put(&self, key: &str, version: StateVersion) -> Result<(), SyncError>;
    async fn get(&self, key: &str) -> Result<Option<StateVersion>, SyncError>;
    async fn delta(&self, key: &str, since_version: u64) -> Result<Vec<StateVersion>, SyncError>;
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, SyncError>;
}

/// Reference in-memory implementation. Keeps every version ever written,
/// keyed by its own version number, so `delta` can answer honestly.
#[derive(Default)]
pub struct InMemoryMemoryProvider {
    keys: DashMap<String, Arc<Mutex<BTreeMap<u64, StateVersion>>>>,
}

impl InMemoryMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemoryProvider for InMemoryMemoryProvider {
    async fn put(&self, key: &str, version: StateVersion) -> Result<(), SyncError> {
        let slot = self.keys.entry(key.to_string()).or_default();
        slot.lock().insert(version.version, version);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<StateVersion>, SyncError> {
        Ok(self.keys.get(key).and_then(|slot| slot.lock().values().next_back().cloned()))
    }

    async fn delta(&self, key: &str, since_version: u64) -> Result<Vec<StateVersion>, SyncError> {
        Ok(self
            .keys
            .get(key)
            .map(|slot| slot.lock().range((since_version + 1)..).map(|(_, v)| v.clone()).collect())
            .unwrap_or_default())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, SyncError> {
        Ok(self.keys.iter().map(|entry| entry.key().clone()).filter(|k| k.starts_with(prefix)).collect())
    }
}
