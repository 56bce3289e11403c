//! Coordinator configuration and fluent builder, grounded on the
//! teacher's `SystemConfig`/`SystemConfigBuilder` pair.

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 3: Internal module imports
use crate::conflict::Strategy;
use crate::health::HealthMonitorConfig;
use crate::topology::TopologyKind;

const DEFAULT_MAILBOX_CAPACITY: usize = 256;
const DEFAULT_SYNC_TIMEOUT: Duration = Duration::from_secs(10);

/// Swarm-wide configuration (§4.8). Consensus, conflict resolution and
/// synchronization may each be disabled; disabled operations fail with
/// `CoordinatorError::FeatureDisabled` rather than silently no-op'ing.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    pub mailbox_capacity: usize,
    pub default_topology: TopologyKind,
    pub consensus_enabled: bool,
    pub conflict_resolution_enabled: bool,
    pub synchronization_enabled: bool,
    pub sync_timeout: Duration,
    pub resolve_strategy: Strategy,
    pub health: HealthMonitorConfig,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            default_topology: TopologyKind::Mesh,
            consensus_enabled: true,
            conflict_resolution_enabled: true,
            synchronization_enabled: true,
            sync_timeout: DEFAULT_SYNC_TIMEOUT,
            resolve_strategy: Strategy::Lww,
            health: HealthMonitorConfig::default(),
        }
    }
}

impl CoordinatorConfig {
    pub fn builder() -> CoordinatorConfigBuilder {
        CoordinatorConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.mailbox_capacity == 0 {
            return Err("mailbox_capacity must be > 0".to_string());
        }
        if self.sync_timeout.is_zero() {
            return Err("sync_timeout must be > 0".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct CoordinatorConfigBuilder {
    config: CoordinatorConfig,
}

impl CoordinatorConfigBuilder {
    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.config.mailbox_capacity = capacity;
        self
    }

    pub fn with_default_topology(mut self, kind: TopologyKind) -> Self {
        self.config.default_topology = kind;
        self
    }

    pub fn with_consensus_enabled(mut self, enabled: bool) -> Self {
        self.config.consensus_enabled = enabled;
        self
    }

    pub fn with_conflict_resolution_enabled(mut self, enabled: bool) -> Self {
        self.config.conflict_resolution_enabled = enabled;
        self
    }

    pub fn with_synchronization_enabled(mut self, enabled: bool) -> Self {
        self.config.synchronization_enabled = enabled;
        self
    }

    pub fn with_sync_timeout(mut self, timeout: Duration) -> Self {
        self.config.sync_timeout = timeout;
        self
    }

    pub fn with_resolve_strategy(mut self, strategy: Strategy) -> Self {
        self.config.resolve_strategy = strategy;
        self
    }

    pub fn build(self) -> Result<CoordinatorConfig, String> {
        self.config.validate()?;
        Ok(self.config)
    }
}
