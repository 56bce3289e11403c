// Layer 1: Standard library imports
use std::time::Duration;

/// Heartbeat-age thresholds for the four-state health machine (§4.4).
///
/// Defaults match the spec: healthy ≤ 10s, degraded ≤ 20s, critical ≤ 30s,
/// anything older is failed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthThresholds {
    pub healthy_max: Duration,
    pub degraded_max: Duration,
    pub critical_max: Duration,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            healthy_max: Duration::from_secs(10),
            degraded_max: Duration::from_secs(20),
            critical_max: Duration::from_secs(30),
        }
    }
}

/// Sweep configuration: thresholds plus how often the monitor runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthMonitorConfig {
    pub thresholds: HealthThresholds,
    pub sweep_interval: Duration,
}

impl Default for HealthMonitorConfig {
    fn default() -> Self {
        Self {
            thresholds: HealthThresholds::default(),
            sweep_interval: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_match_spec() {
        let t = HealthThresholds::default();
        assert_eq!(t.healthy_max, Duration::from_secs(10));
        assert_eq!(t.degraded_max, Duration::from_secs(20));
        assert_eq!(t.critical_max, Duration::from_secs(30));
    }
}
