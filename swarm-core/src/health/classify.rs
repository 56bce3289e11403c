// Layer 1: Standard library imports
use std::time::Duration;

// Layer 3: Internal module imports
use super::config::HealthThresholds;
use crate::registry::HealthState;

/// Pure classification of a heartbeat age into a health state (§4.4's
/// state-machine table, collapsed to a function of `age` alone — the
/// entry/exit conditions reduce to the same thresholds either direction).
pub fn classify(age: Duration, thresholds: &HealthThresholds) -> HealthState {
    if age <= thresholds.healthy_max {
        HealthState::Healthy
    } else if age <= thresholds.degraded_max {
        HealthState::Degraded
    } else if age <= thresholds.critical_max {
        HealthState::Critical
    } else {
        HealthState::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let t = HealthThresholds::default();
        assert_eq!(classify(Duration::from_secs(10), &t), HealthState::Healthy);
        assert_eq!(classify(Duration::from_secs(11), &t), HealthState::Degraded);
        assert_eq!(classify(Duration::from_secs(20), &t), HealthState::Degraded);
        assert_eq!(classify(Duration::from_secs(21), &t), HealthState::Critical);
        assert_eq!(classify(Duration::from_secs(30), &t), HealthState::Critical);
        assert_eq!(classify(Duration::from_secs(31), &t), HealthState::Failed);
    }
}
