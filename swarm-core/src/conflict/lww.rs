//! Last-writer-wins comparison, shared by the plain LWW strategy and as
//! the fallback when vector clocks are concurrent or a CRDT merge needs a
//! tiebreak (§4.5).

// Layer 3: Internal module imports
use super::state_version::StateVersion;

/// Choose the winning version by greatest timestamp, ties broken by
/// greatest owning-agent id lexicographically. Deterministic and total.
pub fn lww_winner<'a>(versions: &'a [StateVersion]) -> &'a StateVersion {
    versions
        .iter()
        .max_by(|a, b| (a.timestamp, &a.owner).cmp(&(b.timestamp, &b.owner)))
        .expect("caller guarantees a non-empty slice")
}

/// The winning version's value, by the same rule.
pub fn lww_value(versions: &[StateVersion]) -> serde_json::Value {
    lww_winner(versions).value.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::AgentId;
    use chrono::{DateTime, Utc};

    fn version_at(owner: &str, timestamp: DateTime<Utc>) -> StateVersion {
        let mut v = StateVersion::new("k", serde_json::json!(owner), 1, AgentId::new(owner));
        v.timestamp = timestamp;
        v
    }

    #[test]
    fn test_greatest_timestamp_wins() {
        let older = version_at("a", Utc::now() - chrono::Duration::seconds(10));
        let newer = version_at("b", Utc::now());
        let versions = [older, newer];
        let winner = lww_winner(&versions);
        assert_eq!(winner.owner, AgentId::new("b"));
    }

    #[test]
    fn test_tie_broken_by_owner_lexicographic() {
        let now = Utc::now();
        let a = version_at("agent-a", now);
        let z = version_at("agent-z", now);
        let versions = [a, z];
        let winner = lww_winner(&versions);
        assert_eq!(winner.owner, AgentId::new("agent-z"));
    }
}
