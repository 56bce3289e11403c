//! Pure conflict resolution (§4.5): no I/O, no shared state, just a
//! function from (state key, version set, strategy) to a winning version.

// Layer 3: Internal module imports
use super::crdt::{merge_counter, merge_g_set, merge_lww_map, merge_or_set, merge_pn_counter, merge_register};
use super::error::ConflictError;
use super::lww::lww_winner;
use super::state_version::{CrdtType, StateVersion};
use crate::util::AgentId;

/// Resolution strategy requested by the caller (§4.5, §4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Lww,
    VectorClock,
    Crdt,
}

/// Which rule actually decided the winner — useful for callers auditing
/// why a resolution went the way it did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Explanation {
    LwwTimestamp,
    LwwTieBreak,
    VectorClockDominance,
    VectorClockConcurrentLwwFallback,
    CrdtMerge(CrdtType),
}

/// The outcome of `resolve` (§4.5): a winning value plus the metadata
/// behind the decision.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub state_key: String,
    pub value: serde_json::Value,
    pub version: u64,
    pub owner: AgentId,
    pub explanation: Explanation,
}

/// Resolve a non-empty set of divergent versions of one state key into a
/// single winner. The returned version number is strictly greater than
/// every input version's number (§4.7 invariant).
pub fn resolve(versions: &[StateVersion], strategy: Strategy) -> Result<Resolution, ConflictError> {
    let Some(first) = versions.first() else {
        return Err(ConflictError::EmptyInput);
    };
    let state_key = first.state_key.clone();
    let next_version = versions.iter().map(|v| v.version).max().unwrap_or(0) + 1;

    let (value, owner, explanation) = match strategy {
        Strategy::Lww => {
            let winner = lww_winner(versions);
            let explanation = if versions.iter().filter(|v| v.timestamp == winner.timestamp).count() > 1 {
                Explanation::LwwTieBreak
            } else {
                Explanation::LwwTimestamp
            };
            (winner.value.clone(), winner.owner.clone(), explanation)
        }
        Strategy::VectorClock => resolve_by_vector_clock(versions),
        Strategy::Crdt => resolve_by_crdt(versions),
    };

    Ok(Resolution { state_key, value, version: next_version, owner, explanation })
}

fn resolve_by_vector_clock(versions: &[StateVersion]) -> (serde_json::Value, AgentId, Explanation) {
    let dominant = versions.iter().find(|candidate| {
        let Some(clock) = &candidate.vector_clock else { return false };
        versions
            .iter()
            .filter(|other| !std::ptr::eq(*other, *candidate))
            .all(|other| match &other.vector_clock {
                Some(other_clock) => clock.dominates(other_clock),
                None => true,
            })
    });

    match dominant {
        Some(winner) => (winner.value.clone(), winner.owner.clone(), Explanation::VectorClockDominance),
        None => {
            let winner = lww_winner(versions);
            (winner.value.clone(), winner.owner.clone(), Explanation::VectorClockConcurrentLwwFallback)
        }
    }
}

fn resolve_by_crdt(versions: &[StateVersion]) -> (serde_json::Value, AgentId, Explanation) {
    let crdt_type = versions.iter().find_map(|v| v.crdt_type).unwrap_or(CrdtType::Register);
    let value = match crdt_type {
        CrdtType::Counter => merge_counter(versions),
        CrdtType::PnCounter => merge_pn_counter(versions),
        CrdtType::Register => merge_register(versions),
        CrdtType::OrSet => merge_or_set(versions),
        CrdtType::GSet => merge_g_set(versions),
        CrdtType::LwwMap => merge_lww_map(versions),
    };
    let owner = lww_winner(versions).owner.clone();
    (value, owner, Explanation::CrdtMerge(crdt_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::VectorClock;

    fn version(owner: &str, version: u64) -> StateVersion {
        StateVersion::new("k", serde_json::json!(owner), version, AgentId::new(owner))
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(resolve(&[], Strategy::Lww).unwrap_err(), ConflictError::EmptyInput));
    }

    #[test]
    fn test_resolved_version_strictly_greater() {
        let versions = vec![version("a", 3), version("b", 5)];
        let resolution = resolve(&versions, Strategy::Lww).unwrap();
        assert!(resolution.version > 5);
    }

    #[test]
    fn test_vector_clock_dominance_wins() {
        let mut behind = VectorClock::new();
        behind.increment(&AgentId::new("a"));
        let mut ahead = behind.clone();
        ahead.increment(&AgentId::new("a"));

        let v1 = version("a", 1).with_vector_clock(behind);
        let v2 = version("b", 2).with_vector_clock(ahead);

        let resolution = resolve(&[v1, v2], Strategy::VectorClock).unwrap();
        assert_eq!(resolution.explanation, Explanation::VectorClockDominance);
        assert_eq!(resolution.owner, AgentId::new("b"));
    }

    #[test]
    fn test_vector_clock_concurrent_falls_back_to_lww() {
        let mut clock_a = VectorClock::new();
        clock_a.increment(&AgentId::new("a"));
        let mut clock_b = VectorClock::new();
        clock_b.increment(&AgentId::new("b"));

        let v1 = version("a", 1).with_vector_clock(clock_a);
        let v2 = version("b", 2).with_vector_clock(clock_b);

        let resolution = resolve(&[v1, v2], Strategy::VectorClock).unwrap();
        assert_eq!(resolution.explanation, Explanation::VectorClockConcurrentLwwFallback);
    }

    #[test]
    fn test_crdt_strategy_dispatches_by_type() {
        let versions = vec![
            StateVersion::new("k", serde_json::json!(2), 1, AgentId::new("a")).with_crdt_type(CrdtType::Counter),
            StateVersion::new("k", serde_json::json!(3), 2, AgentId::new("b")).with_crdt_type(CrdtType::Counter),
        ];
        let resolution = resolve(&versions, Strategy::Crdt).unwrap();
        assert_eq!(resolution.value, serde_json::json!(5.0));
    }
}
