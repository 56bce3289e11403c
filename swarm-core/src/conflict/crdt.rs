//! Type-directed CRDT merges (§4.5). Every merge here is commutative,
//! associative and idempotent over its input set: merging the same
//! versions twice, or in any order, yields the same result.

// Layer 1: Standard library imports
use std::collections::BTreeSet;

// Layer 3: Internal module imports
use super::state_version::StateVersion;
use super::lww::lww_value;

/// `counter` (grow-only): sum of values.
pub fn merge_counter(versions: &[StateVersion]) -> serde_json::Value {
    let sum: f64 = versions.iter().filter_map(|v| v.value.as_f64()).sum();
    serde_json::json!(sum)
}

/// `pn-counter`: (sum of positive parts) - (sum of negative parts),
/// where each version carries `{"positive": n, "negative": n}`.
pub fn merge_pn_counter(versions: &[StateVersion]) -> serde_json::Value {
    let positive: f64 = versions.iter().filter_map(|v| v.value.get("positive")?.as_f64()).sum();
    let negative: f64 = versions.iter().filter_map(|v| v.value.get("negative")?.as_f64()).sum();
    serde_json::json!({ "positive": positive, "negative": negative, "value": positive - negative })
}

/// `or-set`: union of observed add-identifiers minus union of observed
/// remove-identifiers; a value present in both wins (add-wins), where
/// each version carries `{"added": [..], "removed": [..]}`.
pub fn merge_or_set(versions: &[StateVersion]) -> serde_json::Value {
    let mut added = BTreeSet::new();
    let mut removed = BTreeSet::new();

    for version in versions {
        if let Some(ids) = version.value.get("added").and_then(|v| v.as_array()) {
            added.extend(ids.iter().filter_map(|id| id.as_str()).map(str::to_string));
        }
        if let Some(ids) = version.value.get("removed").and_then(|v| v.as_array()) {
            removed.extend(ids.iter().filter_map(|id| id.as_str()).map(str::to_string));
        }
    }

    let surviving: BTreeSet<&String> = added.difference(&removed).collect();
    serde_json::json!({
        "added": added.iter().cloned().collect::<Vec<_>>(),
        "removed": removed.iter().cloned().collect::<Vec<_>>(),
        "elements": surviving.into_iter().cloned().collect::<Vec<_>>(),
    })
}

/// `g-set`: union, where each version carries a JSON array of elements.
pub fn merge_g_set(versions: &[StateVersion]) -> serde_json::Value {
    let mut set = BTreeSet::new();
    for version in versions {
        if let Some(elements) = version.value.as_array() {
            set.extend(elements.iter().filter_map(|e| e.as_str()).map(str::to_string));
        }
    }
    serde_json::json!(set.into_iter().collect::<Vec<_>>())
}

/// `lww-map`: key-wise LWW over all contributing versions. Each version's
/// timestamp/owner applies to every key its value object carries.
pub fn merge_lww_map(versions: &[StateVersion]) -> serde_json::Value {
    let mut winners: std::collections::BTreeMap<String, (&StateVersion, &serde_json::Value)> = std::collections::BTreeMap::new();

    for version in versions {
        let Some(map) = version.value.as_object() else { continue };
        for (key, value) in map {
            match winners.get(key) {
                Some((current, _)) if !is_later(version, current) => {}
                _ => {
                    winners.insert(key.clone(), (version, value));
                }
            }
        }
    }

    serde_json::Value::Object(winners.into_iter().map(|(k, (_, v))| (k, v.clone())).collect())
}

fn is_later(candidate: &StateVersion, current: &StateVersion) -> bool {
    (candidate.timestamp, &candidate.owner) > (current.timestamp, &current.owner)
}

/// `register` / missing-key-in-lww-map / a tie: the plain LWW rule.
pub fn merge_register(versions: &[StateVersion]) -> serde_json::Value {
    lww_value(versions)
}
