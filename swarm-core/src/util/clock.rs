//! Logical clocks used to order causally-related state versions.
//!
//! A [`VectorClock`] records, for every agent that has ever written a
//! given state key, the highest version from that agent observed by the
//! clock's owner. Two clocks are compared structurally: one dominates
//! another when every entry is greater-or-equal and at least one entry is
//! strictly greater; otherwise the clocks are concurrent.

// Layer 1: Standard library imports
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::util::AgentId;

/// Per-agent logical clock used to build [`VectorClock`] entries.
///
/// # Example
/// ```rust
/// use swarm_core::util::clock::VectorClock;
/// use swarm_core::util::AgentId;
///
/// let mut vc = VectorClock::new();
/// vc.increment(&AgentId::new("a1"));
/// assert_eq!(vc.get(&AgentId::new("a1")), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorClock {
    entries: BTreeMap<AgentId, u64>,
}

/// The causal relationship between two [`VectorClock`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CausalOrder {
    /// `self` happened strictly before `other`.
    Before,
    /// `self` happened strictly after `other`.
    After,
    /// The clocks are identical.
    Equal,
    /// Neither clock dominates the other.
    Concurrent,
}

impl VectorClock {
    /// Create an empty vector clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the entry for `agent` by one and return the new value.
    pub fn increment(&mut self, agent: &AgentId) -> u64 {
        let entry = self.entries.entry(agent.clone()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Read the logical time recorded for `agent` (zero if unseen).
    pub fn get(&self, agent: &AgentId) -> u64 {
        self.entries.get(agent).copied().unwrap_or(0)
    }

    /// Merge another clock into this one, taking the entry-wise maximum.
    /// Used when an agent observes a peer's clock over the wire.
    pub fn merge(&mut self, other: &VectorClock) {
        for (agent, &value) in &other.entries {
            let entry = self.entries.entry(agent.clone()).or_insert(0);
            *entry = (*entry).max(value);
        }
    }

    /// Iterate the known (agent, logical-time) pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&AgentId, u64)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    /// Compare this clock against another per `spec.md` §3: dominance
    /// requires every entry to be greater-or-equal with at least one
    /// strictly greater entry; otherwise the clocks are concurrent.
    pub fn compare(&self, other: &VectorClock) -> CausalOrder {
        let mut self_greater = false;
        let mut other_greater = false;

        let mut agents: Vec<&AgentId> = self.entries.keys().chain(other.entries.keys()).collect();
        agents.sort();
        agents.dedup();

        for agent in agents {
            match self.get(agent).cmp(&other.get(agent)) {
                Ordering::Greater => self_greater = true,
                Ordering::Less => other_greater = true,
                Ordering::Equal => {}
            }
        }

        match (self_greater, other_greater) {
            (false, false) => CausalOrder::Equal,
            (true, false) => CausalOrder::After,
            (false, true) => CausalOrder::Before,
            (true, true) => CausalOrder::Concurrent,
        }
    }

    /// True when this clock causally dominates `other` (`After`).
    pub fn dominates(&self, other: &VectorClock) -> bool {
        matches!(self.compare(other), CausalOrder::After)
    }

    /// True when neither clock dominates the other.
    pub fn is_concurrent_with(&self, other: &VectorClock) -> bool {
        matches!(self.compare(other), CausalOrder::Concurrent)
    }
}

/// Monotonic per-(state-key, owner) version counter.
///
/// `spec.md` §3 requires `StateVersion.version` to be strictly increasing
/// per (state-key, owning agent). One counter is allocated lazily per key
/// the first time an agent writes it.
#[derive(Debug, Default)]
pub struct VersionCounter {
    value: AtomicU64,
}

impl VersionCounter {
    /// Create a counter starting at zero.
    pub fn new() -> Self {
        Self {
            value: AtomicU64::new(0),
        }
    }

    /// Atomically produce the next strictly-increasing version number.
    pub fn next(&self) -> u64 {
        self.value.fetch_add(1, AtomicOrdering::SeqCst) + 1
    }

    /// Current highest issued version (0 if `next` was never called).
    pub fn current(&self) -> u64 {
        self.value.load(AtomicOrdering::SeqCst)
    }

    /// Advance the counter to at least `floor`, used when adopting a
    /// version learned from a peer so subsequent local writes stay ahead
    /// of it.
    pub fn advance_to_at_least(&self, floor: u64) {
        let mut current = self.value.load(AtomicOrdering::SeqCst);
        while current < floor {
            match self.value.compare_exchange_weak(
                current,
                floor,
                AtomicOrdering::SeqCst,
                AtomicOrdering::SeqCst,
            ) {
                Ok(_) => break,
                Err(observed) => current = observed,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(name: &str) -> AgentId {
        AgentId::new(name)
    }

    #[test]
    fn test_increment_and_get() {
        let mut vc = VectorClock::new();
        assert_eq!(vc.get(&agent("a")), 0);
        vc.increment(&agent("a"));
        vc.increment(&agent("a"));
        assert_eq!(vc.get(&agent("a")), 2);
    }

    #[test]
    fn test_dominance() {
        let mut a = VectorClock::new();
        a.increment(&agent("a"));
        a.increment(&agent("a"));

        let mut b = VectorClock::new();
        b.increment(&agent("a"));

        assert_eq!(a.compare(&b), CausalOrder::After);
        assert_eq!(b.compare(&a), CausalOrder::Before);
        assert!(a.dominates(&b));
        assert!(!b.dominates(&a));
    }

    #[test]
    fn test_concurrent_clocks() {
        let mut a = VectorClock::new();
        a.increment(&agent("a"));

        let mut b = VectorClock::new();
        b.increment(&agent("b"));

        assert_eq!(a.compare(&b), CausalOrder::Concurrent);
        assert!(a.is_concurrent_with(&b));
        assert!(!a.dominates(&b));
        assert!(!b.dominates(&a));
    }

    #[test]
    fn test_equal_clocks() {
        let mut a = VectorClock::new();
        a.increment(&agent("a"));
        let b = a.clone();
        assert_eq!(a.compare(&b), CausalOrder::Equal);
    }

    #[test]
    fn test_merge_takes_max() {
        let mut a = VectorClock::new();
        a.increment(&agent("a"));

        let mut b = VectorClock::new();
        b.increment(&agent("a"));
        b.increment(&agent("a"));
        b.increment(&agent("b"));

        a.merge(&b);
        assert_eq!(a.get(&agent("a")), 2);
        assert_eq!(a.get(&agent("b")), 1);
    }

    #[test]
    fn test_version_counter_strictly_increasing() {
        let counter = VersionCounter::new();
        let v1 = counter.next();
        let v2 = counter.next();
        assert!(v2 > v1);
        assert_eq!(counter.current(), v2);
    }

    #[test]
    fn test_version_counter_advance_to_at_least() {
        let counter = VersionCounter::new();
        counter.next();
        counter.advance_to_at_least(100);
        assert_eq!(counter.current(), 100);
        let next = counter.next();
        assert_eq!(next, 101);
    }

    #[test]
    fn test_version_counter_advance_does_not_regress() {
        let counter = VersionCounter::new();
        for _ in 0..5 {
            counter.next();
        }
        counter.advance_to_at_least(2);
        assert_eq!(counter.current(), 5);
    }
}
