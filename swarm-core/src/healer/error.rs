// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use crate::registry::RegistryError;
use crate::util::AgentId;

/// Self-Healer errors (§4.10, §7).
#[derive(Error, Debug)]
pub enum HealerError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A retry-task action exhausted its bounded attempt budget.
    #[error("task for {agent} exhausted its retry budget ({attempts} attempts)")]
    RetryBudgetExhausted { agent: AgentId, attempts: u32 },

    /// A quorum-recovery action had no critical agents to re-register.
    #[error("quorum recovery found no agents to recover")]
    NothingToRecover,
}

impl HealerError {
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Registry(e) if e.is_caller_error())
    }
}
