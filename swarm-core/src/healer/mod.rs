//! Self-Healer (§4.10): turns health alerts and bottleneck findings into
//! recovery actions via a data-driven failure-kind → strategy table,
//! with a bounded outcome history and a preventive mode.

mod error;
mod healer;
mod types;

pub use error::HealerError;
pub use healer::SelfHealer;
pub use types::{Effectiveness, FailureKind, HealingOutcome, HealingStrategy, Trend};
