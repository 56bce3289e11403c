//! Health Monitor: classifies every agent's health from heartbeat age on
//! a periodic sweep, feeding downstream alerting (§4.4).

pub mod alert;
pub mod classify;
pub mod config;
pub mod monitor;
pub mod record;

pub use alert::{AlertSeverity, HealthAlert};
pub use classify::classify;
pub use config::{HealthMonitorConfig, HealthThresholds};
pub use monitor::HealthMonitor;
pub use record::HealthRecord;
