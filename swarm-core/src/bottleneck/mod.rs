//! Bottleneck Detector: rolling-window analyzer emitting typed findings
//! with severity and remediation suggestions (§4.9).

pub mod detector;
pub mod types;

pub use detector::{BottleneckDetector, DEFAULT_WINDOW};
pub use types::{Bottleneck, BottleneckKind, MetricsWindow, Severity};
