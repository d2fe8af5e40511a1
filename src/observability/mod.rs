//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Probe cycle produces:
//!     → tags.rs (base tags + status, copy per emission)
//!     → metrics.rs (DogStatsD counter / distributions over UDP)
//!     → logging.rs (structured log events on stderr)
//! ```
//!
//! # Design Decisions
//! - Metric emission is best-effort and never fails a probe
//! - The connection URI is never logged; it may carry credentials

pub mod logging;
pub mod metrics;
pub mod tags;

pub use metrics::{MetricsError, MetricsSink, StatsdSink};
pub use tags::{Status, TagSet};
