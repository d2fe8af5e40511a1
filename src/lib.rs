//! Database connection latency probe.
//!
//! Opens a PostgreSQL connection, times it, runs `SELECT 1`, and reports
//! attempt counts and latencies to a DogStatsD collector.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod probe;

pub use config::ProbeConfig;
pub use observability::{MetricsSink, StatsdSink, TagSet};
pub use probe::{ConnectionProber, ProbeResult};
