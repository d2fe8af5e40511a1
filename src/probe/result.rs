//! Outcome of a single probe cycle.

use std::fmt;
use std::time::Duration;

/// Where a cycle stopped going well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    None,
    /// The connection handle could not be built.
    Connect,
    /// The session could not be established or did not answer in time.
    Ping,
    /// Connected, but the diagnostic query failed.
    Query,
}

/// Result of one probe cycle.
///
/// `success` reflects the connection phase only; a failed diagnostic query
/// leaves it `true` and sets `failure_stage` to [`FailureStage::Query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub success: bool,
    pub connection_latency: Duration,
    pub query_latency: Option<Duration>,
    pub failure_stage: FailureStage,
}

impl ProbeResult {
    pub(crate) fn failed(stage: FailureStage, connection_latency: Duration) -> Self {
        Self {
            success: false,
            connection_latency,
            query_latency: None,
            failure_stage: stage,
        }
    }

    pub(crate) fn connected(
        connection_latency: Duration,
        query_latency: Duration,
        query_ok: bool,
    ) -> Self {
        Self {
            success: true,
            connection_latency,
            query_latency: Some(query_latency),
            failure_stage: if query_ok {
                FailureStage::None
            } else {
                FailureStage::Query
            },
        }
    }

    /// Process exit code for single-shot mode.
    pub fn exit_code(&self) -> u8 {
        if self.success {
            0
        } else {
            1
        }
    }
}

fn millis(d: Duration) -> f64 {
    d.as_micros() as f64 / 1000.0
}

/// One-line human summary printed after every cycle.
impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.success {
            return write!(
                f,
                "Connection test failed (latency: {:.3}ms)",
                millis(self.connection_latency)
            );
        }

        let headline = match self.failure_stage {
            FailureStage::Query => "Connection test completed with query failure",
            _ => "Connection test completed successfully",
        };

        match self.query_latency {
            Some(query) => write!(
                f,
                "{} (connection: {:.3}ms, query: {:.3}ms)",
                headline,
                millis(self.connection_latency),
                millis(query)
            ),
            None => write!(
                f,
                "{} (connection: {:.3}ms)",
                headline,
                millis(self.connection_latency)
            ),
        }
    }
}
