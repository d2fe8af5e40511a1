//! Connection probe cycle.
//!
//! # Responsibilities
//! - Time connection acquisition and one diagnostic query
//! - Bound all database work by a single per-cycle deadline
//! - Emit attempt/latency metrics tagged with the outcome

use std::time::Duration;

use tokio::time::{self, Instant};

use crate::observability::metrics::{
    MetricsError, MetricsSink, ATTEMPT_COUNT, CONNECTION_DURATION, TEST_QUERY_DURATION,
};
use crate::observability::tags::{Status, TagSet};
use crate::probe::driver::{Connection, Connector, DbError};
use crate::probe::result::{FailureStage, ProbeResult};

/// Deadline offset used when the configured timeout does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Runs connect → ping → query cycles against one endpoint.
pub struct ConnectionProber<C> {
    connector: C,
    uri: String,
    timeout: Duration,
    base_tags: TagSet,
}

impl<C: Connector> ConnectionProber<C> {
    pub fn new(connector: C, uri: impl Into<String>, timeout: Duration, base_tags: TagSet) -> Self {
        Self {
            connector,
            uri: uri.into(),
            timeout,
            base_tags,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Execute one probe cycle, reporting to `sink`.
    ///
    /// Never fails: database errors are folded into the result and metric
    /// errors are logged.
    pub async fn run<S>(&self, sink: &S) -> ProbeResult
    where
        S: MetricsSink + ?Sized,
    {
        let start = Instant::now();
        let deadline = start.checked_add(self.timeout).unwrap_or_else(|| start + FAR_FUTURE);

        let mut conn = match self.connector.open(&self.uri) {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to create database connection");
                let tags = self.base_tags.with_status(Status::Failure);
                report(sink.incr(ATTEMPT_COUNT, &tags));
                return ProbeResult::failed(FailureStage::Connect, start.elapsed());
            }
        };

        let ping = match time::timeout_at(deadline, conn.ping()).await {
            Ok(result) => result,
            Err(_) => Err(DbError::Timeout(self.timeout)),
        };
        let connection_latency = start.elapsed();

        let status = match &ping {
            Ok(()) => Status::Success,
            Err(e) => {
                tracing::warn!(error = %e, "Connection failed");
                Status::Failure
            }
        };

        let tags = self.base_tags.with_status(status);
        report(sink.distribution(CONNECTION_DURATION, connection_latency.as_secs_f64(), &tags));
        report(sink.incr(ATTEMPT_COUNT, &tags));

        if ping.is_err() {
            return ProbeResult::failed(FailureStage::Ping, connection_latency);
        }

        let query_start = Instant::now();
        let query = match time::timeout_at(deadline, conn.test_query()).await {
            Ok(result) => result,
            Err(_) => Err(DbError::Timeout(self.timeout)),
        };
        let query_latency = query_start.elapsed();

        let query_status = match &query {
            Ok(()) => Status::Success,
            Err(e) => {
                tracing::warn!(error = %e, "Test query failed");
                Status::QueryFailure
            }
        };

        let query_tags = self.base_tags.with_status(query_status);
        report(sink.distribution(TEST_QUERY_DURATION, query_latency.as_secs_f64(), &query_tags));

        tracing::debug!(
            connection_ms = connection_latency.as_millis() as u64,
            query_ms = query_latency.as_millis() as u64,
            query_ok = query.is_ok(),
            "Probe cycle finished"
        );

        ProbeResult::connected(connection_latency, query_latency, query.is_ok())
    }
}

fn report(outcome: Result<(), MetricsError>) {
    if let Err(e) = outcome {
        tracing::warn!(error = %e, "Failed to emit metric");
    }
}
