//! Metrics emission.
//!
//! # Metrics
//! - `chalk.conntester.attempt_count` (counter): one per probe cycle
//! - `chalk.conntester.duration` (distribution): connection acquisition, seconds
//! - `chalk.conntester.test_query_duration` (distribution): diagnostic query, seconds
//!
//! # Design Decisions
//! - DogStatsD over UDP through cadence, one datagram per metric, no buffering
//! - The socket is non-blocking; a full or refused socket is an error the caller logs
//! - Address resolution happens once, at construction

use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use cadence::prelude::*;
use cadence::{MetricError, StatsdClient, UdpMetricSink};
use thiserror::Error;

use crate::observability::tags::TagSet;

pub const ATTEMPT_COUNT: &str = "chalk.conntester.attempt_count";
pub const CONNECTION_DURATION: &str = "chalk.conntester.duration";
pub const TEST_QUERY_DURATION: &str = "chalk.conntester.test_query_duration";

/// Errors raised by a metrics sink.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// The sink address could not be resolved.
    #[error("failed to resolve metrics address {address}: {source}")]
    Resolve {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Resolution succeeded but produced nothing to send to.
    #[error("metrics address {0} resolved to no socket addresses")]
    NoAddress(String),

    /// Local socket setup failed.
    #[error("failed to set up metrics socket: {0}")]
    Bind(#[source] io::Error),

    /// The StatsD client could not be built.
    #[error("failed to build StatsD client: {0}")]
    Client(#[source] MetricError),

    /// A single metric could not be handed to the socket.
    #[error("failed to send metric {metric}: {source}")]
    Send {
        metric: String,
        #[source]
        source: MetricError,
    },
}

/// Destination for probe metrics.
///
/// Implementations must be fire-and-forget: no call may wait on the network.
pub trait MetricsSink: Send + Sync {
    /// Increment a counter by one.
    fn incr(&self, name: &str, tags: &TagSet) -> Result<(), MetricsError>;

    /// Record one sample of a distribution.
    fn distribution(&self, name: &str, value: f64, tags: &TagSet) -> Result<(), MetricsError>;
}

/// DogStatsD client backed by a cadence [`StatsdClient`].
pub struct StatsdSink {
    client: StatsdClient,
    target: SocketAddr,
}

impl StatsdSink {
    /// Resolve `address` and build a client sending from a non-blocking UDP
    /// socket. Metric names are sent without a prefix.
    pub async fn connect(address: &str) -> Result<Self, MetricsError> {
        let target = tokio::net::lookup_host(address)
            .await
            .map_err(|source| MetricsError::Resolve {
                address: address.to_string(),
                source,
            })?
            .next()
            .ok_or_else(|| MetricsError::NoAddress(address.to_string()))?;

        let local: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(local).map_err(MetricsError::Bind)?;
        socket.set_nonblocking(true).map_err(MetricsError::Bind)?;

        let sink = UdpMetricSink::from(target, socket).map_err(MetricsError::Client)?;
        let client = StatsdClient::from_sink("", sink);

        tracing::debug!(target_addr = %target, "StatsD client ready");

        Ok(Self { client, target })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Release the client and its socket.
    pub fn close(self) {
        tracing::debug!(target_addr = %self.target, "StatsD client closed");
    }

    fn send_error(name: &str) -> impl FnOnce(MetricError) -> MetricsError + '_ {
        move |source| MetricsError::Send {
            metric: name.to_string(),
            source,
        }
    }
}

impl MetricsSink for StatsdSink {
    fn incr(&self, name: &str, tags: &TagSet) -> Result<(), MetricsError> {
        let builder = tags.iter().fold(
            self.client.count_with_tags(name, 1i64),
            |builder, tag| match tag.split_once(':') {
                Some((key, val)) => builder.with_tag(key, val),
                None => builder.with_tag_value(tag),
            },
        );
        builder
            .try_send()
            .map(|_| ())
            .map_err(Self::send_error(name))
    }

    fn distribution(&self, name: &str, value: f64, tags: &TagSet) -> Result<(), MetricsError> {
        let builder = tags.iter().fold(
            self.client.distribution_with_tags(name, value),
            |builder, tag| match tag.split_once(':') {
                Some((key, val)) => builder.with_tag(key, val),
                None => builder.with_tag_value(tag),
            },
        );
        builder
            .try_send()
            .map(|_| ())
            .map_err(Self::send_error(name))
    }
}
