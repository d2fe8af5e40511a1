//! Database seam used by the prober.
//!
//! Opening a connection is split in two: [`Connector::open`] builds a handle
//! locally without touching the network, and [`Connection::ping`] performs
//! the actual session establishment. This mirrors how the probe classifies
//! failures: a handle that cannot even be built is a local failure.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the database driver.
#[derive(Debug, Error)]
pub enum DbError {
    /// The connection string could not be turned into a handle.
    #[error("invalid connection string: {0}")]
    InvalidUri(String),

    /// Session establishment or liveness check failed.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The diagnostic query failed.
    #[error("query failed: {0}")]
    Query(String),

    /// A query was issued before a successful ping.
    #[error("connection not established")]
    NotConnected,

    /// The cycle deadline elapsed.
    #[error("operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Builds connection handles from a connection string.
pub trait Connector: Send + Sync {
    type Conn: Connection;

    /// Construct a handle. Must not perform network I/O.
    fn open(&self, uri: &str) -> Result<Self::Conn, DbError>;
}

/// A single database connection handle.
///
/// Dropping the handle releases every resource it holds.
#[async_trait]
pub trait Connection: Send {
    /// Establish the session if needed and verify it is alive.
    async fn ping(&mut self) -> Result<(), DbError>;

    /// Run the diagnostic round-trip query.
    async fn test_query(&mut self) -> Result<(), DbError>;
}
