//! Database connection probing.
//!
//! # Data Flow
//! ```text
//! ConnectionProber::run
//!     → Connector::open        (local handle, no I/O)
//!     → Connection::ping       (session + liveness, deadline-bound)
//!     → Connection::test_query (SELECT 1, same deadline)
//!     → MetricsSink            (attempt count, latency distributions)
//!     → ProbeResult            (console line, exit code)
//! ```
//!
//! # Design Decisions
//! - One deadline covers connect, ping and query
//! - The connection handle is owned by the cycle and dropped on every path
//! - Query failures never downgrade a successful connection

pub mod driver;
pub mod postgres;
pub mod prober;
pub mod result;

pub use driver::{Connection, Connector, DbError};
pub use postgres::PostgresConnector;
pub use prober::ConnectionProber;
pub use result::{FailureStage, ProbeResult};
