//! conntester
//!
//! Measures how long it takes to acquire a PostgreSQL connection and run a
//! trivial query, and reports the result to StatsD.
//!
//! # Architecture Overview
//!
//! ```text
//!   flags / env / TOML ──▶ config ──▶ ProbeConfig
//!                                        │
//!                                        ▼
//!                              lifecycle::scheduler
//!                           (once, or every N seconds)
//!                                        │
//!                                        ▼
//!   ┌──────────────┐  open/ping/query  ┌────────────┐  counter + distributions
//!   │  PostgreSQL  │◀─────────────────▶│   probe    │─────────────────────────▶ StatsD (UDP)
//!   └──────────────┘   one deadline    └────────────┘
//! ```
//!
//! Exit codes: 0 when the connection succeeded (single-shot) or after a
//! clean shutdown (repeating), 1 on configuration errors or a failed
//! connection.

use std::process::ExitCode;

use conntester::config::Cli;
use conntester::lifecycle::startup;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_normalized();
    ExitCode::from(startup::run(cli).await)
}
