//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve and validate configuration
//! - Initialize logging and the metrics sink
//! - Hand control to the scheduler and close the sink afterwards
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and exits with code 1
//! - The sink is owned here and lent to every cycle

use crate::config::{Cli, ConfigError};
use crate::lifecycle::scheduler;
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::logging;
use crate::observability::metrics::StatsdSink;
use crate::probe::{ConnectionProber, PostgresConnector};

/// Exit code for configuration and startup failures.
pub const EXIT_FAILURE: u8 = 1;

/// Run the program for the given flags and return the process exit code.
pub async fn run(cli: Cli) -> u8 {
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, ConfigError::Validation(_)) {
                eprintln!("Run with --help for usage.");
            }
            return EXIT_FAILURE;
        }
    };

    logging::init(config.log_format);

    tracing::info!(
        statsd = %config.statsd_address,
        timeout_secs = config.timeout.as_secs(),
        schedule = ?config.schedule,
        tags = %config.tags,
        "Configuration loaded"
    );

    let sink = match StatsdSink::connect(&config.statsd_address).await {
        Ok(sink) => sink,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize StatsD client");
            return EXIT_FAILURE;
        }
    };

    let prober = ConnectionProber::new(
        PostgresConnector,
        config.uri.clone(),
        config.timeout,
        config.tags.clone(),
    );

    let code = scheduler::run(config.schedule, &prober, &sink, shutdown_signal()).await;

    sink.close();
    code
}
