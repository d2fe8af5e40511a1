//! Single-shot and repeating probe execution.
//!
//! # Design Decisions
//! - One periodic timer, one cycle per tick, never overlapping
//! - An overrunning cycle delays the next tick instead of bursting
//! - The first repeating cycle runs one period after start

use std::future::Future;
use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};

use crate::observability::metrics::MetricsSink;
use crate::probe::driver::Connector;
use crate::probe::prober::ConnectionProber;
use crate::probe::result::ProbeResult;

/// Intervals below this are treated as a request for the fallback interval.
pub const MIN_REPEAT_SECS: f64 = 0.001;

/// Interval used when a degenerate repeat value is given.
pub const FALLBACK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleMode {
    SingleShot,
    Repeating(Duration),
}

impl ScheduleMode {
    /// Map the `repeat` setting to a schedule.
    ///
    /// Zero or negative means single-shot. Positive values under a
    /// millisecond fall back to one second. Returns `None` for NaN and for
    /// values too large to represent.
    pub fn from_repeat_secs(secs: f64) -> Option<Self> {
        if secs.is_nan() {
            return None;
        }
        if secs <= 0.0 {
            return Some(ScheduleMode::SingleShot);
        }
        if secs < MIN_REPEAT_SECS {
            return Some(ScheduleMode::Repeating(FALLBACK_INTERVAL));
        }
        Duration::try_from_secs_f64(secs)
            .ok()
            .map(ScheduleMode::Repeating)
    }
}

/// Run according to `mode` and return the process exit code.
pub async fn run<C, S, F>(
    mode: ScheduleMode,
    prober: &ConnectionProber<C>,
    sink: &S,
    shutdown: F,
) -> u8
where
    C: Connector,
    S: MetricsSink + ?Sized,
    F: Future<Output = ()>,
{
    match mode {
        ScheduleMode::SingleShot => run_once(prober, sink).await.exit_code(),
        ScheduleMode::Repeating(period) => {
            run_repeating(prober, sink, period, shutdown).await;
            0
        }
    }
}

/// Run a single cycle and print its summary.
pub async fn run_once<C, S>(prober: &ConnectionProber<C>, sink: &S) -> ProbeResult
where
    C: Connector,
    S: MetricsSink + ?Sized,
{
    let result = prober.run(sink).await;
    println!("{result}");
    result
}

/// Run a cycle on every tick until `shutdown` resolves.
///
/// Returns the number of cycles executed.
pub async fn run_repeating<C, S, F>(
    prober: &ConnectionProber<C>,
    sink: &S,
    period: Duration,
    shutdown: F,
) -> u64
where
    C: Connector,
    S: MetricsSink + ?Sized,
    F: Future<Output = ()>,
{
    println!(
        "Starting repeated connection tests every {:.3} seconds...",
        period.as_secs_f64()
    );
    tracing::info!(
        interval_ms = period.as_millis() as u64,
        timeout_secs = prober.timeout().as_secs(),
        "Probe loop starting"
    );

    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::pin!(shutdown);
    let mut cycles = 0u64;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                run_once(prober, sink).await;
                cycles += 1;
            }
            _ = &mut shutdown => {
                tracing::info!(cycles, "Probe loop received shutdown signal, exiting loop");
                break;
            }
        }
    }

    cycles
}
