//! Single-shot exit codes and the repeating loop.

use std::time::Duration;

use conntester::lifecycle::scheduler::{self, ScheduleMode};
use conntester::observability::metrics::ATTEMPT_COUNT;
use conntester::observability::tags::TagSet;
use conntester::probe::ConnectionProber;

mod common;
use common::{FakeConnector, RecordingSink, Step};

fn prober(connector: FakeConnector) -> ConnectionProber<FakeConnector> {
    ConnectionProber::new(
        connector,
        "postgres://probe@db/app",
        Duration::from_secs(2),
        TagSet::parse("env:test"),
    )
}

#[tokio::test]
async fn test_single_shot_exit_codes() {
    let sink = RecordingSink::new();

    let ok = scheduler::run(
        ScheduleMode::SingleShot,
        &prober(FakeConnector::healthy()),
        &sink,
        std::future::pending(),
    )
    .await;
    assert_eq!(ok, 0);

    let query_failed = scheduler::run(
        ScheduleMode::SingleShot,
        &prober(FakeConnector {
            query: Step::Fail,
            ..FakeConnector::healthy()
        }),
        &sink,
        std::future::pending(),
    )
    .await;
    assert_eq!(query_failed, 0);

    let ping_failed = scheduler::run(
        ScheduleMode::SingleShot,
        &prober(FakeConnector {
            ping: Step::Fail,
            ..FakeConnector::healthy()
        }),
        &sink,
        std::future::pending(),
    )
    .await;
    assert_eq!(ping_failed, 1);

    let open_failed = scheduler::run(
        ScheduleMode::SingleShot,
        &prober(FakeConnector {
            open_ok: false,
            ..FakeConnector::healthy()
        }),
        &sink,
        std::future::pending(),
    )
    .await;
    assert_eq!(open_failed, 1);

    assert_eq!(sink.named(ATTEMPT_COUNT).len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_repeating_runs_once_per_tick_until_shutdown() {
    let connector = FakeConnector::healthy();
    let sink = RecordingSink::new();

    let cycles = scheduler::run_repeating(
        &prober(connector.clone()),
        &sink,
        Duration::from_secs(1),
        tokio::time::sleep(Duration::from_millis(3_500)),
    )
    .await;

    assert_eq!(cycles, 3);
    assert_eq!(connector.opened(), 3);
    assert_eq!(connector.dropped(), 3);
    assert_eq!(sink.named(ATTEMPT_COUNT).len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_repeating_ignores_failed_cycles() {
    let connector = FakeConnector {
        ping: Step::Fail,
        ..FakeConnector::healthy()
    };
    let sink = RecordingSink::new();

    let code = scheduler::run(
        ScheduleMode::Repeating(Duration::from_millis(500)),
        &prober(connector.clone()),
        &sink,
        tokio::time::sleep(Duration::from_millis(2_250)),
    )
    .await;

    assert_eq!(code, 0);
    assert_eq!(connector.opened(), 4);
    for emission in sink.named(ATTEMPT_COUNT) {
        assert_eq!(emission.tags, vec!["env:test", "status:failure"]);
    }
}

#[tokio::test(start_paused = true)]
async fn test_repeating_waits_one_period_before_first_cycle() {
    let connector = FakeConnector::healthy();
    let sink = RecordingSink::new();

    let cycles = scheduler::run_repeating(
        &prober(connector.clone()),
        &sink,
        Duration::from_secs(10),
        tokio::time::sleep(Duration::from_secs(5)),
    )
    .await;

    assert_eq!(cycles, 0);
    assert_eq!(connector.opened(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_clamped_interval_matches_one_second() {
    let mode = ScheduleMode::from_repeat_secs(0.0001).unwrap();
    assert_eq!(mode, ScheduleMode::from_repeat_secs(1.0).unwrap());

    let ScheduleMode::Repeating(period) = mode else {
        panic!("expected repeating mode");
    };

    let connector = FakeConnector::healthy();
    let sink = RecordingSink::new();
    let cycles = scheduler::run_repeating(
        &prober(connector),
        &sink,
        period,
        tokio::time::sleep(Duration::from_millis(2_500)),
    )
    .await;

    assert_eq!(cycles, 2);
}
