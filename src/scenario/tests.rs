//! Tests for the scenario choreography.
//!
//! Durations are scaled down from the reference 2s/2s/5s so the suite stays fast.

use super::*;
use crate::error::TmlockError;
use crate::events::OutputFormat;
use crate::lock::{LockKind, TimedMutex};
use crate::test_support::SharedBuffer;
use serial_test::serial;
use std::time::Instant;

fn params(hold_ms: u64, settle_ms: u64, wait_ms: u64, sync: SyncMode) -> ScenarioParams {
    ScenarioParams {
        hold: Duration::from_millis(hold_ms),
        settle: Duration::from_millis(settle_ms),
        wait: Duration::from_millis(wait_ms),
        worker_hold: Duration::ZERO,
        sync,
    }
}

fn ts(events: &[Event], label: EventLabel) -> i64 {
    events
        .iter()
        .find(|e| e.label == label)
        .unwrap_or_else(|| panic!("missing {:?}", label))
        .ts_ms
}

fn labels(events: &[Event]) -> Vec<EventLabel> {
    events.iter().map(|e| e.label).collect()
}

/// Bounded wait that panics instead of answering.
struct PanickingLock(TimedMutex);

impl TimedLock for PanickingLock {
    fn lock(&self) {
        self.0.lock();
    }

    fn try_lock(&self) -> bool {
        self.0.try_lock()
    }

    fn try_lock_for(&self, _timeout: Duration) -> bool {
        panic!("bounded wait exploded");
    }

    fn unlock(&self) {
        self.0.unlock();
    }
}

#[test]
#[serial]
fn test_correct_lock_is_acquired_after_unlock() {
    let log = Arc::new(EventLog::silent());
    let outcome = run_scenario(
        &params(300, 100, 2000, SyncMode::Rendezvous),
        LockKind::Correct.build(),
        Arc::clone(&log),
    )
    .unwrap();

    assert_eq!(outcome.worker, WorkerOutcome::Acquired);
    let events = &outcome.events;
    assert_eq!(events.len(), 4);
    assert_eq!(labels(&events[..2]), vec![EventLabel::MutexLocked, EventLabel::LockTry]);

    let locked = ts(events, EventLabel::MutexLocked);
    let tried = ts(events, EventLabel::LockTry);
    let unlocked = ts(events, EventLabel::MutexUnlocked);
    let success = ts(events, EventLabel::LockSuccess);

    assert!(unlocked - locked >= 300);
    assert!(unlocked - locked < 300 + 200);
    // Acquisition follows the release essentially immediately
    assert!((success - unlocked).abs() <= 50);
    assert!(success - tried >= 250);
}

#[test]
#[serial]
fn test_immediate_lock_fails_before_unlock() {
    let log = Arc::new(EventLog::silent());
    let outcome = run_scenario(
        &params(300, 50, 2000, SyncMode::Rendezvous),
        LockKind::Immediate.build(),
        log,
    )
    .unwrap();

    assert_eq!(outcome.worker, WorkerOutcome::NotAcquired);
    assert_eq!(
        labels(&outcome.events),
        vec![
            EventLabel::MutexLocked,
            EventLabel::LockTry,
            EventLabel::LockFailed,
            EventLabel::MutexUnlocked,
        ]
    );

    let tried = ts(&outcome.events, EventLabel::LockTry);
    let failed = ts(&outcome.events, EventLabel::LockFailed);
    assert!(failed - tried < 50);
}

#[test]
#[serial]
fn test_hold_longer_than_wait_times_out_before_unlock() {
    let log = Arc::new(EventLog::silent());
    let outcome = run_scenario(
        &params(600, 0, 200, SyncMode::Rendezvous),
        LockKind::Correct.build(),
        log,
    )
    .unwrap();

    assert_eq!(outcome.worker, WorkerOutcome::NotAcquired);
    let events = &outcome.events;
    let tried = ts(events, EventLabel::LockTry);
    let failed = ts(events, EventLabel::LockFailed);
    let unlocked = ts(events, EventLabel::MutexUnlocked);

    assert!(failed - tried >= 200);
    assert!(failed < unlocked);
}

#[test]
#[serial]
fn test_sleep_choreography_emits_exactly_one_outcome() {
    let log = Arc::new(EventLog::silent());
    let outcome = run_scenario(
        &params(200, 100, 1000, SyncMode::Sleep),
        LockKind::Correct.build(),
        log,
    )
    .unwrap();

    let events = &outcome.events;
    assert_eq!(events.len(), 4);
    for label in [
        EventLabel::MutexLocked,
        EventLabel::MutexUnlocked,
        EventLabel::LockTry,
    ] {
        assert_eq!(events.iter().filter(|e| e.label == label).count(), 1);
    }
    assert_eq!(events.iter().filter(|e| e.label.is_outcome()).count(), 1);
    assert!(events.windows(2).all(|w| w[0].ts_ms <= w[1].ts_ms));
}

#[test]
#[serial]
fn test_main_joins_worker_holding_the_lock() {
    let log = Arc::new(EventLog::silent());
    let mut p = params(100, 0, 1000, SyncMode::Rendezvous);
    p.worker_hold = Duration::from_millis(300);

    let lock: Arc<dyn TimedLock> = Arc::new(TimedMutex::new());
    let start = Instant::now();
    let outcome = run_scenario(&p, Arc::clone(&lock), log).unwrap();

    assert_eq!(outcome.worker, WorkerOutcome::Acquired);
    // Join waited for the worker's hold to finish
    assert!(start.elapsed() >= Duration::from_millis(400));
    // Lock state is consistent once the worker has ended
    assert!(lock.try_lock());
    lock.unlock();
}

#[test]
#[serial]
fn test_worker_panic_is_thread_error() {
    let log = Arc::new(EventLog::silent());
    let lock: Arc<dyn TimedLock> = Arc::new(PanickingLock(TimedMutex::new()));

    let err = run_scenario(&params(50, 0, 500, SyncMode::Rendezvous), lock, log).unwrap_err();

    assert!(matches!(err, TmlockError::ThreadError(_)));
    assert!(err.to_string().contains("bounded wait exploded"));
}

#[test]
#[serial]
fn test_text_output_matches_reference_format() {
    let buffer = SharedBuffer::new();
    let log = Arc::new(EventLog::with_sink(
        OutputFormat::Text,
        Box::new(buffer.clone()),
    ));

    let outcome = run_scenario(
        &params(150, 50, 1000, SyncMode::Rendezvous),
        LockKind::Correct.build(),
        log,
    )
    .unwrap();

    let output = buffer.contents();
    let expected: Vec<String> = outcome.events.iter().map(|e| e.to_text_line()).collect();
    assert_eq!(output.lines().collect::<Vec<_>>(), expected);
    assert!(output.contains(" M mutex locked\n"));
    assert!(output.contains(" T lock try\n"));
}

#[test]
#[serial]
fn test_run_configured_uses_config_lock_kind() {
    let config = Config {
        hold_ms: 200,
        settle_ms: 0,
        wait_ms: 1000,
        sync: SyncMode::Rendezvous,
        lock: LockKind::Immediate,
        ..Config::default()
    };

    let outcome = run_configured(&config, Arc::new(EventLog::silent())).unwrap();
    assert_eq!(outcome.worker, WorkerOutcome::NotAcquired);
}

#[test]
fn test_params_from_config() {
    let config = Config {
        hold_ms: 10,
        settle_ms: 20,
        wait_ms: 30,
        worker_hold_ms: 40,
        ..Config::default()
    };

    let p = ScenarioParams::from(&config);
    assert_eq!(p.hold, Duration::from_millis(10));
    assert_eq!(p.settle, Duration::from_millis(20));
    assert_eq!(p.wait, Duration::from_millis(30));
    assert_eq!(p.worker_hold, Duration::from_millis(40));
    assert_eq!(p.sync, SyncMode::Sleep);
}
