//! The two-thread timed-lock scenario.
//!
//! Main acquires the shared lock, starts the worker, holds the lock for D1,
//! releases it, sleeps D2 and joins the worker. The worker logs its attempt,
//! waits at most D3 for the lock and reports the outcome. The shared lock
//! and the event log are handed to the worker as `Arc` handles at spawn time.

mod worker;

#[cfg(test)]
mod tests;

pub use worker::WorkerOutcome;

use crate::config::{Config, SyncMode};
use crate::error::{Result, TmlockError};
use crate::events::{Event, EventLabel, EventLog};
use crate::lock::{self, TimedLock};
use std::sync::{Arc, Barrier};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Name given to the worker OS thread.
pub const WORKER_THREAD_NAME: &str = "tmlock-worker";

/// Timing parameters for one scenario run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioParams {
    /// How long main holds the lock after starting the worker (D1).
    pub hold: Duration,
    /// How long main sleeps after unlocking, before joining (D2).
    pub settle: Duration,
    /// Worker's bounded wait (D3).
    pub wait: Duration,
    /// How long the worker keeps the lock after acquiring it.
    pub worker_hold: Duration,
    /// Fixed sleeps or explicit rendezvous.
    pub sync: SyncMode,
}

impl From<&Config> for ScenarioParams {
    fn from(config: &Config) -> Self {
        Self {
            hold: config.hold(),
            settle: config.settle(),
            wait: config.wait(),
            worker_hold: config.worker_hold(),
            sync: config.sync,
        }
    }
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioOutcome {
    /// How the worker's bounded wait ended.
    pub worker: WorkerOutcome,
    /// The full timeline, ordered by timestamp.
    pub events: Vec<Event>,
}

/// Run the scenario described by `config` on a fresh lock of the configured kind.
pub fn run_configured(config: &Config, log: Arc<EventLog>) -> Result<ScenarioOutcome> {
    run_scenario(&ScenarioParams::from(config), config.lock.build(), log)
}

/// Run the main control routine against `lock`, recording into `log`.
///
/// Returns once the worker has been joined. A worker that fails to acquire
/// the lock is a normal outcome; only a failed spawn, a worker panic or an
/// output failure is an error.
pub fn run_scenario(
    params: &ScenarioParams,
    lock: Arc<dyn TimedLock>,
    log: Arc<EventLog>,
) -> Result<ScenarioOutcome> {
    let held = lock::acquire(lock.as_ref());
    log.record(EventLabel::MutexLocked)?;

    let rendezvous = match params.sync {
        SyncMode::Sleep => None,
        SyncMode::Rendezvous => Some(Arc::new(Barrier::new(2))),
    };

    let worker = spawn_worker(params, &lock, &log, rendezvous.clone())?;

    if let Some(barrier) = &rendezvous {
        barrier.wait();
    }

    thread::sleep(params.hold);
    held.release();
    let unlocked = log.record(EventLabel::MutexUnlocked);

    thread::sleep(params.settle);
    let outcome = join_worker(worker)?;
    unlocked?;

    Ok(ScenarioOutcome {
        worker: outcome,
        events: log.snapshot(),
    })
}

fn spawn_worker(
    params: &ScenarioParams,
    lock: &Arc<dyn TimedLock>,
    log: &Arc<EventLog>,
    rendezvous: Option<Arc<Barrier>>,
) -> Result<JoinHandle<Result<WorkerOutcome>>> {
    let wait = params.wait;
    let worker_hold = params.worker_hold;
    let lock = Arc::clone(lock);
    let log = Arc::clone(log);

    thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(move || worker::run(lock.as_ref(), &log, wait, worker_hold, rendezvous))
        .map_err(|e| TmlockError::ThreadError(format!("failed to spawn worker: {}", e)))
}

/// Block until the worker has finished, surfacing a panic as `ThreadError`.
fn join_worker(handle: JoinHandle<Result<WorkerOutcome>>) -> Result<WorkerOutcome> {
    handle.join().map_err(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        TmlockError::ThreadError(format!("worker panicked: {}", reason))
    })?
}
