//! Worker routine: one bounded-wait attempt on the shared lock.

use crate::error::Result;
use crate::events::{EventLabel, EventLog};
use crate::lock::{self, TimedLock};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

/// How the worker's bounded wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// The lock was acquired within the bounded wait.
    Acquired,
    /// The bounded wait ended without the lock.
    NotAcquired,
}

pub(super) fn run(
    lock: &dyn TimedLock,
    log: &EventLog,
    wait: Duration,
    worker_hold: Duration,
    rendezvous: Option<Arc<Barrier>>,
) -> Result<WorkerOutcome> {
    let tried = log.record(EventLabel::LockTry);

    // Main is parked on the barrier; release it even if logging failed.
    if let Some(barrier) = rendezvous {
        barrier.wait();
    }
    tried?;

    let Some(guard) = lock::acquire_for(lock, wait) else {
        log.record(EventLabel::LockFailed)?;
        return Ok(WorkerOutcome::NotAcquired);
    };

    log.record(EventLabel::LockSuccess)?;
    if !worker_hold.is_zero() {
        thread::sleep(worker_hold);
    }
    guard.release();

    Ok(WorkerOutcome::Acquired)
}
