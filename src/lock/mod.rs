//! Timed locking primitives.
//!
//! This module provides the shared lock exercised by the scenario:
//! - `TimedMutex`: a mutex whose bounded-wait acquisition really waits
//! - `ImmediateTimeoutMutex`: a mutex whose bounded wait gives up on the
//!   first contended attempt, reproducing the regression under study
//!
//! Both implement [`TimedLock`], so the scenario can be run against either
//! through an `Arc<dyn TimedLock>` handle.
//!
//! # RAII Guards
//!
//! [`acquire`] and [`acquire_for`] return a [`TimedGuard`] that releases the
//! lock when dropped, so lock state is consistent whenever a thread ends.

mod guard;
mod immediate;
mod timed_mutex;
mod types;


// Re-export public API
pub use guard::{TimedGuard, acquire, acquire_for};
pub use immediate::ImmediateTimeoutMutex;
pub use timed_mutex::TimedMutex;
pub use types::LockKind;

use std::time::Duration;

/// A mutual-exclusion lock with blocking, non-blocking and bounded-wait
/// acquisition.
///
/// The lock is not re-entrant and is not tied to the acquiring thread:
/// callers must pair every successful acquisition with exactly one `unlock`.
pub trait TimedLock: Send + Sync {
    /// Acquire the lock, blocking until it becomes available.
    fn lock(&self);

    /// Try to acquire the lock without blocking.
    /// Returns `true` if acquired, `false` if already held.
    fn try_lock(&self) -> bool;

    /// Try to acquire the lock, waiting at most `timeout` for it.
    /// Returns `true` if acquired. A `false` return is an ordinary outcome.
    fn try_lock_for(&self, timeout: Duration) -> bool;

    /// Release the lock.
    ///
    /// # Panics
    ///
    /// Panics if the lock is not currently held.
    fn unlock(&self);
}
