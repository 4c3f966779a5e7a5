//! RAII guard for timed locks.

use super::TimedLock;
use std::fmt;
use std::time::Duration;

/// RAII guard for a held [`TimedLock`].
///
/// When dropped, the lock is released unless [`TimedGuard::release`] already
/// did so.
pub struct TimedGuard<'a> {
    lock: &'a dyn TimedLock,

    /// Whether the lock has been released manually.
    released: bool,
}

impl<'a> TimedGuard<'a> {
    fn new(lock: &'a dyn TimedLock) -> Self {
        Self {
            lock,
            released: false,
        }
    }

    /// Manually release the lock before the guard goes out of scope.
    pub fn release(mut self) {
        self.released = true;
        self.lock.unlock();
    }
}

impl fmt::Debug for TimedGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimedGuard")
            .field("released", &self.released)
            .finish()
    }
}

impl Drop for TimedGuard<'_> {
    fn drop(&mut self) {
        if !self.released {
            self.lock.unlock();
        }
    }
}

/// Acquire `lock`, blocking until it is available.
pub fn acquire(lock: &dyn TimedLock) -> TimedGuard<'_> {
    lock.lock();
    TimedGuard::new(lock)
}

/// Acquire `lock`, waiting at most `timeout`.
///
/// Returns `None` when the bounded wait ends without the lock. That is a
/// reportable outcome, not an error.
pub fn acquire_for(lock: &dyn TimedLock, timeout: Duration) -> Option<TimedGuard<'_>> {
    if lock.try_lock_for(timeout) {
        Some(TimedGuard::new(lock))
    } else {
        None
    }
}
