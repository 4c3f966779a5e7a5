//! Timed mutex with a broken bounded wait.

use super::{TimedLock, TimedMutex};
use std::time::Duration;

/// Mutex whose `try_lock_for` never waits.
///
/// Blocking `lock`, `try_lock` and `unlock` behave like [`TimedMutex`]. A
/// bounded-wait acquisition makes one non-blocking attempt and reports failure
/// straight away when the lock is held, whatever the requested timeout. The
/// failure carries no diagnostic, matching the regressed runtime it models.
#[derive(Debug, Default)]
pub struct ImmediateTimeoutMutex {
    inner: TimedMutex,
}

impl ImmediateTimeoutMutex {
    /// Create a new, unlocked mutex.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimedLock for ImmediateTimeoutMutex {
    fn lock(&self) {
        self.inner.lock();
    }

    fn try_lock(&self) -> bool {
        self.inner.try_lock()
    }

    fn try_lock_for(&self, _timeout: Duration) -> bool {
        self.inner.try_lock()
    }

    fn unlock(&self) {
        self.inner.unlock();
    }
}
