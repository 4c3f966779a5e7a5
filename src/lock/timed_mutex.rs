//! Condvar-backed timed mutex.

use super::TimedLock;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Mutex with a bounded-wait acquisition that honors its full timeout.
///
/// The held flag lives behind a `std::sync::Mutex` and waiters park on a
/// `Condvar`. Bounded waits are computed against a fixed deadline, so
/// spurious or stolen wakeups never shorten the total wait.
#[derive(Debug, Default)]
pub struct TimedMutex {
    held: Mutex<bool>,
    released: Condvar,
}

impl TimedMutex {
    /// Create a new, unlocked mutex.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether some caller currently holds the lock.
    pub fn is_locked(&self) -> bool {
        *self.state()
    }

    // The flag is a plain bool, so a poisoned state is still meaningful.
    fn state(&self) -> MutexGuard<'_, bool> {
        self.held.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TimedLock for TimedMutex {
    fn lock(&self) {
        let mut held = self.state();
        while *held {
            held = self
                .released
                .wait(held)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *held = true;
    }

    fn try_lock(&self) -> bool {
        let mut held = self.state();
        if *held {
            return false;
        }
        *held = true;
        true
    }

    fn try_lock_for(&self, timeout: Duration) -> bool {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            self.lock();
            return true;
        };

        let mut held = self.state();
        while *held {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (guard, _) = self
                .released
                .wait_timeout(held, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            held = guard;
        }
        *held = true;
        true
    }

    fn unlock(&self) {
        let mut held = self.state();
        assert!(*held, "unlock called on a TimedMutex that is not locked");
        *held = false;
        drop(held);
        self.released.notify_one();
    }
}
