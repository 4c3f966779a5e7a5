//! Lock implementation selection.

use super::{ImmediateTimeoutMutex, TimedLock, TimedMutex};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which timed-lock implementation the scenario exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LockKind {
    /// Bounded wait honors its timeout (default).
    #[default]
    Correct,
    /// Bounded wait fails on the first contended attempt.
    Immediate,
}

impl LockKind {
    /// Parse a lock kind from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "correct" => Some(Self::Correct),
            "immediate" => Some(Self::Immediate),
            _ => None,
        }
    }

    /// Get the configuration name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            LockKind::Correct => "correct",
            LockKind::Immediate => "immediate",
        }
    }

    /// Construct a fresh, unlocked shared lock of this kind.
    pub fn build(&self) -> Arc<dyn TimedLock> {
        match self {
            LockKind::Correct => Arc::new(TimedMutex::new()),
            LockKind::Immediate => Arc::new(ImmediateTimeoutMutex::new()),
        }
    }
}

impl std::fmt::Display for LockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
