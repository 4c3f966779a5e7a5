//! Config struct definition and default implementation.

use super::types::*;
use crate::events::OutputFormat;
use crate::lock::LockKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a scenario run.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Choreography
    // =========================================================================
    /// How long main holds the lock after starting the worker (D1).
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,

    /// How long main sleeps after unlocking, before joining (D2).
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Worker's bounded-wait duration (D3).
    #[serde(default = "default_wait_ms")]
    pub wait_ms: u64,

    /// How long the worker keeps the lock after acquiring it (0 disables).
    #[serde(default)]
    pub worker_hold_ms: u64,

    /// Fixed sleeps or an explicit rendezvous before the hold.
    #[serde(default)]
    pub sync: SyncMode,

    // =========================================================================
    // Lock and output
    // =========================================================================
    /// Which timed-lock implementation to exercise.
    #[serde(default)]
    pub lock: LockKind,

    /// Event output format.
    #[serde(default)]
    pub format: OutputFormat,

    // =========================================================================
    // Analysis thresholds
    // =========================================================================
    /// Tolerated scheduling jitter when comparing intervals.
    #[serde(default = "default_jitter_ms")]
    pub jitter_ms: u64,

    /// A failure this soon after "lock try" counts as not having waited.
    #[serde(default = "default_immediate_ms")]
    pub immediate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hold_ms: default_hold_ms(),
            settle_ms: default_settle_ms(),
            wait_ms: default_wait_ms(),
            worker_hold_ms: 0,
            sync: SyncMode::default(),
            lock: LockKind::default(),
            format: OutputFormat::default(),
            jitter_ms: default_jitter_ms(),
            immediate_ms: default_immediate_ms(),
        }
    }
}

impl Config {
    /// D1 as a duration.
    pub fn hold(&self) -> Duration {
        Duration::from_millis(self.hold_ms)
    }

    /// D2 as a duration.
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// D3 as a duration.
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }

    /// Worker hold-after-acquire as a duration.
    pub fn worker_hold(&self) -> Duration {
        Duration::from_millis(self.worker_hold_ms)
    }
}
