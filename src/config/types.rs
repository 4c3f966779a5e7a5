//! Config enums and default value functions.

use serde::{Deserialize, Serialize};

/// How the main thread paces the scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Fixed sleeps only, exactly like the reference reproduction (default).
    #[default]
    Sleep,
    /// Main waits until the worker has logged its attempt before holding.
    Rendezvous,
}

impl SyncMode {
    /// Parse a sync mode from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sleep" => Some(Self::Sleep),
            "rendezvous" => Some(Self::Rendezvous),
            _ => None,
        }
    }
}

/// Upper bound for every configured duration, in ms.
pub const MAX_DURATION_MS: u64 = 24 * 60 * 60 * 1000;

// Default value functions for serde
pub(super) fn default_hold_ms() -> u64 {
    2000
}
pub(super) fn default_settle_ms() -> u64 {
    2000
}
pub(super) fn default_wait_ms() -> u64 {
    5000
}
pub(super) fn default_jitter_ms() -> u64 {
    100
}
pub(super) fn default_immediate_ms() -> u64 {
    50
}
