//! Event timeline for the timed-lock scenario.
//!
//! Both threads record events into a shared, append-only [`EventLog`]. Each
//! event is a `(timestamp, actor, label)` triple, written to the output sink
//! the moment it is recorded.
//!
//! # Output Formats
//!
//! - `text`: `<timestamp_ms> <actor> <message>`, e.g. `1410448076263 M mutex locked`
//! - `json`: one JSON object per line (NDJSON):
//!   `{"ts_ms":1410448076263,"actor":"M","label":"mutex_locked","message":"mutex locked"}`
//!
//! Timestamps are milliseconds since the Unix epoch.

mod log;
mod parse;


pub use log::{EventLog, OutputFormat};
pub use parse::{parse_line, parse_timeline};

use crate::error::{Result, TmlockError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// The thread of control that emitted an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Actor {
    /// Main control thread.
    #[serde(rename = "M")]
    Main,
    /// Worker thread.
    #[serde(rename = "T")]
    Worker,
}

impl Actor {
    /// Single-letter tag used in the text format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Actor::Main => "M",
            Actor::Worker => "T",
        }
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The five events a scenario run can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventLabel {
    /// Main acquired the shared lock.
    MutexLocked,
    /// Main released the shared lock.
    MutexUnlocked,
    /// Worker is about to start its bounded wait.
    LockTry,
    /// Worker's bounded wait acquired the lock.
    LockSuccess,
    /// Worker's bounded wait ended without the lock.
    LockFailed,
}

impl EventLabel {
    /// All labels, in the order a correct run emits them (failure last).
    pub const ALL: [EventLabel; 5] = [
        EventLabel::MutexLocked,
        EventLabel::LockTry,
        EventLabel::MutexUnlocked,
        EventLabel::LockSuccess,
        EventLabel::LockFailed,
    ];

    /// The actor that emits this label.
    pub fn actor(&self) -> Actor {
        match self {
            EventLabel::MutexLocked | EventLabel::MutexUnlocked => Actor::Main,
            EventLabel::LockTry | EventLabel::LockSuccess | EventLabel::LockFailed => {
                Actor::Worker
            }
        }
    }

    /// Human-readable message, without the actor tag.
    pub fn message(&self) -> &'static str {
        match self {
            EventLabel::MutexLocked => "mutex locked",
            EventLabel::MutexUnlocked => "mutex unlocked",
            EventLabel::LockTry => "lock try",
            EventLabel::LockSuccess => "lock success",
            EventLabel::LockFailed => "lock failed",
        }
    }

    /// Text-format suffix, leading space included: `" M mutex locked"`.
    pub fn line_suffix(&self) -> &'static str {
        match self {
            EventLabel::MutexLocked => " M mutex locked",
            EventLabel::MutexUnlocked => " M mutex unlocked",
            EventLabel::LockTry => " T lock try",
            EventLabel::LockSuccess => " T lock success",
            EventLabel::LockFailed => " T lock failed",
        }
    }

    /// Whether this label ends the worker's bounded wait.
    pub fn is_outcome(&self) -> bool {
        matches!(self, EventLabel::LockSuccess | EventLabel::LockFailed)
    }
}

/// A single timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Wall-clock milliseconds since the Unix epoch.
    pub ts_ms: i64,

    /// The thread that emitted the event.
    pub actor: Actor,

    /// What happened.
    pub label: EventLabel,
}

impl Event {
    /// Create an event stamped with the current wall-clock time.
    pub fn now(label: EventLabel) -> Self {
        Self::at(Utc::now().timestamp_millis(), label)
    }

    /// Create an event with an explicit timestamp.
    pub fn at(ts_ms: i64, label: EventLabel) -> Self {
        Self {
            ts_ms,
            actor: label.actor(),
            label,
        }
    }

    /// Render the event in text format, without a trailing newline.
    pub fn to_text_line(&self) -> String {
        format!("{}{}", self.ts_ms, self.label.line_suffix())
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        let value = json!({
            "ts_ms": self.ts_ms,
            "actor": self.actor,
            "label": self.label,
            "message": self.label.message(),
        });
        serde_json::to_string(&value).map_err(|e| {
            TmlockError::OutputError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_text_line())
    }
}
