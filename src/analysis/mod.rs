//! Timeline analysis.
//!
//! Classifies a recorded (or captured) timeline against correct bounded-wait
//! semantics. The key signature is a "lock failed" event logged almost
//! immediately after "lock try" while main has not yet released the lock:
//! the bounded wait returned without waiting.

mod report;


pub use report::{Report, Verdict};

use crate::config::Config;
use crate::error::{Result, TmlockError};
use crate::events::{Event, EventLabel};

/// Expected durations and tolerances used to judge a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Expected main hold (D1), in ms.
    pub hold_ms: u64,
    /// Worker's bounded wait (D3), in ms.
    pub wait_ms: u64,
    /// Tolerated scheduling jitter, in ms.
    pub jitter_ms: u64,
    /// A failure within this many ms of "lock try" did not wait.
    pub immediate_ms: u64,
}

impl From<&Config> for Thresholds {
    fn from(config: &Config) -> Self {
        Self {
            hold_ms: config.hold_ms,
            wait_ms: config.wait_ms,
            jitter_ms: config.jitter_ms,
            immediate_ms: config.immediate_ms,
        }
    }
}

/// Timestamps of the four events a well-formed timeline contains.
struct Marks {
    locked: i64,
    unlocked: i64,
    tried: i64,
    outcome: i64,
    acquired: bool,
}

/// Analyze `events` and produce a report.
///
/// # Returns
///
/// * `Ok(Report)` - The timeline is well formed; the verdict says whether it is sound
/// * `Err(TmlockError::InvalidTimeline)` - Events are missing, duplicated or too far apart to compare
pub fn analyze(events: &[Event], thresholds: &Thresholds) -> Result<Report> {
    let marks = collect_marks(events)?;

    let held_ms = interval(marks.locked, marks.unlocked, "mutex locked", "mutex unlocked")?;
    let waited_ms = interval(marks.tried, marks.outcome, "lock try", "worker outcome")?;
    let jitter = thresholds.jitter_ms;

    let verdict = if marks.acquired {
        // Positive when the success was logged before the release
        let lead_ms = interval(marks.outcome, marks.unlocked, "lock success", "mutex unlocked")?;
        if lead_ms > 0 && lead_ms.unsigned_abs() > jitter {
            Verdict::Anomalous(format!("lock acquired {}ms before main released it", lead_ms))
        } else {
            Verdict::Acquired
        }
    } else if marks.outcome >= marks.unlocked {
        let late_ms = interval(marks.unlocked, marks.outcome, "mutex unlocked", "lock failed")?;
        Verdict::Anomalous(format!("lock failed {}ms after main released it", late_ms))
    } else if u64::try_from(waited_ms).map_or(true, |waited| waited < thresholds.immediate_ms) {
        Verdict::ImmediateFailure
    } else if deviation(waited_ms, thresholds.wait_ms) <= jitter {
        Verdict::TimedOut
    } else {
        Verdict::Anomalous(format!(
            "lock failed after {}ms, expected about {}ms",
            waited_ms, thresholds.wait_ms
        ))
    };

    let mut warnings = Vec::new();
    if deviation(held_ms, thresholds.hold_ms) > jitter {
        warnings.push(format!(
            "main held the lock for {}ms, expected about {}ms",
            held_ms, thresholds.hold_ms
        ));
    }
    if verdict == Verdict::Acquired && deviation(waited_ms, thresholds.hold_ms) > jitter {
        warnings.push(format!(
            "worker waited {}ms for the lock, expected about {}ms",
            waited_ms, thresholds.hold_ms
        ));
    }

    Ok(Report {
        verdict,
        held_ms,
        waited_ms,
        warnings,
    })
}

/// Milliseconds from `from` to `to`, rejecting timestamps too far apart to subtract.
fn interval(from: i64, to: i64, from_name: &str, to_name: &str) -> Result<i64> {
    to.checked_sub(from).ok_or_else(|| {
        TmlockError::InvalidTimeline(format!(
            "timestamps of {} ({}) and {} ({}) are too far apart",
            from_name, from, to_name, to
        ))
    })
}

/// Distance between a measured interval and its expected length.
fn deviation(actual_ms: i64, expected_ms: u64) -> u64 {
    if actual_ms < 0 {
        expected_ms.saturating_add(actual_ms.unsigned_abs())
    } else {
        actual_ms.unsigned_abs().abs_diff(expected_ms)
    }
}

fn collect_marks(events: &[Event]) -> Result<Marks> {
    let locked = single(events, EventLabel::MutexLocked)?;
    let unlocked = single(events, EventLabel::MutexUnlocked)?;
    let tried = single(events, EventLabel::LockTry)?;

    let outcomes: Vec<&Event> = events.iter().filter(|e| e.label.is_outcome()).collect();
    let outcome = match outcomes.as_slice() {
        [only] => *only,
        [] => {
            return Err(TmlockError::InvalidTimeline(
                "worker reported neither lock success nor lock failed".to_string(),
            ));
        }
        _ => {
            return Err(TmlockError::InvalidTimeline(format!(
                "worker reported {} outcomes, expected exactly one",
                outcomes.len()
            )));
        }
    };

    Ok(Marks {
        locked,
        unlocked,
        tried,
        outcome: outcome.ts_ms,
        acquired: outcome.label == EventLabel::LockSuccess,
    })
}

/// Timestamp of the only event carrying `label`.
fn single(events: &[Event], label: EventLabel) -> Result<i64> {
    let mut matching = events.iter().filter(|e| e.label == label);
    match (matching.next(), matching.next()) {
        (Some(event), None) => Ok(event.ts_ms),
        (None, _) => Err(TmlockError::InvalidTimeline(format!(
            "missing '{}' event",
            label.message()
        ))),
        (Some(_), Some(_)) => Err(TmlockError::InvalidTimeline(format!(
            "'{}' appears more than once",
            label.message()
        ))),
    }
}
