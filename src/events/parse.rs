//! Reading previously captured timelines.
//!
//! Accepts both output formats, and also logs produced by other
//! reproductions that use the same `<timestamp_ms> <actor> <message>` lines.

use super::{Event, EventLabel};
use crate::error::{Result, TmlockError};

/// Parse one line of captured output.
///
/// Returns `Ok(None)` for blank lines. Lines starting with `{` are read as
/// NDJSON, anything else as text format.
pub fn parse_line(line: &str) -> Result<Option<Event>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if line.starts_with('{') {
        return serde_json::from_str::<Event>(line)
            .map(Some)
            .map_err(|e| TmlockError::UserError(format!("invalid JSON event '{}': {}", line, e)));
    }

    let (ts, rest) = line
        .split_once(' ')
        .ok_or_else(|| TmlockError::UserError(format!("invalid event line '{}'", line)))?;

    let ts_ms: i64 = ts.parse().map_err(|_| {
        TmlockError::UserError(format!("invalid timestamp '{}' in line '{}'", ts, line))
    })?;

    let suffix = format!(" {}", rest.trim());
    let label = EventLabel::ALL
        .into_iter()
        .find(|label| label.line_suffix() == suffix)
        .ok_or_else(|| {
            TmlockError::UserError(format!("unknown event '{}' in line '{}'", rest.trim(), line))
        })?;

    Ok(Some(Event::at(ts_ms, label)))
}

/// Parse a whole captured log, skipping blank lines.
///
/// Errors name the 1-based line number of the first bad line.
pub fn parse_timeline(content: &str) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for (index, line) in content.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(event)) => events.push(event),
            Ok(None) => {}
            Err(e) => {
                return Err(TmlockError::UserError(format!("line {}: {}", index + 1, e)));
            }
        }
    }
    Ok(events)
}
