//! Shared, append-only event recorder.

use super::{Event, EventLabel};
use crate::error::{Result, TmlockError};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// How recorded events are written to the output sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// `<timestamp_ms> <actor> <message>` lines (default).
    #[default]
    Text,
    /// NDJSON, one object per event.
    Json,
}

impl OutputFormat {
    /// Parse an output format from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Get the configuration name for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }

    /// Render one event in this format, without a trailing newline.
    pub fn render(&self, event: &Event) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(event.to_text_line()),
            OutputFormat::Json => event.to_ndjson_line(),
        }
    }
}

struct Inner {
    events: Vec<Event>,
    sink: Box<dyn Write + Send>,
}

/// Thread-safe event recorder shared by the main and worker threads.
///
/// The timestamp is taken while the recorder is held, so the in-memory
/// timeline is ordered by timestamp and matches the order of output lines.
pub struct EventLog {
    format: OutputFormat,
    inner: Mutex<Inner>,
}

impl EventLog {
    /// Create a log that writes to standard output.
    pub fn stdout(format: OutputFormat) -> Self {
        Self::with_sink(format, Box::new(io::stdout()))
    }

    /// Create a log that discards output and only keeps the timeline.
    pub fn silent() -> Self {
        Self::with_sink(OutputFormat::Text, Box::new(io::sink()))
    }

    /// Create a log that writes to an arbitrary sink.
    pub fn with_sink(format: OutputFormat, sink: Box<dyn Write + Send>) -> Self {
        Self {
            format,
            inner: Mutex::new(Inner {
                events: Vec::new(),
                sink,
            }),
        }
    }

    /// Stamp `label` with the current time, append it and write it out.
    ///
    /// The event stays in the timeline even if writing it fails.
    pub fn record(&self, label: EventLabel) -> Result<Event> {
        let mut inner = self.inner();
        let event = Event::now(label);
        inner.events.push(event);

        let line = self.format.render(&event)?;
        writeln!(inner.sink, "{}", line)
            .and_then(|()| inner.sink.flush())
            .map_err(|e| TmlockError::OutputError(format!("failed to write event: {}", e)))?;

        Ok(event)
    }

    /// Copy of everything recorded so far, in recording order.
    pub fn snapshot(&self) -> Vec<Event> {
        self.inner().events.clone()
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("format", &self.format)
            .field("events", &self.inner().events)
            .finish()
    }
}
