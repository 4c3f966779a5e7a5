//! Analysis verdicts and their rendering.

use serde::Serialize;
use serde_json::json;
use std::fmt;

/// How the worker's bounded wait behaved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    /// Worker acquired the lock once main released it.
    Acquired,
    /// Worker gave up after its full bounded wait, before main released.
    TimedOut,
    /// Worker gave up without waiting while the lock was still held.
    ImmediateFailure,
    /// Anything else that contradicts correct bounded-wait semantics.
    Anomalous(String),
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Acquired => write!(f, "acquired after release"),
            Verdict::TimedOut => write!(f, "timed out after full wait"),
            Verdict::ImmediateFailure => {
                write!(f, "bounded wait returned immediately while the lock was held")
            }
            Verdict::Anomalous(reason) => write!(f, "anomalous: {}", reason),
        }
    }
}

/// Result of analyzing one timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Classification of the worker's bounded wait.
    pub verdict: Verdict,

    /// Time between "mutex locked" and "mutex unlocked".
    pub held_ms: i64,

    /// Time between "lock try" and the worker's outcome.
    pub waited_ms: i64,

    /// Deviations worth mentioning that do not change the verdict.
    pub warnings: Vec<String>,
}

impl Report {
    /// Whether the timeline shows a broken bounded wait.
    pub fn is_defect(&self) -> bool {
        matches!(
            self.verdict,
            Verdict::ImmediateFailure | Verdict::Anomalous(_)
        )
    }

    /// Serialize the report to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> String {
        json!({
            "report": self,
            "defect": self.is_defect(),
        })
        .to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Verdict: {}", self.verdict)?;
        writeln!(f, "  Main held lock: {}ms", self.held_ms)?;
        write!(f, "  Worker waited:  {}ms", self.waited_ms)?;
        for warning in &self.warnings {
            write!(f, "\n  Warning: {}", warning)?;
        }
        Ok(())
    }
}
