//! Error types for the tmlock CLI.
//!
//! A timed lock that gives up is a normal outcome and never shows up here.
//! Only `check` turns a suspicious timeline into an error.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for tmlock operations.
#[derive(Error, Debug)]
pub enum TmlockError {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// The worker thread could not be started or did not finish cleanly.
    #[error("Worker thread failed: {0}")]
    ThreadError(String),

    /// Writing the event log failed.
    #[error("Failed to write output: {0}")]
    OutputError(String),

    /// The timeline shows the bounded wait misbehaving.
    #[error("Defect detected: {0}")]
    DefectDetected(String),

    /// The timeline does not contain the expected set of events.
    #[error("Invalid timeline: {0}")]
    InvalidTimeline(String),
}

impl TmlockError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            TmlockError::UserError(_) => exit_codes::USER_ERROR,
            TmlockError::ThreadError(_) => exit_codes::RUNTIME_FAILURE,
            TmlockError::OutputError(_) => exit_codes::RUNTIME_FAILURE,
            TmlockError::DefectDetected(_) => exit_codes::DEFECT_DETECTED,
            TmlockError::InvalidTimeline(_) => exit_codes::TIMELINE_INVALID,
        }
    }
}

/// Result type alias for tmlock operations.
pub type Result<T> = std::result::Result<T, TmlockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = TmlockError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn runtime_errors_share_exit_code() {
        let thread = TmlockError::ThreadError("panicked".to_string());
        let output = TmlockError::OutputError("broken pipe".to_string());
        assert_eq!(thread.exit_code(), exit_codes::RUNTIME_FAILURE);
        assert_eq!(output.exit_code(), exit_codes::RUNTIME_FAILURE);
    }

    #[test]
    fn defect_has_correct_exit_code() {
        let err = TmlockError::DefectDetected("lock failed after 0ms".to_string());
        assert_eq!(err.exit_code(), exit_codes::DEFECT_DETECTED);
    }

    #[test]
    fn invalid_timeline_has_correct_exit_code() {
        let err = TmlockError::InvalidTimeline("missing lock try".to_string());
        assert_eq!(err.exit_code(), exit_codes::TIMELINE_INVALID);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = TmlockError::ThreadError("worker panicked".to_string());
        assert_eq!(err.to_string(), "Worker thread failed: worker panicked");

        let err = TmlockError::DefectDetected("immediate failure".to_string());
        assert_eq!(err.to_string(), "Defect detected: immediate failure");
    }
}
