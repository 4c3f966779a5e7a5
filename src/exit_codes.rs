//! Exit code constants for the tmlock CLI.
//!
//! - 0: Success (timeline recorded, and for `check`, no defect found)
//! - 1: User error (bad args, invalid config)
//! - 2: Defect detected by `check`
//! - 3: Timeline is malformed (wrong label multiset)
//! - 4: Runtime failure (worker thread or output stream)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// `check` found the bounded-wait regression or another timing anomaly.
pub const DEFECT_DETECTED: i32 = 2;

/// The recorded timeline does not contain the expected events.
pub const TIMELINE_INVALID: i32 = 3;

/// Worker thread could not be spawned, panicked, or output could not be written.
pub const RUNTIME_FAILURE: i32 = 4;
