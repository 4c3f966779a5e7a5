//! Configuration model for tmlock.
//!
//! This module defines the Config struct that can be loaded from a YAML file
//! passed with `--config`. It supports forward-compatible YAML parsing
//! (unknown fields are ignored), defaults that reproduce the reference
//! scenario, and validation of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use types::SyncMode;
