//! Config loading and validation.

use super::model::Config;
use super::types::MAX_DURATION_MS;
use crate::error::{Result, TmlockError};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(TmlockError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            TmlockError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| TmlockError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            TmlockError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `wait_ms`, `jitter_ms` and `immediate_ms` must be positive
    /// - `immediate_ms` must be smaller than `wait_ms`
    /// - every duration must be at most `MAX_DURATION_MS` (one day)
    pub fn validate(&self) -> Result<()> {
        let durations = [
            ("hold_ms", self.hold_ms),
            ("settle_ms", self.settle_ms),
            ("wait_ms", self.wait_ms),
            ("worker_hold_ms", self.worker_hold_ms),
            ("jitter_ms", self.jitter_ms),
            ("immediate_ms", self.immediate_ms),
        ];
        for (name, value) in durations {
            if value > MAX_DURATION_MS {
                return Err(TmlockError::UserError(format!(
                    "config validation failed: {} ({}) must be at most {}",
                    name, value, MAX_DURATION_MS
                )));
            }
        }

        if self.wait_ms == 0 {
            return Err(TmlockError::UserError(
                "config validation failed: wait_ms must be greater than 0".to_string(),
            ));
        }

        if self.jitter_ms == 0 {
            return Err(TmlockError::UserError(
                "config validation failed: jitter_ms must be greater than 0".to_string(),
            ));
        }

        if self.immediate_ms == 0 {
            return Err(TmlockError::UserError(
                "config validation failed: immediate_ms must be greater than 0".to_string(),
            ));
        }

        if self.immediate_ms >= self.wait_ms {
            return Err(TmlockError::UserError(format!(
                "config validation failed: immediate_ms ({}) must be smaller than wait_ms ({})",
                self.immediate_ms, self.wait_ms
            )));
        }

        Ok(())
    }
}
