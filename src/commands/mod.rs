//! Command implementations for tmlock.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, and resolves the effective configuration from the
//! optional config file and command-line overrides.

mod analyze;
mod run;


use crate::analysis::Report;
use crate::cli::{Command, ScenarioArgs, ThresholdArgs};
use crate::config::{Config, SyncMode};
use crate::error::{Result, TmlockError};
use crate::events::OutputFormat;
use crate::lock::LockKind;
use std::io::Write;
use std::path::Path;

/// Dispatch a command to its implementation.
///
/// No subcommand runs the reference scenario with default settings.
pub fn dispatch(command: Option<Command>) -> Result<()> {
    match command_or_default(command) {
        Command::Run(args) => run::cmd_run(args),
        Command::Check(args) => run::cmd_check(args),
        Command::Analyze(args) => analyze::cmd_analyze(args),
    }
}

fn command_or_default(command: Option<Command>) -> Command {
    command.unwrap_or_else(|| Command::Run(ScenarioArgs::default()))
}

/// Load the config file if one was given, otherwise start from defaults.
fn load_base_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

/// Resolve the effective config for `run` and `check`.
///
/// Precedence: command-line flag, then config file, then built-in default.
fn resolve_scenario_config(args: &ScenarioArgs) -> Result<Config> {
    let mut config = load_base_config(args.config.as_deref())?;

    if let Some(hold_ms) = args.hold_ms {
        config.hold_ms = hold_ms;
    }
    if let Some(settle_ms) = args.settle_ms {
        config.settle_ms = settle_ms;
    }
    if let Some(wait_ms) = args.wait_ms {
        config.wait_ms = wait_ms;
    }
    if let Some(worker_hold_ms) = args.worker_hold_ms {
        config.worker_hold_ms = worker_hold_ms;
    }
    if let Some(lock) = &args.lock {
        config.lock = parse_choice(lock, LockKind::from_str, "lock", "correct, immediate")?;
    }
    if let Some(sync) = &args.sync {
        config.sync = parse_choice(sync, SyncMode::from_str, "sync", "sleep, rendezvous")?;
    }
    if let Some(format) = &args.format {
        config.format = parse_choice(format, OutputFormat::from_str, "format", "text, json")?;
    }
    apply_thresholds(&mut config, &args.thresholds);

    config.validate()?;
    Ok(config)
}

fn apply_thresholds(config: &mut Config, thresholds: &ThresholdArgs) {
    if let Some(jitter_ms) = thresholds.jitter_ms {
        config.jitter_ms = jitter_ms;
    }
    if let Some(immediate_ms) = thresholds.immediate_ms {
        config.immediate_ms = immediate_ms;
    }
}

fn parse_choice<T>(
    value: &str,
    parse: fn(&str) -> Option<T>,
    name: &str,
    expected: &str,
) -> Result<T> {
    parse(value).ok_or_else(|| {
        TmlockError::UserError(format!(
            "invalid {} '{}' (expected one of: {})",
            name, value, expected
        ))
    })
}

/// Write `report` to `out` and turn a defective verdict into an error.
fn conclude(report: &Report, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => report.to_string(),
        OutputFormat::Json => report.to_ndjson_line(),
    };
    writeln!(out, "{}", rendered)
        .map_err(|e| TmlockError::OutputError(format!("failed to write report: {}", e)))?;

    if report.is_defect() {
        return Err(TmlockError::DefectDetected(report.verdict.to_string()));
    }
    Ok(())
}
