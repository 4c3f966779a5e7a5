//! CLI argument parsing for tmlock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// tmlock: reproduce and detect timed-mutex bounded-wait regressions.
///
/// Main locks a shared mutex, starts a worker that tries to take it with a
/// bounded wait, and releases the mutex before that wait expires. A correct
/// timed mutex lets the worker in; a regressed one fails the worker at once.
///
/// With no subcommand, runs the reference scenario (hold 2s, wait 5s).
#[derive(Parser, Debug)]
#[command(name = "tmlock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands for tmlock.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the scenario and print its timeline.
    Run(ScenarioArgs),

    /// Run the scenario, print its timeline and judge it.
    ///
    /// Exits with code 2 when the bounded wait misbehaved.
    Check(ScenarioArgs),

    /// Judge a previously captured timeline.
    ///
    /// Reads `<timestamp_ms> <actor> <message>` lines or NDJSON events.
    Analyze(AnalyzeArgs),
}

/// Arguments shared by `run` and `check`.
#[derive(Args, Debug, Default)]
pub struct ScenarioArgs {
    /// YAML config file; flags override its values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// How long main holds the lock, in ms (default 2000).
    #[arg(long)]
    pub hold_ms: Option<u64>,

    /// How long main sleeps after unlocking, in ms (default 2000).
    #[arg(long)]
    pub settle_ms: Option<u64>,

    /// Worker's bounded wait, in ms (default 5000).
    #[arg(long)]
    pub wait_ms: Option<u64>,

    /// How long the worker keeps the lock after acquiring it, in ms (default 0).
    #[arg(long)]
    pub worker_hold_ms: Option<u64>,

    /// Timed-lock implementation (correct, immediate).
    #[arg(long)]
    pub lock: Option<String>,

    /// Choreography (sleep, rendezvous).
    #[arg(long)]
    pub sync: Option<String>,

    /// Output format (text, json).
    #[arg(long)]
    pub format: Option<String>,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

/// Arguments for the `analyze` command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Captured timeline file, or `-` for standard input.
    pub path: PathBuf,

    /// YAML config file; flags override its values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Hold duration the capture was made with, in ms (default 2000).
    #[arg(long)]
    pub hold_ms: Option<u64>,

    /// Bounded wait the capture was made with, in ms (default 5000).
    #[arg(long)]
    pub wait_ms: Option<u64>,

    /// Report format (text, json).
    #[arg(long)]
    pub format: Option<String>,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

/// Analysis tolerances.
#[derive(Args, Debug, Default)]
pub struct ThresholdArgs {
    /// Tolerated scheduling jitter, in ms (default 100).
    #[arg(long)]
    pub jitter_ms: Option<u64>,

    /// A failure within this many ms of "lock try" did not wait (default 50).
    #[arg(long)]
    pub immediate_ms: Option<u64>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
