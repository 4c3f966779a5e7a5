//! The `run` and `check` commands.
//!
//! The timeline goes to stdout; the `check` report goes to stderr so a
//! captured stdout can be fed back to `analyze`.

use super::{conclude, resolve_scenario_config};
use crate::analysis::{self, Thresholds};
use crate::cli::ScenarioArgs;
use crate::config::Config;
use crate::error::Result;
use crate::events::EventLog;
use crate::scenario;
use std::io::{self, Write};
use std::sync::Arc;

/// Run the scenario, streaming its timeline to stdout.
pub fn cmd_run(args: ScenarioArgs) -> Result<()> {
    let config = resolve_scenario_config(&args)?;
    let log = Arc::new(EventLog::stdout(config.format));
    scenario::run_configured(&config, log)?;
    Ok(())
}

/// Run the scenario, then judge the timeline it produced.
pub fn cmd_check(args: ScenarioArgs) -> Result<()> {
    let config = resolve_scenario_config(&args)?;
    check(&config, Box::new(io::stdout()), &mut io::stderr())
}

pub(super) fn check(
    config: &Config,
    timeline: Box<dyn Write + Send>,
    report_out: &mut dyn Write,
) -> Result<()> {
    let log = Arc::new(EventLog::with_sink(config.format, timeline));
    let outcome = scenario::run_configured(config, log)?;

    let report = analysis::analyze(&outcome.events, &Thresholds::from(config))?;
    conclude(&report, config.format, report_out)
}
