//! The `analyze` command.

use super::{apply_thresholds, conclude, load_base_config, parse_choice};
use crate::analysis::{self, Report, Thresholds};
use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::{Result, TmlockError};
use crate::events::{OutputFormat, parse_timeline};
use std::io;
use std::path::Path;

/// Judge a captured timeline read from a file or stdin.
pub fn cmd_analyze(args: AnalyzeArgs) -> Result<()> {
    let config = resolve_analyze_config(&args)?;
    let content = read_capture(&args.path)?;

    let report = analyze_capture(&content, &config)?;
    conclude(&report, config.format, &mut io::stdout())
}

pub(super) fn resolve_analyze_config(args: &AnalyzeArgs) -> Result<Config> {
    let mut config = load_base_config(args.config.as_deref())?;

    if let Some(hold_ms) = args.hold_ms {
        config.hold_ms = hold_ms;
    }
    if let Some(wait_ms) = args.wait_ms {
        config.wait_ms = wait_ms;
    }
    if let Some(format) = &args.format {
        config.format = parse_choice(format, OutputFormat::from_str, "format", "text, json")?;
    }
    apply_thresholds(&mut config, &args.thresholds);

    config.validate()?;
    Ok(config)
}

/// Parse and analyze the contents of a captured log.
pub(super) fn analyze_capture(content: &str, config: &Config) -> Result<Report> {
    let events = parse_timeline(content)?;
    if events.is_empty() {
        return Err(TmlockError::InvalidTimeline(
            "capture contains no events".to_string(),
        ));
    }
    analysis::analyze(&events, &Thresholds::from(config))
}

fn read_capture(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        return io::read_to_string(io::stdin())
            .map_err(|e| TmlockError::UserError(format!("failed to read stdin: {}", e)));
    }

    std::fs::read_to_string(path).map_err(|e| {
        TmlockError::UserError(format!(
            "failed to read capture '{}': {}",
            path.display(),
            e
        ))
    })
}
