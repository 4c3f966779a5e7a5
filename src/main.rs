//! tmlock: reproduce and detect timed-mutex bounded-wait regressions.
//!
//! Main takes a shared lock, a worker tries it with a bounded wait, and main
//! lets go before that wait runs out. The timeline of both threads shows
//! whether the bounded wait actually waited. Run bare to replay the reference
//! 2s/5s choreography, `check` to get a verdict, or `analyze` on a capture.

mod cli;
mod commands;
pub mod analysis;
pub mod config;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod lock;
pub mod scenario;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
