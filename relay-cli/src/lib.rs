//! Command-line entry points for the relay clients.
//!
//! The binaries in `src/bin` only set up logging and the runtime; argument
//! handling, configuration and output live here so they can be driven with
//! a stub transport and in-memory output streams.

pub mod config;
pub mod fetch_wandb_data;
pub mod inference;
pub mod logging;

use clap::{builder::styling, error::ErrorKind, Parser};
use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::Green.on_default().bold())
    .usage(styling::AnsiColor::Green.on_default().bold())
    .literal(styling::AnsiColor::Cyan.on_default().bold())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// How a command invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::from(1),
        }
    }
}

/// Parses `argv`, answering `--help`/`--version` on `stdout` and reporting
/// usage errors on `stderr`. `Err` carries the outcome to exit with.
fn parse_args<P, I, T>(argv: I, stdout: &mut impl Write, stderr: &mut impl Write) -> Result<P, Outcome>
where
    P: Parser,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    P::try_parse_from(argv).map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = write!(stdout, "{}", e.render());
            Outcome::Success
        }
        _ => {
            let _ = write!(stderr, "{}", e.render());
            Outcome::Failure
        }
    })
}

/// Writes `error` and every cause below the one its message already embeds.
fn report_error(stderr: &mut impl Write, error: &(dyn std::error::Error + 'static)) {
    use colored::Colorize;

    let _ = writeln!(stderr, "{} {}", "error:".red().bold(), error);
    let mut cause = error.source().and_then(|source| source.source());
    while let Some(err) = cause {
        let _ = writeln!(stderr, "  caused by: {}", err);
        cause = err.source();
    }
}
