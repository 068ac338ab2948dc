//! Implementation of modsweep subcommands.
//!
//! `mod.rs` is a thin dispatcher; the scan-and-report stage lives in `scan`
//! and the selection and removal flow in `prune`.

use std::fmt::Display;
use std::io::{self, BufRead, IsTerminal, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{Cli, Commands};
use crate::error::{Result, SweepError};

pub(crate) mod prune;
pub(crate) mod scan;

pub use prune::{Prune, PruneBuilder};
pub use scan::{Survey, SurveyBuilder};

#[cfg(test)]
mod tests;

/// Execute commands based on the parsed CLI arguments.
pub fn execute(cli: &Cli) -> Result<()> {
    let stdin = io::stdin();
    execute_with_io(cli, &mut stdin.lock(), &mut io::stdout())
}

/// Execute commands with explicit prompt input and report output.
///
/// Diagnostics still go to stderr; only prompts and results use `output`.
pub fn execute_with_io<R: BufRead, W: Write>(
    cli: &Cli,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let quiet = cli.global_opts().quiet();
    let verbose = if quiet {
        0
    } else {
        cli.global_opts().verbose()
    };
    let yes = cli.global_opts().yes();

    match cli.command() {
        Commands::Scan(opts) => Survey::builder()
            .opts(opts)
            .yes(yes)
            .verbose(verbose)
            .quiet(quiet)
            .build()?
            .scan(input, output),
        Commands::Prune {
            scan,
            all,
            dry_run,
        } => Prune::builder()
            .survey(
                Survey::builder()
                    .opts(scan)
                    .yes(yes)
                    .verbose(verbose)
                    .quiet(quiet)
                    .build()?,
            )
            .all(*all)
            .dry_run(*dry_run)
            .build()?
            .prune(input, output),
    }
}

/// Write one line of results to `output`.
pub(crate) fn emit<W: Write>(output: &mut W, line: impl Display) -> Result<()> {
    writeln!(output, "{line}").map_err(SweepError::Terminal)
}

/// Spinner on stderr, hidden when quiet or when stderr is not a terminal.
pub(crate) fn spinner(message: impl Into<String>, quiet: bool) -> ProgressBar {
    if quiet || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]") {
        progress.set_style(style);
    }
    progress.set_message(message.into());
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}
