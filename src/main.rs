//! # modsweep CLI
//!
//! Find `node_modules` directories (or any other directory name), report
//! their sizes and prune the ones you no longer need.
//!
//! ## Commands
//!
//! - **scan**: Walk a root, measure every match and print the report
//! - **prune**: Scan, then select matches and delete them
//!
//! ## Quick Start
//!
//! ```bash
//! modsweep scan --path ~/projects
//! modsweep prune --path ~/projects --min-size 50M
//! ```
//!
//! ## Environment Variables
//!
//! - `MODSWEEP_PATH`: Root path to scan (default: current directory)
//! - `MODSWEEP_NAME`: Directory name to look for (default: node_modules)
//! - `MODSWEEP_JOBS`: Maximum concurrent size calculations
//! - `MODSWEEP_VERBOSE`: Enable verbose output
//! - `MODSWEEP_QUIET`: Silence all output except results and errors
//! - `MODSWEEP_YES`: Skip confirmation prompts

use std::io::IsTerminal;

use modsweep::cli::Cli;

fn main() -> miette::Result<()> {
    // Install miette's fancy panic and error report handler
    miette::set_panic_hook();

    // Pick the report style from the terminal: unicode framing on a TTY,
    // undecorated text when stderr is captured
    if std::io::stderr().is_terminal() {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::unicode_nocolor())
                    .with_context_lines(3),
            )
        }))?;
    } else {
        // No theme for pipes, CI logs and tests that assert on stderr
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::none())
                    .with_context_lines(0),
            )
        }))?;
    }

    // Parse command line arguments; clap also reads the MODSWEEP_* variables
    let cli = Cli::parse_args();

    // Run the scan or prune command against stdin/stdout and hand any
    // SweepError to miette for rendering
    modsweep::commands::execute(&cli).map_err(Into::into)
}
