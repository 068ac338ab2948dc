//! # modsweep
//!
//! Find dependency directories such as `node_modules`, measure how much disk
//! they take, and delete the ones that are no longer needed.
//!
//! ## Overview
//!
//! A scan walks a root directory once. Every directory whose name equals the
//! match name is recorded and never descended into, so nested matches are
//! counted as part of the outermost one. Each match is measured on a rayon
//! worker while the walk continues. The results are sorted largest first and
//! rendered as a tree plus a size distribution.
//!
//! ## Key Features
//!
//! - **Single pass discovery**: the walk skips the inside of every match
//! - **Concurrent measurement**: one rayon task per match, optionally capped
//!   with `--jobs`
//! - **Partial results**: unreadable entries are skipped, and a failure on
//!   the root is reported next to whatever was found
//! - **Interactive pruning**: pick matches by number, confirm, and each one is
//!   removed independently
//!
//! ## Architecture
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`commands`]: Implementation of the `scan` and `prune` subcommands
//! - [`scan`]: Walker, size calculation and the [`scan::Scanner`]
//! - [`prune`]: Best-effort removal of selected matches
//! - [`display`]: Largest-directories tree and size distribution table
//! - [`prompt`]: Confirmation and selection prompts
//! - [`units`]: Parsing and formatting of byte sizes
//! - [`error`]: Error types and handling with thiserror + miette
//!
//! ## Usage
//!
//! ```bash
//! # Report every node_modules below the current directory
//! modsweep scan --yes
//!
//! # Pick which ones to delete
//! modsweep prune --path ~/projects
//!
//! # Delete everything above 100 MB without prompting
//! modsweep prune --path ~/projects --min-size 100M --all --yes
//! ```
//!
//! ## Library Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use modsweep::scan::Scanner;
//!
//! let scanner = Scanner::builder().build()?;
//! let report = scanner.scan(Path::new("."));
//!
//! for entry in report.entries() {
//!     println!("{} {}", entry.size(), entry.path().display());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! The crate uses a combination of:
//! - `thiserror` for strongly-typed errors
//! - `miette` for rich diagnostic output in CLI

pub mod cli;
pub mod commands;
pub mod display;
pub mod error;
pub mod prompt;
pub mod prune;
pub mod scan;
pub mod units;

mod logging;
