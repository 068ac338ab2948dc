//! Command-line interface definitions for modsweep.
//!
//! This module defines the CLI structure using clap, including all subcommands
//! and their arguments. The main entry point is the [`Cli`] struct.
//!
//! # Example
//!
//! ```no_run
//! use modsweep::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_args();
//!
//! match cli.command() {
//!     Commands::Scan(opts) => println!("Scanning {}", opts.path().display()),
//!     Commands::Prune { all, .. } => println!("Pruning (all: {all})"),
//! }
//! ```

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::error::{Result, SweepError};
use crate::scan::DEFAULT_MATCH_NAME;
use crate::units::parse_size;


/// Main command-line interface for modsweep.
///
/// This struct represents the top-level CLI configuration, containing both
/// global options that apply to all commands and the specific subcommand
/// to execute.
#[derive(Debug, Parser)]
#[command(
    name = "modsweep",
    bin_name = "modsweep",
    author,
    version,
    about = "Find node_modules directories, measure them, and prune the ones you no longer need",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    global_opts: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

/// Global options that apply to all modsweep commands.
#[derive(Debug, Parser)]
pub struct GlobalOpts {
    /// Enable verbose output (use multiple times for more verbosity)
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        env = "MODSWEEP_VERBOSE"
    )]
    verbose: u8,

    /// Silence all output except for results and errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        env = "MODSWEEP_QUIET"
    )]
    quiet: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true, env = "MODSWEEP_YES")]
    yes: bool,
}

impl GlobalOpts {
    /// Get the verbose level
    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    /// Check if quiet mode is enabled
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Check if confirmations are skipped
    pub fn yes(&self) -> bool {
        self.yes
    }
}

/// Options shared by every command that scans.
#[derive(Debug, Clone, Args)]
pub struct ScanOpts {
    /// Root path to scan for match directories
    #[arg(
        long,
        default_value = ".",
        value_parser = non_empty_path,
        env = "MODSWEEP_PATH"
    )]
    path: PathBuf,

    /// Directory name to look for
    #[arg(long, default_value = DEFAULT_MATCH_NAME, env = "MODSWEEP_NAME")]
    name: String,

    /// Maximum number of directories measured concurrently (defaults to one
    /// per CPU)
    #[arg(short, long, env = "MODSWEEP_JOBS")]
    jobs: Option<usize>,

    /// Follow symbolic links while scanning and measuring
    #[arg(long, env = "MODSWEEP_FOLLOW_SYMLINKS")]
    follow_symlinks: bool,

    /// Number of directories shown in the largest-directories tree
    #[arg(long, default_value = "30", env = "MODSWEEP_TOP")]
    top: usize,

    /// Ignore matches smaller than this (e.g., "500M", "1G", or bytes)
    #[arg(long, env = "MODSWEEP_MIN_SIZE")]
    min_size: Option<String>,
}

impl ScanOpts {
    /// Create a new builder for constructing `ScanOpts` programmatically.
    pub fn builder() -> ScanOptsBuilder {
        ScanOptsBuilder::default()
    }

    /// Get the root path as given
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the absolute root path
    pub fn get_root(&self) -> PathBuf {
        normalize_path(&self.path)
    }

    /// Get the match name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the job cap
    pub fn jobs(&self) -> Option<usize> {
        self.jobs
    }

    /// Check if symlinks are followed
    pub fn follow_symlinks(&self) -> bool {
        self.follow_symlinks
    }

    /// Get the number of directories shown in the tree
    pub fn top(&self) -> usize {
        self.top
    }

    /// Get the raw minimum size option
    pub fn min_size(&self) -> Option<&str> {
        self.min_size.as_deref()
    }

    /// Get the minimum size in bytes (0 when unset)
    pub fn get_min_size(&self) -> Result<u64> {
        self.min_size().map_or(Ok(0), parse_size)
    }
}

/// Builder for constructing [`ScanOpts`] without command-line parsing.
#[derive(Debug)]
pub struct ScanOptsBuilder {
    path: PathBuf,
    name: String,
    jobs: Option<usize>,
    follow_symlinks: bool,
    top: usize,
    min_size: Option<String>,
}

impl Default for ScanOptsBuilder {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            name: DEFAULT_MATCH_NAME.to_string(),
            jobs: None,
            follow_symlinks: false,
            top: 30,
            min_size: None,
        }
    }
}

impl ScanOptsBuilder {
    /// Set the root path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the match name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the job cap
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// Follow symbolic links
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Set the number of directories shown in the tree
    pub fn top(mut self, top: usize) -> Self {
        self.top = top;
        self
    }

    /// Set the minimum size (e.g., "10M")
    pub fn min_size(mut self, size: impl Into<String>) -> Self {
        self.min_size = Some(size.into());
        self
    }

    /// Build the `ScanOpts` instance with the configured values.
    pub fn build(self) -> ScanOpts {
        ScanOpts {
            path: self.path,
            name: self.name,
            jobs: self.jobs,
            follow_symlinks: self.follow_symlinks,
            top: self.top,
            min_size: self.min_size,
        }
    }
}

/// Available modsweep subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan for match directories and report their sizes
    ///
    /// Walks the root path once, measures every match directory concurrently
    /// and prints the largest ones together with a size distribution. Nested
    /// matches are counted as part of the outermost match.
    Scan(ScanOpts),

    /// Scan, then select match directories and delete them
    ///
    /// After the scan report, pick directories by number (or pass --all),
    /// confirm, and each selected directory is removed. A failure to remove
    /// one directory does not stop the others.
    Prune {
        #[command(flatten)]
        scan: ScanOpts,

        /// Select every listed directory instead of prompting
        #[arg(long, env = "MODSWEEP_ALL")]
        all: bool,

        /// Show what would be deleted without actually deleting
        #[arg(long, env = "MODSWEEP_DRY_RUN")]
        dry_run: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the global options
    pub fn global_opts(&self) -> &GlobalOpts {
        &self.global_opts
    }

    /// Get the command
    pub fn command(&self) -> &Commands {
        &self.command
    }

    /// Create a builder for programmatic construction
    pub fn builder() -> CliBuilder {
        CliBuilder::default()
    }
}

/// Builder for [`Cli`]
#[derive(Debug, Default)]
pub struct CliBuilder {
    verbose: u8,
    quiet: bool,
    yes: bool,
    command: Option<Commands>,
}

impl CliBuilder {
    /// Set the verbose level
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable quiet mode
    pub fn quiet(mut self, enabled: bool) -> Self {
        self.quiet = enabled;
        self
    }

    /// Skip confirmation prompts
    pub fn yes(mut self, enabled: bool) -> Self {
        self.yes = enabled;
        self
    }

    /// Set the command
    pub fn command(mut self, command: Commands) -> Self {
        self.command = Some(command);
        self
    }

    /// Build the Cli instance
    pub fn build(self) -> Result<Cli> {
        let command = self
            .command
            .ok_or_else(|| SweepError::ConfigError("Command is required".to_string()))?;

        Ok(Cli {
            global_opts: GlobalOpts {
                verbose: self.verbose,
                quiet: self.quiet,
                yes: self.yes,
            },
            command,
        })
    }
}

fn non_empty_path(value: &str) -> std::result::Result<PathBuf, String> {
    if value.trim().is_empty() {
        return Err("path must not be empty".to_string());
    }
    Ok(PathBuf::from(value))
}

/// Normalize a path to be absolute and clean, without requiring it to exist.
///
/// This function:
/// - Converts relative paths to absolute using the current directory
/// - Removes `.` and `..` components where possible
/// - Does NOT resolve symlinks (preserves user intent)
/// - Does NOT require the path to exist
pub(crate) fn normalize_path(path: impl AsRef<Path>) -> PathBuf {
    use std::path::Component;

    let path = path.as_ref();

    let absolute = if path.is_relative() {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    } else {
        path.to_path_buf()
    };

    let mut components = Vec::new();
    for component in absolute.components() {
        match component {
            Component::ParentDir => {
                if let Some(last) = components.last()
                    && matches!(last, Component::Normal(_))
                {
                    components.pop();
                    continue;
                }
                if !matches!(
                    components.last(),
                    Some(Component::RootDir | Component::Prefix(_))
                ) {
                    components.push(component);
                }
            }
            Component::CurDir => continue,
            _ => components.push(component),
        }
    }

    components.iter().collect()
}
