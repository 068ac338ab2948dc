//! Error types for modsweep.
//!
//! This module defines all error types used throughout modsweep, using
//! a combination of `thiserror` for ergonomic error definitions and `miette`
//! for rich diagnostic output.
//!
//! # Error Handling Strategy
//!
//! - All errors derive from [`SweepError`]
//! - Access errors on individual filesystem entries are never surfaced here;
//!   the walker and the size calculator skip them and keep going
//! - Errors on the scan root are terminal, but they travel next to the partial
//!   results instead of replacing them
//! - Errors are automatically converted to `miette::Result` for CLI output
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use modsweep::error::{Result, SweepError};
//!
//! fn check_root(path: &Path) -> Result<()> {
//!     if !path.exists() {
//!         return Err(SweepError::RootNotFound(path.to_path_buf()));
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error types that can occur in modsweep operations
#[derive(Error, Debug, Diagnostic)]
pub enum SweepError {
    /// The scan root does not exist.
    ///
    /// Raised once, after the walk completes, when the traversal could not
    /// even stat the root path.
    #[error("Scan root '{0}' does not exist")]
    #[diagnostic(
        code(modsweep::scan::root_not_found),
        help("Pass an existing directory with --path.")
    )]
    RootNotFound(
        /// The root path that was requested
        PathBuf,
    ),

    /// The scan root exists but could not be read.
    ///
    /// Permission problems on the root itself end up here. Entries below the
    /// root that cannot be read are skipped instead.
    #[error("Scan root '{path}' could not be read")]
    #[diagnostic(
        code(modsweep::scan::root_unreadable),
        help("Check that you have read and execute permission on the directory.")
    )]
    RootUnreadable {
        /// The root path that was requested
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// File system I/O error on a specific path.
    ///
    /// Used when a match directory cannot be measured at all (for example it
    /// vanished between discovery and measurement).
    #[error("I/O error accessing '{path}'")]
    #[diagnostic(code(modsweep::io_error))]
    IoError {
        /// The path that caused the I/O error
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The scan was stopped through its cancellation flag.
    #[error("Scan was cancelled before it completed")]
    #[diagnostic(code(modsweep::scan::cancelled))]
    Cancelled,

    /// Removing one selected match failed.
    ///
    /// Each deletion is independent: the other selected paths are still
    /// attempted and nothing already removed is restored.
    #[error("Failed to remove '{path}'")]
    #[diagnostic(
        code(modsweep::prune::failed),
        help("Ensure you have write permission on the directory and its parent.")
    )]
    PruneFailed {
        /// The directory that could not be removed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Some of the selected matches could not be removed.
    #[error("Pruning incomplete: {failed} of {attempted} directories could not be removed")]
    #[diagnostic(
        code(modsweep::prune::incomplete),
        help("The directories that could not be removed are listed above.")
    )]
    PruneIncomplete {
        /// Number of directories that failed
        failed: usize,
        /// Number of directories that were attempted
        attempted: usize,
    },

    /// Invalid size specification for --min-size.
    ///
    /// Valid suffixes are B (bytes), K (kilobytes), M (megabytes),
    /// G (gigabytes), or T (terabytes). Numbers without suffix are bytes.
    #[error("Invalid size: '{0}' - {1}")]
    #[diagnostic(
        code(modsweep::size::invalid),
        help(
            "Specify a size as a number with optional suffix (e.g., '5G', '500M', '1024K', or \
             raw bytes)"
        )
    )]
    InvalidSize(
        /// The invalid size value provided
        String,
        /// Description of the parsing error
        String,
    ),

    /// The selection typed at the prune prompt could not be understood.
    #[error("Invalid selection: '{0}' - {1}")]
    #[diagnostic(
        code(modsweep::prompt::invalid_selection),
        help("Use 'all', 'none', or numbers and ranges such as '1,3,5-7'.")
    )]
    InvalidSelection(
        /// The text that was entered
        String,
        /// Description of the problem
        String,
    ),

    /// Reading a prompt answer or writing results to the terminal failed.
    #[error("Terminal I/O failed")]
    #[diagnostic(code(modsweep::terminal::io_error))]
    Terminal(#[source] std::io::Error),

    /// The bounded worker pool requested with --jobs could not be created.
    #[error("Failed to start the size calculation worker pool")]
    #[diagnostic(code(modsweep::scan::thread_pool))]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(modsweep::config::error),
        help("Check the required configuration parameters.")
    )]
    ConfigError(
        /// Description of the configuration error
        String,
    ),
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, SweepError>;
