//! Concurrent discovery and measurement of match directories.
//!
//! A scan runs in two layers:
//!
//! - The walker traverses the root once on the calling thread and yields every
//!   directory named like the match name without descending into it.
//! - Each yielded match is measured by its own rayon task. Finished
//!   measurements are pushed into a mutex-guarded list.
//!
//! The scan joins every task before returning, then sorts the entries by size,
//! largest first.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use modsweep::scan::Scanner;
//!
//! let scanner = Scanner::builder()
//!     .match_name("node_modules")
//!     .jobs(8)
//!     .build()?;
//!
//! let report = scanner.scan(Path::new("/home/me/projects"));
//! println!("{} matches, {} bytes", report.len(), report.total_size());
//! if let Some(err) = report.error() {
//!     eprintln!("walk ended early: {err}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use rayon::{Scope, ThreadPool, ThreadPoolBuilder};

use crate::error::{Result, SweepError};
use crate::logging::Logger;

mod size;
mod walker;

use size::directory_size;
use walker::MatchWalker;

/// Directory name searched for when none is configured.
pub const DEFAULT_MATCH_NAME: &str = "node_modules";

/// One measured match directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEntry {
    path: PathBuf,
    size: u64,
}

impl MatchEntry {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// Absolute path of the match directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total size in bytes of the regular files below the match
    pub fn size(&self) -> u64 {
        self.size
    }
}

/// A match that was discovered but could not be measured.
#[derive(Debug)]
pub struct MeasureFailure {
    pub path: PathBuf,
    pub error: SweepError,
}

/// Outcome of a single scan.
///
/// Partial results are always kept: a terminal walk error is stored next to
/// whatever entries were measured before or despite it.
#[derive(Debug)]
pub struct ScanReport {
    root: PathBuf,
    entries: Vec<MatchEntry>,
    failures: Vec<MeasureFailure>,
    skipped: usize,
    elapsed: Duration,
    error: Option<SweepError>,
}

impl ScanReport {
    /// The absolute root that was scanned
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Measured matches, largest first
    pub fn entries(&self) -> &[MatchEntry] {
        &self.entries
    }

    /// Matches that were found but could not be measured, including those cut
    /// short by cancellation
    pub fn failures(&self) -> &[MeasureFailure] {
        &self.failures
    }

    /// Number of entries the walker skipped because they were unreadable
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Wall-clock duration of the scan
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Terminal walk error, if the root could not be traversed
    pub fn error(&self) -> Option<&SweepError> {
        self.error.as_ref()
    }

    /// Remove and return the terminal walk error
    pub fn take_error(&mut self) -> Option<SweepError> {
        self.error.take()
    }

    /// Sum of all entry sizes
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(MatchEntry::size).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop entries smaller than `min_size`, returning how many were dropped.
    ///
    /// The remaining entries keep their largest-first order.
    pub fn retain_min_size(&mut self, min_size: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.size >= min_size);
        before - self.entries.len()
    }

    /// Split into the sorted entries and the terminal walk error
    pub fn into_parts(self) -> (Vec<MatchEntry>, Option<SweepError>) {
        (self.entries, self.error)
    }
}

/// Scan orchestrator
#[derive(Debug)]
pub struct Scanner {
    /// Base name that identifies a match directory
    match_name: OsString,
    /// Dedicated pool for size calculations; `None` uses the global rayon pool
    pool: Option<ThreadPool>,
    /// Follow symbolic links while walking and measuring
    follow_symlinks: bool,
    /// Shared flag checked by the walker and every size calculation
    cancel: Arc<AtomicBool>,
    /// Verbosity level for logging
    verbose: u8,
    /// Suppress informational logging when true
    quiet: bool,
}

impl Scanner {
    /// Creates a new builder for [`Scanner`]
    pub fn builder() -> ScannerBuilder {
        ScannerBuilder::default()
    }

    /// Get the match name
    pub fn match_name(&self) -> &OsStr {
        &self.match_name
    }

    /// Number of worker threads used for size calculations
    pub fn jobs(&self) -> usize {
        self.pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, ThreadPool::current_num_threads)
    }

    /// Check if symlinks are followed
    pub fn follow_symlinks(&self) -> bool {
        self.follow_symlinks
    }

    /// Flag that stops the scan when set.
    ///
    /// In-flight measurements stop at their next entry and land in
    /// [`ScanReport::failures`] instead of reporting a partial size. The scan
    /// still waits for all of them and reports [`SweepError::Cancelled`].
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Scan `root` for match directories and measure each of them.
    pub fn scan(&self, root: &Path) -> ScanReport {
        let started = Instant::now();
        let log = Logger::new(self.verbose, self.quiet);
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());

        log.verbose(
            1,
            format!(
                "Scanning for {} directories from {} with {} workers",
                self.match_name.to_string_lossy(),
                root.display(),
                self.jobs()
            ),
        );

        let entries = Mutex::new(Vec::new());
        let failures = Mutex::new(Vec::new());
        let mut walker = MatchWalker::new(
            &root,
            &self.match_name,
            self.follow_symlinks,
            Arc::clone(&self.cancel),
            log,
        );

        match &self.pool {
            Some(pool) => pool.in_place_scope(|scope| {
                self.dispatch(scope, &mut walker, &entries, &failures, log)
            }),
            None => rayon::in_place_scope(|scope| {
                self.dispatch(scope, &mut walker, &entries, &failures, log)
            }),
        }

        let skipped = walker.skipped();
        let mut error = walker.into_error();
        if error.is_none() && self.cancel.load(Ordering::Relaxed) {
            error = Some(SweepError::Cancelled);
        }

        let mut entries = into_inner(entries);
        entries.sort_by(|a, b| b.size.cmp(&a.size));
        let failures = into_inner(failures);

        if skipped > 0 {
            log.verbose(1, format!("Skipped {skipped} unreadable entries"));
        }

        ScanReport {
            root,
            entries,
            failures,
            skipped,
            elapsed: started.elapsed(),
            error,
        }
    }

    /// Spawn one size calculation per match while the walk is still running.
    fn dispatch<'scope>(
        &'scope self,
        scope: &Scope<'scope>,
        walker: &mut MatchWalker,
        entries: &'scope Mutex<Vec<MatchEntry>>,
        failures: &'scope Mutex<Vec<MeasureFailure>>,
        log: Logger,
    ) {
        let cancel: &AtomicBool = &self.cancel;
        let follow_symlinks = self.follow_symlinks;

        for path in walker {
            log.verbose(2, format!("  Found {}", path.display()));
            scope.spawn(move |_| {
                let measured = directory_size(&path, follow_symlinks, cancel, log);
                match measured {
                    Ok(size) => lock(entries).push(MatchEntry::new(path, size)),
                    Err(error) => {
                        if !matches!(error, SweepError::Cancelled) {
                            log.warn(format!("Could not measure {}: {error}", path.display()));
                        }
                        lock(failures).push(MeasureFailure { path, error });
                    }
                }
            });
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn into_inner<T>(mutex: Mutex<T>) -> T {
    mutex.into_inner().unwrap_or_else(PoisonError::into_inner)
}

/// Builder for [`Scanner`]
#[derive(Debug, Default)]
pub struct ScannerBuilder {
    match_name: Option<OsString>,
    jobs: Option<usize>,
    follow_symlinks: bool,
    cancel: Option<Arc<AtomicBool>>,
    verbose: u8,
    quiet: bool,
}

impl ScannerBuilder {
    /// Set the directory name to search for
    pub fn match_name(mut self, name: impl Into<OsString>) -> Self {
        self.match_name = Some(name.into());
        self
    }

    /// Cap the number of concurrent size calculations
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// Cap the number of concurrent size calculations, if given
    pub fn max_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Follow symbolic links while walking and measuring
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Share an existing cancellation flag with the scanner
    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Set the verbosity level
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable or disable quiet mode
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Build the scanner, starting a dedicated pool if a job cap was set
    pub fn build(self) -> Result<Scanner> {
        let match_name = self
            .match_name
            .unwrap_or_else(|| OsString::from(DEFAULT_MATCH_NAME));
        if match_name.is_empty() {
            return Err(SweepError::ConfigError(
                "Match name must not be empty".to_string(),
            ));
        }

        let pool = match self.jobs {
            Some(0) => {
                return Err(SweepError::ConfigError(
                    "Number of jobs must be at least 1".to_string(),
                ));
            }
            Some(jobs) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .thread_name(|i| format!("modsweep-size-{i}"))
                    .build()?,
            ),
            None => None,
        };

        Ok(Scanner {
            match_name,
            pool,
            follow_symlinks: self.follow_symlinks,
            cancel: self
                .cancel
                .unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
            verbose: self.verbose,
            quiet: self.quiet,
        })
    }
}
