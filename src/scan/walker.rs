//! Depth-first discovery of match directories.
//!
//! The walker yields every directory whose base name equals the match name
//! and never descends into one, so a match nested inside another match is
//! invisible to a single pass. Entries that cannot be read are skipped; only
//! errors on the root itself are kept, and they are handed back once the walk
//! is over.

use std::ffi::{OsStr, OsString};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use walkdir::WalkDir;

use crate::error::SweepError;
use crate::logging::Logger;

/// Lazy iterator over the match directories below a root.
pub(crate) struct MatchWalker {
    root: PathBuf,
    match_name: OsString,
    inner: walkdir::IntoIter,
    cancel: Arc<AtomicBool>,
    log: Logger,
    skipped: usize,
    root_error: Option<SweepError>,
}

impl MatchWalker {
    pub(crate) fn new(
        root: &Path,
        match_name: &OsStr,
        follow_links: bool,
        cancel: Arc<AtomicBool>,
        log: Logger,
    ) -> Self {
        Self {
            root: root.to_path_buf(),
            match_name: match_name.to_os_string(),
            inner: WalkDir::new(root).follow_links(follow_links).into_iter(),
            cancel,
            log,
            skipped: 0,
            root_error: None,
        }
    }

    /// Number of entries skipped because they could not be accessed.
    pub(crate) fn skipped(&self) -> usize {
        self.skipped
    }

    /// Consume the walker and return the terminal error, if the root failed.
    pub(crate) fn into_error(self) -> Option<SweepError> {
        self.root_error
    }

    fn record_error(&mut self, err: walkdir::Error) {
        let on_root = err
            .path()
            .map_or(err.depth() == 0, |path| path == self.root.as_path());

        if on_root && self.root_error.is_none() {
            let source = err
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop at scan root"));
            let error = if source.kind() == ErrorKind::NotFound {
                SweepError::RootNotFound(self.root.clone())
            } else {
                SweepError::RootUnreadable {
                    path: self.root.clone(),
                    source,
                }
            };
            self.root_error = Some(error);
            return;
        }

        self.skipped += 1;
        self.log.verbose(2, format!("  Skipping unreadable entry: {err}"));
    }
}

impl Iterator for MatchWalker {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            if self.cancel.load(Ordering::Relaxed) {
                return None;
            }

            match self.inner.next()? {
                Ok(entry) => {
                    if entry.file_type().is_dir() && entry.file_name() == self.match_name {
                        self.inner.skip_current_dir();
                        return Some(entry.into_path());
                    }
                }
                Err(err) => self.record_error(err),
            }
        }
    }
}
