use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use walkdir::WalkDir;

use crate::error::{Result, SweepError};
use crate::logging::Logger;

/// Calculate the total size of the regular files below `path`.
///
/// Directories contribute nothing and, unless `follow_links` is set, neither
/// do symlinks. Children that cannot be read are skipped. Only a failure on
/// `path` itself is returned as an error.
///
/// A raised cancel flag yields [`SweepError::Cancelled`], never a partial sum.
pub(crate) fn directory_size(
    path: &Path,
    follow_links: bool,
    cancel: &AtomicBool,
    log: Logger,
) -> Result<u64> {
    let mut total_size = 0;

    for entry in WalkDir::new(path).follow_links(follow_links) {
        if cancel.load(Ordering::Relaxed) {
            return Err(SweepError::Cancelled);
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.path().is_none_or(|p| p == path) => {
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                return Err(SweepError::IoError {
                    path: path.to_path_buf(),
                    source,
                });
            }
            Err(err) => {
                log.verbose(2, format!("  Skipping unreadable entry: {err}"));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => total_size += metadata.len(),
            Err(err) => log.verbose(2, format!("  Skipping unreadable file: {err}")),
        }
    }

    Ok(total_size)
}
