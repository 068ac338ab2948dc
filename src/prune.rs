//! Best-effort removal of selected match directories.
//!
//! Every selected match is removed with a single `remove_dir_all` call. A
//! failure is recorded for that path only and the remaining paths are still
//! attempted. Nothing that was already removed is restored.

use std::fs;

use crate::error::SweepError;
use crate::logging::Logger;
use crate::scan::MatchEntry;
use crate::units::format_size;

/// Outcome of a prune run.
#[derive(Debug, Default)]
pub struct PruneReport {
    removed: Vec<MatchEntry>,
    failures: Vec<SweepError>,
    dry_run: bool,
}

impl PruneReport {
    /// Entries that were removed (or would have been, in a dry run)
    pub fn removed(&self) -> &[MatchEntry] {
        &self.removed
    }

    /// One [`SweepError::PruneFailed`] per directory that could not be removed
    pub fn failures(&self) -> &[SweepError] {
        &self.failures
    }

    /// Bytes reclaimed by the removed entries
    pub fn bytes_freed(&self) -> u64 {
        self.removed.iter().map(MatchEntry::size).sum()
    }

    /// Number of directories that were attempted
    pub fn attempted(&self) -> usize {
        self.removed.len() + self.failures.len()
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Remove every entry in `selected`.
///
/// In dry-run mode nothing is touched and every entry is reported as removed.
pub fn prune<'a>(
    selected: impl IntoIterator<Item = &'a MatchEntry>,
    dry_run: bool,
    verbose: u8,
    quiet: bool,
) -> PruneReport {
    let log = Logger::new(verbose, quiet);
    let mut report = PruneReport {
        dry_run,
        ..PruneReport::default()
    };

    for entry in selected {
        if dry_run {
            log.verbose(
                1,
                format!(
                    "  Would remove {} ({})",
                    entry.path().display(),
                    format_size(entry.size())
                ),
            );
            report.removed.push(entry.clone());
            continue;
        }

        log.verbose(
            1,
            format!(
                "  Removing {} ({})",
                entry.path().display(),
                format_size(entry.size())
            ),
        );
        match fs::remove_dir_all(entry.path()) {
            Ok(()) => report.removed.push(entry.clone()),
            Err(source) => {
                log.verbose(
                    1,
                    format!("  Failed to remove {}: {source}", entry.path().display()),
                );
                report.failures.push(SweepError::PruneFailed {
                    path: entry.path().to_path_buf(),
                    source,
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;

    fn make_match(root: &Path, name: &str, size: usize) -> MatchEntry {
        let dir = root.join(name).join("node_modules");
        fs::create_dir_all(dir.join("pkg")).unwrap();
        fs::write(dir.join("pkg/index.js"), vec![b'x'; size]).unwrap();
        MatchEntry::new(dir, size as u64)
    }

    #[test]
    fn test_prune_removes_selected_only() {
        let temp_dir = TempDir::new().unwrap();
        let keep = make_match(temp_dir.path(), "keep", 10);
        let gone = make_match(temp_dir.path(), "gone", 20);

        let report = prune([&gone], false, 0, true);

        assert!(report.is_complete());
        assert!(!report.is_dry_run());
        assert_eq!(report.removed(), &[gone.clone()]);
        assert_eq!(report.bytes_freed(), 20);
        assert!(!gone.path().exists());
        assert!(keep.path().exists());
        // The parent project directory stays.
        assert!(temp_dir.path().join("gone").exists());
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let a = make_match(temp_dir.path(), "a", 5);
        let b = make_match(temp_dir.path(), "b", 7);

        let report = prune([&a, &b], true, 0, true);

        assert!(report.is_dry_run());
        assert_eq!(report.attempted(), 2);
        assert_eq!(report.bytes_freed(), 12);
        assert!(a.path().exists());
        assert!(b.path().exists());
    }

    #[test]
    fn test_failure_does_not_stop_other_removals() {
        let temp_dir = TempDir::new().unwrap();
        let first = make_match(temp_dir.path(), "first", 3);
        let missing = MatchEntry::new(temp_dir.path().join("missing/node_modules"), 100);
        let last = make_match(temp_dir.path(), "last", 4);

        let report = prune([&first, &missing, &last], false, 0, true);

        assert!(!report.is_complete());
        assert_eq!(report.attempted(), 3);
        assert_eq!(report.removed(), &[first.clone(), last.clone()]);
        assert_eq!(report.bytes_freed(), 7);
        assert!(matches!(
            &report.failures()[0],
            SweepError::PruneFailed { path, .. } if path == missing.path()
        ));
        assert!(!first.path().exists());
        assert!(!last.path().exists());
    }

    #[test]
    fn test_empty_selection() {
        let report = prune(Vec::<&MatchEntry>::new(), false, 0, true);
        assert_eq!(report.attempted(), 0);
        assert_eq!(report.bytes_freed(), 0);
        assert!(report.is_complete());
    }
}
