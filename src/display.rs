//! Rendering of scan results for the terminal.

use std::path::Path;

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, Table};

use crate::scan::MatchEntry;
use crate::units::{GB, MB, format_size};

/// One row of the size distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeBucket {
    pub label: &'static str,
    /// Inclusive lower bound in bytes
    pub min: u64,
    /// Exclusive upper bound in bytes, `None` for the open-ended bucket
    pub max: Option<u64>,
    pub count: usize,
    pub total: u64,
}

impl SizeBucket {
    const fn empty(label: &'static str, min: u64, max: Option<u64>) -> Self {
        Self {
            label,
            min,
            max,
            count: 0,
            total: 0,
        }
    }

    fn contains(&self, size: u64) -> bool {
        size >= self.min && self.max.is_none_or(|max| size < max)
    }
}

/// Group entries into size buckets, largest bucket first.
pub fn size_distribution(entries: &[MatchEntry]) -> Vec<SizeBucket> {
    let mut buckets = vec![
        SizeBucket::empty("Huge (> 1GB)", GB, None),
        SizeBucket::empty("Large (100MB-1GB)", 100 * MB, Some(GB)),
        SizeBucket::empty("Medium (10MB-100MB)", 10 * MB, Some(100 * MB)),
        SizeBucket::empty("Small (1MB-10MB)", MB, Some(10 * MB)),
        SizeBucket::empty("Tiny (< 1MB)", 0, Some(MB)),
    ];

    for entry in entries {
        if let Some(bucket) = buckets.iter_mut().find(|b| b.contains(entry.size())) {
            bucket.count += 1;
            bucket.total += entry.size();
        }
    }

    buckets
}

/// Build the distribution table shown after a scan.
pub fn distribution_table(entries: &[MatchEntry]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED).set_header(vec![
        Cell::new("Size Category"),
        Cell::new("Count"),
        Cell::new("Total Size"),
    ]);

    for bucket in size_distribution(entries) {
        table.add_row(vec![
            Cell::new(bucket.label),
            Cell::new(bucket.count).set_alignment(CellAlignment::Right),
            Cell::new(format_size(bucket.total)).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Render the `top` largest entries as a tree rooted at `root`.
///
/// Paths are shown relative to the root when possible. Entries are expected
/// to be sorted largest first, as a scan returns them.
pub fn render_largest(root: &Path, entries: &[MatchEntry], top: usize) -> String {
    let shown = &entries[..top.min(entries.len())];
    let mut out = format!("{}\n", root.display());

    for (i, entry) in shown.iter().enumerate() {
        let last = i + 1 == shown.len();
        let branch = if last { "╰── " } else { "├── " };
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let label = if relative.as_os_str().is_empty() {
            Path::new(".")
        } else {
            relative
        };
        out.push_str(&format!(
            "{branch}{} ({})\n",
            label.display(),
            format_size(entry.size())
        ));
    }

    if entries.len() > shown.len() {
        out.push_str(&format!("    … and {} more\n", entries.len() - shown.len()));
    }

    out
}
