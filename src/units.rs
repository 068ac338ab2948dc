//! Byte sizes as typed on the command line and as shown in reports.
//!
//! Both directions use powers of 1024 so that `--min-size 100M` and the
//! "Large (100MB-1GB)" distribution bucket agree on where 100 MB starts.

use crate::error::{Result, SweepError};

pub(crate) const KB: u64 = 1024;
pub(crate) const MB: u64 = 1024 * KB;
pub(crate) const GB: u64 = 1024 * MB;
const TB: u64 = 1024 * GB;

/// Accepted suffixes, longest first so `MB` wins over `B`.
const SUFFIXES: &[(&str, u64)] = &[
    ("TIB", TB),
    ("GIB", GB),
    ("MIB", MB),
    ("KIB", KB),
    ("TB", TB),
    ("GB", GB),
    ("MB", MB),
    ("KB", KB),
    ("T", TB),
    ("G", GB),
    ("M", MB),
    ("K", KB),
    ("B", 1),
];

/// Parse a `--min-size` value such as `500M`, `1.5G` or `2048`.
///
/// A bare number is a byte count. Suffixes are case-insensitive.
pub fn parse_size(text: &str) -> Result<u64> {
    let invalid = |reason: &str| SweepError::InvalidSize(text.to_string(), reason.to_string());

    let upper = text.trim().to_ascii_uppercase();
    let (number, multiplier) = split_suffix(&upper);
    let number = number.trim();

    if number.is_empty() {
        return Err(invalid("missing number"));
    }

    if let Ok(whole) = number.parse::<u64>() {
        return whole
            .checked_mul(multiplier)
            .ok_or_else(|| invalid("size does not fit in 64 bits"));
    }

    let value: f64 = number
        .parse()
        .map_err(|_| invalid("expected a number with an optional B/K/M/G/T suffix"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid("size must be a non-negative number"));
    }

    Ok((value * multiplier as f64) as u64)
}

fn split_suffix(upper: &str) -> (&str, u64) {
    for &(suffix, multiplier) in SUFFIXES {
        if let Some(number) = upper.strip_suffix(suffix) {
            return (number, multiplier);
        }
    }
    (upper, 1)
}

/// Render a byte count for reports: `N bytes` below 1 KB, otherwise two
/// decimals in KB, MB or GB.
pub fn format_size(bytes: u64) -> String {
    let scaled = |unit: u64| bytes as f64 / unit as f64;

    match bytes {
        b if b >= GB => format!("{:.2} GB", scaled(GB)),
        b if b >= MB => format!("{:.2} MB", scaled(MB)),
        b if b >= KB => format!("{:.2} KB", scaled(KB)),
        b => format!("{b} bytes"),
    }
}
