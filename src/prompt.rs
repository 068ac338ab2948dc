//! Line-based prompts for confirming and selecting matches.
//!
//! Every prompt reads from a [`BufRead`] and writes to a [`Write`], so the
//! commands can be driven by stdin/stdout or by in-memory buffers in tests.

use std::collections::BTreeSet;
use std::io::{BufRead, Write};

use crate::error::{Result, SweepError};
use crate::scan::MatchEntry;
use crate::units::format_size;

/// Ask a yes/no question. Only `y` or `yes` confirm; end of input means no.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<bool> {
    write!(output, "{question} [y/N] ").map_err(SweepError::Terminal)?;
    output.flush().map_err(SweepError::Terminal)?;

    let mut answer = String::new();
    input.read_line(&mut answer).map_err(SweepError::Terminal)?;

    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Parse a selection such as `1,3,5-7`, `all` or `none`.
///
/// Numbers are 1-based as displayed; the result holds sorted, de-duplicated
/// zero-based indices into a list of `len` items.
pub fn parse_selection(text: &str, len: usize) -> Result<Vec<usize>> {
    let text = text.trim();
    let invalid = |reason: String| SweepError::InvalidSelection(text.to_string(), reason);

    match text.to_lowercase().as_str() {
        "" | "none" => return Ok(Vec::new()),
        "all" | "*" => return Ok((0..len).collect()),
        _ => {}
    }

    let parse_index = |part: &str| -> Result<usize> {
        let number: usize = part
            .trim()
            .parse()
            .map_err(|_| invalid(format!("'{}' is not a number", part.trim())))?;
        if number == 0 || number > len {
            return Err(invalid(format!("{number} is outside 1-{len}")));
        }
        Ok(number - 1)
    };

    let mut selected = BTreeSet::new();
    for part in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let (start, end) = (parse_index(start)?, parse_index(end)?);
                if start > end {
                    return Err(invalid(format!("range '{part}' is reversed")));
                }
                selected.extend(start..=end);
            }
            None => {
                selected.insert(parse_index(part)?);
            }
        }
    }

    Ok(selected.into_iter().collect())
}

/// List `entries` with 1-based numbers and read a selection.
///
/// Invalid input is reported and asked again; end of input selects nothing.
pub fn select<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    entries: &[MatchEntry],
) -> Result<Vec<usize>> {
    let width = entries.len().to_string().len();
    for (i, entry) in entries.iter().enumerate() {
        writeln!(
            output,
            "  {:>width$}) {} ({})",
            i + 1,
            entry.path().display(),
            format_size(entry.size())
        )
        .map_err(SweepError::Terminal)?;
    }

    loop {
        write!(
            output,
            "Select directories to prune (e.g. 1,3,5-7, 'all' or 'none'): "
        )
        .map_err(SweepError::Terminal)?;
        output.flush().map_err(SweepError::Terminal)?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(SweepError::Terminal)? == 0 {
            return Ok(Vec::new());
        }

        match parse_selection(&line, entries.len()) {
            Ok(indices) => return Ok(indices),
            Err(err) => writeln!(output, "{err}").map_err(SweepError::Terminal)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_confirm_answers() {
        for (answer, expected) in [
            ("y\n", true),
            ("YES\n", true),
            ("  yes  \n", true),
            ("n\n", false),
            ("\n", false),
            ("yep\n", false),
            ("", false),
        ] {
            let mut output = Vec::new();
            let confirmed = confirm(&mut Cursor::new(answer), &mut output, "Go?").unwrap();
            assert_eq!(confirmed, expected, "answer {answer:?}");
            assert_eq!(String::from_utf8(output).unwrap(), "Go? [y/N] ");
        }
    }

    #[test]
    fn test_parse_selection_forms() {
        assert_eq!(parse_selection("all", 3).unwrap(), vec![0, 1, 2]);
        assert_eq!(parse_selection("ALL", 2).unwrap(), vec![0, 1]);
        assert!(parse_selection("none", 3).unwrap().is_empty());
        assert!(parse_selection("   ", 3).unwrap().is_empty());
        assert_eq!(parse_selection("2", 3).unwrap(), vec![1]);
        assert_eq!(parse_selection("3, 1", 3).unwrap(), vec![0, 2]);
        assert_eq!(parse_selection("1,3,5-7", 8).unwrap(), vec![0, 2, 4, 5, 6]);
        assert_eq!(parse_selection("2-4,3,3", 5).unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_selection("1,,2,", 2).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_parse_selection_rejects_bad_input() {
        assert!(matches!(
            parse_selection("0", 3),
            Err(SweepError::InvalidSelection(..))
        ));
        assert!(parse_selection("4", 3).is_err());
        assert!(parse_selection("a", 3).is_err());
        assert!(parse_selection("3-1", 3).is_err());
        assert!(parse_selection("1-", 3).is_err());
        assert!(parse_selection("1", 0).is_err());
    }

    #[test]
    fn test_select_retries_after_invalid_input() {
        let entries = vec![
            MatchEntry::new("/p/a/node_modules", 2048),
            MatchEntry::new("/p/b/node_modules", 10),
        ];
        let mut input = Cursor::new("9\n2\n");
        let mut output = Vec::new();

        let selected = select(&mut input, &mut output, &entries).unwrap();

        assert_eq!(selected, vec![1]);
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("1) /p/a/node_modules (2.00 KB)"));
        assert!(output.contains("2) /p/b/node_modules (10 bytes)"));
        assert!(output.contains("Invalid selection"));
    }

    #[test]
    fn test_select_end_of_input_selects_nothing() {
        let entries = vec![MatchEntry::new("/p/a/node_modules", 1)];
        let selected = select(&mut Cursor::new(""), &mut Vec::new(), &entries).unwrap();
        assert!(selected.is_empty());
    }
}
