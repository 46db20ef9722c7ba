//! Line differ: LCS comparison of canonical texts.
//!
//! Uses the `similar` crate to align lines. Matching is
//! whitespace-insensitive: lines are compared with surrounding whitespace
//! trimmed, but reported with their original text (the expected side's
//! text for unchanged lines).

use std::fmt;

use serde::{Deserialize, Serialize};
use similar::{capture_diff_slices, Algorithm, DiffTag};

/// A single line of a diff report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffLine {
    /// Present in both texts.
    Unchanged(String),
    /// Present only in the actual text.
    Inserted(String),
    /// Present only in the expected text.
    Deleted(String),
}

/// The result of diffing two canonical texts.
///
/// Displays in unified style: one output line per entry, prefixed with
/// `' '`, `'+'`, or `'-'`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    /// All lines of both texts in alignment order.
    pub lines: Vec<DiffLine>,
}

impl DiffReport {
    /// Returns `true` if the texts matched line for line.
    pub fn is_empty(&self) -> bool {
        self.lines
            .iter()
            .all(|line| matches!(line, DiffLine::Unchanged(_)))
    }

    /// Number of lines present only in the actual text.
    pub fn insertions(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| matches!(line, DiffLine::Inserted(_)))
            .count()
    }

    /// Number of lines present only in the expected text.
    pub fn deletions(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| matches!(line, DiffLine::Deleted(_)))
            .count()
    }
}

impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            let (prefix, text) = match line {
                DiffLine::Unchanged(text) => (' ', text),
                DiffLine::Inserted(text) => ('+', text),
                DiffLine::Deleted(text) => ('-', text),
            };
            writeln!(f, "{prefix}{text}")?;
        }
        Ok(())
    }
}

/// Diff two texts line by line.
pub fn diff_lines(expected: &str, actual: &str) -> DiffReport {
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    let expected_keys: Vec<&str> = expected_lines.iter().map(|line| line.trim()).collect();
    let actual_keys: Vec<&str> = actual_lines.iter().map(|line| line.trim()).collect();

    let mut lines = Vec::new();
    for op in capture_diff_slices(Algorithm::Lcs, &expected_keys, &actual_keys) {
        match op.tag() {
            DiffTag::Equal => {
                for index in op.old_range() {
                    lines.push(DiffLine::Unchanged(expected_lines[index].to_string()));
                }
            }
            DiffTag::Delete => {
                for index in op.old_range() {
                    lines.push(DiffLine::Deleted(expected_lines[index].to_string()));
                }
            }
            DiffTag::Insert => {
                for index in op.new_range() {
                    lines.push(DiffLine::Inserted(actual_lines[index].to_string()));
                }
            }
            DiffTag::Replace => {
                for index in op.old_range() {
                    lines.push(DiffLine::Deleted(expected_lines[index].to_string()));
                }
                for index in op.new_range() {
                    lines.push(DiffLine::Inserted(actual_lines[index].to_string()));
                }
            }
        }
    }
    DiffReport { lines }
}
