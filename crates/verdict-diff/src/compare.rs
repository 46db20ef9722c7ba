//! Top-level comparison entry points.

use tracing::debug;
use verdict_tree::TreeValue;

use crate::chain::RuleChain;
use crate::error::{DiffError, DiffResult};
use crate::line_diff::{self, DiffReport};
use crate::normalize::Normalizer;
use crate::render;

/// Normalize both trees and produce a structured line diff.
pub fn diff_report(
    expected: &TreeValue,
    actual: &TreeValue,
    chain: &RuleChain,
) -> DiffResult<DiffReport> {
    let normalizer = Normalizer::new(chain);
    let (expected, actual) = normalizer.normalize(expected, actual)?;
    let report = line_diff::diff_lines(&render::to_text(&expected), &render::to_text(&actual));
    debug!(
        insertions = report.insertions(),
        deletions = report.deletions(),
        "compared trees"
    );
    Ok(report)
}

/// Normalize both trees and render their differences.
///
/// Returns the empty string when the trees match under `chain`.
pub fn diff(expected: &TreeValue, actual: &TreeValue, chain: &RuleChain) -> DiffResult<String> {
    let report = diff_report(expected, actual, chain)?;
    if report.is_empty() {
        Ok(String::new())
    } else {
        Ok(report.to_string())
    }
}

/// Assert that `actual` matches `expected` under `chain`.
///
/// On mismatch the returned [`DiffError::Mismatch`] carries the rendered
/// diff and the optional `summary` label.
pub fn verify(
    expected: &TreeValue,
    actual: &TreeValue,
    chain: &RuleChain,
    summary: Option<&str>,
) -> DiffResult<()> {
    let text = diff(expected, actual, chain)?;
    if text.is_empty() {
        Ok(())
    } else {
        Err(DiffError::Mismatch {
            summary: summary.map(String::from),
            diff: text,
        })
    }
}
