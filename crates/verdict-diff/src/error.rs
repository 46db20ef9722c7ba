//! Error types for the comparison engine.

use verdict_tree::TreeError;

/// Errors that can occur during comparison.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A nested document inside a string field failed to parse.
    #[error("nested document: {0}")]
    Tree(#[from] TreeError),

    /// A `/pattern/` expectation failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Verification failed: the sides still differ after normalization.
    #[error("{}", mismatch_message(.summary, .diff))]
    Mismatch {
        /// Caller-supplied label for the comparison.
        summary: Option<String>,
        /// The rendered line diff.
        diff: String,
    },
}

fn mismatch_message(summary: &Option<String>, diff: &str) -> String {
    match summary {
        Some(label) => format!("{label}\n{diff}"),
        None => format!("expected and actual differ\n{diff}"),
    }
}

/// Convenience alias for comparison results.
pub type DiffResult<T> = Result<T, DiffError>;
