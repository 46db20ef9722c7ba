use thiserror::Error;

/// Errors produced by tree construction and access.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

/// Convenience alias for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
