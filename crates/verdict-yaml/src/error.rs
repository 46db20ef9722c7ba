use thiserror::Error;
use yaml_rust2::scanner::ScanError;

/// Errors produced by YAML conversion.
#[derive(Debug, Error)]
pub enum YamlError {
    #[error("YAML parse error: {0}")]
    Parse(#[from] ScanError),

    #[error("unsupported YAML construct: {construct}")]
    UnsupportedConstruct { construct: String },
}

/// Convenience alias for conversion operations.
pub type YamlResult<T> = Result<T, YamlError>;
