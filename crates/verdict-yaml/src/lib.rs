//! YAML ingestion for Verdict.
//!
//! Converts YAML 1.1 documents into [`verdict_tree::TreeValue`] trees by
//! walking the parser's event stream. Plain scalars are resolved against the
//! core schema (null, bool, int, float, then String); quoted and block
//! scalars always stay strings. Anchors, aliases, merge keys, and non-scalar
//! mapping keys are rejected rather than silently mishandled.
//!
//! # Key Types
//!
//! - [`Converter`] — conversion with duplicate-key and node-built callbacks
//! - [`to_tree`] — one-shot conversion
//! - [`YamlError`] — parse and unsupported-construct failures

pub mod convert;
pub mod error;
pub mod scalar;

pub use convert::{to_tree, Converter};
pub use error::{YamlError, YamlResult};
pub use scalar::{resolve_plain, resolve_scalar};

// Re-exported so hook signatures can be written without a direct
// yaml-rust2 dependency.
pub use yaml_rust2::parser::Event;
