//! Tree value model for Verdict.
//!
//! This crate provides the document tree that every other Verdict crate
//! operates on: a small value enum with order-preserving objects, plus JSON
//! ingestion. Parsers for other formats (YAML, HTML) live in their own
//! crates and produce these trees.
//!
//! # Key Types
//!
//! - [`TreeValue`] — Null, Bool, Number, String, Array, or ordered Object
//! - [`Number`] — integer/float scalar where `1` and `1.0` stay distinct
//! - [`TreeError`] — construction and access failures

pub mod error;
pub mod value;

pub use error::{TreeError, TreeResult};
pub use value::{Number, TreeValue};
