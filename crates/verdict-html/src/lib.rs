//! HTML canonicalization for Verdict.
//!
//! Markup compared as raw text is noisy: attribute order, indentation, and
//! entity spelling all produce spurious differences. This crate parses
//! markup with full HTML5 error recovery and serializes the resulting tree
//! into a stable line-oriented text, so two fragments that parse to the same
//! tree compare equal byte for byte.

pub mod canonical;

pub use canonical::canonicalize;
