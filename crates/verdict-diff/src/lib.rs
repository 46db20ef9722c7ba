//! Semantic tree comparison for the Verdict toolkit.
//!
//! Two documents rarely agree byte for byte even when they agree on
//! everything that matters. This crate normalizes an expected/actual pair
//! of trees through an ordered chain of rewrite rules (null wildcards,
//! negation, regex and wildcard patterns, extra-key pruning, embedded
//! JSON and HTML documents), renders both sides as canonical text, and
//! reports whatever survives as a line diff. An empty diff means the
//! trees match under the chain's notion of equality.
//!
//! # Quick Start
//!
//! ```rust
//! use verdict_diff::{diff, RuleChain};
//! use verdict_tree::TreeValue;
//!
//! let expected =
//!     TreeValue::from_json_str(r#"{"version": "/^v[0-9]+$/", "debug": null}"#).unwrap();
//! let actual = TreeValue::from_json_str(r#"{"version": "v42", "debug": "off"}"#).unwrap();
//! let text = diff(&expected, &actual, &RuleChain::standard()).unwrap();
//! assert!(text.is_empty());
//! ```

pub mod chain;
pub mod compare;
pub mod error;
pub mod line_diff;
pub mod normalize;
pub mod render;
pub mod rule;
pub mod rules;

// Re-exports for convenience.
pub use chain::RuleChain;
pub use compare::{diff, diff_report, verify};
pub use error::{DiffError, DiffResult};
pub use line_diff::{diff_lines, DiffLine, DiffReport};
pub use normalize::Normalizer;
pub use render::to_text;
pub use rule::{FnRule, Rule, RulePredicate, RuleTransform};
pub use rules::{
    IgnoreExtraKeys, IgnoreNull, Negate, NestedHtml, NestedJson, RegexMatch, RequiredKeyFn,
    WildcardMatch,
};
