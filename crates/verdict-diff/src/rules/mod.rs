//! Built-in comparison rules.

pub mod extra_keys;
pub mod ignore_null;
pub mod negate;
pub mod nested;
pub mod pattern;

pub use extra_keys::{IgnoreExtraKeys, RequiredKeyFn};
pub use ignore_null::IgnoreNull;
pub use negate::Negate;
pub use nested::{NestedHtml, NestedJson};
pub use pattern::{RegexMatch, WildcardMatch};
