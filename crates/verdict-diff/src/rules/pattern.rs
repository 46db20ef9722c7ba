//! Pattern rules: regex and wildcard matching for scalar expectations.

use std::borrow::Cow;

use regex::Regex;
use verdict_tree::TreeValue;

use crate::error::DiffResult;
use crate::normalize::Normalizer;
use crate::rule::{Rule, RulePredicate};

/// Matches actual scalars against `/.../`-delimited regex expectations.
///
/// The pattern is anchored only if the expression anchors itself. Actual
/// numbers and booleans are matched against their text rendering, so
/// `"/^[0-9]+$/"` accepts the number `123`.
#[derive(Default)]
pub struct RegexMatch {
    predicate: Option<Box<RulePredicate>>,
}

impl RegexMatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default applicability predicate.
    pub fn with_predicate(
        predicate: impl Fn(&TreeValue, &TreeValue, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            predicate: Some(Box::new(predicate)),
        }
    }
}

impl Rule for RegexMatch {
    fn name(&self) -> &str {
        "regex"
    }

    fn applies(&self, expected: &TreeValue, actual: &TreeValue, field: &str) -> bool {
        match &self.predicate {
            Some(predicate) => predicate(expected, actual, field),
            None => matches!(expected, TreeValue::String(text) if is_regex_form(text)),
        }
    }

    fn apply(
        &self,
        expected: TreeValue,
        actual: TreeValue,
        _field: &str,
        _engine: &Normalizer<'_>,
    ) -> DiffResult<(TreeValue, TreeValue)> {
        let holds = match &expected {
            TreeValue::String(pattern_text) if is_regex_form(pattern_text) => {
                let pattern = &pattern_text[1..pattern_text.len() - 1];
                let regex = Regex::new(pattern)?;
                match_text(&actual).is_some_and(|text| regex.is_match(&text))
            }
            _ => false,
        };
        if holds {
            Ok((actual.clone(), actual))
        } else {
            Ok((expected, actual))
        }
    }
}

/// Matches actual scalars against `*`-wildcard expectations.
///
/// `*` stands for any run of characters, every other character matches
/// literally. `"data-*.bin"` accepts `"data-7.bin"` but not `"data.bin"`.
/// Numbers and booleans match through their text rendering, as with
/// [`RegexMatch`].
#[derive(Default)]
pub struct WildcardMatch {
    predicate: Option<Box<RulePredicate>>,
}

impl WildcardMatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default applicability predicate.
    pub fn with_predicate(
        predicate: impl Fn(&TreeValue, &TreeValue, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            predicate: Some(Box::new(predicate)),
        }
    }
}

impl Rule for WildcardMatch {
    fn name(&self) -> &str {
        "wildcard"
    }

    fn applies(&self, expected: &TreeValue, actual: &TreeValue, field: &str) -> bool {
        match &self.predicate {
            Some(predicate) => predicate(expected, actual, field),
            None => matches!(expected, TreeValue::String(text) if text.contains('*')),
        }
    }

    fn apply(
        &self,
        expected: TreeValue,
        actual: TreeValue,
        _field: &str,
        _engine: &Normalizer<'_>,
    ) -> DiffResult<(TreeValue, TreeValue)> {
        let holds = match &expected {
            TreeValue::String(pattern) if pattern.contains('*') => {
                let regex = Regex::new(&wildcard_pattern(pattern))?;
                match_text(&actual).is_some_and(|text| regex.is_match(&text))
            }
            _ => false,
        };
        if holds {
            Ok((actual.clone(), actual))
        } else {
            Ok((expected, actual))
        }
    }
}

/// `/.../` with a non-empty body.
fn is_regex_form(text: &str) -> bool {
    text.len() > 2 && text.starts_with('/') && text.ends_with('/')
}

/// Anchored regex equivalent of a `*`-wildcard pattern.
fn wildcard_pattern(pattern: &str) -> String {
    let mut out = String::from("^");
    for (index, segment) in pattern.split('*').enumerate() {
        if index > 0 {
            out.push_str(".*");
        }
        out.push_str(&regex::escape(segment));
    }
    out.push('$');
    out
}

fn match_text(value: &TreeValue) -> Option<Cow<'_, str>> {
    match value {
        TreeValue::String(text) => Some(Cow::Borrowed(text)),
        TreeValue::Number(number) => Some(Cow::Owned(number.to_string())),
        TreeValue::Bool(true) => Some(Cow::Borrowed("true")),
        TreeValue::Bool(false) => Some(Cow::Borrowed("false")),
        _ => None,
    }
}
