use verdict_tree::TreeValue;

use crate::error::DiffResult;
use crate::normalize::Normalizer;
use crate::rule::{Rule, RulePredicate};

/// Inverts matching for string expectations starting with `!`.
///
/// `"!error"` matches any actual string except `"error"`: on a non-match
/// of the forbidden value the expected side is rewritten to the actual
/// value, while the forbidden value itself is left alone so the
/// `!`-prefixed expectation surfaces in the diff.
#[derive(Default)]
pub struct Negate {
    predicate: Option<Box<RulePredicate>>,
}

impl Negate {
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

impl Rule for Negate {
    fn name(&self) -> &str {
        "negate"
    }

    fn applies(&self, expected: &TreeValue, actual: &TreeValue, field: &str) -> bool {
        match &self.predicate {
            Some(predicate) => predicate(expected, actual, field),
            None => {
                matches!(expected, TreeValue::String(text) if text.starts_with('!'))
                    && actual.is_string()
            }
        }
    }

    fn apply(
        &self,
        expected: TreeValue,
        actual: TreeValue,
        _field: &str,
        _engine: &Normalizer<'_>,
    ) -> DiffResult<(TreeValue, TreeValue)> {
        let holds = match (&expected, &actual) {
            (TreeValue::String(expected_text), TreeValue::String(actual_text)) => expected_text
                .strip_prefix('!')
                .is_some_and(|forbidden| actual_text != forbidden),
            _ => false,
        };
        if holds {
            Ok((actual.clone(), actual))
        } else {
            Ok((expected, actual))
        }
    }
}
