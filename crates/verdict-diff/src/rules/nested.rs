//! Rules for embedded documents carried as string fields.

use verdict_tree::TreeValue;

use crate::chain::RuleChain;
use crate::error::DiffResult;
use crate::normalize::Normalizer;
use crate::render;
use crate::rule::{Rule, RulePredicate};

/// Normalizes string fields holding JSON documents.
///
/// Both sides are parsed, normalized recursively, and rewritten as
/// canonical text, so formatting differences inside the embedded document
/// vanish and the remaining rules apply to its fields too. By default the
/// rule fires on fields whose name ends in `.json`; an explicit chain can
/// replace the outer one for the embedded document.
#[derive(Default)]
pub struct NestedJson {
    predicate: Option<Box<RulePredicate>>,
    chain: Option<RuleChain>,
}

impl NestedJson {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default applicability predicate.
    pub fn with_predicate(
        predicate: impl Fn(&TreeValue, &TreeValue, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            predicate: Some(Box::new(predicate)),
            chain: None,
        }
    }

    /// Normalize embedded documents with `chain` instead of the outer one.
    pub fn with_chain(chain: RuleChain) -> Self {
        Self {
            predicate: None,
            chain: Some(chain),
        }
    }
}

impl Rule for NestedJson {
    fn name(&self) -> &str {
        "nested-json"
    }

    fn applies(&self, expected: &TreeValue, actual: &TreeValue, field: &str) -> bool {
        match &self.predicate {
            Some(predicate) => predicate(expected, actual, field),
            None => field.ends_with(".json") && expected.is_string() && actual.is_string(),
        }
    }

    fn apply(
        &self,
        expected: TreeValue,
        actual: TreeValue,
        _field: &str,
        engine: &Normalizer<'_>,
    ) -> DiffResult<(TreeValue, TreeValue)> {
        match (&expected, &actual) {
            (TreeValue::String(expected_text), TreeValue::String(actual_text)) => {
                let expected_tree = TreeValue::from_json_str(expected_text)?;
                let actual_tree = TreeValue::from_json_str(actual_text)?;
                let (expected_tree, actual_tree) = match &self.chain {
                    Some(chain) => {
                        Normalizer::new(chain).normalize(&expected_tree, &actual_tree)?
                    }
                    None => engine.normalize(&expected_tree, &actual_tree)?,
                };
                Ok((
                    TreeValue::String(render::to_text(&expected_tree)),
                    TreeValue::String(render::to_text(&actual_tree)),
                ))
            }
            _ => Ok((expected, actual)),
        }
    }
}

/// Canonicalizes string fields holding HTML fragments.
///
/// Both sides are rewritten to the canonical markup form, erasing
/// whitespace and attribute-order noise before the line diff. Fires on
/// fields ending in `.html` or `.htm` by default.
#[derive(Default)]
pub struct NestedHtml {
    predicate: Option<Box<RulePredicate>>,
}

impl NestedHtml {
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

impl Rule for NestedHtml {
    fn name(&self) -> &str {
        "nested-html"
    }

    fn applies(&self, expected: &TreeValue, actual: &TreeValue, field: &str) -> bool {
        match &self.predicate {
            Some(predicate) => predicate(expected, actual, field),
            None => has_html_suffix(field) && expected.is_string() && actual.is_string(),
        }
    }

    fn apply(
        &self,
        expected: TreeValue,
        actual: TreeValue,
        _field: &str,
        _engine: &Normalizer<'_>,
    ) -> DiffResult<(TreeValue, TreeValue)> {
        match (&expected, &actual) {
            (TreeValue::String(expected_text), TreeValue::String(actual_text)) => Ok((
                TreeValue::String(verdict_html::canonicalize(expected_text)),
                TreeValue::String(verdict_html::canonicalize(actual_text)),
            )),
            _ => Ok((expected, actual)),
        }
    }
}

fn has_html_suffix(field: &str) -> bool {
    field.ends_with(".html") || field.ends_with(".htm")
}
