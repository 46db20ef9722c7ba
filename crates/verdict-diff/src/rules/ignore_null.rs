use verdict_tree::TreeValue;

use crate::error::DiffResult;
use crate::normalize::Normalizer;
use crate::rule::{Rule, RulePredicate};

/// Treats a null expectation as matching anything.
///
/// When the expected side is null and the actual side is not, the actual
/// side is rewritten to null as well; the renderer then omits the member
/// from both sides. The rule is one-directional: an unexpected null on the
/// actual side still diffs.
#[derive(Default)]
pub struct IgnoreNull {
    predicate: Option<Box<RulePredicate>>,
}

impl IgnoreNull {
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

impl Rule for IgnoreNull {
    fn name(&self) -> &str {
        "ignore-null"
    }

    fn applies(&self, expected: &TreeValue, actual: &TreeValue, field: &str) -> bool {
        match &self.predicate {
            Some(predicate) => predicate(expected, actual, field),
            None => expected.is_null() && !actual.is_null(),
        }
    }

    fn apply(
        &self,
        expected: TreeValue,
        _actual: TreeValue,
        _field: &str,
        _engine: &Normalizer<'_>,
    ) -> DiffResult<(TreeValue, TreeValue)> {
        Ok((expected, TreeValue::Null))
    }
}
