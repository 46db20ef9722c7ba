use verdict_tree::TreeValue;

use crate::error::DiffResult;
use crate::normalize::Normalizer;

/// Predicate over an `(expected, actual, field)` triple.
pub type RulePredicate = dyn Fn(&TreeValue, &TreeValue, &str) -> bool + Send + Sync;

/// Transform run when a rule's predicate holds.
pub type RuleTransform = dyn Fn(TreeValue, TreeValue, &str, &Normalizer<'_>) -> DiffResult<(TreeValue, TreeValue)>
    + Send
    + Sync;

/// A single rewrite step in the rule chain.
///
/// Rules are applied in registration order at every tree position; each one
/// first answers whether it applies to the `(expected, actual, field)`
/// triple, then may rewrite the pair. Later rules observe the output of
/// earlier ones. The trait is object-safe and `Send + Sync` so chains can
/// be shared across threads.
pub trait Rule: Send + Sync {
    /// Short name used in trace output (e.g. "ignore-null", "regex").
    fn name(&self) -> &str;

    /// Whether the transform should run for this pair.
    fn applies(&self, _expected: &TreeValue, _actual: &TreeValue, _field: &str) -> bool {
        true
    }

    /// Rewrite the pair. `engine` allows recursion into nested documents.
    fn apply(
        &self,
        expected: TreeValue,
        actual: TreeValue,
        field: &str,
        engine: &Normalizer<'_>,
    ) -> DiffResult<(TreeValue, TreeValue)>;
}

/// A rule backed by closures, for one-off comparison tweaks that do not
/// warrant a named type.
pub struct FnRule {
    name: String,
    predicate: Option<Box<RulePredicate>>,
    transform: Box<RuleTransform>,
}

impl FnRule {
    /// A rule whose transform runs at every position.
    pub fn new(
        name: impl Into<String>,
        transform: impl Fn(TreeValue, TreeValue, &str, &Normalizer<'_>) -> DiffResult<(TreeValue, TreeValue)>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            predicate: None,
            transform: Box::new(transform),
        }
    }

    /// A rule gated by `predicate`.
    pub fn with_predicate(
        name: impl Into<String>,
        predicate: impl Fn(&TreeValue, &TreeValue, &str) -> bool + Send + Sync + 'static,
        transform: impl Fn(TreeValue, TreeValue, &str, &Normalizer<'_>) -> DiffResult<(TreeValue, TreeValue)>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            predicate: Some(Box::new(predicate)),
            transform: Box::new(transform),
        }
    }
}

impl Rule for FnRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn applies(&self, expected: &TreeValue, actual: &TreeValue, field: &str) -> bool {
        match &self.predicate {
            Some(predicate) => predicate(expected, actual, field),
            None => true,
        }
    }

    fn apply(
        &self,
        expected: TreeValue,
        actual: TreeValue,
        field: &str,
        engine: &Normalizer<'_>,
    ) -> DiffResult<(TreeValue, TreeValue)> {
        (self.transform)(expected, actual, field, engine)
    }
}
