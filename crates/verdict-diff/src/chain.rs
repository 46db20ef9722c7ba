use tracing::trace;
use verdict_tree::TreeValue;

use crate::error::DiffResult;
use crate::normalize::Normalizer;
use crate::rule::{FnRule, Rule};
use crate::rules::{
    IgnoreExtraKeys, IgnoreNull, Negate, NestedHtml, NestedJson, RegexMatch, WildcardMatch,
};

/// An ordered list of comparison rules.
///
/// Chains are built by value: every method consumes the chain and returns
/// the extended one, so a fully configured chain is immutable afterwards
/// and can be shared across any number of concurrent comparisons.
#[derive(Default)]
pub struct RuleChain {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleChain {
    /// An empty chain: comparisons are purely structural.
    pub fn new() -> Self {
        Self::default()
    }

    /// The full built-in rule set, in its canonical order: ignore-null,
    /// negate, regex, wildcard, ignore-extra-keys, nested-json,
    /// nested-html.
    pub fn standard() -> Self {
        Self::new()
            .ignoring_nulls()
            .negating()
            .matching_regexes()
            .matching_wildcards()
            .ignoring_extra_keys()
            .comparing_nested_json()
            .canonicalizing_html()
    }

    /// Append any rule implementation.
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Append a closure-backed rule that runs at every position.
    pub fn with_fn(
        self,
        name: impl Into<String>,
        transform: impl Fn(TreeValue, TreeValue, &str, &Normalizer<'_>) -> DiffResult<(TreeValue, TreeValue)>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.with_rule(FnRule::new(name, transform))
    }

    /// Append a closure-backed rule gated by `predicate`.
    pub fn with_fn_when(
        self,
        name: impl Into<String>,
        predicate: impl Fn(&TreeValue, &TreeValue, &str) -> bool + Send + Sync + 'static,
        transform: impl Fn(TreeValue, TreeValue, &str, &Normalizer<'_>) -> DiffResult<(TreeValue, TreeValue)>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.with_rule(FnRule::with_predicate(name, predicate, transform))
    }

    /// Null expectations match any actual value.
    pub fn ignoring_nulls(self) -> Self {
        self.with_rule(IgnoreNull::new())
    }

    /// [`Self::ignoring_nulls`] with a replacement predicate.
    pub fn ignoring_nulls_when(
        self,
        predicate: impl Fn(&TreeValue, &TreeValue, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.with_rule(IgnoreNull::with_predicate(predicate))
    }

    /// `!`-prefixed string expectations assert inequality.
    pub fn negating(self) -> Self {
        self.with_rule(Negate::new())
    }

    /// [`Self::negating`] with a replacement predicate.
    pub fn negating_when(
        self,
        predicate: impl Fn(&TreeValue, &TreeValue, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.with_rule(Negate::with_predicate(predicate))
    }

    /// `/pattern/` string expectations match by regex.
    pub fn matching_regexes(self) -> Self {
        self.with_rule(RegexMatch::new())
    }

    /// [`Self::matching_regexes`] with a replacement predicate.
    pub fn matching_regexes_when(
        self,
        predicate: impl Fn(&TreeValue, &TreeValue, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.with_rule(RegexMatch::with_predicate(predicate))
    }

    /// String expectations containing `*` match as wildcards.
    pub fn matching_wildcards(self) -> Self {
        self.with_rule(WildcardMatch::new())
    }

    /// [`Self::matching_wildcards`] with a replacement predicate.
    pub fn matching_wildcards_when(
        self,
        predicate: impl Fn(&TreeValue, &TreeValue, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.with_rule(WildcardMatch::with_predicate(predicate))
    }

    /// Actual-side object members missing from the expectation are dropped.
    pub fn ignoring_extra_keys(self) -> Self {
        self.with_rule(IgnoreExtraKeys::new())
    }

    /// [`Self::ignoring_extra_keys`] with a replacement predicate.
    pub fn ignoring_extra_keys_when(
        self,
        predicate: impl Fn(&TreeValue, &TreeValue, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.with_rule(IgnoreExtraKeys::with_predicate(predicate))
    }

    /// [`Self::ignoring_extra_keys`], but members for which `required`
    /// returns true are kept even when unexpected.
    pub fn ignoring_extra_keys_requiring(
        self,
        required: impl Fn(&str, &TreeValue) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.with_rule(IgnoreExtraKeys::with_required(required))
    }

    /// `.json`-suffixed string fields are compared structurally.
    pub fn comparing_nested_json(self) -> Self {
        self.with_rule(NestedJson::new())
    }

    /// [`Self::comparing_nested_json`] normalizing embedded documents with
    /// `chain` instead of the enclosing chain.
    pub fn comparing_nested_json_with(self, chain: RuleChain) -> Self {
        self.with_rule(NestedJson::with_chain(chain))
    }

    /// [`Self::comparing_nested_json`] with a replacement predicate.
    pub fn comparing_nested_json_when(
        self,
        predicate: impl Fn(&TreeValue, &TreeValue, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.with_rule(NestedJson::with_predicate(predicate))
    }

    /// `.html`/`.htm`-suffixed string fields are canonicalized before
    /// comparison.
    pub fn canonicalizing_html(self) -> Self {
        self.with_rule(NestedHtml::new())
    }

    /// [`Self::canonicalizing_html`] with a replacement predicate.
    pub fn canonicalizing_html_when(
        self,
        predicate: impl Fn(&TreeValue, &TreeValue, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.with_rule(NestedHtml::with_predicate(predicate))
    }

    /// Number of rules in the chain.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the chain has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every applicable rule over the pair, in order.
    pub(crate) fn apply_all(
        &self,
        mut expected: TreeValue,
        mut actual: TreeValue,
        field: &str,
        engine: &Normalizer<'_>,
    ) -> DiffResult<(TreeValue, TreeValue)> {
        for rule in &self.rules {
            if rule.applies(&expected, &actual, field) {
                trace!(rule = rule.name(), field, "applying rule");
                (expected, actual) = rule.apply(expected, actual, field, engine)?;
            }
        }
        Ok((expected, actual))
    }
}
