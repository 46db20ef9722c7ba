use verdict_tree::TreeValue;

use crate::error::DiffResult;
use crate::normalize::Normalizer;
use crate::rule::{Rule, RulePredicate};

/// Callback deciding whether an actual-only key must survive pruning.
pub type RequiredKeyFn = dyn Fn(&str, &TreeValue) -> bool + Send + Sync;

/// Drops actual-side object members that the expected side never names.
///
/// Lets an expectation describe just the fields it cares about while the
/// actual document carries more. A required-key callback can pin chosen
/// actual-only members so their absence from the expectation still shows
/// up in the diff.
#[derive(Default)]
pub struct IgnoreExtraKeys {
    predicate: Option<Box<RulePredicate>>,
    required: Option<Box<RequiredKeyFn>>,
}

impl IgnoreExtraKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default applicability predicate.
    pub fn with_predicate(
        predicate: impl Fn(&TreeValue, &TreeValue, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            predicate: Some(Box::new(predicate)),
            required: None,
        }
    }

    /// Keep actual-only keys for which `required` returns true.
    pub fn with_required(
        required: impl Fn(&str, &TreeValue) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            predicate: None,
            required: Some(Box::new(required)),
        }
    }

    fn is_required(&self, key: &str, value: &TreeValue) -> bool {
        self.required
            .as_ref()
            .is_some_and(|required| required(key, value))
    }
}

impl Rule for IgnoreExtraKeys {
    fn name(&self) -> &str {
        "ignore-extra-keys"
    }

    fn applies(&self, expected: &TreeValue, actual: &TreeValue, field: &str) -> bool {
        match &self.predicate {
            Some(predicate) => predicate(expected, actual, field),
            None => expected.is_object() && actual.is_object(),
        }
    }

    fn apply(
        &self,
        expected: TreeValue,
        actual: TreeValue,
        _field: &str,
        _engine: &Normalizer<'_>,
    ) -> DiffResult<(TreeValue, TreeValue)> {
        match (expected, actual) {
            (TreeValue::Object(expected_members), TreeValue::Object(mut actual_members)) => {
                actual_members.retain(|key, value| {
                    expected_members.contains_key(key) || self.is_required(key, value)
                });
                Ok((
                    TreeValue::Object(expected_members),
                    TreeValue::Object(actual_members),
                ))
            }
            pair => Ok(pair),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::RuleChain;
    use verdict_tree::TreeValue;

    fn run(rule: &IgnoreExtraKeys, expected: &str, actual: &str) -> (TreeValue, TreeValue) {
        let chain = RuleChain::new();
        let engine = Normalizer::new(&chain);
        rule.apply(
            TreeValue::from_json_str(expected).unwrap(),
            TreeValue::from_json_str(actual).unwrap(),
            "",
            &engine,
        )
        .unwrap()
    }

    #[test]
    fn extra_keys_are_dropped() {
        let rule = IgnoreExtraKeys::new();
        let (_, actual) = run(&rule, r#"{"a": 1}"#, r#"{"a": 1, "b": 2}"#);
        let members = actual.as_object().unwrap();
        assert!(members.contains_key("a"));
        assert!(!members.contains_key("b"));
    }

    #[test]
    fn shared_keys_survive_even_when_values_differ() {
        let rule = IgnoreExtraKeys::new();
        let (_, actual) = run(&rule, r#"{"a": 1}"#, r#"{"a": 99}"#);
        assert_eq!(actual.get("a"), Some(&TreeValue::from(99i64)));
    }

    #[test]
    fn required_callback_pins_actual_only_keys() {
        let rule = IgnoreExtraKeys::with_required(|key, _| key == "id");
        let (_, actual) = run(&rule, r#"{"a": 1}"#, r#"{"a": 1, "id": 7, "b": 2}"#);
        let members = actual.as_object().unwrap();
        assert!(members.contains_key("id"));
        assert!(!members.contains_key("b"));
    }

    #[test]
    fn required_callback_sees_the_value() {
        let rule = IgnoreExtraKeys::with_required(|_, value| !value.is_null());
        let (_, actual) = run(&rule, r#"{}"#, r#"{"keep": 1, "drop": null}"#);
        let members = actual.as_object().unwrap();
        assert!(members.contains_key("keep"));
        assert!(!members.contains_key("drop"));
    }

    #[test]
    fn non_objects_pass_through() {
        let rule = IgnoreExtraKeys::new();
        let chain = RuleChain::new();
        let engine = Normalizer::new(&chain);
        let (e, a) = rule
            .apply(TreeValue::from(1i64), TreeValue::from(2i64), "", &engine)
            .unwrap();
        assert_eq!(e, TreeValue::from(1i64));
        assert_eq!(a, TreeValue::from(2i64));
    }
}
