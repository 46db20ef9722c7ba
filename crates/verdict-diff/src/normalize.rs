use indexmap::IndexMap;
use verdict_tree::TreeValue;

use crate::chain::RuleChain;
use crate::error::DiffResult;

/// Recursive pairwise normalizer.
///
/// Walks expected and actual together, applying the rule chain at every
/// position before descending. The caller's inputs are never mutated;
/// both outputs are freshly built trees.
pub struct Normalizer<'a> {
    chain: &'a RuleChain,
}

impl<'a> Normalizer<'a> {
    pub fn new(chain: &'a RuleChain) -> Self {
        Self { chain }
    }

    /// The chain this normalizer applies.
    pub fn chain(&self) -> &RuleChain {
        self.chain
    }

    /// Normalize a pair of trees into directly comparable forms.
    pub fn normalize(
        &self,
        expected: &TreeValue,
        actual: &TreeValue,
    ) -> DiffResult<(TreeValue, TreeValue)> {
        self.normalize_value(expected.clone(), actual.clone(), "")
    }

    fn normalize_value(
        &self,
        expected: TreeValue,
        actual: TreeValue,
        field: &str,
    ) -> DiffResult<(TreeValue, TreeValue)> {
        let (expected, actual) = self.chain.apply_all(expected, actual, field, self)?;
        match (expected, actual) {
            (TreeValue::Object(expected_members), TreeValue::Object(actual_members)) => {
                self.normalize_objects(expected_members, actual_members)
            }
            (TreeValue::Array(expected_items), TreeValue::Array(actual_items)) => {
                self.normalize_arrays(expected_items, actual_items)
            }
            pair => Ok(pair),
        }
    }

    /// Shared keys are normalized pairwise under their key name, in the
    /// expected object's order. Expected-only members follow on the
    /// expected side; actual-only members are appended to the actual side
    /// in their original relative order. Either kind of leftover is a
    /// guaranteed diff.
    fn normalize_objects(
        &self,
        expected: IndexMap<String, TreeValue>,
        mut actual: IndexMap<String, TreeValue>,
    ) -> DiffResult<(TreeValue, TreeValue)> {
        let mut expected_out = IndexMap::with_capacity(expected.len());
        let mut actual_out = IndexMap::with_capacity(actual.len());
        for (key, expected_value) in expected {
            match actual.shift_remove(&key) {
                Some(actual_value) => {
                    let (e, a) = self.normalize_value(expected_value, actual_value, &key)?;
                    actual_out.insert(key.clone(), a);
                    expected_out.insert(key, e);
                }
                None => {
                    expected_out.insert(key, expected_value);
                }
            }
        }
        actual_out.extend(actual);
        Ok((
            TreeValue::Object(expected_out),
            TreeValue::Object(actual_out),
        ))
    }

    /// Elements at shared indices are normalized pairwise with an empty
    /// field name. Trailing elements of the longer side are carried
    /// through untouched; rules never see them.
    fn normalize_arrays(
        &self,
        mut expected: Vec<TreeValue>,
        mut actual: Vec<TreeValue>,
    ) -> DiffResult<(TreeValue, TreeValue)> {
        let shared = expected.len().min(actual.len());
        for index in 0..shared {
            let expected_item = std::mem::take(&mut expected[index]);
            let actual_item = std::mem::take(&mut actual[index]);
            let (e, a) = self.normalize_value(expected_item, actual_item, "")?;
            expected[index] = e;
            actual[index] = a;
        }
        Ok((TreeValue::Array(expected), TreeValue::Array(actual)))
    }
}
