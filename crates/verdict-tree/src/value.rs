use std::fmt;

use indexmap::IndexMap;

use crate::error::{TreeError, TreeResult};

/// A numeric scalar.
///
/// Integer and float values are kept apart: `Int(1)` and `Float(1.0)` never
/// compare equal even though they are numerically identical, so a document
/// that says `1` is distinguishable from one that says `1.0`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// The value widened to `f64`.
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(n) => *n as f64,
            Number::Float(x) => *x,
        }
    }

    /// The value as `i64`, if it is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int(n) => Some(*n),
            Number::Float(_) => None,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            // NaN is treated as equal to itself so trees containing NaN
            // still compare reflexively.
            (Number::Float(a), Number::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => false,
        }
    }
}

/// Integers render as plain decimals. Floats keep a fractional or exponent
/// marker (`1.0`, `1e100`) so they stay distinguishable from integers;
/// non-finite values render as `NaN`, `Infinity`, `-Infinity`.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::Float(x) if x.is_nan() => f.write_str("NaN"),
            Number::Float(x) if x.is_infinite() => {
                f.write_str(if *x > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Number::Float(x) => write!(f, "{x:?}"),
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Int(n)
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Self {
        Number::Float(x)
    }
}

/// A document tree.
///
/// `Object` preserves the order in which members first appeared in the
/// source, and that order is significant: two objects with the same members
/// in a different order are different trees.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TreeValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<TreeValue>),
    Object(IndexMap<String, TreeValue>),
}

impl TreeValue {
    /// Parse a JSON document into a tree. Object member order is preserved.
    pub fn from_json_str(input: &str) -> TreeResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        Ok(Self::from_json(value))
    }

    /// Convert an already-parsed JSON value into a tree.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => TreeValue::Null,
            serde_json::Value::Bool(b) => TreeValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => TreeValue::Number(Number::Int(i)),
                None => TreeValue::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            serde_json::Value::String(s) => TreeValue::String(s),
            serde_json::Value::Array(items) => {
                TreeValue::Array(items.into_iter().map(Self::from_json).collect())
            }
            serde_json::Value::Object(members) => TreeValue::Object(
                members
                    .into_iter()
                    .map(|(key, val)| (key, Self::from_json(val)))
                    .collect(),
            ),
        }
    }

    /// The variant name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            TreeValue::Null => "null",
            TreeValue::Bool(_) => "bool",
            TreeValue::Number(_) => "number",
            TreeValue::String(_) => "string",
            TreeValue::Array(_) => "array",
            TreeValue::Object(_) => "object",
        }
    }

    fn mismatch(&self, expected: &'static str) -> TreeError {
        TreeError::TypeMismatch {
            expected,
            actual: self.kind(),
        }
    }

    /// Returns `true` if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, TreeValue::Null)
    }

    /// Returns `true` if this is a string.
    pub fn is_string(&self) -> bool {
        matches!(self, TreeValue::String(_))
    }

    /// Returns `true` if this is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, TreeValue::Object(_))
    }

    /// Returns `true` if this is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, TreeValue::Array(_))
    }

    /// The boolean value. Fails with [`TreeError::TypeMismatch`] on any
    /// other variant, as do the rest of the narrowing accessors.
    pub fn as_bool(&self) -> TreeResult<bool> {
        match self {
            TreeValue::Bool(b) => Ok(*b),
            other => Err(other.mismatch("bool")),
        }
    }

    /// The numeric value.
    pub fn as_number(&self) -> TreeResult<Number> {
        match self {
            TreeValue::Number(n) => Ok(*n),
            other => Err(other.mismatch("number")),
        }
    }

    /// The string slice.
    pub fn as_str(&self) -> TreeResult<&str> {
        match self {
            TreeValue::String(s) => Ok(s),
            other => Err(other.mismatch("string")),
        }
    }

    /// The element list.
    pub fn as_array(&self) -> TreeResult<&[TreeValue]> {
        match self {
            TreeValue::Array(items) => Ok(items),
            other => Err(other.mismatch("array")),
        }
    }

    /// The member map.
    pub fn as_object(&self) -> TreeResult<&IndexMap<String, TreeValue>> {
        match self {
            TreeValue::Object(members) => Ok(members),
            other => Err(other.mismatch("object")),
        }
    }

    /// Mutable access to the member map.
    pub fn as_object_mut(&mut self) -> TreeResult<&mut IndexMap<String, TreeValue>> {
        match self {
            TreeValue::Object(members) => Ok(members),
            other => Err(other.mismatch("object")),
        }
    }

    /// Look up an object member by key. `None` for missing members and for
    /// non-object values.
    pub fn get(&self, key: &str) -> Option<&TreeValue> {
        match self {
            TreeValue::Object(members) => members.get(key),
            _ => None,
        }
    }
}

impl From<bool> for TreeValue {
    fn from(b: bool) -> Self {
        TreeValue::Bool(b)
    }
}

impl From<i64> for TreeValue {
    fn from(n: i64) -> Self {
        TreeValue::Number(Number::Int(n))
    }
}

impl From<f64> for TreeValue {
    fn from(x: f64) -> Self {
        TreeValue::Number(Number::Float(x))
    }
}

impl From<Number> for TreeValue {
    fn from(n: Number) -> Self {
        TreeValue::Number(n)
    }
}

impl From<&str> for TreeValue {
    fn from(s: &str) -> Self {
        TreeValue::String(s.to_string())
    }
}

impl From<String> for TreeValue {
    fn from(s: String) -> Self {
        TreeValue::String(s)
    }
}

impl From<Vec<TreeValue>> for TreeValue {
    fn from(items: Vec<TreeValue>) -> Self {
        TreeValue::Array(items)
    }
}

impl From<IndexMap<String, TreeValue>> for TreeValue {
    fn from(members: IndexMap<String, TreeValue>) -> Self {
        TreeValue::Object(members)
    }
}

impl From<serde_json::Value> for TreeValue {
    fn from(value: serde_json::Value) -> Self {
        TreeValue::from_json(value)
    }
}

/// Non-finite floats have no JSON form and become `Null`, matching
/// serde_json's own `From<f64>` conversion.
impl From<TreeValue> for serde_json::Value {
    fn from(value: TreeValue) -> Self {
        match value {
            TreeValue::Null => serde_json::Value::Null,
            TreeValue::Bool(b) => serde_json::Value::Bool(b),
            TreeValue::Number(Number::Int(n)) => serde_json::Value::from(n),
            TreeValue::Number(Number::Float(x)) => serde_json::Value::from(x),
            TreeValue::String(s) => serde_json::Value::String(s),
            TreeValue::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            TreeValue::Object(members) => serde_json::Value::Object(
                members
                    .into_iter()
                    .map(|(key, val)| (key, serde_json::Value::from(val)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn int_and_float_are_distinct() {
        assert_ne!(TreeValue::from(1i64), TreeValue::from(1.0));
        assert_eq!(TreeValue::from(1i64), TreeValue::from(1i64));
        assert_eq!(TreeValue::from(1.5), TreeValue::from(1.5));
    }

    #[test]
    fn nan_compares_equal_to_itself() {
        let a = TreeValue::from(f64::NAN);
        let b = TreeValue::from(f64::NAN);
        assert_eq!(a, b);
    }

    #[test]
    fn number_display() {
        assert_eq!(Number::Int(42).to_string(), "42");
        assert_eq!(Number::Int(-7).to_string(), "-7");
        assert_eq!(Number::Float(1.0).to_string(), "1.0");
        assert_eq!(Number::Float(0.5).to_string(), "0.5");
        assert_eq!(Number::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(Number::Float(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Number::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn json_parsing_preserves_member_order() {
        let tree = TreeValue::from_json_str(r#"{"zebra": 1, "apple": 2, "mango": 3}"#).unwrap();
        let keys: Vec<&str> = tree.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn json_parsing_builds_nested_trees() {
        let tree = TreeValue::from_json_str(r#"{"a": [1, 2.5, "x", null, true]}"#).unwrap();
        let items = tree.get("a").unwrap().as_array().unwrap();
        assert_eq!(items[0], TreeValue::from(1i64));
        assert_eq!(items[1], TreeValue::from(2.5));
        assert_eq!(items[2], TreeValue::from("x"));
        assert!(items[3].is_null());
        assert_eq!(items[4], TreeValue::from(true));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(TreeValue::from_json_str("{not json").is_err());
        assert!(TreeValue::from_json_str("").is_err());
    }

    #[test]
    fn default_is_null() {
        assert!(TreeValue::default().is_null());
    }

    #[test]
    fn wrong_variant_reports_both_kinds() {
        let s = TreeValue::from("text");
        let err = s.as_object().unwrap_err();
        assert!(
            matches!(err, TreeError::TypeMismatch { expected: "object", actual: "string" }),
            "unexpected error: {err:?}"
        );
        assert_eq!(err.to_string(), "type mismatch: expected object, got string");
        assert!(s.as_bool().is_err());
        assert!(s.as_number().is_err());
        assert!(s.as_array().is_err());
        assert_eq!(s.as_str().unwrap(), "text");
    }

    #[test]
    fn json_value_roundtrip_keeps_numeric_kind() {
        let tree = TreeValue::from(serde_json::json!({"n": 1, "x": 1.0, "s": "1"}));
        let json = serde_json::Value::from(tree.clone());
        assert_eq!(TreeValue::from(json), tree);
        assert_eq!(
            tree.get("n").unwrap().as_number().unwrap(),
            Number::Int(1)
        );
        assert_eq!(
            tree.get("x").unwrap().as_number().unwrap(),
            Number::Float(1.0)
        );
    }

    proptest! {
        #[test]
        fn json_integer_roundtrip(n: i64) {
            let tree = TreeValue::from_json_str(&n.to_string()).unwrap();
            prop_assert_eq!(tree, TreeValue::from(n));
        }

        #[test]
        fn float_display_roundtrip(x: f64) {
            prop_assume!(x.is_finite());
            let shown = Number::Float(x).to_string();
            let parsed: f64 = shown.parse().unwrap();
            prop_assert_eq!(parsed, x);
        }
    }
}
