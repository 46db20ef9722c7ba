use indexmap::IndexMap;
use verdict_tree::TreeValue;

/// Render a tree as canonical text.
///
/// Structurally identical trees produce byte-identical output regardless of
/// origin. Scalars render on one line: `null`, `true`/`false`, numbers via
/// their display form, strings double-quoted with only `\` and `"` escaped.
/// A string containing newlines therefore spans several output lines, which
/// lets rewritten nested documents diff line by line. Containers open and
/// close on their own lines with two-space indentation; null-valued object
/// members are omitted entirely.
pub fn to_text(value: &TreeValue) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &TreeValue, depth: usize) {
    match value {
        TreeValue::Null => out.push_str("null"),
        TreeValue::Bool(true) => out.push_str("true"),
        TreeValue::Bool(false) => out.push_str("false"),
        TreeValue::Number(number) => out.push_str(&number.to_string()),
        TreeValue::String(text) => write_quoted(out, text),
        TreeValue::Array(items) => write_array(out, items, depth),
        TreeValue::Object(members) => write_object(out, members, depth),
    }
}

fn write_array(out: &mut String, items: &[TreeValue], depth: usize) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push_str("[\n");
    for (index, item) in items.iter().enumerate() {
        write_indent(out, depth + 1);
        write_value(out, item, depth + 1);
        if index + 1 < items.len() {
            out.push(',');
        }
        out.push('\n');
    }
    write_indent(out, depth);
    out.push(']');
}

fn write_object(out: &mut String, members: &IndexMap<String, TreeValue>, depth: usize) {
    let visible: Vec<(&String, &TreeValue)> = members
        .iter()
        .filter(|(_, value)| !value.is_null())
        .collect();
    if visible.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{\n");
    for (index, (key, value)) in visible.iter().enumerate() {
        write_indent(out, depth + 1);
        write_quoted(out, key);
        out.push_str(": ");
        write_value(out, value, depth + 1);
        if index + 1 < visible.len() {
            out.push(',');
        }
        out.push('\n');
    }
    write_indent(out, depth);
    out.push('}');
}

fn write_quoted(out: &mut String, text: &str) {
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out.push('"');
}

fn write_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(json: &str) -> TreeValue {
        TreeValue::from_json_str(json).unwrap()
    }

    #[test]
    fn scalars() {
        assert_eq!(to_text(&TreeValue::Null), "null");
        assert_eq!(to_text(&TreeValue::from(true)), "true");
        assert_eq!(to_text(&TreeValue::from(42i64)), "42");
        assert_eq!(to_text(&TreeValue::from(1.0)), "1.0");
        assert_eq!(to_text(&TreeValue::from("hi")), "\"hi\"");
    }

    #[test]
    fn string_and_number_render_differently() {
        assert_ne!(
            to_text(&TreeValue::from("123")),
            to_text(&TreeValue::from(123i64))
        );
    }

    #[test]
    fn object_layout() {
        let text = to_text(&tree(r#"{"a": 1, "b": [2, 3]}"#));
        let expected = "{\n  \"a\": 1,\n  \"b\": [\n    2,\n    3\n  ]\n}";
        assert_eq!(text, expected);
    }

    #[test]
    fn null_members_are_omitted() {
        let text = to_text(&tree(r#"{"a": null, "b": 1}"#));
        assert_eq!(text, "{\n  \"b\": 1\n}");
        assert_eq!(to_text(&tree(r#"{"a": null}"#)), "{}");
    }

    #[test]
    fn null_array_elements_still_render() {
        let text = to_text(&tree(r#"[null]"#));
        assert_eq!(text, "[\n  null\n]");
    }

    #[test]
    fn empty_containers() {
        assert_eq!(to_text(&tree("[]")), "[]");
        assert_eq!(to_text(&tree("{}")), "{}");
    }

    #[test]
    fn key_order_is_preserved() {
        let text = to_text(&tree(r#"{"z": 1, "a": 2}"#));
        assert!(text.find("\"z\"").unwrap() < text.find("\"a\"").unwrap());
    }

    #[test]
    fn only_backslash_and_quote_are_escaped() {
        let value = TreeValue::from("a\\b\"c\nd");
        assert_eq!(to_text(&value), "\"a\\\\b\\\"c\nd\"");
    }

    #[test]
    fn identical_trees_render_identically() {
        let a = tree(r#"{"x": [1, {"y": "z"}]}"#);
        let b = tree(r#"{"x": [1, {"y": "z"}]}"#);
        assert_eq!(to_text(&a), to_text(&b));
    }
}
