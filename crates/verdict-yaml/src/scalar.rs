use verdict_tree::{Number, TreeValue};
use yaml_rust2::scanner::TScalarStyle;

/// Resolve a scalar's text to a typed value.
///
/// Only plain scalars go through schema resolution; quoted and block scalars
/// are always strings, so `'8'` survives as the text `8`.
pub fn resolve_scalar(text: &str, style: TScalarStyle) -> TreeValue {
    match style {
        TScalarStyle::Plain => resolve_plain(text),
        _ => TreeValue::String(text.to_string()),
    }
}

/// Resolve plain scalar text against the core schema.
///
/// Tried in order: null forms, booleans, integers, floats (including the
/// `.inf`/`.nan` spellings), then String as the fallback. Octal, hex,
/// sexagesimal, and underscore-separated numbers are not recognized and
/// stay strings.
pub fn resolve_plain(text: &str) -> TreeValue {
    if text.is_empty() || text == "~" || text.eq_ignore_ascii_case("null") {
        return TreeValue::Null;
    }
    if text.eq_ignore_ascii_case("true") {
        return TreeValue::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return TreeValue::Bool(false);
    }
    if is_integer_literal(text) {
        // Integers wider than i64 degrade to floats.
        return match text.parse::<i64>() {
            Ok(n) => TreeValue::Number(Number::Int(n)),
            Err(_) => match text.parse::<f64>() {
                Ok(x) => TreeValue::Number(Number::Float(x)),
                Err(_) => TreeValue::String(text.to_string()),
            },
        };
    }
    if is_float_literal(text) {
        if let Ok(x) = text.parse::<f64>() {
            return TreeValue::Number(Number::Float(x));
        }
    }
    if text.eq_ignore_ascii_case(".nan") {
        return TreeValue::Number(Number::Float(f64::NAN));
    }
    if text.eq_ignore_ascii_case(".inf") || text.eq_ignore_ascii_case("+.inf") {
        return TreeValue::Number(Number::Float(f64::INFINITY));
    }
    if text.eq_ignore_ascii_case("-.inf") {
        return TreeValue::Number(Number::Float(f64::NEG_INFINITY));
    }
    TreeValue::String(text.to_string())
}

/// Base-10 integer grammar: optional sign, then digits with no leading zero
/// (so `08` is not an integer and survives as a string).
fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    digits == "0" || !digits.starts_with('0')
}

/// Float grammar: digits plus at least one `.` or exponent marker, nothing
/// else. Keeps alphabetic spellings like `inf` out of `f64::from_str`.
fn is_float_literal(s: &str) -> bool {
    let mut saw_digit = false;
    let mut saw_marker = false;
    for c in s.chars() {
        match c {
            '0'..='9' => saw_digit = true,
            '.' | 'e' | 'E' => saw_marker = true,
            '+' | '-' => {}
            _ => return false,
        }
    }
    saw_digit && saw_marker
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_forms() {
        assert!(resolve_plain("").is_null());
        assert!(resolve_plain("~").is_null());
        assert!(resolve_plain("null").is_null());
        assert!(resolve_plain("Null").is_null());
        assert!(resolve_plain("NULL").is_null());
    }

    #[test]
    fn booleans() {
        assert_eq!(resolve_plain("true"), TreeValue::Bool(true));
        assert_eq!(resolve_plain("True"), TreeValue::Bool(true));
        assert_eq!(resolve_plain("false"), TreeValue::Bool(false));
        assert_eq!(resolve_plain("FALSE"), TreeValue::Bool(false));
    }

    #[test]
    fn integers() {
        assert_eq!(resolve_plain("0"), TreeValue::from(0i64));
        assert_eq!(resolve_plain("42"), TreeValue::from(42i64));
        assert_eq!(resolve_plain("-17"), TreeValue::from(-17i64));
        assert_eq!(resolve_plain("+5"), TreeValue::from(5i64));
    }

    #[test]
    fn leading_zero_is_a_string() {
        assert_eq!(resolve_plain("08"), TreeValue::from("08"));
        assert_eq!(resolve_plain("007"), TreeValue::from("007"));
        assert_eq!(resolve_plain("-01"), TreeValue::from("-01"));
    }

    #[test]
    fn floats() {
        assert_eq!(resolve_plain("1.0"), TreeValue::from(1.0));
        assert_eq!(resolve_plain("-2.5"), TreeValue::from(-2.5));
        assert_eq!(resolve_plain(".5"), TreeValue::from(0.5));
        assert_eq!(resolve_plain("1e3"), TreeValue::from(1000.0));
        assert_eq!(resolve_plain("3.14E-2"), TreeValue::from(0.0314));
    }

    #[test]
    fn non_finite_floats() {
        assert_eq!(resolve_plain(".inf"), TreeValue::from(f64::INFINITY));
        assert_eq!(resolve_plain("+.Inf"), TreeValue::from(f64::INFINITY));
        assert_eq!(resolve_plain("-.INF"), TreeValue::from(f64::NEG_INFINITY));
        assert_eq!(resolve_plain("-.iNf"), TreeValue::from(f64::NEG_INFINITY));
        assert_eq!(resolve_plain(".nan"), TreeValue::from(f64::NAN));
        assert_eq!(resolve_plain(".NaN"), TreeValue::from(f64::NAN));
    }

    #[test]
    fn unrecognized_numeric_shapes_stay_strings() {
        assert_eq!(resolve_plain("0x1A"), TreeValue::from("0x1A"));
        assert_eq!(resolve_plain("1_000"), TreeValue::from("1_000"));
        assert_eq!(resolve_plain("1.2.3"), TreeValue::from("1.2.3"));
        assert_eq!(resolve_plain("inf"), TreeValue::from("inf"));
        assert_eq!(resolve_plain("nan"), TreeValue::from("nan"));
    }

    #[test]
    fn oversized_integers_degrade_to_floats() {
        let resolved = resolve_plain("99999999999999999999");
        assert_eq!(resolved, TreeValue::from(1e20));
    }

    #[test]
    fn quoted_scalars_stay_strings() {
        assert_eq!(
            resolve_scalar("8", TScalarStyle::SingleQuoted),
            TreeValue::from("8")
        );
        assert_eq!(
            resolve_scalar("true", TScalarStyle::DoubleQuoted),
            TreeValue::from("true")
        );
        assert_eq!(
            resolve_scalar("null", TScalarStyle::Literal),
            TreeValue::from("null")
        );
        assert_eq!(resolve_scalar("8", TScalarStyle::Plain), TreeValue::from(8i64));
    }
}
