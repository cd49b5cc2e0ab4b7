//! Loosely typed request bodies.
//!
//! Clients send either JSON documents or HTML form fields, so values arrive as
//! arbitrary JSON (`"true"`, `true`, `0`, `null`, ...). The helpers here decide
//! what counts as supplied and how a value reads as text.

use serde_json::{Map, Value};

/// A request body: field name to raw value.
pub type Payload = Map<String, Value>;

/// Build a payload from form-encoded pairs. Later duplicates win.
pub fn from_pairs<I>(pairs: I) -> Payload
where
    I: IntoIterator<Item = (String, String)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}

/// Text of a value that must be truthy: `""`, `null`, `false` and `0` are not.
pub fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(render(other)),
    }
}

/// Text of a value supplied in an update; only `null` and `""` are skipped.
pub fn patch_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        other => Some(render(other)),
    }
}

/// Coerce the `open` flag: `true` or the literal `"true"`, anything else is false.
pub fn open_flag(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(s) => s == "true",
        _ => false,
    }
}

/// JSON type a text field was supplied as.
///
/// Fields are stored as text, but list filters compare numbers and booleans
/// numerically, so the original type is kept alongside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueKind {
    #[default]
    Text,
    Number,
    Bool,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Bool,
            _ => ValueKind::Text,
        }
    }
}

/// Numeric reading of a filter string: blank is zero, non-numbers are `None`.
pub fn loose_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    match trimmed {
        "" => Some(0.0),
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        // Rust also accepts "inf" and "NaN", which are not numbers here
        _ if trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')) =>
        {
            trimmed.parse().ok()
        }
        _ => None,
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), number_text),
        other => other.to_string(),
    }
}

/// Integral values print without a fraction (`1.0` reads `1`, `1e2` reads `100`).
fn number_text(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthy_text_follows_falsy_rules() {
        assert_eq!(truthy_text(&json!("")), None);
        assert_eq!(truthy_text(&json!(null)), None);
        assert_eq!(truthy_text(&json!(false)), None);
        assert_eq!(truthy_text(&json!(0)), None);
        assert_eq!(truthy_text(&json!("x")).as_deref(), Some("x"));
        assert_eq!(truthy_text(&json!(42)).as_deref(), Some("42"));
        assert_eq!(truthy_text(&json!(true)).as_deref(), Some("true"));
    }

    #[test]
    fn test_patch_text_keeps_falsy_non_empty_values() {
        assert_eq!(patch_text(&json!("")), None);
        assert_eq!(patch_text(&json!(null)), None);
        assert_eq!(patch_text(&json!(false)).as_deref(), Some("false"));
        assert_eq!(patch_text(&json!(0)).as_deref(), Some("0"));
    }

    #[test]
    fn test_numbers_render_without_trailing_fraction() {
        assert_eq!(truthy_text(&json!(1.0)).as_deref(), Some("1"));
        assert_eq!(truthy_text(&json!(1e2)).as_deref(), Some("100"));
        assert_eq!(truthy_text(&json!(-3)).as_deref(), Some("-3"));
        assert_eq!(truthy_text(&json!(2.5)).as_deref(), Some("2.5"));
        assert_eq!(patch_text(&json!(-0.0)).as_deref(), Some("0"));
    }

    #[test]
    fn test_loose_number() {
        assert_eq!(loose_number("42"), Some(42.0));
        assert_eq!(loose_number(" 1.0 "), Some(1.0));
        assert_eq!(loose_number("1e2"), Some(100.0));
        assert_eq!(loose_number(""), Some(0.0));
        assert_eq!(loose_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(loose_number("abc"), None);
        assert_eq!(loose_number("inf"), None);
        assert_eq!(loose_number("NaN"), None);
        assert_eq!(loose_number("1-2"), None);
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(ValueKind::of(&json!(1)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::Bool);
        assert_eq!(ValueKind::of(&json!("1")), ValueKind::Text);
    }

    #[test]
    fn test_open_flag_coercion() {
        assert!(open_flag(&json!(true)));
        assert!(open_flag(&json!("true")));
        assert!(!open_flag(&json!(false)));
        assert!(!open_flag(&json!("false")));
        assert!(!open_flag(&json!("")));
        assert!(!open_flag(&json!(1)));
    }

    #[test]
    fn test_from_pairs_last_value_wins() {
        let body = from_pairs(vec![
            ("open".to_string(), "true".to_string()),
            ("open".to_string(), "false".to_string()),
        ]);
        assert_eq!(body.get("open"), Some(&json!("false")));
    }
}
