//! Value — string and numeric views of JSON values.
//!
//! Every place that turns a resolved field into text (filtering, sorting,
//! timestamp parsing, cell display) goes through [`string_form`] so the
//! same record always reads the same way.

use std::borrow::Cow;
use serde_json::{Number, Value};

/// Integral floats at or above this magnitude keep their float rendering.
const MAX_INTEGRAL_FLOAT: f64 = 1e15;

/// String form of an optional (possibly missing) value.
///
/// Missing and `null` become the empty string, strings are returned as-is,
/// numbers use their JSON text, and arrays/objects are rendered as compact
/// JSON.
pub fn string_form(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None => Cow::Borrowed(""),
        Some(value) => value_text(value),
    }
}

pub fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Number(n) => Cow::Owned(number_text(n)),
        Value::Object(_) | Value::Array(_) => {
            Cow::Owned(serde_json::to_string(value).unwrap_or_default())
        }
    }
}

/// JSON text of a number, with integral floats written without a fraction
/// (`1700000000000.0` reads as `1700000000000`).
pub fn number_text(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < MAX_INTEGRAL_FLOAT {
                return format!("{}", f as i64);
            }
        }
    }
    n.to_string()
}

/// Numeric view used by sorting: JSON numbers and strings that read as a
/// finite number. Blank strings, booleans and containers are not numeric.
pub fn numeric_value(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_form_scalars() {
        assert_eq!(string_form(None), "");
        assert_eq!(string_form(Some(&Value::Null)), "");
        assert_eq!(string_form(Some(&json!("abc"))), "abc");
        assert_eq!(string_form(Some(&json!(42))), "42");
        assert_eq!(string_form(Some(&json!(1.5))), "1.5");
        assert_eq!(string_form(Some(&json!(true))), "true");
        assert_eq!(string_form(Some(&json!(false))), "false");
    }

    #[test]
    fn test_string_form_containers_are_compact_json() {
        assert_eq!(string_form(Some(&json!(["a", 1]))), r#"["a",1]"#);
        assert_eq!(string_form(Some(&json!({"k": "v"}))), r#"{"k":"v"}"#);
    }

    #[test]
    fn test_integral_float_drops_fraction() {
        let value: Value = serde_json::from_str("1700000000000.0").unwrap();
        assert_eq!(string_form(Some(&value)), "1700000000000");

        let value: Value = serde_json::from_str("1700000000.25").unwrap();
        assert_eq!(string_form(Some(&value)), "1700000000.25");
    }

    #[test]
    fn test_numeric_value() {
        assert_eq!(numeric_value(Some(&json!(3))), Some(3.0));
        assert_eq!(numeric_value(Some(&json!("  2.5 "))), Some(2.5));
        assert_eq!(numeric_value(Some(&json!("-7"))), Some(-7.0));
        assert_eq!(numeric_value(Some(&json!(""))), None);
        assert_eq!(numeric_value(Some(&json!("abc"))), None);
        assert_eq!(numeric_value(Some(&json!("inf"))), None);
        assert_eq!(numeric_value(Some(&json!("NaN"))), None);
        assert_eq!(numeric_value(Some(&json!(true))), None);
        assert_eq!(numeric_value(Some(&json!([1]))), None);
        assert_eq!(numeric_value(None), None);
    }
}
