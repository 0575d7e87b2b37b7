//! Lenient value coercion for spreadsheet-backed payloads
//!
//! Spreadsheet cells arrive as whatever type the sheet happened to hold:
//! ids as numbers or strings, prices as numbers, numeric strings, or blank
//! strings. These helpers normalise them at the serde boundary.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Text form of a cell. Strings are kept as is, numbers and booleans are
/// rendered, `null` and nested values yield `None`.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Numeric form of a price cell; anything non-numeric maps to `0.0`.
pub fn coerce_price(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// `deserialize_with` helper: any scalar as text, `null` as empty.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_text(&value).unwrap_or_default())
}

/// `deserialize_with` helper: coerced price.
pub fn price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_price(&value))
}

/// `deserialize_with` helper: envelope status as number or numeric string.
pub fn status<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let status = match &value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    status
        .and_then(|s| u16::try_from(s).ok())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid envelope status: {value}")))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn coerce_price_accepts_numbers_and_numeric_strings() {
        assert_eq!(coerce_price(&json!(1500000)), 1_500_000.0);
        assert_eq!(coerce_price(&json!(" 2500.5 ")), 2500.5);
    }

    #[test]
    fn coerce_price_maps_everything_else_to_zero() {
        for value in [json!(""), json!("TBD"), json!(null), json!(true), json!([1]), json!("NaN")] {
            assert_eq!(coerce_price(&value), 0.0, "value {value} should coerce to zero");
        }
    }

    #[test]
    fn value_text_renders_scalars() {
        assert_eq!(value_text(&json!(42)).as_deref(), Some("42"));
        assert_eq!(value_text(&json!("OPP-1")).as_deref(), Some("OPP-1"));
        assert_eq!(value_text(&json!(null)), None);
    }
}
