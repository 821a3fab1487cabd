//! Tolerant field decoding for provider output
//!
//! The provider is asked for a typed schema but routinely answers `98101`
//! for a postal code or `10.0` for a unit count. Values that can be read as
//! the field's type are converted; values that cannot are dropped, leaving
//! the field `None`. A single off-type value never fails the enclosing
//! record.
//!
//! Each helper is meant for `#[serde(deserialize_with = "...")]` on an
//! `Option` field of a struct that is itself `#[serde(default)]`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Largest magnitude an `f64` holds exactly as an integer
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Text field: strings as-is, numbers and booleans rendered as text
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(number_text(&n)),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Count field: integers, whole-number floats, and numeric strings
pub fn whole<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_f64)),
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(whole_f64),
        _ => None,
    })
}

/// Money field: numbers, and strings like `"$1,250.00"`
pub fn amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_start_matches('$').replace(',', "").parse().ok(),
        _ => None,
    };
    Ok(parsed.filter(|value: &f64| value.is_finite()))
}

/// Any other field: the value if it decodes as `T`, otherwise `None`
pub fn value<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

/// List field: entries that decode as `T`, in order; the rest are skipped
pub fn entries<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

fn whole_f64(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.abs() < EXACT_INTEGER_LIMIT).then_some(value as i64)
}

/// `98101` and `98101.0` both render as `"98101"`
fn number_text(n: &Number) -> String {
    match n.as_f64().filter(|_| n.is_f64()).and_then(whole_f64) {
        Some(whole) => whole.to_string(),
        None => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Fields {
        #[serde(deserialize_with = "text")]
        code: Option<String>,
        #[serde(deserialize_with = "whole")]
        count: Option<i64>,
        #[serde(deserialize_with = "amount")]
        fee: Option<f64>,
    }

    fn decode(json: &str) -> Fields {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_text_accepts_numbers() {
        assert_eq!(decode(r#"{"code": 98101}"#).code.as_deref(), Some("98101"));
        assert_eq!(decode(r#"{"code": 98101.0}"#).code.as_deref(), Some("98101"));
        assert_eq!(decode(r#"{"code": "02134"}"#).code.as_deref(), Some("02134"));
        assert_eq!(decode(r#"{"code": [1]}"#).code, None);
    }

    #[test]
    fn test_whole_accepts_integral_floats_and_strings() {
        assert_eq!(decode(r#"{"count": 10}"#).count, Some(10));
        assert_eq!(decode(r#"{"count": 10.0}"#).count, Some(10));
        assert_eq!(decode(r#"{"count": " 12 "}"#).count, Some(12));
        assert_eq!(decode(r#"{"count": 10.5}"#).count, None);
        assert_eq!(decode(r#"{"count": "many"}"#).count, None);
    }

    #[test]
    fn test_amount_strips_currency_formatting() {
        assert_eq!(decode(r#"{"fee": 12}"#).fee, Some(12.0));
        assert_eq!(decode(r#"{"fee": "$1,250.50"}"#).fee, Some(1250.5));
        assert_eq!(decode(r#"{"fee": "call us"}"#).fee, None);
    }

    #[test]
    fn test_null_and_missing_are_none() {
        let fields = decode(r#"{"code": null, "count": null}"#);
        assert!(fields.code.is_none());
        assert!(fields.count.is_none());
        assert!(fields.fee.is_none());
    }
}
