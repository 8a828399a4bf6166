//! Lenient field decoders.
//!
//! The backend serializes database decimals as strings and is inconsistent about
//! scalar types, so numeric and flag columns accept either representation.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Number or numeric string → `f64`. `null`, empty strings and garbage become `None`.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(as_f64))
}

/// Number or numeric string → `u32`.
pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(as_f64)
        .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v <= u32::MAX as f64)
        .map(|v| v as u32))
}

/// Any scalar → its text form. Arrays and objects are kept as JSON text.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "lenient_f64")]
        amount: Option<f64>,
        #[serde(default, deserialize_with = "lenient_u32")]
        year: Option<u32>,
        #[serde(default, deserialize_with = "lenient_string")]
        flag: Option<String>,
    }

    fn row(json: &str) -> Row {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn numbers_and_numeric_strings() {
        let r = row(r#"{"amount":"2500.50","year":3,"flag":"YES"}"#);
        assert_eq!(r.amount, Some(2500.5));
        assert_eq!(r.year, Some(3));
        assert_eq!(r.flag.as_deref(), Some("YES"));
    }

    #[test]
    fn garbage_and_missing_become_none() {
        let r = row(r#"{"amount":"n/a","year":2.5}"#);
        assert_eq!(r.amount, None);
        assert_eq!(r.year, None);
        assert_eq!(r.flag, None);

        let r = row(r#"{"amount":null,"year":"-1","flag":null}"#);
        assert_eq!(r.amount, None);
        assert_eq!(r.year, None);
        assert_eq!(r.flag, None);
    }

    #[test]
    fn non_string_flags_keep_their_text() {
        assert_eq!(row(r#"{"flag":false}"#).flag.as_deref(), Some("false"));
        assert_eq!(row(r#"{"flag":1}"#).flag.as_deref(), Some("1"));
    }
}
