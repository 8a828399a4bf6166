//! `document_url` normalization.
//!
//! The backend returns the uploaded document list as a JSON array, as a bare path,
//! as a JSON-encoded array inside a string, or not at all. The shape is decoded once
//! into [`DocumentRefs`] and flattened into an ordered `Vec<String>`; nothing past
//! this module sees the ambiguous form.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The shapes `document_url` arrives in, after one decode step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentRefs {
    Absent,
    Single(String),
    Many(Vec<String>),
}

impl DocumentRefs {
    /// Classifies an arbitrary JSON value. Never fails.
    pub fn decode(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self::Many(items.iter().map(element_text).collect()),
            Value::String(s) => decode_string(s),
            _ => Self::Absent,
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::Absent => Vec::new(),
            Self::Single(s) => vec![s],
            Self::Many(v) => v,
        }
    }
}

/// Canonical ordered document list for any `document_url` value.
///
/// - `null` / non-string scalars / objects → `[]`
/// - arrays → passed through in order
/// - strings that trim to `[...]` → parsed as a JSON list, or `[original]` if that fails
/// - any other string → `[string]`
pub fn normalize_document_urls(value: &Value) -> Vec<String> {
    DocumentRefs::decode(value).into_vec()
}

/// `deserialize_with` adapter so models hold the canonical list directly.
pub fn deserialize_document_urls<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(normalize_document_urls).unwrap_or_default())
}

fn decode_string(raw: &str) -> DocumentRefs {
    let trimmed = raw.trim();
    if !(trimmed.starts_with('[') && trimmed.ends_with(']')) {
        return DocumentRefs::Single(raw.to_string());
    }

    match serde_json::from_str::<Vec<Value>>(trimmed) {
        Ok(items) => DocumentRefs::Many(items.iter().map(element_text).collect()),
        Err(e) => {
            log::warn!("failed to parse document_url {:?}: {}", raw, e);
            DocumentRefs::Single(raw.to_string())
        }
    }
}

// Non-string list elements are kept as their JSON text rather than dropped.
fn element_text(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn samples() -> Vec<Value> {
        vec![
            Value::Null,
            json!([]),
            json!(["a", "b"]),
            json!("a"),
            json!("[\"a\",\"b\"]"),
            json!("not json"),
            json!(123),
        ]
    }

    #[test]
    fn concrete_cases() {
        assert_eq!(normalize_document_urls(&Value::Null), Vec::<String>::new());
        assert_eq!(normalize_document_urls(&json!("doc.pdf")), vec!["doc.pdf"]);
        assert_eq!(
            normalize_document_urls(&json!("[\"a.pdf\",\"b.pdf\"]")),
            vec!["a.pdf", "b.pdf"]
        );
        assert_eq!(normalize_document_urls(&json!("[broken")), vec!["[broken"]);
        assert_eq!(normalize_document_urls(&json!(123)), Vec::<String>::new());
        assert_eq!(normalize_document_urls(&json!({"a": 1})), Vec::<String>::new());
    }

    #[test]
    fn bracketed_but_invalid_json_falls_back_to_original() {
        assert_eq!(normalize_document_urls(&json!("[not, json]")), vec!["[not, json]"]);
        assert_eq!(normalize_document_urls(&json!("  [\"x\"]  ")), vec!["x"]);
    }

    #[test]
    fn arrays_pass_through_in_order() {
        assert_eq!(
            normalize_document_urls(&json!(["c", "a", "b"])),
            vec!["c", "a", "b"]
        );
        assert_eq!(normalize_document_urls(&json!(["a", 1])), vec!["a", "1"]);
    }

    #[test]
    fn normalization_is_idempotent() {
        for input in samples() {
            let once = normalize_document_urls(&input);
            let twice = normalize_document_urls(&json!(once));
            assert_eq!(once, twice, "input: {}", input);
        }
    }

    #[test]
    fn decode_exposes_the_tagged_shape() {
        assert_eq!(DocumentRefs::decode(&Value::Null), DocumentRefs::Absent);
        assert_eq!(
            DocumentRefs::decode(&json!("x.pdf")),
            DocumentRefs::Single("x.pdf".to_string())
        );
        assert_eq!(
            DocumentRefs::decode(&json!(["x.pdf"])),
            DocumentRefs::Many(vec!["x.pdf".to_string()])
        );
    }

    #[test]
    fn deserialize_adapter_handles_absent_field() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default, deserialize_with = "deserialize_document_urls")]
            document_url: Vec<String>,
        }

        let row: Row = serde_json::from_str("{}").unwrap();
        assert!(row.document_url.is_empty());
        let row: Row = serde_json::from_str(r#"{"document_url":null}"#).unwrap();
        assert!(row.document_url.is_empty());
        let row: Row = serde_json::from_str(r#"{"document_url":"up/a.pdf"}"#).unwrap();
        assert_eq!(row.document_url, vec!["up/a.pdf"]);
    }
}
