use serde_json::Value;

use super::{truncate_chars, EventPayload, Extracted};
use crate::briefing::Citation;

const EXCERPT_CHARS: usize = 200;
const SYNTHESIZED_ID: &str = "synthesized";

fn id_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn excerpt(payload: &EventPayload<'_>) -> String {
    match payload.str_field("summary") {
        Some(summary) => summary.to_string(),
        None => truncate_chars(payload.text().trim(), EXCERPT_CHARS).to_string(),
    }
}

/// Citations for the proof layer; the returned list is never empty.
pub fn citations(payload: &EventPayload<'_>) -> Extracted<Vec<Citation>> {
    let source = payload.agent().data_source();
    let mut out = Vec::new();

    if payload.json().is_some() {
        let record_id = payload
            .field("mtbs_id")
            .and_then(id_value)
            .or_else(|| payload.field("id").and_then(id_value));

        if let Some(id) = &record_id {
            out.push(Citation {
                source_type: source.source_type.to_string(),
                id: id.clone(),
                uri: None,
                excerpt: excerpt(payload),
            });
        }

        if let Some(named) = payload.str_field("source") {
            out.push(Citation {
                source_type: named.to_string(),
                id: record_id.unwrap_or_else(|| named.to_string()),
                uri: None,
                excerpt: excerpt(payload),
            });
        }
    }

    if out.is_empty() {
        return Extracted::Fallback(vec![Citation {
            source_type: source.source_type.to_string(),
            id: SYNTHESIZED_ID.to_string(),
            uri: None,
            excerpt: format!("Derived from {} data", source.label),
        }]);
    }
    Extracted::Found(out)
}
