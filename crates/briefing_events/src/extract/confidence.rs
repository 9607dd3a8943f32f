use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use super::{EventPayload, Extracted};
use crate::config::AssemblerConfig;

fn percent_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(\d{1,3}(?:\.\d+)?)\s*%\s*confiden").expect("static confidence pattern")
    })
}

/// Scales whole-number percentages down and clamps into `[0, 1]`.
///
/// Values already within `[0, 1]` are used as is.
pub(crate) fn normalize_confidence(value: f64) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    let scaled = if value > 1.0 { value / 100.0 } else { value };
    Some(scaled.clamp(0.0, 1.0))
}

/// Numeric `confidence`, also accepting numeric strings such as `"85%"`.
pub(crate) fn json_confidence(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    normalize_confidence(number)
}

/// JSON field, then an `NN% confidence` phrase, then the tool-call or plain default.
pub fn confidence(payload: &EventPayload<'_>, config: &AssemblerConfig) -> Extracted<f64> {
    if let Some(found) = payload.field("confidence").and_then(json_confidence) {
        return Extracted::Found(found);
    }

    let from_text = percent_pattern()
        .captures(payload.text())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|pct| pct.is_finite())
        .map(|pct| (pct / 100.0).clamp(0.0, 1.0));
    if let Some(found) = from_text {
        return Extracted::Found(found);
    }

    let default = if payload.tool_call().is_some() {
        config.tool_call_confidence
    } else {
        config.default_confidence
    };
    Extracted::Fallback(normalize_confidence(default).unwrap_or(0.0))
}
