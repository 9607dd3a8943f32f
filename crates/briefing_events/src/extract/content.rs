use serde_json::Value;

use super::confidence::json_confidence;
use super::{sentences, truncate_chars, EventPayload, Extracted};
use crate::agent::SourceAgent;
use crate::briefing::Action;
use crate::config::AssemblerConfig;

pub fn summary(payload: &EventPayload<'_>, config: &AssemblerConfig) -> Extracted<String> {
    if let Some(summary) = payload.str_field("summary") {
        return Extracted::Found(summary.to_string());
    }

    let graded = payload.str_field("severity").zip(
        payload.field("confidence").and_then(json_confidence),
    );
    if let Some((severity, confidence)) = graded {
        return Extracted::Found(format!(
            "Severity: {} ({:.0}% confidence)",
            severity.to_uppercase(),
            confidence * 100.0
        ));
    }

    let text = payload.text().trim();
    if let Some(first) = sentences(text).next() {
        if config.summary_sentence.contains(first) {
            return Extracted::Found(first.to_string());
        }
    }

    if text.is_empty() {
        let fallback = match payload.tool_call() {
            Some(call) if !call.name.is_empty() => format!("Requested {}", call.name),
            _ => format!("Update from {}", payload.agent()),
        };
        return Extracted::Fallback(fallback);
    }
    let cut = truncate_chars(text, config.summary_truncate_chars);
    if cut.len() < text.len() {
        Extracted::Fallback(format!("{cut}..."))
    } else {
        Extracted::Fallback(cut.to_string())
    }
}

/// JSON `detail`, else the raw text.
pub fn detail(payload: &EventPayload<'_>) -> Extracted<String> {
    match payload.str_field("detail") {
        Some(detail) => Extracted::Found(detail.to_string()),
        None => Extracted::Fallback(payload.text().trim().to_string()),
    }
}

fn action_from_value(value: &Value, fallback_id: String) -> Option<Action> {
    match value {
        Value::String(label) if !label.trim().is_empty() => Some(Action {
            action_id: fallback_id,
            label: label.trim().to_string(),
            target_agent: None,
            description: None,
        }),
        Value::Object(map) => {
            let text = |key: &str| {
                map.get(key)
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
            };
            let label = text("label").or_else(|| text("action")).or_else(|| text("title"))?;
            Some(Action {
                action_id: text("action_id")
                    .or_else(|| text("id"))
                    .map(str::to_string)
                    .unwrap_or(fallback_id),
                label: label.to_string(),
                target_agent: text("target_agent")
                    .or_else(|| text("agent"))
                    .map(SourceAgent::normalize),
                description: text("description").map(str::to_string),
            })
        }
        _ => None,
    }
}

/// Actions listed under `suggested_actions`, followed by one for the tool call.
pub fn suggested_actions(payload: &EventPayload<'_>) -> Extracted<Vec<Action>> {
    let event_id = payload.raw().id().unwrap_or_default();
    let mut out: Vec<Action> = payload
        .field("suggested_actions")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .enumerate()
                .filter_map(|(idx, item)| {
                    action_from_value(item, format!("{event_id}-action-{}", idx + 1))
                })
                .collect()
        })
        .unwrap_or_default();

    if let Some(call) = payload.tool_call() {
        let description = (!call.args.is_null()).then(|| call.args.to_string());
        out.push(Action {
            action_id: format!("{event_id}-tool"),
            label: call.name.clone(),
            target_agent: Some(payload.agent()),
            description,
        });
    }

    if out.is_empty() {
        Extracted::Fallback(out)
    } else {
        Extracted::Found(out)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::raw::RawAgentEvent;

    fn payload_of(raw: &RawAgentEvent) -> EventPayload<'_> {
        EventPayload::new(raw)
    }

    fn text(t: &str) -> RawAgentEvent {
        RawAgentEvent::default()
            .with_id("e9")
            .with_author("trail-assessor")
            .with_text(t)
    }

    #[test]
    fn json_summary_is_verbatim() {
        let raw = text(r#"{"summary":"Bridge 4 washed out","severity":"high","confidence":0.8}"#);
        let got = summary(&payload_of(&raw), &AssemblerConfig::default());
        assert_eq!(got, Extracted::Found("Bridge 4 washed out".to_string()));
    }

    #[test]
    fn severity_and_confidence_synthesize_a_summary() {
        let raw = text(r#"{"severity":"high","confidence":0.853}"#);
        let got = summary(&payload_of(&raw), &AssemblerConfig::default());
        assert_eq!(got.into_value(), "Severity: HIGH (85% confidence)");
    }

    #[test]
    fn first_sentence_within_band() {
        let raw = text("Tread loss on mile 3. Crews notified.");
        let got = summary(&payload_of(&raw), &AssemblerConfig::default());
        assert_eq!(got, Extracted::Found("Tread loss on mile 3".to_string()));
    }

    #[test]
    fn long_text_is_truncated_with_ellipsis() {
        let raw = text(&"a".repeat(400));
        let got = summary(&payload_of(&raw), &AssemblerConfig::default());
        assert!(got.is_fallback());
        let value = got.into_value();
        assert_eq!(value.chars().count(), 153);
        assert!(value.ends_with("..."));
    }

    #[test]
    fn short_text_is_kept_whole() {
        let raw = text("ok");
        let got = summary(&payload_of(&raw), &AssemblerConfig::default());
        assert_eq!(got, Extracted::Fallback("ok".to_string()));
    }

    #[test]
    fn detail_prefers_json_field() {
        let raw = text(r#"{"detail":"Full write-up"}"#);
        assert_eq!(detail(&payload_of(&raw)).into_value(), "Full write-up");
        let raw = text("plain words");
        assert_eq!(detail(&payload_of(&raw)), Extracted::Fallback("plain words".into()));
    }

    #[test]
    fn actions_from_json_and_tool_call() {
        let raw = text(
            r#"{"suggested_actions":["Close trail",{"label":"Request survey","agent":"nepa-advisor"},{"nolabel":1}]}"#,
        )
        .with_tool_call("schedule_inspection", json!({"trail":"PCT"}));
        let actions = suggested_actions(&payload_of(&raw)).into_value();
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0].action_id, "e9-action-1");
        assert_eq!(actions[0].label, "Close trail");
        assert_eq!(actions[1].target_agent, Some(SourceAgent::NepaAdvisor));
        assert_eq!(actions[2].action_id, "e9-tool");
        assert_eq!(actions[2].label, "schedule_inspection");
        assert_eq!(actions[2].description.as_deref(), Some(r#"{"trail":"PCT"}"#));
    }
}
