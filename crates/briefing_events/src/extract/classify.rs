use super::{EventPayload, Extracted};
use crate::briefing::{EventType, Severity};

const ALERT_KEYWORDS: &[&str] = &["error", "fail"];
const INSIGHT_KEYWORDS: &[&str] = &["analysis", "confidence", "severity"];

// Checked in order; the first tier with a hit wins.
const SEVERITY_TIERS: &[(Severity, &[&str])] = &[
    (Severity::Critical, &["critical", "urgent", "immediate"]),
    (Severity::Warning, &["warning", "caution", "moderate"]),
];

fn mentions_any(lowered: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| lowered.contains(kw))
}

/// A tool call always makes the event `ActionRequired`, whatever the text says.
pub fn event_type(payload: &EventPayload<'_>) -> Extracted<EventType> {
    if payload.tool_call().is_some() {
        return Extracted::Found(EventType::ActionRequired);
    }
    let lowered = payload.lowered();
    if mentions_any(lowered, ALERT_KEYWORDS) {
        Extracted::Found(EventType::Alert)
    } else if mentions_any(lowered, INSIGHT_KEYWORDS) {
        Extracted::Found(EventType::Insight)
    } else {
        Extracted::Fallback(EventType::StatusUpdate)
    }
}

pub fn severity(payload: &EventPayload<'_>) -> Extracted<Severity> {
    SEVERITY_TIERS
        .iter()
        .find(|(_, keywords)| mentions_any(payload.lowered(), keywords))
        .map(|(severity, _)| Extracted::Found(*severity))
        .unwrap_or(Extracted::Fallback(Severity::Info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::RawAgentEvent;

    fn text(t: &str) -> RawAgentEvent {
        RawAgentEvent::default().with_author("burn-analyst").with_text(t)
    }

    #[test]
    fn tool_call_wins_over_alert_text() {
        let raw = text("Model run FAILED with error").with_tool_call("rerun", serde_json::json!({}));
        assert_eq!(
            event_type(&EventPayload::new(&raw)),
            Extracted::Found(EventType::ActionRequired)
        );
    }

    #[test]
    fn keyword_groups_select_type() {
        let alert = text("Upstream feed failed to load");
        let insight = text("Soil burn severity analysis complete");
        let status = text("Loading imagery tiles");
        assert_eq!(
            event_type(&EventPayload::new(&alert)).into_value(),
            EventType::Alert
        );
        assert_eq!(
            event_type(&EventPayload::new(&insight)).into_value(),
            EventType::Insight
        );
        assert_eq!(
            event_type(&EventPayload::new(&status)),
            Extracted::Fallback(EventType::StatusUpdate)
        );
    }

    #[test]
    fn highest_severity_tier_wins() {
        let raw = text("Use caution: CRITICAL debris flow risk");
        assert_eq!(
            severity(&EventPayload::new(&raw)),
            Extracted::Found(Severity::Critical)
        );

        let raw = text("Moderate erosion observed");
        assert_eq!(
            severity(&EventPayload::new(&raw)).into_value(),
            Severity::Warning
        );

        let raw = text("All quiet");
        assert_eq!(
            severity(&EventPayload::new(&raw)),
            Extracted::Fallback(Severity::Info)
        );
    }
}
