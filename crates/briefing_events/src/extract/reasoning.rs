use serde_json::Value;

use super::{sentences, EventPayload, Extracted};
use crate::config::AssemblerConfig;

fn json_steps(value: &Value, cap: usize) -> Option<Vec<String>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .take(cap)
            .map(str::to_string)
            .collect(),
    )
}

/// Explicit `reasoning_chain` / `reasoning` arrays win; otherwise the raw
/// text, JSON or not, is split into sentence-sized steps.
pub fn reasoning_chain(
    payload: &EventPayload<'_>,
    config: &AssemblerConfig,
) -> Extracted<Vec<String>> {
    let cap = config.max_reasoning_steps;
    let explicit = payload
        .field("reasoning_chain")
        .and_then(|v| json_steps(v, cap))
        .or_else(|| payload.field("reasoning").and_then(|v| json_steps(v, cap)));
    if let Some(steps) = explicit {
        return Extracted::Found(steps);
    }
    let steps: Vec<String> = sentences(payload.text())
        .filter(|clause| config.reasoning.contains(clause))
        .take(cap)
        .map(str::to_string)
        .collect();
    if steps.is_empty() {
        Extracted::Fallback(steps)
    } else {
        Extracted::Found(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::RawAgentEvent;

    fn run(text: &str) -> Extracted<Vec<String>> {
        let raw = RawAgentEvent::default().with_author("burn-analyst").with_text(text);
        reasoning_chain(&EventPayload::new(&raw), &AssemblerConfig::default())
    }

    #[test]
    fn json_array_is_capped_at_five() {
        let got = run(r#"{"reasoning_chain":["a","b","c","d","e","f",7]}"#);
        let expected: Vec<String> = ["a", "b", "c", "d", "e"].map(String::from).to_vec();
        assert_eq!(got, Extracted::Found(expected));
    }

    #[test]
    fn reasoning_alias_is_accepted() {
        let got = run(r#"{"reasoning":["compared dNBR to baseline"]}"#);
        assert_eq!(got.into_value(), vec!["compared dNBR to baseline".to_string()]);
    }

    #[test]
    fn prose_keeps_sentences_within_the_band() {
        let long = "x".repeat(201);
        let text = format!("Ok. Compared pre and post fire imagery. {long}. Derived the burn perimeter!");
        let got = run(&text);
        assert_eq!(
            got.into_value(),
            vec![
                "Compared pre and post fire imagery".to_string(),
                "Derived the burn perimeter".to_string(),
            ]
        );
    }

    #[test]
    fn prose_is_capped_at_five() {
        let text = "Step number one here. Step number two here. Step number three here. \
                    Step number four here. Step number five here. Step number six here.";
        assert_eq!(run(text).value().len(), 5);
    }

    #[test]
    fn structured_payload_without_array_splits_raw_text() {
        let got = run(r#"{"summary":"Compared dNBR to baseline imagery. Soil loss is widespread."}"#);
        assert_eq!(
            got,
            Extracted::Found(vec![
                r#"{"summary":"Compared dNBR to baseline imagery"#.to_string(),
                "Soil loss is widespread".to_string(),
            ])
        );
    }

    #[test]
    fn short_fragments_fall_back_to_no_steps() {
        assert_eq!(run("Ok. Done!"), Extracted::Fallback(vec![]));
    }
}
