//! Field extractors.
//!
//! Each extractor is a pure function over one [`EventPayload`] and never
//! fails: when nothing usable is found it returns its documented default
//! wrapped in [`Extracted::Fallback`].

mod citations;
mod classify;
mod confidence;
mod content;
mod geo;
mod reasoning;

pub use citations::citations;
pub use classify::{event_type, severity};
pub use confidence::confidence;
pub use content::{detail, suggested_actions, summary};
pub use geo::geo_reference;
pub use reasoning::reasoning_chain;

use serde_json::{Map, Value};

use crate::agent::SourceAgent;
use crate::raw::{RawAgentEvent, ToolCall};

/// Outcome of one extractor: the value, tagged with the path that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted<T> {
    Found(T),
    Fallback(T),
}

impl<T> Extracted<T> {
    pub fn value(&self) -> &T {
        match self {
            Extracted::Found(v) | Extracted::Fallback(v) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Extracted::Found(v) | Extracted::Fallback(v) => v,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Extracted::Fallback(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Extracted<U> {
        match self {
            Extracted::Found(v) => Extracted::Found(f(v)),
            Extracted::Fallback(v) => Extracted::Fallback(f(v)),
        }
    }
}

/// A raw event's text, parsed at most once.
///
/// `json` is populated only when the whole text is a JSON object; arrays,
/// scalars and malformed input leave it empty.
#[derive(Debug, Clone)]
pub struct EventPayload<'a> {
    raw: &'a RawAgentEvent,
    agent: SourceAgent,
    text: String,
    lowered: String,
    json: Option<Map<String, Value>>,
}

impl<'a> EventPayload<'a> {
    pub fn new(raw: &'a RawAgentEvent) -> Self {
        let text = raw.text();
        let lowered = text.to_lowercase();
        let json = match serde_json::from_str::<Value>(text.trim()) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        };
        let agent = SourceAgent::normalize(raw.author().unwrap_or_default());
        Self {
            raw,
            agent,
            text,
            lowered,
            json,
        }
    }

    pub fn raw(&self) -> &RawAgentEvent {
        self.raw
    }

    pub fn agent(&self) -> SourceAgent {
        self.agent
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lowered(&self) -> &str {
        &self.lowered
    }

    pub fn json(&self) -> Option<&Map<String, Value>> {
        self.json.as_ref()
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.json.as_ref().and_then(|map| map.get(name))
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn tool_call(&self) -> Option<&ToolCall> {
        self.raw.tool_call()
    }
}

/// Trimmed, non-empty clauses split on `.`, `!` and `?`.
pub(crate) fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// First `max_chars` characters of `text`, never splitting a code point.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
