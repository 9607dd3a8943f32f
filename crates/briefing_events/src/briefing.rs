use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::agent::SourceAgent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Alert,
    Insight,
    ActionRequired,
    StatusUpdate,
}

/// Totally ordered: `Info < Warning < Critical`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiTarget {
    ModalInterrupt,
    MapHighlight,
    RailPulse,
    PanelInject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiBinding {
    pub target: UiTarget,
    pub geo_reference: Option<GeoFeature>,
}

/// A GeoJSON `Feature`. Every numeric leaf of `geometry.coordinates` is a
/// finite number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoFeature {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Value,
}

impl GeoFeature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            kind: "Feature".to_string(),
            geometry,
            properties: Map::new(),
        }
    }

    pub fn point(longitude: f64, latitude: f64) -> Self {
        Self::new(Geometry {
            kind: "Point".to_string(),
            coordinates: Value::from(vec![finite_or_zero(longitude), finite_or_zero(latitude)]),
        })
    }

    /// Every numeric leaf under `geometry.coordinates`, depth first.
    pub fn coordinate_values(&self) -> Vec<f64> {
        let mut out = Vec::new();
        collect_numbers(&self.geometry.coordinates, &mut out);
        out
    }
}

fn collect_numbers(value: &Value, out: &mut Vec<f64>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| collect_numbers(item, out)),
        Value::Number(n) => out.push(n.as_f64().unwrap_or(0.0)),
        _ => {}
    }
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub action_id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_agent: Option<SourceAgent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub summary: String,
    pub detail: String,
    pub suggested_actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub source_type: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofLayer {
    /// Always within `[0, 1]`.
    pub confidence: f64,
    /// Never empty.
    pub citations: Vec<Citation>,
    pub reasoning_chain: Vec<String>,
}

/// The canonical record produced from exactly one admitted raw event.
///
/// Constructed only by [`crate::BriefingAssembler`]; fields are read through
/// accessors so a delivered event cannot be edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BriefingEvent {
    pub(crate) event_id: String,
    pub(crate) correlation_id: String,
    pub(crate) parent_event_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) timestamp: OffsetDateTime,
    #[serde(rename = "type")]
    pub(crate) kind: EventType,
    pub(crate) source_agent: SourceAgent,
    pub(crate) severity: Severity,
    pub(crate) ui_binding: UiBinding,
    pub(crate) content: Content,
    pub(crate) proof_layer: ProofLayer,
}

impl BriefingEvent {
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn parent_event_id(&self) -> Option<&str> {
        self.parent_event_id.as_deref()
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    pub fn kind(&self) -> EventType {
        self.kind
    }

    pub fn source_agent(&self) -> SourceAgent {
        self.source_agent
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn ui_binding(&self) -> &UiBinding {
        &self.ui_binding
    }

    pub fn target(&self) -> UiTarget {
        self.ui_binding.target
    }

    pub fn geo_reference(&self) -> Option<&GeoFeature> {
        self.ui_binding.geo_reference.as_ref()
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn proof_layer(&self) -> &ProofLayer {
        &self.proof_layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_is_totally_ordered() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
        assert_eq!(
            [Severity::Warning, Severity::Critical, Severity::Info]
                .into_iter()
                .max(),
            Some(Severity::Critical)
        );
    }

    #[test]
    fn point_replaces_non_finite_axes() {
        let feature = GeoFeature::point(f64::NAN, f64::INFINITY);
        assert_eq!(feature.coordinate_values(), vec![0.0, 0.0]);
    }

    #[test]
    fn enums_use_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_value(EventType::ActionRequired).unwrap(),
            "action_required"
        );
        assert_eq!(
            serde_json::to_value(UiTarget::ModalInterrupt).unwrap(),
            "modal_interrupt"
        );
    }
}
