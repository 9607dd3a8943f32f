use briefing_events::{BriefingEvent, GeoFeature, Severity, UiTarget};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::Aggregator;

#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    pub event: BriefingEvent,
    pub geo_reference: GeoFeature,
    pub severity: Severity,
}

/// GeoJSON `FeatureCollection` handed to the map renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub features: Vec<GeoFeature>,
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self {
            kind: "FeatureCollection",
            features: Vec::new(),
        }
    }
}

/// Geo-anchored findings. Entries stay until dismissed.
#[derive(Debug, Clone, Default)]
pub struct MapHighlight {
    entries: Vec<MapEntry>,
}

impl MapHighlight {
    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Projects every entry into a feature carrying `event_id`, `severity`
    /// and `source_agent` properties.
    pub fn feature_collection(&self) -> FeatureCollection {
        let features = self
            .entries
            .iter()
            .map(|entry| {
                let mut feature = entry.geo_reference.clone();
                let props = &mut feature.properties;
                props.insert("event_id".into(), Value::from(entry.event.event_id()));
                props.insert("severity".into(), Value::from(entry.severity.as_str()));
                props.insert(
                    "source_agent".into(),
                    Value::from(entry.event.source_agent().as_str()),
                );
                feature
            })
            .collect();
        FeatureCollection {
            features,
            ..FeatureCollection::default()
        }
    }
}

impl Aggregator for MapHighlight {
    const TARGET: UiTarget = UiTarget::MapHighlight;

    fn apply(&mut self, event: BriefingEvent) -> bool {
        let geo_reference = match event.geo_reference() {
            Some(geo) if event.target() == Self::TARGET => geo.clone(),
            _ => {
                debug!(event_id = event.event_id(), "map ignores event not bound to it");
                return false;
            }
        };
        let entry = MapEntry {
            severity: event.severity(),
            geo_reference,
            event,
        };
        // Redelivery replaces the earlier copy in place.
        match self
            .entries
            .iter_mut()
            .find(|existing| existing.event.event_id() == entry.event.event_id())
        {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        true
    }

    fn dismiss(&mut self, event_id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.event.event_id() != event_id);
        self.entries.len() != before
    }

    fn reset(&mut self) {
        self.entries.clear();
    }
}
