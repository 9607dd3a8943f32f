use std::collections::BTreeMap;

use briefing_events::{BriefingEvent, SourceAgent, UiTarget};
use serde::Serialize;
use tracing::debug;

use crate::map::{FeatureCollection, MapHighlight};
use crate::modal::ModalInterrupt;
use crate::panel::PanelInject;
use crate::rail::{Phase, PhaseSummary, RailPulse};
use crate::Aggregator;

/// The four channel aggregators behind one delivery point.
#[derive(Debug, Clone, Default)]
pub struct ChannelHub {
    modal: ModalInterrupt,
    map: MapHighlight,
    rail: RailPulse,
    panel: PanelInject,
}

/// Read-only view of every channel, as handed to the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChannelSnapshot {
    pub modal: Option<BriefingEvent>,
    pub map: FeatureCollection,
    pub rail: BTreeMap<Phase, PhaseSummary>,
    pub panel: BTreeMap<SourceAgent, Vec<BriefingEvent>>,
}

impl ChannelHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands the event to the channel named by its UI binding.
    ///
    /// Returns whether that channel's visible state changed.
    pub fn deliver(&mut self, event: BriefingEvent) -> bool {
        let target = event.target();
        let event_id = event.event_id().to_string();
        let changed = match target {
            UiTarget::ModalInterrupt => self.modal.apply(event),
            UiTarget::MapHighlight => self.map.apply(event),
            UiTarget::RailPulse => self.rail.apply(event),
            UiTarget::PanelInject => self.panel.apply(event),
        };
        debug!(event_id = %event_id, ?target, changed, "delivered briefing");
        changed
    }

    /// Removes the event from whichever channel holds it.
    pub fn dismiss(&mut self, event_id: &str) -> bool {
        // Every channel is asked; none short-circuits the others.
        let removed = [
            self.modal.dismiss(event_id),
            self.map.dismiss(event_id),
            self.rail.dismiss(event_id),
            self.panel.dismiss(event_id),
        ];
        let any = removed.iter().any(|r| *r);
        debug!(event_id, removed = any, "dismissed briefing");
        any
    }

    pub fn reset(&mut self) {
        self.modal.reset();
        self.map.reset();
        self.rail.reset();
        self.panel.reset();
    }

    pub fn modal(&self) -> &ModalInterrupt {
        &self.modal
    }

    pub fn map(&self) -> &MapHighlight {
        &self.map
    }

    pub fn rail(&self) -> &RailPulse {
        &self.rail
    }

    pub fn panel(&self) -> &PanelInject {
        &self.panel
    }

    pub fn snapshot(&self, panel_cap: usize) -> ChannelSnapshot {
        ChannelSnapshot {
            modal: self.modal.active().cloned(),
            map: self.map.feature_collection(),
            rail: self.rail.summary().clone(),
            panel: self.panel.view(panel_cap),
        }
    }

    pub fn fold<I>(events: I) -> Self
    where
        I: IntoIterator<Item = BriefingEvent>,
    {
        let mut hub = Self::default();
        for event in events {
            hub.deliver(event);
        }
        hub
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{briefing, critical_alert, located};

    #[test]
    fn events_land_in_their_bound_channel() {
        let hub = ChannelHub::fold([
            critical_alert("m"),
            located("g", "trail-assessor", -119.5, 37.0),
            briefing("s", "cruising-assistant", "Cruise plots uploading"),
            briefing("p", "nepa-advisor", "Compliance analysis complete"),
        ]);
        assert_eq!(hub.modal().active().map(BriefingEvent::event_id), Some("m"));
        assert_eq!(hub.map().len(), 1);
        assert_eq!(hub.rail().phase(Phase::Timber).count, 1);
        assert_eq!(hub.panel().total(), 1);
    }

    #[test]
    fn dismiss_reaches_every_channel() {
        let mut hub = ChannelHub::fold([
            critical_alert("m"),
            located("g", "burn-analyst", 1.0, 2.0),
        ]);
        assert!(hub.dismiss("m"));
        assert!(hub.dismiss("g"));
        assert!(!hub.dismiss("missing"));
        assert!(hub.modal().active().is_none());
        assert!(hub.map().is_empty());
    }

    #[test]
    fn snapshot_serializes_with_string_keys() {
        let hub = ChannelHub::fold([
            briefing("s", "trail-assessor", "Walking segment 4"),
            briefing("p", "burn-analyst", "Severity analysis ready"),
        ]);
        let wire = serde_json::to_value(hub.snapshot(3)).unwrap();
        assert!(wire["modal"].is_null());
        assert_eq!(wire["rail"]["damage"]["count"], 1);
        assert_eq!(wire["rail"]["damage"]["max_severity"], "info");
        assert!(wire["rail"]["timber"]["max_severity"].is_null());
        assert_eq!(wire["panel"]["burn_analyst"][0]["event_id"], "p");
        assert_eq!(wire["map"]["features"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn reset_empties_all_channels() {
        let mut hub = ChannelHub::fold([
            critical_alert("m"),
            briefing("p", "burn-analyst", "Severity analysis"),
        ]);
        hub.reset();
        let snapshot = hub.snapshot(5);
        assert!(snapshot.modal.is_none());
        assert!(snapshot.panel.is_empty());
        assert!(snapshot.rail.values().all(|phase| phase.count == 0));
    }
}
