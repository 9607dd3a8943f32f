use std::collections::BTreeMap;

use briefing_events::{BriefingEvent, SourceAgent, UiTarget};

use crate::Aggregator;

pub const DEFAULT_DISPLAY_CAP: usize = 5;

/// Panel cards per agent.
///
/// Storage is unbounded and kept in arrival order; only the read-side view
/// is capped, so collapsing a panel never loses cards.
#[derive(Debug, Clone, Default)]
pub struct PanelInject {
    by_agent: BTreeMap<SourceAgent, Vec<BriefingEvent>>,
}

impl PanelInject {
    /// Every stored card for `agent`, oldest first.
    pub fn events_for(&self, agent: SourceAgent) -> &[BriefingEvent] {
        self.by_agent.get(&agent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Up to `cap` cards for `agent`, newest first.
    pub fn view_for(&self, agent: SourceAgent, cap: usize) -> Vec<&BriefingEvent> {
        self.events_for(agent).iter().rev().take(cap).collect()
    }

    /// Capped, newest-first view of every agent with at least one card.
    pub fn view(&self, cap: usize) -> BTreeMap<SourceAgent, Vec<BriefingEvent>> {
        self.by_agent
            .iter()
            .filter(|(_, events)| !events.is_empty())
            .map(|(agent, events)| (*agent, events.iter().rev().take(cap).cloned().collect()))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.by_agent.values().map(Vec::len).sum()
    }
}

impl Aggregator for PanelInject {
    const TARGET: UiTarget = UiTarget::PanelInject;

    fn apply(&mut self, event: BriefingEvent) -> bool {
        if event.target() != Self::TARGET {
            return false;
        }
        let cards = self.by_agent.entry(event.source_agent()).or_default();
        match cards
            .iter_mut()
            .find(|existing| existing.event_id() == event.event_id())
        {
            Some(existing) => *existing = event,
            None => cards.push(event),
        }
        true
    }

    fn dismiss(&mut self, event_id: &str) -> bool {
        let mut removed = false;
        for cards in self.by_agent.values_mut() {
            let before = cards.len();
            cards.retain(|event| event.event_id() != event_id);
            removed |= cards.len() != before;
        }
        self.by_agent.retain(|_, cards| !cards.is_empty());
        removed
    }

    fn reset(&mut self) {
        self.by_agent.clear();
    }
}
