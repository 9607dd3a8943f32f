use std::collections::VecDeque;

use briefing_events::{BriefingEvent, UiTarget};
use tracing::debug;

use crate::Aggregator;

/// The single critical alert currently interrupting the operator.
///
/// A new alert is shown only while nothing is active. Alerts arriving while
/// one is showing wait in arrival order; dismissing the active alert promotes
/// the oldest waiting one. Events not routed to the modal are ignored.
#[derive(Debug, Clone, Default)]
pub struct ModalInterrupt {
    active: Option<BriefingEvent>,
    pending: VecDeque<BriefingEvent>,
}

impl ModalInterrupt {
    pub fn active(&self) -> Option<&BriefingEvent> {
        self.active.as_ref()
    }

    /// Alerts waiting for the active one to be acknowledged, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &BriefingEvent> {
        self.pending.iter()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

impl Aggregator for ModalInterrupt {
    const TARGET: UiTarget = UiTarget::ModalInterrupt;

    fn apply(&mut self, event: BriefingEvent) -> bool {
        if event.target() != Self::TARGET {
            debug!(event_id = event.event_id(), "modal ignores event not bound to it");
            return false;
        }
        if self.active.is_none() {
            self.active = Some(event);
            return true;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if active.event_id() == event.event_id() {
            *active = event;
            return true;
        }
        match self
            .pending
            .iter_mut()
            .find(|waiting| waiting.event_id() == event.event_id())
        {
            Some(waiting) => *waiting = event,
            None => {
                debug!(
                    active = active.event_id(),
                    queued = event.event_id(),
                    "modal busy, alert queued"
                );
                self.pending.push_back(event);
            }
        }
        false
    }

    fn dismiss(&mut self, event_id: &str) -> bool {
        if self.active.as_ref().map(BriefingEvent::event_id) == Some(event_id) {
            self.active = self.pending.pop_front();
            if let Some(next) = &self.active {
                debug!(event_id = next.event_id(), "queued alert promoted");
            }
            return true;
        }
        let before = self.pending.len();
        self.pending.retain(|waiting| waiting.event_id() != event_id);
        before != self.pending.len()
    }

    fn reset(&mut self) {
        self.active = None;
        self.pending.clear();
    }
}
