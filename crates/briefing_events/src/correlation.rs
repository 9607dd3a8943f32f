use std::collections::HashMap;

use crate::raw::RawAgentEvent;

/// Raw events seen in one session, keyed by id, for parent resolution.
///
/// Retention is unbounded for the life of the session; call
/// [`CorrelationTracker::reset`] to start a fresh scope.
#[derive(Debug, Clone, Default)]
pub struct CorrelationTracker {
    events: HashMap<String, RawAgentEvent>,
}

impl CorrelationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the event under its id. Redelivered ids overwrite.
    pub fn record(&mut self, event: &RawAgentEvent) {
        if let Some(id) = event.id() {
            self.events.insert(id.to_string(), event.clone());
        }
    }

    /// The id sorting immediately before `event` among stored events with the
    /// same invocation id, or `None` for the first event of a group.
    ///
    /// Ids are compared lexicographically; this is a best-effort predecessor,
    /// not a delivery order.
    pub fn resolve_parent(&self, event: &RawAgentEvent) -> Option<String> {
        let id = event.id()?;
        let invocation = event.invocation_id()?;
        self.events
            .values()
            .filter(|stored| stored.invocation_id() == Some(invocation))
            .filter_map(RawAgentEvent::id)
            .filter(|candidate| *candidate < id)
            .max()
            .map(str::to_string)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn reset(&mut self) {
        self.events.clear();
    }
}
