use std::collections::BTreeMap;

use briefing_events::{BriefingEvent, Severity, SourceAgent, UiTarget};
use serde::Serialize;

use crate::Aggregator;

/// Recovery phase a rail segment summarizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Impact,
    Damage,
    Timber,
    Compliance,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Impact, Phase::Damage, Phase::Timber, Phase::Compliance];

    /// Static agent→phase table. The coordinator has no phase of its own and
    /// reports under `Impact`, the first phase of a recovery.
    pub fn for_agent(agent: SourceAgent) -> Phase {
        match agent {
            SourceAgent::BurnAnalyst => Phase::Impact,
            SourceAgent::TrailAssessor => Phase::Damage,
            SourceAgent::CruisingAssistant => Phase::Timber,
            SourceAgent::NepaAdvisor => Phase::Compliance,
            SourceAgent::RecoveryCoordinator => Phase::Impact,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhaseSummary {
    pub count: usize,
    /// `None` while the phase has no pending events.
    pub max_severity: Option<Severity>,
}

/// Pending status updates rolled up per phase.
///
/// The roll-up is rebuilt from the full pending list after every change.
#[derive(Debug, Clone)]
pub struct RailPulse {
    pending: Vec<BriefingEvent>,
    summary: BTreeMap<Phase, PhaseSummary>,
}

impl Default for RailPulse {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            summary: empty_summary(),
        }
    }
}

fn empty_summary() -> BTreeMap<Phase, PhaseSummary> {
    Phase::ALL
        .into_iter()
        .map(|phase| (phase, PhaseSummary::default()))
        .collect()
}

impl RailPulse {
    pub fn pending(&self) -> &[BriefingEvent] {
        &self.pending
    }

    pub fn summary(&self) -> &BTreeMap<Phase, PhaseSummary> {
        &self.summary
    }

    pub fn phase(&self, phase: Phase) -> PhaseSummary {
        self.summary.get(&phase).copied().unwrap_or_default()
    }

    fn recompute(&mut self) {
        let mut summary = empty_summary();
        for event in &self.pending {
            let slot = summary
                .entry(Phase::for_agent(event.source_agent()))
                .or_default();
            slot.count += 1;
            slot.max_severity = slot.max_severity.max(Some(event.severity()));
        }
        self.summary = summary;
    }
}

impl Aggregator for RailPulse {
    const TARGET: UiTarget = UiTarget::RailPulse;

    fn apply(&mut self, event: BriefingEvent) -> bool {
        if event.target() != Self::TARGET {
            return false;
        }
        match self
            .pending
            .iter_mut()
            .find(|existing| existing.event_id() == event.event_id())
        {
            Some(existing) => *existing = event,
            None => self.pending.push(event),
        }
        self.recompute();
        true
    }

    fn dismiss(&mut self, event_id: &str) -> bool {
        let before = self.pending.len();
        self.pending.retain(|event| event.event_id() != event_id);
        let removed = self.pending.len() != before;
        if removed {
            self.recompute();
        }
        removed
    }

    fn reset(&mut self) {
        self.pending.clear();
        self.recompute();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{briefing, critical_alert, located};

    #[test]
    fn rolls_up_count_and_max_severity_per_phase() {
        let rail = RailPulse::fold([
            briefing("r1", "burn-analyst", "Loading imagery"),
            briefing("r2", "burn-analyst", "Urgent: tiles stale"),
            briefing("r3", "coordinator", "Moderate queue depth"),
            briefing("r4", "trail-assessor", "Walking segment 2"),
        ]);

        assert_eq!(
            rail.phase(Phase::Impact),
            PhaseSummary {
                count: 3,
                max_severity: Some(Severity::Critical)
            }
        );
        assert_eq!(
            rail.phase(Phase::Damage),
            PhaseSummary {
                count: 1,
                max_severity: Some(Severity::Info)
            }
        );
        assert_eq!(rail.phase(Phase::Timber), PhaseSummary::default());
        assert_eq!(rail.summary().len(), 4);
    }

    #[test]
    fn dismiss_recomputes_the_phase() {
        let mut rail = RailPulse::fold([
            briefing("r1", "burn-analyst", "Loading imagery"),
            briefing("r2", "burn-analyst", "Urgent: tiles stale"),
        ]);
        assert!(rail.dismiss("r2"));
        assert_eq!(
            rail.phase(Phase::Impact),
            PhaseSummary {
                count: 1,
                max_severity: Some(Severity::Info)
            }
        );
        assert!(rail.dismiss("r1"));
        assert_eq!(rail.phase(Phase::Impact), PhaseSummary::default());
    }

    #[test]
    fn redelivery_does_not_double_count() {
        let rail = RailPulse::fold([
            briefing("r1", "nepa-advisor", "Checking handbook"),
            briefing("r1", "nepa-advisor", "Checking handbook"),
        ]);
        assert_eq!(rail.phase(Phase::Compliance).count, 1);
    }

    #[test]
    fn events_bound_elsewhere_are_ignored() {
        let mut rail = RailPulse::fold([
            critical_alert("a1"),
            located("g1", "burn-analyst", -119.5, 37.0),
            briefing("p1", "burn-analyst", "Severity analysis ready"),
        ]);
        assert_eq!(rail.phase(Phase::Impact), PhaseSummary::default());
        assert!(!rail.dismiss("a1"));
    }
}
