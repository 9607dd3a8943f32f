use crate::briefing::{BriefingEvent, EventType, Severity, UiTarget};

/// Picks the presentation channel from the event's classified fields.
///
/// First match wins:
/// 1. critical alerts interrupt (`ModalInterrupt`), regardless of geography;
/// 2. anything with a geo reference goes to the map (`MapHighlight`);
/// 3. status updates go to the rail (`RailPulse`);
/// 4. everything else becomes a panel card (`PanelInject`).
pub fn route_fields(kind: EventType, severity: Severity, has_geo: bool) -> UiTarget {
    if kind == EventType::Alert && severity == Severity::Critical {
        UiTarget::ModalInterrupt
    } else if has_geo {
        UiTarget::MapHighlight
    } else if kind == EventType::StatusUpdate {
        UiTarget::RailPulse
    } else {
        UiTarget::PanelInject
    }
}

pub fn route(event: &BriefingEvent) -> UiTarget {
    route_fields(
        event.kind(),
        event.severity(),
        event.geo_reference().is_some(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_order() {
        assert_eq!(
            route_fields(EventType::Alert, Severity::Critical, true),
            UiTarget::ModalInterrupt
        );
        assert_eq!(
            route_fields(EventType::Alert, Severity::Warning, true),
            UiTarget::MapHighlight
        );
        assert_eq!(
            route_fields(EventType::StatusUpdate, Severity::Critical, false),
            UiTarget::RailPulse
        );
        assert_eq!(
            route_fields(EventType::Alert, Severity::Warning, false),
            UiTarget::PanelInject
        );
        assert_eq!(
            route_fields(EventType::Insight, Severity::Info, false),
            UiTarget::PanelInject
        );
        assert_eq!(
            route_fields(EventType::StatusUpdate, Severity::Info, true),
            UiTarget::MapHighlight
        );
    }
}
