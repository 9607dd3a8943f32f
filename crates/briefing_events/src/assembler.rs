use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::admission;
use crate::briefing::{BriefingEvent, Content, ProofLayer, UiBinding, UiTarget};
use crate::config::AssemblerConfig;
use crate::correlation::CorrelationTracker;
use crate::extract::{self, EventPayload};
use crate::raw::RawAgentEvent;
use crate::routing;

/// Turns admitted raw events into [`BriefingEvent`]s for one session.
///
/// The assembler owns the session's correlation scope: events without an
/// invocation id are grouped under a session id generated once per instance
/// (or supplied through [`BriefingAssembler::reset`]).
#[derive(Debug, Clone)]
pub struct BriefingAssembler {
    config: AssemblerConfig,
    tracker: CorrelationTracker,
    session_id: String,
}

impl Default for BriefingAssembler {
    fn default() -> Self {
        Self::new(AssemblerConfig::default())
    }
}

impl BriefingAssembler {
    pub fn new(config: AssemblerConfig) -> Self {
        Self {
            config,
            tracker: CorrelationTracker::new(),
            session_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    pub fn tracker(&self) -> &CorrelationTracker {
        &self.tracker
    }

    /// Clears correlation history and starts a new scope.
    ///
    /// Briefings already handed out are unaffected.
    pub fn reset(&mut self, new_correlation_id: impl Into<String>) {
        self.tracker.reset();
        self.session_id = new_correlation_id.into();
        debug!(session_id = %self.session_id, "briefing session reset");
    }

    /// Produces exactly one briefing for an admissible frame, `None` otherwise.
    pub fn assemble(&mut self, raw: &RawAgentEvent) -> Option<BriefingEvent> {
        if let Err(reason) = admission::check(raw) {
            debug!(event_id = ?raw.id, %reason, "skipping agent frame");
            return None;
        }
        let event_id = raw.id()?.to_string();

        self.tracker.record(raw);
        let parent_event_id = self.tracker.resolve_parent(raw);
        let correlation_id = raw
            .invocation_id()
            .map(str::to_string)
            .unwrap_or_else(|| self.session_id.clone());

        let payload = EventPayload::new(raw);
        let kind = extract::event_type(&payload);
        let severity = extract::severity(&payload);
        let confidence = extract::confidence(&payload, &self.config);
        let citations = extract::citations(&payload);
        let reasoning_chain = extract::reasoning_chain(&payload, &self.config);
        let geo_reference = extract::geo_reference(&payload);
        let summary = extract::summary(&payload, &self.config);
        let detail = extract::detail(&payload);
        let suggested_actions = extract::suggested_actions(&payload);

        let fallbacks: Vec<&str> = [
            ("confidence", confidence.is_fallback()),
            ("citations", citations.is_fallback()),
            ("reasoning_chain", reasoning_chain.is_fallback()),
            ("summary", summary.is_fallback()),
        ]
        .into_iter()
        .filter_map(|(name, fell_back)| fell_back.then_some(name))
        .collect();
        if !fallbacks.is_empty() {
            debug!(event_id = %event_id, ?fallbacks, "briefing used fallback values");
        }

        let mut event = BriefingEvent {
            event_id,
            correlation_id,
            parent_event_id,
            timestamp: OffsetDateTime::now_utc(),
            kind: kind.into_value(),
            source_agent: payload.agent(),
            severity: severity.into_value(),
            ui_binding: UiBinding {
                target: UiTarget::PanelInject,
                geo_reference: geo_reference.into_value(),
            },
            content: Content {
                summary: summary.into_value(),
                detail: detail.into_value(),
                suggested_actions: suggested_actions.into_value(),
            },
            proof_layer: ProofLayer {
                confidence: confidence.into_value(),
                citations: citations.into_value(),
                reasoning_chain: reasoning_chain.into_value(),
            },
        };
        event.ui_binding.target = routing::route(&event);

        debug!(
            event_id = %event.event_id,
            source_agent = %event.source_agent,
            target = ?event.ui_binding.target,
            parent = ?event.parent_event_id,
            "assembled briefing event"
        );
        Some(event)
    }
}
