use briefing_events::{AssemblerConfig, BriefingAssembler, RawAgentEvent, UiTarget};

use crate::hub::{ChannelHub, ChannelSnapshot};

/// One session's assembler feeding the channel hub.
#[derive(Debug, Clone, Default)]
pub struct BriefingPipeline {
    assembler: BriefingAssembler,
    hub: ChannelHub,
}

impl BriefingPipeline {
    pub fn new(config: AssemblerConfig) -> Self {
        Self {
            assembler: BriefingAssembler::new(config),
            hub: ChannelHub::new(),
        }
    }

    pub fn with_assembler(assembler: BriefingAssembler) -> Self {
        Self {
            assembler,
            hub: ChannelHub::new(),
        }
    }

    /// Assembles and delivers one raw frame; `None` when it was not admitted.
    pub fn ingest(&mut self, raw: &RawAgentEvent) -> Option<UiTarget> {
        let event = self.assembler.assemble(raw)?;
        let target = event.target();
        self.hub.deliver(event);
        Some(target)
    }

    pub fn dismiss(&mut self, event_id: &str) -> bool {
        self.hub.dismiss(event_id)
    }

    /// Starts a new correlation scope. Channel state is left as is.
    pub fn reset_session(&mut self, new_correlation_id: impl Into<String>) {
        self.assembler.reset(new_correlation_id);
    }

    pub fn reset_channels(&mut self) {
        self.hub.reset();
    }

    pub fn assembler(&self) -> &BriefingAssembler {
        &self.assembler
    }

    pub fn hub(&self) -> &ChannelHub {
        &self.hub
    }

    pub fn snapshot(&self, panel_cap: usize) -> ChannelSnapshot {
        self.hub.snapshot(panel_cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_reset_keeps_channel_state() {
        let mut pipeline = BriefingPipeline::default();
        let raw = RawAgentEvent::default()
            .with_id("e1")
            .with_invocation("i1")
            .with_author("trail-assessor")
            .with_text("Bridge inspection analysis complete");
        assert_eq!(pipeline.ingest(&raw), Some(UiTarget::PanelInject));

        pipeline.reset_session("next");
        assert!(pipeline.assembler().tracker().is_empty());
        assert_eq!(pipeline.hub().panel().total(), 1);

        pipeline.reset_channels();
        assert_eq!(pipeline.hub().panel().total(), 0);
    }

    #[test]
    fn heartbeat_is_silently_dropped() {
        let mut pipeline = BriefingPipeline::default();
        let heartbeat = RawAgentEvent::default().with_id("hb");
        assert_eq!(pipeline.ingest(&heartbeat), None);
        assert_eq!(pipeline.snapshot(5).panel.len(), 0);
    }
}
