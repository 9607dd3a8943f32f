use briefing_events::{RawAgentEvent, UiTarget};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::hub::ChannelSnapshot;
use crate::pipeline::BriefingPipeline;

/// A pipeline that republishes its channel snapshot after every change.
pub struct WatchedPipeline {
    pipeline: BriefingPipeline,
    panel_cap: usize,
    tx: watch::Sender<ChannelSnapshot>,
}

impl WatchedPipeline {
    pub fn new(
        pipeline: BriefingPipeline,
        panel_cap: usize,
    ) -> (Self, watch::Receiver<ChannelSnapshot>) {
        let (tx, rx) = watch::channel(pipeline.snapshot(panel_cap));
        (
            Self {
                pipeline,
                panel_cap,
                tx,
            },
            rx,
        )
    }

    pub fn subscribe(&self) -> watch::Receiver<ChannelSnapshot> {
        self.tx.subscribe()
    }

    fn publish(&self) {
        // No receivers is fine: the latest snapshot is still retained.
        self.tx.send_replace(self.pipeline.snapshot(self.panel_cap));
    }

    pub fn ingest(&mut self, raw: &RawAgentEvent) -> Option<UiTarget> {
        let target = self.pipeline.ingest(raw)?;
        self.publish();
        Some(target)
    }

    pub fn dismiss(&mut self, event_id: &str) -> bool {
        let removed = self.pipeline.dismiss(event_id);
        if removed {
            self.publish();
        }
        removed
    }

    pub fn reset_session(&mut self, new_correlation_id: impl Into<String>) {
        self.pipeline.reset_session(new_correlation_id);
    }

    pub fn reset_channels(&mut self) {
        self.pipeline.reset_channels();
        self.publish();
    }

    pub fn into_inner(self) -> BriefingPipeline {
        self.pipeline
    }
}

/// Inputs accepted by [`spawn_pipeline`].
#[derive(Debug, Clone)]
pub enum PipelineCommand {
    Event(RawAgentEvent),
    Dismiss(String),
    ResetSession(String),
    ResetChannels,
}

/// Runs the pipeline as the single writer on its own task.
///
/// The task ends when every command sender is dropped and hands the
/// pipeline back through the join handle.
pub fn spawn_pipeline(
    pipeline: BriefingPipeline,
    panel_cap: usize,
    mut commands: mpsc::Receiver<PipelineCommand>,
) -> (JoinHandle<BriefingPipeline>, watch::Receiver<ChannelSnapshot>) {
    let (mut watched, rx) = WatchedPipeline::new(pipeline, panel_cap);
    let handle = tokio::spawn(async move {
        while let Some(command) = commands.recv().await {
            match command {
                PipelineCommand::Event(raw) => {
                    watched.ingest(&raw);
                }
                PipelineCommand::Dismiss(event_id) => {
                    watched.dismiss(&event_id);
                }
                PipelineCommand::ResetSession(id) => watched.reset_session(id),
                PipelineCommand::ResetChannels => watched.reset_channels(),
            }
        }
        debug!("briefing pipeline command stream closed");
        watched.into_inner()
    });
    (handle, rx)
}
