#![forbid(unsafe_code)]
//! Channel state for briefing events.
//!
//! Each UI channel is an independent fold over the briefing stream:
//! - [`ModalInterrupt`] holds the single critical alert awaiting acknowledgment.
//! - [`MapHighlight`] keeps geo-anchored findings as a GeoJSON collection.
//! - [`RailPulse`] rolls pending status updates up per recovery phase.
//! - [`PanelInject`] lists cards per agent with a read-side display cap.
//!
//! [`ChannelHub`] delivers each event to the channel named by its UI binding
//! and fans `dismiss` out to all four. [`BriefingPipeline`] puts an assembler
//! in front of the hub. With the `tokio` feature, snapshots are published
//! over a `watch` channel; its tests only build with that feature enabled:
//!
//! ```text
//! cargo test -p briefing_channels --features tokio
//! ```

mod hub;
mod map;
mod modal;
mod panel;
mod pipeline;
mod rail;
#[cfg(feature = "tokio")]
mod watch;

pub use hub::{ChannelHub, ChannelSnapshot};
pub use map::{FeatureCollection, MapEntry, MapHighlight};
pub use modal::ModalInterrupt;
pub use panel::{PanelInject, DEFAULT_DISPLAY_CAP};
pub use pipeline::BriefingPipeline;
pub use rail::{Phase, PhaseSummary, RailPulse};
#[cfg(feature = "tokio")]
pub use watch::{spawn_pipeline, PipelineCommand, WatchedPipeline};

use briefing_events::{BriefingEvent, UiTarget};

/// A channel's state as a fold over briefing events.
///
/// Each channel only takes events whose UI binding names it, so folding an
/// unrouted stream into one channel gives the same state as delivering it
/// through [`ChannelHub`].
pub trait Aggregator: Default {
    /// The UI binding this channel accepts.
    const TARGET: UiTarget;

    /// Folds one event in; returns whether the visible state changed.
    /// Events bound to another channel are ignored.
    fn apply(&mut self, event: BriefingEvent) -> bool;

    /// Removes the event if this channel holds it.
    fn dismiss(&mut self, event_id: &str) -> bool;

    fn reset(&mut self);

    fn fold<I>(events: I) -> Self
    where
        I: IntoIterator<Item = BriefingEvent>,
    {
        let mut state = Self::default();
        for event in events {
            state.apply(event);
        }
        state
    }
}
