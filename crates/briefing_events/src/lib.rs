#![forbid(unsafe_code)]
//! Canonical briefing events assembled from raw analysis-agent output.
//!
//! The crate is a synchronous, single-writer transform:
//! - [`admission`] decides whether a raw frame is worth a briefing at all.
//! - [`extract`] pulls each field out of loosely structured text, falling back
//!   to documented defaults instead of failing.
//! - [`BriefingAssembler`] composes those pieces with agent identity and
//!   per-session correlation into an immutable [`BriefingEvent`], routed to
//!   one UI channel.
//!
//! [`dispatch`] is the separate, keyword-scored agent selection used by chat
//! surfaces, and [`EventIngestor`] decodes newline-delimited frame streams.

pub mod admission;
mod agent;
mod assembler;
mod briefing;
mod config;
mod correlation;
pub mod dispatch;
mod error;
pub mod extract;
mod ingest;
mod raw;
mod reader;
pub mod routing;

pub use admission::{admit, Rejection};
pub use agent::{DataSource, SourceAgent};
pub use assembler::BriefingAssembler;
pub use briefing::{
    Action, BriefingEvent, Citation, Content, EventType, GeoFeature, Geometry, ProofLayer,
    Severity, UiBinding, UiTarget,
};
pub use config::{AssemblerConfig, CaptureRaw, ClauseBand, IngestConfig, IngestLimits};
pub use correlation::CorrelationTracker;
pub use dispatch::Dispatch;
pub use error::{DecodeErrorCode, LineRecord, LineRecordError};
pub use extract::{EventPayload, Extracted};
pub use ingest::EventIngestor;
pub use raw::{RawActions, RawAgentEvent, RawContent, RawPart, ToolCall};
