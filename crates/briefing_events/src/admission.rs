use thiserror::Error;

use crate::raw::RawAgentEvent;

/// Why a raw frame carries nothing worth briefing on.
///
/// A rejection is a normal outcome, not a failure: callers simply produce no
/// record for the frame.
#[derive(Debug, Clone, Copy, Error, Eq, PartialEq)]
pub enum Rejection {
    #[error("frame has no author (heartbeat)")]
    MissingAuthor,
    #[error("partial frame has no invocation id")]
    UnanchoredPartial,
    #[error("frame has no id")]
    MissingId,
    #[error("frame has neither content nor actions")]
    Empty,
}

/// Classifies a raw frame, returning the first failed criterion.
pub fn check(raw: &RawAgentEvent) -> Result<(), Rejection> {
    if raw.author().is_none() {
        return Err(Rejection::MissingAuthor);
    }
    if raw.is_partial() && raw.invocation_id().is_none() {
        return Err(Rejection::UnanchoredPartial);
    }
    if raw.id().is_none() {
        return Err(Rejection::MissingId);
    }
    if raw.content.is_none() && raw.actions.is_none() {
        return Err(Rejection::Empty);
    }
    Ok(())
}

pub fn admit(raw: &RawAgentEvent) -> bool {
    check(raw).is_ok()
}
