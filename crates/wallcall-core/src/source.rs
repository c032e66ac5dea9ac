//! Storage collaborator contracts.
//!
//! The feed engine never talks to a database; it consumes already-fetched
//! candidate sets through these traits. Failures propagate to the caller,
//! which decides whether to serve an anonymous-equivalent feed or fail
//! the request.

use uuid::Uuid;

use crate::event::{Event, PublicationState};
use crate::interaction::ViewerInteractions;
use crate::OpenCall;

/// An event paired with its open call, if any
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CandidateEvent {
    pub event: Event,
    pub open_call: Option<OpenCall>,
}

/// Candidate-event fetch: events in the given publication states,
/// optionally narrowed to a single event id.
pub trait EventSource {
    fn fetch_candidates(
        &self,
        states: &[PublicationState],
        event_id: Option<Uuid>,
    ) -> crate::Result<Vec<CandidateEvent>>;
}

/// Viewer-interaction fetch. Not called for anonymous viewers.
pub trait InteractionSource {
    fn fetch_for_viewer(&self, viewer_id: Uuid) -> crate::Result<ViewerInteractions>;
}
