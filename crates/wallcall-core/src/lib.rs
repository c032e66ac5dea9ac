//! # Wallcall Core
//!
//! Domain model for the Wallcall street-art directory: events, open calls,
//! locations, schedules, and per-viewer interaction records, plus the trait
//! contracts the feed engine uses to reach the storage backend.
//!
//! Everything here is plain data. Derivation (status, ordering, grouping)
//! lives in `wallcall-feed`; this crate never computes a feed.

pub mod call;
pub mod event;
pub mod interaction;
pub mod location;
pub mod source;

pub use call::{CallType, CallWindow, Compensation, Eligibility, EligibilityType, OpenCall};
pub use event::{DateInput, DateRange, Event, EventCategory, EventSchedule, PublicationState};
pub use interaction::{
    ApplicationRecord, ApplicationStatus, EventInteraction, ViewerInteractions,
};
pub use location::{Continent, Location};
pub use source::{CandidateEvent, EventSource, InteractionSource};

/// Result type for wallcall-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by storage collaborators behind the source traits
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Record not found: {0}")]
    NotFound(uuid::Uuid),

    #[error("Malformed record: {0}")]
    Malformed(String),
}
