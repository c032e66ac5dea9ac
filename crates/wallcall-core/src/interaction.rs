//! Per-viewer interaction records: bookmarks, hides, applications

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A viewer's flags for one event.
///
/// One logical record per (viewer, event) pair; absence means both flags
/// are false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInteraction {
    pub viewer_id: Uuid,
    pub event_id: Uuid,
    pub bookmarked: bool,
    pub hidden: bool,
}

/// Outcome of a viewer's application to an open call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Accepted,
    Rejected,
}

/// A viewer's application record for one open call.
///
/// `manual_applied` is a viewer-set override that marks "applied" even
/// when no formal application status exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub viewer_id: Uuid,
    pub open_call_id: Uuid,
    pub status: Option<ApplicationStatus>,
    pub manual_applied: bool,
}

/// Everything the interaction fetch returns for one viewer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerInteractions {
    pub events: Vec<EventInteraction>,
    pub applications: Vec<ApplicationRecord>,
}

impl ViewerInteractions {
    /// The empty record set, used for anonymous viewers
    pub fn empty() -> Self {
        Self::default()
    }
}
