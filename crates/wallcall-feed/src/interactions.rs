//! Viewer interaction index.
//!
//! Built in a single linear pass over the viewer's raw records. Each
//! (viewer, event) pair yields at most one bookmark/hide record and each
//! (viewer, open call) pair at most one application record, so there is
//! no deduplication to do.

use std::collections::{HashMap, HashSet};
use uuid::Uuid;
use wallcall_core::{ApplicationStatus, ViewerInteractions};

/// Lookup structures for one viewer's interactions.
///
/// Anonymous viewers use the empty index; every derived flag is false.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionIndex {
    pub bookmarked_event_ids: HashSet<Uuid>,
    pub hidden_event_ids: HashSet<Uuid>,
    pub application_status_by_call: HashMap<Uuid, ApplicationStatus>,
    pub manual_applied_by_call: HashMap<Uuid, bool>,
}

impl InteractionIndex {
    /// The empty index, used for anonymous viewers
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the index from the raw record lists
    pub fn build(records: &ViewerInteractions) -> Self {
        let mut index = Self::default();

        for record in &records.events {
            if record.bookmarked {
                index.bookmarked_event_ids.insert(record.event_id);
            }
            if record.hidden {
                index.hidden_event_ids.insert(record.event_id);
            }
        }

        for record in &records.applications {
            if let Some(status) = record.status {
                index
                    .application_status_by_call
                    .insert(record.open_call_id, status);
            }
            index
                .manual_applied_by_call
                .insert(record.open_call_id, record.manual_applied);
        }

        index
    }

    pub fn bookmarked(&self, event_id: Uuid) -> bool {
        self.bookmarked_event_ids.contains(&event_id)
    }

    pub fn hidden(&self, event_id: Uuid) -> bool {
        self.hidden_event_ids.contains(&event_id)
    }

    pub fn application_status(&self, call_id: Uuid) -> Option<ApplicationStatus> {
        self.application_status_by_call.get(&call_id).copied()
    }

    pub fn manual_applied(&self, call_id: Uuid) -> bool {
        self.manual_applied_by_call.get(&call_id).copied().unwrap_or(false)
    }

    /// Whether the viewer has applied to the call.
    ///
    /// True when a formal status exists OR the manual override is set;
    /// the two are checked independently, never merged away.
    pub fn applied(&self, call_id: Uuid) -> bool {
        self.application_status_by_call.contains_key(&call_id) || self.manual_applied(call_id)
    }
}
