//! Event enrichment: raw event + open call + viewer state → feed item.
//!
//! A pure 1:1 projection. Nothing is filtered or excluded here; that is
//! the filter pipeline's job, so exclusion logic stays in one place.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wallcall_core::{
    ApplicationStatus, CallType, CandidateEvent, Compensation, Continent, DateInput,
    Eligibility, EventCategory, EventSchedule, Location,
};

use crate::interactions::InteractionIndex;
use crate::policy::FeedPolicy;
use crate::status::{resolve_status, OpenCallStatus, TimezonePreference};

/// Entitlement flags supplied by the billing collaborator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlements {
    /// Whether compensation numbers are visible to this viewer
    pub view_compensation: bool,
}

/// Everything viewer-specific, threaded explicitly into enrichment.
///
/// Never read from ambient state; anonymous viewers carry the empty
/// index and default flags.
#[derive(Debug, Clone, Default)]
pub struct ViewerContext {
    pub viewer_id: Option<Uuid>,
    pub index: InteractionIndex,
    pub timezone: TimezonePreference,
    pub entitlements: Entitlements,
}

impl ViewerContext {
    /// Context for a viewer with no session
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// The event's first public date, resolved once at enrichment time.
///
/// Sorting and grouping both consume this key, so an item can never sort
/// in one band and land under another band's heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StartKey {
    /// Concrete first start instant
    Dated(DateTime<Utc>),
    /// Recognized loose text (bare year or seasonal term), shown literally
    Loose(String),
    /// Ongoing event with no discrete dates
    Ongoing,
    /// No displayable date
    Undated,
}

/// Classifier for loose date text submitted by organizers
#[derive(Debug, Clone)]
pub struct DateTextRules {
    bare_year: Regex,
    seasonal: Regex,
}

impl Default for DateTextRules {
    fn default() -> Self {
        Self::new()
    }
}

impl DateTextRules {
    pub fn new() -> Self {
        Self {
            bare_year: Regex::new(r"^(19|20)\d{2}$").unwrap(),
            seasonal: Regex::new(r"(?i)^(spring|summer|autumn|fall|winter)(\s+(19|20)\d{2})?$")
                .unwrap(),
        }
    }

    /// Whether the text can stand on its own as a date heading
    pub fn is_displayable(&self, text: &str) -> bool {
        let text = text.trim();
        self.bare_year.is_match(text) || self.seasonal.is_match(text)
    }
}

/// The enriched, flattened projection consumed by filter/sort/group.
///
/// Ephemeral: constructed fresh per request and discarded with the
/// response. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub event_id: Uuid,
    pub name: String,
    pub organizer: String,
    pub category: EventCategory,
    pub type_tags: Vec<String>,
    pub location: Location,
    pub continent: Option<Continent>,
    pub schedule: EventSchedule,
    pub start_key: StartKey,
    pub invite_only: bool,

    /// Present iff the event has a published open call
    pub open_call_id: Option<Uuid>,
    pub call_type: Option<CallType>,
    pub call_start: Option<DateTime<Utc>>,
    pub call_end: Option<DateTime<Utc>>,
    pub call_timezone: Option<String>,
    pub eligibility: Option<Eligibility>,
    pub compensation: Option<Compensation>,

    pub open_call_status: Option<OpenCallStatus>,
    pub has_active_open_call: bool,

    pub bookmarked: bool,
    pub hidden: bool,
    pub applied: bool,
    pub manual_applied: bool,
    pub application_status: Option<ApplicationStatus>,
}

/// Builds feed items for one viewer
#[derive(Debug)]
pub struct Enricher<'a> {
    viewer: &'a ViewerContext,
    policy: &'a FeedPolicy,
    rules: DateTextRules,
}

impl<'a> Enricher<'a> {
    pub fn new(viewer: &'a ViewerContext, policy: &'a FeedPolicy) -> Self {
        Self {
            viewer,
            policy,
            rules: DateTextRules::new(),
        }
    }

    /// Project one candidate into a feed item
    pub fn enrich(&self, candidate: &CandidateEvent, now: DateTime<Utc>) -> FeedItem {
        let event = &candidate.event;

        // An unpublished call is invisible from here on: no status, no
        // call fields, no application lookups against it.
        let call = candidate
            .open_call
            .as_ref()
            .filter(|c| c.state.is_published());

        let open_call_status = call.and_then(|c| {
            resolve_status(c, &self.viewer.timezone, self.policy.default_timezone, now)
        });

        let (applied, manual_applied, application_status) = match call {
            Some(c) => (
                self.viewer.index.applied(c.id),
                self.viewer.index.manual_applied(c.id),
                self.viewer.index.application_status(c.id),
            ),
            None => (false, false, None),
        };

        let compensation = call
            .filter(|_| self.viewer.entitlements.view_compensation)
            .map(|c| c.compensation.clone());

        FeedItem {
            event_id: event.id,
            name: event.name.clone(),
            organizer: event.organizer.clone(),
            category: event.category,
            type_tags: event.type_tags.clone(),
            continent: event.location.continent(),
            location: event.location.clone(),
            start_key: self.start_key(&event.schedule),
            schedule: event.schedule.clone(),
            invite_only: event.invite_only,
            open_call_id: call.map(|c| c.id),
            call_type: call.and_then(|c| c.call_type),
            call_start: call.and_then(|c| c.window.start.as_ref().and_then(DateInput::instant)),
            call_end: call.and_then(|c| c.window.end.as_ref().and_then(DateInput::instant)),
            call_timezone: call.and_then(|c| c.window.timezone.clone()),
            eligibility: call.map(|c| c.eligibility.clone()),
            compensation,
            has_active_open_call: open_call_status == Some(OpenCallStatus::Active),
            open_call_status,
            bookmarked: self.viewer.index.bookmarked(event.id),
            hidden: self.viewer.index.hidden(event.id),
            applied,
            manual_applied,
            application_status,
        }
    }

    /// Classify the event's first public date
    fn start_key(&self, schedule: &EventSchedule) -> StartKey {
        if let Some(first) = schedule.first_start() {
            match first {
                DateInput::Instant(start) => return StartKey::Dated(*start),
                DateInput::Text(text) if self.rules.is_displayable(text) => {
                    return StartKey::Loose(text.trim().to_string());
                }
                // Unrecognized text has no displayable date
                DateInput::Text(_) => return StartKey::Undated,
            }
        }
        if schedule.has_event_dates() {
            // Date ranges exist but none carries a start
            return StartKey::Undated;
        }
        if schedule.ongoing {
            return StartKey::Ongoing;
        }
        StartKey::Undated
    }
}
