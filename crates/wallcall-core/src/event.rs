//! Event model: categories, publication states, and date schedules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::location::Location;

/// Category of a listed event (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Event,
    Project,
    Residency,
    GrantFund,
    Roster,
}

impl EventCategory {
    /// Parse a caller-supplied category string; unknown values yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "event" => Some(EventCategory::Event),
            "project" => Some(EventCategory::Project),
            "residency" => Some(EventCategory::Residency),
            "grant" | "fund" | "grant/fund" => Some(EventCategory::GrantFund),
            "roster" => Some(EventCategory::Roster),
            _ => None,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::Event => "Event",
            EventCategory::Project => "Project",
            EventCategory::Residency => "Residency",
            EventCategory::GrantFund => "Grant/Fund",
            EventCategory::Roster => "Roster",
        }
    }
}

/// Publication state of an event or open call in the submission workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublicationState {
    Draft,
    Editing,
    Submitted,
    Pending,
    Published,
    Archived,
}

impl PublicationState {
    /// Whether the record is publicly visible
    pub fn is_published(&self) -> bool {
        matches!(self, PublicationState::Published)
    }
}

/// A date value as submitted by an organizer.
///
/// Submission forms accept both concrete dates and loose text ("2026",
/// "Spring 2025"), so both survive into the model. Unparseable input
/// degrades to `Text` and is resolved at read time, never rejected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DateInput {
    /// A concrete calendar instant
    Instant(DateTime<Utc>),
    /// Literal display text (bare year, seasonal term, or free-form)
    Text(String),
}

impl DateInput {
    /// Parse an RFC 3339 string, keeping anything else as literal text
    pub fn parse(s: &str) -> Self {
        match DateTime::parse_from_rfc3339(s.trim()) {
            Ok(dt) => DateInput::Instant(dt.with_timezone(&Utc)),
            Err(_) => DateInput::Text(s.trim().to_string()),
        }
    }

    /// The concrete instant, if this value has one
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            DateInput::Instant(dt) => Some(*dt),
            DateInput::Text(_) => None,
        }
    }

    /// The literal text, if this value is loose
    pub fn text(&self) -> Option<&str> {
        match self {
            DateInput::Instant(_) => None,
            DateInput::Text(s) => Some(s),
        }
    }
}

/// A single start/end date range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<DateInput>,
    pub end: Option<DateInput>,
}

impl DateRange {
    /// The range's start as a concrete instant, if parseable
    pub fn start_instant(&self) -> Option<DateTime<Utc>> {
        self.start.as_ref().and_then(DateInput::instant)
    }
}

/// An event's date payload.
///
/// Exactly one of `event_dates` (non-empty), `ongoing`, or `prod_dates`
/// (non-empty) describes the event's timing. Production dates are used
/// when there is no public-facing event date. An event with none of the
/// three is undated; it stays in the feed under its own bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSchedule {
    /// Discrete public event date ranges
    pub event_dates: Vec<DateRange>,

    /// Ongoing event with no discrete dates
    pub ongoing: bool,

    /// Production date ranges (no public event date)
    pub prod_dates: Vec<DateRange>,
}

impl EventSchedule {
    /// Whether any public event date range exists
    pub fn has_event_dates(&self) -> bool {
        !self.event_dates.is_empty()
    }

    /// First public event date, in listing order
    pub fn first_start(&self) -> Option<&DateInput> {
        self.event_dates.first().and_then(|r| r.start.as_ref())
    }

    /// No public dates, not ongoing, no production dates
    pub fn is_undated(&self) -> bool {
        self.event_dates.is_empty() && !self.ongoing && self.prod_dates.is_empty()
    }
}

/// A listed event, owned by its organizer.
///
/// Mutated only through the submission workflow; the feed engine treats
/// every field as immutable input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Organizer display name
    pub organizer: String,

    /// Category
    pub category: EventCategory,

    /// Category-specific type tags (multi-valued)
    pub type_tags: Vec<String>,

    /// Where the event happens
    pub location: Location,

    /// Publication state
    pub state: PublicationState,

    /// Date payload
    pub schedule: EventSchedule,

    /// Participation is by invitation; no public open call will exist
    pub invite_only: bool,
}
