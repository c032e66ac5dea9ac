//! Sort engine: bucketed comparators with total, stable order.
//!
//! Bucket priorities are fixed regardless of direction; `desc` reverses
//! only the within-bucket comparison. Every chain ends at the event id,
//! so two calls over the same input always produce the same order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::enrich::{FeedItem, StartKey};
use crate::status::OpenCallStatus;

/// Sort key for the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    OpenCall,
    EventStart,
    Name,
    Organizer,
    Country,
}

impl SortKey {
    /// Parse a caller-supplied key; unknown values fall back to the default
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "openCall" | "opencall" | "open_call" => SortKey::OpenCall,
            "eventStart" | "event_start" => SortKey::EventStart,
            "name" => SortKey::Name,
            "organizer" => SortKey::Organizer,
            "country" => SortKey::Country,
            _ => SortKey::default(),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a caller-supplied direction; unknown values fall back to `Asc`
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "desc" | "descending" => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// A full sort specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Parse caller-supplied strings, falling back to `openCall` ascending
    pub fn parse(key: &str, direction: &str) -> Self {
        Self {
            key: SortKey::parse(key),
            direction: SortDirection::parse(direction),
        }
    }
}

/// Sort feed items in place
pub fn sort_items(items: &mut [FeedItem], spec: SortSpec) {
    items.sort_by(|a, b| compare(a, b, spec));
}

/// Total comparator over any two feed items.
///
/// Never panics for valid items; a panic here would corrupt the whole
/// feed and is treated as a programming error in testing.
pub fn compare(a: &FeedItem, b: &FeedItem, spec: SortSpec) -> Ordering {
    bucket_rank(a, spec.key)
        .cmp(&bucket_rank(b, spec.key))
        .then_with(|| spec.direction.apply(within_bucket(a, b, spec.key)))
        .then_with(|| a.event_id.cmp(&b.event_id))
}

/// Priority band of an item under the given key. Lower sorts first.
fn bucket_rank(item: &FeedItem, key: SortKey) -> u8 {
    match key {
        SortKey::OpenCall => match item.open_call_status {
            Some(OpenCallStatus::ComingSoon) => 0,
            Some(OpenCallStatus::Active) => 1,
            Some(OpenCallStatus::Ended) => 2,
            // Invite-only items band before public no-call items so each
            // heading forms a single run.
            None if item.invite_only => 3,
            None => 4,
        },
        SortKey::EventStart => match item.start_key {
            StartKey::Dated(_) => 0,
            StartKey::Loose(_) => 1,
            StartKey::Ongoing => 2,
            StartKey::Undated => 3,
        },
        SortKey::Name | SortKey::Organizer | SortKey::Country => 0,
    }
}

fn within_bucket(a: &FeedItem, b: &FeedItem, key: SortKey) -> Ordering {
    match key {
        SortKey::OpenCall => cmp_by_deadline(a, b).then_with(|| cmp_name_ci(a, b)),
        SortKey::EventStart => cmp_by_event_start(a, b).then_with(|| cmp_name_ci(a, b)),
        SortKey::Name => cmp_name_ci(a, b),
        SortKey::Organizer => cmp_organizer_ci(a, b).then_with(|| cmp_name_ci(a, b)),
        SortKey::Country => a
            .location
            .country
            .cmp(&b.location.country)
            .then_with(|| cmp_subdivision(a, b))
            .then_with(|| cmp_name_ci(a, b)),
    }
}

/// Within a status band: dated deadlines first (by end instant), then
/// calls without a comparable end (rolling/email), by their own start.
fn cmp_by_deadline(a: &FeedItem, b: &FeedItem) -> Ordering {
    match (a.call_end, b.call_end) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => match (a.call_start, b.call_start) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

fn cmp_by_event_start(a: &FeedItem, b: &FeedItem) -> Ordering {
    match (&a.start_key, &b.start_key) {
        (StartKey::Dated(x), StartKey::Dated(y)) => x.cmp(y),
        (StartKey::Loose(x), StartKey::Loose(y)) => x.cmp(y),
        // Same band otherwise; name tie-break decides
        _ => Ordering::Equal,
    }
}

fn cmp_name_ci(a: &FeedItem, b: &FeedItem) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

fn cmp_organizer_ci(a: &FeedItem, b: &FeedItem) -> Ordering {
    a.organizer.to_lowercase().cmp(&b.organizer.to_lowercase())
}

fn cmp_subdivision(a: &FeedItem, b: &FeedItem) -> Ordering {
    let x = a.location.subdivision.as_deref().unwrap_or("");
    let y = b.location.subdivision.as_deref().unwrap_or("");
    x.cmp(y)
}
