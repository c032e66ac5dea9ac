//! Group key resolution: display headings consistent with the sort key.
//!
//! Headings are derived per item and must agree with the sort engine's
//! band logic, so a grouped feed can never show an item under a heading
//! that contradicts its position.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use wallcall_core::CallType;

use crate::enrich::{FeedItem, StartKey};
use crate::policy::FeedPolicy;
use crate::sort::SortKey;
use crate::status::{resolve_zone, OpenCallStatus, TimezonePreference};

/// Whose feed is being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// An artist browsing the directory
    #[default]
    Artist,
    /// An organizer reviewing listings; country groups carry the
    /// organizer name as subheading
    Organizer,
}

/// Structured pieces of a calendar-day heading, for styled rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayParts {
    pub month: String,
    pub day: u32,
    pub suffix: String,
    pub year: Option<i32>,
}

/// A display heading for one run of feed items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupKey {
    pub raw: String,
    pub subheading: Option<String>,
    pub parts: Option<DayParts>,
}

impl GroupKey {
    /// A plain label with no subheading or structured parts
    pub fn label(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            subheading: None,
            parts: None,
        }
    }
}

/// One labeled run of consecutive items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedGroup {
    pub key: GroupKey,
    pub items: Vec<FeedItem>,
}

/// Group key derivation for one request
#[derive(Debug, Clone)]
pub struct Grouping<'a> {
    pub key: SortKey,
    pub viewer: &'a TimezonePreference,
    pub policy: &'a FeedPolicy,
    pub view_mode: ViewMode,
    pub now: DateTime<Utc>,
}

impl Grouping<'_> {
    /// The heading an item belongs under, per the active sort key
    pub fn key_for(&self, item: &FeedItem) -> GroupKey {
        match self.key {
            SortKey::OpenCall => self.open_call_key(item),
            SortKey::EventStart => self.event_start_key(item),
            SortKey::Name => name_key(item),
            SortKey::Organizer => GroupKey::label(item.organizer.clone()),
            SortKey::Country => self.country_key(item),
        }
    }

    /// Partition an already-sorted page into labeled consecutive runs
    pub fn partition(&self, items: Vec<FeedItem>) -> Vec<FeedGroup> {
        let mut groups: Vec<FeedGroup> = Vec::new();
        for item in items {
            let key = self.key_for(&item);
            match groups.last_mut() {
                Some(group) if group.key == key => group.items.push(item),
                _ => groups.push(FeedGroup {
                    key,
                    items: vec![item],
                }),
            }
        }
        groups
    }

    fn open_call_key(&self, item: &FeedItem) -> GroupKey {
        let zone = resolve_zone(
            item.call_timezone.as_deref(),
            self.viewer,
            self.policy.default_timezone,
        );
        match (item.open_call_status, item.call_type) {
            (Some(OpenCallStatus::ComingSoon), _) => GroupKey::label("Coming Soon!"),
            (Some(OpenCallStatus::Active), Some(CallType::Rolling)) => {
                GroupKey::label("Rolling Open Call")
            }
            (Some(OpenCallStatus::Active), Some(CallType::Email)) => {
                GroupKey::label("Open Email Submissions")
            }
            (Some(_), Some(CallType::Fixed)) => match item.call_end {
                Some(end) => self.day_key(end, zone),
                None => GroupKey::label("Past Open Call"),
            },
            (Some(_), _) => GroupKey::label("Past Open Call"),
            (None, _) if item.invite_only => GroupKey::label("Invite Only"),
            (None, _) => GroupKey::label("No Public Open Call"),
        }
    }

    fn event_start_key(&self, item: &FeedItem) -> GroupKey {
        let zone = resolve_zone(
            item.call_timezone.as_deref(),
            self.viewer,
            self.policy.default_timezone,
        );
        match &item.start_key {
            StartKey::Dated(start) => self.day_key(*start, zone),
            StartKey::Loose(text) => GroupKey::label(text.clone()),
            StartKey::Ongoing => GroupKey::label("Ongoing"),
            StartKey::Undated => GroupKey::label("No Event Date"),
        }
    }

    fn country_key(&self, item: &FeedItem) -> GroupKey {
        let location = &item.location;
        let raw = match &location.country_abbr {
            Some(abbr) => format!("{} ({})", location.country, abbr),
            None => location.country.clone(),
        };

        let needs_subheading = self.view_mode == ViewMode::Organizer
            || self
                .policy
                .country_needs_subheading(&location.country, location.country_abbr.as_deref());
        let subheading = if needs_subheading {
            match self.view_mode {
                ViewMode::Organizer => Some(item.organizer.clone()),
                ViewMode::Artist => location.subdivision.clone(),
            }
        } else {
            None
        };

        GroupKey {
            raw,
            subheading,
            parts: None,
        }
    }

    /// Calendar-day heading, e.g. "Jan 31st" or "Mar 3rd (2024)".
    ///
    /// The year appears only when the day is already past or lies
    /// beyond the current year. Uses the same zone resolution as status
    /// derivation so the heading matches the item's sort position.
    fn day_key(&self, instant: DateTime<Utc>, zone: Tz) -> GroupKey {
        let local = instant.with_timezone(&zone);
        let now_local = self.now.with_timezone(&zone);

        let month = local.format("%b").to_string();
        let day = local.day();
        let suffix = ordinal_suffix(day).to_string();
        let year = (local.date_naive() < now_local.date_naive()
            || local.year() > now_local.year())
        .then(|| local.year());

        let raw = match year {
            Some(year) => format!("{} {}{} ({})", month, day, suffix, year),
            None => format!("{} {}{}", month, day, suffix),
        };

        GroupKey {
            raw,
            subheading: None,
            parts: Some(DayParts {
                month,
                day,
                suffix,
                year,
            }),
        }
    }
}

/// First-character bucket for the name sort
fn name_key(item: &FeedItem) -> GroupKey {
    match item.name.trim().chars().next() {
        Some(c) if c.is_ascii_digit() => GroupKey::label("0-9"),
        Some(c) if c.is_alphabetic() => GroupKey::label(c.to_uppercase().to_string()),
        // Leading punctuation stays unbucketed
        _ => GroupKey::label(""),
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match day % 100 {
        11 | 12 | 13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}
