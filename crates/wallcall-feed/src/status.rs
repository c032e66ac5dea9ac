//! Temporal status resolution for open calls.
//!
//! Pure date arithmetic: (call type, window, timezone, now) → status.
//! Boundary convention: both `start` and `end` are inclusive of `active`.
//! A call is `coming-soon` strictly before `start` and `ended` strictly
//! after `end`; at the exact boundary instant it is `active`.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use wallcall_core::{CallType, DateInput, OpenCall};

use crate::policy::DEFAULT_TIMEZONE;

/// Temporal status of a published open call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpenCallStatus {
    ComingSoon,
    Active,
    Ended,
}

/// The viewer's timezone preference.
///
/// When `has_preference` is set, window boundaries are evaluated in the
/// viewer's zone; otherwise the organizer's zone (or the policy fallback)
/// wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezonePreference {
    pub has_preference: bool,
    pub timezone: Tz,
}

impl Default for TimezonePreference {
    fn default() -> Self {
        Self {
            has_preference: false,
            timezone: DEFAULT_TIMEZONE,
        }
    }
}

impl TimezonePreference {
    /// No explicit preference; organizer/fallback resolution applies
    pub fn none() -> Self {
        Self::default()
    }

    /// An explicit viewer preference for the given zone
    pub fn fixed(timezone: Tz) -> Self {
        Self {
            has_preference: true,
            timezone,
        }
    }
}

/// Resolve the zone for one window.
///
/// Applied once per window and used for both boundaries; a comparison
/// never mixes zones. Unparseable organizer zones fall back.
pub fn resolve_zone(
    organizer_tz: Option<&str>,
    viewer: &TimezonePreference,
    fallback: Tz,
) -> Tz {
    if viewer.has_preference {
        return viewer.timezone;
    }
    organizer_tz
        .and_then(|name| name.trim().parse::<Tz>().ok())
        .unwrap_or(fallback)
}

/// Derive the temporal status of an open call.
///
/// Returns `None` for unpublished calls, calls without a timing model,
/// and `Fixed` calls whose deadline never parsed to an instant —
/// malformed data degrades, it never fails the feed.
pub fn resolve_status(
    call: &OpenCall,
    viewer: &TimezonePreference,
    fallback: Tz,
    now: DateTime<Utc>,
) -> Option<OpenCallStatus> {
    if !call.state.is_published() {
        return None;
    }
    let call_type = call.call_type?;

    let zone = resolve_zone(call.window.timezone.as_deref(), viewer, fallback);
    let now = now.with_timezone(&zone);
    let start = call
        .window
        .start
        .as_ref()
        .and_then(DateInput::instant)
        .map(|t| t.with_timezone(&zone));
    let end = call
        .window
        .end
        .as_ref()
        .and_then(DateInput::instant)
        .map(|t| t.with_timezone(&zone));

    match call_type {
        CallType::Fixed => {
            let end = end?;
            if let Some(start) = start {
                if now < start {
                    return Some(OpenCallStatus::ComingSoon);
                }
            }
            if now > end {
                Some(OpenCallStatus::Ended)
            } else {
                Some(OpenCallStatus::Active)
            }
        }
        CallType::Rolling => Some(OpenCallStatus::Active),
        CallType::Email => match end {
            Some(end) if now > end => Some(OpenCallStatus::Ended),
            _ => Some(OpenCallStatus::Active),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use wallcall_core::{CallWindow, Compensation, Eligibility, PublicationState};

    fn call(
        call_type: Option<CallType>,
        start: Option<&str>,
        end: Option<&str>,
        timezone: Option<&str>,
    ) -> OpenCall {
        OpenCall {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            state: PublicationState::Published,
            call_type,
            window: CallWindow {
                start: start.map(DateInput::parse),
                end: end.map(DateInput::parse),
                timezone: timezone.map(String::from),
            },
            eligibility: Eligibility::default(),
            compensation: Compensation::default(),
        }
    }

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_fixed_window_phases() {
        let c = call(
            Some(CallType::Fixed),
            Some("2025-01-01T00:00:00Z"),
            Some("2025-01-31T23:59:59Z"),
            Some("UTC"),
        );
        let viewer = TimezonePreference::none();

        assert_eq!(
            resolve_status(&c, &viewer, DEFAULT_TIMEZONE, at("2024-12-31T23:59:59Z")),
            Some(OpenCallStatus::ComingSoon)
        );
        assert_eq!(
            resolve_status(&c, &viewer, DEFAULT_TIMEZONE, at("2025-01-15T12:00:00Z")),
            Some(OpenCallStatus::Active)
        );
        assert_eq!(
            resolve_status(&c, &viewer, DEFAULT_TIMEZONE, at("2025-02-01T00:00:00Z")),
            Some(OpenCallStatus::Ended)
        );
    }

    #[test]
    fn test_fixed_boundaries_are_active() {
        // Exactly at start and exactly at end the call is active.
        let c = call(
            Some(CallType::Fixed),
            Some("2025-01-01T00:00:00Z"),
            Some("2025-01-31T23:59:59Z"),
            Some("UTC"),
        );
        let viewer = TimezonePreference::none();

        assert_eq!(
            resolve_status(&c, &viewer, DEFAULT_TIMEZONE, at("2025-01-01T00:00:00Z")),
            Some(OpenCallStatus::Active)
        );
        assert_eq!(
            resolve_status(&c, &viewer, DEFAULT_TIMEZONE, at("2025-01-31T23:59:59Z")),
            Some(OpenCallStatus::Active)
        );
        assert_eq!(
            resolve_status(&c, &viewer, DEFAULT_TIMEZONE, at("2025-02-01T00:00:00Z")),
            Some(OpenCallStatus::Ended)
        );
    }

    #[test]
    fn test_rolling_never_ends() {
        let c = call(Some(CallType::Rolling), None, None, None);
        let viewer = TimezonePreference::none();

        assert_eq!(
            resolve_status(&c, &viewer, DEFAULT_TIMEZONE, at("2099-12-31T23:59:59Z")),
            Some(OpenCallStatus::Active)
        );
    }

    #[test]
    fn test_email_cutoff() {
        let c = call(
            Some(CallType::Email),
            None,
            Some("2025-06-01T00:00:00Z"),
            Some("UTC"),
        );
        let viewer = TimezonePreference::none();

        assert_eq!(
            resolve_status(&c, &viewer, DEFAULT_TIMEZONE, at("2025-05-01T00:00:00Z")),
            Some(OpenCallStatus::Active)
        );
        assert_eq!(
            resolve_status(&c, &viewer, DEFAULT_TIMEZONE, at("2025-06-02T00:00:00Z")),
            Some(OpenCallStatus::Ended)
        );

        // No cutoff at all stays open
        let open = call(Some(CallType::Email), None, None, None);
        assert_eq!(
            resolve_status(&open, &viewer, DEFAULT_TIMEZONE, at("2099-01-01T00:00:00Z")),
            Some(OpenCallStatus::Active)
        );
    }

    #[test]
    fn test_unpublished_is_none() {
        let mut c = call(
            Some(CallType::Fixed),
            Some("2025-01-01T00:00:00Z"),
            Some("2025-01-31T23:59:59Z"),
            Some("UTC"),
        );
        c.state = PublicationState::Pending;
        let viewer = TimezonePreference::none();

        assert_eq!(
            resolve_status(&c, &viewer, DEFAULT_TIMEZONE, at("2025-01-15T12:00:00Z")),
            None
        );
    }

    #[test]
    fn test_fixed_without_parseable_end_is_none() {
        let c = call(
            Some(CallType::Fixed),
            Some("2025-01-01T00:00:00Z"),
            Some("sometime in spring"),
            Some("UTC"),
        );
        let viewer = TimezonePreference::none();

        assert_eq!(
            resolve_status(&c, &viewer, DEFAULT_TIMEZONE, at("2025-01-15T12:00:00Z")),
            None
        );
    }

    #[test]
    fn test_missing_call_type_is_none() {
        let c = call(None, None, Some("2025-01-31T23:59:59Z"), Some("UTC"));
        let viewer = TimezonePreference::none();

        assert_eq!(
            resolve_status(&c, &viewer, DEFAULT_TIMEZONE, at("2025-01-15T12:00:00Z")),
            None
        );
    }

    #[test]
    fn test_zone_resolution_order() {
        // Viewer preference wins over the organizer zone.
        let viewer = TimezonePreference::fixed(Tz::America__New_York);
        assert_eq!(
            resolve_zone(Some("Asia/Tokyo"), &viewer, DEFAULT_TIMEZONE),
            Tz::America__New_York
        );

        // Organizer zone wins when the viewer has no preference.
        let none = TimezonePreference::none();
        assert_eq!(
            resolve_zone(Some("Asia/Tokyo"), &none, DEFAULT_TIMEZONE),
            Tz::Asia__Tokyo
        );

        // Garbage organizer zones fall back.
        assert_eq!(
            resolve_zone(Some("Mars/Olympus"), &none, DEFAULT_TIMEZONE),
            DEFAULT_TIMEZONE
        );
        assert_eq!(resolve_zone(None, &none, DEFAULT_TIMEZONE), DEFAULT_TIMEZONE);
    }

    #[test]
    fn test_status_is_deterministic() {
        let c = call(
            Some(CallType::Fixed),
            Some("2025-01-01T00:00:00Z"),
            Some("2025-01-31T23:59:59Z"),
            Some("America/Los_Angeles"),
        );
        let viewer = TimezonePreference::none();
        let now = at("2025-01-15T12:00:00Z");

        let first = resolve_status(&c, &viewer, DEFAULT_TIMEZONE, now);
        for _ in 0..10 {
            assert_eq!(resolve_status(&c, &viewer, DEFAULT_TIMEZONE, now), first);
        }
    }
}
