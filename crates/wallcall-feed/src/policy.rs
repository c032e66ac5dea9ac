//! Injectable feed policy.
//!
//! Everything here is reviewable configuration, not engine logic: the
//! fallback timezone for organizers who never specified one, and the
//! country-heading disambiguation sets used by the group key resolver.

use chrono_tz::Tz;
use std::collections::HashSet;

/// Fallback timezone when neither the viewer nor the organizer specified one
pub const DEFAULT_TIMEZONE: Tz = Tz::Europe__Berlin;

/// Feed-wide policy knobs, threaded into the engine per invocation
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FeedPolicy {
    /// Zone used when no organizer timezone resolves
    pub default_timezone: Tz,

    /// Countries whose heading always carries a subdivision subheading
    pub subheading_countries: HashSet<String>,

    /// Short codes that collide with other place names and need the
    /// same disambiguation, e.g. "CA" or "GE"
    pub ambiguous_abbreviations: HashSet<String>,
}

impl Default for FeedPolicy {
    fn default() -> Self {
        Self {
            default_timezone: DEFAULT_TIMEZONE,
            subheading_countries: [
                "United States",
                "Canada",
                "Australia",
                "United Kingdom",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            ambiguous_abbreviations: ["CA", "GE", "IN", "AL"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl FeedPolicy {
    /// Whether a country heading needs a disambiguating subheading
    pub fn country_needs_subheading(&self, country: &str, abbr: Option<&str>) -> bool {
        self.subheading_countries.contains(country)
            || abbr.is_some_and(|a| self.ambiguous_abbreviations.contains(a))
    }
}
