//! Open call model: timing types, windows, eligibility, compensation

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event::{DateInput, PublicationState};

/// Timing model of an open call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallType {
    /// Hard deadline window
    Fixed,
    /// Always open once published
    Rolling,
    /// Open submissions by email, with an optional cutoff
    Email,
}

impl CallType {
    /// Parse a caller-supplied call type string; unknown values yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Some(CallType::Fixed),
            "rolling" => Some(CallType::Rolling),
            "email" => Some(CallType::Email),
            _ => None,
        }
    }
}

/// The call's date window, exactly as the organizer specified it.
///
/// The timezone is a free-text IANA name; it may be absent or invalid,
/// and resolution (including the fallback) happens at read time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallWindow {
    pub start: Option<DateInput>,
    pub end: Option<DateInput>,
    pub timezone: Option<String>,
}

/// Who may apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EligibilityType {
    International,
    National,
    RegionalLocal,
    Other,
    #[default]
    Unknown,
}

/// Eligibility descriptor: type plus qualifying place names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Eligibility {
    pub kind: EligibilityType,

    /// Qualifying place names (countries, regions, cities)
    pub places: Vec<String>,

    /// Free-text details
    pub details: Option<String>,
}

/// Compensation descriptor. Carried through the feed untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Compensation {
    /// Total project budget, in the listed currency
    pub budget: Option<f64>,

    /// Currency label, e.g. "USD"
    pub currency: Option<String>,
}

/// An open call, belonging to exactly one event.
///
/// At most one active call per event is enforced upstream by the
/// submission workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenCall {
    /// Unique identifier
    pub id: Uuid,

    /// Owning event
    pub event_id: Uuid,

    /// Publication state
    pub state: PublicationState,

    /// Timing model; absent when the organizer has not chosen one yet
    pub call_type: Option<CallType>,

    /// Date window
    pub window: CallWindow,

    /// Who may apply
    pub eligibility: Eligibility,

    /// Compensation passthrough
    pub compensation: Compensation,
}
