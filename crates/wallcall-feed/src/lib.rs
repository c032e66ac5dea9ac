//! # Wallcall Feed
//!
//! Open-call status and feed ranking engine for the Wallcall directory.
//!
//! Given a raw candidate set of events and open calls, the engine derives
//! each call's temporal status, enriches every event with the viewer's
//! interaction state, filters, orders with defined tie-breaks, and
//! partitions the result into labeled groups.
//!
//! ```text
//! raw rows ──► enrich ──► filter ──► sort ──► paginate ──► group
//! ```
//!
//! Everything is a projection: no component mutates its input, nothing is
//! persisted, and every value is recomputed from the inputs on each call.
//! Malformed data (unparseable dates, unknown countries, garbage sort
//! keys) degrades to a defined bucket or default; a single bad record
//! never fails the feed.

pub mod assemble;
pub mod enrich;
pub mod filter;
pub mod group;
pub mod interactions;
pub mod policy;
pub mod sort;
pub mod status;

pub use assemble::{FeedEngine, FeedPage, FeedRequest, ViewerProfile, DEFAULT_PAGE_SIZE};
pub use enrich::{DateTextRules, Enricher, Entitlements, FeedItem, StartKey, ViewerContext};
pub use filter::FeedFilter;
pub use group::{DayParts, FeedGroup, GroupKey, Grouping, ViewMode};
pub use interactions::InteractionIndex;
pub use policy::{FeedPolicy, DEFAULT_TIMEZONE};
pub use sort::{compare, sort_items, SortDirection, SortKey, SortSpec};
pub use status::{resolve_status, resolve_zone, OpenCallStatus, TimezonePreference};

/// Result type for wallcall-feed operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling a feed
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Source error: {0}")]
    Source(#[from] wallcall_core::Error),
}
