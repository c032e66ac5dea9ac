//! Filter pipeline: pure predicates over feed items.
//!
//! Every predicate is optional and independently toggleable; absent
//! means no-op. They compose by logical AND, so application order never
//! changes the result set — the boolean flags just run first because
//! they are the cheap checks.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use wallcall_core::{Continent, EventCategory};

use crate::enrich::FeedItem;

/// One request's filter flags. Empty sets mean no restriction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedFilter {
    /// Keep only bookmarked items
    pub bookmarked_only: bool,

    /// When false (the default), hidden items are excluded
    pub show_hidden: bool,

    /// Keep only items the viewer has applied to
    pub applied_only: bool,

    /// Allowed categories
    pub categories: HashSet<EventCategory>,

    /// Allowed type tags; an item passes when ANY of its tags is listed
    pub event_types: HashSet<String>,

    /// Allowed continents
    pub continents: HashSet<Continent>,
}

impl FeedFilter {
    /// Whether one item survives every predicate
    pub fn matches(&self, item: &FeedItem) -> bool {
        if self.bookmarked_only && !item.bookmarked {
            return false;
        }
        if !self.show_hidden && item.hidden {
            return false;
        }
        if self.applied_only && !item.applied {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(&item.category) {
            return false;
        }
        if !self.event_types.is_empty()
            && !item.type_tags.iter().any(|tag| self.event_types.contains(tag))
        {
            return false;
        }
        if !self.continents.is_empty() {
            match item.continent {
                Some(continent) if self.continents.contains(&continent) => {}
                _ => return false,
            }
        }
        true
    }

    /// Apply the pipeline, keeping input order
    pub fn apply(&self, items: Vec<FeedItem>) -> Vec<FeedItem> {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}
