//! Feed assembly facade.
//!
//! Orchestrates the full pipeline over an already-fetched candidate set:
//! enrich → filter → sort → paginate → group. Stateless and synchronous;
//! every invocation allocates its own index and item list, so concurrent
//! requests never share mutable state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wallcall_core::{CandidateEvent, EventSource, InteractionSource, PublicationState};

use crate::enrich::{Enricher, Entitlements, FeedItem, ViewerContext};
use crate::filter::FeedFilter;
use crate::group::{FeedGroup, Grouping, ViewMode};
use crate::interactions::InteractionIndex;
use crate::policy::FeedPolicy;
use crate::sort::{sort_items, SortSpec};
use crate::status::TimezonePreference;

/// Default page size when the caller does not specify one
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// One feed request: filters, ordering, pagination, presentation mode.
///
/// Immutable per call; the engine never reads request state from
/// anywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedRequest {
    pub filter: FeedFilter,
    pub sort: SortSpec,

    /// 1-based page number; values below 1 clamp to 1
    pub page: usize,

    /// Items per page; 0 yields an empty page with the true total
    pub limit: usize,

    /// Return labeled groups instead of a flat slice
    pub grouped: bool,

    pub view_mode: ViewMode,
}

impl Default for FeedRequest {
    fn default() -> Self {
        Self {
            filter: FeedFilter::default(),
            sort: SortSpec::default(),
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            grouped: false,
            view_mode: ViewMode::default(),
        }
    }
}

/// The viewer as resolved by the caller's session layer
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewerProfile {
    pub viewer_id: Option<Uuid>,
    pub timezone: TimezonePreference,
    pub entitlements: Entitlements,
}

impl ViewerProfile {
    /// A viewer with no session
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// One page of the assembled feed.
///
/// Exactly one of `items` / `groups` carries the page: a flat request
/// fills `items`; a grouped request fills `groups` and leaves `items`
/// empty. `total` always counts the full filtered set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPage {
    pub items: Vec<FeedItem>,
    pub groups: Option<Vec<FeedGroup>>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

/// The engine facade
#[derive(Debug, Clone, Default)]
pub struct FeedEngine {
    policy: FeedPolicy,
}

impl FeedEngine {
    pub fn new(policy: FeedPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &FeedPolicy {
        &self.policy
    }

    /// Assemble one page from an already-fetched candidate set.
    ///
    /// Pure computation: same candidates, viewer, request, and `now`
    /// always produce the same page.
    pub fn assemble(
        &self,
        candidates: &[CandidateEvent],
        viewer: &ViewerContext,
        request: &FeedRequest,
        now: DateTime<Utc>,
    ) -> FeedPage {
        let enricher = Enricher::new(viewer, &self.policy);
        let items: Vec<FeedItem> = candidates
            .iter()
            .map(|candidate| enricher.enrich(candidate, now))
            .collect();
        let candidate_count = items.len();

        let mut filtered = request.filter.apply(items);
        sort_items(&mut filtered, request.sort);
        let total = filtered.len();

        let page = request.page.max(1);
        let start = (page - 1).saturating_mul(request.limit).min(total);
        let end = start.saturating_add(request.limit).min(total);
        let slice: Vec<FeedItem> = filtered[start..end].to_vec();

        tracing::debug!(
            candidates = candidate_count,
            total,
            page,
            returned = slice.len(),
            grouped = request.grouped,
            "assembled feed page"
        );

        if request.grouped {
            let grouping = Grouping {
                key: request.sort.key,
                viewer: &viewer.timezone,
                policy: &self.policy,
                view_mode: request.view_mode,
                now,
            };
            FeedPage {
                items: Vec::new(),
                groups: Some(grouping.partition(slice)),
                total,
                page,
                limit: request.limit,
            }
        } else {
            FeedPage {
                items: slice,
                groups: None,
                total,
                page,
                limit: request.limit,
            }
        }
    }

    /// Fetch candidates and viewer interactions through the storage
    /// contracts, then assemble.
    ///
    /// Source failures propagate; the caller decides whether to retry,
    /// fail the request, or fall back to an anonymous feed.
    pub fn feed<E: EventSource, I: InteractionSource>(
        &self,
        events: &E,
        interactions: &I,
        profile: &ViewerProfile,
        request: &FeedRequest,
        event_id: Option<Uuid>,
    ) -> crate::Result<FeedPage> {
        let candidates = events.fetch_candidates(&[PublicationState::Published], event_id)?;

        let index = match profile.viewer_id {
            Some(viewer_id) => InteractionIndex::build(&interactions.fetch_for_viewer(viewer_id)?),
            None => InteractionIndex::empty(),
        };
        let viewer = ViewerContext {
            viewer_id: profile.viewer_id,
            index,
            timezone: profile.timezone,
            entitlements: profile.entitlements,
        };

        Ok(self.assemble(&candidates, &viewer, request, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallcall_core::{Event, EventCategory, EventSchedule, Location};

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn candidate(name: &str) -> CandidateEvent {
        CandidateEvent {
            event: Event {
                id: Uuid::new_v4(),
                name: name.to_string(),
                organizer: "Org".to_string(),
                category: EventCategory::Event,
                type_tags: vec![],
                location: Location::default(),
                state: PublicationState::Published,
                schedule: EventSchedule::default(),
                invite_only: false,
            },
            open_call: None,
        }
    }

    #[test]
    fn test_pagination_slices_and_counts() {
        let candidates: Vec<CandidateEvent> =
            (0..7).map(|i| candidate(&format!("Event {}", i))).collect();
        let engine = FeedEngine::default();
        let viewer = ViewerContext::anonymous();
        let now = at("2025-01-15T12:00:00Z");

        let request = FeedRequest {
            page: 2,
            limit: 3,
            ..Default::default()
        };
        let page = engine.assemble(&candidates, &viewer, &request, now);
        assert_eq!(page.total, 7);
        assert_eq!(page.items.len(), 3);

        let last = FeedRequest {
            page: 3,
            limit: 3,
            ..Default::default()
        };
        assert_eq!(engine.assemble(&candidates, &viewer, &last, now).items.len(), 1);

        let beyond = FeedRequest {
            page: 9,
            limit: 3,
            ..Default::default()
        };
        let empty = engine.assemble(&candidates, &viewer, &beyond, now);
        assert_eq!(empty.items.len(), 0);
        assert_eq!(empty.total, 7);
    }

    #[test]
    fn test_page_zero_clamps_to_one() {
        let candidates = vec![candidate("Only")];
        let engine = FeedEngine::default();
        let viewer = ViewerContext::anonymous();

        let request = FeedRequest {
            page: 0,
            limit: 10,
            ..Default::default()
        };
        let page = engine.assemble(&candidates, &viewer, &request, at("2025-01-15T12:00:00Z"));
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn test_zero_limit_keeps_total() {
        let candidates: Vec<CandidateEvent> =
            (0..4).map(|i| candidate(&format!("Event {}", i))).collect();
        let engine = FeedEngine::default();
        let viewer = ViewerContext::anonymous();

        let request = FeedRequest {
            limit: 0,
            ..Default::default()
        };
        let page = engine.assemble(&candidates, &viewer, &request, at("2025-01-15T12:00:00Z"));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 4);
    }

    #[test]
    fn test_grouped_output_is_exclusive() {
        let candidates = vec![candidate("Alley Art"), candidate("Banksy Walls")];
        let engine = FeedEngine::default();
        let viewer = ViewerContext::anonymous();

        let request = FeedRequest {
            grouped: true,
            ..Default::default()
        };
        let page = engine.assemble(&candidates, &viewer, &request, at("2025-01-15T12:00:00Z"));
        assert!(page.items.is_empty());
        let groups = page.groups.unwrap();
        assert_eq!(groups.iter().map(|g| g.items.len()).sum::<usize>(), 2);
    }
}
