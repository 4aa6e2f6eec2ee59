//! Paged track loader - fetches and accumulates pages of tracks for one genre
//!
//! Pure state machine, no I/O: `start_*` methods hand back a [`FetchSpec`] for
//! the app layer to turn into a network command, and `apply_*` methods consume
//! the matching response. Every fetch carries a request id; a response whose id
//! is not the pending one is dropped, so superseded and post-teardown results
//! are no-ops.

use crate::constants::{DEFAULT_SCROLL_THRESHOLD, TRACK_QUALIFIER};
use crate::models::{set_collection_qualifier, Track};

/// Kind of fetch in flight
#[derive(Clone, Copy, Debug, PartialEq)]
enum FetchKind {
    Refresh,
    LoadMore,
}

/// A fetch the app layer should issue on behalf of this pager
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FetchSpec {
    pub request_id: u64,
    pub genre_id: u64,
    pub page: u32,
}

/// A fetch failure surfaced to the presentation layer
///
/// Transport failures carry no status code.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchError {
    pub status: Option<u16>,
    pub message: String,
}

struct PendingFetch {
    request_id: u64,
    kind: FetchKind,
    page: u32,
}

/// Loader state for one genre's track grid
///
/// Created when the tracks screen opens, replaced when it is re-entered,
/// dropped on navigation back. The page counter only advances when a load-more
/// succeeds; a failed fetch leaves it untouched so the retry asks for the same
/// page number again. Overlapping load-more calls are rejected while a fetch
/// is in flight; refresh supersedes whatever is pending.
pub struct TrackPager {
    genre_id: u64,
    page: u32,
    items: Vec<Track>,
    pending: Option<PendingFetch>,
    visible_threshold: usize,
    total_pages: Option<u32>,
    last_error: Option<FetchError>,
}

impl TrackPager {
    pub fn new(genre_id: u64) -> Self {
        TrackPager {
            genre_id,
            page: 1,
            items: Vec::new(),
            pending: None,
            visible_threshold: DEFAULT_SCROLL_THRESHOLD,
            total_pages: None,
            last_error: None,
        }
    }

    pub fn genre_id(&self) -> u64 {
        self.genre_id
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn items(&self) -> &[Track] {
        &self.items
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    #[allow(dead_code)] // Read by tests; the trigger check lives in should_load_more
    pub fn visible_threshold(&self) -> usize {
        self.visible_threshold
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// A refresh is in flight (full-screen progress, not the footer)
    pub fn is_refreshing(&self) -> bool {
        matches!(
            self.pending,
            Some(PendingFetch { kind: FetchKind::Refresh, .. })
        )
    }

    /// A load-more is in flight (footer indicator)
    pub fn is_loading_more(&self) -> bool {
        matches!(
            self.pending,
            Some(PendingFetch { kind: FetchKind::LoadMore, .. })
        )
    }

    #[allow(dead_code)] // Surfacing happens through apply_error's return value
    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// Begin a refresh: request page 1, superseding any in-flight fetch
    ///
    /// The superseded fetch's response goes stale by request id.
    pub fn start_refresh(&mut self, request_id: u64) -> FetchSpec {
        self.pending = Some(PendingFetch {
            request_id,
            kind: FetchKind::Refresh,
            page: 1,
        });
        FetchSpec {
            request_id,
            genre_id: self.genre_id,
            page: 1,
        }
    }

    /// Begin a load-more for the next page, unless a fetch is already in flight
    ///
    /// The page counter is not advanced here; it commits only when the fetch
    /// succeeds, so a failure retries the same page number.
    pub fn start_load_more(&mut self, request_id: u64) -> Option<FetchSpec> {
        if self.pending.is_some() {
            return None;
        }
        let page = self.page + 1;
        self.pending = Some(PendingFetch {
            request_id,
            kind: FetchKind::LoadMore,
            page,
        });
        Some(FetchSpec {
            request_id,
            genre_id: self.genre_id,
            page,
        })
    }

    /// Apply a successful fetch; stale request ids are dropped
    ///
    /// The batch is tagged with the display qualifier before it becomes
    /// visible. Refresh replaces the list, load-more appends and commits the
    /// page increment. Either way the scroll threshold becomes half the batch
    /// size, floored at the default.
    ///
    /// Returns true if the response was applied.
    pub fn apply_success(
        &mut self,
        request_id: u64,
        mut batch: Vec<Track>,
        total_pages: Option<u32>,
    ) -> bool {
        let pending = match self.pending.take() {
            Some(p) if p.request_id == request_id => p,
            other => {
                self.pending = other;
                return false;
            }
        };

        set_collection_qualifier(&mut batch, TRACK_QUALIFIER);
        self.visible_threshold = DEFAULT_SCROLL_THRESHOLD.max(batch.len() / 2);
        self.total_pages = total_pages.or(self.total_pages);
        self.last_error = None;

        match pending.kind {
            FetchKind::Refresh => {
                self.items = batch;
                self.page = 1;
            }
            FetchKind::LoadMore => {
                self.items.append(&mut batch);
                self.page = pending.page;
            }
        }
        true
    }

    /// Apply a failed fetch; stale request ids are dropped
    ///
    /// Items and page counter stay untouched. Returns the error for surfacing
    /// if the response was current.
    pub fn apply_error(
        &mut self,
        request_id: u64,
        status: Option<u16>,
        message: String,
    ) -> Option<FetchError> {
        match self.pending.take() {
            Some(p) if p.request_id == request_id => {
                let error = FetchError { status, message };
                self.last_error = Some(error.clone());
                Some(error)
            }
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// Infinite-scroll trigger: is the selection close enough to the bottom
    /// that the next page should be fetched?
    pub fn should_load_more(&self, selected: usize) -> bool {
        if self.pending.is_some() || self.items.is_empty() {
            return false;
        }
        self.items.len().saturating_sub(selected + 1) <= self.visible_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Track;

    fn batch(ids: &[u64]) -> Vec<Track> {
        ids.iter().map(|&id| Track::stub(id, format!("t{id}"))).collect()
    }

    fn titles(pager: &TrackPager) -> Vec<&str> {
        pager.items().iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_refresh_replaces_items_and_resets_page() {
        let mut pager = TrackPager::new(5);
        let spec = pager.start_refresh(1);
        assert_eq!(spec.page, 1);
        assert!(pager.apply_success(1, batch(&[1, 2, 3]), Some(4)));
        assert_eq!(titles(&pager), vec!["t1", "t2", "t3"]);
        assert_eq!(pager.page(), 1);

        // Advance a few pages, then refresh again: back to page 1
        let spec = pager.start_load_more(2).unwrap();
        assert_eq!(spec.page, 2);
        assert!(pager.apply_success(2, batch(&[4, 5]), None));
        assert_eq!(pager.page(), 2);

        pager.start_refresh(3);
        assert!(pager.apply_success(3, batch(&[9]), None));
        assert_eq!(pager.page(), 1);
        assert_eq!(titles(&pager), vec!["t9"]);
    }

    #[test]
    fn test_load_more_accumulates_in_call_order() {
        let mut pager = TrackPager::new(5);
        pager.start_refresh(1);
        pager.apply_success(1, batch(&[1, 2, 3]), None);

        for (req, ids) in [(2u64, [4u64, 5]), (3, [6, 7]), (4, [8, 9])] {
            let spec = pager.start_load_more(req).unwrap();
            assert!(pager.apply_success(req, batch(&ids), None));
            assert_eq!(pager.page(), spec.page);
        }

        // Concatenation in call order; page = 1 + number of successful load-mores
        assert_eq!(
            titles(&pager),
            vec!["t1", "t2", "t3", "t4", "t5", "t6", "t7", "t8", "t9"]
        );
        assert_eq!(pager.page(), 4);
    }

    #[test]
    fn test_every_applied_batch_is_tagged() {
        let mut pager = TrackPager::new(5);
        pager.start_refresh(1);
        pager.apply_success(1, batch(&[1, 2]), None);
        pager.start_load_more(2);
        pager.apply_success(2, batch(&[3]), None);
        assert!(pager
            .items()
            .iter()
            .all(|t| t.qualifier.as_deref() == Some(TRACK_QUALIFIER)));
    }

    #[test]
    fn test_threshold_is_half_batch_size_floored_at_one() {
        let mut pager = TrackPager::new(5);
        pager.start_refresh(1);
        pager.apply_success(1, batch(&(1..=10).collect::<Vec<_>>()), None);
        assert_eq!(pager.visible_threshold(), 5);

        pager.start_load_more(2);
        pager.apply_success(2, batch(&[11, 12]), None);
        assert_eq!(pager.visible_threshold(), 1);

        pager.start_load_more(3);
        pager.apply_success(3, batch(&[]), None);
        assert_eq!(pager.visible_threshold(), 1);
    }

    #[test]
    fn test_two_page_browsing_session() {
        let mut pager = TrackPager::new(7);
        pager.start_refresh(1);
        pager.apply_success(1, batch(&[1, 2, 3]), None);
        assert_eq!(pager.items().len(), 3);
        assert_eq!(pager.page(), 1);

        let spec = pager.start_load_more(2).unwrap();
        assert_eq!(spec.page, 2);
        pager.apply_success(2, batch(&[4, 5]), None);
        assert_eq!(pager.items().len(), 5);
        assert_eq!(pager.page(), 2);
        assert_eq!(pager.visible_threshold(), 1);
    }

    #[test]
    fn test_load_more_failure_keeps_page() {
        // Rollback policy: the counter never advances on a failed fetch, so
        // the retry requests the same page number again.
        let mut pager = TrackPager::new(5);
        pager.start_refresh(1);
        pager.apply_success(1, batch(&[1, 2, 3]), None);
        pager.start_load_more(2);
        pager.apply_success(2, batch(&[4, 5]), None);
        assert_eq!(pager.page(), 2);

        let spec = pager.start_load_more(3).unwrap();
        assert_eq!(spec.page, 3);
        let err = pager
            .apply_error(3, Some(500), String::from("Something went wrong!"))
            .unwrap();
        assert_eq!(err.status, Some(500));
        assert_eq!(pager.items().len(), 5);
        assert_eq!(pager.page(), 2);

        // Retry asks for page 3 again
        let spec = pager.start_load_more(4).unwrap();
        assert_eq!(spec.page, 3);
    }

    #[test]
    fn test_overlapping_load_more_is_rejected() {
        let mut pager = TrackPager::new(5);
        pager.start_refresh(1);
        pager.apply_success(1, batch(&[1, 2]), None);
        assert!(pager.start_load_more(2).is_some());
        assert!(pager.is_loading_more());
        assert!(pager.start_load_more(3).is_none());
    }

    #[test]
    fn test_refresh_supersedes_inflight_load_more() {
        let mut pager = TrackPager::new(5);
        pager.start_refresh(1);
        pager.apply_success(1, batch(&[1, 2]), None);
        pager.start_load_more(2);
        pager.start_refresh(3);
        assert!(pager.is_refreshing());

        // The superseded load-more result is stale and dropped
        assert!(!pager.apply_success(2, batch(&[3, 4]), None));
        assert_eq!(pager.items().len(), 2);

        pager.apply_success(3, batch(&[9]), None);
        assert_eq!(titles(&pager), vec!["t9"]);
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn test_unknown_request_id_is_ignored() {
        let mut pager = TrackPager::new(5);
        pager.start_refresh(1);
        assert!(!pager.apply_success(99, batch(&[1]), None));
        assert!(pager.apply_error(99, Some(404), String::from("nope")).is_none());
        // Pending fetch still live and applies normally
        assert!(pager.is_refreshing());
        assert!(pager.apply_success(1, batch(&[1]), None));
    }

    #[test]
    fn test_should_load_more_respects_threshold_and_guard() {
        let mut pager = TrackPager::new(5);
        assert!(!pager.should_load_more(0));

        pager.start_refresh(1);
        pager.apply_success(1, batch(&(1..=10).collect::<Vec<_>>()), None);
        assert_eq!(pager.visible_threshold(), 5);
        // 10 items, threshold 5: indices 4.. are within range of the bottom
        assert!(!pager.should_load_more(3));
        assert!(pager.should_load_more(4));
        assert!(pager.should_load_more(9));

        // Guard: no trigger while a fetch is in flight
        pager.start_load_more(2);
        assert!(!pager.should_load_more(9));
    }
}
