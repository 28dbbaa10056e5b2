//! Pagination and search-overlay state for the recipe feed.
//!
//! `FeedController` is a pure state machine: it holds the accumulated feed,
//! the pagination counters, and the search overlay, and it answers state
//! transitions with `FeedCommand`s telling the caller which fetches to issue.
//! All network I/O lives in the API layer; all scheduling lives in the event
//! loop. That keeps every invariant testable without a server.
//!
//! The loading flag is advisory mutual exclusion: it is set when a page
//! command is issued and cleared by `page_loaded`/`page_failed`. Every
//! pagination-triggering path honors it, so page fetches are issued strictly
//! one at a time and in increasing page order.

use crate::api::Recipe;
use crate::board::scroll::ScrollSentinel;
use std::ops::Range;

/// Number of recipes per board page. Fixed by the server's paging contract.
pub const RECIPES_PER_PAGE: usize = 6;

/// Which item-count source currently drives pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedMode {
    /// Server-paged feed; totals come from `/board/total`.
    Paged,
    /// Search overlay active; totals derive from the result count.
    Searching,
}

/// Fetch work the controller asks the caller to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedCommand {
    /// Fetch one board page (1-based).
    FetchPage(u32),
    /// Re-fetch the board total.
    FetchTotal,
}

/// Feed state: accumulated pages, search overlay, pagination counters.
#[derive(Debug)]
pub struct FeedController {
    /// Accumulated paged feed, in page order.
    recipes: Vec<Recipe>,
    /// Search overlay result set; kept only while `mode == Searching`.
    search_results: Vec<Recipe>,
    mode: FeedMode,
    /// Last successfully loaded page (1-based). Confirmed on fetch success,
    /// never advanced optimistically, so a failed fetch leaves the same page
    /// as the next target.
    current_page: u32,
    /// 0 until the first total arrives.
    total_pages: u32,
    /// Advisory flag: a page fetch is in flight.
    loading: bool,
    sentinel: ScrollSentinel,
}

impl Default for FeedController {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedController {
    pub fn new() -> Self {
        Self {
            recipes: Vec::new(),
            search_results: Vec::new(),
            mode: FeedMode::Paged,
            current_page: 1,
            total_pages: 0,
            loading: false,
            sentinel: ScrollSentinel::new(),
        }
    }

    /// Pages needed for `total` items at the fixed page size.
    pub fn page_count(total: u64) -> u32 {
        total.div_ceil(RECIPES_PER_PAGE as u64) as u32
    }

    /// Begin a pagination session: reset to page 1 and ask for the total and
    /// the first page. Called on mount and whenever the board view is
    /// re-entered.
    pub fn start(&mut self) -> Vec<FeedCommand> {
        self.recipes.clear();
        self.search_results.clear();
        self.mode = FeedMode::Paged;
        self.current_page = 1;
        self.total_pages = 0;
        self.loading = true;
        self.sentinel.disconnect();
        vec![FeedCommand::FetchTotal, FeedCommand::FetchPage(1)]
    }

    /// A page fetch succeeded: append the items and confirm the page.
    ///
    /// While the search overlay is active the items still accumulate (the
    /// paged feed is hidden, not discarded) but the confirmed page counter is
    /// left to the overlay's own pagination.
    pub fn page_loaded(&mut self, page: u32, items: Vec<Recipe>) {
        self.loading = false;
        if self.mode == FeedMode::Paged {
            self.current_page = page;
        }
        tracing::debug!(page, count = items.len(), "Page appended to feed");
        self.recipes.extend(items);
    }

    /// A page fetch failed: clear the loading flag and change nothing else.
    /// The next scroll trigger re-attempts the same page.
    pub fn page_failed(&mut self) {
        self.loading = false;
    }

    /// The board total arrived. Ignored while searching: the overlay's
    /// result count is the active total source, and a stale board total must
    /// not overwrite it.
    pub fn total_loaded(&mut self, total: u64) {
        if self.mode == FeedMode::Paged {
            self.total_pages = Self::page_count(total);
            tracing::debug!(total, total_pages = self.total_pages, "Board total updated");
        }
    }

    /// Activate the search overlay with a finished result set.
    ///
    /// The paged feed stays in memory, hidden. Pagination re-derives from the
    /// result count: a set that fits one page forces `total_pages` to 1.
    pub fn activate_search(&mut self, results: Vec<Recipe>) {
        self.mode = FeedMode::Searching;
        self.current_page = 1;
        self.total_pages = if results.len() <= RECIPES_PER_PAGE {
            1
        } else {
            Self::page_count(results.len() as u64)
        };
        self.search_results = results;
        self.sentinel.disconnect();
    }

    /// Deactivate the search overlay (the search input went empty).
    ///
    /// The pagination session restarts: accumulation is cleared, the page
    /// resets to 1, and the caller re-fetches the board total and page 1.
    /// A no-op when no overlay is active.
    pub fn deactivate_search(&mut self) -> Vec<FeedCommand> {
        if self.mode == FeedMode::Paged {
            return Vec::new();
        }
        self.search_results.clear();
        self.mode = FeedMode::Paged;
        self.start()
    }

    /// Attach the scroll sentinel to the last rendered row.
    ///
    /// Called once per render pass. Skipped entirely while a page fetch is in
    /// flight, so a burst of renders during a load cannot queue an advance.
    /// Attaching replaces any prior target; `None` (nothing rendered)
    /// releases the sentinel.
    pub fn attach_sentinel(&mut self, last_index: Option<usize>) {
        if self.loading {
            return;
        }
        match last_index {
            Some(index) => self.sentinel.observe(index),
            None => self.sentinel.disconnect(),
        }
    }

    /// Check the sentinel against the visible row range and advance
    /// pagination when it fires.
    ///
    /// Fires at most once per attachment: a trigger releases the sentinel,
    /// sets the loading flag, and returns the fetch for the next page. Inert
    /// when loading, when the overlay is active, or when the last page is
    /// already confirmed.
    pub fn poll_sentinel(&mut self, visible: &Range<usize>) -> Option<FeedCommand> {
        if self.loading || self.mode == FeedMode::Searching {
            return None;
        }
        if !self.sentinel.is_triggered(visible) {
            return None;
        }
        if self.current_page >= self.total_pages {
            return None;
        }

        let next = self.current_page + 1;
        self.sentinel.disconnect();
        self.loading = true;
        tracing::debug!(page = next, "Scroll trigger advancing pagination");
        Some(FeedCommand::FetchPage(next))
    }

    /// The recipes the board view should display: the overlay while
    /// searching, the accumulated feed otherwise.
    pub fn visible_recipes(&self) -> &[Recipe] {
        match self.mode {
            FeedMode::Paged => &self.recipes,
            FeedMode::Searching => &self.search_results,
        }
    }

    /// The accumulated paged feed, regardless of overlay state.
    pub fn paged_recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn mode(&self) -> FeedMode {
        self.mode
    }

    pub fn is_searching(&self) -> bool {
        self.mode == FeedMode::Searching
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Result count while the overlay is active.
    pub fn search_result_count(&self) -> usize {
        self.search_results.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn recipe(id: i64) -> Recipe {
        Recipe {
            id,
            title: format!("Recipe {}", id),
            description: String::new(),
            image_url: String::new(),
            like_count: 0,
        }
    }

    fn page_of(ids: Range<i64>) -> Vec<Recipe> {
        ids.map(recipe).collect()
    }

    /// Drive a freshly started controller to a Ready state with one loaded
    /// page and a known total.
    fn ready_controller(total: u64) -> FeedController {
        let mut feed = FeedController::new();
        let commands = feed.start();
        assert_eq!(
            commands,
            vec![FeedCommand::FetchTotal, FeedCommand::FetchPage(1)]
        );
        feed.total_loaded(total);
        feed.page_loaded(1, page_of(0..6));
        feed
    }

    // ------------------------------------------------------------------
    // Pagination arithmetic
    // ------------------------------------------------------------------

    #[test]
    fn test_page_count_boundaries() {
        assert_eq!(FeedController::page_count(0), 0);
        assert_eq!(FeedController::page_count(1), 1);
        assert_eq!(FeedController::page_count(6), 1);
        assert_eq!(FeedController::page_count(7), 2);
        assert_eq!(FeedController::page_count(18), 3);
    }

    proptest! {
        #[test]
        fn prop_page_count_is_ceiling_division(total in 0u64..100_000) {
            let pages = FeedController::page_count(total) as u64;
            // Enough pages for every item, and the last page is non-empty.
            prop_assert!(pages * 6 >= total);
            prop_assert!(pages == 0 || (pages - 1) * 6 < total);
        }
    }

    // ------------------------------------------------------------------
    // Accumulation and scroll-triggered advancement
    // ------------------------------------------------------------------

    #[test]
    fn test_feed_accumulates_in_page_order() {
        let mut feed = ready_controller(18);
        assert_eq!(feed.total_pages(), 3);
        assert_eq!(feed.visible_recipes().len(), 6);

        // Last row of page 1 scrolls into view
        feed.attach_sentinel(Some(5));
        let command = feed.poll_sentinel(&(0..6));
        assert_eq!(command, Some(FeedCommand::FetchPage(2)));

        feed.page_loaded(2, page_of(6..12));
        assert_eq!(feed.current_page(), 2);
        assert_eq!(feed.visible_recipes().len(), 12);

        // Original order preserved across the page boundary
        let ids: Vec<i64> = feed.visible_recipes().iter().map(|r| r.id).collect();
        assert_eq!(ids, (0..12).collect::<Vec<i64>>());
    }

    #[test]
    fn test_attach_is_noop_while_loading() {
        let mut feed = FeedController::new();
        feed.start(); // Page 1 fetch in flight
        assert!(feed.is_loading());

        // A burst of render passes during the in-flight fetch
        for _ in 0..5 {
            feed.attach_sentinel(Some(5));
            assert_eq!(feed.poll_sentinel(&(0..6)), None);
        }
        assert_eq!(feed.current_page(), 1);

        feed.total_loaded(18);
        feed.page_loaded(1, page_of(0..6));
        assert!(!feed.is_loading());

        // Only now does an attachment stick and fire
        feed.attach_sentinel(Some(5));
        assert_eq!(feed.poll_sentinel(&(0..6)), Some(FeedCommand::FetchPage(2)));
    }

    #[test]
    fn test_trigger_fires_once_per_attachment() {
        let mut feed = ready_controller(18);

        feed.attach_sentinel(Some(5));
        assert_eq!(feed.poll_sentinel(&(0..6)), Some(FeedCommand::FetchPage(2)));
        // Sentinel released and loading set: repeat polls stay quiet
        assert_eq!(feed.poll_sentinel(&(0..6)), None);
    }

    #[test]
    fn test_sentinel_inert_on_last_page() {
        let mut feed = ready_controller(6); // One page total
        assert_eq!(feed.total_pages(), 1);

        feed.attach_sentinel(Some(5));
        assert_eq!(feed.poll_sentinel(&(0..6)), None);
        assert_eq!(feed.current_page(), 1);
    }

    #[test]
    fn test_sentinel_quiet_while_target_below_fold() {
        let mut feed = ready_controller(18);
        feed.attach_sentinel(Some(5));

        // Viewport shows rows 0..4 only
        assert_eq!(feed.poll_sentinel(&(0..5)), None);
        // Scrolls down; row 5 enters
        assert_eq!(feed.poll_sentinel(&(2..7)), Some(FeedCommand::FetchPage(2)));
    }

    #[test]
    fn test_failed_page_fetch_retargets_same_page() {
        let mut feed = ready_controller(18);

        feed.attach_sentinel(Some(5));
        assert_eq!(feed.poll_sentinel(&(0..6)), Some(FeedCommand::FetchPage(2)));

        feed.page_failed();
        assert!(!feed.is_loading());
        assert_eq!(feed.visible_recipes().len(), 6); // Feed unchanged
        assert_eq!(feed.current_page(), 1); // Never advanced past the failure

        // Next render re-attaches; the same page is re-attempted
        feed.attach_sentinel(Some(5));
        assert_eq!(feed.poll_sentinel(&(0..6)), Some(FeedCommand::FetchPage(2)));
    }

    // ------------------------------------------------------------------
    // Search overlay
    // ------------------------------------------------------------------

    #[test]
    fn test_search_small_result_set_forces_single_page() {
        let mut feed = ready_controller(18);
        feed.activate_search(page_of(0..4));

        assert!(feed.is_searching());
        assert_eq!(feed.current_page(), 1);
        assert_eq!(feed.total_pages(), 1);
        assert_eq!(feed.visible_recipes().len(), 4);
    }

    #[test]
    fn test_search_page_size_boundary() {
        let mut feed = ready_controller(18);

        feed.activate_search(page_of(0..6));
        assert_eq!(feed.total_pages(), 1); // Exactly one page: forced to 1

        feed.activate_search(page_of(0..7));
        assert_eq!(feed.total_pages(), 2); // One over: ceil takes over
    }

    #[test]
    fn test_search_overlay_hides_but_retains_paged_feed() {
        let mut feed = ready_controller(18);
        feed.attach_sentinel(Some(5));
        feed.poll_sentinel(&(0..6));
        feed.page_loaded(2, page_of(6..12));
        assert_eq!(feed.current_page(), 2);

        // User types a query yielding 4 results while viewing page 2
        feed.activate_search(page_of(100..104));

        assert_eq!(feed.current_page(), 1);
        assert_eq!(feed.total_pages(), 1);
        assert_eq!(feed.visible_recipes().len(), 4);
        assert_eq!(feed.paged_recipes().len(), 12); // Hidden, not discarded
    }

    #[test]
    fn test_total_arriving_during_search_is_ignored() {
        let mut feed = ready_controller(18);
        feed.activate_search(page_of(0..4));
        assert_eq!(feed.total_pages(), 1);

        // A board total landing late must not clobber the search-derived count
        feed.total_loaded(60);
        assert_eq!(feed.total_pages(), 1);
    }

    #[test]
    fn test_scroll_trigger_inert_during_search() {
        let mut feed = ready_controller(60);
        feed.activate_search(page_of(0..20)); // 20 results: 4 derived pages

        feed.attach_sentinel(Some(19));
        assert_eq!(feed.poll_sentinel(&(0..20)), None);
    }

    #[test]
    fn test_deactivate_restarts_pagination() {
        let mut feed = ready_controller(18);
        feed.page_loaded(2, page_of(6..12));
        feed.activate_search(page_of(100..104));

        let commands = feed.deactivate_search();
        assert_eq!(
            commands,
            vec![FeedCommand::FetchTotal, FeedCommand::FetchPage(1)]
        );
        assert!(!feed.is_searching());
        assert!(feed.is_loading());
        assert_eq!(feed.current_page(), 1);
        assert_eq!(feed.total_pages(), 0); // Unknown until the fresh total lands
        assert!(feed.visible_recipes().is_empty());

        // Fresh total and page 1 re-derive the paged counts
        feed.total_loaded(18);
        feed.page_loaded(1, page_of(0..6));
        assert_eq!(feed.total_pages(), 3);
        assert_eq!(feed.visible_recipes().len(), 6);
    }

    #[test]
    fn test_deactivate_without_active_search_is_noop() {
        let mut feed = ready_controller(18);
        let commands = feed.deactivate_search();
        assert!(commands.is_empty());
        assert_eq!(feed.visible_recipes().len(), 6);
    }

    #[test]
    fn test_late_page_during_search_accumulates_hidden() {
        let mut feed = ready_controller(18);
        feed.attach_sentinel(Some(5));
        feed.poll_sentinel(&(0..6)); // Page 2 in flight

        feed.activate_search(page_of(100..104));
        // The in-flight page lands while the overlay is up
        feed.page_loaded(2, page_of(6..12));

        assert_eq!(feed.visible_recipes().len(), 4); // Overlay untouched
        assert_eq!(feed.current_page(), 1); // Overlay pagination untouched
        assert_eq!(feed.paged_recipes().len(), 12); // Hidden feed grew
        assert!(!feed.is_loading());
    }

    // ------------------------------------------------------------------
    // Session restart
    // ------------------------------------------------------------------

    #[test]
    fn test_start_clears_previous_session() {
        let mut feed = ready_controller(18);
        feed.page_loaded(2, page_of(6..12));

        let commands = feed.start();
        assert_eq!(
            commands,
            vec![FeedCommand::FetchTotal, FeedCommand::FetchPage(1)]
        );
        assert!(feed.visible_recipes().is_empty());
        assert_eq!(feed.current_page(), 1);
        assert!(feed.is_loading());
    }
}
