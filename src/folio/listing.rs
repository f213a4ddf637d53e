//! # Listing
//!
//! The single owned state object of the engine and its only entry point. A listing
//! threads every UI event through the pipeline
//!
//! ```text
//! Catalog -> Facet Engine -> Pagination Engine -> Render Coordinator
//! ```
//!
//! and keeps the two timers of the system: the search debounce and the render exit
//! animation. Nothing here blocks or fails. Time is supplied by the caller as a
//! [`Duration`] since start; hosts call [`Listing::dispatch`] for every interaction
//! and [`Listing::tick`] whenever [`Listing::next_deadline`] comes due.
//!
//! ```
//! use folio::catalog::memory::MemorySource;
//! use folio::catalog::{Catalog, ItemRecord};
//! use folio::controls::Controls;
//! use folio::events::UiEvent;
//! use folio::listing::{Listing, ListingOptions};
//! use std::time::Duration;
//!
//! let catalog = Catalog::load(&MemorySource::from_records(vec![ItemRecord {
//!     title: "Portfolio Site".into(),
//!     category: "web".into(),
//!     ..Default::default()
//! }]));
//! let controls = Controls::full(&catalog);
//! let mut listing = Listing::new(catalog, controls, ListingOptions::default());
//!
//! listing.dispatch(UiEvent::search_input("site"), Duration::ZERO);
//! listing.settle();
//! assert_eq!(listing.display().visible_items().count(), 1);
//! ```

use crate::catalog::Catalog;
use crate::controls::Controls;
use crate::debounce::{Debouncer, DEFAULT_WINDOW};
use crate::events::UiEvent;
use crate::facets::{compute_visible, VisibleSet};
use crate::model::{CategoryFilter, Facets};
use crate::paging::{compute_page, slice_for_page, Navigation, PageState, DEFAULT_PAGE_SIZE};
use crate::render::{Cause, Display, RenderCoordinator, RenderTarget, Timings};
use std::num::NonZeroUsize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingOptions {
    pub page_size: NonZeroUsize,
    pub debounce: Duration,
    pub timings: Timings,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_WINDOW,
            timings: Timings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The catalog is empty, so the listing is inert.
    EmptyCatalog,
    /// The control this event would come from does not exist.
    MissingControl,
    /// Next on the last page, or previous on the first.
    AtBoundary,
    /// The facet already has this value; the current page is kept.
    Unchanged,
}

/// What a dispatched event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ignored(IgnoreReason),
    /// A search term is waiting for the input to go quiet.
    Debouncing { deadline: Duration },
    /// A new target was computed and will be shown at `apply_at`.
    Scheduled { apply_at: Duration },
}

#[derive(Debug)]
pub struct Listing {
    catalog: Catalog,
    controls: Controls,
    options: ListingOptions,
    facets: Facets,
    visible: VisibleSet,
    page: PageState,
    search: Debouncer<String>,
    renderer: RenderCoordinator,
}

impl Listing {
    /// Builds the listing and shows the first page of the whole catalog.
    pub fn new(catalog: Catalog, controls: Controls, options: ListingOptions) -> Self {
        let facets = Facets::default();
        let visible = compute_visible(&catalog, &facets);
        let size = page_size_for(&controls, &options, visible.len());
        let page = compute_page(&visible, size, 1);
        let renderer = RenderCoordinator::new(&catalog, &controls, options.timings);

        let mut listing = Self {
            catalog,
            controls,
            options,
            facets,
            visible,
            page,
            search: Debouncer::new(options.debounce),
            renderer,
        };

        if !listing.catalog.is_empty() {
            listing
                .renderer
                .update_pager(&listing.page, listing.controls.pagination_enabled());
            let target = listing.target(Cause::Facets);
            listing.renderer.present(&listing.catalog, target);
        }
        listing
    }

    pub fn dispatch(&mut self, event: UiEvent, now: Duration) -> Outcome {
        if self.catalog.is_empty() {
            return self.ignore(&event, IgnoreReason::EmptyCatalog);
        }

        match event {
            UiEvent::SelectCategory(ref value) => {
                if !self.controls.has_filter(value) {
                    return self.ignore(&event, IgnoreReason::MissingControl);
                }
                let category = CategoryFilter::from(value.as_str());
                if category == self.facets.category {
                    return self.ignore(&event, IgnoreReason::Unchanged);
                }
                self.renderer.activate_filter(value);
                self.facets.category = category;
                self.refacet(now)
            }
            UiEvent::SearchInput { source, ref text } => {
                if !self.controls.search(source).input {
                    return self.ignore(&event, IgnoreReason::MissingControl);
                }
                let deadline = self.search.input(text.clone(), now);
                debug!(?source, text = %text, ?deadline, "search input debounced");
                Outcome::Debouncing { deadline }
            }
            UiEvent::SearchSubmit { source, ref text } => {
                let search = self.controls.search(source);
                if !(search.input && search.form) {
                    return self.ignore(&event, IgnoreReason::MissingControl);
                }
                let commit = self.search.submit(text.clone(), now);
                self.commit_search(commit.value, commit.at)
            }
            UiEvent::NextPage => self.navigate(Navigation::Next, &event, now),
            UiEvent::PreviousPage => self.navigate(Navigation::Previous, &event, now),
            UiEvent::GoToPage(n) => {
                if !self.controls.page_numbers {
                    return self.ignore(&event, IgnoreReason::MissingControl);
                }
                self.navigate(Navigation::Jump(n), &event, now)
            }
        }
    }

    /// Fires whatever timers are due at `now`: the debounced search commit first, then
    /// the render exit timer. Returns `true` when the display changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.catalog.is_empty() {
            return false;
        }
        if let Some(commit) = self.search.poll(now) {
            debug!(term = %commit.value, at = ?commit.at, "search committed");
            self.commit_search(commit.value, commit.at);
        }
        self.renderer.tick(&self.catalog, now)
    }

    /// The earliest moment a [`Listing::tick`] has something to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.search.deadline(), self.renderer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Runs every outstanding timer to completion, returning the time the listing went
    /// idle (or `None` if nothing was pending).
    pub fn settle(&mut self) -> Option<Duration> {
        let mut last = None;
        while let Some(deadline) = self.next_deadline() {
            self.tick(deadline);
            last = Some(deadline);
        }
        last
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn options(&self) -> &ListingOptions {
        &self.options
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn display(&self) -> &Display {
        self.renderer.display()
    }

    /// Ids on the current page, as computed (not necessarily painted yet).
    pub fn current_slice(&self) -> &[crate::model::ItemId] {
        slice_for_page(&self.visible, &self.page)
    }

    fn commit_search(&mut self, term: String, at: Duration) -> Outcome {
        if term.trim() == self.facets.term() {
            debug!(term = %term, "search term unchanged");
            return Outcome::Ignored(IgnoreReason::Unchanged);
        }
        self.facets.search_term = term;
        self.refacet(at)
    }

    /// Recomputes everything from the facets, back on page one.
    fn refacet(&mut self, now: Duration) -> Outcome {
        self.visible = compute_visible(&self.catalog, &self.facets);
        self.page = compute_page(&self.visible, self.page_size(), 1);
        debug!(
            category = %self.facets.category,
            term = %self.facets.term(),
            visible = self.visible.len(),
            pages = self.page.total_pages(),
            "facets applied"
        );
        self.schedule(Cause::Facets, now)
    }

    fn navigate(&mut self, nav: Navigation, event: &UiEvent, now: Duration) -> Outcome {
        if !self.controls.pagination_enabled() {
            return self.ignore(event, IgnoreReason::MissingControl);
        }

        let requested = nav.target(&self.page);
        if !matches!(nav, Navigation::Jump(_)) && requested == self.page.current_page() {
            return self.ignore(event, IgnoreReason::AtBoundary);
        }

        self.page = compute_page(&self.visible, self.page_size(), requested);
        debug!(
            requested,
            page = self.page.current_page(),
            pages = self.page.total_pages(),
            "page changed"
        );
        self.schedule(Cause::Page, now)
    }

    fn schedule(&mut self, cause: Cause, now: Duration) -> Outcome {
        self.renderer
            .update_pager(&self.page, self.controls.pagination_enabled());
        let target = self.target(cause);
        let apply_at = self.renderer.transition(target, now);
        Outcome::Scheduled { apply_at }
    }

    fn target(&self, cause: Cause) -> RenderTarget {
        RenderTarget {
            page_slice: self.current_slice().to_vec(),
            search_term: self.facets.term().to_string(),
            cause,
        }
    }

    fn page_size(&self) -> NonZeroUsize {
        page_size_for(&self.controls, &self.options, self.visible.len())
    }

    fn ignore(&self, event: &UiEvent, reason: IgnoreReason) -> Outcome {
        debug!(event = %event, ?reason, "event ignored");
        Outcome::Ignored(reason)
    }
}

/// Without both boundary buttons every visible item sits on one page.
fn page_size_for(controls: &Controls, options: &ListingOptions, visible: usize) -> NonZeroUsize {
    if controls.pagination_enabled() {
        options.page_size
    } else {
        NonZeroUsize::new(visible).unwrap_or(NonZeroUsize::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::memory::fixtures::{catalog_of, sample_catalog};
    use crate::events::SearchBox;
    use crate::render::Notice;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn listing(catalog: Catalog) -> Listing {
        let controls = Controls::full(&catalog);
        Listing::new(catalog, controls, ListingOptions::default())
    }

    fn visible_titles(listing: &Listing) -> Vec<String> {
        listing
            .display()
            .visible_items()
            .map(|v| listing.catalog().get(&v.id).unwrap().title.clone())
            .collect()
    }

    #[test]
    fn initial_display_is_first_page_of_everything() {
        let l = listing(catalog_of(14));
        assert_eq!(l.display().visible_items().count(), 6);
        assert_eq!(l.page().total_pages(), 3);
        assert_eq!(l.display().active_page(), Some(1));
        assert!(!l.display().prev_enabled);
        assert!(l.display().next_enabled);
        assert_eq!(l.next_deadline(), None);
    }

    #[test]
    fn fourteen_items_paginate_into_three_pages() {
        let mut l = listing(catalog_of(14));
        let ids: Vec<_> = l.catalog().iter().map(|i| i.id).collect();

        l.dispatch(UiEvent::GoToPage(3), ms(0));
        l.settle();

        let shown: Vec<_> = l.display().visible_items().map(|v| v.id).collect();
        assert_eq!(shown, ids[12..14].to_vec());
        assert!(!l.display().next_enabled);
        assert!(l.display().prev_enabled);
        assert!(l.display().scroll_to_grid);
    }

    #[test]
    fn page_99_clamps_to_last_page() {
        let mut l = listing(catalog_of(14));
        let outcome = l.dispatch(UiEvent::GoToPage(99), ms(0));
        assert_eq!(outcome, Outcome::Scheduled { apply_at: ms(200) });
        assert_eq!(l.page().current_page(), 3);
        assert!(l.display().prev_enabled);
        assert!(!l.display().next_enabled);
    }

    #[test]
    fn next_and_previous_stop_at_edges() {
        let mut l = listing(catalog_of(14));
        assert_eq!(
            l.dispatch(UiEvent::PreviousPage, ms(0)),
            Outcome::Ignored(IgnoreReason::AtBoundary)
        );
        l.dispatch(UiEvent::NextPage, ms(0));
        l.dispatch(UiEvent::NextPage, ms(10));
        assert_eq!(l.page().current_page(), 3);
        assert_eq!(
            l.dispatch(UiEvent::NextPage, ms(20)),
            Outcome::Ignored(IgnoreReason::AtBoundary)
        );
    }

    #[test]
    fn category_and_search_combine() {
        let mut l = listing(sample_catalog());
        l.dispatch(UiEvent::select_category("web"), ms(0));
        l.dispatch(UiEvent::search_submit("site"), ms(10));
        l.settle();

        assert_eq!(visible_titles(&l), vec!["Portfolio Site", "Blog Engine"]);
        assert_eq!(l.display().active_filter(), Some("web"));
        assert_eq!(l.display().notice, None);
    }

    #[test]
    fn no_match_shows_the_literal_term() {
        let mut l = listing(sample_catalog());
        l.dispatch(UiEvent::select_category("mobile"), ms(0));
        l.dispatch(UiEvent::search_submit("site"), ms(0));
        l.settle();

        assert!(visible_titles(&l).is_empty());
        assert_eq!(
            l.display().notice,
            Some(Notice::NoMatches {
                term: "site".into()
            })
        );
    }

    #[test]
    fn facet_change_resets_to_page_one() {
        let mut l = listing(catalog_of(14));
        l.dispatch(UiEvent::NextPage, ms(0));
        assert_eq!(l.page().current_page(), 2);

        l.dispatch(UiEvent::select_category("web"), ms(50));
        assert_eq!(l.page().current_page(), 1);
        assert_eq!(l.display().active_page(), Some(1));
    }

    #[test]
    fn retyping_the_same_term_keeps_the_page() {
        let mut l = listing(catalog_of(14));
        l.dispatch(UiEvent::NextPage, ms(0));
        l.settle();

        l.dispatch(UiEvent::search_input("x"), ms(1_000));
        l.dispatch(UiEvent::search_input(""), ms(1_100));
        assert!(!l.tick(ms(1_400)));

        assert_eq!(l.page().current_page(), 2);
        assert_eq!(l.display().active_page(), Some(2));
        assert_eq!(l.next_deadline(), None);
    }

    #[test]
    fn reselecting_the_active_filter_keeps_the_page() {
        let mut l = listing(catalog_of(14));
        l.dispatch(UiEvent::select_category("web"), ms(0));
        l.dispatch(UiEvent::NextPage, ms(10));
        l.settle();

        assert_eq!(
            l.dispatch(UiEvent::select_category("web"), ms(1_000)),
            Outcome::Ignored(IgnoreReason::Unchanged)
        );
        assert_eq!(
            l.dispatch(UiEvent::search_submit("  "), ms(1_000)),
            Outcome::Ignored(IgnoreReason::Unchanged)
        );
        assert_eq!(l.page().current_page(), 2);
        assert_eq!(l.next_deadline(), None);
    }

    #[test]
    fn navigation_leaves_facets_alone() {
        let mut l = listing(catalog_of(14));
        l.dispatch(UiEvent::search_submit("project"), ms(0));
        let before = l.facets().clone();
        l.dispatch(UiEvent::NextPage, ms(10));
        l.dispatch(UiEvent::GoToPage(1), ms(20));
        assert_eq!(l.facets(), &before);
    }

    #[test]
    fn typing_commits_once_after_the_quiet_window() {
        let mut l = listing(sample_catalog());
        for (t, text) in [(0, "s"), (50, "si"), (100, "sit"), (250, "site")] {
            let outcome = l.dispatch(UiEvent::search_input(text), ms(t));
            assert_eq!(outcome, Outcome::Debouncing { deadline: ms(t + 300) });
        }

        assert!(!l.tick(ms(549)));
        assert_eq!(l.facets().search_term, "");

        // Commit at 550 schedules the render for 550 + 300.
        assert!(!l.tick(ms(550)));
        assert_eq!(l.facets().search_term, "site");
        assert_eq!(l.next_deadline(), Some(ms(850)));

        assert!(l.tick(ms(850)));
        assert_eq!(visible_titles(&l), vec!["Portfolio Site", "Blog Engine"]);
    }

    #[test]
    fn late_tick_commits_and_renders_at_once() {
        let mut l = listing(sample_catalog());
        l.dispatch(UiEvent::search_input("shop"), ms(0));
        assert!(l.tick(ms(5_000)));
        assert_eq!(visible_titles(&l), vec!["Online Shop"]);
    }

    #[test]
    fn both_search_boxes_share_one_window() {
        let mut l = listing(sample_catalog());
        l.dispatch(UiEvent::search_input("we"), ms(0));
        l.dispatch(
            UiEvent::SearchInput {
                source: SearchBox::Mobile,
                text: "weather".into(),
            },
            ms(200),
        );
        assert!(!l.tick(ms(300)));
        assert_eq!(l.next_deadline(), Some(ms(500)));
        l.settle();
        assert_eq!(visible_titles(&l), vec!["Weather App"]);
    }

    #[test]
    fn submit_cancels_pending_input() {
        let mut l = listing(sample_catalog());
        l.dispatch(UiEvent::search_input("weather"), ms(0));
        l.dispatch(UiEvent::search_submit("logo"), ms(100));
        l.settle();
        assert_eq!(visible_titles(&l), vec!["Logo Pack"]);
        assert_eq!(l.facets().search_term, "logo");
    }

    #[test]
    fn newer_action_replaces_pending_render() {
        let mut l = listing(catalog_of(14));
        l.dispatch(UiEvent::GoToPage(3), ms(0));
        l.dispatch(UiEvent::GoToPage(2), ms(100));

        assert_eq!(l.next_deadline(), Some(ms(300)));
        assert!(!l.tick(ms(200)));
        assert!(l.tick(ms(300)));
        assert_eq!(l.display().visible_items().count(), 6);
        assert_eq!(l.display().active_page(), Some(2));
        assert_eq!(l.next_deadline(), None);
    }

    #[test]
    fn controls_flip_before_cards() {
        let mut l = listing(sample_catalog());
        l.dispatch(UiEvent::select_category("design"), ms(0));

        assert_eq!(l.display().active_filter(), Some("design"));
        assert_eq!(l.display().visible_items().count(), 6);

        l.settle();
        assert_eq!(visible_titles(&l), vec!["Logo Pack"]);
    }

    #[test]
    fn empty_catalog_is_inert() {
        let mut l = listing(Catalog::default());
        assert_eq!(
            l.dispatch(UiEvent::NextPage, ms(0)),
            Outcome::Ignored(IgnoreReason::EmptyCatalog)
        );
        assert_eq!(
            l.dispatch(UiEvent::search_input("x"), ms(0)),
            Outcome::Ignored(IgnoreReason::EmptyCatalog)
        );
        assert!(!l.tick(ms(1_000)));
        assert!(l.display().items.is_empty());
        assert_eq!(l.display().notice, None);
    }

    #[test]
    fn missing_filter_buttons_only_disable_filtering() {
        let catalog = sample_catalog();
        let mut controls = Controls::full(&catalog);
        controls.filter_buttons.clear();
        let mut l = Listing::new(catalog, controls, ListingOptions::default());

        assert_eq!(
            l.dispatch(UiEvent::select_category("web"), ms(0)),
            Outcome::Ignored(IgnoreReason::MissingControl)
        );
        l.dispatch(UiEvent::search_submit("shop"), ms(0));
        l.settle();
        assert_eq!(visible_titles(&l), vec!["Online Shop"]);
    }

    #[test]
    fn category_without_button_is_ignored() {
        let catalog = sample_catalog();
        let mut controls = Controls::full(&catalog);
        controls.filter_buttons.retain(|b| b != "design");
        let mut l = Listing::new(catalog, controls, ListingOptions::default());

        assert_eq!(
            l.dispatch(UiEvent::select_category("design"), ms(0)),
            Outcome::Ignored(IgnoreReason::MissingControl)
        );
        assert_eq!(l.display().active_filter(), Some("all"));
    }

    #[test]
    fn missing_pager_shows_everything_on_one_page() {
        let catalog = catalog_of(14);
        let mut controls = Controls::full(&catalog);
        controls.previous_button = false;
        let mut l = Listing::new(catalog, controls, ListingOptions::default());

        assert_eq!(l.display().visible_items().count(), 14);
        assert!(l.display().page_buttons.is_empty());
        assert_eq!(
            l.dispatch(UiEvent::NextPage, ms(0)),
            Outcome::Ignored(IgnoreReason::MissingControl)
        );
        assert_eq!(
            l.dispatch(UiEvent::GoToPage(2), ms(0)),
            Outcome::Ignored(IgnoreReason::MissingControl)
        );
    }

    #[test]
    fn missing_page_numbers_only_disable_jumps() {
        let catalog = catalog_of(14);
        let mut controls = Controls::full(&catalog);
        controls.page_numbers = false;
        let mut l = Listing::new(catalog, controls, ListingOptions::default());

        assert!(l.display().page_buttons.is_empty());
        assert_eq!(
            l.dispatch(UiEvent::GoToPage(2), ms(0)),
            Outcome::Ignored(IgnoreReason::MissingControl)
        );
        assert!(matches!(
            l.dispatch(UiEvent::NextPage, ms(0)),
            Outcome::Scheduled { .. }
        ));
    }

    #[test]
    fn missing_mobile_form_ignores_its_submit() {
        let catalog = sample_catalog();
        let mut controls = Controls::full(&catalog);
        controls.mobile_search.form = false;
        let mut l = Listing::new(catalog, controls, ListingOptions::default());

        let submit = UiEvent::SearchSubmit {
            source: SearchBox::Mobile,
            text: "shop".into(),
        };
        assert_eq!(
            l.dispatch(submit, ms(0)),
            Outcome::Ignored(IgnoreReason::MissingControl)
        );
        assert!(matches!(
            l.dispatch(UiEvent::search_submit("shop"), ms(0)),
            Outcome::Scheduled { .. }
        ));
    }

    #[test]
    fn search_highlights_visible_titles() {
        let mut l = listing(sample_catalog());
        l.dispatch(UiEvent::search_submit("  SHOP "), ms(0));
        l.settle();

        let view = l.display().visible_items().next().unwrap();
        assert!(view.title.iter().any(|s| s.is_mark() && s.text() == "Shop"));
    }
}
