//! # Render Coordinator
//!
//! Turns facet and page results into a [`Display`], the snapshot a host paints.
//!
//! Changes are applied in two steps. Control indicators (active filter button,
//! active page button, previous/next enabled) flip as soon as the action is
//! dispatched. The cards themselves first play an exit animation; only when the exit
//! timer fires does the coordinator flip per-item visibility, start the staggered
//! entry animation, refresh title highlights and show or hide the notice.
//!
//! At most one exit timer is outstanding. A newer transition replaces the pending
//! one, so a stale target is never applied.

use crate::catalog::Catalog;
use crate::controls::Controls;
use crate::highlight::{Highlighter, Segment};
use crate::model::{ItemId, ALL_CATEGORIES};
use crate::paging::PageState;
use crate::timer::Timer;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, trace};

/// Serializes a [`Duration`] as whole milliseconds, saturating at `u64::MAX`.
pub(crate) mod millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

/// Animation durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Exit animation before a filter or search result is shown.
    pub filter_exit: Duration,
    /// Exit animation before another page is shown.
    pub page_exit: Duration,
    pub entry: Duration,
    /// Entry delay added per position on the page.
    pub stagger: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            filter_exit: Duration::from_millis(300),
            page_exit: Duration::from_millis(200),
            entry: Duration::from_millis(500),
            stagger: Duration::from_millis(100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Animation {
    #[default]
    None,
    FadeOut {
        #[serde(with = "millis")]
        duration: Duration,
    },
    FadeInUp {
        #[serde(with = "millis")]
        delay: Duration,
        #[serde(with = "millis")]
        duration: Duration,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub id: ItemId,
    pub visible: bool,
    pub animation: Animation,
    /// The title, split into plain and highlighted runs.
    pub title: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlView {
    pub value: String,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageButton {
    pub number: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    NoMatches { term: String },
    EmptyCategory,
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::NoMatches { term } => format!("No projects found matching \"{}\"", term),
            Notice::EmptyCategory => "No projects found in this category".to_string(),
        }
    }
}

/// Everything a host needs to paint the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Display {
    /// One view per catalog item, in catalog order.
    pub items: Vec<ItemView>,
    pub filter_buttons: Vec<ControlView>,
    pub page_buttons: Vec<PageButton>,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub notice: Option<Notice>,
    /// Set when the last applied change was a page change.
    pub scroll_to_grid: bool,
}

impl Display {
    pub fn visible_items(&self) -> impl Iterator<Item = &ItemView> {
        self.items.iter().filter(|v| v.visible)
    }

    pub fn item(&self, id: &ItemId) -> Option<&ItemView> {
        self.items.iter().find(|v| v.id == *id)
    }

    pub fn active_filter(&self) -> Option<&str> {
        self.filter_buttons
            .iter()
            .find(|b| b.active)
            .map(|b| b.value.as_str())
    }

    pub fn active_page(&self) -> Option<usize> {
        self.page_buttons.iter().find(|b| b.active).map(|b| b.number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cause {
    Facets,
    Page,
}

/// The state to show once the exit animation is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTarget {
    pub page_slice: Vec<ItemId>,
    pub search_term: String,
    pub cause: Cause,
}

#[derive(Debug)]
pub struct RenderCoordinator {
    timings: Timings,
    display: Display,
    pending: Timer<RenderTarget>,
    notice_enabled: bool,
    page_numbers_enabled: bool,
}

impl RenderCoordinator {
    /// Starts with every card hidden and the "all" filter active.
    pub fn new(catalog: &Catalog, controls: &Controls, timings: Timings) -> Self {
        let items = catalog
            .iter()
            .map(|item| ItemView {
                id: item.id,
                visible: false,
                animation: Animation::None,
                title: vec![Segment::Plain(item.title.clone())],
            })
            .collect();

        let filter_buttons = controls
            .filter_buttons
            .iter()
            .map(|value| ControlView {
                value: value.clone(),
                active: value == ALL_CATEGORIES,
            })
            .collect();

        Self {
            timings,
            display: Display {
                items,
                filter_buttons,
                ..Default::default()
            },
            pending: Timer::new(),
            notice_enabled: controls.no_results_notice,
            page_numbers_enabled: controls.page_numbers,
        }
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    /// When the pending exit animation ends, if one is running.
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.deadline()
    }

    /// Shows a target immediately, without animating.
    pub fn present(&mut self, catalog: &Catalog, target: RenderTarget) {
        self.pending.cancel();
        self.apply(catalog, &target);
        for view in &mut self.display.items {
            view.animation = Animation::None;
        }
        self.display.scroll_to_grid = false;
    }

    /// Starts the exit animation towards `target` and returns when it will be applied.
    pub fn transition(&mut self, target: RenderTarget, now: Duration) -> Duration {
        let exit = match target.cause {
            Cause::Facets => self.timings.filter_exit,
            Cause::Page => self.timings.page_exit,
        };

        for view in &mut self.display.items {
            view.animation = if view.visible {
                Animation::FadeOut { duration: exit }
            } else {
                Animation::None
            };
        }

        let apply_at = now + exit;
        if self.pending.schedule(apply_at, target).is_some() {
            debug!(?apply_at, "pending render replaced");
        } else {
            debug!(?apply_at, "render scheduled");
        }
        apply_at
    }

    /// Applies the pending target once its exit animation is over.
    ///
    /// Returns `true` when the display changed.
    pub fn tick(&mut self, catalog: &Catalog, now: Duration) -> bool {
        match self.pending.fire(now) {
            Some((at, target)) => {
                trace!(?at, ?now, "render applied");
                self.apply(catalog, &target);
                true
            }
            None => false,
        }
    }

    /// Single-active toggle over the filter buttons.
    pub fn activate_filter(&mut self, value: &str) {
        for button in &mut self.display.filter_buttons {
            button.active = button.value == value;
        }
    }

    pub fn update_pager(&mut self, page: &PageState, pagination_enabled: bool) {
        if !pagination_enabled {
            self.display.page_buttons.clear();
            self.display.prev_enabled = false;
            self.display.next_enabled = false;
            return;
        }

        self.display.prev_enabled = page.has_previous();
        self.display.next_enabled = page.has_next();
        self.display.page_buttons = if self.page_numbers_enabled {
            page.page_numbers()
                .map(|number| PageButton {
                    number,
                    active: number == page.current_page(),
                })
                .collect()
        } else {
            Vec::new()
        };
    }

    fn apply(&mut self, catalog: &Catalog, target: &RenderTarget) {
        let slot: HashMap<ItemId, usize> = target
            .page_slice
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, index))
            .collect();
        let highlighter = Highlighter::new(&target.search_term);

        for view in &mut self.display.items {
            match slot.get(&view.id) {
                Some(&index) => {
                    view.visible = true;
                    view.animation = Animation::FadeInUp {
                        delay: stagger_delay(self.timings.stagger, index),
                        duration: self.timings.entry,
                    };
                }
                None => {
                    view.visible = false;
                    view.animation = Animation::None;
                }
            }
            if let Some(item) = catalog.get(&view.id) {
                view.title = highlighter.segments(&item.title);
            }
        }

        let term = target.search_term.trim();
        self.display.notice = match (self.notice_enabled, target.page_slice.is_empty()) {
            (true, true) if !term.is_empty() => Some(Notice::NoMatches {
                term: term.to_string(),
            }),
            (true, true) => Some(Notice::EmptyCategory),
            _ => None,
        };
        self.display.scroll_to_grid = target.cause == Cause::Page;
    }
}

fn stagger_delay(stagger: Duration, index: usize) -> Duration {
    u32::try_from(index)
        .ok()
        .and_then(|i| stagger.checked_mul(i))
        .unwrap_or(Duration::MAX)
}
