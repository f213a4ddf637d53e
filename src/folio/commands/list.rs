use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult, Frame};
use crate::controls::Controls;
use crate::error::Result;
use crate::events::UiEvent;
use crate::listing::{IgnoreReason, Listing, ListingOptions, Outcome};
use std::time::Duration;

/// Facets to apply before showing a page.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
}

/// Applies the query through the same events a visitor would produce, lets every
/// animation finish, and returns the settled page as a single frame.
pub fn run(catalog: Catalog, options: ListingOptions, query: ListQuery) -> Result<CmdResult> {
    let controls = Controls::full(&catalog);
    let mut listing = Listing::new(catalog, controls, options);
    let mut result = CmdResult::default();

    if listing.catalog().is_empty() {
        result.add_message(CmdMessage::warning("No projects to show: the catalog is empty."));
        return Ok(result);
    }

    let mut now = Duration::ZERO;
    let mut events = Vec::new();
    if let Some(category) = query.category {
        events.push(UiEvent::SelectCategory(category));
    }
    if let Some(term) = query.search {
        events.push(UiEvent::search_submit(&term));
    }
    if let Some(page) = query.page {
        events.push(UiEvent::GoToPage(page));
    }

    for event in events {
        let label = event.to_string();
        match listing.dispatch(event, now) {
            Outcome::Ignored(IgnoreReason::Unchanged) => {}
            Outcome::Ignored(reason) => result.add_message(ignored_message(&label, reason)),
            _ => {}
        }
        now = listing.settle().unwrap_or(now);
    }

    let frame = Frame::capture(&listing, now);
    Ok(result.with_frames(vec![frame]))
}

pub(crate) fn ignored_message(label: &str, reason: IgnoreReason) -> CmdMessage {
    match reason {
        IgnoreReason::MissingControl => {
            CmdMessage::warning(format!("Ignored {}: no such control", label))
        }
        IgnoreReason::AtBoundary => {
            CmdMessage::info(format!("Ignored {}: already at the edge", label))
        }
        IgnoreReason::Unchanged => {
            CmdMessage::info(format!("Ignored {}: already applied", label))
        }
        IgnoreReason::EmptyCatalog => {
            CmdMessage::warning(format!("Ignored {}: the catalog is empty", label))
        }
    }
}
