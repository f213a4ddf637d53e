//! # Pagination Engine
//!
//! Splits a [`VisibleSet`] into fixed-size pages. Requests are clamped into range,
//! never rejected: asking for page 99 of 3 gives page 3, page 0 gives page 1. An empty
//! set still has one (empty) page.

use crate::facets::VisibleSet;
use crate::model::ItemId;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::ops::{Range, RangeInclusive};

/// Items per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(6) {
    Some(n) => n,
    None => unreachable!(),
};

/// Invariant: `1 <= current_page <= total_pages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    page_size: usize,
    current_page: usize,
    total_pages: usize,
    item_count: usize,
}

impl PageState {
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Indices of the visible set shown on the current page.
    pub fn range(&self) -> Range<usize> {
        let start = ((self.current_page - 1) * self.page_size).min(self.item_count);
        let end = (start + self.page_size).min(self.item_count);
        start..end
    }

    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages
    }
}

/// A pager control activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Previous,
    Jump(usize),
}

impl Navigation {
    /// The page this navigation asks for. Next/previous stay put at the edges.
    pub fn target(self, page: &PageState) -> usize {
        match self {
            Navigation::Next if page.has_next() => page.current_page + 1,
            Navigation::Previous if page.has_previous() => page.current_page - 1,
            Navigation::Next | Navigation::Previous => page.current_page,
            Navigation::Jump(n) => n,
        }
    }
}

pub fn total_pages(item_count: usize, page_size: NonZeroUsize) -> usize {
    item_count.div_ceil(page_size.get()).max(1)
}

pub fn compute_page(visible: &VisibleSet, page_size: NonZeroUsize, requested_page: usize) -> PageState {
    let total = total_pages(visible.len(), page_size);
    PageState {
        page_size: page_size.get(),
        current_page: requested_page.clamp(1, total),
        total_pages: total,
        item_count: visible.len(),
    }
}

pub fn slice_for_page<'a>(visible: &'a VisibleSet, page: &PageState) -> &'a [ItemId] {
    let range = page.range();
    let end = range.end.min(visible.len());
    let start = range.start.min(end);
    &visible.ids()[start..end]
}
