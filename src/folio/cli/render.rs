//! # Rendering Module
//!
//! Turns command results into styled terminal text with the `outstanding` crate.
//!
//! Layout calculations (column widths, truncation, padding) stay in Rust because they
//! need Unicode-aware processing; templates only pick styles and arrange lines. The
//! one subtle piece is the title column: a highlighted title is a run of plain and
//! marked segments, and truncation has to cut across segments without losing which
//! part is marked.

use super::styles::{names, FOLIO_THEME};
use super::templates::{CATEGORIES_TEMPLATE, CONFIG_TEMPLATE, FRAME_TEMPLATE};
use colored::Colorize;
use folio::api::{CmdMessage, Frame, MessageLevel};
use folio::catalog::{Catalog, CategoryCount};
use folio::config::{FolioConfig, KEYS};
use folio::highlight::Segment;
use folio::render::{Animation, ItemView};
use outstanding::{render_with_color, truncate_to_width};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

pub const COL_INDEX: usize = 4;
pub const COL_TITLE: usize = 32;
pub const COL_CATEGORY: usize = 10;
pub const COL_TAGS: usize = 24;

#[derive(Serialize)]
struct SegmentData {
    text: String,
    style: &'static str,
}

#[derive(Serialize)]
struct CardLine {
    index: String,
    title: Vec<SegmentData>,
    padding: String,
    category: String,
    tags: String,
    animation: String,
}

#[derive(Serialize)]
struct FilterData {
    value: String,
    active: bool,
}

#[derive(Serialize)]
struct PageData {
    number: usize,
    active: bool,
}

#[derive(Serialize)]
struct FrameData {
    header: String,
    filters: Vec<FilterData>,
    cards: Vec<CardLine>,
    notice: Option<String>,
    pager: bool,
    prev_style: &'static str,
    next_style: &'static str,
    pages: Vec<PageData>,
    scroll: bool,
    col_category: usize,
    col_tags: usize,
}

#[derive(Serialize)]
struct CategoriesData<'a> {
    categories: &'a [CategoryCount],
    width: usize,
}

#[derive(Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
}

#[derive(Serialize)]
struct ConfigData {
    entries: Vec<ConfigEntry>,
    width: usize,
}

/// Renders one frame. `timed` prefixes the header with the frame's time.
pub fn render_frame(frame: &Frame, catalog: &Catalog, timed: bool, use_color: bool) -> String {
    let data = frame_data(frame, catalog, timed);
    render_with_color(FRAME_TEMPLATE, &data, &FOLIO_THEME, use_color)
        .unwrap_or_else(|e| format!("Failed to render frame: {}\n", e))
}

pub fn render_categories(categories: &[CategoryCount], use_color: bool) -> String {
    let width = categories
        .iter()
        .map(|c| c.category.width())
        .max()
        .unwrap_or(0);
    let data = CategoriesData { categories, width };
    render_with_color(CATEGORIES_TEMPLATE, &data, &FOLIO_THEME, use_color)
        .unwrap_or_else(|e| format!("Failed to render categories: {}\n", e))
}

pub fn render_config(config: &FolioConfig, use_color: bool) -> String {
    let entries = KEYS
        .iter()
        .map(|&key| ConfigEntry {
            key,
            value: config.get(key).unwrap_or_default(),
        })
        .collect();
    let width = KEYS.iter().map(|k| k.width()).max().unwrap_or(0);
    render_with_color(
        CONFIG_TEMPLATE,
        &ConfigData { entries, width },
        &FOLIO_THEME,
        use_color,
    )
    .unwrap_or_else(|e| format!("Failed to render config: {}\n", e))
}

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn frame_data(frame: &Frame, catalog: &Catalog, timed: bool) -> FrameData {
    let display = &frame.display;
    let page = &frame.page;
    let first = page.range().start;

    let cards = display
        .visible_items()
        .enumerate()
        .map(|(i, view)| card_line(first + i + 1, view, catalog))
        .collect();

    let mut header = format!("Page {} of {}", page.current_page(), page.total_pages());
    header.push_str(&format!(" · category: {}", frame.facets.category));
    if frame.facets.has_search() {
        header.push_str(&format!(" · search: \"{}\"", frame.facets.term()));
    }
    if timed {
        header = format!("[{:>5} ms] {}", frame.at.as_millis(), header);
    }

    let enabled = |on: bool| if on { names::ENABLED } else { names::DISABLED };

    FrameData {
        header,
        filters: display
            .filter_buttons
            .iter()
            .map(|b| FilterData {
                value: b.value.clone(),
                active: b.active,
            })
            .collect(),
        cards,
        notice: display.notice.as_ref().map(|n| n.message()),
        pager: !display.page_buttons.is_empty() || display.prev_enabled || display.next_enabled,
        prev_style: enabled(display.prev_enabled),
        next_style: enabled(display.next_enabled),
        pages: display
            .page_buttons
            .iter()
            .map(|p| PageData {
                number: p.number,
                active: p.active,
            })
            .collect(),
        scroll: display.scroll_to_grid,
        col_category: COL_CATEGORY,
        col_tags: COL_TAGS,
    }
}

fn card_line(number: usize, view: &ItemView, catalog: &Catalog) -> CardLine {
    let (category, tags) = catalog
        .get(&view.id)
        .map(|item| (item.category.clone(), item.tags.join(", ")))
        .unwrap_or_default();

    let title = fit_segments(&view.title, COL_TITLE);
    let used: usize = title.iter().map(|s| s.text.width()).sum();

    CardLine {
        index: format!("{:>width$}.", number, width = COL_INDEX - 1),
        title,
        padding: " ".repeat(COL_TITLE.saturating_sub(used)),
        category,
        tags,
        animation: animation_label(&view.animation),
    }
}

/// Cuts highlighted title segments down to `width` columns, keeping their styles.
fn fit_segments(segments: &[Segment], width: usize) -> Vec<SegmentData> {
    let total: usize = segments.iter().map(|s| s.text().width()).sum();
    let mut out = Vec::with_capacity(segments.len());
    let mut remaining = width;

    for segment in segments {
        let style = if segment.is_mark() {
            names::MARK
        } else {
            names::TITLE
        };
        let text = segment.text();
        let w = text.width();

        if total <= width || w < remaining {
            out.push(SegmentData {
                text: text.to_string(),
                style,
            });
            remaining = remaining.saturating_sub(w);
            continue;
        }

        out.push(SegmentData {
            text: truncate_to_width(&format!("{}…", text), remaining),
            style,
        });
        break;
    }
    out
}

fn animation_label(animation: &Animation) -> String {
    match animation {
        Animation::None => String::new(),
        Animation::FadeOut { duration } => format!("fade-out {}ms", duration.as_millis()),
        Animation::FadeInUp { delay, duration } => {
            format!("fade-in +{}ms/{}ms", delay.as_millis(), duration.as_millis())
        }
    }
}
