//! # CLI Templates
//!
//! Output is rendered through `outstanding` (minijinja) templates kept in
//! `templates/*.tmp` and embedded here as string constants.
//!
//! Line breaks are explicit: every output line ends inside the block that produces
//! it, so conditionals never leave stray blank lines. Layout math (widths, padding,
//! truncation of highlighted titles) is done in Rust and handed to the templates.

pub const FRAME_TEMPLATE: &str = include_str!("templates/frame.tmp");
pub const CATEGORIES_TEMPLATE: &str = include_str!("templates/categories.tmp");
pub const CONFIG_TEMPLATE: &str = include_str!("templates/config.tmp");
