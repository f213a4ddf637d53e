//! # Folio Architecture
//!
//! Folio is a **UI-agnostic listing engine** for portfolio cards. A visitor narrows a
//! fixed collection of cards by three orthogonal facets (category, free-text search,
//! page) and sees the result with animated transitions. The library owns all of that
//! logic; the `folio` binary is one client that replays interactions in a terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders frames, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs) + Command Layer (commands/*.rs)         │
//! │  - One-shot operations: list, categories, replay, config    │
//! │  - Returns structured Result<CmdResult>                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (listing.rs)                                        │
//! │  Catalog → Facet Engine → Pagination Engine → Render        │
//! │  Coordinator, plus the search debounce. Never fails.        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Catalog Layer (catalog/)                                   │
//! │  - CatalogSource trait                                      │
//! │  - JsonSource, MarkdownSource, MemorySource (testing)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Time
//!
//! The engine never reads a clock. Every call takes `now` as a [`std::time::Duration`]
//! since start, and the two timers (search debounce, render exit animation) are
//! polled with [`listing::Listing::tick`]. Browsers, terminal loops and tests drive the
//! same code with their own notion of time.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain Rust arguments and returns plain Rust types.
//! It never writes to stdout/stderr and never exits the process. Only catalog sources
//! and config touch the filesystem.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One-shot operations
//! - [`listing`]: The engine entry point (`dispatch`, `tick`, `next_deadline`)
//! - [`catalog`]: Item sources and the immutable catalog
//! - [`facets`]: Category + search matching
//! - [`paging`]: Page arithmetic and navigation
//! - [`debounce`] and [`timer`]: Cancellable deadlines on an explicit clock
//! - [`render`]: The display snapshot and transition sequencing
//! - [`highlight`]: Search-term marking in titles
//! - [`controls`]: Which optional controls exist
//! - [`events`]: UI events
//! - [`model`]: Core data types
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing, logging setup and templated rendering for the binary (not part of the lib API)

pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod controls;
pub mod debounce;
pub mod error;
pub mod events;
pub mod facets;
pub mod highlight;
pub mod listing;
pub mod model;
pub mod paging;
pub mod render;
pub mod timer;
