//! # CLI
//!
//! One client of the folio library: it loads a catalog, drives the engine through
//! the API and prints frames. It is the only place that knows about terminal I/O,
//! logging setup, exit codes and output formatting.
//!
//! ## Commands
//!
//! - `folio` / `folio list`: the settled first page, optionally with `--category`,
//!   `--search` and `--page` applied as a visitor would apply them
//! - `folio categories`: filter values with counts
//! - `folio replay <SCRIPT>`: a frame per applied render of a timed event script
//! - `folio config [KEY] [VALUE]`: show or change settings
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and print
//! - `render`: View models and template rendering
//! - `setup`: Argument parsing via clap
//! - `styles`: The terminal theme
//! - `templates`: Output templates
//! - `logging`: The tracing subscriber

mod commands;
mod logging;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
