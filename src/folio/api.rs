//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry point
//! for every folio operation, whatever UI drives it.
//!
//! The facade:
//! - **Owns** the catalog, read once when the API is built
//! - **Dispatches** to the appropriate command function
//! - **Returns structured types** (`Result<CmdResult>`), never strings
//!
//! It does no printing and holds no presentation logic. Interactive hosts that keep a
//! listing alive (a browser page, a TUI) use [`crate::listing::Listing`] directly;
//! the facade serves one-shot operations.

use crate::catalog::{Catalog, CatalogSource};
use crate::commands;
use crate::controls::Controls;
use crate::error::Result;
use crate::listing::ListingOptions;
use crate::model::Scope;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::list::ListQuery;
pub use crate::commands::{CmdMessage, CmdResult, FolioPaths, Frame, MessageLevel};

pub struct FolioApi {
    catalog: Catalog,
    options: ListingOptions,
    paths: FolioPaths,
}

impl FolioApi {
    pub fn new<S: CatalogSource + ?Sized>(
        source: &S,
        options: ListingOptions,
        paths: FolioPaths,
    ) -> Self {
        Self::with_catalog(Catalog::load(source), options, paths)
    }

    pub fn with_catalog(catalog: Catalog, options: ListingOptions, paths: FolioPaths) -> Self {
        Self {
            catalog,
            options,
            paths,
        }
    }

    pub fn list(&self, query: ListQuery) -> Result<CmdResult> {
        commands::list::run(self.catalog.clone(), self.options, query)
    }

    pub fn categories(&self) -> Result<CmdResult> {
        commands::categories::run(&self.catalog)
    }

    pub fn replay(&self, script: &str, controls: Option<Controls>) -> Result<CmdResult> {
        commands::replay::run(self.catalog.clone(), controls, self.options, script)
    }

    pub fn config(&self, scope: Scope, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, scope, action)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn options(&self) -> &ListingOptions {
        &self.options
    }

    pub fn paths(&self) -> &FolioPaths {
        &self.paths
    }
}
