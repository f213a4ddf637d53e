//! # Commands
//!
//! One module per user-facing operation. Commands take the loaded catalog and plain
//! Rust arguments and return a [`CmdResult`]; they never print.

use crate::catalog::CategoryCount;
use crate::config::FolioConfig;
use crate::error::{FolioError, Result};
use crate::listing::Listing;
use crate::model::{Facets, Scope};
use crate::paging::PageState;
use crate::render::Display;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

pub mod categories;
pub mod config;
pub mod list;
pub mod replay;

#[derive(Debug, Clone)]
pub struct FolioPaths {
    pub project: Option<PathBuf>,
    pub global: PathBuf,
}

impl FolioPaths {
    pub fn scope_dir(&self, scope: Scope) -> Result<PathBuf> {
        match scope {
            Scope::Project => self
                .project
                .clone()
                .ok_or_else(|| FolioError::Config("Project scope is not available".to_string())),
            Scope::Global => Ok(self.global.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// The listing as it looked when a render was applied.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    #[serde(serialize_with = "crate::render::millis::serialize")]
    pub at: Duration,
    pub facets: Facets,
    pub page: PageState,
    pub display: Display,
}

impl Frame {
    pub fn capture(listing: &Listing, at: Duration) -> Self {
        Self {
            at,
            facets: listing.facets().clone(),
            page: *listing.page(),
            display: listing.display().clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub frames: Vec<Frame>,
    pub categories: Vec<CategoryCount>,
    pub config: Option<FolioConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_frames(mut self, frames: Vec<Frame>) -> Self {
        self.frames = frames;
        self
    }

    pub fn with_categories(mut self, categories: Vec<CategoryCount>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_config(mut self, config: FolioConfig) -> Self {
        self.config = Some(config);
        self
    }
}
