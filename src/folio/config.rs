//! # Configuration
//!
//! Stored as `config.json` in the scope directory (`./.folio` for the project scope,
//! the per-user data directory for the global scope). A missing file means defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `page-size` | `6` | Cards per page (must be > 0) |
//! | `debounce-ms` | `300` | Quiet period before typed search is applied |
//! | `filter-exit-ms` | `300` | Exit animation before a filter/search result |
//! | `page-exit-ms` | `200` | Exit animation before a page change |
//! | `entry-ms` | `500` | Entry animation of each card |
//! | `stagger-ms` | `100` | Entry delay added per card position |
//! | `catalog` | unset | Default catalog file (`.json` or `.md`) |

use crate::error::{FolioError, Result};
use crate::listing::ListingOptions;
use crate::paging::DEFAULT_PAGE_SIZE;
use crate::render::Timings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

const CONFIG_FILENAME: &str = "config.json";

/// Every key accepted by [`FolioConfig::get`] and [`FolioConfig::set`].
pub const KEYS: &[&str] = &[
    "page-size",
    "debounce-ms",
    "filter-exit-ms",
    "page-exit-ms",
    "entry-ms",
    "stagger-ms",
    "catalog",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FolioConfig {
    pub page_size: usize,
    pub debounce_ms: u64,
    pub filter_exit_ms: u64,
    pub page_exit_ms: u64,
    pub entry_ms: u64,
    pub stagger_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE.get(),
            debounce_ms: 300,
            filter_exit_ms: 300,
            page_exit_ms: 200,
            entry_ms: 500,
            stagger_ms: 100,
            catalog: None,
        }
    }
}

impl FolioConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(FolioError::Io)?;
        let config: FolioConfig =
            serde_json::from_str(&content).map_err(FolioError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory, creating it if needed
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(FolioError::Io)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(FolioError::Serialization)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content).map_err(FolioError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "page-size" => self.page_size.to_string(),
            "debounce-ms" => self.debounce_ms.to_string(),
            "filter-exit-ms" => self.filter_exit_ms.to_string(),
            "page-exit-ms" => self.page_exit_ms.to_string(),
            "entry-ms" => self.entry_ms.to_string(),
            "stagger-ms" => self.stagger_ms.to_string(),
            "catalog" => self
                .catalog
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            _ => return None,
        };
        Some(value)
    }

    /// Sets a key from its textual form. The config is left untouched on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "page-size" => {
                let n = parse_number(key, value)?;
                if n == 0 {
                    return Err(FolioError::Config("page-size must be greater than 0".into()));
                }
                self.page_size = n as usize;
            }
            "debounce-ms" => self.debounce_ms = parse_number(key, value)?,
            "filter-exit-ms" => self.filter_exit_ms = parse_number(key, value)?,
            "page-exit-ms" => self.page_exit_ms = parse_number(key, value)?,
            "entry-ms" => self.entry_ms = parse_number(key, value)?,
            "stagger-ms" => self.stagger_ms = parse_number(key, value)?,
            "catalog" => {
                self.catalog = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            _ => return Err(FolioError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }

    pub fn listing_options(&self) -> ListingOptions {
        let page_size = NonZeroUsize::new(self.page_size).unwrap_or_else(|| {
            warn!("page_size of 0 in config, using {}", DEFAULT_PAGE_SIZE);
            DEFAULT_PAGE_SIZE
        });

        ListingOptions {
            page_size,
            debounce: Duration::from_millis(self.debounce_ms),
            timings: Timings {
                filter_exit: Duration::from_millis(self.filter_exit_ms),
                page_exit: Duration::from_millis(self.page_exit_ms),
                entry: Duration::from_millis(self.entry_ms),
                stagger: Duration::from_millis(self.stagger_ms),
            },
        }
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value.parse().map_err(|_| {
        FolioError::Config(format!(
            "{} expects a whole number of milliseconds or items, got \"{}\"",
            key, value
        ))
    })
}
