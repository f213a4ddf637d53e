use super::{CatalogSource, ItemRecord};
use crate::error::{FolioError, Result};
use crate::model::Item;
use std::fs;
use std::path::{Path, PathBuf};

/// A JSON manifest: an array of [`ItemRecord`]s in display order.
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn parse(content: &str) -> Result<Vec<Item>> {
        let records: Vec<ItemRecord> =
            serde_json::from_str(content).map_err(FolioError::Serialization)?;
        Ok(records
            .into_iter()
            .enumerate()
            .map(|(position, record)| record.into_item(position))
            .collect())
    }
}

impl CatalogSource for JsonSource {
    fn read_items(&self) -> Result<Vec<Item>> {
        let content = fs::read_to_string(&self.path).map_err(FolioError::Io)?;
        Self::parse(&content)
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}
