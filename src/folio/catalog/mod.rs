//! # Item Catalog
//!
//! The catalog is the immutable, ordered list of items a listing narrows down. It is
//! read exactly once, at startup, from a [`CatalogSource`].
//!
//! ## Sources
//!
//! - [`json::JsonSource`]: a JSON manifest of item records
//! - [`markdown::MarkdownSource`]: a rendered markdown listing (category headings,
//!   item headings, description paragraphs, tag lists)
//! - [`memory::MemorySource`]: items held in memory, for tests and embedding
//!
//! ## Failure Model
//!
//! [`Catalog::load`] never fails. A source that cannot be read produces an empty
//! catalog and a warning; every downstream component treats an empty catalog as a
//! no-op. Sources themselves return `Result` so the cause can be logged.

use crate::error::Result;
use crate::model::{Item, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

pub mod json;
pub mod markdown;
pub mod memory;

/// Where catalog items come from.
pub trait CatalogSource {
    /// Reads all items in display order.
    fn read_items(&self) -> Result<Vec<Item>>;

    /// Human readable origin, used in log lines.
    fn describe(&self) -> String;
}

/// Picks a file source by extension: `.md`/`.markdown` is a markdown listing,
/// anything else a JSON manifest.
pub fn source_for_path(path: &Path) -> Box<dyn CatalogSource> {
    let is_markdown = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("markdown"));

    if is_markdown {
        Box::new(markdown::MarkdownSource::new(path))
    } else {
        Box::new(json::JsonSource::new(path))
    }
}

/// An item as written in a source, before it gets an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: String,
}

impl ItemRecord {
    /// Builds the item; without a slug the id derives from position and title.
    pub fn into_item(self, position: usize) -> Item {
        let id = match self.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => ItemId::from_slug(slug),
            _ => ItemId::from_slug(&format!("{}:{}", position, self.title.trim())),
        };
        Item::new(
            id,
            &self.title,
            &self.description,
            self.tags,
            &self.category,
        )
    }
}

/// A category value and how many items carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    positions: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Reads the source once. Any failure degrades to an empty catalog.
    pub fn load<S: CatalogSource + ?Sized>(source: &S) -> Self {
        match source.read_items() {
            Ok(items) => {
                let catalog = Self::from_items(items);
                info!(
                    source = %source.describe(),
                    items = catalog.len(),
                    "catalog loaded"
                );
                catalog
            }
            Err(e) => {
                warn!(source = %source.describe(), error = %e, "catalog unavailable, listing disabled");
                Self::default()
            }
        }
    }

    /// Builds a catalog, keeping the first of any items sharing an id.
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut kept = Vec::with_capacity(items.len());
        let mut positions = HashMap::with_capacity(items.len());

        for item in items {
            if positions.contains_key(&item.id) {
                warn!(id = %item.id, title = %item.title, "duplicate item id skipped");
                continue;
            }
            positions.insert(item.id, kept.len());
            kept.push(item);
        }

        Self {
            items: kept,
            positions,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.positions.get(id).map(|&i| &self.items[i])
    }

    /// Catalog order of an item.
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<CategoryCount> {
        let mut counts: Vec<CategoryCount> = Vec::new();
        for item in &self.items {
            match counts.iter_mut().find(|c| c.category == item.category) {
                Some(entry) => entry.count += 1,
                None => counts.push(CategoryCount {
                    category: item.category.clone(),
                    count: 1,
                }),
            }
        }
        counts
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemorySource;
    use super::*;
    use crate::error::FolioError;

    struct BrokenSource;

    impl CatalogSource for BrokenSource {
        fn read_items(&self) -> Result<Vec<Item>> {
            Err(FolioError::Catalog("markup missing".into()))
        }

        fn describe(&self) -> String {
            "broken".into()
        }
    }

    fn record(title: &str, category: &str) -> ItemRecord {
        ItemRecord {
            title: title.into(),
            category: category.into(),
            ..Default::default()
        }
    }

    #[test]
    fn failed_load_degrades_to_empty() {
        let catalog = Catalog::load(&BrokenSource);
        assert!(catalog.is_empty());
        assert!(catalog.categories().is_empty());
    }

    #[test]
    fn load_preserves_source_order() {
        let source = MemorySource::from_records(vec![
            record("B", "web"),
            record("A", "mobile"),
            record("C", "web"),
        ]);
        let catalog = Catalog::load(&source);
        let titles: Vec<_> = catalog.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A", "C"]);
    }

    #[test]
    fn categories_are_counted_in_first_seen_order() {
        let source = MemorySource::from_records(vec![
            record("B", "web"),
            record("A", "mobile"),
            record("C", "web"),
        ]);
        let catalog = Catalog::load(&source);
        assert_eq!(
            catalog.categories(),
            vec![
                CategoryCount {
                    category: "web".into(),
                    count: 2
                },
                CategoryCount {
                    category: "mobile".into(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn duplicate_slugs_keep_the_first_item() {
        let mut first = record("First", "web");
        first.slug = Some("same".into());
        let mut second = record("Second", "web");
        second.slug = Some("same".into());

        let catalog = Catalog::load(&MemorySource::from_records(vec![first, second]));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.items()[0].title, "First");
    }

    #[test]
    fn records_without_slug_get_positional_ids() {
        let a = record("Same", "web").into_item(0);
        let b = record("Same", "web").into_item(1);
        assert_ne!(a.id, b.id);
        assert_eq!(a.id, record("Same", "web").into_item(0).id);
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::load(&MemorySource::from_records(vec![
            record("A", "web"),
            record("B", "web"),
        ]));
        let b = &catalog.items()[1];
        assert_eq!(catalog.get(&b.id).map(|i| i.title.as_str()), Some("B"));
        assert_eq!(catalog.position(&b.id), Some(1));
    }

    #[test]
    fn source_is_chosen_by_extension() {
        assert!(source_for_path(Path::new("cards.md")).describe().starts_with("markdown"));
        assert!(source_for_path(Path::new("cards.json")).describe().starts_with("json"));
    }
}
