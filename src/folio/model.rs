use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Filter value that matches every category.
pub const ALL_CATEGORIES: &str = "all";

// Namespace for deriving stable item ids from slugs.
const ITEM_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a9e_4b7d_4f0a_9c3e_51d8_a2b4_e7f9);

/// Opaque, stable identifier of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Derives the id from a slug, so the same source always yields the same ids.
    pub fn from_slug(slug: &str) -> Self {
        Self(Uuid::new_v5(&ITEM_NAMESPACE, slug.as_bytes()))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// One card in the listing. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: String,
}

impl Item {
    pub fn new<I, S>(id: ItemId, title: &str, description: &str, tags: I, category: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for tag in tags {
            let tag: String = tag.into();
            let tag = tag.trim();
            if !tag.is_empty() && !unique.iter().any(|t| t == tag) {
                unique.push(tag.to_string());
            }
        }

        Self {
            id,
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            tags: unique,
            category: category.trim().to_string(),
        }
    }

    /// Lowercased `title description tags...`, the text a search term is matched against.
    pub fn search_text(&self) -> String {
        let mut text = String::with_capacity(
            self.title.len() + self.description.len() + self.tags.len() * 8 + 2,
        );
        text.push_str(&self.title);
        text.push(' ');
        text.push_str(&self.description);
        text.push(' ');
        text.push_str(&self.tags.join(" "));
        text.to_lowercase()
    }
}

/// Which configuration directory a command works against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// `./.folio` in the current directory.
    #[default]
    Project,
    /// The per-user data directory.
    Global,
}

/// The category facet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }

    /// The value carried by the filter control for this facet.
    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(c) => c,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The narrowing criteria currently applied to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Facets {
    pub category: CategoryFilter,
    pub search_term: String,
}

impl Facets {
    /// The search term as matched: surrounding whitespace removed.
    pub fn term(&self) -> &str {
        self.search_term.trim()
    }

    pub fn has_search(&self) -> bool {
        !self.term().is_empty()
    }
}
