use super::{CatalogSource, ItemRecord};
use crate::error::Result;
use crate::model::Item;

/// Items held in memory. Never fails.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    items: Vec<Item>,
}

impl MemorySource {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn from_records(records: Vec<ItemRecord>) -> Self {
        Self::new(
            records
                .into_iter()
                .enumerate()
                .map(|(position, record)| record.into_item(position))
                .collect(),
        )
    }
}

impl CatalogSource for MemorySource {
    fn read_items(&self) -> Result<Vec<Item>> {
        Ok(self.items.clone())
    }

    fn describe(&self) -> String {
        format!("memory:{} items", self.items.len())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::catalog::Catalog;

    /// `n` items titled "Project 1".."Project n", all in category "web".
    pub fn catalog_of(n: usize) -> Catalog {
        let records = (1..=n)
            .map(|i| ItemRecord {
                slug: Some(format!("project-{}", i)),
                title: format!("Project {}", i),
                description: format!("Description for project {}", i),
                tags: vec!["rust".to_string()],
                category: "web".to_string(),
            })
            .collect();
        Catalog::load(&MemorySource::from_records(records))
    }

    /// A small mixed catalog: three web, two mobile, one design.
    pub fn sample_catalog() -> Catalog {
        let record = |slug: &str, title: &str, description: &str, tags: &[&str], category: &str| {
            ItemRecord {
                slug: Some(slug.to_string()),
                title: title.to_string(),
                description: description.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                category: category.to_string(),
            }
        };

        Catalog::load(&MemorySource::from_records(vec![
            record("portfolio", "Portfolio Site", "A personal portfolio", &["HTML", "CSS"], "web"),
            record("shop", "Online Shop", "E-commerce storefront", &["React", "Stripe"], "web"),
            record("weather", "Weather App", "Forecasts on the go", &["Kotlin"], "mobile"),
            record("blog", "Blog Engine", "Static site generator", &["Rust", "Markdown"], "web"),
            record("fitness", "Fitness Tracker", "Workout log", &["Swift"], "mobile"),
            record("logo", "Logo Pack", "Brand identity for a bakery", &["Figma"], "design"),
        ]))
    }
}
