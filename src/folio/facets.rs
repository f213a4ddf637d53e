//! # Facet Engine
//!
//! Computes which catalog items match the current [`Facets`]. An item is visible when
//! it passes the category filter AND contains the search term (case-insensitive,
//! literal substring of `title description tags...`). The result keeps catalog order;
//! nothing is ranked or re-sorted.

use crate::catalog::Catalog;
use crate::model::{Facets, Item, ItemId};

/// The ordered ids of the items matching all active facets.
///
/// Always rebuilt from scratch; never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleSet {
    ids: Vec<ItemId>,
}

impl VisibleSet {
    pub fn new(ids: Vec<ItemId>) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.ids.contains(id)
    }
}

/// True when `item` passes both the category and the search facet.
pub fn matches(item: &Item, facets: &Facets) -> bool {
    facets.category.matches(&item.category) && matches_term(item, &facets.term().to_lowercase())
}

fn matches_term(item: &Item, term_lower: &str) -> bool {
    term_lower.is_empty() || item.search_text().contains(term_lower)
}

pub fn compute_visible(catalog: &Catalog, facets: &Facets) -> VisibleSet {
    let term_lower = facets.term().to_lowercase();
    let ids = catalog
        .iter()
        .filter(|item| facets.category.matches(&item.category))
        .filter(|item| matches_term(item, &term_lower))
        .map(|item| item.id)
        .collect();
    VisibleSet::new(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::memory::fixtures::{catalog_of, sample_catalog};
    use crate::model::CategoryFilter;

    fn facets(category: &str, term: &str) -> Facets {
        Facets {
            category: CategoryFilter::from(category),
            search_term: term.to_string(),
        }
    }

    fn titles(catalog: &Catalog, visible: &VisibleSet) -> Vec<String> {
        visible
            .ids()
            .iter()
            .map(|id| catalog.get(id).unwrap().title.clone())
            .collect()
    }

    #[test]
    fn default_facets_show_everything_in_order() {
        let catalog = sample_catalog();
        let visible = compute_visible(&catalog, &Facets::default());
        let all: Vec<_> = catalog.iter().map(|i| i.id).collect();
        assert_eq!(visible.ids(), all.as_slice());
    }

    #[test]
    fn category_filter_keeps_matching_items() {
        let catalog = sample_catalog();
        let visible = compute_visible(&catalog, &facets("mobile", ""));
        assert_eq!(titles(&catalog, &visible), vec!["Weather App", "Fitness Tracker"]);
    }

    #[test]
    fn search_is_case_insensitive_over_title_description_and_tags() {
        let catalog = sample_catalog();
        assert_eq!(
            titles(&catalog, &compute_visible(&catalog, &facets("all", "SITE"))),
            vec!["Portfolio Site", "Blog Engine"]
        );
        assert_eq!(
            titles(&catalog, &compute_visible(&catalog, &facets("all", "stripe"))),
            vec!["Online Shop"]
        );
    }

    #[test]
    fn category_and_search_are_combined() {
        let catalog = sample_catalog();
        let visible = compute_visible(&catalog, &facets("web", "site"));
        assert_eq!(titles(&catalog, &visible), vec!["Portfolio Site", "Blog Engine"]);

        let none = compute_visible(&catalog, &facets("mobile", "site"));
        assert!(none.is_empty());
    }

    #[test]
    fn search_is_literal_not_tokenized() {
        let catalog = sample_catalog();
        assert!(compute_visible(&catalog, &facets("all", "site portfolio")).is_empty());
        assert_eq!(compute_visible(&catalog, &facets("all", "o s")).len(), 1);
    }

    #[test]
    fn result_is_an_order_preserving_subsequence() {
        let catalog = sample_catalog();
        for (category, term) in [("all", "a"), ("web", "e"), ("mobile", ""), ("design", "x")] {
            let visible = compute_visible(&catalog, &facets(category, term));
            let positions: Vec<_> = visible
                .ids()
                .iter()
                .map(|id| catalog.position(id).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let catalog = catalog_of(20);
        let f = facets("web", "1");
        assert_eq!(compute_visible(&catalog, &f), compute_visible(&catalog, &f));
    }

    #[test]
    fn unknown_category_yields_nothing() {
        let catalog = sample_catalog();
        assert!(compute_visible(&catalog, &facets("games", "")).is_empty());
    }

    #[test]
    fn empty_catalog_yields_nothing() {
        let catalog = Catalog::default();
        assert!(compute_visible(&catalog, &Facets::default()).is_empty());
    }

    #[test]
    fn single_item_predicate_agrees_with_engine() {
        let catalog = sample_catalog();
        let f = facets("web", "shop");
        let by_predicate: Vec<_> = catalog
            .iter()
            .filter(|i| matches(i, &f))
            .map(|i| i.id)
            .collect();
        assert_eq!(compute_visible(&catalog, &f).ids(), by_predicate.as_slice());
    }
}
