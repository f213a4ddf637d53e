//! Which optional controls exist on the page.
//!
//! Every control is optional. A missing control only disables the feature that
//! depends on it:
//!
//! | missing                        | effect                                          |
//! |--------------------------------|-------------------------------------------------|
//! | all filter buttons             | category events ignored                         |
//! | a filter button for a value    | that value cannot be selected                   |
//! | a search input / form          | its input / submit events ignored               |
//! | previous or next button        | no pagination: one page holds every visible item |
//! | page-number buttons            | jumps ignored, no page buttons shown            |
//! | the no-results notice          | no notice shown                                 |

use crate::catalog::Catalog;
use crate::events::SearchBox;
use crate::model::ALL_CATEGORIES;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchControls {
    #[serde(default)]
    pub input: bool,
    #[serde(default)]
    pub form: bool,
}

impl SearchControls {
    pub fn present() -> Self {
        Self {
            input: true,
            form: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    /// Category values of the filter buttons, in display order.
    pub filter_buttons: Vec<String>,
    pub desktop_search: SearchControls,
    pub mobile_search: SearchControls,
    pub previous_button: bool,
    pub next_button: bool,
    pub page_numbers: bool,
    pub no_results_notice: bool,
}

impl Controls {
    /// Every control present, with an "all" button followed by one per category.
    pub fn full(catalog: &Catalog) -> Self {
        let mut filter_buttons = vec![ALL_CATEGORIES.to_string()];
        filter_buttons.extend(catalog.categories().into_iter().map(|c| c.category));

        Self {
            filter_buttons,
            desktop_search: SearchControls::present(),
            mobile_search: SearchControls::present(),
            previous_button: true,
            next_button: true,
            page_numbers: true,
            no_results_notice: true,
        }
    }

    pub fn has_filter(&self, value: &str) -> bool {
        self.filter_buttons.iter().any(|b| b == value)
    }

    pub fn search(&self, source: SearchBox) -> SearchControls {
        match source {
            SearchBox::Desktop => self.desktop_search,
            SearchBox::Mobile => self.mobile_search,
        }
    }

    /// Pagination needs both boundary buttons.
    pub fn pagination_enabled(&self) -> bool {
        self.previous_button && self.next_button
    }
}
