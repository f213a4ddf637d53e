use crate::catalog::{Catalog, CategoryCount};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ALL_CATEGORIES;

/// Filter values with their item counts, `all` first.
pub fn run(catalog: &Catalog) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if catalog.is_empty() {
        result.add_message(CmdMessage::warning("No categories: the catalog is empty."));
        return Ok(result);
    }

    let mut categories = vec![CategoryCount {
        category: ALL_CATEGORIES.to_string(),
        count: catalog.len(),
    }];
    categories.extend(catalog.categories());
    Ok(result.with_categories(categories))
}
