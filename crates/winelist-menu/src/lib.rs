//! Turns normalized wine records into the grouped, ordered menu the
//! front-end renders.
//!
//! Everything here is a pure function of its input; nothing is cached between
//! calls.

pub mod categorize;
pub mod order;

pub use categorize::{category_names, group_by_category, CategorySet};
pub use order::{compare_wines, sort_wines};

use winelist_core::{GroupedWineData, WineRecord};

/// Category for wines with neither a style nor a type.
pub const DEFAULT_FALLBACK_CATEGORY: &str = "uncategorized";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOptions {
    pub fallback_category: String,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            fallback_category: DEFAULT_FALLBACK_CATEGORY.to_owned(),
        }
    }
}

/// Builds the menu: keeps listed wines, sorts them once, then groups them.
///
/// Wines with `listed == false` never reach any category. Within a category
/// wines keep the global sort order; categories are ordered by name.
#[must_use]
pub fn build_menu<I>(records: I, options: &MenuOptions) -> GroupedWineData
where
    I: IntoIterator<Item = WineRecord>,
{
    let mut listed: Vec<WineRecord> = records.into_iter().filter(|w| w.listed).collect();
    sort_wines(&mut listed);

    let grouped = group_by_category(&listed, options);
    tracing::debug!(
        listed = listed.len(),
        categories = grouped.len(),
        "built wine menu"
    );
    grouped
}
