//! Menu ordering.
//!
//! Precedence, first difference wins:
//! 1. `display_order` ascending; wines with an order come before wines without.
//! 2. Vintage ascending; non-vintage (and unknown) wines after every dated one.
//! 3. Name, compared case- and accent-insensitively, then by raw text.
//!
//! Sorting is stable, so wines tied on all three keep their source order.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use winelist_core::{Vintage, WineRecord};

/// Materialized sort key for one wine. Field order is comparison order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    display_order: (u8, i32),
    vintage: (u8, u16),
    collated_name: String,
    name: String,
}

#[must_use]
pub fn sort_key(wine: &WineRecord) -> SortKey {
    SortKey {
        display_order: match wine.display_order {
            Some(order) => (0, order),
            None => (1, 0),
        },
        vintage: match wine.vintage {
            Some(Vintage::Year(year)) => (0, year),
            Some(Vintage::NonVintage) | None => (1, 0),
        },
        collated_name: collation_key(wine.name_or_empty()),
        name: wine.name_or_empty().to_owned(),
    }
}

/// Folds a name for locale-insensitive comparison: accents stripped, lowercase.
#[must_use]
pub fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

#[must_use]
pub fn compare_wines(a: &WineRecord, b: &WineRecord) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

/// Sorts wines in menu order. Stable.
pub fn sort_wines(wines: &mut [WineRecord]) {
    wines.sort_by_cached_key(sort_key);
}
