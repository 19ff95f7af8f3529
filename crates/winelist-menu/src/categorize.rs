//! Category assignment and per-category deduplication.
//!
//! A wine belongs to the category named by its `style`, the one named by its
//! `type`, or both. Within one category each product (see
//! [`WineRecord::product_key`]) appears once; across categories it may repeat.

use std::collections::{BTreeMap, HashSet};

use winelist_core::{Category, GroupedWineData, ProductKey, WineRecord};

use crate::MenuOptions;

/// The one or two category names a wine is filed under. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    primary: String,
    secondary: Option<String>,
}

impl CategorySet {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary.as_str()).chain(self.secondary.as_deref())
    }

    /// One or two.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + usize::from(self.secondary.is_some())
    }

    /// Always `false`: a set holds its primary name, which is the fallback
    /// category when a wine has neither style nor type.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Computes the categories for one wine.
///
/// `style` when set, plus `type` when set and textually different from
/// `style`. Names are compared exactly: `Tintos` and `tintos` are two
/// categories. A wine with neither goes to `fallback` alone.
#[must_use]
pub fn category_names(wine: &WineRecord, fallback: &str) -> CategorySet {
    let non_empty = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    };

    match (non_empty(&wine.style), non_empty(&wine.wine_type)) {
        (Some(style), Some(wine_type)) if style != wine_type => CategorySet {
            primary: style,
            secondary: Some(wine_type),
        },
        (Some(name), _) | (None, Some(name)) => CategorySet {
            primary: name,
            secondary: None,
        },
        (None, None) => CategorySet {
            primary: fallback.to_owned(),
            secondary: None,
        },
    }
}

#[derive(Default)]
struct Bucket {
    seen: HashSet<ProductKey>,
    wines: Vec<WineRecord>,
}

/// Files already-sorted wines into categories ordered by name.
///
/// Wines keep their input order inside each category. A wine whose product
/// key is already in a category is skipped for that category only.
#[must_use]
pub fn group_by_category(sorted: &[WineRecord], options: &MenuOptions) -> GroupedWineData {
    let buckets = sorted
        .iter()
        .fold(BTreeMap::<String, Bucket>::new(), |mut acc, wine| {
            let key = wine.product_key();
            for name in category_names(wine, &options.fallback_category).iter() {
                let bucket = acc.entry(name.to_owned()).or_default();
                if bucket.seen.insert(key.clone()) {
                    bucket.wines.push(wine.clone());
                } else {
                    tracing::debug!(
                        category = name,
                        wine_id = wine.id,
                        "skipping repeated product in category"
                    );
                }
            }
            acc
        });

    buckets
        .into_iter()
        .map(|(name, bucket)| Category {
            name,
            wines: bucket.wines,
        })
        .collect()
}
