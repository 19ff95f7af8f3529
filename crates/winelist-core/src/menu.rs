use serde::{Deserialize, Serialize};

use crate::wine::WineRecord;

/// A named display bucket of wines, derived from `style`/`type` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "categoryName")]
    pub name: String,
    pub wines: Vec<WineRecord>,
}

/// Categories ordered by name ascending, ready for rendering.
pub type GroupedWineData = Vec<Category>;

/// Outcome of loading a wine sheet.
///
/// Distinguishes a sheet that legitimately lists zero wines from a fetch that
/// never produced data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadStatus {
    Loaded,
    Empty,
    FetchFailed { reason: String },
}

impl LoadStatus {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, LoadStatus::FetchFailed { .. })
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadStatus::Loaded => f.write_str("loaded"),
            LoadStatus::Empty => f.write_str("empty"),
            LoadStatus::FetchFailed { reason } => write!(f, "fetch failed: {reason}"),
        }
    }
}
