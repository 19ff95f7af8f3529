//! Load results that never fail: the caller always gets a [`SheetLoad`] and
//! checks its [`LoadStatus`].

use chrono::{DateTime, Utc};
use winelist_core::{LoadStatus, WineRecord};

use crate::headers::HeaderTable;
use crate::normalize::{parse_csv, ParseReport};

#[derive(Debug, Clone)]
pub struct SheetLoad {
    pub status: LoadStatus,
    /// Normalized records in source order. Empty unless `status` is `Loaded`.
    pub records: Vec<WineRecord>,
    pub report: ParseReport,
    pub loaded_at: DateTime<Utc>,
}

impl SheetLoad {
    /// Parses CSV text that is already in hand.
    #[must_use]
    pub fn from_csv(text: &str, table: &HeaderTable) -> Self {
        let parsed = parse_csv(text, table);
        let status = if parsed.records.is_empty() {
            LoadStatus::Empty
        } else {
            LoadStatus::Loaded
        };
        Self {
            status,
            records: parsed.records,
            report: parsed.report,
            loaded_at: Utc::now(),
        }
    }

    /// A load that produced no data because the source could not be read.
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            status: LoadStatus::FetchFailed {
                reason: reason.into(),
            },
            records: Vec::new(),
            report: ParseReport::default(),
            loaded_at: Utc::now(),
        }
    }
}

/// Normalizes CSV text from a local source (file, stdin, test fixture).
#[must_use]
pub fn load_wines_from_str(text: &str, table: &HeaderTable) -> SheetLoad {
    SheetLoad::from_csv(text, table)
}
