pub mod client;
pub mod coerce;
pub mod error;
pub mod headers;
pub mod load;
pub mod normalize;
mod retry;
pub mod tokenize;

pub use client::{parse_sheet_url, published_csv_url, SheetClient};
pub use error::SheetError;
pub use headers::HeaderTable;
pub use load::{load_wines_from_str, SheetLoad};
pub use normalize::{normalize_row, parse_csv, ColumnMapping, ParseReport, ParsedSheet};
pub use tokenize::tokenize_line;
