//! Normalization from raw CSV text to [`WineRecord`]s.
//!
//! Tokenizing lives in [`crate::tokenize`] and cell coercion in
//! [`crate::coerce`]; this module resolves columns through the
//! [`HeaderTable`] and assembles records.
//!
//! Policy, applied to every sheet regardless of where it came from:
//! - unknown headers are dropped and listed in the [`ParseReport`];
//! - when two columns map to one field, the first non-empty cell wins;
//! - rows with neither an internal id nor a name are dropped;
//! - missing trailing cells read as blank, surplus cells are ignored;
//! - the listing flag follows the table in [`crate::coerce::parse_listed`].

use serde::Serialize;
use winelist_core::{FieldKind, Vintage, WineField, WineRecord};

use crate::coerce::{clean_text, parse_integer, parse_listed, parse_price, parse_vintage};
use crate::headers::HeaderTable;
use crate::tokenize::{split_lines, tokenize_line};

/// How one source column was interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMapping {
    pub header: String,
    pub field: Option<WineField>,
}

/// Diagnostics collected while parsing one sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    /// Non-blank lines after the header.
    pub data_rows: usize,
    /// Rows dropped for lacking both an internal id and a name.
    pub skipped_unidentified: usize,
    /// Non-blank headers that matched no field.
    pub unknown_headers: Vec<String>,
    pub columns: Vec<ColumnMapping>,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedSheet {
    pub records: Vec<WineRecord>,
    pub report: ParseReport,
}

/// A coerced cell value, ready to be assigned to its field.
#[derive(Debug, Clone, PartialEq)]
enum CellValue {
    Text(String),
    Number(f64),
    Integer(i32),
    Vintage(Vintage),
}

/// Parses a full CSV export into normalized records, in source order.
#[must_use]
pub fn parse_csv(text: &str, table: &HeaderTable) -> ParsedSheet {
    let mut lines = split_lines(text).filter(|line| !line.trim().is_empty());
    let Some(header_line) = lines.next() else {
        tracing::warn!("wine sheet is empty, no header row");
        return ParsedSheet::default();
    };

    let headers = tokenize_line(header_line);
    let columns: Vec<Option<WineField>> = headers.iter().map(|h| table.resolve(h)).collect();

    let mut report = ParseReport {
        unknown_headers: headers
            .iter()
            .zip(&columns)
            .filter(|(header, field)| field.is_none() && !header.is_empty())
            .map(|(header, _)| header.clone())
            .collect(),
        columns: headers
            .iter()
            .zip(&columns)
            .map(|(header, field)| ColumnMapping {
                header: header.clone(),
                field: *field,
            })
            .collect(),
        ..ParseReport::default()
    };
    if !report.unknown_headers.is_empty() {
        tracing::debug!(headers = ?report.unknown_headers, "ignoring unrecognized columns");
    }

    let mut records = Vec::new();
    for (idx, line) in lines.enumerate() {
        let row_number = idx + 1;
        report.data_rows += 1;

        let cells = tokenize_line(line);
        if let Some(record) = normalize_row(&cells, &columns, row_number) {
            records.push(record);
        } else {
            tracing::debug!(row_number, "skipping row without internal id or name");
            report.skipped_unidentified += 1;
        }
    }

    tracing::info!(
        data_rows = report.data_rows,
        records = records.len(),
        skipped = report.skipped_unidentified,
        unknown_headers = report.unknown_headers.len(),
        "parsed wine sheet"
    );

    ParsedSheet { records, report }
}

/// Builds one record from a tokenized row.
///
/// `columns[i]` is the field for cell `i`. Returns `None` when the row has
/// neither an internal id nor a name.
#[must_use]
pub fn normalize_row(
    cells: &[String],
    columns: &[Option<WineField>],
    row_number: usize,
) -> Option<WineRecord> {
    let mut record = WineRecord::new(row_number);
    let mut listed_cell: Option<&str> = None;

    let padded = cells
        .iter()
        .map(String::as_str)
        .chain(std::iter::repeat(""));

    for (column, cell) in columns.iter().zip(padded) {
        let Some(field) = *column else {
            continue;
        };

        if field.kind() == FieldKind::Flag {
            if listed_cell.is_none() && !cell.trim().is_empty() {
                listed_cell = Some(cell);
            }
            continue;
        }

        if let Some(value) = coerce(field.kind(), cell) {
            assign(&mut record, field, value);
        }
    }

    record.listed = parse_listed(listed_cell);

    if record.internal_id.is_none() && record.name.is_none() {
        return None;
    }
    Some(record)
}

fn coerce(kind: FieldKind, cell: &str) -> Option<CellValue> {
    match kind {
        FieldKind::Text => clean_text(cell).map(CellValue::Text),
        FieldKind::Price => parse_price(cell).map(CellValue::Number),
        FieldKind::Integer => parse_integer(cell).map(CellValue::Integer),
        FieldKind::Vintage => parse_vintage(cell).map(CellValue::Vintage),
        FieldKind::Flag => None,
    }
}

fn assign(record: &mut WineRecord, field: WineField, value: CellValue) {
    match (field, value) {
        (WineField::BottlePrice, CellValue::Number(v)) => fill(&mut record.bottle_price, v),
        (WineField::GlassPrice, CellValue::Number(v)) => fill(&mut record.glass_price, v),
        (WineField::DisplayOrder, CellValue::Integer(v)) => fill(&mut record.display_order, v),
        (WineField::Vintage, CellValue::Vintage(v)) => fill(&mut record.vintage, v),
        (field, CellValue::Text(v)) => {
            if let Some(slot) = text_slot(record, field) {
                fill(slot, v);
            }
        }
        _ => {}
    }
}

fn text_slot(record: &mut WineRecord, field: WineField) -> Option<&mut Option<String>> {
    let slot = match field {
        WineField::InternalId => &mut record.internal_id,
        WineField::Name => &mut record.name,
        WineField::Producer => &mut record.producer,
        WineField::Style => &mut record.style,
        WineField::Type => &mut record.wine_type,
        WineField::Grape => &mut record.grape,
        WineField::Winemaker => &mut record.winemaker,
        WineField::Region => &mut record.region,
        WineField::Subregion => &mut record.subregion,
        WineField::Description => &mut record.description,
        WineField::Pairing => &mut record.pairing,
        WineField::TastingNotes => &mut record.tasting_notes,
        WineField::Alcohol => &mut record.alcohol,
        WineField::Characteristic => &mut record.characteristic,
        WineField::Vintage
        | WineField::BottlePrice
        | WineField::GlassPrice
        | WineField::Listed
        | WineField::DisplayOrder => return None,
    };
    Some(slot)
}

/// First value wins.
fn fill<T>(slot: &mut Option<T>, value: T) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
