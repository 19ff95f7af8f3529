//! Sheet URL helpers.

use crate::error::SheetError;

const GOOGLE_SHEETS_BASE: &str = "https://docs.google.com/spreadsheets/d/";

/// Builds the CSV export URL of a published Google Sheet tab.
///
/// # Errors
///
/// Returns [`SheetError::InvalidSheetUrl`] if `sheet_id` is blank or contains
/// characters that cannot appear in a document id.
pub fn published_csv_url(sheet_id: &str, gid: u64) -> Result<String, SheetError> {
    let id = sheet_id.trim();
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(SheetError::InvalidSheetUrl {
            url: sheet_id.to_owned(),
            reason: "sheet id must be non-empty and contain only letters, digits, '-' or '_'"
                .to_owned(),
        });
    }

    let mut url = parse_sheet_url(&format!("{GOOGLE_SHEETS_BASE}{id}/export"))?;
    url.query_pairs_mut()
        .append_pair("format", "csv")
        .append_pair("gid", &gid.to_string());
    Ok(url.to_string())
}

/// Parses and validates an `http(s)` sheet URL.
///
/// # Errors
///
/// Returns [`SheetError::InvalidSheetUrl`] if the URL does not parse or uses
/// another scheme.
pub fn parse_sheet_url(raw: &str) -> Result<reqwest::Url, SheetError> {
    let url = reqwest::Url::parse(raw.trim()).map_err(|e| SheetError::InvalidSheetUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SheetError::InvalidSheetUrl {
            url: raw.to_owned(),
            reason: format!("unsupported scheme \"{}\"", url.scheme()),
        });
    }
    Ok(url)
}

/// Extracts the hostname from a sheet URL for use in error messages.
///
/// Falls back to the full URL string if parsing fails.
pub(super) fn extract_host(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}
