//! Cell coercion helpers. None of these fail: a value that cannot be read is
//! reported as absent, except for the listing flag which always resolves to
//! a boolean.

use winelist_core::{Vintage, NON_VINTAGE_LITERAL};

/// Flag spellings that mark a wine as on the menu.
const LISTED_TRUE: &[&str] = &["true", "verdadero", "si", "sí", "yes", "1", "x"];

/// Flag spellings that take a wine off the menu.
const LISTED_FALSE: &[&str] = &["false", "falso", "no", "0"];

/// Listing flag when the sheet has no listing column or the cell is blank.
pub const LISTED_WHEN_MISSING: bool = true;

/// Listing flag for text that matches neither spelling list.
pub const LISTED_WHEN_UNRECOGNIZED: bool = false;

/// Trims a text cell; blank becomes `None`.
#[must_use]
pub fn clean_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Parses a price cell such as `"$1,234.50"`, `"€ 18.00"` or `"'12.5'"`.
///
/// Currency symbols, thousands separators, spaces and stray quotes are
/// dropped; what remains must be a non-negative finite decimal.
#[must_use]
pub fn parse_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim().trim_matches(|c| c == '"' || c == '\'');
    let before_digits = trimmed.split(|c: char| c.is_ascii_digit()).next();
    if before_digits.is_some_and(|prefix| prefix.contains('-')) {
        return None;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses an integer cell. Integral decimals such as `"3.0"` are accepted
/// because spreadsheet exports sometimes format whole numbers that way.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn parse_integer(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i32>() {
        return Some(value);
    }

    let value = trimmed.parse::<f64>().ok()?;
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    if value.is_finite() && value.fract() == 0.0 && in_range {
        return Some(value as i32);
    }
    None
}

/// Parses a vintage cell: `N/V` (or `NV`, any case) or a four-digit year.
///
/// Like [`parse_integer`], a year exported as an integral decimal (`"2019.0"`)
/// is accepted.
#[must_use]
pub fn parse_vintage(raw: &str) -> Option<Vintage> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case(NON_VINTAGE_LITERAL) || trimmed.eq_ignore_ascii_case("NV") {
        return Some(Vintage::NonVintage);
    }

    let trimmed = match trimmed.split_once('.') {
        Some((year, fraction)) if !fraction.is_empty() && fraction.bytes().all(|b| b == b'0') => {
            year
        }
        Some(_) => return None,
        None => trimmed,
    };
    if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed
        .parse::<u16>()
        .ok()
        .filter(|year| *year >= 1000)
        .map(Vintage::Year)
}

/// Resolves the listing flag. `None` means the sheet has no listing column.
#[must_use]
pub fn parse_listed(raw: Option<&str>) -> bool {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return LISTED_WHEN_MISSING;
    };

    let lower = value.to_lowercase();
    if LISTED_TRUE.contains(&lower.as_str()) {
        true
    } else if LISTED_FALSE.contains(&lower.as_str()) {
        false
    } else {
        tracing::debug!(value, "unrecognized listing flag");
        LISTED_WHEN_UNRECOGNIZED
    }
}
