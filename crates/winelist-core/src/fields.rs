use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Canonical [`crate::WineRecord`] field a spreadsheet column can map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WineField {
    InternalId,
    Name,
    Producer,
    Vintage,
    Style,
    Type,
    Grape,
    Winemaker,
    Region,
    Subregion,
    BottlePrice,
    GlassPrice,
    Description,
    Pairing,
    TastingNotes,
    Alcohol,
    Listed,
    DisplayOrder,
    Characteristic,
}

/// How a raw cell is coerced into its field's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Price,
    Integer,
    Vintage,
    Flag,
}

impl FieldKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Price => "price",
            FieldKind::Integer => "integer",
            FieldKind::Vintage => "vintage",
            FieldKind::Flag => "flag",
        }
    }
}

impl WineField {
    #[must_use]
    pub fn kind(self) -> FieldKind {
        match self {
            WineField::BottlePrice | WineField::GlassPrice => FieldKind::Price,
            WineField::DisplayOrder => FieldKind::Integer,
            WineField::Vintage => FieldKind::Vintage,
            WineField::Listed => FieldKind::Flag,
            _ => FieldKind::Text,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WineField::InternalId => "internal_id",
            WineField::Name => "name",
            WineField::Producer => "producer",
            WineField::Vintage => "vintage",
            WineField::Style => "style",
            WineField::Type => "type",
            WineField::Grape => "grape",
            WineField::Winemaker => "winemaker",
            WineField::Region => "region",
            WineField::Subregion => "subregion",
            WineField::BottlePrice => "bottle_price",
            WineField::GlassPrice => "glass_price",
            WineField::Description => "description",
            WineField::Pairing => "pairing",
            WineField::TastingNotes => "tasting_notes",
            WineField::Alcohol => "alcohol",
            WineField::Listed => "listed",
            WineField::DisplayOrder => "display_order",
            WineField::Characteristic => "characteristic",
        }
    }
}

impl std::fmt::Display for WineField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra header spellings supplied by an operator for sheets whose columns
/// the built-in vocabulary does not cover.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderAliases {
    #[serde(default)]
    pub aliases: BTreeMap<WineField, Vec<String>>,
}

/// Load and validate header aliases from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed (including
/// unknown field names), or if an alias is blank or has no letters or digits.
pub fn load_header_aliases(path: &Path) -> Result<HeaderAliases, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::AliasesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let aliases: HeaderAliases =
        serde_yaml::from_str(&content).map_err(ConfigError::AliasesFileParse)?;

    validate_aliases(&aliases)?;

    Ok(aliases)
}

fn validate_aliases(aliases: &HeaderAliases) -> Result<(), ConfigError> {
    for (field, spellings) in &aliases.aliases {
        if spellings.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "blank header alias for field '{field}'"
            )));
        }
        // Headers are matched on letters and digits only.
        if let Some(bad) = spellings
            .iter()
            .find(|s| !s.chars().any(char::is_alphanumeric))
        {
            return Err(ConfigError::Validation(format!(
                "header alias \"{bad}\" for field '{field}' has no letters or digits"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "fields_test.rs"]
mod tests;
