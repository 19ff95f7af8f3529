use serde::{Deserialize, Serialize};

/// Source literal marking a wine without a single harvest year.
pub const NON_VINTAGE_LITERAL: &str = "N/V";

/// Harvest year of a wine, or the non-vintage marker.
///
/// Serializes as a bare number (`2019`) or the string `"N/V"`, which is the
/// shape the menu front-end expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "VintageRepr", into = "VintageRepr")]
pub enum Vintage {
    Year(u16),
    NonVintage,
}

impl Vintage {
    /// Returns the harvest year, or `None` for non-vintage wines.
    #[must_use]
    pub fn year(self) -> Option<u16> {
        match self {
            Vintage::Year(year) => Some(year),
            Vintage::NonVintage => None,
        }
    }
}

impl std::fmt::Display for Vintage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vintage::Year(year) => write!(f, "{year}"),
            Vintage::NonVintage => f.write_str(NON_VINTAGE_LITERAL),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum VintageRepr {
    Year(u16),
    Text(String),
}

impl TryFrom<VintageRepr> for Vintage {
    type Error = String;

    fn try_from(repr: VintageRepr) -> Result<Self, Self::Error> {
        match repr {
            VintageRepr::Year(0) => Err("vintage year must be positive".to_string()),
            VintageRepr::Year(year) => Ok(Vintage::Year(year)),
            VintageRepr::Text(text) if text.eq_ignore_ascii_case(NON_VINTAGE_LITERAL) => {
                Ok(Vintage::NonVintage)
            }
            VintageRepr::Text(text) => Err(format!("invalid vintage: \"{text}\"")),
        }
    }
}

impl From<Vintage> for VintageRepr {
    fn from(vintage: Vintage) -> Self {
        match vintage {
            Vintage::Year(year) => VintageRepr::Year(year),
            Vintage::NonVintage => VintageRepr::Text(NON_VINTAGE_LITERAL.to_string()),
        }
    }
}

/// One row of a wine-list spreadsheet after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineRecord {
    /// 1-based position of the data row in the source sheet. Unique per load.
    pub id: usize,
    /// SKU-like code from the sheet (e.g. the `sku_lazzy` column).
    pub internal_id: Option<String>,
    pub name: Option<String>,
    pub producer: Option<String>,
    pub vintage: Option<Vintage>,
    pub style: Option<String>,
    #[serde(rename = "type")]
    pub wine_type: Option<String>,
    /// Whether the wine currently appears on the customer-facing menu.
    pub listed: bool,
    /// Manual ranking; lower values show first. `None` means unordered.
    pub display_order: Option<i32>,
    pub bottle_price: Option<f64>,
    pub glass_price: Option<f64>,
    pub grape: Option<String>,
    pub winemaker: Option<String>,
    pub region: Option<String>,
    pub subregion: Option<String>,
    /// Alcohol content exactly as written in the sheet (e.g. `"13.5%"`).
    pub alcohol: Option<String>,
    pub description: Option<String>,
    pub pairing: Option<String>,
    pub tasting_notes: Option<String>,
    pub characteristic: Option<String>,
}

impl WineRecord {
    /// Creates a listed record with only the row id set.
    #[must_use]
    pub fn new(id: usize) -> Self {
        Self {
            id,
            internal_id: None,
            name: None,
            producer: None,
            vintage: None,
            style: None,
            wine_type: None,
            listed: true,
            display_order: None,
            bottle_price: None,
            glass_price: None,
            grape: None,
            winemaker: None,
            region: None,
            subregion: None,
            alcohol: None,
            description: None,
            pairing: None,
            tasting_notes: None,
            characteristic: None,
        }
    }

    /// Identity used to detect repeated listings of the same product.
    #[must_use]
    pub fn product_key(&self) -> ProductKey {
        match self.internal_id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => ProductKey::Internal(id.to_owned()),
            None => ProductKey::NameProducer(
                self.name.clone().unwrap_or_default(),
                self.producer.clone().unwrap_or_default(),
            ),
        }
    }

    /// Returns the name, or `""` when the sheet left it blank.
    #[must_use]
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

/// Product identity: the sheet's internal id when present, otherwise the
/// `(name, producer)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductKey {
    Internal(String),
    NameProducer(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_wine(internal_id: Option<&str>, name: &str, producer: &str) -> WineRecord {
        WineRecord {
            internal_id: internal_id.map(str::to_owned),
            name: Some(name.to_owned()),
            producer: Some(producer.to_owned()),
            ..WineRecord::new(1)
        }
    }

    #[test]
    fn product_key_prefers_internal_id() {
        let wine = make_wine(Some("LZ-001"), "Malbec Reserva", "Bodega X");
        assert_eq!(wine.product_key(), ProductKey::Internal("LZ-001".to_owned()));
    }

    #[test]
    fn product_key_ignores_empty_internal_id() {
        let wine = make_wine(Some(""), "Malbec Reserva", "Bodega X");
        assert_eq!(
            wine.product_key(),
            ProductKey::NameProducer("Malbec Reserva".to_owned(), "Bodega X".to_owned())
        );
    }

    #[test]
    fn product_key_name_producer_pairs_do_not_collide() {
        let a = make_wine(None, "AB", "C");
        let b = make_wine(None, "A", "BC");
        assert_ne!(a.product_key(), b.product_key());
    }

    #[test]
    fn new_record_is_listed() {
        assert!(WineRecord::new(7).listed);
    }

    #[test]
    fn vintage_serializes_year_as_number() {
        let json = serde_json::to_string(&Vintage::Year(2019)).unwrap();
        assert_eq!(json, "2019");
    }

    #[test]
    fn vintage_serializes_non_vintage_as_sentinel() {
        let json = serde_json::to_string(&Vintage::NonVintage).unwrap();
        assert_eq!(json, "\"N/V\"");
    }

    #[test]
    fn vintage_deserializes_sentinel_case_insensitively() {
        let vintage: Vintage = serde_json::from_str("\"n/v\"").unwrap();
        assert_eq!(vintage, Vintage::NonVintage);
    }

    #[test]
    fn vintage_rejects_arbitrary_text() {
        assert!(serde_json::from_str::<Vintage>("\"old\"").is_err());
    }

    #[test]
    fn record_serializes_camel_case_keys() {
        let mut wine = make_wine(Some("LZ-9"), "Carmenere", "Bodega Y");
        wine.display_order = Some(3);
        wine.wine_type = Some("Tintos".to_owned());
        let value = serde_json::to_value(&wine).unwrap();
        assert_eq!(value["internalId"], "LZ-9");
        assert_eq!(value["displayOrder"], 3);
        assert_eq!(value["type"], "Tintos");
        assert!(value.get("wineType").is_none());
    }
}
