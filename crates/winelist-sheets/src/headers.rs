//! Declarative mapping from spreadsheet header spellings to [`WineField`]s.
//!
//! Every sheet a restaurant hands over names its columns differently
//! (`Nombre`, `Nombre_Vino_Completo`, `name`, ...). Headers are compared by a
//! folded key (lowercase, accents stripped, punctuation and spaces removed),
//! so one entry covers `Región 1`, `region_1` and `REGION 1`.

use std::collections::HashMap;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use winelist_core::{HeaderAliases, WineField};

/// Built-in header vocabulary.
const BUILTIN: &[(WineField, &[&str])] = &[
    (
        WineField::InternalId,
        &["sku_lazzy", "sku", "internal_id", "codigo"],
    ),
    (
        WineField::Name,
        &["Nombre_Vino_Completo", "Nombre", "name", "vino"],
    ),
    (
        WineField::Producer,
        &["Bodega", "producer", "winery", "productor"],
    ),
    (WineField::Vintage, &["Cosecha", "vintage", "Añada"]),
    (WineField::Style, &["Estilo", "style"]),
    (
        WineField::Type,
        &["TipoVino", "Tipo", "type", "Tipo de Vino"],
    ),
    (WineField::Grape, &["Cepa", "grape", "varietal"]),
    (WineField::Winemaker, &["Enólogo", "winemaker"]),
    (WineField::Region, &["Región 1", "region"]),
    (WineField::Subregion, &["Región 2", "subregion"]),
    (
        WineField::BottlePrice,
        &[
            "Precio_Botella_Restaurante R1",
            "Precio Botella",
            "bottle_price",
        ],
    ),
    (
        WineField::GlassPrice,
        &["Precio R1 copa", "Precio Copa", "glass_price"],
    ),
    (WineField::Description, &["Descripción", "description"]),
    (WineField::Pairing, &["Maridajes", "Maridaje", "pairing"]),
    (WineField::TastingNotes, &["Notas de Cata", "tasting_notes"]),
    (WineField::Alcohol, &["Alcohol", "abv"]),
    (
        WineField::Listed,
        &["EnCarta_Restaurante1", "En Carta", "listed"],
    ),
    (
        WineField::DisplayOrder,
        &["Orden_Visualizacion_Restaurante", "Orden", "display_order"],
    ),
    (
        WineField::Characteristic,
        &["Característica del Vino", "characteristic"],
    ),
];

/// Folds a header into its lookup key: lowercase, accents stripped, only
/// alphanumerics kept.
#[must_use]
pub fn header_key(header: &str) -> String {
    header
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Header lookup table. Build once per load and share across rows.
#[derive(Debug, Clone)]
pub struct HeaderTable {
    by_key: HashMap<String, WineField>,
    spellings: Vec<(WineField, String)>,
}

impl HeaderTable {
    /// The built-in vocabulary only.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self {
            by_key: HashMap::new(),
            spellings: Vec::new(),
        };
        for (field, spellings) in BUILTIN {
            for spelling in *spellings {
                table.insert(*field, spelling);
            }
        }
        table
    }

    /// The built-in vocabulary extended with operator-supplied aliases.
    ///
    /// An alias whose key collides with an existing spelling is remapped to
    /// the alias's field, so operators can repurpose a column name.
    #[must_use]
    pub fn with_aliases(aliases: &HeaderAliases) -> Self {
        let mut table = Self::builtin();
        for (field, spellings) in &aliases.aliases {
            for spelling in spellings {
                table.insert(*field, spelling);
            }
        }
        table
    }

    fn insert(&mut self, field: WineField, spelling: &str) {
        let key = header_key(spelling);
        if key.is_empty() {
            tracing::warn!(spelling, %field, "ignoring header spelling with no letters or digits");
            return;
        }
        if let Some(previous) = self.by_key.insert(key, field) {
            if previous != field {
                tracing::debug!(spelling, %previous, %field, "header alias remapped");
                self.spellings
                    .retain(|(f, s)| !(*f == previous && header_key(s) == header_key(spelling)));
            }
        }
        self.spellings.push((field, spelling.to_owned()));
    }

    /// Resolves a header to its canonical field.
    #[must_use]
    pub fn resolve(&self, header: &str) -> Option<WineField> {
        self.by_key.get(&header_key(header)).copied()
    }

    /// All known spellings, grouped by field in field order.
    #[must_use]
    pub fn spellings(&self) -> Vec<(WineField, Vec<&str>)> {
        let mut grouped: Vec<(WineField, Vec<&str>)> = Vec::new();
        let mut sorted: Vec<&(WineField, String)> = self.spellings.iter().collect();
        sorted.sort_by_key(|(field, _)| *field);
        for (field, spelling) in sorted {
            match grouped.last_mut() {
                Some((last, list)) if last == field => list.push(spelling.as_str()),
                _ => grouped.push((*field, vec![spelling.as_str()])),
            }
        }
        grouped
    }
}

impl Default for HeaderTable {
    fn default() -> Self {
        Self::builtin()
    }
}
