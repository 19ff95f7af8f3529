//! Command handlers for the CLI.
//!
//! Each handler loads the sheet fresh, prints to stdout, and turns a
//! `FetchFailed` load into an error so the process exits non-zero.

use anyhow::Context;
use winelist_core::{AppConfig, Category, LoadStatus, WineRecord};
use winelist_menu::{build_menu, MenuOptions};
use winelist_sheets::{HeaderTable, ParseReport, SheetLoad};

use crate::source::{self, Source};
use crate::OutputFormat;

/// Shown instead of a menu when no listed wine survives loading.
pub(crate) const NO_WINES_MESSAGE: &str = "no wines available";

/// Builds the header table from the built-in spellings plus the aliases file,
/// if one is configured.
///
/// # Errors
///
/// Returns an error if the aliases file cannot be read or is invalid.
pub(crate) fn header_table(config: &AppConfig) -> anyhow::Result<HeaderTable> {
    let Some(path) = &config.header_aliases_path else {
        return Ok(HeaderTable::builtin());
    };
    let aliases = winelist_core::load_header_aliases(path)
        .with_context(|| format!("failed to load header aliases from {}", path.display()))?;
    tracing::info!(path = %path.display(), fields = aliases.aliases.len(), "loaded header aliases");
    Ok(HeaderTable::with_aliases(&aliases))
}

/// Returns an error for a failed load and `false` for an empty one.
fn ensure_loaded(load: &SheetLoad) -> anyhow::Result<bool> {
    match &load.status {
        LoadStatus::FetchFailed { reason } => {
            anyhow::bail!("could not load wine sheet: {reason}")
        }
        LoadStatus::Empty => Ok(false),
        LoadStatus::Loaded => Ok(true),
    }
}

/// Load, categorize, and print the menu.
///
/// # Errors
///
/// Returns an error if the sheet could not be loaded or the output cannot be
/// serialized.
pub(crate) async fn run_menu(
    config: &AppConfig,
    table: &HeaderTable,
    source: &Source,
    format: OutputFormat,
    fallback_category: Option<&str>,
) -> anyhow::Result<()> {
    let load = source::load(source, config, table).await?;
    if !ensure_loaded(&load)? {
        println!("{NO_WINES_MESSAGE}");
        return Ok(());
    }

    let options = MenuOptions {
        fallback_category: fallback_category
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&config.fallback_category)
            .to_owned(),
    };
    let record_count = load.records.len();
    let menu = build_menu(load.records, &options);
    tracing::info!(
        records = record_count,
        categories = menu.len(),
        "wine menu ready"
    );

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&menu).context("failed to serialize menu")?;
            println!("{json}");
        }
        OutputFormat::Text => print!("{}", render_menu(&menu)),
    }
    Ok(())
}

/// Load the sheet and print how it was read.
///
/// # Errors
///
/// Returns an error if the sheet could not be loaded.
pub(crate) async fn run_inspect(
    config: &AppConfig,
    table: &HeaderTable,
    source: &Source,
) -> anyhow::Result<()> {
    let load = source::load(source, config, table).await?;
    ensure_loaded(&load)?;

    println!("Source: {source}");
    println!("Loaded at: {}", load.loaded_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Status: {}", load.status);
    print!("{}", render_report(&load.report, load.records.len()));
    Ok(())
}

/// Print every header spelling the parser recognizes.
pub(crate) fn run_headers(table: &HeaderTable) {
    println!("{:<18}{:<9}HEADERS", "FIELD", "KIND");
    for (field, spellings) in table.spellings() {
        println!(
            "{:<18}{:<9}{}",
            field.as_str(),
            field.kind().as_str(),
            spellings.join(", ")
        );
    }
}

fn fmt_price(price: Option<f64>) -> String {
    price.map_or_else(|| "-".to_owned(), |p| format!("{p:.2}"))
}

fn menu_line(wine: &WineRecord) -> String {
    let vintage = wine
        .vintage
        .map_or_else(|| "-".to_owned(), |v| v.to_string());
    let producer = wine.producer.as_deref().unwrap_or("-");
    format!(
        "  {:<7}{:<40}{:<28}{:>10}{:>10}",
        vintage,
        wine.name_or_empty(),
        producer,
        fmt_price(wine.bottle_price),
        fmt_price(wine.glass_price)
    )
}

/// Plain-text menu: one block per category. A menu with no categories (every
/// wine unlisted) renders as the no-wines message.
pub(crate) fn render_menu(menu: &[Category]) -> String {
    if menu.is_empty() {
        return format!("{NO_WINES_MESSAGE}\n");
    }
    let mut out = String::new();
    for (index, category) in menu.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{} ({})\n", category.name, category.wines.len()));
        for wine in &category.wines {
            out.push_str(&menu_line(wine));
            out.push('\n');
        }
    }
    out
}

pub(crate) fn render_report(report: &ParseReport, records: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("Data rows: {}\n", report.data_rows));
    out.push_str(&format!("Records: {records}\n"));
    out.push_str(&format!(
        "Skipped (no id or name): {}\n",
        report.skipped_unidentified
    ));
    if report.unknown_headers.is_empty() {
        out.push_str("Unknown headers: none\n");
    } else {
        out.push_str(&format!(
            "Unknown headers: {}\n",
            report.unknown_headers.join(", ")
        ));
    }
    out.push('\n');
    out.push_str(&format!("{:<32}FIELD\n", "HEADER"));
    for column in &report.columns {
        let field = column.field.map_or("(ignored)", |f| f.as_str());
        out.push_str(&format!("{:<32}{}\n", column.header, field));
    }
    out
}
