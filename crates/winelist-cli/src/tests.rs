use clap::Parser;
use winelist_core::{AppConfig, Category, Environment, Vintage, WineField, WineRecord};
use winelist_sheets::{ColumnMapping, ParseReport};

use super::*;
use crate::source::Source;

fn config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "info".to_owned(),
        sheet_url: None,
        sheet_id: None,
        sheet_gid: 0,
        fetch_timeout_secs: 30,
        fetch_user_agent: "winelist-test".to_owned(),
        fetch_max_retries: 0,
        fetch_retry_backoff_base_secs: 2,
        fallback_category: "uncategorized".to_owned(),
        header_aliases_path: None,
    }
}

fn source_args(argv: &[&str]) -> SourceArgs {
    let mut full = vec!["winelist", "inspect"];
    full.extend_from_slice(argv);
    match Cli::try_parse_from(full).expect("expected valid cli args").command {
        Commands::Inspect { source } => source,
        other => panic!("expected inspect, got {other:?}"),
    }
}

#[test]
fn parses_menu_with_defaults() {
    let cli = Cli::try_parse_from(["winelist", "menu"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Menu {
            format: OutputFormat::Text,
            fallback_category: None,
            ..
        }
    ));
}

#[test]
fn parses_menu_json_with_url() {
    let cli = Cli::try_parse_from([
        "winelist",
        "menu",
        "--url",
        "https://example.com/menu.csv",
        "--format",
        "json",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Menu {
            format: OutputFormat::Json,
            source: SourceArgs { url: Some(ref u), .. },
            ..
        } if u == "https://example.com/menu.csv"
    ));
}

#[test]
fn parses_menu_fallback_category() {
    let cli = Cli::try_parse_from(["winelist", "menu", "--fallback-category", "Otros"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Menu { fallback_category: Some(ref c), .. } if c == "Otros"
    ));
}

#[test]
fn parses_headers_command() {
    let cli = Cli::try_parse_from(["winelist", "headers"]).unwrap();
    assert!(matches!(cli.command, Commands::Headers));
}

#[test]
fn missing_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["winelist"]).is_err());
}

#[test]
fn file_and_url_conflict() {
    let result = Cli::try_parse_from([
        "winelist",
        "menu",
        "--file",
        "wines.csv",
        "--url",
        "https://example.com/menu.csv",
    ]);
    assert!(result.is_err());
}

#[test]
fn gid_requires_sheet_id() {
    assert!(Cli::try_parse_from(["winelist", "inspect", "--gid", "7"]).is_err());
}

#[test]
fn unknown_format_is_rejected() {
    assert!(Cli::try_parse_from(["winelist", "menu", "--format", "xml"]).is_err());
}

#[test]
fn resolve_prefers_file_flag() {
    let mut cfg = config();
    cfg.sheet_url = Some("https://example.com/configured.csv".to_owned());
    let source = source::resolve(&source_args(&["--file", "wines.csv"]), &cfg).unwrap();
    assert_eq!(source, Source::File("wines.csv".into()));
}

#[test]
fn resolve_url_flag_beats_config() {
    let mut cfg = config();
    cfg.sheet_url = Some("https://example.com/configured.csv".to_owned());
    let source =
        source::resolve(&source_args(&["--url", "https://example.com/flag.csv"]), &cfg).unwrap();
    assert_eq!(source, Source::Url("https://example.com/flag.csv".to_owned()));
}

#[test]
fn resolve_sheet_id_flag_builds_export_url() {
    let source =
        source::resolve(&source_args(&["--sheet-id", "1AbC", "--gid", "42"]), &config()).unwrap();
    assert_eq!(
        source,
        Source::Url(
            "https://docs.google.com/spreadsheets/d/1AbC/export?format=csv&gid=42".to_owned()
        )
    );
}

#[test]
fn resolve_sheet_id_flag_uses_configured_gid() {
    let mut cfg = config();
    cfg.sheet_gid = 9;
    let source = source::resolve(&source_args(&["--sheet-id", "1AbC"]), &cfg).unwrap();
    assert!(matches!(source, Source::Url(ref u) if u.ends_with("gid=9")));
}

#[test]
fn resolve_configured_url_before_configured_id() {
    let mut cfg = config();
    cfg.sheet_url = Some("https://example.com/configured.csv".to_owned());
    cfg.sheet_id = Some("1AbC".to_owned());
    let source = source::resolve(&SourceArgs::default(), &cfg).unwrap();
    assert_eq!(
        source,
        Source::Url("https://example.com/configured.csv".to_owned())
    );
}

#[test]
fn resolve_configured_id() {
    let mut cfg = config();
    cfg.sheet_id = Some("1AbC".to_owned());
    let source = source::resolve(&SourceArgs::default(), &cfg).unwrap();
    assert!(matches!(source, Source::Url(ref u) if u.contains("/d/1AbC/export")));
}

#[test]
fn resolve_without_any_source_fails() {
    let err = source::resolve(&SourceArgs::default(), &config()).unwrap_err();
    assert!(err.to_string().contains("no sheet source"), "got: {err}");
}

#[test]
fn resolve_rejects_invalid_sheet_id() {
    assert!(source::resolve(&source_args(&["--sheet-id", "a/b"]), &config()).is_err());
}

#[tokio::test]
async fn missing_file_loads_as_fetch_failed() {
    let path = std::env::temp_dir().join("winelist_cli_missing_sheet.csv");
    let _ = std::fs::remove_file(&path);
    let table = winelist_sheets::HeaderTable::builtin();
    let load = source::load(&Source::File(path), &config(), &table)
        .await
        .unwrap();
    assert!(load.status.is_failure());
}

#[tokio::test]
async fn file_source_is_parsed() {
    let path = std::env::temp_dir().join("winelist_cli_file_source.csv");
    std::fs::write(&path, "Nombre,Tipo\nMalbec,Tintos\n").unwrap();
    let table = winelist_sheets::HeaderTable::builtin();
    let load = source::load(&Source::File(path.clone()), &config(), &table)
        .await
        .unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(load.records.len(), 1);
    assert_eq!(load.records[0].wine_type.as_deref(), Some("Tintos"));
}

#[test]
fn header_table_without_aliases_is_builtin() {
    let table = menu::header_table(&config()).unwrap();
    assert_eq!(table.resolve("Bodega"), Some(WineField::Producer));
}

#[test]
fn header_table_reports_unreadable_aliases_file() {
    let mut cfg = config();
    cfg.header_aliases_path = Some(std::env::temp_dir().join("winelist_cli_no_aliases.yaml"));
    let _ = std::fs::remove_file(cfg.header_aliases_path.as_ref().unwrap());
    assert!(menu::header_table(&cfg).is_err());
}

#[test]
fn render_menu_lists_categories_and_wines() {
    let mut wine = WineRecord::new(1);
    wine.name = Some("Malbec Reserva".to_owned());
    wine.producer = Some("Bodega X".to_owned());
    wine.vintage = Some(Vintage::Year(2019));
    wine.bottle_price = Some(45.0);

    let menu = vec![
        Category {
            name: "Tintos".to_owned(),
            wines: vec![wine],
        },
        Category {
            name: "uncategorized".to_owned(),
            wines: vec![],
        },
    ];
    let text = menu::render_menu(&menu);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Tintos (1)");
    assert!(lines[1].contains("2019"));
    assert!(lines[1].contains("Malbec Reserva"));
    assert!(lines[1].contains("45.00"));
    assert!(lines[1].trim_end().ends_with('-'), "no glass price: {}", lines[1]);
    assert_eq!(lines[2], "");
    assert_eq!(lines[3], "uncategorized (0)");
}

#[test]
fn render_report_shows_unknown_and_ignored_columns() {
    let report = ParseReport {
        data_rows: 3,
        skipped_unidentified: 1,
        unknown_headers: vec!["Notas internas".to_owned()],
        columns: vec![
            ColumnMapping {
                header: "Nombre".to_owned(),
                field: Some(WineField::Name),
            },
            ColumnMapping {
                header: "Notas internas".to_owned(),
                field: None,
            },
        ],
    };
    let text = menu::render_report(&report, 2);
    assert!(text.contains("Data rows: 3"));
    assert!(text.contains("Records: 2"));
    assert!(text.contains("Skipped (no id or name): 1"));
    assert!(text.contains("Unknown headers: Notas internas"));
    assert!(text.lines().any(|l| l.starts_with("Nombre") && l.ends_with("name")));
    assert!(text
        .lines()
        .any(|l| l.starts_with("Notas internas") && l.ends_with("(ignored)")));
}

#[test]
fn render_menu_with_every_wine_unlisted_shows_no_wines() {
    let table = winelist_sheets::HeaderTable::builtin();
    let load = winelist_sheets::load_wines_from_str(
        "Nombre,EnCarta_Restaurante1\nMalbec,FALSE\nSyrah,falso\n",
        &table,
    );
    assert_eq!(load.status, winelist_core::LoadStatus::Loaded);

    let menu = winelist_menu::build_menu(load.records, &winelist_menu::MenuOptions::default());
    assert!(menu.is_empty());
    assert_eq!(menu::render_menu(&menu), "no wines available\n");
}
