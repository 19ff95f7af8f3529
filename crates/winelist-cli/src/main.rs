mod menu;
mod source;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "winelist")]
#[command(about = "Builds the restaurant wine menu from a published spreadsheet")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the sheet and print the categorized menu
    Menu {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Category for wines with neither style nor type (overrides config)
        #[arg(long)]
        fallback_category: Option<String>,
    },
    /// Parse the sheet and report how its columns and rows were read
    Inspect {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the header mapping table, including configured aliases
    Headers,
}

/// Where to read the sheet from. At most one may be given; without any the
/// configured sheet URL or id is used.
#[derive(Debug, Default, Args)]
struct SourceArgs {
    /// Read CSV from a local file
    #[arg(long, conflicts_with_all = ["url", "sheet_id"])]
    file: Option<PathBuf>,

    /// Fetch CSV from this URL
    #[arg(long, conflicts_with = "sheet_id")]
    url: Option<String>,

    /// Google Sheets document id of a published sheet
    #[arg(long)]
    sheet_id: Option<String>,

    /// Tab id within the sheet (with --sheet-id)
    #[arg(long, requires = "sheet_id")]
    gid: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = winelist_core::load_app_config().context("failed to load configuration")?;
    init_tracing(&config.log_level);
    tracing::debug!(config = ?config, "configuration loaded");

    let table = menu::header_table(&config)?;

    match cli.command {
        Commands::Menu {
            source: args,
            format,
            fallback_category,
        } => {
            let source = source::resolve(&args, &config)?;
            menu::run_menu(
                &config,
                &table,
                &source,
                format,
                fallback_category.as_deref(),
            )
            .await
        }
        Commands::Inspect { source: args } => {
            let source = source::resolve(&args, &config)?;
            menu::run_inspect(&config, &table, &source).await
        }
        Commands::Headers => {
            menu::run_headers(&table);
            Ok(())
        }
    }
}

/// Logs go to stderr so `menu --format json` output stays machine-readable.
/// `RUST_LOG` wins over the configured level.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests;
