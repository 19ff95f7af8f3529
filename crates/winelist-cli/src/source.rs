//! Sheet source resolution and loading.
//!
//! Command-line flags win over configuration: `--file`, `--url`,
//! `--sheet-id`, then `WINELIST_SHEET_URL`, then `WINELIST_SHEET_ID`.

use std::path::PathBuf;

use anyhow::Context;
use winelist_core::{AppConfig, ConfigError};
use winelist_sheets::{published_csv_url, HeaderTable, SheetClient, SheetLoad};

use crate::SourceArgs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Source {
    File(PathBuf),
    Url(String),
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::File(path) => write!(f, "file {}", path.display()),
            Source::Url(_) => f.write_str("published sheet"),
        }
    }
}

/// Picks the sheet source for this run.
///
/// # Errors
///
/// Returns an error if a sheet id is not a valid document id, or if neither
/// the flags nor the configuration name a source.
pub(crate) fn resolve(args: &SourceArgs, config: &AppConfig) -> anyhow::Result<Source> {
    if let Some(path) = &args.file {
        return Ok(Source::File(path.clone()));
    }
    if let Some(url) = &args.url {
        return Ok(Source::Url(url.clone()));
    }
    if let Some(sheet_id) = &args.sheet_id {
        let gid = args.gid.unwrap_or(config.sheet_gid);
        return Ok(Source::Url(published_csv_url(sheet_id, gid)?));
    }
    if let Some(url) = &config.sheet_url {
        return Ok(Source::Url(url.clone()));
    }
    if let Some(sheet_id) = &config.sheet_id {
        return Ok(Source::Url(published_csv_url(sheet_id, config.sheet_gid)?));
    }

    Err(ConfigError::MissingEnvVar("WINELIST_SHEET_URL".to_owned())).context(
        "no sheet source: pass --file, --url or --sheet-id, or set WINELIST_SHEET_URL \
         or WINELIST_SHEET_ID",
    )
}

/// Reads the source into a [`SheetLoad`]. Read and fetch failures come back
/// as a `FetchFailed` load, never as an error.
///
/// # Errors
///
/// Returns an error only if the HTTP client cannot be constructed.
pub(crate) async fn load(
    source: &Source,
    config: &AppConfig,
    table: &HeaderTable,
) -> anyhow::Result<SheetLoad> {
    tracing::info!(source = %source, "loading wine sheet");
    match source {
        Source::File(path) => match std::fs::read_to_string(path) {
            Ok(text) => Ok(winelist_sheets::load_wines_from_str(&text, table)),
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "failed to read wine sheet");
                Ok(SheetLoad::failed(format!(
                    "failed to read {}: {err}",
                    path.display()
                )))
            }
        },
        Source::Url(url) => {
            let client = SheetClient::new(
                config.fetch_timeout_secs,
                &config.fetch_user_agent,
                config.fetch_max_retries,
                config.fetch_retry_backoff_base_secs,
            )
            .context("failed to build sheet client")?;
            Ok(client.load_wines(url, table).await)
        }
    }
}
