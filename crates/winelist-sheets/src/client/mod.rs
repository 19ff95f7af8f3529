//! HTTP client for published spreadsheet CSV exports.

mod url;

use std::time::Duration;

use reqwest::Client;

use crate::error::SheetError;
use crate::headers::HeaderTable;
use crate::load::SheetLoad;
use crate::retry::retry_with_backoff;

use url::extract_host;
pub use url::{parse_sheet_url, published_csv_url};

/// Fallback when a 429 carries no usable `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// HTTP client for a published sheet's CSV export.
///
/// Maps 429, 404 and other non-2xx responses to typed errors, and rejects HTML
/// bodies (Google serves a sign-in page with status 200 for sheets that are
/// not published). Transient errors are retried with exponential backoff up
/// to `max_retries` additional attempts.
pub struct SheetClient {
    client: Client,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

impl SheetClient {
    /// Creates a `SheetClient` with configured timeout, `User-Agent`, and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, SheetError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches the CSV text behind `url`, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - [`SheetError::InvalidSheetUrl`] if `url` is not an `http(s)` URL.
    /// - [`SheetError::RateLimited`] on HTTP 429 after all retries.
    /// - [`SheetError::NotFound`] on HTTP 404 (not retried).
    /// - [`SheetError::UnexpectedStatus`] on any other non-2xx (5xx retried).
    /// - [`SheetError::NotCsv`] if the body is HTML (not retried).
    /// - [`SheetError::Http`] on network or TLS failure after all retries.
    pub async fn fetch_csv(&self, url: &str) -> Result<String, SheetError> {
        let url = parse_sheet_url(url)?.to_string();

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(reqwest::header::ACCEPT, "text/csv,text/plain;q=0.9,*/*;q=0.5")
                    .header(reqwest::header::CACHE_CONTROL, "no-cache")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.trim().parse::<u64>().ok())
                        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                    return Err(SheetError::RateLimited {
                        host: extract_host(&url),
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(SheetError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(SheetError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                let content_type = response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_ascii_lowercase();
                if content_type.starts_with("text/html") {
                    return Err(SheetError::NotCsv { url, content_type });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }

    /// Fetches and normalizes a sheet. Never fails: transport errors come
    /// back as [`winelist_core::LoadStatus::FetchFailed`] with no records.
    pub async fn load_wines(&self, url: &str, table: &HeaderTable) -> SheetLoad {
        match self.fetch_csv(url).await {
            Ok(text) => SheetLoad::from_csv(&text, table),
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch wine sheet");
                SheetLoad::failed(err.to_string())
            }
        }
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
