use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {host} (retry after {retry_after_secs}s)")]
    RateLimited { host: String, retry_after_secs: u64 },

    #[error("sheet not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("response from {url} is not CSV (content-type \"{content_type}\"); is the sheet published?")]
    NotCsv { url: String, content_type: String },

    #[error("invalid sheet URL \"{url}\": {reason}")]
    InvalidSheetUrl { url: String, reason: String },
}
