//! Retry with exponential backoff for sheet fetches.
//!
//! Published sheets sit behind Google's CDN, which occasionally answers with
//! 429 or a 5xx. Those, plus network failures, are retried; everything else is
//! returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::SheetError;

/// Returns `true` if `err` is transient and worth another attempt.
///
/// Retriable: [`SheetError::RateLimited`], [`SheetError::Http`], and
/// [`SheetError::UnexpectedStatus`] with a 5xx status. A 404, a non-CSV body
/// or a bad URL will not change on retry.
fn is_retriable(err: &SheetError) -> bool {
    match err {
        SheetError::RateLimited { .. } | SheetError::Http(_) => true,
        SheetError::UnexpectedStatus { status, .. } => *status >= 500,
        SheetError::NotFound { .. }
        | SheetError::NotCsv { .. }
        | SheetError::InvalidSheetUrl { .. } => false,
    }
}

/// Executes `operation`, retrying transient errors up to `max_retries` extra
/// times.
///
/// Sleeps `backoff_base_secs * 2^attempt` seconds before each retry, so with
/// a base of 1 the waits are 1 s, 2 s, 4 s. With `max_retries = 0` the
/// operation runs exactly once.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, SheetError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SheetError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !is_retriable(&err) || attempt >= max_retries => return Err(err),
            Err(err) => err,
        };

        // Cap the shift so extreme configs saturate instead of overflowing.
        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient sheet fetch error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
