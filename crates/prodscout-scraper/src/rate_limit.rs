//! Retry with exponential backoff for page fetches.
//!
//! Transient failures (network errors, 429, 5xx) are retried; everything
//! else is returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

/// Returns `true` if `err` is worth another attempt after a delay.
///
/// - [`FetchError::Http`]: connection reset, timeout, DNS hiccup.
/// - [`FetchError::RateLimited`]: HTTP 429.
/// - [`FetchError::UnexpectedStatus`] with a 5xx status.
///
/// A 4xx other than 429 or an unparseable URL will fail the same way again.
fn is_retriable(err: &FetchError) -> bool {
    match err {
        FetchError::Http(_) | FetchError::RateLimited { .. } => true,
        FetchError::UnexpectedStatus { status, .. } => *status >= 500,
        FetchError::InvalidUrl { .. } => false,
    }
}

/// Executes `operation`, retrying transient errors up to `max_retries`
/// additional times.
///
/// Sleeps `backoff_base_secs * 2^attempt` seconds between attempts. A
/// `RateLimited` error sleeps for the larger of that and its `Retry-After`
/// hint, unless the hint exceeds `max_retry_after_secs`: then the error is
/// returned at once rather than waited out. When retries run out the last
/// error is returned.
///
/// | Attempt | Sleep before next attempt (base = 1) |
/// |---------|--------------------------------------|
/// | 0 (initial) | none |
/// | 1 | 1 s |
/// | 2 | 2 s |
/// | 3 | 4 s |
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    max_retry_after_secs: u64,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        // Cap the shift so extreme configs saturate instead of overflowing.
        let mut delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        if let FetchError::RateLimited {
            retry_after_secs, ..
        } = &err
        {
            if *retry_after_secs > max_retry_after_secs {
                tracing::warn!(
                    retry_after_secs,
                    max_retry_after_secs,
                    error = %err,
                    "Retry-After exceeds limit, giving up"
                );
                return Err(err);
            }
            delay_secs = delay_secs.max(*retry_after_secs);
        }
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient fetch error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
