use thiserror::Error;

/// The only failure `fetch_and_extract` surfaces to callers: misuse of the
/// entry point. Everything that goes wrong with third-party markup is
/// absorbed into sentinel field values instead.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

/// Failure of the outbound HTML fetch. The coordinator logs these and
/// continues as if no markup were available.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// A rule in the pattern library could not be evaluated. The rule is
/// skipped and extraction moves on to the next one.
#[derive(Debug, Clone, Error)]
#[error("pattern {rule_id} unusable: {reason}")]
pub struct PatternError {
    pub rule_id: &'static str,
    pub reason: String,
}
