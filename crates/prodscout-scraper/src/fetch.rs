//! Outbound HTML fetch.
//!
//! The extraction pipeline only depends on [`HtmlFetcher`]; [`HttpFetcher`]
//! is the production implementation over `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use prodscout_core::AppConfig;
use reqwest::{Client, Url};

use crate::error::FetchError;
use crate::rate_limit::retry_with_backoff;

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Retry-After fallback when a 429 response omits or garbles the header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;
/// Longest Retry-After waited out unless overridden; a missing header
/// (treated as 60 s) therefore gives up by default.
const DEFAULT_MAX_RETRY_AFTER_SECS: u64 = 30;

/// A fetched response body and its status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of page markup for a URL.
#[async_trait]
pub trait HtmlFetcher: Send + Sync {
    /// Fetches `url` and returns its body.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on network failure, a non-success status, or a
    /// URL that cannot be requested.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// `reqwest`-backed fetcher that presents itself as a desktop browser.
///
/// Transient errors (network failures, 429, 5xx) are retried with
/// exponential backoff up to `max_retries` additional attempts. A 429 whose
/// `Retry-After` is longer than `max_retry_after_secs` is not retried.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    backoff_base_secs: u64,
    max_retry_after_secs: u64,
}

impl HttpFetcher {
    /// Creates a fetcher with the given timeout, `User-Agent`, and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
            max_retry_after_secs: DEFAULT_MAX_RETRY_AFTER_SECS,
        })
    }

    /// Overrides the longest `Retry-After` that will be waited out.
    #[must_use]
    pub fn with_max_retry_after(mut self, secs: u64) -> Self {
        self.max_retry_after_secs = secs;
        self
    }

    /// Builds a fetcher from the `PRODSCOUT_FETCH_*` settings.
    ///
    /// # Errors
    ///
    /// See [`HttpFetcher::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        Ok(Self::new(
            config.fetch_timeout_secs,
            &config.fetch_user_agent,
            config.fetch_max_retries,
            config.fetch_retry_backoff_base_secs,
        )?
        .with_max_retry_after(config.fetch_max_retry_after_secs))
    }

    async fn fetch_once(&self, url: Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, ACCEPT_HTML)
            .header(reqwest::header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
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
            return Err(FetchError::RateLimited {
                url: url.into(),
                retry_after_secs,
            });
        }

        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.into(),
            });
        }

        let body = response.text().await?;
        Ok(FetchedPage {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl HtmlFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let parsed = Url::parse(url.trim()).map_err(|e| FetchError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl {
                url: url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }

        retry_with_backoff(
            self.max_retries,
            self.backoff_base_secs,
            self.max_retry_after_secs,
            || self.fetch_once(parsed.clone()),
        )
        .await
    }
}
