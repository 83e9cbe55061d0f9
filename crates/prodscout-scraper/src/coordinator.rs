//! Entry point: affiliate URL in, best-effort [`ProductDetails`] out.

use prodscout_core::{AppConfig, ProductDetails, Provider};

use crate::classify::classify;
use crate::document::Document;
use crate::error::{ExtractError, FetchError};
use crate::extract::{extract_draft, Draft};
use crate::fetch::{HtmlFetcher, HttpFetcher};
use crate::patterns::library;

/// Fetches a product page and runs the extraction pipeline over it.
///
/// Holds no per-call state; one instance can serve any number of concurrent
/// calls.
#[derive(Debug, Clone)]
pub struct ProductDataFetcher<F = HttpFetcher> {
    fetcher: F,
}

impl ProductDataFetcher<HttpFetcher> {
    /// Builds a fetcher-backed pipeline from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        Ok(Self::new(HttpFetcher::from_config(config)?))
    }
}

impl<F: HtmlFetcher> ProductDataFetcher<F> {
    #[must_use]
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    #[must_use]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Classifies, fetches, and extracts the product behind `affiliate_url`.
    ///
    /// Fetch failures and unusable markup never fail the call: every field
    /// the pipeline cannot determine carries its sentinel value instead
    /// (`0` price, placeholder image, `"Product of {provider}"` name, no
    /// description).
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidArgument`] when `affiliate_url` is blank.
    /// No request is made in that case.
    pub async fn fetch_and_extract(
        &self,
        affiliate_url: &str,
    ) -> Result<ProductDetails, ExtractError> {
        let url = affiliate_url.trim();
        if url.is_empty() {
            return Err(ExtractError::InvalidArgument {
                reason: "affiliate URL must not be blank".to_owned(),
            });
        }

        let provider = classify(url);
        let draft = match self.fetch_markup(url).await {
            Some(html) => extract_draft(&Document::scan(&html), provider, library()),
            None => Draft::default(),
        };

        tracing::info!(
            url,
            provider = %provider,
            name = draft.name.is_filled(),
            price = draft.price.is_filled(),
            description = draft.description.is_filled(),
            image = draft.image.is_filled(),
            "extraction finished"
        );
        Ok(draft.into_details(provider))
    }

    /// Returns the page body, or `None` when there is nothing to extract from.
    async fn fetch_markup(&self, url: &str) -> Option<String> {
        let page = match self.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!(url, error = %err, "fetch failed; continuing without markup");
                return None;
            }
        };
        if !page.is_success() {
            tracing::warn!(url, status = page.status, "non-success status; continuing without markup");
            return None;
        }
        if page.body.trim().is_empty() {
            tracing::warn!(url, "empty response body; continuing without markup");
            return None;
        }
        Some(page.body)
    }
}

/// Runs the extraction pipeline over markup that is already in hand.
#[must_use]
pub fn extract_details(html: &str, provider: Provider) -> ProductDetails {
    extract_draft(&Document::scan(html), provider, library()).into_details(provider)
}

#[cfg(test)]
#[path = "coordinator_test.rs"]
mod tests;
