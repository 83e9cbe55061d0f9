//! `extract` command handler.

use std::fmt::Write as _;

use prodscout_core::{AppConfig, Product, ProductCategory, ProductDetails};
use prodscout_scraper::ProductDataFetcher;

const NEEDS_ENTRY: &str = "(needs manual entry)";

/// Fetches `url`, extracts its product details, and prints them.
///
/// With a `category` the details are wrapped into a [`Product`] first, the
/// record the admin flow stores.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the URL is blank, or
/// the result cannot be serialized. Fetch and markup problems are not errors;
/// they show up as fields needing manual entry.
pub(crate) async fn run_extract(
    config: &AppConfig,
    url: &str,
    json: bool,
    category: Option<ProductCategory>,
) -> anyhow::Result<()> {
    let pipeline = ProductDataFetcher::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build HTTP fetcher: {e}"))?;
    tracing::debug!(url, json, "extracting product details");
    let details = pipeline.fetch_and_extract(url).await?;

    let output = match (category, json) {
        (Some(category), true) => {
            let product = Product::from_details(details, url.trim(), Some(category));
            serde_json::to_string_pretty(&product)? + "\n"
        }
        (Some(category), false) => {
            let mut out = render_summary(&details);
            let product = Product::from_details(details, url.trim(), Some(category));
            let _ = writeln!(out, "category:    {category}");
            let _ = writeln!(out, "id:          {}", product.id);
            let _ = writeln!(
                out,
                "review:      {}",
                if product.needs_review() { "required" } else { "not needed" }
            );
            out
        }
        (None, true) => serde_json::to_string_pretty(&details)? + "\n",
        (None, false) => render_summary(&details),
    };
    print!("{output}");
    Ok(())
}

/// Human-readable summary, flagging every sentinel field.
pub(crate) fn render_summary(details: &ProductDetails) -> String {
    let flag = |sentinel: bool| if sentinel { format!(" {NEEDS_ENTRY}") } else { String::new() };

    let mut out = String::new();
    let _ = writeln!(out, "provider:    {}", details.provider());
    let _ = writeln!(
        out,
        "name:        {}{}",
        details.name(),
        flag(details.has_fallback_name())
    );
    let _ = writeln!(
        out,
        "price:       {}{}",
        details.price(),
        flag(!details.has_price())
    );
    let _ = writeln!(
        out,
        "description: {}",
        details.description().unwrap_or(NEEDS_ENTRY)
    );
    let _ = writeln!(
        out,
        "image:       {}{}",
        details.image_url(),
        flag(details.has_placeholder_image())
    );
    out
}
