//! Provider classification from an affiliate URL.

use prodscout_core::Provider;

/// Domain fragments per marketplace, in the order they are checked.
///
/// Shein and Temu come before Amazon so that redirect or tracking URLs that
/// mention several marketplaces resolve to the more specific storefront.
const MARKETPLACE_FRAGMENTS: [(Provider, &[&str]); 3] = [
    (Provider::Shein, &["shein"]),
    (Provider::Temu, &["temu"]),
    (Provider::Amazon, &["amazon", "amzn."]),
];

/// Infers the marketplace behind `url` by case-insensitive substring match.
///
/// Never fails; unmatched input yields [`Provider::Unknown`].
#[must_use]
pub fn classify(url: &str) -> Provider {
    let lower = url.to_lowercase();
    MARKETPLACE_FRAGMENTS
        .iter()
        .find(|(_, fragments)| fragments.iter().any(|f| lower.contains(f)))
        .map_or(Provider::Unknown, |(provider, _)| *provider)
}
