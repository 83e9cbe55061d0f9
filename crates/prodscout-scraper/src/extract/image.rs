//! Primary product image extraction.

use prodscout_core::Provider;

use super::{tier_matches, ExtractionCandidate};
use crate::document::Document;
use crate::html::{looks_like_image, resolve_image_url};
use crate::patterns::{Field, PatternLibrary, Tier};

/// Returns the first candidate in `tiers` that resolves to an absolute URL
/// and looks like an image. No frequency voting.
#[must_use]
pub fn extract(
    doc: &Document<'_>,
    provider: Provider,
    library: &PatternLibrary,
    tiers: &[Tier],
) -> Option<ExtractionCandidate<String>> {
    tiers.iter().find_map(|&tier| {
        tier_matches(doc, provider, library, Field::Image, tier)
            .into_iter()
            .find_map(|raw| {
                let url = resolve_image_url(&raw.value, doc.base_url())?;
                if !looks_like_image(&url) {
                    tracing::debug!(rule_id = raw.rule_id, url = %url, "rejected non-image url");
                    return None;
                }
                Some(ExtractionCandidate {
                    value: url,
                    tier,
                    rule_id: raw.rule_id,
                })
            })
    })
}
