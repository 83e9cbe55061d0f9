//! Product description extraction. Structured and meta sources only.

use prodscout_core::Provider;

use super::{tier_matches, ExtractionCandidate};
use crate::document::Document;
use crate::html::clean_text;
use crate::patterns::{Field, PatternLibrary, Tier};

/// Returns the first non-empty description found in `tiers`, in order.
///
/// The aggressive tier carries no description rules, so a page without
/// structured or meta descriptions yields `None`.
#[must_use]
pub fn extract(
    doc: &Document<'_>,
    provider: Provider,
    library: &PatternLibrary,
    tiers: &[Tier],
) -> Option<ExtractionCandidate<String>> {
    tiers.iter().find_map(|&tier| {
        tier_matches(doc, provider, library, Field::Description, tier)
            .into_iter()
            .find_map(|raw| {
                let value = clean_text(&raw.value);
                (!value.is_empty()).then_some(ExtractionCandidate {
                    value,
                    tier,
                    rule_id: raw.rule_id,
                })
            })
    })
}
