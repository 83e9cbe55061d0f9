//! Product title extraction.

use prodscout_core::Provider;

use super::{tier_matches, ExtractionCandidate};
use crate::document::Document;
use crate::html::clean_text;
use crate::patterns::{Field, PatternLibrary, Tier};

/// Titles this short are navigation crumbs or placeholder text, not names.
const MIN_NAME_CHARS: usize = 4;

/// Returns the first acceptable title found in `tiers`, in order.
#[must_use]
pub fn extract(
    doc: &Document<'_>,
    provider: Provider,
    library: &PatternLibrary,
    tiers: &[Tier],
) -> Option<ExtractionCandidate<String>> {
    tiers.iter().find_map(|&tier| {
        tier_matches(doc, provider, library, Field::Name, tier)
            .into_iter()
            .find_map(|raw| {
                let value = normalize_name(&raw.value)?;
                Some(ExtractionCandidate {
                    value,
                    tier,
                    rule_id: raw.rule_id,
                })
            })
    })
}

/// Cleans a raw capture, rejecting anything too short to be a title.
pub(crate) fn normalize_name(raw: &str) -> Option<String> {
    let cleaned = clean_text(raw);
    (cleaned.chars().count() >= MIN_NAME_CHARS).then_some(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::library;

    fn name_of(html: &str, provider: Provider) -> Option<ExtractionCandidate<String>> {
        extract(&Document::scan(html), provider, library(), &Tier::ALL)
    }

    #[test]
    fn rejects_names_of_three_chars_or_fewer() {
        assert_eq!(normalize_name("Hi"), None);
        assert_eq!(normalize_name(" Mug "), None);
        assert_eq!(normalize_name("Lamp").as_deref(), Some("Lamp"));
    }

    #[test]
    fn length_is_counted_after_entity_decoding() {
        // "&amp;" is five bytes but one character.
        assert_eq!(normalize_name("A&amp;B"), None);
    }

    #[test]
    fn short_title_falls_through_to_next_strategy() {
        let html = r#"
            <meta property="og:title" content="Hi">
            <title>Ceramic Pour-Over Coffee Set</title>
        "#;
        let found = name_of(html, Provider::Unknown).unwrap();
        assert_eq!(found.value, "Ceramic Pour-Over Coffee Set");
        assert_eq!(found.rule_id, "aggressive.title_tag");
    }

    #[test]
    fn short_title_alone_yields_nothing() {
        assert!(name_of("<title>Hi</title>", Provider::Unknown).is_none());
    }

    #[test]
    fn decodes_entities_in_linked_data_name() {
        let html = r#"<script type="application/ld+json">
            {"@type":"Product","name":"Salt &amp; Pepper Grinder Set"}
        </script>"#;
        let found = name_of(html, Provider::Unknown).unwrap();
        assert_eq!(found.value, "Salt & Pepper Grinder Set");
        assert_eq!(found.tier, Tier::LinkedData);
    }

    #[test]
    fn amazon_product_title_span_is_cleaned() {
        let html = r#"<span id="productTitle" class="a-size-large">
                Stainless Steel   Water Bottle, 32 oz
            </span>"#;
        let found = name_of(html, Provider::Amazon).unwrap();
        assert_eq!(found.value, "Stainless Steel Water Bottle, 32 oz");
        assert_eq!(found.tier, Tier::Provider);
    }

    #[test]
    fn amazon_title_span_ignored_for_other_providers() {
        let html = r#"<span id="productTitle">Stainless Steel Water Bottle</span>"#;
        assert!(name_of(html, Provider::Temu).is_none());
    }

    #[test]
    fn product_inside_graph_beats_website_name() {
        let html = r#"<script type="application/ld+json">
            {"@context":"https://schema.org","@graph":[
              {"@type":"WebSite","name":"Acme Store"},
              {"@type":"Product","name":"Walnut Desk Organizer","offers":{"price":"34.00"}}
            ]}
        </script>"#;
        let found = name_of(html, Provider::Unknown).unwrap();
        assert_eq!(found.value, "Walnut Desk Organizer");
        assert_eq!(found.tier, Tier::LinkedData);
    }

    #[test]
    fn brand_name_listed_first_is_not_the_product_name() {
        let html = r#"<script type="application/ld+json">
            {"@type":"Product","brand":{"@type":"Brand","name":"Acme"},
             "name":"Walnut Desk Organizer"}
        </script>"#;
        let found = name_of(html, Provider::Unknown).unwrap();
        assert_eq!(found.value, "Walnut Desk Organizer");
    }

    #[test]
    fn json_unicode_escapes_in_embedded_state_are_decoded() {
        let html = r#"<script>window.gbRawData = {"goods_name":"Women\u0027s Floral Caf\u00e9 Dress"};</script>"#;
        let found = name_of(html, Provider::Shein).unwrap();
        assert_eq!(found.value, "Women's Floral Caf\u{e9} Dress");
    }

    #[test]
    fn typographic_entities_in_title_are_decoded() {
        let html = "<title>Women&rsquo;s Rain Jacket</title>";
        let found = name_of(html, Provider::Unknown).unwrap();
        assert_eq!(found.value, "Women\u{2019}s Rain Jacket");
    }
}
