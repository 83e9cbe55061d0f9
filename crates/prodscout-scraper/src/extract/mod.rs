//! Field extractors and the per-call working record they fill.
//!
//! Every extractor walks the tiers it is given in order and stops at the
//! first one that yields an acceptable value. Price is the exception inside
//! a tier: it aggregates all candidates of the tier and votes (see
//! [`price`]).

pub mod description;
pub mod image;
pub mod name;
pub mod price;

use std::collections::HashSet;

use prodscout_core::{ProductDetails, Provider};
use rust_decimal::Decimal;

use crate::document::Document;
use crate::patterns::{Field, PatternLibrary, Tier};

/// Tiers run in the integrated structured-data pass.
const STRUCTURED_PASS: [Tier; 1] = [Tier::LinkedData];
/// Tiers left for fields the structured-data pass already tried.
const FALLBACK_PASS: [Tier; 4] = [
    Tier::OpenGraph,
    Tier::Provider,
    Tier::Generic,
    Tier::Aggressive,
];

/// A value that won its field, with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionCandidate<T> {
    pub value: T,
    pub tier: Tier,
    pub rule_id: &'static str,
}

/// Write-once holder for one field of the working record.
///
/// Once filled, later (lower-priority) strategies are not even run for the
/// field, let alone allowed to overwrite it.
#[derive(Debug, Clone)]
pub struct FieldSlot<T> {
    filled: bool,
    candidate: Option<ExtractionCandidate<T>>,
}

impl<T> Default for FieldSlot<T> {
    fn default() -> Self {
        Self {
            filled: false,
            candidate: None,
        }
    }
}

impl<T> FieldSlot<T> {
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.filled
    }

    #[must_use]
    pub fn candidate(&self) -> Option<&ExtractionCandidate<T>> {
        self.candidate.as_ref()
    }

    /// Runs `extract` only if the slot is still empty, and stores its
    /// result if it produced one.
    fn fill_with(
        &mut self,
        field: Field,
        extract: impl FnOnce() -> Option<ExtractionCandidate<T>>,
    ) {
        if self.filled {
            tracing::trace!(field = field.as_str(), "field already filled; skipping");
            return;
        }
        if let Some(candidate) = extract() {
            tracing::debug!(
                field = field.as_str(),
                tier = candidate.tier.as_str(),
                rule_id = candidate.rule_id,
                "field filled"
            );
            self.candidate = Some(candidate);
            self.filled = true;
        }
    }

    fn into_value(self) -> Option<T> {
        self.candidate.map(|c| c.value)
    }
}

/// Working result for one extraction call. Never shared between calls.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    pub name: FieldSlot<String>,
    pub price: FieldSlot<Decimal>,
    pub description: FieldSlot<String>,
    pub image: FieldSlot<String>,
}

impl Draft {
    /// Applies the final defaulting policy.
    #[must_use]
    pub fn into_details(self, provider: Provider) -> ProductDetails {
        ProductDetails::new(
            provider,
            self.name.into_value(),
            self.description.into_value(),
            self.price.into_value(),
            self.image.into_value(),
        )
    }
}

/// Runs all four extractors over `doc`.
///
/// Linked data is tried for name, price, and image in one integrated first
/// pass; the per-field passes then run name, price, description, and image
/// in that order over the remaining tiers, skipping whatever is already
/// filled. Description has no structured pass and walks every tier.
#[must_use]
pub fn extract_draft(doc: &Document<'_>, provider: Provider, library: &PatternLibrary) -> Draft {
    let mut draft = Draft::default();

    draft.name.fill_with(Field::Name, || {
        name::extract(doc, provider, library, &STRUCTURED_PASS)
    });
    draft.price.fill_with(Field::Price, || {
        price::extract(doc, provider, library, &STRUCTURED_PASS)
    });
    draft.image.fill_with(Field::Image, || {
        image::extract(doc, provider, library, &STRUCTURED_PASS)
    });

    draft.name.fill_with(Field::Name, || {
        name::extract(doc, provider, library, &FALLBACK_PASS)
    });
    draft.price.fill_with(Field::Price, || {
        price::extract(doc, provider, library, &FALLBACK_PASS)
    });
    draft.description.fill_with(Field::Description, || {
        description::extract(doc, provider, library, &Tier::ALL)
    });
    draft.image.fill_with(Field::Image, || {
        image::extract(doc, provider, library, &FALLBACK_PASS)
    });

    draft
}

/// One raw captured value and the rule that captured it.
pub(crate) struct RawMatch {
    pub(crate) value: String,
    pub(crate) rule_id: &'static str,
}

/// Evaluates every rule of one tier for `field`, in priority order.
///
/// A rule that cannot be evaluated is logged and skipped; the remaining
/// rules of the tier still run. A value captured at a position an earlier
/// rule of the tier already captured is dropped, so overlapping rules never
/// count one occurrence twice.
pub(crate) fn tier_matches(
    doc: &Document<'_>,
    provider: Provider,
    library: &PatternLibrary,
    field: Field,
    tier: Tier,
) -> Vec<RawMatch> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for rule in library.tier_rules(provider, field, tier) {
        match rule.locate(doc) {
            Ok(captures) => {
                tracing::debug!(
                    field = field.as_str(),
                    tier = tier.as_str(),
                    rule_id = rule.id(),
                    matches = captures.len(),
                    "rule evaluated"
                );
                out.extend(
                    captures
                        .into_iter()
                        .filter(|capture| seen.insert(capture.position()))
                        .map(|capture| RawMatch {
                            value: capture.value,
                            rule_id: rule.id(),
                        }),
                );
            }
            Err(err) => {
                tracing::warn!(
                    field = field.as_str(),
                    tier = tier.as_str(),
                    error = %err,
                    "skipping unusable rule"
                );
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{library, RuleSpec, Scope};

    #[test]
    fn filled_slot_ignores_later_strategies() {
        let mut slot: FieldSlot<String> = FieldSlot::default();
        slot.fill_with(Field::Name, || {
            Some(ExtractionCandidate {
                value: "First Choice".to_string(),
                tier: Tier::LinkedData,
                rule_id: "first",
            })
        });
        let mut ran = false;
        slot.fill_with(Field::Name, || {
            ran = true;
            None
        });
        assert!(!ran, "extractor must not run once the slot is filled");
        assert_eq!(slot.candidate().unwrap().value, "First Choice");
    }

    #[test]
    fn empty_result_leaves_slot_open() {
        let mut slot: FieldSlot<String> = FieldSlot::default();
        slot.fill_with(Field::Name, || None);
        assert!(!slot.is_filled());
        slot.fill_with(Field::Name, || {
            Some(ExtractionCandidate {
                value: "Later".to_string(),
                tier: Tier::Aggressive,
                rule_id: "later",
            })
        });
        assert!(slot.is_filled());
    }

    #[test]
    fn linked_data_wins_over_open_graph_for_every_field() {
        let html = r#"
            <meta property="og:title" content="OG Title Here">
            <meta property="og:image" content="https://cdn.example.com/og.jpg">
            <meta property="og:description" content="OG description">
            <script type="application/ld+json">
              {"@type":"Product","name":"Linked Data Name",
               "image":"https://cdn.example.com/ld.jpg",
               "description":"LD description",
               "offers":{"price":"42.00","priceCurrency":"USD"}}
            </script>
        "#;
        let doc = Document::scan(html);
        let draft = extract_draft(&doc, Provider::Unknown, library());
        assert_eq!(draft.name.candidate().unwrap().value, "Linked Data Name");
        assert_eq!(draft.name.candidate().unwrap().tier, Tier::LinkedData);
        assert_eq!(
            draft.image.candidate().unwrap().value,
            "https://cdn.example.com/ld.jpg"
        );
        assert_eq!(
            draft.description.candidate().unwrap().value,
            "LD description"
        );
        assert_eq!(
            draft.price.candidate().unwrap().value,
            Decimal::new(4200, 2)
        );
    }

    #[test]
    fn empty_document_fills_nothing() {
        let doc = Document::scan("");
        let draft = extract_draft(&doc, Provider::Amazon, library());
        assert!(!draft.name.is_filled());
        assert!(!draft.price.is_filled());
        assert!(!draft.description.is_filled());
        assert!(!draft.image.is_filled());
    }

    #[test]
    fn into_details_applies_sentinels() {
        let details = Draft::default().into_details(Provider::Temu);
        assert_eq!(details.name(), "Product of Temu");
        assert!(!details.has_price());
        assert!(details.has_placeholder_image());
        assert_eq!(details.description(), None);
    }

    fn heading_rules(first: &'static str) -> [RuleSpec; 2] {
        let rule = |id, pattern| RuleSpec {
            id,
            field: Field::Name,
            tier: Tier::Generic,
            provider: None,
            scope: Scope::Document,
            pattern,
            group: 1,
        };
        [rule("broken", first), rule("heading", r"<h1>([^<]+)</h1>")]
    }

    #[test]
    fn unusable_rule_is_skipped_and_next_rule_still_runs() {
        let lib = PatternLibrary::from_specs(&heading_rules(r"<h1>([^<]+"));
        let doc = Document::scan("<h1>Walnut Desk Organizer</h1>");

        let found = name::extract(&doc, Provider::Unknown, &lib, &Tier::ALL).unwrap();
        assert_eq!(found.value, "Walnut Desk Organizer");
        assert_eq!(found.rule_id, "heading");

        let raw = tier_matches(&doc, Provider::Unknown, &lib, Field::Name, Tier::Generic);
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].rule_id, "heading");
    }

    #[test]
    fn overlapping_rules_count_one_occurrence_once() {
        let lib = PatternLibrary::from_specs(&heading_rules(r"<h1>(\w+)"));
        let doc = Document::scan("<h1>Walnut Desk Organizer</h1>");
        let raw = tier_matches(&doc, Provider::Unknown, &lib, Field::Name, Tier::Generic);
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].rule_id, "broken");
        assert_eq!(raw[0].value, "Walnut");
    }
}
