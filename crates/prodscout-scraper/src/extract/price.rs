//! Price extraction with per-tier frequency voting.
//!
//! Within one tier every rule contributes all of its matches. The winner is
//! the most frequent value after rounding to cents; ties go to the value
//! seen first. A page that repeats its real price (visible text, embedded
//! JSON, meta tags) therefore outvotes a stray numeral.

use std::str::FromStr;

use prodscout_core::Provider;
use rust_decimal::Decimal;

use super::{tier_matches, ExtractionCandidate};
use crate::document::Document;
use crate::patterns::{Field, PatternLibrary, Tier};

/// Accepted band for one tier. `min_inclusive` distinguishes `(0, max]` from
/// `[min, max]`.
#[derive(Debug, Clone, Copy)]
struct PriceRange {
    min: Decimal,
    min_inclusive: bool,
    max: Decimal,
}

impl PriceRange {
    const STANDARD: PriceRange = PriceRange {
        min: Decimal::ZERO,
        min_inclusive: false,
        max: Decimal::from_parts(100_000, 0, 0, false, 0),
    };

    const AGGRESSIVE: PriceRange = PriceRange {
        min: Decimal::from_parts(50, 0, 0, false, 2),
        min_inclusive: true,
        max: Decimal::from_parts(50_000, 0, 0, false, 0),
    };

    fn for_tier(tier: Tier) -> Self {
        match tier {
            Tier::Aggressive => Self::AGGRESSIVE,
            _ => Self::STANDARD,
        }
    }

    fn contains(self, value: Decimal) -> bool {
        let above_min = if self.min_inclusive {
            value >= self.min
        } else {
            value > self.min
        };
        above_min && value <= self.max
    }
}

/// Returns the winning price of the first tier in `tiers` that yields any
/// in-range candidate.
#[must_use]
pub fn extract(
    doc: &Document<'_>,
    provider: Provider,
    library: &PatternLibrary,
    tiers: &[Tier],
) -> Option<ExtractionCandidate<Decimal>> {
    tiers.iter().find_map(|&tier| {
        let range = PriceRange::for_tier(tier);
        let candidates: Vec<(Decimal, &'static str)> =
            tier_matches(doc, provider, library, Field::Price, tier)
                .into_iter()
                .filter_map(|raw| {
                    let value = parse_price(&raw.value)?;
                    range.contains(value).then_some((value, raw.rule_id))
                })
                .collect();

        let value = most_frequent(candidates.iter().map(|(v, _)| *v))?;
        let rule_id = candidates
            .iter()
            .find(|(v, _)| *v == value)
            .map_or("", |(_, id)| *id);
        tracing::debug!(
            tier = tier.as_str(),
            candidates = candidates.len(),
            price = %value,
            "price vote settled"
        );
        Some(ExtractionCandidate {
            value,
            tier,
            rule_id,
        })
    })
}

/// Most frequent value; ties broken by first encounter.
fn most_frequent(values: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    let mut tally: Vec<(Decimal, usize)> = Vec::new();
    for value in values {
        match tally.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => tally.push((value, 1)),
        }
    }

    let mut best: Option<(Decimal, usize)> = None;
    for (value, count) in tally {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Parses a captured price numeral, tolerating currency symbols, thousands
/// separators, and both `.` and `,` decimal conventions. The result is
/// rounded to two decimal places.
///
/// - With both `.` and `,` present, the right-most one is the decimal
///   separator and may appear only once.
/// - A lone `,` followed by exactly three digits groups thousands
///   (`1,299`); followed by one or two digits it is a decimal comma (`19,99`).
/// - A single `.` is a decimal point; repeated `.` must separate groups of
///   three digits (`1.234.567`).
///
/// Returns `None` for anything that does not fit one of those shapes.
#[must_use]
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    let numeral = kept.trim_matches(|c| c == '.' || c == ',');
    if numeral.is_empty() {
        return None;
    }

    let normalized = match (numeral.rfind('.'), numeral.rfind(',')) {
        (None, None) => numeral.to_string(),
        (Some(dot), Some(comma)) => {
            let (decimal, thousands) = if dot > comma { ('.', ',') } else { (',', '.') };
            let (int_part, frac) = numeral.split_at(dot.max(comma));
            if !thousands_grouped(int_part, thousands) {
                return None;
            }
            format!("{}.{}", int_part.replace(thousands, ""), &frac[decimal.len_utf8()..])
        }
        (Some(_), None) => normalize_single_separator(numeral, '.')?,
        (None, Some(_)) => normalize_single_separator(numeral, ',')?,
    };

    Decimal::from_str(&normalized).ok().map(|d| d.round_dp(2))
}

/// Handles a numeral that uses only `sep`.
fn normalize_single_separator(numeral: &str, sep: char) -> Option<String> {
    let groups: Vec<&str> = numeral.split(sep).collect();
    match groups.as_slice() {
        [int_part, frac] if sep == ',' && frac.len() == 3 => Some(format!("{int_part}{frac}")),
        [int_part, frac] if sep == ',' && (1..=2).contains(&frac.len()) => {
            Some(format!("{int_part}.{frac}"))
        }
        [_, _] if sep == ',' => None,
        [_, _] => Some(numeral.to_string()),
        _ => thousands_grouped(numeral, sep).then(|| numeral.replace(sep, "")),
    }
}

/// `true` when `int_part` is either plain digits or digit groups split by
/// `sep` with every group after the first exactly three digits long.
fn thousands_grouped(int_part: &str, sep: char) -> bool {
    if !int_part.contains(sep) {
        return !int_part.is_empty();
    }
    let mut groups = int_part.split(sep);
    let head = groups.next().unwrap_or_default();
    (1..=3).contains(&head.len()) && groups.all(|g| g.len() == 3)
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;
