//! Pattern library: a declarative, provider-aware catalog of extraction rules.
//!
//! Each rule is one row of [`table::RULES`]: field, tier, optional provider,
//! scope, pattern, and capture group. The table is compiled once into a
//! process-wide [`PatternLibrary`] that is read-only and shared by every
//! extraction without locking.

mod table;

use std::sync::LazyLock;

use prodscout_core::Provider;
use regex::{Regex, RegexBuilder};

use crate::document::Document;
use crate::error::PatternError;

pub use table::RULES;

/// Product attribute a rule extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Price,
    Description,
    Image,
}

impl Field {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Price => "price",
            Field::Description => "description",
            Field::Image => "image",
        }
    }
}

/// Strategy tier, highest precision first. The derived ordering is the
/// order in which tiers are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Embedded `application/ld+json` metadata.
    LinkedData,
    /// `og:*` meta tags.
    OpenGraph,
    /// Markup tuned to one marketplace.
    Provider,
    /// Attribute names and formats shared across storefronts.
    Generic,
    /// Last-resort heuristics over the whole document.
    Aggressive,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::LinkedData,
        Tier::OpenGraph,
        Tier::Provider,
        Tier::Generic,
        Tier::Aggressive,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::LinkedData => "linked_data",
            Tier::OpenGraph => "open_graph",
            Tier::Provider => "provider",
            Tier::Generic => "generic",
            Tier::Aggressive => "aggressive",
        }
    }
}

/// What text a rule's pattern runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Each linked-data block separately, in [`Document::linked_data`] order.
    LinkedData,
    /// The whole raw markup.
    Document,
}

/// One row of the rule table.
///
/// `group` is the capture policy: the value is taken from the
/// lowest-numbered capture group at or after `group` that participated in
/// the match. This lets a pattern offer alternatives such as a
/// double-quoted and a single-quoted attribute value.
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub id: &'static str,
    pub field: Field,
    pub tier: Tier,
    pub provider: Option<Provider>,
    pub scope: Scope,
    pub pattern: &'static str,
    pub group: usize,
}

/// A rule with its compiled pattern, or the reason it could not compile.
#[derive(Debug)]
pub struct Rule {
    spec: RuleSpec,
    regex: Result<Regex, PatternError>,
}

impl Rule {
    fn compile(spec: RuleSpec) -> Self {
        let regex = RegexBuilder::new(spec.pattern)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|e| PatternError {
                rule_id: spec.id,
                reason: e.to_string(),
            })
            .and_then(|re| {
                if spec.group == 0 || spec.group >= re.captures_len() {
                    Err(PatternError {
                        rule_id: spec.id,
                        reason: format!(
                            "capture group {} out of range (pattern has {})",
                            spec.group,
                            re.captures_len() - 1
                        ),
                    })
                } else {
                    Ok(re)
                }
            });
        Self { spec, regex }
    }

    #[must_use]
    pub fn id(&self) -> &'static str {
        self.spec.id
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        self.spec.tier
    }

    #[must_use]
    pub fn spec(&self) -> &RuleSpec {
        &self.spec
    }

    /// Returns every captured value this rule finds in `doc`, in document
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when the rule's pattern is unusable.
    pub fn captures(&self, doc: &Document<'_>) -> Result<Vec<String>, PatternError> {
        Ok(self
            .locate(doc)?
            .into_iter()
            .map(|capture| capture.value)
            .collect())
    }

    /// Like [`Rule::captures`], keeping where each value was found.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when the rule's pattern is unusable.
    pub fn locate(&self, doc: &Document<'_>) -> Result<Vec<Capture>, PatternError> {
        let re = self.regex.as_ref().map_err(Clone::clone)?;
        let targets: Vec<&str> = match self.spec.scope {
            Scope::LinkedData => doc.linked_data().iter().map(String::as_str).collect(),
            Scope::Document => vec![doc.html()],
        };

        let mut found = Vec::new();
        for (target, text) in targets.into_iter().enumerate() {
            for cap in re.captures_iter(text) {
                let value = (self.spec.group..cap.len()).find_map(|i| cap.get(i));
                if let Some(m) = value {
                    found.push(Capture {
                        value: m.as_str().to_string(),
                        scope: self.spec.scope,
                        target,
                        offset: m.start(),
                    });
                }
            }
        }
        Ok(found)
    }
}

/// One captured value and where it sits: byte `offset` into the
/// `target`-th text of `scope`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub value: String,
    pub scope: Scope,
    pub target: usize,
    pub offset: usize,
}

impl Capture {
    /// Identity of the capture's position, shared by overlapping rules.
    #[must_use]
    pub fn position(&self) -> (Scope, usize, usize) {
        (self.scope, self.target, self.offset)
    }
}

/// Compiled, tier-ordered rule catalog.
#[derive(Debug)]
pub struct PatternLibrary {
    rules: Vec<Rule>,
}

impl PatternLibrary {
    /// Compiles `specs`, keeping table order within each tier.
    ///
    /// Rules whose pattern fails to compile are kept and reported each time
    /// they are evaluated, so one bad row never disables its neighbours.
    #[must_use]
    pub fn from_specs(specs: &[RuleSpec]) -> Self {
        let mut rules: Vec<Rule> = specs.iter().copied().map(Rule::compile).collect();
        rules.sort_by_key(Rule::tier);
        for rule in &rules {
            if let Err(err) = &rule.regex {
                tracing::warn!(rule_id = rule.id(), error = %err, "pattern failed to compile");
            }
        }
        Self { rules }
    }

    /// Rules for `field` applicable to `provider`, highest precision first.
    ///
    /// Provider-specific rules are only yielded for their own marketplace, so
    /// an [`Provider::Unknown`] page never sees them.
    pub fn rules(&self, provider: Provider, field: Field) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |rule| {
            rule.spec.field == field && rule.spec.provider.is_none_or(|p| p == provider)
        })
    }

    /// Like [`PatternLibrary::rules`], restricted to one tier.
    pub fn tier_rules(
        &self,
        provider: Provider,
        field: Field,
        tier: Tier,
    ) -> impl Iterator<Item = &Rule> {
        self.rules(provider, field)
            .filter(move |rule| rule.spec.tier == tier)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

static LIBRARY: LazyLock<PatternLibrary> = LazyLock::new(|| PatternLibrary::from_specs(RULES));

/// The built-in rule catalog.
#[must_use]
pub fn library() -> &'static PatternLibrary {
    &LIBRARY
}

#[cfg(test)]
#[path = "../patterns_test.rs"]
mod tests;
