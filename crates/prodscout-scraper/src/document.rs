//! One fetched page, pre-scanned for the pieces every extractor needs.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use serde_json::Value;

static LD_JSON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script\b[^>]*\btype\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .expect("valid json-ld script regex")
});
static BASE_HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<base\b[^>]*\bhref\s*=\s*["']([^"']+)["']"#).expect("valid base regex")
});

/// Keys whose objects describe some other entity with its own `name`.
const NESTED_ENTITY_KEYS: [&str; 8] = [
    "brand",
    "seller",
    "manufacturer",
    "author",
    "publisher",
    "review",
    "isRelatedTo",
    "isSimilarTo",
];

/// Raw markup plus the linked-data targets and declared base URL found in it.
#[derive(Debug)]
pub struct Document<'a> {
    html: &'a str,
    linked_data: Vec<String>,
    base_url: Option<Url>,
}

impl<'a> Document<'a> {
    /// Scans `html` once for `<script type="application/ld+json">` payloads
    /// and a `<base href>`.
    ///
    /// Each payload is split into its items (top-level arrays and `@graph`
    /// containers). When any item is a `Product`, only Product items are
    /// kept, so site or breadcrumb metadata cannot win the `name` lookup.
    /// Nested brand, seller, and similar objects are pruned from every item.
    /// Payloads that are not valid JSON are kept verbatim after the rest.
    #[must_use]
    pub fn scan(html: &'a str) -> Self {
        let mut items = Vec::new();
        let mut unparsed = Vec::new();
        for block in LD_JSON_RE
            .captures_iter(html)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().trim())
            .filter(|block| !block.is_empty())
        {
            match serde_json::from_str::<Value>(block) {
                Ok(value) => split_items(value, &mut items),
                Err(err) => {
                    tracing::debug!(error = %err, "linked-data block is not valid JSON");
                    unparsed.push(block.to_owned());
                }
            }
        }

        if items.iter().any(is_product) {
            items.retain(is_product);
        }
        let mut linked_data: Vec<String> = items
            .into_iter()
            .filter_map(|mut item| {
                prune_nested_entities(&mut item);
                serde_json::to_string(&item).ok()
            })
            .collect();
        linked_data.extend(unparsed);

        let base_url = BASE_HREF_RE
            .captures(html)
            .and_then(|cap| cap.get(1))
            .and_then(|m| Url::parse(m.as_str().trim()).ok());

        Self {
            html,
            linked_data,
            base_url,
        }
    }

    #[must_use]
    pub fn html(&self) -> &'a str {
        self.html
    }

    /// Linked-data targets, one JSON object (or raw payload) each.
    #[must_use]
    pub fn linked_data(&self) -> &[String] {
        &self.linked_data
    }

    /// The `<base href>` value, when present and absolute.
    #[must_use]
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }
}

/// Flattens arrays and `@graph` containers into individual objects.
fn split_items(value: Value, out: &mut Vec<Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                split_items(item, out);
            }
        }
        Value::Object(mut map) => match map.remove("@graph") {
            Some(graph) => {
                split_items(graph, out);
                if map.contains_key("@type") {
                    out.push(Value::Object(map));
                }
            }
            None => out.push(Value::Object(map)),
        },
        _ => {}
    }
}

/// `@type` is `"Product"` or an array containing it.
fn is_product(item: &Value) -> bool {
    match item.get("@type") {
        Some(Value::String(t)) => t.eq_ignore_ascii_case("Product"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case("Product")),
        _ => false,
    }
}

fn prune_nested_entities(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in NESTED_ENTITY_KEYS {
                map.remove(key);
            }
            map.values_mut().for_each(prune_nested_entities);
        }
        Value::Array(items) => items.iter_mut().for_each(prune_nested_entities),
        _ => {}
    }
}
