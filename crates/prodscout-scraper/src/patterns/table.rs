//! The rule table. One row per pattern; order within a tier is priority.
//!
//! All patterns are compiled case-insensitive with `.` matching newlines.

use prodscout_core::Provider;

use super::{Field, RuleSpec, Scope, Tier};
use Field::{Description, Image, Name, Price};
use Scope::{Document as Doc, LinkedData as Ld};

/// A price numeral: either grouped thousands (`1,299.99`, `1.299,99`) or a
/// plain number with an optional one- or two-digit fraction (`29.99`,
/// `19,99`). Separator interpretation happens in `parse_price`.
macro_rules! num {
    () => {
        r"(\d{1,3}(?:[.,]\d{3})+(?:[.,]\d{1,2})?|\d+(?:[.,]\d{1,2})?)"
    };
}

/// Text between an opening tag and the first digit of its content, skipping
/// nested tags whole.
macro_rules! gap {
    () => {
        r"(?:[^<\d]|<[^>]*>)*?"
    };
}

/// A quoted attribute value; the value lands in whichever group matched.
macro_rules! attr_value {
    () => {
        r#"(?:"([^"]*)"|'([^']*)')"#
    };
}

/// A JSON string body (escapes allowed), without the surrounding quotes.
macro_rules! json_str {
    () => {
        r#""((?:[^"\\]|\\.)+)""#
    };
}

/// `<meta {key_attr}="{key}" … content="…">`
macro_rules! meta_fwd {
    ($key_attr:literal, $key:literal) => {
        concat!(
            r"<meta\b[^>]*?\b",
            $key_attr,
            r#"\s*=\s*["']"#,
            $key,
            r#"["'][^>]*?\bcontent\s*=\s*"#,
            attr_value!()
        )
    };
}

/// `<meta content="…" … {key_attr}="{key}">`
macro_rules! meta_rev {
    ($key_attr:literal, $key:literal) => {
        concat!(
            r"<meta\b[^>]*?\bcontent\s*=\s*",
            attr_value!(),
            r"[^>]*?\b",
            $key_attr,
            r#"\s*=\s*["']"#,
            $key,
            r#"["']"#
        )
    };
}

const fn rule(
    id: &'static str,
    field: Field,
    tier: Tier,
    scope: Scope,
    pattern: &'static str,
) -> RuleSpec {
    RuleSpec {
        id,
        field,
        tier,
        provider: None,
        scope,
        pattern,
        group: 1,
    }
}

const fn provider_rule(
    id: &'static str,
    provider: Provider,
    field: Field,
    pattern: &'static str,
) -> RuleSpec {
    RuleSpec {
        id,
        field,
        tier: Tier::Provider,
        provider: Some(provider),
        scope: Scope::Document,
        pattern,
        group: 1,
    }
}

#[rustfmt::skip]
pub static RULES: &[RuleSpec] = &[
    // ---------------------------------------------------------------------
    // Tier 1: linked data
    // ---------------------------------------------------------------------
    rule("ld.name", Name, Tier::LinkedData, Ld, concat!(r#""name"\s*:\s*"#, json_str!())),
    rule("ld.price", Price, Tier::LinkedData, Ld, concat!(r#""price"\s*:\s*"?"#, num!())),
    rule("ld.low_price", Price, Tier::LinkedData, Ld, concat!(r#""lowPrice"\s*:\s*"?"#, num!())),
    rule("ld.high_price", Price, Tier::LinkedData, Ld, concat!(r#""highPrice"\s*:\s*"?"#, num!())),
    rule("ld.description", Description, Tier::LinkedData, Ld, concat!(r#""description"\s*:\s*"#, json_str!())),
    rule("ld.image", Image, Tier::LinkedData, Ld, concat!(r#""image"\s*:\s*"#, json_str!())),
    rule("ld.image_array", Image, Tier::LinkedData, Ld, concat!(r#""image"\s*:\s*\[\s*"#, json_str!())),
    rule("ld.image_object", Image, Tier::LinkedData, Ld, concat!(r#""image"\s*:\s*\{[^}]*?"url"\s*:\s*"#, json_str!())),
    rule("ld.image_object_array", Image, Tier::LinkedData, Ld, concat!(r#""image"\s*:\s*\[[^\]]*?\{[^}]*?"url"\s*:\s*"#, json_str!())),

    // ---------------------------------------------------------------------
    // Tier 2: Open Graph (no price: og price tags are too often stale)
    // ---------------------------------------------------------------------
    rule("og.title", Name, Tier::OpenGraph, Doc, meta_fwd!("property", "og:title")),
    rule("og.title_rev", Name, Tier::OpenGraph, Doc, meta_rev!("property", "og:title")),
    rule("og.description", Description, Tier::OpenGraph, Doc, meta_fwd!("property", "og:description")),
    rule("og.description_rev", Description, Tier::OpenGraph, Doc, meta_rev!("property", "og:description")),
    rule("og.image", Image, Tier::OpenGraph, Doc, meta_fwd!("property", "og:image")),
    rule("og.image_rev", Image, Tier::OpenGraph, Doc, meta_rev!("property", "og:image")),
    rule("og.image_secure", Image, Tier::OpenGraph, Doc, meta_fwd!("property", "og:image:secure_url")),

    // ---------------------------------------------------------------------
    // Tier 3: provider-specific markup
    // ---------------------------------------------------------------------
    provider_rule("amazon.product_title", Provider::Amazon, Name,
        r#"<span\b[^>]*\bid\s*=\s*["']productTitle["'][^>]*>(.*?)</span>"#),
    provider_rule("amazon.a_offscreen", Provider::Amazon, Price,
        concat!(r#"\bclass\s*=\s*["'](?:[^"']*\s)?a-offscreen["'\s][^>]*>"#, gap!(), num!())),
    provider_rule("amazon.a_price", Provider::Amazon, Price,
        concat!(r#"\bclass\s*=\s*["'](?:[^"']*\s)?a-price["'\s][^>]*>"#, gap!(), num!())),
    provider_rule("amazon.priceblock", Provider::Amazon, Price,
        concat!(r#"\bid\s*=\s*["']priceblock[^"']*["'][^>]*>"#, gap!(), num!())),
    provider_rule("amazon.price_to_pay", Provider::Amazon, Price,
        concat!(r"priceToPay[^>]*>", gap!(), num!())),
    provider_rule("amazon.display_amount", Provider::Amazon, Price,
        concat!(r#""displayAmount"\s*:\s*"[^"\d]*"#, num!())),
    provider_rule("amazon.amount_currency", Provider::Amazon, Price,
        concat!(r#""amount"\s*:\s*"#, num!(), r#"\s*,\s*"currency""#)),
    provider_rule("amazon.landing_image", Provider::Amazon, Image,
        r#"<img\b[^>]*\bid\s*=\s*["']landingImage["'][^>]*?\b(?:data-old-hires|src)\s*=\s*["']([^"']+)["']"#),
    provider_rule("amazon.landing_image_rev", Provider::Amazon, Image,
        r#"<img\b[^>]*?\b(?:data-old-hires|src)\s*=\s*["']([^"']+)["'][^>]*\bid\s*=\s*["']landingImage["']"#),
    provider_rule("amazon.dynamic_image", Provider::Amazon, Image,
        r#"\bdata-a-dynamic-image\s*=\s*["']\{\s*(?:&quot;|")(https?://[^"&]+)"#),

    provider_rule("shein.product_name", Provider::Shein, Name,
        r#"<h1\b[^>]*\bclass\s*=\s*["'][^"']*product-intro__head-name[^"']*["'][^>]*>(.*?)</h1>"#),
    provider_rule("shein.goods_name", Provider::Shein, Name,
        concat!(r#""goods_name"\s*:\s*"#, json_str!())),
    provider_rule("shein.sale_price", Provider::Shein, Price,
        concat!(r#""salePrice"\s*:\s*(?:\{\s*"amount"\s*:\s*)?"?"#, num!())),
    provider_rule("shein.normal_price", Provider::Shein, Price,
        concat!(r#""normalPrice"\s*:\s*(?:\{\s*"amount"\s*:\s*)?"?"#, num!())),
    provider_rule("shein.price_span", Provider::Shein, Price,
        concat!(r#"<span\b[^>]*\bclass\s*=\s*["'][^"']*price[^"']*["'][^>]*>"#, gap!(), num!())),
    provider_rule("shein.data_price", Provider::Shein, Price,
        concat!(r#"\bdata-price\s*=\s*["']"#, num!())),
    provider_rule("shein.goods_img", Provider::Shein, Image,
        concat!(r#""goods_img"\s*:\s*"#, json_str!())),

    provider_rule("temu.goods_name", Provider::Temu, Name,
        concat!(r#""goodsName"\s*:\s*"#, json_str!())),
    provider_rule("temu.current_price", Provider::Temu, Price,
        concat!(r#""currentPrice"\s*:\s*"?"#, num!())),
    provider_rule("temu.price_info", Provider::Temu, Price,
        concat!(r#"priceInfo[^}]*?currentPrice["']?\s*:\s*["']?"#, num!())),
    provider_rule("temu.sale_price", Provider::Temu, Price,
        concat!(r#""salePrice"\s*:\s*"?"#, num!())),
    provider_rule("temu.original_price", Provider::Temu, Price,
        concat!(r#""originalPrice"\s*:\s*"?"#, num!())),
    provider_rule("temu.current_price_span", Provider::Temu, Price,
        concat!(r#"<span\b[^>]*\bclass\s*=\s*["'][^"']*current-price[^"']*["'][^>]*>"#, gap!(), num!())),
    provider_rule("temu.data_current_price", Provider::Temu, Price,
        concat!(r#"\bdata-current-price\s*=\s*["']"#, num!())),
    provider_rule("temu.hd_thumb", Provider::Temu, Image,
        concat!(r#""hdThumbUrl"\s*:\s*"#, json_str!())),
    provider_rule("temu.thumb", Provider::Temu, Image,
        concat!(r#""thumbUrl"\s*:\s*"#, json_str!())),

    // ---------------------------------------------------------------------
    // Tier 4: generic storefront conventions
    // ---------------------------------------------------------------------
    rule("generic.product_title_h1", Name, Tier::Generic, Doc,
        r#"<h1\b[^>]*\bclass\s*=\s*["'][^"']*product[^"']*title[^"']*["'][^>]*>(.*?)</h1>"#),
    rule("generic.twitter_title", Name, Tier::Generic, Doc, meta_fwd!("name", "twitter:title")),

    rule("generic.json_price", Price, Tier::Generic, Doc, concat!(r#""price"\s*:\s*"?\$?"#, num!())),
    rule("generic.data_price", Price, Tier::Generic, Doc,
        concat!(r#"\bdata-(?:product-|current-|sale-)?price\s*=\s*["']\$?"#, num!())),
    rule("generic.itemprop_price", Price, Tier::Generic, Doc,
        concat!(r#"\bitemprop\s*=\s*["']price["'][^>]*?\bcontent\s*=\s*["']"#, num!())),
    rule("generic.meta_price_amount", Price, Tier::Generic, Doc,
        concat!(r#"<meta\b[^>]*?\bproperty\s*=\s*["'](?:product|og):price:amount["'][^>]*?\bcontent\s*=\s*["']"#, num!())),
    rule("generic.meta_price_amount_rev", Price, Tier::Generic, Doc,
        concat!(r#"<meta\b[^>]*?\bcontent\s*=\s*["']"#, num!(), r#"["'][^>]*?\bproperty\s*=\s*["'](?:product|og):price:amount["']"#)),
    rule("generic.meta_name_price", Price, Tier::Generic, Doc,
        concat!(r#"<meta\b[^>]*?\bname\s*=\s*["']price["'][^>]*?\bcontent\s*=\s*["']"#, num!())),
    rule("generic.dollar_prefix", Price, Tier::Generic, Doc, concat!(r"(?:US\s?)?\$\s*", num!())),
    rule("generic.usd_suffix", Price, Tier::Generic, Doc, concat!(num!(), r"\s*USD\b")),

    rule("generic.meta_description", Description, Tier::Generic, Doc, meta_fwd!("name", "description")),
    rule("generic.meta_description_rev", Description, Tier::Generic, Doc, meta_rev!("name", "description")),
    rule("generic.twitter_description", Description, Tier::Generic, Doc, meta_fwd!("name", "twitter:description")),

    rule("generic.twitter_image", Image, Tier::Generic, Doc, meta_fwd!("name", "twitter:image")),
    rule("generic.image_src_link", Image, Tier::Generic, Doc,
        r#"<link\b[^>]*\brel\s*=\s*["']image_src["'][^>]*\bhref\s*=\s*["']([^"']+)["']"#),
    rule("generic.product_img", Image, Tier::Generic, Doc,
        r#"<img\b[^>]*\bclass\s*=\s*["'][^"']*(?:product-image|main-image)[^"']*["'][^>]*?\b(?:data-src|src)\s*=\s*["']([^"']+)["']"#),
    rule("generic.lazy_img", Image, Tier::Generic, Doc,
        r#"\b(?:data-src|data-lazy-src|data-original)\s*=\s*["']([^"']+\.(?:jpe?g|png|webp|gif)(?:\?[^"']*)?)["']"#),

    // ---------------------------------------------------------------------
    // Tier 5: aggressive last resort
    // ---------------------------------------------------------------------
    rule("aggressive.title_tag", Name, Tier::Aggressive, Doc, r"<title\b[^>]*>(.*?)</title>"),
    rule("aggressive.first_h1", Name, Tier::Aggressive, Doc, r"<h1\b[^>]*>(.*?)</h1>"),

    rule("aggressive.currency_prefix", Price, Tier::Aggressive, Doc, concat!(r"(?:\$|€|£|&euro;|&pound;)\s*", num!())),
    rule("aggressive.currency_suffix", Price, Tier::Aggressive, Doc, concat!(num!(), r"\s*(?:\$|€|£|USD\b|EUR\b|GBP\b)")),
    rule("aggressive.price_context", Price, Tier::Aggressive, Doc, concat!(r"price[^<>]*>", gap!(), num!())),
    rule("aggressive.cost_context", Price, Tier::Aggressive, Doc, concat!(r"cost[^<>]*>", gap!(), num!())),
    rule("aggressive.bare_element", Price, Tier::Aggressive, Doc, concat!(r"<[a-z][a-z0-9]*\b[^>]*>\s*\$?\s*", num!(), r"\s*</[a-z][a-z0-9]*\s*>")),

    rule("aggressive.img_src", Image, Tier::Aggressive, Doc,
        r#"<img\b[^>]*?\bsrc\s*=\s*["']([^"']+\.(?:jpe?g|png|webp|gif)(?:\?[^"']*)?)["']"#),
    rule("aggressive.any_image_url", Image, Tier::Aggressive, Doc,
        r#"((?:https?:)?//[^\s"'<>()]+?\.(?:jpe?g|png|webp|gif))\b"#),
];
