//! Text cleanup and URL helpers for raw markup captures.
//!
//! Everything here works on plain strings; entity decoding alone goes
//! through an HTML parser.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use scraper::Html;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Image file extensions recognized in candidate URLs.
pub(crate) const IMAGE_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".webp", ".gif"];

/// Turns a raw capture into display text: undoes JSON string escapes, drops
/// inline tags, decodes HTML entities, and collapses whitespace.
pub(crate) fn clean_text(raw: &str) -> String {
    let unescaped = unescape_json(raw);
    let stripped = TAG_RE.replace_all(&unescaped, " ");
    let decoded = decode_entities(&stripped);
    WHITESPACE_RE.replace_all(decoded.trim(), " ").into_owned()
}

/// Decodes `raw` as the body of a JSON string literal (`\uXXXX`, `\/`,
/// `\"`, ...). Text that is not a valid JSON string body, such as a plain
/// HTML attribute containing a bare quote, only has the common escapes
/// undone.
pub(crate) fn unescape_json(raw: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{raw}\"")).unwrap_or_else(|_| {
        raw.replace("\\/", "/")
            .replace("\\\"", "\"")
            .replace("\\u0026", "&")
            .replace("\\u003c", "<")
            .replace("\\u003e", ">")
    })
}

/// Decodes named (full HTML5 table) and numeric character references the way
/// a browser does. Unrecognized references are left untouched.
pub(crate) fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_owned();
    }
    // Escape '<' so the fragment parses as a single text run.
    let fragment = Html::parse_fragment(&input.replace('<', "&lt;"));
    fragment.root_element().text().collect()
}

/// Resolves an image reference found in markup to an absolute URL.
///
/// - `http(s)://…` is kept as-is.
/// - `//host/…` becomes `https://host/…`.
/// - `/path` is joined onto `base` when the document declared one and is
///   discarded otherwise.
/// - Any other relative form is discarded.
pub(crate) fn resolve_image_url(raw: &str, base: Option<&Url>) -> Option<String> {
    let candidate = unescape_json(raw.trim()).replace("&amp;", "&");
    if candidate.is_empty() {
        return None;
    }

    let lower = candidate.to_ascii_lowercase();
    let absolute = if lower.starts_with("http://") || lower.starts_with("https://") {
        candidate
    } else if candidate.starts_with("//") {
        format!("https:{candidate}")
    } else if candidate.starts_with('/') {
        base?.join(&candidate).ok()?.to_string()
    } else {
        return None;
    };

    let parsed = Url::parse(&absolute).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return None;
    }
    Some(absolute)
}

/// Returns `true` when `url` carries an image extension marker or the literal
/// substring `image`, compared case-insensitively.
pub(crate) fn looks_like_image(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.contains("image") || IMAGE_EXTENSIONS.iter().any(|ext| lower.contains(ext))
}
