use std::str::FromStr;

use rust_decimal::Decimal;

use super::*;

fn price(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// -----------------------------------------------------------------------
// ProductDetails defaulting
// -----------------------------------------------------------------------

#[test]
fn details_keep_extracted_values() {
    let details = ProductDetails::new(
        Provider::Amazon,
        Some("Wireless Earbuds".to_string()),
        Some("Noise cancelling".to_string()),
        Some(price("29.99")),
        Some("https://cdn.example.com/a.jpg".to_string()),
    );
    assert_eq!(details.name(), "Wireless Earbuds");
    assert_eq!(details.description(), Some("Noise cancelling"));
    assert_eq!(details.price(), price("29.99"));
    assert_eq!(details.provider(), Provider::Amazon);
    assert_eq!(details.image_url(), "https://cdn.example.com/a.jpg");
    assert!(details.has_price());
    assert!(!details.has_placeholder_image());
    assert!(!details.has_fallback_name());
}

#[test]
fn details_default_every_missing_field() {
    let details = ProductDetails::new(Provider::Shein, None, None, None, None);
    assert_eq!(details.name(), "Product of Shein");
    assert!(details.has_fallback_name());
    assert_eq!(details.description(), None);
    assert_eq!(details.price(), PRICE_UNSET);
    assert!(!details.has_price());
    assert_eq!(details.image_url(), PLACEHOLDER_IMAGE_URL);
    assert!(details.has_placeholder_image());
}

#[test]
fn details_treat_blank_strings_as_missing() {
    let details = ProductDetails::new(
        Provider::Unknown,
        Some("   ".to_string()),
        Some("\n".to_string()),
        None,
        Some(String::new()),
    );
    assert_eq!(details.name(), "Product of Unknown");
    assert_eq!(details.description(), None);
    assert_eq!(details.image_url(), PLACEHOLDER_IMAGE_URL);
}

#[test]
fn details_reject_non_positive_price() {
    let negative = ProductDetails::new(Provider::Temu, None, None, Some(price("-4.50")), None);
    assert_eq!(negative.price(), PRICE_UNSET);

    let zero = ProductDetails::new(Provider::Temu, None, None, Some(Decimal::ZERO), None);
    assert!(!zero.has_price());
}

#[test]
fn details_serialize_price_as_string() {
    let details = ProductDetails::new(Provider::Temu, None, None, Some(price("12.50")), None);
    let json = serde_json::to_value(&details).unwrap();
    assert_eq!(json["price"], "12.50");
    assert_eq!(json["provider"], "Temu");
    assert!(json["description"].is_null());
}

// -----------------------------------------------------------------------
// ProductCategory
// -----------------------------------------------------------------------

#[test]
fn category_parses_label_case_insensitively() {
    assert_eq!(
        ProductCategory::from_str("home & decor").unwrap(),
        ProductCategory::HomeDecor
    );
}

#[test]
fn category_parses_snake_case_identifier() {
    assert_eq!(
        ProductCategory::from_str("beauty_personal_care").unwrap(),
        ProductCategory::BeautyPersonalCare
    );
}

#[test]
fn category_rejects_unknown_value() {
    let err = ProductCategory::from_str("groceries").unwrap_err();
    assert!(matches!(err, CoreError::UnknownCategory(ref v) if v == "groceries"));
}

#[test]
fn category_display_uses_label() {
    assert_eq!(ProductCategory::Clothing.to_string(), "Clothing & Fashion");
}

// -----------------------------------------------------------------------
// Product
// -----------------------------------------------------------------------

#[test]
fn product_from_details_carries_link_and_category() {
    let details = ProductDetails::new(
        Provider::Amazon,
        Some("Desk Lamp".to_string()),
        None,
        Some(price("18.00")),
        Some("https://cdn.example.com/lamp.png".to_string()),
    );
    let product = Product::from_details(
        details,
        "https://amzn.to/abc123",
        Some(ProductCategory::HomeDecor),
    );
    assert_eq!(product.name, "Desk Lamp");
    assert_eq!(product.affiliate_link, "https://amzn.to/abc123");
    assert_eq!(product.category, Some(ProductCategory::HomeDecor));
    assert!(!product.needs_review());
}

#[test]
fn product_with_sentinels_needs_review() {
    let details = ProductDetails::new(Provider::Temu, None, None, None, None);
    let product = Product::from_details(details, "https://temu.com/x", None);
    assert!(product.needs_review());
}

#[test]
fn products_get_distinct_ids() {
    let a = Product::from_details(
        ProductDetails::new(Provider::Temu, None, None, None, None),
        "https://temu.com/a",
        None,
    );
    let b = Product::from_details(
        ProductDetails::new(Provider::Temu, None, None, None, None),
        "https://temu.com/b",
        None,
    );
    assert_ne!(a.id, b.id);
}
