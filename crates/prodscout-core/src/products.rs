use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CoreError, Provider};

/// Price value meaning "not determined, needs manual entry".
pub const PRICE_UNSET: Decimal = Decimal::ZERO;

/// Image URL used when no product image could be extracted.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://via.placeholder.com/400x400?text=Image+Not+Available";

/// Best-effort product data extracted from a marketplace page.
///
/// Built once per extraction through [`ProductDetails::new`], which applies
/// the defaulting policy so that every instance carries a non-empty name and
/// image URL. Fields the pipeline could not determine hold sentinel values:
/// [`PRICE_UNSET`], [`PLACEHOLDER_IMAGE_URL`], a synthesized name, and a
/// `None` description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDetails {
    name: String,
    description: Option<String>,
    price: Decimal,
    provider: Provider,
    image_url: String,
}

impl ProductDetails {
    /// Assembles the final record, substituting sentinels for anything
    /// missing, blank, or (for price) non-positive.
    #[must_use]
    pub fn new(
        provider: Provider,
        name: Option<String>,
        description: Option<String>,
        price: Option<Decimal>,
        image_url: Option<String>,
    ) -> Self {
        let name = non_blank(name).unwrap_or_else(|| fallback_name(provider));
        let description = non_blank(description);
        let price = price
            .filter(|p| p.is_sign_positive() && !p.is_zero())
            .unwrap_or(PRICE_UNSET);
        let image_url =
            non_blank(image_url).unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string());

        Self {
            name,
            description,
            price,
            provider,
            image_url,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Extracted price, or [`PRICE_UNSET`] when none was found.
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }

    #[must_use]
    pub fn provider(&self) -> Provider {
        self.provider
    }

    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Returns `false` when the price is the unset sentinel.
    #[must_use]
    pub fn has_price(&self) -> bool {
        self.price != PRICE_UNSET
    }

    #[must_use]
    pub fn has_placeholder_image(&self) -> bool {
        self.image_url == PLACEHOLDER_IMAGE_URL
    }

    /// Returns `true` when the name was synthesized rather than extracted.
    #[must_use]
    pub fn has_fallback_name(&self) -> bool {
        self.name == fallback_name(self.provider)
    }
}

/// Name used when a page yields no usable title.
#[must_use]
pub fn fallback_name(provider: Provider) -> String {
    format!("Product of {provider}")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Storefront category an admin assigns when saving a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Clothing,
    Electronics,
    HomeDecor,
    BeautyPersonalCare,
    Accessories,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 5] = [
        ProductCategory::Clothing,
        ProductCategory::Electronics,
        ProductCategory::HomeDecor,
        ProductCategory::BeautyPersonalCare,
        ProductCategory::Accessories,
    ];

    /// Human-facing label shown in listings.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ProductCategory::Clothing => "Clothing & Fashion",
            ProductCategory::Electronics => "Electronics",
            ProductCategory::HomeDecor => "Home & Decor",
            ProductCategory::BeautyPersonalCare => "Beauty & Personal Care",
            ProductCategory::Accessories => "Accessories",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            ProductCategory::Clothing => "clothing",
            ProductCategory::Electronics => "electronics",
            ProductCategory::HomeDecor => "home_decor",
            ProductCategory::BeautyPersonalCare => "beauty_personal_care",
            ProductCategory::Accessories => "accessories",
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ProductCategory {
    type Err = CoreError;

    /// Accepts either the display label or the snake-case identifier,
    /// ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| {
                c.label().eq_ignore_ascii_case(needle) || c.slug().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

/// A product ready to hand to the persistence layer: the extracted details
/// plus the affiliate link it came from and a storage identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub provider: Provider,
    pub affiliate_link: String,
    pub image_url: String,
    pub category: Option<ProductCategory>,
}

impl Product {
    /// Builds a new record with a fresh identity from extracted details.
    #[must_use]
    pub fn from_details(
        details: ProductDetails,
        affiliate_link: impl Into<String>,
        category: Option<ProductCategory>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: details.name,
            description: details.description,
            price: details.price,
            provider: details.provider,
            affiliate_link: affiliate_link.into(),
            image_url: details.image_url,
            category,
        }
    }

    /// Returns `true` while a sentinel price or placeholder image remains,
    /// i.e. an admin still has to fill something in by hand.
    #[must_use]
    pub fn needs_review(&self) -> bool {
        self.price == PRICE_UNSET || self.image_url == PLACEHOLDER_IMAGE_URL
    }
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
