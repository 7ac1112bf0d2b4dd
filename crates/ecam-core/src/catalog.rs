//! Catalog records as served by the commerce API.
//!
//! Field names follow the API's JSON (`choice_options`, `images_full_url`,
//! the misspelled `childes` on categories). Every optional or inconsistently
//! typed field is decoded leniently; see [`crate::de`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::de;

/// How a product's `discount` is applied to its price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// `discount` is a percentage of the price.
    Percent,
    /// `discount` is a flat amount subtracted from the price.
    Amount,
}

impl DiscountType {
    /// Reads the API's `discount_type` string.
    ///
    /// `"percent"` is a percentage. Any other non-empty value is a flat
    /// amount, which is how the product page has always treated it. An empty
    /// string means no discount type at all.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "" => None,
            s if s.eq_ignore_ascii_case("percent") => Some(Self::Percent),
            _ => Some(Self::Amount),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Percent => "percent",
            Self::Amount => "amount",
        }
    }
}

/// A named product attribute with its selectable values, e.g. `Color`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Key used in the selection map and the page query string, e.g. `choice_1`.
    pub name: String,
    /// Human label, e.g. `"Color"`.
    pub title: String,
    /// Values in declaration order. The first one is the default selection.
    #[serde(rename = "options", default, deserialize_with = "de::null_as_empty")]
    pub allowed_values: Vec<String>,
}

/// A gallery image tagged with the attribute values it depicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Path relative to the product image directory.
    #[serde(rename = "img")]
    pub file: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub storage: Option<String>,
}

/// Full product record from `items/details/{slug}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetail {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::decimal_or_zero")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "de::optional_text")]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "de::optional_decimal")]
    pub discount: Option<Decimal>,
    #[serde(default, deserialize_with = "de::optional_discount_type")]
    pub discount_type: Option<DiscountType>,
    /// Cover image path.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub images: Vec<ProductImage>,
    /// Absolute image URLs; only shown when nothing else is available.
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub images_full_url: Vec<String>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub choice_options: Vec<ChoiceOption>,
}

impl ProductDetail {
    /// Looks up a choice option by its `name` key.
    #[must_use]
    pub fn choice_option(&self, name: &str) -> Option<&ChoiceOption> {
        self.choice_options.iter().find(|o| o.name == name)
    }
}

/// Product card data returned by the search and recommendation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "de::decimal_or_zero")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "de::optional_decimal")]
    pub discount: Option<Decimal>,
    #[serde(default, deserialize_with = "de::optional_discount_type")]
    pub discount_type: Option<DiscountType>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub products: Vec<ProductSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendedResponse {
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub items: Vec<ProductSummary>,
}

/// A navigation category. Nesting is arbitrary but the storefront renders two levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "childes", default, deserialize_with = "de::null_as_empty")]
    pub children: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreProfile {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default, deserialize_with = "de::optional_text")]
    pub phone: Option<String>,
}
