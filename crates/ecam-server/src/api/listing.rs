//! Search results and recommended products.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use ecam_core::{AssetUrls, ProductSummary};
use ecam_variant::compute_display_price;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::products::PriceView;
use super::{map_catalog_error, ApiError, ApiResponse, AppState};

const NO_RESULTS_HINT: &str = "We couldn't find any products matching your search term. \
     Try different keywords or browse our categories.";

#[derive(Debug, Serialize)]
pub(super) struct ProductCard {
    id: i64,
    name: String,
    href: String,
    image_url: String,
    price: PriceView,
}

impl ProductCard {
    fn from_summary(summary: &ProductSummary, assets: &AssetUrls) -> Self {
        let price = compute_display_price(summary.price, summary.discount, summary.discount_type);
        Self {
            id: summary.id,
            name: summary.name.clone(),
            href: format!("/products/{}", summary.id),
            image_url: assets.product_image(summary.image.as_deref()),
            price: PriceView::card(&price),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct SearchView {
    term: String,
    headline: String,
    summary: String,
    products: Vec<ProductCard>,
}

impl SearchView {
    fn new(term: &str, products: Vec<ProductCard>) -> Self {
        let (headline, summary) = if products.is_empty() {
            (format!("No Results for \"{term}\""), NO_RESULTS_HINT.to_owned())
        } else {
            let plural = if products.len() == 1 { "" } else { "s" };
            (
                format!("Search Results for \"{term}\""),
                format!(
                    "Found {} product{plural} matching your search",
                    products.len()
                ),
            )
        };

        Self {
            term: term.to_owned(),
            headline,
            summary,
            products,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    #[serde(default)]
    pub name: String,
}

pub(super) async fn search_page(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<SearchView>>, ApiError> {
    let results = state
        .catalog
        .search_products(&query.name)
        .await
        .map_err(|e| map_catalog_error(req_id.0.clone(), "Search", &e))?;

    let cards = results
        .iter()
        .map(|summary| ProductCard::from_summary(summary, &state.assets))
        .collect();

    Ok(ApiResponse::new(SearchView::new(&query.name, cards), req_id.0))
}

pub(super) async fn recommended(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<ProductCard>>>, ApiError> {
    let items = state
        .catalog
        .recommended_products()
        .await
        .map_err(|e| map_catalog_error(req_id.0.clone(), "Recommended products", &e))?;

    let cards = items
        .iter()
        .map(|summary| ProductCard::from_summary(summary, &state.assets))
        .collect();

    Ok(ApiResponse::new(cards, req_id.0))
}
