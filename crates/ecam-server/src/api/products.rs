use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    Extension, Json,
};
use ecam_variant::{
    format_usd, parse_query, product_page_path, DisplayPrice, Gallery, GalleryItem,
    SelectedOptions, VariantSession,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_catalog_error, ApiError, ApiResponse, AppState};

/// Price block shared by the detail page and listing cards.
#[derive(Debug, Serialize)]
pub(super) struct PriceView {
    final_price: Decimal,
    /// Two-decimal text, e.g. `80.00`.
    final_text: String,
    formatted: String,
    original: Option<Decimal>,
    original_formatted: Option<String>,
    badge: Option<String>,
}

impl PriceView {
    /// Detail-page form: badge reads `Save 20%`.
    pub(super) fn detail(price: &DisplayPrice) -> Self {
        Self::with_badge(price, price.badge())
    }

    /// Listing-card form: badge reads `20% OFF`.
    pub(super) fn card(price: &DisplayPrice) -> Self {
        Self::with_badge(price, price.list_badge())
    }

    fn with_badge(price: &DisplayPrice, badge: Option<String>) -> Self {
        Self {
            final_price: price.final_price,
            final_text: price.final_text(),
            formatted: format_usd(price.final_price),
            original: price.original,
            original_formatted: price.original.map(format_usd),
            badge,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct OptionValueView {
    value: String,
    selected: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct OptionView {
    name: String,
    title: String,
    values: Vec<OptionValueView>,
}

#[derive(Debug, Serialize)]
pub(super) struct ProductPageView {
    id: i64,
    name: String,
    description: Option<String>,
    sku: Option<String>,
    price: PriceView,
    options: Vec<OptionView>,
    selected: SelectedOptions,
    /// Query string that reproduces `selected`, without the leading `?`.
    query: String,
    gallery: Gallery,
    selected_index: usize,
    current_media: Option<GalleryItem>,
    share_url: String,
    messenger_url: Option<String>,
}

impl ProductPageView {
    fn build(session: &VariantSession, state: &AppState, page_path: &str) -> Self {
        let product = session.product();
        let selected = session.selected();

        let options = product
            .choice_options
            .iter()
            .map(|option| {
                let current = selected.get(&option.name);
                OptionView {
                    name: option.name.clone(),
                    title: option.title.clone(),
                    values: option
                        .allowed_values
                        .iter()
                        .map(|value| OptionValueView {
                            value: value.clone(),
                            selected: current == Some(value.as_str()),
                        })
                        .collect(),
                }
            })
            .collect();

        let share_url = session.share_link(&state.site_origin, page_path);
        let messenger_url = state
            .messenger_profile_id
            .as_deref()
            .map(|profile_id| session.messenger_url(profile_id, &share_url));

        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            sku: product.sku.clone(),
            price: PriceView::detail(&session.display_price()),
            options,
            selected: selected.clone(),
            query: session.query_string(),
            gallery: session.gallery().clone(),
            selected_index: session.selected_index(),
            current_media: session.current_media().cloned(),
            share_url,
            messenger_url,
        }
    }
}

pub(super) async fn product_page(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<ApiResponse<ProductPageView>>, ApiError> {
    let product = state
        .catalog
        .product_details(&slug)
        .await
        .map_err(|e| map_catalog_error(req_id.0.clone(), "Product", &e))?;

    let query = parse_query(raw_query.as_deref().unwrap_or_default());
    let session = VariantSession::new(Arc::new(product), &query, state.assets.clone());
    let view = ProductPageView::build(&session, &state, &product_page_path(&slug));

    Ok(ApiResponse::new(view, req_id.0))
}
