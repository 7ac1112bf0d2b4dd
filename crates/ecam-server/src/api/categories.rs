use axum::{extract::State, Extension, Json};
use ecam_core::{AssetUrls, Category};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_catalog_error, ApiError, ApiResponse, AppState};

/// A category in the navigation bar, children nested.
#[derive(Debug, Serialize)]
pub(super) struct CategoryLink {
    id: i64,
    name: String,
    href: String,
    image_url: String,
    children: Vec<CategoryLink>,
}

impl CategoryLink {
    fn from_category(category: &Category, assets: &AssetUrls) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            href: format!("/collections/{}", category.id),
            image_url: assets.category_image(category.image.as_deref()),
            children: category
                .children
                .iter()
                .map(|child| Self::from_category(child, assets))
                .collect(),
        }
    }
}

pub(super) async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<CategoryLink>>>, ApiError> {
    let categories = state
        .catalog
        .categories()
        .await
        .map_err(|e| map_catalog_error(req_id.0.clone(), "Categories", &e))?;

    let data = categories
        .iter()
        .map(|category| CategoryLink::from_category(category, &state.assets))
        .collect();

    Ok(ApiResponse::new(data, req_id.0))
}
