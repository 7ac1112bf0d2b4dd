use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_catalog_error, ApiError, ApiResponse, AppState};

/// Header chrome: store name, logo, and contact number.
#[derive(Debug, Serialize)]
pub(super) struct StoreView {
    id: i64,
    name: String,
    logo_url: String,
    phone: Option<String>,
}

pub(super) async fn store_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<StoreView>>, ApiError> {
    let store = state
        .catalog
        .store_profile()
        .await
        .map_err(|e| map_catalog_error(req_id.0.clone(), "Store", &e))?;

    let view = StoreView {
        id: store.id,
        logo_url: state.assets.store_logo(store.logo.as_deref()),
        name: store.name,
        phone: store.phone,
    };

    Ok(ApiResponse::new(view, req_id.0))
}
