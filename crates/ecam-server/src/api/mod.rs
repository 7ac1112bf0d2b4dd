mod categories;
mod listing;
mod products;
mod store;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use ecam_catalog::{CatalogError, MemoizedCatalog};
use ecam_core::AssetUrls;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, track_page_view, Analytics, RequestId};

const UPSTREAM_ERROR_MESSAGE: &str = "Failed to load products. Please try again later.";

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<MemoizedCatalog>,
    pub assets: AssetUrls,
    /// Public origin share links are built against.
    pub site_origin: String,
    pub messenger_profile_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(data: T, request_id: String) -> Json<Self> {
        Json(Self {
            data,
            meta: ResponseMeta::new(request_id),
        })
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Maps a catalog failure onto the page's error state.
///
/// Missing records become `not_found` with `what` in the message; anything
/// else is an `upstream_error` carrying the storefront's retry prompt.
pub(super) fn map_catalog_error(request_id: String, what: &str, error: &CatalogError) -> ApiError {
    if matches!(error, CatalogError::NotFound { .. }) {
        tracing::info!(error = %error, "{what} not found upstream");
        return ApiError::new(request_id, "not_found", format!("{what} not found"));
    }

    tracing::error!(
        error = %error,
        retryable = error.is_retryable(),
        "catalog request failed"
    );
    ApiError::new(request_id, "upstream_error", UPSTREAM_ERROR_MESSAGE)
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

fn page_router(analytics: Analytics) -> Router<AppState> {
    Router::new()
        .route("/api/v1/products/{slug}", get(products::product_page))
        .route("/api/v1/search", get(listing::search_page))
        .route("/api/v1/recommended", get(listing::recommended))
        .route("/api/v1/categories", get(categories::list_categories))
        .route("/api/v1/store", get(store::store_profile))
        .layer(axum::middleware::from_fn_with_state(
            analytics,
            track_page_view,
        ))
}

pub fn build_app(state: AppState, analytics: Analytics) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(page_router(analytics))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    ApiResponse::new(HealthData { status: "ok" }, req_id.0)
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
