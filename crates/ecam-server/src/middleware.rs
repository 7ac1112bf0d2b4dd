use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Middleware that propagates `x-request-id` or generates a `UUIDv4`.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Page-view analytics settings.
///
/// Every page route emits one `PageView` event per request on the
/// `ecam::analytics` target, tagged with the tracking pixel when one is
/// configured.
#[derive(Debug, Clone, Default)]
pub struct Analytics {
    pixel_id: Option<Arc<str>>,
}

impl Analytics {
    pub fn new(pixel_id: Option<&str>) -> Self {
        Self {
            pixel_id: pixel_id.map(Arc::from),
        }
    }

    pub fn pixel_id(&self) -> Option<&str> {
        self.pixel_id.as_deref()
    }
}

/// Path and query of a viewed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub path: String,
    pub query: Option<String>,
}

impl PageView {
    pub fn from_request(req: &Request) -> Self {
        Self {
            path: req.uri().path().to_owned(),
            query: req.uri().query().map(str::to_owned),
        }
    }
}

/// Middleware recording a page view for every request that reached a page.
pub async fn track_page_view(
    State(analytics): State<Analytics>,
    req: Request,
    next: Next,
) -> Response {
    let view = PageView::from_request(&req);
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_default();

    let res = next.run(req).await;

    tracing::info!(
        target: "ecam::analytics",
        event = "PageView",
        pixel_id = analytics.pixel_id(),
        path = %view.path,
        query = view.query.as_deref(),
        status = res.status().as_u16(),
        request_id = %request_id,
        "page view"
    );

    res
}
