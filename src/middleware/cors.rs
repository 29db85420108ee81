use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Any origin; auth travels in the `Authorization` header, not cookies.
pub fn portal_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION])
        .allow_origin(Any)
}
