use tower_http::cors::{Any, CorsLayer};

/// The public site and the editor are served from other origins.
pub fn api_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any)
}
