pub mod auth;
pub mod department;
pub mod docs;
pub mod extract;
pub mod health;
pub mod job_posting;
pub mod public;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::middleware::{auth::require_editor, rate_limit};
use crate::AppState;

/// Full API surface without transport layers (CORS, tracing), so tests can
/// drive it directly.
pub fn app_router(state: AppState) -> Router {
    let public_limiter = rate_limit::RateLimiter::new("public", state.config.public_rps);
    let cms_limiter = rate_limit::RateLimiter::new("cms", state.config.cms_rps);

    let base_routes = Router::new()
        .route("/health", get(health::health))
        .route("/api/docs/openapi.json", get(docs::openapi_json));

    let public_api = Router::new()
        .route("/api/public/departments", get(public::list_departments))
        .route(
            "/api/public/departments/:department_slug/jobs",
            get(public::department_jobs),
        )
        .route("/api/public/jobs", get(public::list_jobs))
        .route("/api/public/jobs/grouped", get(public::grouped_jobs))
        .route(
            "/api/public/jobs/:department_slug/:job_slug",
            get(public::job_detail),
        )
        .route(
            "/api/public/applications/:job_slug",
            post(public::submit_application),
        )
        .route("/api/auth/login", post(auth::login))
        .layer(from_fn_with_state(
            public_limiter,
            rate_limit::rps_middleware,
        ));

    let cms_api = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/cms/dashboard", get(job_posting::dashboard))
        .route(
            "/api/cms/departments",
            get(department::list_departments).post(department::create_department),
        )
        .route(
            "/api/cms/departments/:id",
            put(department::update_department).delete(department::delete_department),
        )
        .route(
            "/api/cms/jobs",
            get(job_posting::list_jobs).post(job_posting::create_job),
        )
        .route(
            "/api/cms/jobs/:id",
            get(job_posting::get_job)
                .put(job_posting::update_job)
                .delete(job_posting::delete_job),
        )
        .route(
            "/api/cms/jobs/:id/sections/:index/move",
            post(job_posting::move_section),
        )
        .route("/api/cms/jobs/:id/export", get(job_posting::export_job))
        .layer(from_fn_with_state(state.clone(), require_editor))
        .layer(from_fn_with_state(cms_limiter, rate_limit::rps_middleware));

    base_routes
        .merge(public_api)
        .merge(cms_api)
        .with_state(state)
}
