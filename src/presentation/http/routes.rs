//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{
    auth_middleware, create_cors_layer, create_trace_layer, optional_auth_middleware,
    track_metrics,
};
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.settings.media.max_upload_bytes;

    Router::new()
        .nest("/api", api_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(track_metrics))
        .layer(create_cors_layer(&state.settings.cors))
        .layer(create_trace_layer())
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API routes
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(directory_routes(state.clone()))
        .merge(public_routes())
        .merge(protected_routes(state))
}

/// Directory listing (identity is optional; the listing decides what it needs)
fn directory_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/servers", get(handlers::server::list_servers))
        .route_layer(middleware::from_fn_with_state(state, optional_auth_middleware))
}

/// Public read-only routes
fn public_routes() -> Router<AppState> {
    Router::new().route("/categories", get(handlers::category::list_categories))
}

/// Write routes (require authentication)
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/servers", post(handlers::server::create_server))
        .route("/servers/{server_id}", delete(handlers::server::delete_server))
        .route(
            "/servers/{server_id}/members/@me",
            put(handlers::server::join_server).delete(handlers::server::leave_server),
        )
        .route(
            "/servers/{server_id}/channels",
            post(handlers::channel::create_channel),
        )
        .route(
            "/channels/{channel_id}",
            patch(handlers::channel::update_channel).delete(handlers::channel::delete_channel),
        )
        .route("/categories", post(handlers::category::create_category))
        .route(
            "/categories/{category_id}",
            patch(handlers::category::update_category).delete(handlers::category::delete_category),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
