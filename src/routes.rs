//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: storage (public)
//! - `/api/*`            - Portal REST API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Identity** - Caller id from the configured user header
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{identity, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(portal_router(state))
}

/// Routes and middleware without path normalization.
///
/// Integration tests drive this router directly.
pub fn portal_router(state: AppState) -> Router {
    let api_router = api::routes::portal_routes()
        .layer(middleware::from_fn_with_state(state.clone(), identity::layer));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .layer(tracing::layer(state.settings.user_header.clone()))
        .with_state(state)
}
