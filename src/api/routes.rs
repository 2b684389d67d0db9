//! API route configuration.
//!
//! Every route sees the caller identity set by
//! [`crate::api::middleware::identity`]; endpoints decide for themselves
//! whether an anonymous caller is acceptable.

use crate::api::handlers::{
    api_subscribers_handler, application_subscribers_handler, get_api_handler,
    get_application_handler, list_apis_handler, list_applications_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Portal routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `GET /apis`                                   - Visible APIs (paginated)
/// - `GET /apis/{api_id}`                          - Single visible API
/// - `GET /apis/{api_id}/subscribers`              - Subscribed applications, by usage
/// - `GET /applications`                           - Caller's applications (paginated)
/// - `GET /applications/{application_id}`          - Single accessible application
/// - `GET /applications/{application_id}/subscribers` - Subscribed APIs, by usage
pub fn portal_routes() -> Router<AppState> {
    Router::new()
        .route("/apis", get(list_apis_handler))
        .route("/apis/{api_id}", get(get_api_handler))
        .route("/apis/{api_id}/subscribers", get(api_subscribers_handler))
        .route("/applications", get(list_applications_handler))
        .route("/applications/{application_id}", get(get_application_handler))
        .route(
            "/applications/{application_id}/subscribers",
            get(application_subscribers_handler),
        )
}
