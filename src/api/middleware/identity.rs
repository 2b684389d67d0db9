//! Caller identification middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::extract::Caller;
use crate::state::AppState;

/// Reads the caller id from the configured user header.
///
/// Authentication happens upstream (gateway or reverse proxy); this layer
/// only forwards the identity it was given. A missing, empty or non UTF-8
/// header makes the request anonymous.
///
/// # Example
///
/// ```rust,ignore
/// let api = Router::new()
///     .route("/apis", get(list_apis_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), identity::layer));
/// ```
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let caller = req
        .headers()
        .get(&st.settings.user_header)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    if let Some(id) = caller.as_deref() {
        tracing::debug!(user = id, "Identified caller");
    }

    req.extensions_mut().insert(Caller(caller));
    next.run(req).await
}
