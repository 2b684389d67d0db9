//! Request extractors shared by the portal handlers.

use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::{HeaderMap, header, request::Parts, uri::Authority},
};
use serde_json::json;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Identity of the caller, as set by [`crate::api::middleware::identity`].
///
/// Requests that went through no identity middleware are anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller(pub Option<String>);

impl Caller {
    pub fn id(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Caller id, or `401 errors.unauthorized` for anonymous requests.
    pub fn require(&self) -> Result<&str, AppError> {
        self.id().ok_or_else(|| {
            AppError::unauthorized("You must be authenticated to access this resource")
        })
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Caller>().cloned().unwrap_or_default())
    }
}

/// Absolute URL of the current request, used to build pagination links.
#[derive(Debug, Clone)]
pub struct RequestUrl(pub Url);

impl FromRequestParts<AppState> for RequestUrl {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map(|OriginalUri(uri)| uri.clone())
            .unwrap_or_else(|| parts.uri.clone());
        let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

        let base = match &state.settings.public_base_url {
            Some(base) => base.clone(),
            None => format!("http://{}", request_host(&parts.headers, &uri)?),
        };

        let url = Url::parse(&format!("{}{}", base.trim_end_matches('/'), path_and_query))
            .map_err(|e| {
                AppError::bad_request(
                    "errors.request.invalid",
                    "Request URL is not valid",
                    json!({ "reason": e.to_string() }),
                )
            })?;

        Ok(Self(url))
    }
}

/// Authority of the request: the URI's own (HTTP/2), else the `Host` header.
///
/// Only a bare `host[:port]` is accepted.
fn request_host(headers: &HeaderMap, uri: &axum::http::Uri) -> Result<String, AppError> {
    let invalid =
        || AppError::bad_request("errors.request.invalid", "Invalid Host header", json!({}));

    let authority = match uri.authority() {
        Some(authority) => authority.clone(),
        None => {
            let host = headers.get(header::HOST).ok_or_else(|| {
                AppError::bad_request("errors.request.invalid", "Missing Host header", json!({}))
            })?;
            Authority::try_from(host.as_bytes()).map_err(|_| invalid())?
        }
    };

    if authority.as_str().contains('@') {
        return Err(invalid());
    }
    Ok(authority.to_string())
}
