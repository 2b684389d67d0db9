//! Handlers for API discovery endpoints.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use validator::Validate;

use crate::api::dto::api::ApiItem;
use crate::api::dto::application::ApplicationItem;
use crate::api::dto::pagination::{PaginationParams, SubscribersQueryParams};
use crate::api::dto::response::{DataResponse, Metadata};
use crate::api::extract::{Caller, RequestUrl};
use crate::api::listing::paginate;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the APIs visible to the caller.
///
/// # Endpoint
///
/// `GET /api/apis`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `size` (optional): Items per page (default: configured, `-1` for all)
///
/// # Response
///
/// ```json
/// {
///   "data": [{ "id": "weather", "name": "Weather", "version": "2.0", ... }],
///   "metadata": {
///     "data": { "total": 10 },
///     "pagination": { "current_page": 1, "size": 10, "first": 1, "last": 10, "total": 42, "total_pages": 5 }
///   },
///   "links": { "self": "...", "first": "...", "next": "...", "last": "..." }
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if pagination parameters are invalid or the page is out of range.
pub async fn list_apis_handler(
    State(state): State<AppState>,
    caller: Caller,
    RequestUrl(url): RequestUrl,
    query: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<DataResponse<ApiItem>>, AppError> {
    let Query(params) = query?;
    params.validate()?;

    let apis = state.api_service.list_visible(caller.id()).await?;
    let items = apis.into_iter().map(ApiItem::from).collect();

    let response = paginate(
        items,
        params.resolve(state.settings.default_page_size),
        &url,
        Metadata::default(),
    )?;
    Ok(Json(response))
}

/// Retrieves a single API.
///
/// # Endpoint
///
/// `GET /api/apis/{api_id}`
///
/// # Errors
///
/// Returns 404 `errors.api.notFound` if the API does not exist or is not
/// visible to the caller.
pub async fn get_api_handler(
    State(state): State<AppState>,
    caller: Caller,
    Path(api_id): Path<String>,
) -> Result<Json<ApiItem>, AppError> {
    let api = state.api_service.get_visible(&api_id, caller.id()).await?;
    Ok(Json(api.into()))
}

/// Lists the applications subscribed to an API, most active first.
///
/// # Endpoint
///
/// `GET /api/apis/{api_id}/subscribers`
///
/// # Query Parameters
///
/// - `page`, `size`: as for `GET /api/apis`
/// - `statuses` (optional): comma separated subscription statuses, e.g.
///   `ACCEPTED,PAUSED` (default: all)
///
/// # Errors
///
/// - 400 on invalid query or pagination parameters
/// - 403 `errors.forbidden` if the caller is not the API's primary owner
/// - 404 `errors.api.notFound` if the API does not exist or is not visible
pub async fn api_subscribers_handler(
    State(state): State<AppState>,
    caller: Caller,
    Path(api_id): Path<String>,
    RequestUrl(url): RequestUrl,
    query: Result<Query<SubscribersQueryParams>, QueryRejection>,
) -> Result<Json<DataResponse<ApplicationItem>>, AppError> {
    let Query(params) = query?;
    params.validate()?;

    let subscribers = state
        .subscriber_service
        .api_subscribers(&api_id, caller.id(), params.statuses)
        .await?;
    let items = subscribers.into_iter().map(ApplicationItem::from).collect();

    let response = paginate(
        items,
        params.pagination.resolve(state.settings.default_page_size),
        &url,
        Metadata::default(),
    )?;
    Ok(Json(response))
}
