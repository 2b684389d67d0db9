//! Handlers for the caller's applications.
//!
//! Every endpoint here requires an identified caller.

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

/// Lists the caller's active applications.
///
/// # Endpoint
///
/// `GET /api/applications`
///
/// # Errors
///
/// - 400 on invalid pagination parameters
/// - 401 `errors.unauthorized` for anonymous callers
pub async fn list_applications_handler(
    State(state): State<AppState>,
    caller: Caller,
    RequestUrl(url): RequestUrl,
    query: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<DataResponse<ApplicationItem>>, AppError> {
    let user_id = caller.require()?;
    let Query(params) = query?;
    params.validate()?;

    let applications = state.application_service.list_accessible(user_id).await?;
    let items = applications.into_iter().map(ApplicationItem::from).collect();

    let response = paginate(
        items,
        params.resolve(state.settings.default_page_size),
        &url,
        Metadata::default(),
    )?;
    Ok(Json(response))
}

/// Retrieves one of the caller's applications.
///
/// # Endpoint
///
/// `GET /api/applications/{application_id}`
///
/// # Errors
///
/// - 401 for anonymous callers
/// - 403 if the caller has no access to the application
/// - 404 `errors.application.notFound` if it does not exist
pub async fn get_application_handler(
    State(state): State<AppState>,
    caller: Caller,
    Path(application_id): Path<String>,
) -> Result<Json<ApplicationItem>, AppError> {
    let user_id = caller.require()?;
    let application = state
        .application_service
        .get_accessible(&application_id, user_id)
        .await?;
    Ok(Json(application.into()))
}

/// Lists the APIs an application subscribes to, most used first.
///
/// APIs the caller can no longer see are left out.
///
/// # Endpoint
///
/// `GET /api/applications/{application_id}/subscribers`
///
/// # Query Parameters
///
/// - `page`, `size`: as for `GET /api/apis`
/// - `statuses` (optional): comma separated subscription statuses
///
/// # Errors
///
/// - 400 on invalid query or pagination parameters
/// - 401 for anonymous callers
/// - 403 if the caller has no access to the application
/// - 404 `errors.application.notFound` if it does not exist
pub async fn application_subscribers_handler(
    State(state): State<AppState>,
    caller: Caller,
    Path(application_id): Path<String>,
    RequestUrl(url): RequestUrl,
    query: Result<Query<SubscribersQueryParams>, QueryRejection>,
) -> Result<Json<DataResponse<ApiItem>>, AppError> {
    let user_id = caller.require()?;
    let Query(params) = query?;
    params.validate()?;

    let apis = state
        .subscriber_service
        .application_subscribers(&application_id, user_id, params.statuses)
        .await?;
    let items = apis.into_iter().map(ApiItem::from).collect();

    let response = paginate(
        items,
        params.pagination.resolve(state.settings.default_page_size),
        &url,
        Metadata::default(),
    )?;
    Ok(Json(response))
}
