//! Application error type and its HTTP representation.
//!
//! Every error is rendered with the portal error envelope:
//!
//! ```json
//! { "errors": [ { "code": "errors.api.notFound", "status": "404",
//!                 "message": "Api [abc] cannot be found.", "parameters": { "api": "abc" } } ] }
//! ```

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    errors: Vec<ErrorItem>,
}

#[derive(Serialize)]
struct ErrorItem {
    code: &'static str,
    status: String,
    message: String,
    parameters: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        code: &'static str,
        message: String,
        parameters: Value,
    },
    #[error("{message}")]
    Unauthorized {
        code: &'static str,
        message: String,
        parameters: Value,
    },
    #[error("{message}")]
    Forbidden {
        code: &'static str,
        message: String,
        parameters: Value,
    },
    #[error("{message}")]
    NotFound {
        code: &'static str,
        message: String,
        parameters: Value,
    },
    #[error("{message}")]
    Internal {
        code: &'static str,
        message: String,
        parameters: Value,
    },
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>, parameters: Value) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            parameters,
        }
    }
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            code: "errors.unauthorized",
            message: message.into(),
            parameters: json!({}),
        }
    }
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            code: "errors.forbidden",
            message: message.into(),
            parameters: json!({}),
        }
    }
    pub fn not_found(code: &'static str, message: impl Into<String>, parameters: Value) -> Self {
        Self::NotFound {
            code,
            message: message.into(),
            parameters,
        }
    }
    pub fn internal(message: impl Into<String>, parameters: Value) -> Self {
        Self::Internal {
            code: "errors.unexpected",
            message: message.into(),
            parameters,
        }
    }

    pub fn pagination_invalid() -> Self {
        Self::bad_request(
            "errors.pagination.invalid",
            "Pagination is not valid",
            json!({}),
        )
    }

    pub fn pagination_size_invalid() -> Self {
        Self::bad_request(
            "errors.pagination.size.invalid",
            "Pagination size is not valid",
            json!({}),
        )
    }

    pub fn api_not_found(api_id: &str) -> Self {
        Self::not_found(
            "errors.api.notFound",
            format!("Api [{api_id}] cannot be found."),
            json!({ "api": api_id }),
        )
    }

    pub fn application_not_found(application_id: &str) -> Self {
        Self::not_found(
            "errors.application.notFound",
            format!("Application [{application_id}] cannot be found."),
            json!({ "application": application_id }),
        )
    }

    /// Returns the portal error code carried by this error.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { code, .. }
            | AppError::Unauthorized { code, .. }
            | AppError::Forbidden { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Internal { code, .. } => code,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message, parameters) = match self {
            AppError::Validation {
                code,
                message,
                parameters,
            }
            | AppError::Unauthorized {
                code,
                message,
                parameters,
            }
            | AppError::Forbidden {
                code,
                message,
                parameters,
            }
            | AppError::NotFound {
                code,
                message,
                parameters,
            }
            | AppError::Internal {
                code,
                message,
                parameters,
            } => (code, message, parameters),
        };

        let body = ErrorBody {
            errors: vec![ErrorItem {
                code,
                status: status.as_u16().to_string(),
                message,
                parameters,
            }],
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let errors = e.errors();
        if errors.contains_key("size") || errors.contains_key("pagination") {
            return AppError::pagination_size_invalid();
        }

        let fields: Vec<&str> = errors.keys().map(|k| k.as_ref()).collect();
        AppError::bad_request(
            "errors.query.invalid",
            "Query parameters are not valid",
            json!({ "fields": fields }),
        )
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::bad_request(
            "errors.query.invalid",
            "Query parameters are not valid",
            json!({ "reason": e.body_text() }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_pagination_invalid_payload() {
        let (status, json) = body_json(AppError::pagination_invalid()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errors"][0]["code"], "errors.pagination.invalid");
        assert_eq!(json["errors"][0]["status"], "400");
        assert_eq!(json["errors"][0]["message"], "Pagination is not valid");
    }

    #[tokio::test]
    async fn test_api_not_found_payload() {
        let (status, json) = body_json(AppError::api_not_found("my-api")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["errors"][0]["code"], "errors.api.notFound");
        assert_eq!(json["errors"][0]["status"], "404");
        assert_eq!(json["errors"][0]["parameters"]["api"], "my-api");
    }

    #[tokio::test]
    async fn test_application_not_found_payload() {
        let (status, json) = body_json(AppError::application_not_found("app")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["errors"][0]["code"], "errors.application.notFound");
    }

    #[test]
    fn test_code_accessor() {
        assert_eq!(AppError::forbidden("nope").code(), "errors.forbidden");
        assert_eq!(AppError::unauthorized("who").code(), "errors.unauthorized");
        assert_eq!(
            AppError::internal("boom", json!({})).code(),
            "errors.unexpected"
        );
    }

    #[test]
    fn test_size_validation_maps_to_pagination_size_code() {
        use crate::api::dto::pagination::{PaginationParams, SubscribersQueryParams};
        use validator::Validate;

        let params = PaginationParams {
            page: None,
            size: Some(-3),
        };
        let err: AppError = params.validate().unwrap_err().into();
        assert_eq!(err.code(), "errors.pagination.size.invalid");

        let nested = SubscribersQueryParams {
            pagination: params,
            statuses: None,
        };
        let err: AppError = nested.validate().unwrap_err().into();
        assert_eq!(err.code(), "errors.pagination.size.invalid");
    }
}
