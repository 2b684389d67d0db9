//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Catalogue and analytics stores reachable
/// - **503 Service Unavailable**: At least one check failed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "status": "ok", "message": "Connected, 12 published APIs" },
///     "analytics": { "status": "ok", "message": "Connected" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (storage, analytics) = tokio::join!(
        state.api_service.count_published(),
        state.subscriber_service.ping_analytics(),
    );

    let checks = HealthChecks {
        storage: check_status(storage.map(|count| format!("Connected, {count} published APIs"))),
        analytics: check_status(analytics.map(|()| "Connected".to_string())),
    };
    let healthy = checks.storage.status == "ok" && checks.analytics.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

fn check_status(result: Result<String, AppError>) -> CheckStatus {
    match result {
        Ok(message) => CheckStatus {
            status: "ok".to_string(),
            message: Some(message),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            CheckStatus {
                status: "error".to_string(),
                message: Some(format!("Storage error: {e}")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{ApiService, ApplicationService, SubscriberService};
    use crate::domain::repositories::MockAnalyticsRepository;
    use crate::infrastructure::memory::MemoryStore;
    use crate::state::PortalSettings;
    use serde_json::json;
    use std::sync::Arc;

    fn state_with(analytics: MockAnalyticsRepository) -> AppState {
        let store = Arc::new(MemoryStore::new());
        AppState {
            api_service: Arc::new(ApiService::new(store.clone())),
            application_service: Arc::new(ApplicationService::new(store.clone())),
            subscriber_service: Arc::new(SubscriberService::new(
                store.clone(),
                store.clone(),
                store,
                Arc::new(analytics),
                chrono::Duration::days(7),
            )),
            settings: Arc::new(PortalSettings::default()),
        }
    }

    #[tokio::test]
    async fn test_unreachable_analytics_degrades_health() {
        let mut analytics = MockAnalyticsRepository::new();
        analytics
            .expect_ping()
            .returning(|| Err(AppError::internal("connection refused", json!({}))));

        let (status, Json(body)) = health_handler(State(state_with(analytics)))
            .await
            .unwrap_err();

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "degraded");
        assert_eq!(body.checks.storage.status, "ok");
        assert_eq!(body.checks.analytics.status, "error");
    }

    #[tokio::test]
    async fn test_reachable_stores_are_healthy() {
        let mut analytics = MockAnalyticsRepository::new();
        analytics.expect_ping().returning(|| Ok(()));

        let Json(body) = health_handler(State(state_with(analytics))).await.unwrap();

        assert_eq!(body.status, "healthy");
        assert_eq!(body.checks.analytics.message.as_deref(), Some("Connected"));
    }
}
