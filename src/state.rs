//! Shared application state injected into every handler.

use axum::http::HeaderName;
use std::sync::Arc;

use crate::application::services::{ApiService, ApplicationService, SubscriberService};

/// Request-facing settings derived from [`crate::config::Config`].
#[derive(Debug, Clone)]
pub struct PortalSettings {
    /// Header carrying the caller id.
    pub user_header: HeaderName,
    /// Absolute prefix of generated links. `None` uses `http://{Host}`.
    pub public_base_url: Option<String>,
    /// Page size used when a listing request carries no `size`.
    pub default_page_size: i64,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            user_header: HeaderName::from_static("x-portal-user"),
            public_base_url: None,
            default_page_size: 10,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub api_service: Arc<ApiService>,
    pub application_service: Arc<ApplicationService>,
    pub subscriber_service: Arc<SubscriberService>,
    pub settings: Arc<PortalSettings>,
}
