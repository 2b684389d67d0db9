//! API discovery service.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::entities::Api;
use crate::domain::repositories::ApiRepository;
use crate::error::AppError;

/// Service exposing the APIs a portal caller is allowed to see.
pub struct ApiService {
    repository: Arc<dyn ApiRepository>,
}

impl ApiService {
    /// Creates a new API service.
    pub fn new(repository: Arc<dyn ApiRepository>) -> Self {
        Self { repository }
    }

    /// Lists the APIs visible to `user_id` (anonymous when `None`), ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_visible(&self, user_id: Option<&str>) -> Result<Vec<Api>, AppError> {
        let apis = self.repository.list_published().await?;
        Ok(apis
            .into_iter()
            .filter(|api| api.is_visible_to(user_id))
            .collect())
    }

    /// Retrieves a single API if it is visible to `user_id`.
    ///
    /// Invisible APIs are reported exactly like unknown ones.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] (`errors.api.notFound`) if the API does
    /// not exist or is not visible.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_visible(&self, api_id: &str, user_id: Option<&str>) -> Result<Api, AppError> {
        self.repository
            .find_by_id(api_id)
            .await?
            .filter(|api| api.is_visible_to(user_id))
            .ok_or_else(|| AppError::api_not_found(api_id))
    }

    /// Ids of the APIs among `apis` visible to `user_id`.
    pub fn visible_ids(apis: &[Api], user_id: Option<&str>) -> HashSet<String> {
        apis.iter()
            .filter(|api| api.is_visible_to(user_id))
            .map(|api| api.id.clone())
            .collect()
    }

    /// Counts published APIs. Used by the health check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn count_published(&self) -> Result<i64, AppError> {
        self.repository.count_published().await
    }
}
