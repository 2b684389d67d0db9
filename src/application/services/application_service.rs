//! Application access service.

use std::sync::Arc;

use crate::domain::entities::Application;
use crate::domain::repositories::ApplicationRepository;
use crate::error::AppError;

/// Service exposing the applications of the calling portal user.
pub struct ApplicationService {
    repository: Arc<dyn ApplicationRepository>,
}

impl ApplicationService {
    /// Creates a new application service.
    pub fn new(repository: Arc<dyn ApplicationRepository>) -> Self {
        Self { repository }
    }

    /// Lists the active applications owned by `user_id`, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_accessible(&self, user_id: &str) -> Result<Vec<Application>, AppError> {
        let applications = self.repository.list_by_owner(user_id).await?;
        Ok(applications
            .into_iter()
            .filter(|app| app.is_accessible_by(Some(user_id)))
            .collect())
    }

    /// Retrieves an application the caller has access to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] (`errors.application.notFound`) if the
    /// application does not exist.
    /// Returns [`AppError::Forbidden`] if it exists but is not accessible.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_accessible(
        &self,
        application_id: &str,
        user_id: &str,
    ) -> Result<Application, AppError> {
        let application = self
            .repository
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| AppError::application_not_found(application_id))?;

        if !application.is_accessible_by(Some(user_id)) {
            tracing::debug!(application_id, user_id, "Application access denied");
            return Err(AppError::forbidden(
                "You do not have access to this application",
            ));
        }

        Ok(application)
    }
}
