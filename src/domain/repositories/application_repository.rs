//! Repository trait for application lookups.

use crate::domain::entities::Application;
use crate::error::AppError;
use async_trait::async_trait;

/// Read access to consumer applications.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgApplicationRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Finds an application by identifier, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: &str) -> Result<Option<Application>, AppError>;

    /// Finds every application whose id is in `ids`. Unknown ids are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Application>, AppError>;

    /// Lists active applications owned by `owner_id`, ordered by name then id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Application>, AppError>;
}
