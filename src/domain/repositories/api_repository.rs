//! Repository trait for API lookups.

use crate::domain::entities::Api;
use crate::error::AppError;
use async_trait::async_trait;

/// Read access to the APIs known to the portal.
///
/// Visibility rules are not applied here; see [`Api::is_visible_to`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgApiRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiRepository: Send + Sync {
    /// Finds an API by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: &str) -> Result<Option<Api>, AppError>;

    /// Finds every API whose id is in `ids`. Unknown ids are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Api>, AppError>;

    /// Lists published APIs, ordered by name then id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_published(&self) -> Result<Vec<Api>, AppError>;

    /// Counts published APIs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count_published(&self) -> Result<i64, AppError>;
}
