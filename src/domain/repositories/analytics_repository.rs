//! Repository trait for usage analytics.

use crate::domain::entities::HitCounts;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Dimension hits are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitsField {
    Api,
    Application,
}

/// Top-hits aggregation request.
///
/// Groups the requests recorded in `[from, to)` by `group_by`, optionally
/// restricted to one API and/or one application.
#[derive(Debug, Clone, PartialEq)]
pub struct HitsQuery {
    pub group_by: HitsField,
    pub api_id: Option<String>,
    pub application_id: Option<String>,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl HitsQuery {
    /// Hits per application on one API.
    pub fn applications_of_api(
        api_id: impl Into<String>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Self {
        Self {
            group_by: HitsField::Application,
            api_id: Some(api_id.into()),
            application_id: None,
            from,
            to,
        }
    }

    /// Hits per API made by one application.
    pub fn apis_of_application(
        application_id: impl Into<String>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Self {
        Self {
            group_by: HitsField::Api,
            api_id: None,
            application_id: Some(application_id.into()),
            from,
            to,
        }
    }
}

/// Read access to recorded gateway hits.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAnalyticsRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Aggregates hit counts per group key.
    ///
    /// Keys with no hits in the window are absent from the result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn top_hits(&self, query: HitsQuery) -> Result<HitCounts, AppError>;

    /// Checks that the analytics store answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the store is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
