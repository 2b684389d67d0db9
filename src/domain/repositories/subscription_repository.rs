//! Repository trait for subscription searches.

use crate::domain::entities::{Subscription, SubscriptionStatus};
use crate::error::AppError;
use async_trait::async_trait;

/// Search criteria for subscriptions.
///
/// Every criterion left to `None` matches all subscriptions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionQuery {
    pub api_id: Option<String>,
    pub application_id: Option<String>,
    pub statuses: Option<Vec<SubscriptionStatus>>,
}

impl SubscriptionQuery {
    /// Subscriptions to the given API.
    pub fn for_api(api_id: impl Into<String>) -> Self {
        Self {
            api_id: Some(api_id.into()),
            ..Self::default()
        }
    }

    /// Subscriptions held by the given application.
    pub fn for_application(application_id: impl Into<String>) -> Self {
        Self {
            application_id: Some(application_id.into()),
            ..Self::default()
        }
    }

    /// Restricts the search to the given statuses. An empty list is ignored.
    pub fn with_statuses(mut self, statuses: Option<Vec<SubscriptionStatus>>) -> Self {
        self.statuses = statuses.filter(|s| !s.is_empty());
        self
    }

    /// Whether `subscription` satisfies every criterion.
    pub fn matches(&self, subscription: &Subscription) -> bool {
        self.api_id
            .as_ref()
            .is_none_or(|id| *id == subscription.api_id)
            && self
                .application_id
                .as_ref()
                .is_none_or(|id| *id == subscription.application_id)
            && self
                .statuses
                .as_ref()
                .is_none_or(|statuses| statuses.contains(&subscription.status))
    }
}

/// Read access to subscriptions.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSubscriptionRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Returns every subscription matching `query`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn search(&self, query: SubscriptionQuery) -> Result<Vec<Subscription>, AppError>;
}
