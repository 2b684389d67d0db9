//! Subscriber listings ranked by usage.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::application::services::ApiService;
use crate::domain::entities::{
    Api, Application, HitCounts, ReferenceType, Subscription, SubscriptionRecord,
    SubscriptionStatus,
};
use crate::domain::repositories::{
    AnalyticsRepository, ApiRepository, ApplicationRepository, HitsQuery, SubscriptionQuery,
    SubscriptionRepository,
};
use crate::domain::subscriber_ranking::rank_subscribers;
use crate::error::AppError;

/// Service resolving both directions of the subscription relation.
///
/// Gathers subscriptions, peers and hit counts from the repositories, then
/// hands them to [`rank_subscribers`]. Analytics are best-effort: a failing
/// hits query ranks every peer as if it had no traffic.
pub struct SubscriberService {
    apis: Arc<dyn ApiRepository>,
    applications: Arc<dyn ApplicationRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    analytics: Arc<dyn AnalyticsRepository>,
    analytics_window: Duration,
}

impl SubscriberService {
    /// Creates a new subscriber service.
    ///
    /// `analytics_window` is how far back hits are counted.
    pub fn new(
        apis: Arc<dyn ApiRepository>,
        applications: Arc<dyn ApplicationRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        analytics: Arc<dyn AnalyticsRepository>,
        analytics_window: Duration,
    ) -> Self {
        Self {
            apis,
            applications,
            subscriptions,
            analytics,
            analytics_window,
        }
    }

    /// Applications subscribed to an API, most active first.
    ///
    /// Only the API's primary owner may list its subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] (`errors.api.notFound`) if the API does
    /// not exist or is not visible to the caller.
    /// Returns [`AppError::Forbidden`] if the caller is not the primary owner.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn api_subscribers(
        &self,
        api_id: &str,
        user_id: Option<&str>,
        statuses: Option<Vec<SubscriptionStatus>>,
    ) -> Result<Vec<Application>, AppError> {
        let api = self
            .apis
            .find_by_id(api_id)
            .await?
            .filter(|api| api.is_visible_to(user_id))
            .ok_or_else(|| AppError::api_not_found(api_id))?;

        if !api.is_owned_by(user_id) {
            return Err(AppError::forbidden(
                "Only the primary owner can list the subscribers of an API",
            ));
        }

        let to = Utc::now();
        let query = SubscriptionQuery::for_api(api_id).with_statuses(statuses);
        let (subscriptions, hits) = tokio::join!(
            self.subscriptions.search(query),
            self.hit_counts(HitsQuery::applications_of_api(
                api_id,
                to - self.analytics_window,
                to
            )),
        );

        let records: Vec<SubscriptionRecord> = subscriptions?
            .iter()
            .map(Subscription::toward_application)
            .collect();

        let ids = referenced_ids(&records);
        let directory: HashMap<String, Application> = self
            .applications
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|app| (app.id.clone(), app))
            .collect();

        let ranked = rank_subscribers(
            &records,
            |id| directory.get(id).cloned(),
            &hits,
            None::<fn(&str) -> bool>,
        );

        tracing::debug!(api_id, subscribers = ranked.len(), "Ranked API subscribers");
        Ok(ranked)
    }

    /// APIs an application subscribes to, most used first.
    ///
    /// APIs the caller can no longer see are left out.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] (`errors.application.notFound`) if the
    /// application does not exist.
    /// Returns [`AppError::Forbidden`] if the caller has no access to it.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn application_subscribers(
        &self,
        application_id: &str,
        user_id: &str,
        statuses: Option<Vec<SubscriptionStatus>>,
    ) -> Result<Vec<Api>, AppError> {
        let application = self
            .applications
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| AppError::application_not_found(application_id))?;

        if !application.is_accessible_by(Some(user_id)) {
            return Err(AppError::forbidden(
                "You do not have access to this application",
            ));
        }

        let to = Utc::now();
        let query = SubscriptionQuery::for_application(application_id).with_statuses(statuses);
        let (subscriptions, hits) = tokio::join!(
            self.subscriptions.search(query),
            self.hit_counts(HitsQuery::apis_of_application(
                application_id,
                to - self.analytics_window,
                to
            )),
        );

        let records: Vec<SubscriptionRecord> = subscriptions?
            .iter()
            .map(Subscription::toward_api)
            .collect();

        let apis = self.apis.find_by_ids(&referenced_ids(&records)).await?;
        let visible = ApiService::visible_ids(&apis, Some(user_id));
        let directory: HashMap<String, Api> =
            apis.into_iter().map(|api| (api.id.clone(), api)).collect();

        let ranked = rank_subscribers(
            &records,
            |id| directory.get(id).cloned(),
            &hits,
            Some(|id: &str| visible.contains(id)),
        );

        tracing::debug!(
            application_id,
            subscribed_apis = ranked.len(),
            "Ranked application subscriptions"
        );
        Ok(ranked)
    }

    /// Checks the analytics store. Used by the health check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the store is unreachable.
    pub async fn ping_analytics(&self) -> Result<(), AppError> {
        self.analytics.ping().await
    }

    async fn hit_counts(&self, query: HitsQuery) -> HitCounts {
        match self.analytics.top_hits(query).await {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!(error = %e, "Hit counts unavailable, ranking by name only");
                HitCounts::new()
            }
        }
    }
}

/// Distinct peer ids of plain API subscriptions, in first-seen order.
fn referenced_ids(records: &[SubscriptionRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| r.reference_type == ReferenceType::Api)
        .filter(|r| seen.insert(r.reference_id.as_str()))
        .map(|r| r.reference_id.clone())
        .collect()
}
