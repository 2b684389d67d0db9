use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::entities::{
    Api, Application, ApplicationStatus, HitCounts, LifecycleState, Peer, Subscription,
};
use crate::domain::repositories::{
    AnalyticsRepository, ApiRepository, ApplicationRepository, HitsField, HitsQuery,
    SubscriptionQuery, SubscriptionRepository,
};
use crate::error::AppError;

/// Requests made by one application to one API at a given instant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Hit {
    pub api_id: String,
    pub application_id: String,
    pub at: DateTime<Utc>,
    #[serde(default = "one")]
    pub count: u64,
}

fn one() -> u64 {
    1
}

/// Initial content of a [`MemoryStore`], as read from a seed file.
///
/// ```json
/// { "apis": [...], "applications": [...], "subscriptions": [...], "hits": [...] }
/// ```
///
/// Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub apis: Vec<Api>,
    pub applications: Vec<Application>,
    pub subscriptions: Vec<Subscription>,
    pub hits: Vec<Hit>,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid seed file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Repository backend keeping everything in process memory.
///
/// Cloning is cheap and clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<Seed>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `seed`.
    pub fn from_seed(seed: Seed) -> Self {
        Self {
            data: Arc::new(RwLock::new(seed)),
        }
    }

    /// Loads a JSON seed file.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] if the file cannot be read or is not a valid seed.
    pub async fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let raw = tokio::fs::read(path).await.map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let seed: Seed = serde_json::from_slice(&raw).map_err(|source| SeedError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(
            path = %path.display(),
            apis = seed.apis.len(),
            applications = seed.applications.len(),
            subscriptions = seed.subscriptions.len(),
            hits = seed.hits.len(),
            "Loaded seed file"
        );
        Ok(Self::from_seed(seed))
    }

    pub async fn insert_api(&self, api: Api) {
        let mut data = self.data.write().await;
        data.apis.retain(|existing| existing.id != api.id);
        data.apis.push(api);
    }

    pub async fn insert_application(&self, application: Application) {
        let mut data = self.data.write().await;
        data.applications.retain(|existing| existing.id != application.id);
        data.applications.push(application);
    }

    pub async fn insert_subscription(&self, subscription: Subscription) {
        let mut data = self.data.write().await;
        data.subscriptions.retain(|existing| existing.id != subscription.id);
        data.subscriptions.push(subscription);
    }

    pub async fn record_hit(&self, hit: Hit) {
        self.data.write().await.hits.push(hit);
    }
}

/// Name ascending with unnamed entries last, then id.
fn by_name_then_id<P: Peer>(a: &P, b: &P) -> Ordering {
    let names = match (a.name(), b.name()) {
        (Some(left), Some(right)) => left.cmp(right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    names.then_with(|| a.id().cmp(b.id()))
}

#[async_trait]
impl ApiRepository for MemoryStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Api>, AppError> {
        let data = self.data.read().await;
        Ok(data.apis.iter().find(|api| api.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Api>, AppError> {
        let data = self.data.read().await;
        Ok(data
            .apis
            .iter()
            .filter(|api| ids.contains(&api.id))
            .cloned()
            .collect())
    }

    async fn list_published(&self) -> Result<Vec<Api>, AppError> {
        let data = self.data.read().await;
        let mut apis: Vec<Api> = data
            .apis
            .iter()
            .filter(|api| api.lifecycle_state == LifecycleState::Published)
            .cloned()
            .collect();
        apis.sort_by(by_name_then_id);
        Ok(apis)
    }

    async fn count_published(&self) -> Result<i64, AppError> {
        let data = self.data.read().await;
        let count = data
            .apis
            .iter()
            .filter(|api| api.lifecycle_state == LifecycleState::Published)
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}

#[async_trait]
impl ApplicationRepository for MemoryStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Application>, AppError> {
        let data = self.data.read().await;
        Ok(data.applications.iter().find(|app| app.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Application>, AppError> {
        let data = self.data.read().await;
        Ok(data
            .applications
            .iter()
            .filter(|app| ids.contains(&app.id))
            .cloned()
            .collect())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Application>, AppError> {
        let data = self.data.read().await;
        let mut applications: Vec<Application> = data
            .applications
            .iter()
            .filter(|app| app.owner_id == owner_id && app.status == ApplicationStatus::Active)
            .cloned()
            .collect();
        applications.sort_by(by_name_then_id);
        Ok(applications)
    }
}

#[async_trait]
impl SubscriptionRepository for MemoryStore {
    async fn search(&self, query: SubscriptionQuery) -> Result<Vec<Subscription>, AppError> {
        let data = self.data.read().await;
        let mut subscriptions: Vec<Subscription> = data
            .subscriptions
            .iter()
            .filter(|subscription| query.matches(subscription))
            .cloned()
            .collect();
        subscriptions.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(subscriptions)
    }
}

#[async_trait]
impl AnalyticsRepository for MemoryStore {
    async fn top_hits(&self, query: HitsQuery) -> Result<HitCounts, AppError> {
        let data = self.data.read().await;
        let mut counts = HitCounts::new();

        let in_scope = data.hits.iter().filter(|hit| {
            hit.at >= query.from
                && hit.at < query.to
                && query.api_id.as_ref().is_none_or(|id| *id == hit.api_id)
                && query
                    .application_id
                    .as_ref()
                    .is_none_or(|id| *id == hit.application_id)
        });

        for hit in in_scope {
            let key = match query.group_by {
                HitsField::Api => &hit.api_id,
                HitsField::Application => &hit.application_id,
            };
            *counts.entry(key.clone()).or_default() += hit.count;
        }

        Ok(counts)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
