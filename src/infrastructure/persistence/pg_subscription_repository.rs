//! PostgreSQL implementation of the subscription repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use super::invalid_column;
use crate::domain::entities::{ReferenceType, Subscription};
use crate::domain::repositories::{SubscriptionQuery, SubscriptionRepository};
use crate::error::AppError;

/// PostgreSQL repository for the `subscriptions` table.
pub struct PgSubscriptionRepository {
    pool: Arc<PgPool>,
}

impl PgSubscriptionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SubscriptionRow {
    id: String,
    api_id: String,
    application_id: String,
    reference_type: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = AppError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        let reference_type = ReferenceType::parse(&row.reference_type).ok_or_else(|| {
            invalid_column("subscriptions", "reference_type", &row.reference_type)
        })?;
        let status = row
            .status
            .parse()
            .map_err(|_| invalid_column("subscriptions", "status", &row.status))?;

        Ok(Subscription {
            id: row.id,
            api_id: row.api_id,
            application_id: row.application_id,
            reference_type,
            status,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn search(&self, query: SubscriptionQuery) -> Result<Vec<Subscription>, AppError> {
        let statuses: Option<Vec<String>> = query
            .statuses
            .as_ref()
            .map(|statuses| statuses.iter().map(|s| s.as_str().to_string()).collect());

        let rows = sqlx::query_as::<_, SubscriptionRow>(
            r#"
            SELECT id, api_id, application_id, reference_type, status, created_at
            FROM subscriptions
            WHERE ($1::text IS NULL OR api_id = $1)
              AND ($2::text IS NULL OR application_id = $2)
              AND ($3::text[] IS NULL OR status = ANY($3))
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(query.api_id.as_deref())
        .bind(query.application_id.as_deref())
        .bind(statuses)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Subscription::try_from).collect()
    }
}
