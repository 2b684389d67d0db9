//! PostgreSQL implementation of the analytics repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::HitCounts;
use crate::domain::repositories::{AnalyticsRepository, HitsField, HitsQuery};
use crate::error::AppError;

/// Aggregates gateway hits stored in the `api_hits` table.
pub struct PgAnalyticsRepository {
    pool: Arc<PgPool>,
}

impl PgAnalyticsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn group_column(field: HitsField) -> &'static str {
    match field {
        HitsField::Api => "api_id",
        HitsField::Application => "application_id",
    }
}

#[async_trait]
impl AnalyticsRepository for PgAnalyticsRepository {
    async fn top_hits(&self, query: HitsQuery) -> Result<HitCounts, AppError> {
        let column = group_column(query.group_by);

        let rows: Vec<(String, i64)> = sqlx::query_as(&format!(
            r#"
            SELECT {column} AS key, COUNT(*) AS hits
            FROM api_hits
            WHERE hit_at >= $1 AND hit_at < $2
              AND ($3::text IS NULL OR api_id = $3)
              AND ($4::text IS NULL OR application_id = $4)
            GROUP BY {column}
            "#
        ))
        .bind(query.from)
        .bind(query.to)
        .bind(query.api_id.as_deref())
        .bind(query.application_id.as_deref())
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(key, hits)| (key, u64::try_from(hits).unwrap_or_default()))
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1 FROM api_hits LIMIT 1")
            .fetch_optional(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
