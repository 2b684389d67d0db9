//! PostgreSQL implementation of the API repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use super::invalid_column;
use crate::domain::entities::{Api, LifecycleState, Visibility};
use crate::domain::repositories::ApiRepository;
use crate::error::AppError;

const API_COLUMNS: &str =
    "id, name, version, description, owner_id, visibility, lifecycle_state, created_at, updated_at";

/// PostgreSQL repository for the `apis` table.
pub struct PgApiRepository {
    pool: Arc<PgPool>,
}

impl PgApiRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ApiRow {
    id: String,
    name: Option<String>,
    version: String,
    description: Option<String>,
    owner_id: String,
    visibility: String,
    lifecycle_state: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ApiRow> for Api {
    type Error = AppError;

    fn try_from(row: ApiRow) -> Result<Self, Self::Error> {
        let visibility = Visibility::parse(&row.visibility)
            .ok_or_else(|| invalid_column("apis", "visibility", &row.visibility))?;
        let lifecycle_state = LifecycleState::parse(&row.lifecycle_state)
            .ok_or_else(|| invalid_column("apis", "lifecycle_state", &row.lifecycle_state))?;

        Ok(Api {
            id: row.id,
            name: row.name,
            version: row.version,
            description: row.description,
            owner_id: row.owner_id,
            visibility,
            lifecycle_state,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_apis(rows: Vec<ApiRow>) -> Result<Vec<Api>, AppError> {
    rows.into_iter().map(Api::try_from).collect()
}

#[async_trait]
impl ApiRepository for PgApiRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Api>, AppError> {
        let row = sqlx::query_as::<_, ApiRow>(&format!(
            "SELECT {API_COLUMNS} FROM apis WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Api::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Api>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, ApiRow>(&format!(
            "SELECT {API_COLUMNS} FROM apis WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        into_apis(rows)
    }

    async fn list_published(&self) -> Result<Vec<Api>, AppError> {
        let rows = sqlx::query_as::<_, ApiRow>(&format!(
            r#"
            SELECT {API_COLUMNS}
            FROM apis
            WHERE lifecycle_state = 'PUBLISHED'
            ORDER BY name COLLATE "C" ASC NULLS LAST, id ASC
            "#
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        into_apis(rows)
    }

    async fn count_published(&self) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM apis WHERE lifecycle_state = 'PUBLISHED'")
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }
}
