//! PostgreSQL implementation of the application repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use super::invalid_column;
use crate::domain::entities::{Application, ApplicationStatus};
use crate::domain::repositories::ApplicationRepository;
use crate::error::AppError;

const APPLICATION_COLUMNS: &str = "id, name, description, owner_id, status, created_at, updated_at";

/// PostgreSQL repository for the `applications` table.
pub struct PgApplicationRepository {
    pool: Arc<PgPool>,
}

impl PgApplicationRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ApplicationRow {
    id: String,
    name: Option<String>,
    description: Option<String>,
    owner_id: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = AppError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let status = ApplicationStatus::parse(&row.status)
            .ok_or_else(|| invalid_column("applications", "status", &row.status))?;

        Ok(Application {
            id: row.id,
            name: row.name,
            description: row.description,
            owner_id: row.owner_id,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Application>, AppError> {
        // Archived applications are returned too; access rules live in the entity.
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Application::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Application>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Application::try_from).collect()
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Application>, AppError> {
        let rows = sqlx::query_as::<_, ApplicationRow>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM applications
            WHERE owner_id = $1 AND status = 'ACTIVE'
            ORDER BY name COLLATE "C" ASC NULLS LAST, id ASC
            "#
        ))
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Application::try_from).collect()
    }
}
