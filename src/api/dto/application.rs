//! DTOs for application resources.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{Application, ApplicationStatus};

/// Application as exposed by the portal.
#[derive(Debug, Serialize)]
pub struct ApplicationItem {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Application> for ApplicationItem {
    fn from(application: Application) -> Self {
        Self {
            id: application.id,
            name: application.name,
            description: application.description,
            owner: application.owner_id,
            status: application.status,
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}
