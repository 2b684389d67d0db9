//! DTOs for API resources.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{Api, Visibility};

/// API as exposed by the portal.
#[derive(Debug, Serialize)]
pub struct ApiItem {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner: String,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Api> for ApiItem {
    fn from(api: Api) -> Self {
        Self {
            id: api.id,
            name: api.name,
            version: api.version,
            description: api.description,
            owner: api.owner_id,
            visibility: api.visibility,
            created_at: api.created_at,
            updated_at: api.updated_at,
        }
    }
}
