//! Domain entity representing a consumer application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Peer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Active,
    Archived,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Active => "ACTIVE",
            ApplicationStatus::Archived => "ARCHIVED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ACTIVE" => Some(ApplicationStatus::Active),
            "ARCHIVED" => Some(ApplicationStatus::Archived),
            _ => None,
        }
    }
}

/// An application registered by a portal user to consume APIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner_id: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Archived applications are not accessible, even to their owner.
    pub fn is_accessible_by(&self, user_id: Option<&str>) -> bool {
        self.status == ApplicationStatus::Active && user_id == Some(self.owner_id.as_str())
    }
}

impl Peer for Application {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn owner_id(&self) -> &str {
        &self.owner_id
    }
}
