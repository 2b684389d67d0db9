//! Domain entity representing a published API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Peer;

/// Who may discover an API in the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "PUBLIC",
            Visibility::Private => "PRIVATE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PUBLIC" => Some(Visibility::Public),
            "PRIVATE" => Some(Visibility::Private),
            _ => None,
        }
    }
}

/// Publication state of an API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleState {
    Published,
    Unpublished,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Published => "PUBLISHED",
            LifecycleState::Unpublished => "UNPUBLISHED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PUBLISHED" => Some(LifecycleState::Published),
            "UNPUBLISHED" => Some(LifecycleState::Unpublished),
            _ => None,
        }
    }
}

/// An API exposed through the gateway and listed in the portal.
///
/// `name` is optional: imported definitions may not carry one, and such APIs
/// sort after named ones in subscriber rankings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Api {
    pub id: String,
    pub name: Option<String>,
    pub version: String,
    pub description: Option<String>,
    pub owner_id: String,
    pub visibility: Visibility,
    pub lifecycle_state: LifecycleState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Api {
    /// Whether the API can be seen by the given caller.
    ///
    /// Unpublished APIs are hidden from everyone; private ones only from
    /// callers other than the primary owner.
    pub fn is_visible_to(&self, user_id: Option<&str>) -> bool {
        if self.lifecycle_state != LifecycleState::Published {
            return false;
        }
        match self.visibility {
            Visibility::Public => true,
            Visibility::Private => user_id == Some(self.owner_id.as_str()),
        }
    }

    pub fn is_owned_by(&self, user_id: Option<&str>) -> bool {
        user_id == Some(self.owner_id.as_str())
    }
}

impl Peer for Api {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn api(visibility: Visibility, lifecycle_state: LifecycleState) -> Api {
        let now = Utc::now();
        Api {
            id: "api-1".to_string(),
            name: Some("Weather".to_string()),
            version: "1.0".to_string(),
            description: None,
            owner_id: "alice".to_string(),
            visibility,
            lifecycle_state,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_public_published_api_visible_to_anonymous() {
        let api = api(Visibility::Public, LifecycleState::Published);
        assert!(api.is_visible_to(None));
        assert!(api.is_visible_to(Some("bob")));
    }

    #[test]
    fn test_private_api_visible_to_owner_only() {
        let api = api(Visibility::Private, LifecycleState::Published);
        assert!(api.is_visible_to(Some("alice")));
        assert!(!api.is_visible_to(Some("bob")));
        assert!(!api.is_visible_to(None));
    }

    #[test]
    fn test_unpublished_api_hidden_from_owner() {
        let api = api(Visibility::Public, LifecycleState::Unpublished);
        assert!(!api.is_visible_to(Some("alice")));
    }

    #[test]
    fn test_enum_round_trip_through_str() {
        assert_eq!(Visibility::parse(Visibility::Private.as_str()), Some(Visibility::Private));
        assert_eq!(
            LifecycleState::parse("PUBLISHED"),
            Some(LifecycleState::Published)
        );
        assert_eq!(Visibility::parse("internal"), None);
    }
}
