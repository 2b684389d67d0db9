//! Domain entity representing a subscription of an application to an API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the subscription's plan is attached to.
///
/// Product subscriptions aggregate several APIs and are never counted as a
/// direct API ↔ application relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferenceType {
    Api,
    ApiProduct,
}

impl ReferenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceType::Api => "API",
            ReferenceType::ApiProduct => "API_PRODUCT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "API" => Some(ReferenceType::Api),
            "API_PRODUCT" => Some(ReferenceType::ApiProduct),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    Pending,
    Accepted,
    Paused,
    Rejected,
    Closed,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Pending => "PENDING",
            SubscriptionStatus::Accepted => "ACCEPTED",
            SubscriptionStatus::Paused => "PAUSED",
            SubscriptionStatus::Rejected => "REJECTED",
            SubscriptionStatus::Closed => "CLOSED",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown subscription status: {0}")]
pub struct UnknownStatus(String);

impl FromStr for SubscriptionStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(SubscriptionStatus::Pending),
            "ACCEPTED" => Ok(SubscriptionStatus::Accepted),
            "PAUSED" => Ok(SubscriptionStatus::Paused),
            "REJECTED" => Ok(SubscriptionStatus::Rejected),
            "CLOSED" => Ok(SubscriptionStatus::Closed),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub api_id: String,
    pub application_id: String,
    pub reference_type: ReferenceType,
    pub status: SubscriptionStatus,
    pub created_at: DateTime<Utc>,
}

/// One side of a subscription, as seen by the subscriber ranking.
///
/// `reference_id` is the peer being ranked, `owner_id` the entity whose
/// subscribers are listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRecord {
    pub reference_id: String,
    pub reference_type: ReferenceType,
    pub owner_id: String,
}

impl Subscription {
    /// Record ranking the subscribing application of an API.
    pub fn toward_application(&self) -> SubscriptionRecord {
        SubscriptionRecord {
            reference_id: self.application_id.clone(),
            reference_type: self.reference_type,
            owner_id: self.api_id.clone(),
        }
    }

    /// Record ranking the subscribed API of an application.
    pub fn toward_api(&self) -> SubscriptionRecord {
        SubscriptionRecord {
            reference_id: self.api_id.clone(),
            reference_type: self.reference_type,
            owner_id: self.application_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription() -> Subscription {
        Subscription {
            id: "sub-1".to_string(),
            api_id: "api-1".to_string(),
            application_id: "app-1".to_string(),
            reference_type: ReferenceType::Api,
            status: SubscriptionStatus::Accepted,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_toward_application() {
        let record = subscription().toward_application();
        assert_eq!(record.reference_id, "app-1");
        assert_eq!(record.owner_id, "api-1");
        assert_eq!(record.reference_type, ReferenceType::Api);
    }

    #[test]
    fn test_toward_api() {
        let record = subscription().toward_api();
        assert_eq!(record.reference_id, "api-1");
        assert_eq!(record.owner_id, "app-1");
    }

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!(
            "accepted".parse::<SubscriptionStatus>().unwrap(),
            SubscriptionStatus::Accepted
        );
        assert_eq!(
            " PAUSED ".parse::<SubscriptionStatus>().unwrap(),
            SubscriptionStatus::Paused
        );
        assert!("ARCHIVED".parse::<SubscriptionStatus>().is_err());
    }

    #[test]
    fn test_reference_type_parse() {
        assert_eq!(ReferenceType::parse("API_PRODUCT"), Some(ReferenceType::ApiProduct));
        assert_eq!(ReferenceType::parse("PRODUCT"), None);
    }
}
