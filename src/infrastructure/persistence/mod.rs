//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries. Enumerations are stored as their upper-case names and converted
//! back when rows are mapped to entities.
//!
//! # Repositories
//!
//! - [`PgApiRepository`] - API lookups
//! - [`PgApplicationRepository`] - Application lookups
//! - [`PgSubscriptionRepository`] - Subscription searches
//! - [`PgAnalyticsRepository`] - Hit aggregation over `api_hits`

pub mod pg_analytics_repository;
pub mod pg_api_repository;
pub mod pg_application_repository;
pub mod pg_subscription_repository;

pub use pg_analytics_repository::PgAnalyticsRepository;
pub use pg_api_repository::PgApiRepository;
pub use pg_application_repository::PgApplicationRepository;
pub use pg_subscription_repository::PgSubscriptionRepository;

use crate::error::AppError;
use serde_json::json;

/// Error for a stored value that does not map to any known variant.
pub(crate) fn invalid_column(table: &str, column: &str, value: &str) -> AppError {
    tracing::error!(table, column, value, "Unexpected value in database column");
    AppError::internal(
        "Database contains an unexpected value",
        json!({ "table": table, "column": column }),
    )
}
