//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence` (PostgreSQL)
//!   and `crate::infrastructure::memory` (in-process)
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`ApiRepository`] - API lookups
//! - [`ApplicationRepository`] - Application lookups
//! - [`SubscriptionRepository`] - Subscription searches
//! - [`AnalyticsRepository`] - Hit counts for subscriber ranking

pub mod analytics_repository;
pub mod api_repository;
pub mod application_repository;
pub mod subscription_repository;

pub use analytics_repository::{AnalyticsRepository, HitsField, HitsQuery};
pub use api_repository::ApiRepository;
pub use application_repository::ApplicationRepository;
pub use subscription_repository::{SubscriptionQuery, SubscriptionRepository};

#[cfg(test)]
pub use analytics_repository::MockAnalyticsRepository;
#[cfg(test)]
pub use api_repository::MockApiRepository;
#[cfg(test)]
pub use application_repository::MockApplicationRepository;
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
