//! Application layer services implementing the portal use cases.
//!
//! Services consume repository traits, apply visibility and access rules, and
//! hand plain entities back to the HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::api_service::ApiService`] - API discovery
//! - [`services::application_service::ApplicationService`] - Caller's applications
//! - [`services::subscriber_service::SubscriberService`] - Subscribers ranked by usage

pub mod services;
