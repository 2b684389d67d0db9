//! Business logic services for the application layer.

pub mod api_service;
pub mod application_service;
pub mod subscriber_service;

pub use api_service::ApiService;
pub use application_service::ApplicationService;
pub use subscriber_service::SubscriberService;
