//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod apis;
pub mod applications;
pub mod health;

pub use apis::{api_subscribers_handler, get_api_handler, list_apis_handler};
pub use applications::{
    application_subscribers_handler, get_application_handler, list_applications_handler,
};
pub use health::health_handler;
