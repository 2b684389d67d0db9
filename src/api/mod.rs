//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into service calls and formats
//! responses according to the portal's listing and error contracts.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`extract`] - Caller identity and request URL extractors
//! - [`handlers`] - HTTP request handlers
//! - [`listing`] - Paginated listing envelope
//! - [`middleware`] - Identification and tracing middleware
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod listing;
pub mod middleware;
pub mod routes;
