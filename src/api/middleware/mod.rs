//! HTTP middleware for request processing.
//!
//! Provides caller identification and observability middleware.

pub mod identity;
pub mod tracing;
