//! Utility functions shared across layers.
//!
//! - [`pagination_links`] - Navigation links for paginated listings

pub mod pagination_links;
