//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete storage backends.
//!
//! # Modules
//!
//! - [`memory`] - In-process store, optionally seeded from a JSON file
//! - [`persistence`] - PostgreSQL repository implementations

pub mod memory;
pub mod persistence;
