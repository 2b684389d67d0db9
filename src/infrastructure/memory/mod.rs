//! In-process storage backend.
//!
//! Used for local development, demos and integration tests. A single
//! [`MemoryStore`] implements every repository trait.

mod store;

pub use store::{Hit, MemoryStore, Seed, SeedError};
