//! Core domain entities representing the portal data model.
//!
//! Entities are plain data structures; visibility and access rules that only
//! depend on the entity itself live next to it.
//!
//! # Entity Types
//!
//! - [`Api`] - An API listed in the portal
//! - [`Application`] - A consumer application owned by a portal user
//! - [`Subscription`] - A plan subscription linking an application to an API
//!
//! [`Peer`] abstracts over `Api` and `Application` for subscriber ranking.

pub mod api;
pub mod application;
pub mod peer;
pub mod subscription;

pub use api::{Api, LifecycleState, Visibility};
pub use application::{Application, ApplicationStatus};
pub use peer::{HitCounts, Peer};
pub use subscription::{ReferenceType, Subscription, SubscriptionRecord, SubscriptionStatus};
