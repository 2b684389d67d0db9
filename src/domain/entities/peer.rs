//! Common view over the two sides of a subscription.

use std::collections::HashMap;

/// A ranking candidate: an [`super::Application`] when listing the
/// subscribers of an API, or an [`super::Api`] when listing what an
/// application subscribes to.
pub trait Peer {
    fn id(&self) -> &str;

    /// Display name; `None` sorts after every named peer.
    fn name(&self) -> Option<&str>;

    /// Primary owner of the peer.
    fn owner_id(&self) -> &str;
}

/// Usage hits per peer id over an analytics window.
///
/// Missing entries count as zero.
pub type HitCounts = HashMap<String, u64>;
