//! Ordering of subscription peers by usage.
//!
//! Given the subscriptions of an API (or of an application), the ranker
//! returns each subscribed peer once, most used first. All I/O happens before
//! the call: peers are resolved through `peer_lookup`, access through `access`.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::domain::entities::{HitCounts, Peer, ReferenceType, SubscriptionRecord};

/// Ranks the peers referenced by `subscriptions`.
///
/// 1. Only plain [`ReferenceType::Api`] records are considered.
/// 2. Referenced ids are de-duplicated, keeping first-seen order.
/// 3. Ids that `peer_lookup` cannot resolve are dropped.
/// 4. When `access` is given, ids it rejects are dropped.
/// 5. The survivors are stably sorted by hits (descending, missing = 0), then
///    by name (ascending, case-sensitive, unnamed peers last).
///
/// Never fails; an empty input yields an empty list.
///
/// # Examples
///
/// ```ignore
/// let ranked = rank_subscribers(
///     &records,
///     |id| applications.get(id).cloned(),
///     &hits,
///     None::<fn(&str) -> bool>,
/// );
/// ```
pub fn rank_subscribers<P, L, A>(
    subscriptions: &[SubscriptionRecord],
    peer_lookup: L,
    hit_counts: &HitCounts,
    access: Option<A>,
) -> Vec<P>
where
    P: Peer,
    L: Fn(&str) -> Option<P>,
    A: Fn(&str) -> bool,
{
    let mut seen = HashSet::new();
    let mut peers: Vec<P> = subscriptions
        .iter()
        .filter(|record| record.reference_type == ReferenceType::Api)
        .map(|record| record.reference_id.as_str())
        .filter(|id| seen.insert(*id))
        .filter(|id| access.as_ref().is_none_or(|allowed| allowed(*id)))
        .filter_map(|id| peer_lookup(id))
        .collect();

    peers.sort_by(|a, b| compare_peers(a, b, hit_counts));
    peers
}

fn hits_of(peer: &impl Peer, hit_counts: &HitCounts) -> u64 {
    hit_counts.get(peer.id()).copied().unwrap_or(0)
}

fn compare_peers<P: Peer>(a: &P, b: &P, hit_counts: &HitCounts) -> Ordering {
    hits_of(b, hit_counts)
        .cmp(&hits_of(a, hit_counts))
        .then_with(|| match (a.name(), b.name()) {
            (Some(left), Some(right)) => left.cmp(right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}
