//! Derived membership queries over friendship records
//!
//! All queries here are read-only compositions of store lookups: each pair
//! has exactly one record, so a symmetric answer is assembled from two
//! independent directional reads (outgoing and incoming) combined locally.
//! Absence of a relationship is never an error for a query — it simply
//! contributes nothing to the result set. Callers must not assume the
//! combined view is atomic against concurrent mutation.

use std::collections::HashSet;

use futures::try_join;

use super::FriendshipEngine;
use crate::Result;
use crate::storage::filters::helpers;

impl FriendshipEngine {
    /// The set of entities `entity` holds an accepted, unblocked
    /// relationship with, from either direction.
    pub async fn friends(&self, entity: &str) -> Result<HashSet<String>> {
        let (outgoing, incoming) = try_join!(
            self.store.ids_where_requester_is(entity, helpers::accepted()),
            self.store.ids_where_recipient_is(entity, helpers::accepted()),
        )?;
        Ok(outgoing.into_iter().chain(incoming).collect())
    }

    /// Number of friends of `entity`, computed as two directional counts
    /// without materializing records. The directional sets are disjoint by
    /// construction (one record per pair), so this equals `friends().len()`.
    pub async fn total_friends(&self, entity: &str) -> Result<usize> {
        let (outgoing, incoming) = try_join!(
            self.store.count_where_requester_is(entity, helpers::accepted()),
            self.store.count_where_recipient_is(entity, helpers::accepted()),
        )?;
        Ok(outgoing + incoming)
    }

    /// Entities `entity` has invited whose invitation is still pending
    /// and unblocked
    pub async fn pending_invited(&self, entity: &str) -> Result<Vec<String>> {
        Ok(self
            .store
            .ids_where_requester_is(entity, helpers::pending())
            .await?)
    }

    /// Entities whose pending, unblocked invitation `entity` has received
    pub async fn pending_invited_by(&self, entity: &str) -> Result<Vec<String>> {
        Ok(self
            .store
            .ids_where_recipient_is(entity, helpers::pending())
            .await?)
    }

    /// The set of entities in a blocked relationship with `entity`: those
    /// `entity` has blocked, and those blocking `entity`.
    ///
    /// The `id != entity` condition is the explicit self-identity exclusion
    /// applied to each directional read.
    pub async fn blocked_friends(&self, entity: &str) -> Result<HashSet<String>> {
        let (blockades_out, blockades_in, blocked_by_out, blocked_by_in) = try_join!(
            self.store
                .ids_where_requester_is(entity, helpers::blocked_by(entity)),
            self.store
                .ids_where_recipient_is(entity, helpers::blocked_by(entity)),
            self.store
                .ids_where_requester_is(entity, helpers::blocked_by_other(entity)),
            self.store
                .ids_where_recipient_is(entity, helpers::blocked_by_other(entity)),
        )?;

        Ok(blockades_out
            .into_iter()
            .chain(blockades_in)
            .chain(blocked_by_out)
            .chain(blocked_by_in)
            .filter(|id| id != entity)
            .collect())
    }

    /// Number of blocked relationships of `entity`, as the sum of the
    /// directional blocked counts
    pub async fn total_blocked_friends(&self, entity: &str) -> Result<usize> {
        let (blockades_out, blockades_in, blocked_by_out, blocked_by_in) = try_join!(
            self.store
                .count_where_requester_is(entity, helpers::blocked_by(entity)),
            self.store
                .count_where_recipient_is(entity, helpers::blocked_by(entity)),
            self.store
                .count_where_requester_is(entity, helpers::blocked_by_other(entity)),
            self.store
                .count_where_recipient_is(entity, helpers::blocked_by_other(entity)),
        )?;
        Ok(blockades_out + blockades_in + blocked_by_out + blocked_by_in)
    }

    /// Whether `other` is a member of `entity`'s blocked set
    pub async fn is_blocked_friend(&self, entity: &str, other: &str) -> Result<bool> {
        Ok(self.blocked_friends(entity).await?.contains(other))
    }

    /// Whether `other` is a member of `entity`'s friends set
    pub async fn is_friend_with(&self, entity: &str, other: &str) -> Result<bool> {
        Ok(self.friends(entity).await?.contains(other))
    }

    /// Whether any record exists between the two entities, regardless of
    /// its state
    pub async fn is_connected_with(&self, entity: &str, other: &str) -> Result<bool> {
        Ok(self.find_relationship(entity, other).await?.is_some())
    }

    /// Whether `entity` received its relationship record from `other`
    /// (i.e. `other` is the requester)
    pub async fn is_invited_by(&self, entity: &str, other: &str) -> Result<bool> {
        Ok(self
            .find_relationship(entity, other)
            .await?
            .is_some_and(|r| r.requester_id == other))
    }

    /// Whether `entity` created the relationship record with `other`
    /// (i.e. `other` is the recipient)
    pub async fn has_invited(&self, entity: &str, other: &str) -> Result<bool> {
        Ok(self
            .find_relationship(entity, other)
            .await?
            .is_some_and(|r| r.recipient_id == other))
    }

    /// The set of entities that are friends with both `entity` and `other`.
    /// Symmetric in its two arguments.
    pub async fn common_friends_with(&self, entity: &str, other: &str) -> Result<HashSet<String>> {
        let (mine, theirs) = try_join!(self.friends(entity), self.friends(other))?;
        Ok(mine.intersection(&theirs).cloned().collect())
    }
}
