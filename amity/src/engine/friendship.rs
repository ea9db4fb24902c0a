//! Friendship state transitions
//!
//! Every operation here follows the same shape: locate the record for the
//! unordered pair, validate the requested transition against its current
//! state, then issue a single create/update/delete against the store.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::models::{Relationship, RelationshipUpdate};
use crate::storage::errors::StoreError;
use crate::storage::traits::{RegistrationDirectory, RelationshipStore};
use crate::{AmityError, Result};

/// Manages friendships between entities on top of a relationship store.
///
/// The engine is stateless; all state lives in the records it reads and
/// writes. Collaborators are injected at construction.
pub struct FriendshipEngine {
    pub(crate) store: Arc<dyn RelationshipStore>,
    pub(crate) directory: Arc<dyn RegistrationDirectory>,
    pub(crate) config: EngineConfig,
}

impl FriendshipEngine {
    /// Create an engine with the default configuration
    pub fn new(
        store: Arc<dyn RelationshipStore>,
        directory: Arc<dyn RegistrationDirectory>,
    ) -> Self {
        Self::with_config(store, directory, EngineConfig::default())
    }

    /// Create an engine with an explicit configuration
    pub fn with_config(
        store: Arc<dyn RelationshipStore>,
        directory: Arc<dyn RegistrationDirectory>,
        config: EngineConfig,
    ) -> Self {
        info!(
            "🤝 FriendshipEngine initialized (table: {}, invite platform: {})",
            config.table, config.invite_platform
        );
        Self {
            store,
            directory,
            config,
        }
    }

    /// The engine's configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Access to the underlying relationship store
    pub fn store(&self) -> &Arc<dyn RelationshipStore> {
        &self.store
    }

    /// Returns the record for the unordered pair {a, b}, or `None`.
    ///
    /// Underlies every other operation; the store answers for both
    /// directions of the pair.
    pub async fn find_relationship(&self, a: &str, b: &str) -> Result<Option<Relationship>> {
        Ok(self.store.find_pair(a, b).await?)
    }

    /// Invite `recipient` to become a friend of `requester`.
    ///
    /// Creates a pending record tagged with the configured invite platform.
    /// Fails with [`AmityError::SelfReference`] when the two identities are
    /// equal and [`AmityError::AlreadyConnected`] when the pair already has a
    /// record, in any state.
    pub async fn invite(&self, requester: &str, recipient: &str) -> Result<Relationship> {
        self.ensure_pair_free(requester, recipient).await?;

        let registered = self.directory.is_registered(recipient).await;
        let relationship = Relationship::builder(requester, recipient)
            .platform(self.config.invite_platform.clone())
            .pending(true)
            .friend_registered(registered)
            .build();

        let created = self.persist_new(relationship).await?;
        info!("🤝 {} invited {} (ID: {})", requester, recipient, created.id);
        Ok(created)
    }

    /// Record an already-established external connection directly.
    ///
    /// The record is created accepted (`pending = false`); no approval step
    /// follows. `platform` names the external origin and
    /// `mutual_friends_count` is carried as passive metadata.
    pub async fn add_friend(
        &self,
        requester: &str,
        recipient: &str,
        platform: &str,
        mutual_friends_count: u32,
    ) -> Result<Relationship> {
        self.ensure_pair_free(requester, recipient).await?;

        let registered = self.directory.is_registered(recipient).await;
        let relationship = Relationship::builder(requester, recipient)
            .platform(platform)
            .pending(false)
            .mutual_friends_count(mutual_friends_count)
            .friend_registered(registered)
            .build();

        let created = self.persist_new(relationship).await?;
        info!(
            "🤝 {} added {} as a friend via {} (ID: {})",
            requester, recipient, platform, created.id
        );
        Ok(created)
    }

    /// Record an existing Facebook connection
    pub async fn add_facebook_friend(
        &self,
        requester: &str,
        recipient: &str,
        mutual_friends_count: u32,
    ) -> Result<Relationship> {
        self.add_friend(requester, recipient, "facebook", mutual_friends_count)
            .await
    }

    /// Approve the invitation `entity` received from `other`.
    ///
    /// Only the recipient of the record may approve; the inviter is rejected
    /// with [`AmityError::NotRecipient`] regardless of the current pending
    /// value. Re-approving an already-accepted relationship succeeds.
    pub async fn approve(&self, entity: &str, other: &str) -> Result<Relationship> {
        let relationship = self.require_relationship(entity, other).await?;

        if relationship.requester_id == entity {
            debug!("{} attempted to approve its own invitation to {}", entity, other);
            return Err(AmityError::NotRecipient {
                entity: entity.to_string(),
            });
        }

        let updated = self
            .store
            .update_fields(&relationship.id, RelationshipUpdate::accept())
            .await?;
        info!("🤝 {} approved the invitation from {}", entity, other);
        Ok(updated)
    }

    /// Delete the relationship between the two entities entirely.
    ///
    /// Removal is unconditional once a record exists: pending and blocked
    /// relationships are removed the same way. Any relationship view a
    /// caller holds for either entity is stale afterwards.
    pub async fn remove_friendship(&self, entity: &str, other: &str) -> Result<()> {
        let relationship = self.require_relationship(entity, other).await?;

        let removed = self.store.delete(&relationship.id).await?;
        if !removed {
            // The record vanished between lookup and delete; the store answer wins.
            return Err(AmityError::NoSuchRelationship {
                a: entity.to_string(),
                b: other.to_string(),
            });
        }
        info!("🤝 Removed the relationship between {} and {}", entity, other);
        Ok(())
    }

    /// Block the relationship between `entity` and `other`.
    ///
    /// Allowed while no block is in place or when `entity` is already the
    /// blocker; a pair blocked by the other party rejects with
    /// [`AmityError::BlockNotPermitted`].
    pub async fn block_friend(&self, entity: &str, other: &str) -> Result<Relationship> {
        let relationship = self.require_relationship(entity, other).await?;

        if !relationship.can_block(entity) {
            return Err(AmityError::BlockNotPermitted {
                entity: entity.to_string(),
            });
        }

        let updated = self
            .store
            .update_fields(&relationship.id, RelationshipUpdate::block(entity))
            .await?;
        info!("🤝 {} blocked the relationship with {}", entity, other);
        Ok(updated)
    }

    /// Lift the block `entity` holds on the relationship with `other`.
    ///
    /// Only the blocker may unblock; anyone else rejects with
    /// [`AmityError::UnblockNotPermitted`].
    pub async fn unblock_friend(&self, entity: &str, other: &str) -> Result<Relationship> {
        let relationship = self.require_relationship(entity, other).await?;

        if !relationship.can_unblock(entity) {
            return Err(AmityError::UnblockNotPermitted {
                entity: entity.to_string(),
            });
        }

        let updated = self
            .store
            .update_fields(&relationship.id, RelationshipUpdate::unblock())
            .await?;
        info!("🤝 {} unblocked the relationship with {}", entity, other);
        Ok(updated)
    }

    /// Mark `entity` as registered on every record where it is the
    /// recipient. Returns the number of records refreshed.
    pub async fn refresh_registration(&self, entity: &str) -> Result<u64> {
        let touched = self
            .store
            .bulk_update_where_recipient_is(entity, RelationshipUpdate::mark_registered())
            .await?;
        debug!("Refreshed registration status of {} on {} record(s)", entity, touched);
        Ok(touched)
    }

    /// Reject self-pairs and pairs that already have a record
    async fn ensure_pair_free(&self, requester: &str, recipient: &str) -> Result<()> {
        if requester == recipient {
            return Err(AmityError::SelfReference);
        }
        if self.find_relationship(requester, recipient).await?.is_some() {
            return Err(AmityError::AlreadyConnected {
                requester: requester.to_string(),
                recipient: recipient.to_string(),
            });
        }
        Ok(())
    }

    /// Create a record, treating a store-level uniqueness conflict as a
    /// lost race on the pair
    async fn persist_new(&self, relationship: Relationship) -> Result<Relationship> {
        let requester = relationship.requester_id.clone();
        let recipient = relationship.recipient_id.clone();
        match self.store.create(relationship).await {
            Ok(created) => Ok(created),
            Err(StoreError::Conflict(_)) => Err(AmityError::AlreadyConnected {
                requester,
                recipient,
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// Look up the pair and fail with `NoSuchRelationship` when absent
    async fn require_relationship(&self, entity: &str, other: &str) -> Result<Relationship> {
        self.find_relationship(entity, other)
            .await?
            .ok_or_else(|| AmityError::NoSuchRelationship {
                a: entity.to_string(),
                b: other.to_string(),
            })
    }
}
