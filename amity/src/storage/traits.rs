//! Trait definitions for storage and collaborator boundaries
//!
//! These traits define the seams between the friendship engine and its
//! infrastructure. Backend implementations live behind them; the engine only
//! ever issues one lookup followed by at most one write per operation.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::models::{Relationship, RelationshipUpdate};
use crate::storage::errors::StoreError;
use crate::storage::filters::RelationshipFilter;

/// Base trait for all store implementations
#[async_trait]
pub trait BaseStore: Send + Sync + 'static + Debug {
    /// Check if the store is healthy and available
    async fn health_check(&self) -> Result<bool, StoreError>;

    /// Clear all data in the store
    async fn clear(&self) -> Result<(), StoreError>;

    /// Get metadata about the store
    async fn get_metadata(&self) -> Result<serde_json::Value, StoreError>;

    /// Close connections and release resources
    async fn close(&self) -> Result<(), StoreError>;
}

/// Persistence contract for friendship records.
///
/// Uniqueness over the unordered pair is the store's responsibility: `create`
/// must reject a second record for a pair that already has one, in either
/// direction, with [`StoreError::Conflict`]. The engine checks before
/// creating, but racing creations are decided here.
#[async_trait]
pub trait RelationshipStore: BaseStore {
    /// Return the record for the unordered pair {x, y}, or `None`
    async fn find_pair(&self, x: &str, y: &str) -> Result<Option<Relationship>, StoreError>;

    /// Insert a new record. Rejects an existing pair with `Conflict`
    async fn create(&self, relationship: Relationship) -> Result<Relationship, StoreError>;

    /// Apply a partial update to the record with the given id
    async fn update_fields(
        &self,
        id: &str,
        update: RelationshipUpdate,
    ) -> Result<Relationship, StoreError>;

    /// Delete the record with the given id. Returns whether a record was removed
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// Recipient ids of records where the entity is the requester, filtered
    async fn ids_where_requester_is(
        &self,
        entity_id: &str,
        filter: RelationshipFilter,
    ) -> Result<Vec<String>, StoreError>;

    /// Requester ids of records where the entity is the recipient, filtered
    async fn ids_where_recipient_is(
        &self,
        entity_id: &str,
        filter: RelationshipFilter,
    ) -> Result<Vec<String>, StoreError>;

    /// Count records where the entity is the requester, filtered
    async fn count_where_requester_is(
        &self,
        entity_id: &str,
        filter: RelationshipFilter,
    ) -> Result<usize, StoreError>;

    /// Count records where the entity is the recipient, filtered
    async fn count_where_recipient_is(
        &self,
        entity_id: &str,
        filter: RelationshipFilter,
    ) -> Result<usize, StoreError>;

    /// Apply a partial update to every record where the entity is the
    /// recipient. Returns the number of records touched
    async fn bulk_update_where_recipient_is(
        &self,
        entity_id: &str,
        update: RelationshipUpdate,
    ) -> Result<u64, StoreError>;
}

/// Registration-status collaborator supplied by the entity system.
///
/// Consulted only when a record is created (to snapshot the recipient's
/// status) and by callers triggering a bulk refresh.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationDirectory: Send + Sync {
    /// Whether the entity is currently a registered user of the system
    async fn is_registered(&self, entity_id: &str) -> bool;
}
