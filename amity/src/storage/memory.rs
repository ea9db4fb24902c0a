//! Simple in-memory storage for testing and development

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{Relationship, RelationshipUpdate};
use crate::storage::errors::StoreError;
use crate::storage::filters::RelationshipFilter;
use crate::storage::traits::{BaseStore, RegistrationDirectory, RelationshipStore};

/// In-memory relationship store backed by a `HashMap`.
///
/// Implements the full [`RelationshipStore`] contract, including uniqueness
/// enforcement over the unordered pair, so engine behavior against it matches
/// what a constrained database backend would produce.
#[derive(Debug)]
pub struct MemoryRelationshipStore {
    relationships: RwLock<HashMap<String, Relationship>>,
    table: String,
}

impl MemoryRelationshipStore {
    /// Create a store with the default logical table name
    pub fn new() -> Self {
        Self::with_table("friendships")
    }

    /// Create a store bound to a specific logical table name.
    ///
    /// The name is surfaced in metadata only; it stands in for the
    /// record-table binding a database backend would resolve at construction.
    pub fn with_table<S: Into<String>>(table: S) -> Self {
        Self {
            relationships: RwLock::new(HashMap::new()),
            table: table.into(),
        }
    }

    fn pair_of(relationship: &Relationship, x: &str, y: &str) -> bool {
        (relationship.requester_id == x && relationship.recipient_id == y)
            || (relationship.requester_id == y && relationship.recipient_id == x)
    }
}

impl Default for MemoryRelationshipStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseStore for MemoryRelationshipStore {
    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.relationships.write().await.clear();
        Ok(())
    }

    async fn get_metadata(&self) -> Result<serde_json::Value, StoreError> {
        let count = self.relationships.read().await.len();
        Ok(serde_json::json!({
            "type": "memory_relationship_store",
            "table": self.table,
            "relationship_count": count
        }))
    }

    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl RelationshipStore for MemoryRelationshipStore {
    async fn find_pair(&self, x: &str, y: &str) -> Result<Option<Relationship>, StoreError> {
        let relationships = self.relationships.read().await;
        Ok(relationships
            .values()
            .find(|r| Self::pair_of(r, x, y))
            .cloned())
    }

    async fn create(&self, relationship: Relationship) -> Result<Relationship, StoreError> {
        let mut relationships = self.relationships.write().await;

        if relationships.contains_key(&relationship.id) {
            return Err(StoreError::Conflict(format!(
                "record with ID {} already exists",
                relationship.id
            )));
        }
        if relationships
            .values()
            .any(|r| Self::pair_of(r, &relationship.requester_id, &relationship.recipient_id))
        {
            return Err(StoreError::Conflict(format!(
                "pair {{{}, {}}} already has a record",
                relationship.requester_id, relationship.recipient_id
            )));
        }

        relationships.insert(relationship.id.clone(), relationship.clone());
        Ok(relationship)
    }

    async fn update_fields(
        &self,
        id: &str,
        update: RelationshipUpdate,
    ) -> Result<Relationship, StoreError> {
        let mut relationships = self.relationships.write().await;
        match relationships.get_mut(id) {
            Some(relationship) => {
                update.apply(relationship);
                Ok(relationship.clone())
            }
            None => Err(StoreError::NotFound(format!("no record with ID {}", id))),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut relationships = self.relationships.write().await;
        Ok(relationships.remove(id).is_some())
    }

    async fn ids_where_requester_is(
        &self,
        entity_id: &str,
        filter: RelationshipFilter,
    ) -> Result<Vec<String>, StoreError> {
        let relationships = self.relationships.read().await;
        Ok(relationships
            .values()
            .filter(|r| r.requester_id == entity_id && filter.matches(r))
            .map(|r| r.recipient_id.clone())
            .collect())
    }

    async fn ids_where_recipient_is(
        &self,
        entity_id: &str,
        filter: RelationshipFilter,
    ) -> Result<Vec<String>, StoreError> {
        let relationships = self.relationships.read().await;
        Ok(relationships
            .values()
            .filter(|r| r.recipient_id == entity_id && filter.matches(r))
            .map(|r| r.requester_id.clone())
            .collect())
    }

    async fn count_where_requester_is(
        &self,
        entity_id: &str,
        filter: RelationshipFilter,
    ) -> Result<usize, StoreError> {
        let relationships = self.relationships.read().await;
        Ok(relationships
            .values()
            .filter(|r| r.requester_id == entity_id && filter.matches(r))
            .count())
    }

    async fn count_where_recipient_is(
        &self,
        entity_id: &str,
        filter: RelationshipFilter,
    ) -> Result<usize, StoreError> {
        let relationships = self.relationships.read().await;
        Ok(relationships
            .values()
            .filter(|r| r.recipient_id == entity_id && filter.matches(r))
            .count())
    }

    async fn bulk_update_where_recipient_is(
        &self,
        entity_id: &str,
        update: RelationshipUpdate,
    ) -> Result<u64, StoreError> {
        let mut relationships = self.relationships.write().await;
        let mut touched = 0u64;
        for relationship in relationships.values_mut() {
            if relationship.recipient_id == entity_id {
                update.apply(relationship);
                touched += 1;
            }
        }
        Ok(touched)
    }
}

/// In-memory registration directory backed by a `HashSet`.
///
/// Entities are unregistered until explicitly added.
#[derive(Debug, Default)]
pub struct MemoryRegistrationDirectory {
    registered: RwLock<HashSet<String>>,
}

impl MemoryRegistrationDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an entity as registered
    pub async fn register<S: Into<String>>(&self, entity_id: S) {
        self.registered.write().await.insert(entity_id.into());
    }

    /// Remove an entity's registration
    pub async fn unregister(&self, entity_id: &str) {
        self.registered.write().await.remove(entity_id);
    }
}

#[async_trait]
impl RegistrationDirectory for MemoryRegistrationDirectory {
    async fn is_registered(&self, entity_id: &str) -> bool {
        self.registered.read().await.contains(entity_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find_pair_both_directions() {
        let store = MemoryRelationshipStore::new();
        let created = store
            .create(Relationship::new("alice", "bob"))
            .await
            .expect("create failed");

        let forward = store.find_pair("alice", "bob").await.unwrap();
        let backward = store.find_pair("bob", "alice").await.unwrap();
        assert_eq!(forward.as_ref().map(|r| r.id.as_str()), Some(created.id.as_str()));
        assert_eq!(backward.as_ref().map(|r| r.id.as_str()), Some(created.id.as_str()));
        assert!(store.find_pair("alice", "carol").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_pair_in_either_direction() {
        let store = MemoryRelationshipStore::new();
        store.create(Relationship::new("alice", "bob")).await.unwrap();

        let same = store.create(Relationship::new("alice", "bob")).await;
        let reversed = store.create(Relationship::new("bob", "alice")).await;
        assert!(matches!(same, Err(StoreError::Conflict(_))));
        assert!(matches!(reversed, Err(StoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_fields_missing_record() {
        let store = MemoryRelationshipStore::new();
        let result = store.update_fields("nope", RelationshipUpdate::accept()).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_reports_presence() {
        let store = MemoryRelationshipStore::new();
        let created = store.create(Relationship::new("alice", "bob")).await.unwrap();

        assert!(store.delete(&created.id).await.unwrap());
        assert!(!store.delete(&created.id).await.unwrap());
        assert!(store.find_pair("alice", "bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_directional_queries_and_counts() {
        use crate::storage::filters::helpers;

        let store = MemoryRelationshipStore::new();
        store
            .create(Relationship::builder("alice", "bob").pending(false).build())
            .await
            .unwrap();
        store
            .create(Relationship::builder("carol", "alice").pending(false).build())
            .await
            .unwrap();
        store.create(Relationship::new("alice", "dave")).await.unwrap();

        let outgoing = store
            .ids_where_requester_is("alice", helpers::accepted())
            .await
            .unwrap();
        let incoming = store
            .ids_where_recipient_is("alice", helpers::accepted())
            .await
            .unwrap();
        assert_eq!(outgoing, vec!["bob".to_string()]);
        assert_eq!(incoming, vec!["carol".to_string()]);

        assert_eq!(
            store.count_where_requester_is("alice", helpers::any()).await.unwrap(),
            2
        );
        assert_eq!(
            store.count_where_requester_is("alice", helpers::pending()).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_bulk_update_targets_recipient_records_only() {
        let store = MemoryRelationshipStore::new();
        store.create(Relationship::new("alice", "bob")).await.unwrap();
        store.create(Relationship::new("carol", "bob")).await.unwrap();
        store.create(Relationship::new("bob", "dave")).await.unwrap();

        let touched = store
            .bulk_update_where_recipient_is("bob", RelationshipUpdate::mark_registered())
            .await
            .unwrap();
        assert_eq!(touched, 2);

        let alice_bob = store.find_pair("alice", "bob").await.unwrap().unwrap();
        let bob_dave = store.find_pair("bob", "dave").await.unwrap().unwrap();
        assert!(alice_bob.friend_registered);
        assert!(!bob_dave.friend_registered);
    }

    #[tokio::test]
    async fn test_metadata_reports_table_and_count() {
        let store = MemoryRelationshipStore::with_table("social_links");
        store.create(Relationship::new("alice", "bob")).await.unwrap();

        let metadata = store.get_metadata().await.unwrap();
        assert_eq!(metadata["type"], "memory_relationship_store");
        assert_eq!(metadata["table"], "social_links");
        assert_eq!(metadata["relationship_count"], 1);
    }

    #[tokio::test]
    async fn test_registration_directory() {
        let directory = MemoryRegistrationDirectory::new();
        assert!(!directory.is_registered("alice").await);

        directory.register("alice").await;
        assert!(directory.is_registered("alice").await);

        directory.unregister("alice").await;
        assert!(!directory.is_registered("alice").await);
    }
}
