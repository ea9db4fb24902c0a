//! Relationship model representing one potential or actual connection
//! between exactly two distinct entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A friendship record between two entities.
///
/// Exactly one record exists per unordered pair of entities; the record is
/// directional only in the sense that it remembers who created it
/// (`requester_id`) and who received it (`recipient_id`). Membership queries
/// interpret the record symmetrically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Relationship {
    /// Unique identifier for the record
    pub id: String,

    /// Entity that created the record
    pub requester_id: String,

    /// The other entity. Always distinct from `requester_id`
    pub recipient_id: String,

    /// `true` while the invitation awaits acceptance
    pub pending: bool,

    /// Identity of the blocking party, when the pair is blocked.
    /// Must equal one of the two parties when set
    pub blocker_id: Option<String>,

    /// Opaque tag describing the connection's origin (e.g. "facebook", "manual")
    pub platform: String,

    /// Passive metadata supplied by the caller at creation
    pub mutual_friends_count: u32,

    /// Snapshot of whether the recipient was a registered entity at creation
    /// time; refreshable in bulk later
    pub friend_registered: bool,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last updated
    pub updated_at: DateTime<Utc>,
}

impl Relationship {
    /// Create a new pending relationship with an auto-generated UUID
    pub fn new<S: Into<String>>(requester_id: S, recipient_id: S) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            requester_id: requester_id.into(),
            recipient_id: recipient_id.into(),
            pending: true,
            blocker_id: None,
            platform: "manual".to_string(),
            mutual_friends_count: 0,
            friend_registered: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a builder for more complex record creation
    pub fn builder<S: Into<String>>(requester_id: S, recipient_id: S) -> RelationshipBuilder {
        RelationshipBuilder::new(requester_id, recipient_id)
    }

    /// Check if the given entity is one of the record's two parties
    pub fn involves(&self, entity_id: &str) -> bool {
        self.requester_id == entity_id || self.recipient_id == entity_id
    }

    /// The party on the other side of the record from `entity_id`,
    /// or `None` when the entity is not involved at all
    pub fn other_party(&self, entity_id: &str) -> Option<&str> {
        if self.requester_id == entity_id {
            Some(&self.recipient_id)
        } else if self.recipient_id == entity_id {
            Some(&self.requester_id)
        } else {
            None
        }
    }

    /// An accepted (non-pending) connection
    pub fn is_accepted(&self) -> bool {
        !self.pending
    }

    /// Whether either party currently blocks the pair
    pub fn is_blocked(&self) -> bool {
        self.blocker_id.is_some()
    }

    /// Whether `entity_id` may block this record: blocking is allowed only
    /// while no block is in place, or when the entity is already the blocker
    pub fn can_block(&self, entity_id: &str) -> bool {
        match self.blocker_id {
            None => self.involves(entity_id),
            Some(ref blocker) => blocker == entity_id,
        }
    }

    /// Whether `entity_id` may unblock this record: only the blocker may
    pub fn can_unblock(&self, entity_id: &str) -> bool {
        self.blocker_id.as_deref() == Some(entity_id)
    }
}

/// Builder for creating Relationship instances
pub struct RelationshipBuilder {
    relationship: Relationship,
}

impl RelationshipBuilder {
    /// Create a new builder for the given pair
    pub fn new<S: Into<String>>(requester_id: S, recipient_id: S) -> Self {
        Self {
            relationship: Relationship::new(requester_id, recipient_id),
        }
    }

    /// Set the origin platform tag
    pub fn platform<S: Into<String>>(mut self, platform: S) -> Self {
        self.relationship.platform = platform.into();
        self
    }

    /// Set the pending flag
    pub fn pending(mut self, pending: bool) -> Self {
        self.relationship.pending = pending;
        self
    }

    /// Set the mutual friends count metadata
    pub fn mutual_friends_count(mut self, count: u32) -> Self {
        self.relationship.mutual_friends_count = count;
        self
    }

    /// Set the recipient registration snapshot
    pub fn friend_registered(mut self, registered: bool) -> Self {
        self.relationship.friend_registered = registered;
        self
    }

    /// Build the final record
    pub fn build(self) -> Relationship {
        self.relationship
    }
}

/// Partial update applied to an existing record.
///
/// Each field is `None` when the update leaves it untouched. For the blocker
/// the outer `Option` is "change it?", the inner is the new value, so a
/// block-clear is representable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RelationshipUpdate {
    /// New value for the pending flag
    pub pending: Option<bool>,

    /// New value for the blocker identity
    pub blocker_id: Option<Option<String>>,

    /// New value for the registration snapshot
    pub friend_registered: Option<bool>,
}

impl RelationshipUpdate {
    /// Update that accepts a pending invitation
    pub fn accept() -> Self {
        Self {
            pending: Some(false),
            ..Default::default()
        }
    }

    /// Update that records `blocker_id` as the blocking party
    pub fn block<S: Into<String>>(blocker_id: S) -> Self {
        Self {
            blocker_id: Some(Some(blocker_id.into())),
            ..Default::default()
        }
    }

    /// Update that clears the blocking party
    pub fn unblock() -> Self {
        Self {
            blocker_id: Some(None),
            ..Default::default()
        }
    }

    /// Update that marks the recipient as a registered entity
    pub fn mark_registered() -> Self {
        Self {
            friend_registered: Some(true),
            ..Default::default()
        }
    }

    /// Apply the update to a record in place, refreshing `updated_at`
    pub fn apply(&self, relationship: &mut Relationship) {
        if let Some(pending) = self.pending {
            relationship.pending = pending;
        }
        if let Some(ref blocker_id) = self.blocker_id {
            relationship.blocker_id = blocker_id.clone();
        }
        if let Some(friend_registered) = self.friend_registered {
            relationship.friend_registered = friend_registered;
        }
        relationship.updated_at = Utc::now();
    }

    /// Whether the update changes anything at all
    pub fn is_empty(&self) -> bool {
        self.pending.is_none() && self.blocker_id.is_none() && self.friend_registered.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_relationship_defaults() {
        let relationship = Relationship::new("alice", "bob");
        assert!(relationship.pending);
        assert!(relationship.blocker_id.is_none());
        assert_eq!(relationship.platform, "manual");
        assert_eq!(relationship.mutual_friends_count, 0);
        assert!(!relationship.friend_registered);
        assert!(!relationship.id.is_empty());
    }

    #[test]
    fn test_builder_sets_fields() {
        let relationship = Relationship::builder("alice", "bob")
            .platform("facebook")
            .pending(false)
            .mutual_friends_count(7)
            .friend_registered(true)
            .build();

        assert_eq!(relationship.platform, "facebook");
        assert!(relationship.is_accepted());
        assert_eq!(relationship.mutual_friends_count, 7);
        assert!(relationship.friend_registered);
    }

    #[test]
    fn test_involves_and_other_party() {
        let relationship = Relationship::new("alice", "bob");
        assert!(relationship.involves("alice"));
        assert!(relationship.involves("bob"));
        assert!(!relationship.involves("carol"));
        assert_eq!(relationship.other_party("alice"), Some("bob"));
        assert_eq!(relationship.other_party("bob"), Some("alice"));
        assert_eq!(relationship.other_party("carol"), None);
    }

    #[test]
    fn test_can_block_rules() {
        let mut relationship = Relationship::new("alice", "bob");

        // Unblocked: either party may block, outsiders may not
        assert!(relationship.can_block("alice"));
        assert!(relationship.can_block("bob"));
        assert!(!relationship.can_block("carol"));

        // Blocked by alice: only alice may block again or unblock
        relationship.blocker_id = Some("alice".to_string());
        assert!(relationship.can_block("alice"));
        assert!(!relationship.can_block("bob"));
        assert!(relationship.can_unblock("alice"));
        assert!(!relationship.can_unblock("bob"));
    }

    #[test]
    fn test_update_apply() {
        let mut relationship = Relationship::new("alice", "bob");

        RelationshipUpdate::accept().apply(&mut relationship);
        assert!(relationship.is_accepted());

        RelationshipUpdate::block("alice").apply(&mut relationship);
        assert_eq!(relationship.blocker_id.as_deref(), Some("alice"));

        RelationshipUpdate::unblock().apply(&mut relationship);
        assert!(relationship.blocker_id.is_none());

        RelationshipUpdate::mark_registered().apply(&mut relationship);
        assert!(relationship.friend_registered);
    }

    #[test]
    fn test_update_is_empty() {
        assert!(RelationshipUpdate::default().is_empty());
        assert!(!RelationshipUpdate::accept().is_empty());
        assert!(!RelationshipUpdate::unblock().is_empty());
    }
}
