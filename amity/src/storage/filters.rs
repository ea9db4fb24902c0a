//! Filter types for relationship store queries

use serde::{Deserialize, Serialize};

use crate::models::Relationship;

/// Predicate over the blocker field of a record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlockerFilter {
    /// The record must not be blocked
    Unset,

    /// The record must be blocked by exactly this entity
    Is(String),

    /// The record must be blocked by some entity other than this one
    OtherThan(String),
}

impl BlockerFilter {
    /// Evaluate the predicate against a record's blocker field
    pub fn matches(&self, blocker_id: Option<&str>) -> bool {
        match self {
            BlockerFilter::Unset => blocker_id.is_none(),
            BlockerFilter::Is(entity_id) => blocker_id == Some(entity_id.as_str()),
            BlockerFilter::OtherThan(entity_id) => {
                blocker_id.is_some() && blocker_id != Some(entity_id.as_str())
            }
        }
    }
}

/// Filter for relationship queries.
///
/// `None` fields match any value.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RelationshipFilter {
    /// Filter by the pending flag
    pub pending: Option<bool>,

    /// Filter by the blocker field
    pub blocker: Option<BlockerFilter>,
}

impl RelationshipFilter {
    /// Evaluate the filter against a record
    pub fn matches(&self, relationship: &Relationship) -> bool {
        if let Some(pending) = self.pending {
            if relationship.pending != pending {
                return false;
            }
        }
        if let Some(ref blocker) = self.blocker {
            if !blocker.matches(relationship.blocker_id.as_deref()) {
                return false;
            }
        }
        true
    }
}

/// Helper functions for constructing filters
pub mod helpers {
    use super::*;

    /// Match any record, regardless of state
    pub fn any() -> RelationshipFilter {
        RelationshipFilter::default()
    }

    /// Accepted, unblocked connections — the membership predicate behind
    /// the friends queries
    pub fn accepted() -> RelationshipFilter {
        RelationshipFilter {
            pending: Some(false),
            blocker: Some(BlockerFilter::Unset),
        }
    }

    /// Pending, unblocked invitations
    pub fn pending() -> RelationshipFilter {
        RelationshipFilter {
            pending: Some(true),
            blocker: Some(BlockerFilter::Unset),
        }
    }

    /// Records blocked by the given entity
    pub fn blocked_by(entity_id: &str) -> RelationshipFilter {
        RelationshipFilter {
            pending: None,
            blocker: Some(BlockerFilter::Is(entity_id.to_string())),
        }
    }

    /// Records blocked by someone other than the given entity
    pub fn blocked_by_other(entity_id: &str) -> RelationshipFilter {
        RelationshipFilter {
            pending: None,
            blocker: Some(BlockerFilter::OtherThan(entity_id.to_string())),
        }
    }
}
