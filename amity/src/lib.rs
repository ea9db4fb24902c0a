//! # Amity
//!
//! Friendship management for user-like entities: invitations, approval,
//! blocking, and derived membership queries (friends, blocked entities,
//! mutual friends), backed by any store implementing a narrow async
//! contract.
//!
//! The crate is built around two pieces:
//!
//! - **[`FriendshipEngine`](engine::FriendshipEngine)** — the state machine.
//!   Every mutation is one pair lookup, one validation against the current
//!   record state, and one write. Every membership query is assembled from
//!   two independent directional store reads.
//! - **[`RelationshipStore`](storage::RelationshipStore)** — the persistence
//!   seam. An in-memory implementation ships for tests and development;
//!   database backends implement the same trait (and own the pair
//!   uniqueness constraint).
//!
//! ## Quick Start
//!
//! ```rust
//! use amity::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let store = Arc::new(MemoryRelationshipStore::new());
//!     let directory = Arc::new(MemoryRegistrationDirectory::new());
//!     let engine = FriendshipEngine::new(store, directory);
//!
//!     // alice invites bob; bob accepts
//!     engine.invite("alice", "bob").await?;
//!     engine.approve("bob", "alice").await?;
//!     assert!(engine.is_friend_with("alice", "bob").await?);
//!
//!     // blocking overrides acceptance for membership purposes
//!     engine.block_friend("alice", "bob").await?;
//!     assert!(!engine.is_friend_with("alice", "bob").await?);
//!     assert!(engine.is_blocked_friend("alice", "bob").await?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Failure model
//!
//! State transitions return a tagged result: the updated record on success,
//! an [`AmityError`] naming the violated business rule otherwise. Derived
//! queries never produce business failures — an absent relationship is
//! simply absent from every result set — and only surface store-level
//! errors.

pub mod config;
pub mod engine;
pub mod logging;
pub mod models;
pub mod storage;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::config::{EngineConfig, EngineConfigBuilder};
    pub use crate::engine::FriendshipEngine;
    pub use crate::logging::LogLevel;
    pub use crate::models::{Relationship, RelationshipBuilder, RelationshipUpdate};
    pub use crate::storage::{
        BlockerFilter, MemoryRegistrationDirectory, MemoryRelationshipStore,
        RegistrationDirectory, RelationshipFilter, RelationshipStore, StoreError,
    };
    pub use crate::{AmityError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for friendship operations.
///
/// Business-rule violations are expected outcomes of state transitions, not
/// exceptional conditions; store-level failures propagate separately through
/// the `Store` variant without interpretation.
#[derive(Debug, thiserror::Error)]
pub enum AmityError {
    /// An entity attempted a relationship with itself
    #[error("an entity cannot hold a relationship with itself")]
    SelfReference,

    /// The pair already has a record, in any state
    #[error("{requester} and {recipient} are already connected")]
    AlreadyConnected {
        /// Entity that attempted the creation
        requester: String,
        /// The other entity
        recipient: String,
    },

    /// The operation requires an existing relationship and none was found
    #[error("no relationship exists between {a} and {b}")]
    NoSuchRelationship {
        /// One party of the missing pair
        a: String,
        /// The other party
        b: String,
    },

    /// An inviter attempted to approve its own invitation
    #[error("{entity} is not the recipient of this invitation")]
    NotRecipient {
        /// Entity that attempted the approval
        entity: String,
    },

    /// The pair is blocked by the other party
    #[error("{entity} is not permitted to block this relationship")]
    BlockNotPermitted {
        /// Entity that attempted the block
        entity: String,
    },

    /// Only the blocker may unblock
    #[error("{entity} is not permitted to unblock this relationship")]
    UnblockNotPermitted {
        /// Entity that attempted the unblock
        entity: String,
    },

    /// A store-level failure the engine does not interpret
    #[error("storage error: {0}")]
    Store(#[from] storage::StoreError),
}

/// Result type for friendship operations
pub type Result<T> = std::result::Result<T, AmityError>;
