//! Data models for friendship records

pub mod relationship;

pub use relationship::{Relationship, RelationshipBuilder, RelationshipUpdate};
