//! Core friendship engine functionality

pub mod friendship;
pub mod queries;

pub use friendship::FriendshipEngine;
