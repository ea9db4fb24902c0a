//! Error types for storage operations

/// Error type for relationship store operations.
///
/// The engine does not interpret these beyond mapping a `Conflict` raised at
/// creation time to its own already-connected failure; everything else
/// propagates to the caller untouched.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// A record for the pair already exists
    #[error("relationship already exists: {0}")]
    Conflict(String),

    /// The referenced record does not exist
    #[error("relationship not found: {0}")]
    NotFound(String),

    /// The backend could not be reached
    #[error("connection error: {0}")]
    Connection(String),

    /// A query failed to execute
    #[error("query error: {0}")]
    Query(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Backend-specific error
    #[error("backend error: {0}")]
    Backend(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
