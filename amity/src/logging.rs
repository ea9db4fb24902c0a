//! Structured logging initialization
//!
//! Thin setup layer over the tracing subscriber. Embedding applications
//! that install their own subscriber can skip this module entirely; the
//! engine only ever emits through the `tracing` macros.

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log verbosity levels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose
    Trace,
    /// Debug information
    Debug,
    /// Standard operational messages
    Info,
    /// Warnings only
    Warn,
    /// Errors only
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Error type for logging setup
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Error in subscriber setup
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberError(String),
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Initialize the tracing subscriber at the given level.
///
/// The `RUST_LOG` environment variable takes precedence when set. Calling
/// this after a subscriber is already installed is not an error.
pub fn init(level: LogLevel) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::from(level).to_string()));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();

    match result {
        Ok(()) => Ok(()),
        // Another subscriber won the race; keep it.
        Err(e) if e.to_string().contains("already been set") => Ok(()),
        Err(e) => Err(LogError::SubscriberError(e.to_string())),
    }
}
