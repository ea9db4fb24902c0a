//! Configuration for the friendship engine
//!
//! The engine takes its collaborator bindings as constructor parameters;
//! this module covers the remaining knobs — which record table the store
//! binds to and which platform tag newly created invitations carry — with
//! loading from environment variables or a TOML file on top of defaults.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix for engine configuration
pub const ENV_PREFIX: &str = "AMITY_";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred while loading from a file or the environment
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Engine configuration.
///
/// The table name is the configuration-time answer to "which relationship
/// record type does this engine operate on" — resolved once here, never
/// per call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Platform tag stamped on records created through `invite`
    pub invite_platform: String,

    /// Logical name of the relationship record table the store binds to
    pub table: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            invite_platform: "facebook".to_string(),
            table: "friendships".to_string(),
        }
    }
}

impl EngineConfig {
    /// Start building a configuration from the defaults
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }

    /// Load configuration from `AMITY_`-prefixed environment variables,
    /// falling back to the defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| ConfigError::LoadError(e.to_string()))
            .and_then(Self::validated)
    }

    /// Load configuration from a TOML file layered over the defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .extract()
            .map_err(|e| ConfigError::LoadError(e.to_string()))
            .and_then(Self::validated)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.invite_platform.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "invite_platform cannot be empty".to_string(),
            ));
        }
        if self.table.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "table cannot be empty".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Builder for [`EngineConfig`]
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    invite_platform: Option<String>,
    table: Option<String>,
}

impl EngineConfigBuilder {
    /// Create a builder with nothing overridden
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the platform tag stamped on invitations
    pub fn invite_platform<S: Into<String>>(mut self, platform: S) -> Self {
        self.invite_platform = Some(platform.into());
        self
    }

    /// Override the relationship record table name
    pub fn table<S: Into<String>>(mut self, table: S) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Build the configuration, validating the result
    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        let defaults = EngineConfig::default();
        EngineConfig {
            invite_platform: self.invite_platform.unwrap_or(defaults.invite_platform),
            table: self.table.unwrap_or(defaults.table),
        }
        .validated()
    }
}
