// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config service and storage port for linkgraph tools.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::debug;

/// Storage port for raw config blobs (keyed by logical name).
pub trait ConfigStore {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Persist a raw config blob, replacing any previous one.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
    /// Remove a blob. Returns `NotFound` when missing.
    fn delete_raw(&self, key: &str) -> Result<(), ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// Key cannot be mapped to storage (empty, or contains a path separator).
    #[error("invalid config key: {0:?}")]
    InvalidKey(String),
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Checks that `key` is usable as a single path component.
pub fn validate_key(key: &str) -> Result<(), ConfigError> {
    let bad = key.is_empty()
        || key == "."
        || key == ".."
        || key.chars().any(|c| matches!(c, '/' | '\\' | '\0'));
    if bad {
        return Err(ConfigError::InvalidKey(key.to_owned()));
    }
    Ok(())
}

/// Serializes config values as JSON and delegates storage to a `ConfigStore`.
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Create a new service using the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the inner store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the service and return the inner store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Load and deserialize a config value for `key`. Returns `Ok(None)` if
    /// missing or empty.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        validate_key(key)?;
        match self.store.load_raw(key) {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => {
                let value = serde_json::from_slice(&bytes)?;
                debug!(key, bytes = bytes.len(), "config loaded");
                Ok(Some(value))
            }
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Serialize and persist a config value for `key`.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        validate_key(key)?;
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)?;
        debug!(key, bytes = data.len(), "config saved");
        Ok(())
    }

    /// Remove `key`. Returns `Ok(false)` if it was not present.
    pub fn remove(&self, key: &str) -> Result<bool, ConfigError> {
        validate_key(key)?;
        match self.store.delete_raw(key) {
            Ok(()) => Ok(true),
            Err(ConfigError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
