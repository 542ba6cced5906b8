// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory config store fake for testing without filesystem I/O.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use linkgraph_config::{ConfigError, ConfigStore};

/// In-memory implementation of [`ConfigStore`] for testing.
///
/// Clones share state, so a test can hand one clone to a
/// [`ConfigService`](linkgraph_config::ConfigService) and inspect the other.
///
/// # Example
///
/// ```
/// use linkgraph_dry_tests::InMemoryConfigStore;
/// use linkgraph_config::{ConfigService, Preset, PresetPort};
///
/// let store = InMemoryConfigStore::new();
/// let service = ConfigService::new(store.clone());
///
/// service.save_preset("people", &Preset::default()).unwrap();
/// assert_eq!(store.keys(), vec!["preset.people".to_string()]);
/// assert_eq!(store.save_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    data: BTreeMap<String, Vec<u8>>,
    load_count: usize,
    save_count: usize,
    fail_on_load: bool,
    fail_on_save: bool,
}

impl InMemoryConfigStore {
    /// Create a new empty in-memory config store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` under `key` without touching the counters.
    pub fn seed(&self, key: &str, data: impl Into<Vec<u8>>) {
        self.lock().data.insert(key.to_owned(), data.into());
    }

    /// Configure the store to fail on load operations.
    pub fn set_fail_on_load(&self, fail: bool) {
        self.lock().fail_on_load = fail;
    }

    /// Configure the store to fail on save operations.
    pub fn set_fail_on_save(&self, fail: bool) {
        self.lock().fail_on_save = fail;
    }

    /// Number of `load_raw` attempts, failed ones included.
    pub fn load_count(&self) -> usize {
        self.lock().load_count
    }

    /// Number of `save_raw` attempts, failed ones included.
    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    /// All keys currently present, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.lock().data.keys().cloned().collect()
    }

    /// Raw bytes stored under `key`.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().data.get(key).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let mut inner = self.lock();
        inner.load_count += 1;
        if inner.fail_on_load {
            return Err(ConfigError::Other("simulated load failure".into()));
        }
        inner.data.get(key).cloned().ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let mut inner = self.lock();
        inner.save_count += 1;
        if inner.fail_on_save {
            return Err(ConfigError::Other("simulated save failure".into()));
        }
        inner.data.insert(key.to_owned(), data.to_vec());
        Ok(())
    }

    fn delete_raw(&self, key: &str) -> Result<(), ConfigError> {
        self.lock()
            .data
            .remove(key)
            .map(drop)
            .ok_or(ConfigError::NotFound)
    }
}
