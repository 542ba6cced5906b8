// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Named presets: a link specification plus filter options.

use linkgraph_core::{LinkSpec, TableToGraph, TableToGraphConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{ConfigError, ConfigService, ConfigStore};

/// Key prefix separating presets from other blobs in a shared store.
pub const PRESET_PREFIX: &str = "preset.";

/// A reusable filter setup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Column link specification.
    pub spec: LinkSpec,
    /// Filter options.
    #[serde(default)]
    pub config: TableToGraphConfig,
}

impl Preset {
    /// Builds a filter from this preset.
    pub fn into_filter(self) -> TableToGraph {
        TableToGraph::new(self.spec, self.config)
    }
}

impl From<&TableToGraph> for Preset {
    fn from(filter: &TableToGraph) -> Self {
        Self {
            spec: filter.spec().clone(),
            config: filter.config().clone(),
        }
    }
}

/// Port for loading and saving presets by name.
pub trait PresetPort {
    /// Loads a preset. `Ok(None)` when it does not exist.
    fn load_preset(&self, name: &str) -> Result<Option<Preset>, ConfigError>;
    /// Saves (or replaces) a preset.
    fn save_preset(&self, name: &str, preset: &Preset) -> Result<(), ConfigError>;
    /// Deletes a preset. `Ok(false)` when it did not exist.
    fn delete_preset(&self, name: &str) -> Result<bool, ConfigError>;
}

fn preset_key(name: &str) -> String {
    format!("{PRESET_PREFIX}{name}")
}

impl<S: ConfigStore> PresetPort for ConfigService<S> {
    fn load_preset(&self, name: &str) -> Result<Option<Preset>, ConfigError> {
        let preset: Option<Preset> = self.load(&preset_key(name))?;
        if let Some(p) = &preset {
            if let Err(err) = p.spec.normalize() {
                warn!(name, %err, "stored preset has an invalid link specification");
            }
        }
        Ok(preset)
    }

    fn save_preset(&self, name: &str, preset: &Preset) -> Result<(), ConfigError> {
        self.save(&preset_key(name), preset)?;
        debug!(
            name,
            vertices = preset.spec.vertices().len(),
            edges = preset.spec.edges().len(),
            "preset saved"
        );
        Ok(())
    }

    fn delete_preset(&self, name: &str) -> Result<bool, ConfigError> {
        self.remove(&preset_key(name))
    }
}
