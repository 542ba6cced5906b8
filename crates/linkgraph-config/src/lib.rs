// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Configuration persistence for linkgraph tools: a storage port, a JSON
//! service over it, a filesystem store, and named filter presets.
#![forbid(unsafe_code)]

pub mod config;
pub mod fs;
pub mod preset;

pub use config::{ConfigError, ConfigService, ConfigStore};
pub use fs::FsConfigStore;
pub use preset::{Preset, PresetPort, PRESET_PREFIX};
