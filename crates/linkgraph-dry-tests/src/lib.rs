// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for linkgraph crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`fixtures`] - Canonical edge tables and link specifications
//! - [`progress`] - Progress sink that records reports and can cancel
//! - [`table`] - Row-at-a-time table builder

pub mod config;
pub mod fixtures;
pub mod progress;
pub mod table;

// Re-export commonly used items at crate root for convenience
pub use config::InMemoryConfigStore;
pub use fixtures::{chain_spec, chain_table, fan_out_table, pass_through_spec, pass_through_table};
pub use progress::RecordingProgress;
pub use table::TableBuilder;
