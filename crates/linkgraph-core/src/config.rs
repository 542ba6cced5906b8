// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filter options.

use serde::{Deserialize, Serialize};

/// Default number of rows (or hidden ids) between progress reports.
pub const DEFAULT_PROGRESS_STRIDE: usize = 100;

const fn default_stride() -> usize {
    DEFAULT_PROGRESS_STRIDE
}

/// Options for a [`TableToGraph`](crate::TableToGraph) run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableToGraphConfig {
    /// Emit a directed graph. Undirected graphs still record the source and
    /// target in discovery order.
    #[serde(default)]
    pub directed: bool,
    /// Rows between progress reports and cancellation checks.
    #[serde(default = "default_stride")]
    pub progress_stride: usize,
}

impl Default for TableToGraphConfig {
    fn default() -> Self {
        Self {
            directed: false,
            progress_stride: DEFAULT_PROGRESS_STRIDE,
        }
    }
}
