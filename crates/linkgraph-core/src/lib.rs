// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic table-to-graph construction.
//! Rows of an edge table become edges between vertices named by a column
//! link specification; hidden columns are flattened into pass-through edges.
#![forbid(unsafe_code)]
//!
//! # Pipeline
//!
//! 1. [`LinkSpec::normalize`] validates the specification.
//! 2. Vertices are resolved from the edge table or a supplied vertex table.
//! 3. Each row yields one candidate edge per link edge.
//! 4. Hidden vertices are replaced by edges joining their neighbours.
//! 5. The [`TableGraph`] is assembled with stable ids and pedigree ids.
//!
//! [`TableToGraph::run`] drives all of the above. Output ordering depends
//! only on the input tables and the specification, so two runs over the
//! same input produce the same [`TableGraph::compute_hash`].

mod assemble;
mod config;
mod edges;
mod error;
mod filter;
mod graph;
mod hidden;
mod ident;
mod link;
mod progress;
mod resolve;
mod table;
mod value;

pub use config::{TableToGraphConfig, DEFAULT_PROGRESS_STRIDE};
pub use error::{Diagnostic, Phase, TableRole, TableToGraphError};
pub use filter::{Conversion, TableToGraph};
pub use graph::{EncodeError, GraphEdge, GraphVertex, Hash32, Row, TableGraph};
pub use ident::{EdgeId, VertexId, VertexKey};
pub use link::{LinkColumn, LinkEdge, LinkSpec, LinkVertex, NormalizedSpec, SpecError};
pub use progress::{NoProgress, ProgressSink};
pub use table::{ColumnHandle, MemTable, MemTableError, Table};
pub use value::Value;
