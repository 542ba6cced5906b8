// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fatal errors and non-fatal diagnostics of a table-to-graph run.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::link::SpecError;
use crate::value::Value;

/// Which input table a column lookup ran against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableRole {
    /// The row-per-edge table.
    Edge,
    /// The optional vertex table.
    Vertex,
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Edge => "edge",
            Self::Vertex => "vertex",
        })
    }
}

/// Processing phase, used for progress weights and cancellation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Vertex resolution.
    Vertices,
    /// Direct edge building.
    Edges,
    /// Hidden pass-through edge synthesis.
    HiddenEdges,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertices => "vertices",
            Self::Edges => "edges",
            Self::HiddenEdges => "hidden edges",
        })
    }
}

/// Errors that abort a run. No graph is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableToGraphError {
    /// The link specification is malformed.
    #[error("invalid link specification: {0}")]
    InvalidSpecification(#[from] SpecError),
    /// A link column is absent from the table it is read from.
    #[error("{table} table has no column named {column:?}")]
    MissingColumn {
        /// Table the lookup ran against.
        table: TableRole,
        /// Column (or domain column) name.
        column: String,
    },
    /// An edge references a key the vertex resolver never registered.
    #[error("row {row} references unresolved vertex {domain}:{value}")]
    UnresolvedVertex {
        /// Domain of the key.
        domain: String,
        /// Value of the key.
        value: Value,
        /// Edge-table row.
        row: usize,
    },
    /// The progress sink asked to stop.
    #[error("cancelled during {phase}")]
    Cancelled {
        /// Phase that observed the request.
        phase: Phase,
    },
}

/// Non-fatal condition observed during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// A vertex table was supplied but this visible column has no domain, so
    /// it cannot be matched against the vertex table and yields no vertices.
    MissingDomain {
        /// Link column without a domain.
        column: String,
    },
    /// Edges between two hidden columns cannot be resolved and were dropped.
    HiddenToHidden {
        /// Number of dropped (row, link edge) pairs.
        count: usize,
    },
    /// Endpoints missing from a sparse vertex table; the edges were skipped.
    DanglingEndpoint {
        /// Number of skipped (row, link edge) pairs.
        count: usize,
    },
    /// Invalid edge-table cells; link edges touching them were skipped.
    NullCell {
        /// Number of skipped (row, link edge) pairs.
        count: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDomain { column } => write!(
                f,
                "column {column:?} has no domain; a vertex table requires one"
            ),
            Self::HiddenToHidden { count } => write!(
                f,
                "{count} edges between hidden vertices are not supported and were dropped"
            ),
            Self::DanglingEndpoint { count } => {
                write!(f, "{count} edges reference values absent from the vertex table")
            }
            Self::NullCell { count } => write!(f, "{count} edges touch invalid cells"),
        }
    }
}
