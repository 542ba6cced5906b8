// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Identifier types for output vertices, edges, and vertex identity keys.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Index of a vertex in the output graph.
///
/// Vertex ids are dense (`0..number_of_vertices`) and index-aligned with the
/// per-vertex attribute arrays.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct VertexId(pub usize);

impl VertexId {
    /// Returns the dense index of this vertex.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Index of an edge in the output graph, in insertion order.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl EdgeId {
    /// Returns the dense index of this edge.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Identifier of a hidden vertex. Never materialised in the output.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub(crate) struct HiddenId(pub(crate) usize);

/// Deduplication key for vertices: equal keys are the same vertex.
///
/// Ordering is lexicographic on `(domain, value)`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct VertexKey {
    /// Semantic namespace of the value.
    pub domain: String,
    /// Cell value.
    pub value: Value,
}

impl VertexKey {
    /// Builds a key from a domain and a value.
    pub fn new(domain: impl Into<String>, value: Value) -> Self {
        Self {
            domain: domain.into(),
            value,
        }
    }
}

impl fmt::Display for VertexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.domain, self.value)
    }
}
