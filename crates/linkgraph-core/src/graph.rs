// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Output graph produced by the filter.
//! Pure data (vertices, edges, attribute rows) with deterministic hashing.

use blake3::Hash;
use ciborium::ser::into_writer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ident::{EdgeId, VertexId, VertexKey};
use crate::value::Value;

/// Blake3 digest of a graph's canonical encoding (32 bytes).
pub type Hash32 = [u8; 32];

/// Attribute row: one optional value per attribute name.
pub type Row = Vec<Option<Value>>;

/// Failure to produce the canonical encoding.
#[derive(Debug, Error)]
#[error("canonical encoding failed: {0}")]
pub struct EncodeError(String);

/// Output vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphVertex {
    /// Vertex identifier (dense index).
    pub id: VertexId,
    /// Domain the vertex value belongs to. Empty for unregistered
    /// vertex-table rows.
    pub domain: String,
    /// String form of the value, for labelling.
    pub label: String,
    /// Stable external identifier.
    pub pedigree_id: Option<Value>,
    /// Vertex-table row, aligned with [`TableGraph::vertex_attribute_names`].
    pub attributes: Row,
}

/// Output edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Edge identifier (insertion order).
    pub id: EdgeId,
    /// Source vertex as discovered.
    pub source: VertexId,
    /// Target vertex as discovered.
    pub target: VertexId,
    /// Stable external identifier.
    pub pedigree_id: Option<Value>,
    /// Edge-table row the edge was built from.
    pub row: usize,
    /// Copy of that row, aligned with [`TableGraph::edge_attribute_names`].
    pub attributes: Row,
}

/// Graph assembled from tables.
///
/// Vertices and edges are stored in id order; ids are their indices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableGraph {
    /// Whether edges are directed.
    pub directed: bool,
    /// Names of the per-vertex attribute columns.
    pub vertex_attribute_names: Vec<String>,
    /// Names of the per-edge attribute columns.
    pub edge_attribute_names: Vec<String>,
    /// All vertices.
    pub vertices: Vec<GraphVertex>,
    /// Every registered `(domain, value)` key with its vertex, sorted by key.
    /// A vertex-table row may answer to several keys.
    pub vertex_keys: Vec<(VertexKey, VertexId)>,
    /// All edges.
    pub edges: Vec<GraphEdge>,
}

impl TableGraph {
    /// Empty graph.
    pub fn empty(directed: bool) -> Self {
        Self {
            directed,
            ..Self::default()
        }
    }

    /// Number of vertices.
    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    /// Whether edges are directed.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns a vertex by id.
    pub fn vertex(&self, id: VertexId) -> Option<&GraphVertex> {
        self.vertices.get(id.index())
    }

    /// Returns an edge by id.
    pub fn edge(&self, id: EdgeId) -> Option<&GraphEdge> {
        self.edges.get(id.index())
    }

    /// Finds the vertex registered for `(domain, value)`.
    ///
    /// Lookup is by key identity, so `Integer(1)`, `Float(1.0)` and
    /// `String("1")` never find each other's vertex.
    pub fn find_vertex(&self, domain: &str, value: &Value) -> Option<VertexId> {
        let i = self
            .vertex_keys
            .binary_search_by(|(k, _)| (k.domain.as_str(), &k.value).cmp(&(domain, value)))
            .ok()?;
        self.vertex_keys.get(i).map(|(_, id)| *id)
    }

    /// Reads a vertex attribute by column name.
    pub fn vertex_attribute(&self, id: VertexId, name: &str) -> Option<&Value> {
        let col = self.vertex_attribute_names.iter().position(|n| n == name)?;
        self.vertex(id)?.attributes.get(col)?.as_ref()
    }

    /// Reads an edge attribute by column name.
    pub fn edge_attribute(&self, id: EdgeId, name: &str) -> Option<&Value> {
        let col = self.edge_attribute_names.iter().position(|n| n == name)?;
        self.edge(id)?.attributes.get(col)?.as_ref()
    }

    /// Edges connecting `a` to `b`. Direction is ignored for undirected graphs.
    pub fn edges_between(&self, a: VertexId, b: VertexId) -> impl Iterator<Item = &GraphEdge> {
        let directed = self.directed;
        self.edges.iter().filter(move |e| {
            (e.source == a && e.target == b) || (!directed && e.source == b && e.target == a)
        })
    }

    /// Number of edge endpoints at `v` (a self loop counts twice).
    pub fn degree(&self, v: VertexId) -> usize {
        self.edges
            .iter()
            .map(|e| usize::from(e.source == v) + usize::from(e.target == v))
            .sum()
    }

    /// Canonical serialization (CBOR, id order) for hashing/comparison.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut bytes = Vec::new();
        into_writer(self, &mut bytes).map_err(|e| EncodeError(e.to_string()))?;
        Ok(bytes)
    }

    /// Compute blake3 hash of the canonical form.
    pub fn compute_hash(&self) -> Result<Hash32, EncodeError> {
        let h: Hash = blake3::hash(&self.to_canonical_bytes()?);
        Ok(h.into())
    }
}
