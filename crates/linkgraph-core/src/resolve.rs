// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Vertex resolution: assigns a vertex id to every distinct `(domain, value)`.
//!
//! Two sources are supported:
//! - *implicit*: vertices are discovered by streaming the edge table's link
//!   columns; ids follow first-seen order,
//! - *explicit*: a vertex table is supplied and every row is a vertex; each
//!   domain column of that table registers its valid values, first row wins.
//!
//! Hidden columns are always read from the edge table and only populate the
//! hidden map; they never produce vertices.

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::error::{Diagnostic, Phase, TableRole, TableToGraphError};
use crate::graph::Row;
use crate::ident::{HiddenId, VertexId, VertexKey};
use crate::link::NormalizedSpec;
use crate::progress::Progress;
use crate::table::{ColumnHandle, Table};
use crate::value::Value;

/// Per-vertex data gathered during resolution, index-aligned with `VertexId`.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct VertexRecord {
    pub(crate) domain: String,
    pub(crate) label: String,
    pub(crate) pedigree: Option<Value>,
    pub(crate) attributes: Row,
}

/// Where vertices came from; decides how misses are treated later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VertexSource {
    Implicit,
    Explicit,
}

/// Output of the resolver. The maps are discarded once the graph is built.
#[derive(Debug)]
pub(crate) struct ResolvedVertices {
    pub(crate) source: VertexSource,
    pub(crate) vertex_map: FxHashMap<VertexKey, VertexId>,
    pub(crate) hidden_map: FxHashMap<VertexKey, HiddenId>,
    pub(crate) vertices: Vec<VertexRecord>,
    pub(crate) attribute_names: Vec<String>,
}

impl ResolvedVertices {
    fn new(source: VertexSource) -> Self {
        Self {
            source,
            vertex_map: FxHashMap::default(),
            hidden_map: FxHashMap::default(),
            vertices: Vec::new(),
            attribute_names: Vec::new(),
        }
    }

    /// Number of hidden ids handed out (`0..hidden_count`).
    pub(crate) fn hidden_count(&self) -> usize {
        self.hidden_map.len()
    }

    /// Records every valid value of a hidden edge-table column.
    fn scan_hidden(&mut self, edges: &dyn Table, column: ColumnHandle, domain: &str) {
        for row in 0..edges.number_of_rows() {
            let Some(value) = edges.cell(row, column) else {
                continue;
            };
            let next = HiddenId(self.hidden_map.len());
            self.hidden_map
                .entry(VertexKey::new(domain, value))
                .or_insert(next);
        }
    }
}

/// Looks up every link column in the edge table, failing on the first miss.
pub(crate) fn edge_columns(
    spec: &NormalizedSpec,
    edges: &dyn Table,
) -> Result<Vec<ColumnHandle>, TableToGraphError> {
    spec.columns
        .iter()
        .map(|c| {
            edges
                .column_by_name(&c.column)
                .ok_or_else(|| TableToGraphError::MissingColumn {
                    table: TableRole::Edge,
                    column: c.column.clone(),
                })
        })
        .collect()
}

/// Resolves vertices from the edge table alone.
///
/// One attribute column is synthesised per visible domain (first-seen
/// order); each vertex carries its value in its own domain's column.
pub(crate) fn resolve_implicit(
    spec: &NormalizedSpec,
    edges: &dyn Table,
    handles: &[ColumnHandle],
    progress: &mut Progress<'_>,
) -> Result<ResolvedVertices, TableToGraphError> {
    let mut out = ResolvedVertices::new(VertexSource::Implicit);
    // (vertex, attribute slot) pairs; rows are widened once all domains are known.
    let mut slots = Vec::new();
    let total = spec.columns.len();

    for (c, (link, &handle)) in spec.columns.iter().zip(handles).enumerate() {
        if link.hidden {
            out.scan_hidden(edges, handle, &link.domain);
        } else {
            let slot = match out.attribute_names.iter().position(|d| *d == link.domain) {
                Some(slot) => slot,
                None => {
                    out.attribute_names.push(link.domain.clone());
                    out.attribute_names.len() - 1
                }
            };
            for row in 0..edges.number_of_rows() {
                let Some(value) = edges.cell(row, handle) else {
                    continue;
                };
                let key = VertexKey::new(link.domain.as_str(), value);
                if out.vertex_map.contains_key(&key) {
                    continue;
                }
                let id = VertexId(out.vertices.len());
                out.vertices.push(VertexRecord {
                    domain: key.domain.clone(),
                    label: key.value.to_string(),
                    pedigree: Some(key.value.clone()),
                    attributes: Vec::new(),
                });
                slots.push((id, slot, key.value.clone()));
                out.vertex_map.insert(key, id);
            }
        }
        debug!(column = %link.column, hidden = link.hidden, "scanned link column");
        progress.step(Phase::Vertices, c + 1, total)?;
    }

    let width = out.attribute_names.len();
    for (id, slot, value) in slots {
        let attributes = &mut out.vertices[id.index()].attributes;
        attributes.resize(width, None);
        attributes[slot] = Some(value);
    }
    Ok(out)
}

/// Resolves vertices against a supplied vertex table.
///
/// Returns `Ok(None)` when no active link column declares a domain: nothing
/// can be matched against the vertex table and the run yields an empty graph.
pub(crate) fn resolve_explicit(
    spec: &NormalizedSpec,
    edges: &dyn Table,
    handles: &[ColumnHandle],
    vertex_table: &dyn Table,
    diagnostics: &mut Vec<Diagnostic>,
    progress: &mut Progress<'_>,
) -> Result<Option<ResolvedVertices>, TableToGraphError> {
    for link in spec.columns.iter().filter(|c| !c.hidden && c.domain.is_empty()) {
        warn!(column = %link.column, "vertex table supplied but column has no domain");
        diagnostics.push(Diagnostic::MissingDomain {
            column: link.column.clone(),
        });
    }
    if spec.columns.iter().all(|c| c.domain.is_empty()) {
        warn!("no link column declares a domain; producing an empty graph");
        return Ok(None);
    }

    let mut out = ResolvedVertices::new(VertexSource::Explicit);
    out.attribute_names = vertex_table.column_names();
    out.vertices = (0..vertex_table.number_of_rows())
        .map(|row| VertexRecord {
            attributes: vertex_table.row(row),
            ..VertexRecord::default()
        })
        .collect();

    let mut scanned: Vec<&str> = Vec::new();
    let total = spec.columns.len();
    for (c, (link, &handle)) in spec.columns.iter().zip(handles).enumerate() {
        if link.hidden {
            out.scan_hidden(edges, handle, &link.domain);
        } else if !link.domain.is_empty() && !scanned.contains(&link.domain.as_str()) {
            scanned.push(&link.domain);
            let column = vertex_table.column_by_name(&link.domain).ok_or_else(|| {
                TableToGraphError::MissingColumn {
                    table: TableRole::Vertex,
                    column: link.domain.clone(),
                }
            })?;
            register_domain(&mut out, vertex_table, column, &link.domain);
        }
        progress.step(Phase::Vertices, c + 1, total)?;
    }
    Ok(Some(out))
}

/// Registers the valid values of one vertex-table domain column.
///
/// Invalid, empty, and negative cells are "no vertex" sentinels. The first
/// row holding a key owns it. A row holding keys in several domains answers
/// to all of them but takes its domain, label and value from the last
/// domain scanned.
fn register_domain(
    out: &mut ResolvedVertices,
    vertex_table: &dyn Table,
    column: ColumnHandle,
    domain: &str,
) {
    let mut registered = 0_usize;
    for row in 0..vertex_table.number_of_rows() {
        let Some(value) = vertex_table.cell(row, column) else {
            continue;
        };
        if value.is_vertex_sentinel() {
            continue;
        }
        let key = VertexKey::new(domain, value);
        if out.vertex_map.contains_key(&key) {
            continue;
        }
        let record = &mut out.vertices[row];
        record.domain = key.domain.clone();
        record.label = key.value.to_string();
        record.pedigree = Some(key.value.clone());
        out.vertex_map.insert(key, VertexId(row));
        registered += 1;
    }
    debug!(domain, registered, "registered vertex-table domain");
}
