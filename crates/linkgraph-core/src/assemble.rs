// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Final graph assembly: materialises vertices and edges with pedigree ids.

use crate::edges::PendingEdge;
use crate::graph::{GraphEdge, GraphVertex, TableGraph};
use crate::ident::{EdgeId, VertexId};
use crate::resolve::ResolvedVertices;
use crate::table::Table;
use crate::value::Value;

/// Builds the output graph.
///
/// Vertex pedigree ids come from the vertex table when it carries its own,
/// otherwise from the resolved values. Edge pedigree ids come from the edge
/// table when it carries its own (taken at the edge's attribute row),
/// otherwise they are `0..N` in insertion order: direct edges first, then
/// pass-through edges.
pub(crate) fn assemble(
    directed: bool,
    resolved: ResolvedVertices,
    vertex_table: Option<&dyn Table>,
    edges: &dyn Table,
    direct: Vec<PendingEdge>,
    passthrough: Vec<PendingEdge>,
) -> TableGraph {
    let vertex_ids = vertex_table.filter(|t| t.has_existing_ids());
    let vertices = resolved
        .vertices
        .into_iter()
        .enumerate()
        .map(|(i, record)| GraphVertex {
            id: VertexId(i),
            domain: record.domain,
            label: record.label,
            pedigree_id: match vertex_ids {
                Some(t) => t.id_at(i),
                None => record.pedigree,
            },
            attributes: record.attributes,
        })
        .collect();

    let keep_edge_ids = edges.has_existing_ids();
    let graph_edges = direct
        .into_iter()
        .chain(passthrough)
        .enumerate()
        .map(|(i, pending)| GraphEdge {
            id: EdgeId(i),
            source: pending.source,
            target: pending.target,
            pedigree_id: if keep_edge_ids {
                edges.id_at(pending.row)
            } else {
                Some(Value::Integer(i64::try_from(i).unwrap_or(i64::MAX)))
            },
            row: pending.row,
            attributes: edges.row(pending.row),
        })
        .collect();

    let mut vertex_keys: Vec<_> = resolved.vertex_map.into_iter().collect();
    vertex_keys.sort_unstable();

    TableGraph {
        directed,
        vertex_attribute_names: resolved.attribute_names,
        edge_attribute_names: edges.column_names(),
        vertices,
        vertex_keys,
        edges: graph_edges,
    }
}
