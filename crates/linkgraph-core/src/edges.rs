// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Edge building: one candidate edge per (row, link edge).
//!
//! Visible-to-visible links become direct edges immediately. Links touching a
//! hidden column are parked in per-hidden-id lists and flattened later by
//! [`crate::hidden`]. Links between two hidden columns are counted and dropped.

use tracing::{debug, warn};

use crate::error::{Diagnostic, Phase, TableToGraphError};
use crate::ident::{HiddenId, VertexId, VertexKey};
use crate::link::NormalizedSpec;
use crate::progress::Progress;
use crate::resolve::{ResolvedVertices, VertexSource};
use crate::table::{ColumnHandle, Table};

/// An edge waiting to be materialised; attributes come from `row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingEdge {
    pub(crate) source: VertexId,
    pub(crate) target: VertexId,
    pub(crate) row: usize,
}

/// Everything the edge pass produces.
#[derive(Debug, Default)]
pub(crate) struct EdgePlan {
    /// Direct edges in discovery order.
    pub(crate) direct: Vec<PendingEdge>,
    /// Per hidden id: visible sources feeding it, with the row that did so.
    pub(crate) hidden_in: Vec<Vec<(VertexId, usize)>>,
    /// Per hidden id: visible targets it feeds.
    pub(crate) hidden_out: Vec<Vec<VertexId>>,
    pub(crate) hidden_to_hidden: usize,
    pub(crate) dangling: usize,
    pub(crate) null_cells: usize,
}

impl EdgePlan {
    /// Converts the counters into diagnostics (zero counts are omitted).
    pub(crate) fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        if self.hidden_to_hidden > 0 {
            out.push(Diagnostic::HiddenToHidden {
                count: self.hidden_to_hidden,
            });
        }
        if self.dangling > 0 {
            out.push(Diagnostic::DanglingEndpoint {
                count: self.dangling,
            });
        }
        if self.null_cells > 0 {
            out.push(Diagnostic::NullCell {
                count: self.null_cells,
            });
        }
        out
    }
}

struct Lookup<'a> {
    resolved: &'a ResolvedVertices,
    row: usize,
}

impl Lookup<'_> {
    /// Visible vertex for `key`. `Ok(None)` is a tolerated miss (sparse vertex
    /// table); in implicit mode a miss is an invariant violation.
    fn visible(&self, key: VertexKey) -> Result<Option<VertexId>, TableToGraphError> {
        match self.resolved.vertex_map.get(&key) {
            Some(&id) => Ok(Some(id)),
            None if self.resolved.source == VertexSource::Explicit => Ok(None),
            None => Err(self.unresolved(key)),
        }
    }

    /// Hidden ids come from the same edge-table scan, so a miss is always an
    /// invariant violation.
    fn hidden(&self, key: VertexKey) -> Result<HiddenId, TableToGraphError> {
        match self.resolved.hidden_map.get(&key) {
            Some(&id) => Ok(id),
            None => Err(self.unresolved(key)),
        }
    }

    fn unresolved(&self, key: VertexKey) -> TableToGraphError {
        TableToGraphError::UnresolvedVertex {
            domain: key.domain,
            value: key.value,
            row: self.row,
        }
    }
}

/// Walks every row and every active link edge.
pub(crate) fn build_edges(
    spec: &NormalizedSpec,
    edges: &dyn Table,
    handles: &[ColumnHandle],
    resolved: &ResolvedVertices,
    progress: &mut Progress<'_>,
) -> Result<EdgePlan, TableToGraphError> {
    let hidden_count = resolved.hidden_count();
    let mut plan = EdgePlan {
        hidden_in: vec![Vec::new(); hidden_count],
        hidden_out: vec![Vec::new(); hidden_count],
        ..EdgePlan::default()
    };
    let rows = edges.number_of_rows();

    for row in 0..rows {
        let lookup = Lookup { resolved, row };
        for &(s, t) in &spec.edges {
            let (src, dst) = (&spec.columns[s], &spec.columns[t]);
            let (Some(vs), Some(vt)) = (edges.cell(row, handles[s]), edges.cell(row, handles[t]))
            else {
                plan.null_cells += 1;
                continue;
            };
            let key_s = VertexKey::new(src.domain.as_str(), vs);
            let key_t = VertexKey::new(dst.domain.as_str(), vt);

            match (src.hidden, dst.hidden) {
                (false, false) => match (lookup.visible(key_s)?, lookup.visible(key_t)?) {
                    (Some(source), Some(target)) => plan.direct.push(PendingEdge {
                        source,
                        target,
                        row,
                    }),
                    _ => plan.dangling += 1,
                },
                (true, false) => {
                    let h = lookup.hidden(key_s)?;
                    match lookup.visible(key_t)? {
                        Some(target) => plan.hidden_out[h.0].push(target),
                        None => plan.dangling += 1,
                    }
                }
                (false, true) => {
                    let h = lookup.hidden(key_t)?;
                    match lookup.visible(key_s)? {
                        Some(source) => plan.hidden_in[h.0].push((source, row)),
                        None => plan.dangling += 1,
                    }
                }
                (true, true) => plan.hidden_to_hidden += 1,
            }
        }
        if progress.is_tick(row) {
            progress.step(Phase::Edges, row, rows)?;
        }
    }
    progress.step(Phase::Edges, rows, rows)?;

    if plan.hidden_to_hidden > 0 {
        warn!(
            count = plan.hidden_to_hidden,
            "edges between hidden vertices are not supported; dropped"
        );
    }
    if plan.dangling > 0 {
        warn!(
            count = plan.dangling,
            "edges reference values missing from the vertex table; skipped"
        );
    }
    if plan.null_cells > 0 {
        warn!(count = plan.null_cells, "edges touch invalid cells; skipped");
    }
    debug!(direct = plan.direct.len(), "edge pass complete");
    Ok(plan)
}
