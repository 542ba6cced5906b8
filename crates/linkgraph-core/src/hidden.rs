// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Hidden-vertex flattening.
//!
//! For each hidden id, every recorded `(source, row)` is joined with every
//! recorded target. The synthesised edge copies the attributes of the
//! *incoming* row. Ids with only one side contribute nothing.

use tracing::debug;

use crate::edges::{EdgePlan, PendingEdge};
use crate::error::{Phase, TableToGraphError};
use crate::progress::Progress;

/// Emits pass-through edges in hidden-id order, then source order, then
/// target order.
pub(crate) fn resolve_hidden_edges(
    plan: &EdgePlan,
    progress: &mut Progress<'_>,
) -> Result<Vec<PendingEdge>, TableToGraphError> {
    let total = plan.hidden_out.len();
    let mut out = Vec::new();
    for (h, (incoming, outgoing)) in plan.hidden_in.iter().zip(&plan.hidden_out).enumerate() {
        for &(source, row) in incoming {
            out.extend(outgoing.iter().map(|&target| PendingEdge {
                source,
                target,
                row,
            }));
        }
        if progress.is_tick(h) {
            progress.step(Phase::HiddenEdges, h, total)?;
        }
    }
    debug!(synthesised = out.len(), hidden = total, "hidden pass complete");
    Ok(out)
}
