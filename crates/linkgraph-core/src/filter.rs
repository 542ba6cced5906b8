// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The table-to-graph filter: link specification + options, run on demand.

use tracing::{info, instrument};

use crate::assemble::assemble;
use crate::config::TableToGraphConfig;
use crate::edges::build_edges;
use crate::error::{Diagnostic, TableToGraphError};
use crate::graph::TableGraph;
use crate::hidden::resolve_hidden_edges;
use crate::link::LinkSpec;
use crate::progress::{NoProgress, PhaseWeights, Progress, ProgressSink};
use crate::resolve::{edge_columns, resolve_explicit, resolve_implicit};
use crate::table::Table;

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// The assembled graph.
    pub graph: TableGraph,
    /// Non-fatal conditions observed while building it.
    pub diagnostics: Vec<Diagnostic>,
}

/// Converts an edge table (and optionally a vertex table) into a graph.
///
/// Every call rebuilds from scratch; nothing is cached between runs, so
/// editing the specification through [`spec_mut`](Self::spec_mut) takes
/// effect on the next call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableToGraph {
    spec: LinkSpec,
    config: TableToGraphConfig,
}

impl TableToGraph {
    /// Creates a filter from a specification and options.
    pub fn new(spec: LinkSpec, config: TableToGraphConfig) -> Self {
        Self { spec, config }
    }

    /// The link specification.
    pub fn spec(&self) -> &LinkSpec {
        &self.spec
    }

    /// Mutable access to the link specification.
    pub fn spec_mut(&mut self) -> &mut LinkSpec {
        &mut self.spec
    }

    /// The options.
    pub fn config(&self) -> &TableToGraphConfig {
        &self.config
    }

    /// Mutable access to the options.
    pub fn config_mut(&mut self) -> &mut TableToGraphConfig {
        &mut self.config
    }

    /// Runs on an edge table alone, without progress reporting.
    pub fn convert(&self, edges: &dyn Table) -> Result<Conversion, TableToGraphError> {
        self.run(edges, None, &mut NoProgress)
    }

    /// Runs the full pipeline: vertex resolution, edge building, hidden-edge
    /// flattening, assembly.
    ///
    /// Fatal conditions return an error and no graph. Non-fatal ones are
    /// logged and returned in [`Conversion::diagnostics`].
    #[instrument(
        skip_all,
        fields(
            rows = edges.number_of_rows(),
            vertex_table = vertices.is_some(),
            directed = self.config.directed
        )
    )]
    pub fn run(
        &self,
        edges: &dyn Table,
        vertices: Option<&dyn Table>,
        progress: &mut dyn ProgressSink,
    ) -> Result<Conversion, TableToGraphError> {
        let spec = self.spec.normalize()?;
        let handles = edge_columns(&spec, edges)?;
        let mut progress = Progress::new(
            progress,
            PhaseWeights::for_spec(spec.has_hidden()),
            self.config.progress_stride,
        );
        let mut diagnostics = Vec::new();

        let resolved = match vertices {
            None => resolve_implicit(&spec, edges, &handles, &mut progress)?,
            Some(vt) => {
                match resolve_explicit(&spec, edges, &handles, vt, &mut diagnostics, &mut progress)? {
                    Some(resolved) => resolved,
                    None => {
                        progress.finish();
                        return Ok(Conversion {
                            graph: TableGraph::empty(self.config.directed),
                            diagnostics,
                        });
                    }
                }
            }
        };

        let plan = build_edges(&spec, edges, &handles, &resolved, &mut progress)?;
        let passthrough = resolve_hidden_edges(&plan, &mut progress)?;
        diagnostics.extend(plan.diagnostics());

        let graph = assemble(
            self.config.directed,
            resolved,
            vertices,
            edges,
            plan.direct,
            passthrough,
        );
        progress.finish();
        info!(
            vertices = graph.number_of_vertices(),
            edges = graph.number_of_edges(),
            diagnostics = diagnostics.len(),
            "table converted to graph"
        );
        Ok(Conversion { graph, diagnostics })
    }
}
