// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Link specification: which columns become vertices and which column pairs
//! become edges.
//!
//! A [`LinkSpec`] is a small directed graph over columns. Each vertex names a
//! column of the edge table, the domain its values live in, and whether it is
//! hidden (participates in edges but never becomes an output vertex). Each
//! edge says "for every row, connect the source column's value to the target
//! column's value".
//!
//! Editing never rebuilds anything; [`LinkSpec::normalize`] produces the
//! validated, active-only view the filter runs on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating or editing a link specification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// An edge references a column with no link vertex.
    #[error("link edge {source_column} -> {target_column} references unknown column: {missing}")]
    UnknownColumn {
        /// Edge source column.
        source_column: String,
        /// Edge target column.
        target_column: String,
        /// The column that has no vertex.
        missing: String,
    },
    /// Two link vertices name the same column.
    #[error("duplicate link vertex for column: {0}")]
    DuplicateColumn(String),
    /// A link vertex has an empty column name.
    #[error("link vertex {0} has an empty column name")]
    EmptyColumnName(usize),
    /// Domain/hidden lists passed to a column path have the wrong length.
    #[error("column path has {columns} columns but {what} has {len} entries")]
    PathLengthMismatch {
        /// Which list is wrong.
        what: &'static str,
        /// Number of columns.
        columns: usize,
        /// Length of the offending list.
        len: usize,
    },
}

const fn default_active() -> bool {
    true
}

/// One column of interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkVertex {
    /// Edge-table column name; unique within the specification.
    pub column: String,
    /// Domain of the column's values. Empty means the implicit global domain.
    #[serde(default)]
    pub domain: String,
    /// Hidden columns never produce output vertices.
    #[serde(default)]
    pub hidden: bool,
    /// Inactive vertices (and their edges) are ignored by the filter.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl LinkVertex {
    /// Visible, active vertex in the global domain.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            domain: String::new(),
            hidden: false,
            active: true,
        }
    }

    /// Sets the domain.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Sets the hidden flag.
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

/// Directed link between two columns, by column name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEdge {
    /// Source column.
    pub source: String,
    /// Target column.
    pub target: String,
}

impl LinkEdge {
    /// Builds an edge `source -> target`.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Editable link specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSpec {
    #[serde(default)]
    vertices: Vec<LinkVertex>,
    #[serde(default)]
    edges: Vec<LinkEdge>,
}

impl LinkSpec {
    /// Empty specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a specification from explicit parts. Nothing is validated
    /// until [`normalize`](Self::normalize).
    pub fn from_parts(vertices: Vec<LinkVertex>, edges: Vec<LinkEdge>) -> Self {
        Self { vertices, edges }
    }

    /// All link vertices, active or not, in insertion order.
    pub fn vertices(&self) -> &[LinkVertex] {
        &self.vertices
    }

    /// All link edges in insertion order.
    pub fn edges(&self) -> &[LinkEdge] {
        &self.edges
    }

    /// Looks up a vertex by column name.
    pub fn vertex(&self, column: &str) -> Option<&LinkVertex> {
        self.vertices.iter().find(|v| v.column == column)
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.vertices.iter().position(|v| v.column == column)
    }

    /// Adds a column, or updates and re-activates it if already present.
    pub fn add_link_vertex(&mut self, column: &str, domain: &str, hidden: bool) {
        if let Some(i) = self.position(column) {
            let v = &mut self.vertices[i];
            v.domain = domain.to_owned();
            v.hidden = hidden;
            v.active = true;
        } else {
            self.vertices
                .push(LinkVertex::new(column).with_domain(domain).with_hidden(hidden));
        }
    }

    /// Deactivates every vertex. Edges are kept so re-adding a column
    /// restores its links.
    pub fn clear_link_vertices(&mut self) {
        for v in &mut self.vertices {
            v.active = false;
        }
    }

    /// Adds an edge, creating visible global-domain vertices for unknown
    /// columns.
    pub fn add_link_edge(&mut self, source: &str, target: &str) {
        for column in [source, target] {
            if self.position(column).is_none() {
                self.vertices.push(LinkVertex::new(column));
            }
        }
        self.edges.push(LinkEdge::new(source, target));
    }

    /// Removes every edge, keeping the vertices.
    pub fn clear_link_edges(&mut self) {
        self.edges.clear();
    }

    /// Replaces the whole specification with the chain
    /// `columns[0] -> columns[1] -> ... -> columns[n-1]`.
    ///
    /// `domains` and `hidden`, when given, must have one entry per column.
    pub fn link_column_path<S: AsRef<str>>(
        &mut self,
        columns: &[S],
        domains: Option<&[S]>,
        hidden: Option<&[bool]>,
    ) -> Result<(), SpecError> {
        if let Some(d) = domains {
            if d.len() != columns.len() {
                return Err(SpecError::PathLengthMismatch {
                    what: "domains",
                    columns: columns.len(),
                    len: d.len(),
                });
            }
        }
        if let Some(h) = hidden {
            if h.len() != columns.len() {
                return Err(SpecError::PathLengthMismatch {
                    what: "hidden",
                    columns: columns.len(),
                    len: h.len(),
                });
            }
        }
        let vertices = columns
            .iter()
            .enumerate()
            .map(|(i, c)| LinkVertex {
                column: c.as_ref().to_owned(),
                domain: domains.map_or_else(String::new, |d| d[i].as_ref().to_owned()),
                hidden: hidden.is_some_and(|h| h[i]),
                active: true,
            })
            .collect();
        let edges = columns
            .windows(2)
            .map(|w| LinkEdge::new(w[0].as_ref(), w[1].as_ref()))
            .collect();
        *self = Self { vertices, edges };
        Ok(())
    }

    /// Validates the specification and returns its active sub-graph.
    ///
    /// Inactive vertices are removed together with every edge touching them.
    /// Fails if a column name is empty or repeated, or an edge references a
    /// column with no vertex.
    pub fn normalize(&self) -> Result<NormalizedSpec, SpecError> {
        for (i, v) in self.vertices.iter().enumerate() {
            if v.column.is_empty() {
                return Err(SpecError::EmptyColumnName(i));
            }
            if self.vertices[..i].iter().any(|w| w.column == v.column) {
                return Err(SpecError::DuplicateColumn(v.column.clone()));
            }
        }

        let mut remap = vec![None; self.vertices.len()];
        let mut columns = Vec::new();
        for (i, v) in self.vertices.iter().enumerate() {
            if v.active {
                remap[i] = Some(columns.len());
                columns.push(LinkColumn {
                    column: v.column.clone(),
                    domain: v.domain.clone(),
                    hidden: v.hidden,
                });
            }
        }

        let mut edges = Vec::with_capacity(self.edges.len());
        for e in &self.edges {
            let lookup = |name: &str| {
                self.position(name).ok_or_else(|| SpecError::UnknownColumn {
                    source_column: e.source.clone(),
                    target_column: e.target.clone(),
                    missing: name.to_owned(),
                })
            };
            let (s, t) = (lookup(&e.source)?, lookup(&e.target)?);
            if let (Some(s), Some(t)) = (remap[s], remap[t]) {
                edges.push((s, t));
            }
        }
        Ok(NormalizedSpec { columns, edges })
    }
}

/// An active link column after normalisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkColumn {
    /// Edge-table column name.
    pub column: String,
    /// Domain (possibly empty).
    pub domain: String,
    /// Hidden flag.
    pub hidden: bool,
}

/// Validated, active-only link specification.
///
/// Edges are index pairs into `columns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSpec {
    /// Active columns in specification order.
    pub columns: Vec<LinkColumn>,
    /// Active edges `(source, target)` in specification order.
    pub edges: Vec<(usize, usize)>,
}

impl NormalizedSpec {
    /// Whether any active column is hidden.
    pub fn has_hidden(&self) -> bool {
        self.columns.iter().any(|c| c.hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_link_edge_creates_missing_vertices() {
        let mut spec = LinkSpec::new();
        spec.add_link_vertex("A", "d", false);
        spec.add_link_edge("A", "B");
        assert_eq!(spec.vertices().len(), 2);
        assert_eq!(spec.vertex("B"), Some(&LinkVertex::new("B")));
        assert_eq!(spec.vertex("A").map(|v| v.domain.as_str()), Some("d"));
    }

    #[test]
    fn re_adding_a_vertex_updates_and_reactivates() {
        let mut spec = LinkSpec::new();
        spec.add_link_edge("A", "B");
        spec.clear_link_vertices();
        assert!(spec.vertices().iter().all(|v| !v.active));
        spec.add_link_vertex("A", "x", true);
        let a = spec.vertex("A").cloned();
        assert_eq!(a, Some(LinkVertex::new("A").with_domain("x").with_hidden(true)));
        assert_eq!(spec.vertices().len(), 2);
    }

    #[test]
    fn normalize_drops_inactive_vertices_and_their_edges() -> Result<(), SpecError> {
        let mut spec = LinkSpec::new();
        spec.add_link_edge("A", "B");
        spec.add_link_edge("B", "C");
        spec.add_link_edge("A", "C");
        let mut vertices = spec.vertices().to_vec();
        vertices[1].active = false;
        let spec = LinkSpec::from_parts(vertices, spec.edges().to_vec());
        let n = spec.normalize()?;
        let names: Vec<_> = n.columns.iter().map(|c| c.column.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
        assert_eq!(n.edges, vec![(0, 1)]);
        Ok(())
    }

    #[test]
    fn normalize_rejects_unknown_columns() {
        let spec = LinkSpec::from_parts(vec![LinkVertex::new("A")], vec![LinkEdge::new("A", "Z")]);
        assert_eq!(
            spec.normalize(),
            Err(SpecError::UnknownColumn {
                source_column: "A".into(),
                target_column: "Z".into(),
                missing: "Z".into(),
            })
        );
    }

    #[test]
    fn normalize_rejects_duplicate_and_empty_columns() {
        let dup = LinkSpec::from_parts(vec![LinkVertex::new("A"), LinkVertex::new("A")], vec![]);
        assert_eq!(dup.normalize(), Err(SpecError::DuplicateColumn("A".into())));
        let empty = LinkSpec::from_parts(vec![LinkVertex::new("")], vec![]);
        assert_eq!(empty.normalize(), Err(SpecError::EmptyColumnName(0)));
    }

    #[test]
    fn column_path_builds_a_chain() -> Result<(), SpecError> {
        let mut spec = LinkSpec::new();
        spec.add_link_edge("old", "stuff");
        spec.link_column_path(
            &["A", "M", "B"][..],
            Some(&["x", "m", "y"][..]),
            Some(&[false, true, false][..]),
        )?;
        assert_eq!(
            spec.edges(),
            &[LinkEdge::new("A", "M"), LinkEdge::new("M", "B")]
        );
        assert!(spec.vertex("M").is_some_and(|v| v.hidden && v.domain == "m"));
        assert!(spec.vertex("old").is_none());
        Ok(())
    }

    #[test]
    fn column_path_checks_lengths() {
        let mut spec = LinkSpec::new();
        let err = spec.link_column_path(&["A", "B"][..], None, Some(&[true][..]));
        assert_eq!(
            err,
            Err(SpecError::PathLengthMismatch {
                what: "hidden",
                columns: 2,
                len: 1
            })
        );
    }

    #[test]
    fn serde_fills_defaults() -> Result<(), serde_json::Error> {
        let spec: LinkSpec = serde_json::from_str(
            r#"{"vertices":[{"column":"A"}],"edges":[{"source":"A","target":"A"}]}"#,
        )?;
        assert_eq!(spec.vertex("A"), Some(&LinkVertex::new("A")));
        Ok(())
    }
}
