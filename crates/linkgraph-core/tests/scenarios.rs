// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end runs over the canonical edge tables (implicit vertex table).

use linkgraph_core::{
    Diagnostic, EdgeId, LinkSpec, TableGraph, TableToGraph, TableToGraphConfig, Value, VertexId,
};
use linkgraph_dry_tests::{
    chain_spec, chain_table, fan_out_table, pass_through_spec, pass_through_table, TableBuilder,
};

fn endpoints(graph: &TableGraph) -> Vec<(usize, usize)> {
    graph
        .edges
        .iter()
        .map(|e| (e.source.index(), e.target.index()))
        .collect()
}

fn labels(graph: &TableGraph) -> Vec<&str> {
    graph.vertices.iter().map(|v| v.label.as_str()).collect()
}

#[test]
fn chain_assigns_ids_in_first_seen_order() {
    let filter = TableToGraph::new(chain_spec().unwrap(), TableToGraphConfig::default());
    let out = filter.convert(&chain_table().unwrap()).unwrap();
    let g = &out.graph;

    assert!(out.diagnostics.is_empty());
    assert!(!g.is_directed());
    assert_eq!(labels(g), ["1", "2", "3"]);
    assert_eq!(endpoints(g), [(0, 1), (1, 2), (0, 2)]);
    assert!(g.vertices.iter().all(|v| v.domain == "d"));
    assert_eq!(g.vertices[2].pedigree_id, Some(Value::Integer(3)));
    assert_eq!(g.vertex_attribute_names, ["d"]);
    assert_eq!(g.vertex_attribute(VertexId(1), "d"), Some(&Value::Integer(2)));

    let pedigree: Vec<_> = g.edges.iter().map(|e| e.pedigree_id.clone()).collect();
    assert_eq!(
        pedigree,
        [0, 1, 2].map(|i| Some(Value::Integer(i))).to_vec()
    );
    assert_eq!(g.edge_attribute_names, ["A", "B"]);
    assert_eq!(g.edge_attribute(EdgeId(1), "A"), Some(&Value::Integer(2)));
    assert_eq!(g.degree(VertexId(0)), 2);
}

#[test]
fn directed_flag_controls_edge_queries() {
    let config = TableToGraphConfig {
        directed: true,
        ..TableToGraphConfig::default()
    };
    let mut filter = TableToGraph::new(chain_spec().unwrap(), config);
    let table = chain_table().unwrap();

    let g = filter.convert(&table).unwrap().graph;
    assert!(g.is_directed());
    assert_eq!(g.edges_between(VertexId(0), VertexId(1)).count(), 1);
    assert_eq!(g.edges_between(VertexId(1), VertexId(0)).count(), 0);

    filter.config_mut().directed = false;
    let g = filter.convert(&table).unwrap().graph;
    assert_eq!(g.edges_between(VertexId(1), VertexId(0)).count(), 1);
    // Source/target still record discovery order.
    assert_eq!(endpoints(&g), [(0, 1), (1, 2), (0, 2)]);
}

#[test]
fn hidden_column_becomes_a_pass_through_edge() {
    let filter = TableToGraph::new(pass_through_spec().unwrap(), TableToGraphConfig::default());
    let out = filter.convert(&pass_through_table().unwrap()).unwrap();
    let g = &out.graph;

    assert!(out.diagnostics.is_empty());
    assert_eq!(labels(g), ["a1", "b1"]);
    assert!(g.vertices.iter().all(|v| v.domain != "m"));
    assert_eq!(g.find_vertex("m", &Value::from("m1")), None);
    assert_eq!(endpoints(g), [(0, 1)]);
    assert_eq!(g.edges[0].row, 0);
    assert_eq!(g.edge_attribute(EdgeId(0), "weight"), Some(&Value::Integer(5)));
    assert_eq!(g.edge_attribute(EdgeId(0), "M"), Some(&Value::from("m1")));

    assert_eq!(g.vertex_attribute_names, ["x", "y"]);
    assert_eq!(g.vertices[0].attributes, vec![Some(Value::from("a1")), None]);
    assert_eq!(g.vertices[1].attributes, vec![None, Some(Value::from("b1"))]);
}

#[test]
fn hidden_fan_out_keeps_incoming_row_attributes() {
    let filter = TableToGraph::new(pass_through_spec().unwrap(), TableToGraphConfig::default());
    let g = filter.convert(&fan_out_table().unwrap()).unwrap().graph;

    assert_eq!(labels(&g), ["a1", "a2", "b1", "b2"]);
    assert_eq!(endpoints(&g), [(0, 2), (0, 3), (1, 2), (1, 3)]);
    let weights: Vec<_> = (0..4)
        .map(|i| g.edge_attribute(EdgeId(i), "weight").cloned())
        .collect();
    assert_eq!(
        weights,
        [10, 10, 20, 20].map(|w| Some(Value::Integer(w))).to_vec()
    );
    let rows: Vec<_> = g.edges.iter().map(|e| e.row).collect();
    assert_eq!(rows, [0, 0, 1, 1]);
}

#[test]
fn direct_edges_precede_pass_through_edges() {
    let mut spec = pass_through_spec().unwrap();
    spec.add_link_edge("A", "B");
    let filter = TableToGraph::new(spec, TableToGraphConfig::default());
    let g = filter.convert(&fan_out_table().unwrap()).unwrap().graph;

    // Two direct edges (one per row), then the 2x2 cross product.
    assert_eq!(g.number_of_edges(), 6);
    assert_eq!(&endpoints(&g)[..2], [(0, 2), (1, 3)]);
    let pedigree: Vec<_> = g
        .edges
        .iter()
        .map(|e| e.pedigree_id.as_ref().and_then(Value::as_i64))
        .collect();
    assert_eq!(pedigree, (0_i64..6).map(Some).collect::<Vec<_>>());
}

#[test]
fn hidden_to_hidden_links_are_dropped_with_a_diagnostic() {
    let table = TableBuilder::new(["A", "M", "N", "B"])
        .row(["a1", "m1", "n1", "b1"])
        .build()
        .unwrap();
    let mut spec = LinkSpec::new();
    spec.link_column_path(
        &["A", "M", "N", "B"],
        Some(&["x", "m", "n", "y"][..]),
        Some(&[false, true, true, false][..]),
    )
    .unwrap();
    let out = TableToGraph::new(spec, TableToGraphConfig::default())
        .convert(&table)
        .unwrap();

    assert_eq!(out.graph.number_of_vertices(), 2);
    assert_eq!(out.graph.number_of_edges(), 0);
    assert_eq!(out.diagnostics, [Diagnostic::HiddenToHidden { count: 1 }]);
}

#[test]
fn invalid_cells_never_become_vertices() {
    let table = TableBuilder::new(["A", "B"])
        .cells([Some(Value::from(1)), None])
        .row([2, 3])
        .build()
        .unwrap();
    let out = TableToGraph::new(chain_spec().unwrap(), TableToGraphConfig::default())
        .convert(&table)
        .unwrap();

    assert_eq!(labels(&out.graph), ["1", "2", "3"]);
    assert_eq!(endpoints(&out.graph), [(1, 2)]);
    assert_eq!(out.graph.edges[0].row, 1);
    assert_eq!(out.diagnostics, [Diagnostic::NullCell { count: 1 }]);
}

#[test]
fn domains_separate_equal_values() {
    let table = TableBuilder::new(["A", "B"]).row([1, 1]).build().unwrap();
    let mut spec = LinkSpec::new();
    spec.link_column_path(&["A", "B"], Some(&["left", "right"][..]), None)
        .unwrap();
    let g = TableToGraph::new(spec, TableToGraphConfig::default())
        .convert(&table)
        .unwrap()
        .graph;
    assert_eq!(g.number_of_vertices(), 2);
    assert_eq!(g.find_vertex("left", &Value::Integer(1)), Some(VertexId(0)));
    assert_eq!(g.find_vertex("right", &Value::Integer(1)), Some(VertexId(1)));
}

#[test]
fn integers_and_floats_are_distinct_vertices() {
    let table = TableBuilder::new(["A", "B"])
        .row([Value::Integer(1), Value::Float(1.0)])
        .build()
        .unwrap();
    let g = TableToGraph::new(chain_spec().unwrap(), TableToGraphConfig::default())
        .convert(&table)
        .unwrap()
        .graph;
    assert_eq!(g.number_of_vertices(), 2);
    assert_eq!(endpoints(&g), [(0, 1)]);
}

#[test]
fn lookup_does_not_match_other_types_with_the_same_label() {
    let table = TableBuilder::new(["A", "B"]).row([1, 2]).build().unwrap();
    let g = TableToGraph::new(chain_spec().unwrap(), TableToGraphConfig::default())
        .convert(&table)
        .unwrap()
        .graph;
    assert_eq!(labels(&g), ["1", "2"]);
    assert_eq!(g.find_vertex("d", &Value::Integer(1)), Some(VertexId(0)));
    assert_eq!(g.find_vertex("d", &Value::from("1")), None);
    assert_eq!(g.find_vertex("d", &Value::Float(1.0)), None);
}

#[test]
fn signed_zeros_are_one_vertex() {
    let table = TableBuilder::new(["A", "B"])
        .row([Value::Float(0.0), Value::Float(-0.0)])
        .build()
        .unwrap();
    let g = TableToGraph::new(chain_spec().unwrap(), TableToGraphConfig::default())
        .convert(&table)
        .unwrap()
        .graph;
    assert_eq!(g.number_of_vertices(), 1);
    assert_eq!(endpoints(&g), [(0, 0)]);
    assert_eq!(g.find_vertex("d", &Value::Float(-0.0)), Some(VertexId(0)));
}

#[test]
fn self_links_in_one_row_produce_self_loops() {
    let table = TableBuilder::new(["A", "B"]).row([7, 7]).build().unwrap();
    let g = TableToGraph::new(chain_spec().unwrap(), TableToGraphConfig::default())
        .convert(&table)
        .unwrap()
        .graph;
    assert_eq!(g.number_of_vertices(), 1);
    assert_eq!(endpoints(&g), [(0, 0)]);
    assert_eq!(g.degree(VertexId(0)), 2);
}

#[test]
fn editing_the_spec_takes_effect_on_the_next_run() {
    let table = pass_through_table().unwrap();
    let mut filter = TableToGraph::new(pass_through_spec().unwrap(), TableToGraphConfig::default());
    assert_eq!(filter.convert(&table).unwrap().graph.number_of_vertices(), 2);

    // Reveal the hidden column: it now yields a vertex and two direct edges.
    filter.spec_mut().add_link_vertex("M", "m", false);
    let g = filter.convert(&table).unwrap().graph;
    assert_eq!(labels(&g), ["a1", "m1", "b1"]);
    assert_eq!(endpoints(&g), [(0, 1), (1, 2)]);

    filter.spec_mut().clear_link_vertices();
    let g = filter.convert(&table).unwrap().graph;
    assert_eq!(g.number_of_vertices(), 0);
    assert_eq!(g.number_of_edges(), 0);

    filter.spec_mut().add_link_vertex("A", "x", false);
    filter.spec_mut().add_link_vertex("M", "m", false);
    let g = filter.convert(&table).unwrap().graph;
    assert_eq!(endpoints(&g), [(0, 1)]);
}

#[test]
fn empty_edge_table_gives_empty_graph() {
    let table = TableBuilder::new(["A", "B"]).build().unwrap();
    let out = TableToGraph::new(chain_spec().unwrap(), TableToGraphConfig::default())
        .convert(&table)
        .unwrap();
    assert_eq!(out.graph.number_of_vertices(), 0);
    assert_eq!(out.graph.number_of_edges(), 0);
    assert!(out.diagnostics.is_empty());
}
