// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Property tests over random small edge tables.

use std::collections::{BTreeMap, BTreeSet};

use linkgraph_core::{
    LinkEdge, LinkSpec, LinkVertex, MemTable, TableToGraph, TableToGraphConfig, Value,
};
use linkgraph_dry_tests::TableBuilder;
use proptest::prelude::*;

/// Columns `A,M,B` filled with small integers so values collide often.
fn small_rows() -> impl Strategy<Value = Vec<(i64, i64, i64)>> {
    prop::collection::vec((0_i64..5, 0_i64..3, 0_i64..5), 0..24)
}

fn table(rows: &[(i64, i64, i64)]) -> MemTable {
    rows.iter()
        .fold(TableBuilder::new(["A", "M", "B"]), |b, &(a, m, c)| {
            b.row([a, m, c])
        })
        .build()
        .unwrap()
}

fn spec(domains: [&str; 3], hidden_m: bool, direct: bool) -> LinkSpec {
    let mut spec = LinkSpec::new();
    spec.link_column_path(
        &["A", "M", "B"],
        Some(&domains[..]),
        Some(&[false, hidden_m, false][..]),
    )
    .unwrap();
    if direct {
        spec.add_link_edge("A", "B");
    }
    spec
}

fn run(spec: LinkSpec, rows: &[(i64, i64, i64)]) -> linkgraph_core::Conversion {
    TableToGraph::new(spec, TableToGraphConfig::default())
        .convert(&table(rows))
        .unwrap()
}

proptest! {
    #[test]
    fn identical_inputs_hash_identically(rows in small_rows(), hidden_m in any::<bool>()) {
        let a = run(spec(["x", "m", "y"], hidden_m, true), &rows).graph;
        let b = run(spec(["x", "m", "y"], hidden_m, true), &rows).graph;
        prop_assert_eq!(a.compute_hash().unwrap(), b.compute_hash().unwrap());
        prop_assert_eq!(a.to_canonical_bytes().unwrap(), b.to_canonical_bytes().unwrap());
    }

    #[test]
    fn shared_domains_merge_equal_values(rows in small_rows()) {
        let mut s = LinkSpec::new();
        s.link_column_path(&["A", "B"], Some(&["d", "d"][..]), None).unwrap();
        let g = run(s, &rows).graph;
        let distinct: BTreeSet<i64> = rows.iter().flat_map(|&(a, _, b)| [a, b]).collect();
        prop_assert_eq!(g.number_of_vertices(), distinct.len());
        for e in &g.edges {
            let (a, _, b) = rows[e.row];
            prop_assert_eq!(&g.vertices[e.source.index()].pedigree_id, &Some(Value::Integer(a)));
            prop_assert_eq!(&g.vertices[e.target.index()].pedigree_id, &Some(Value::Integer(b)));
        }
    }

    #[test]
    fn distinct_domains_never_merge(rows in small_rows()) {
        let mut s = LinkSpec::new();
        s.link_column_path(&["A", "B"], Some(&["x", "y"][..]), None).unwrap();
        let g = run(s, &rows).graph;
        let a: BTreeSet<i64> = rows.iter().map(|r| r.0).collect();
        let b: BTreeSet<i64> = rows.iter().map(|r| r.2).collect();
        prop_assert_eq!(g.number_of_vertices(), a.len() + b.len());
    }

    #[test]
    fn edge_count_is_direct_plus_hidden_products(rows in small_rows()) {
        let out = run(spec(["x", "m", "y"], true, true), &rows);
        let mut per_hidden: BTreeMap<i64, usize> = BTreeMap::new();
        for &(_, m, _) in &rows {
            *per_hidden.entry(m).or_default() += 1;
        }
        // Every row feeds its hidden value once in and once out.
        let expected = rows.len() + per_hidden.values().map(|c| c * c).sum::<usize>();
        prop_assert_eq!(out.graph.number_of_edges(), expected);
        prop_assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn hidden_domains_never_surface(rows in small_rows()) {
        let g = run(spec(["x", "m", "y"], true, false), &rows).graph;
        prop_assert!(g.vertices.iter().all(|v| v.domain != "m"));
        prop_assert!(g.vertex_attribute_names.iter().all(|n| n != "m"));
    }

    #[test]
    fn deactivating_equals_removing(rows in small_rows(), hidden_m in any::<bool>()) {
        let mut with_c = spec(["x", "m", "y"], hidden_m, false);
        with_c.add_link_vertex("C", "z", false);
        with_c.add_link_edge("B", "C");
        let vertices = with_c
            .vertices()
            .iter()
            .cloned()
            .map(|v| LinkVertex { active: v.column != "C", ..v })
            .collect();
        let deactivated = LinkSpec::from_parts(vertices, with_c.edges().to_vec());

        let removed = LinkSpec::from_parts(
            with_c.vertices().iter().filter(|v| v.column != "C").cloned().collect(),
            with_c
                .edges()
                .iter()
                .filter(|e| e.target != "C")
                .cloned()
                .collect::<Vec<LinkEdge>>(),
        );

        // Column C does not even exist in the table; inactive columns are never read.
        let a = run(deactivated, &rows);
        let b = run(removed, &rows);
        prop_assert_eq!(a.graph.compute_hash().unwrap(), b.graph.compute_hash().unwrap());
        prop_assert_eq!(a.diagnostics, b.diagnostics);
    }
}
