// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Canonical inputs shared by the integration tests.

use linkgraph_core::{LinkSpec, MemTable, MemTableError, SpecError, Value};

use crate::table::TableBuilder;

/// `A,B` rows `(1,2) (2,3) (1,3)`.
pub fn chain_table() -> Result<MemTable, MemTableError> {
    TableBuilder::new(["A", "B"])
        .row([1, 2])
        .row([2, 3])
        .row([1, 3])
        .build()
}

/// `A -> B`, both visible, domain `d`.
pub fn chain_spec() -> Result<LinkSpec, SpecError> {
    let mut spec = LinkSpec::new();
    spec.link_column_path(&["A", "B"], Some(&["d", "d"][..]), None)?;
    Ok(spec)
}

/// `A,M,B,weight` with the single row `(a1, m1, b1, 5)`.
pub fn pass_through_table() -> Result<MemTable, MemTableError> {
    TableBuilder::new(["A", "M", "B", "weight"])
        .cells(hidden_row("a1", "m1", "b1", 5))
        .build()
}

/// `A(x) -> M(m, hidden) -> B(y)`.
pub fn pass_through_spec() -> Result<LinkSpec, SpecError> {
    let mut spec = LinkSpec::new();
    spec.link_column_path(
        &["A", "M", "B"],
        Some(&["x", "m", "y"][..]),
        Some(&[false, true, false][..]),
    )?;
    Ok(spec)
}

/// `A,M,B,weight` rows `(a1,m1,b1,10)` and `(a2,m1,b2,20)`: one hidden value
/// shared by two rows.
pub fn fan_out_table() -> Result<MemTable, MemTableError> {
    TableBuilder::new(["A", "M", "B", "weight"])
        .cells(hidden_row("a1", "m1", "b1", 10))
        .cells(hidden_row("a2", "m1", "b2", 20))
        .build()
}

fn hidden_row(a: &str, m: &str, b: &str, weight: i64) -> [Option<Value>; 4] {
    [
        Some(a.into()),
        Some(m.into()),
        Some(b.into()),
        Some(weight.into()),
    ]
}
