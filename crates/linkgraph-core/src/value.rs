// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cell values read from tables and used as vertex identity.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A single table cell.
///
/// Values are totally ordered so they can take part in map keys:
/// - within a variant, integers and strings compare naturally and floats use
///   [`f64::total_cmp`] after folding `-0.0` into `0.0` (so `NaN` has a
///   fixed place and the two zeros are one value),
/// - across variants, `Integer < Float < String`.
///
/// Equality and hashing follow the same rule, which means `Integer(1)` and
/// `Float(1.0)` are *different* values. Tables are expected to be typed per
/// column, so this only matters when two columns of different types share a
/// domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
}

impl Value {
    /// Integer payload, if this is an `Integer`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Whether a vertex-table cell holding this value denotes "no vertex".
    ///
    /// Sparse vertex tables mark absent rows with an empty string or a
    /// negative number.
    pub fn is_vertex_sentinel(&self) -> bool {
        match self {
            Self::String(s) => s.is_empty(),
            Self::Integer(i) => *i < 0,
            Self::Float(f) => f.is_nan() || *f < 0.0,
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Integer(_) => 0,
            Self::Float(_) => 1,
            Self::String(_) => 2,
        }
    }
}

/// `-0.0` becomes `0.0`; everything else, NaN included, is unchanged.
fn signless_zero(f: f64) -> f64 {
    if f == 0.0 {
        0.0
    } else {
        f
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => signless_zero(*a).total_cmp(&signless_zero(*b)),
            (Self::String(a), Self::String(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Self::Integer(i) => i.hash(state),
            // Equality is bit equality once the zero sign is dropped.
            Self::Float(f) => signless_zero(*f).to_bits().hash(state),
            Self::String(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}
