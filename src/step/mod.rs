//! Step vocabulary shared by every engine and renderer
//!
//! A [`Step`] is one observable unit of algorithm progress. Engines only ever
//! emit the kinds listed here; renderers translate each kind into a visual
//! effect and the playback controller replays it onto the authoritative
//! structure through [`Apply`].
//!
//! # Addressing
//!
//! Most steps carry plain indices. What an index means depends on the
//! structure the step was produced for:
//!
//! - arrays, heaps, stacks and queues: position in the sequence
//! - binary search trees: arena slot of the node ([`crate::structures::bst::NodeId::index`])
//! - hash tables: slot index
//!
//! Structural changes name their target with a [`Site`] and carry the
//! inserted or removed [`Item`] so that replaying them needs no other context.

pub mod log;

use crate::structures::hash_table::Entry;
use std::fmt;

pub use log::StepLog;

/// Right-hand side of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Another element of the same structure
    Index(usize),
    /// A value held outside the structure (search target, insertion key)
    Value(i64),
}

/// Location touched by a structural change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    /// Position in an array-backed sequence
    Index(usize),
    /// Arena slot of a tree node
    Node(usize),
    /// Hash table slot; `position` is the offset inside a chain (always 0
    /// under linear probing)
    Slot { index: usize, position: usize },
}

/// Payload of a structural change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Value(i64),
    Text(String),
    Entry(Entry),
}

/// One atomic, observable unit of algorithm progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Compare { i: usize, against: Operand },
    Swap { i: usize, j: usize },
    SetValue { index: usize, value: i64 },
    MarkSorted { index: usize },
    MarkCurrent { index: usize },
    RangeUpdate { lo: usize, hi: usize },
    Probe { index: usize, key: i64 },
    Found { index: usize },
    NotFound,
    StructuralInsert { site: Site, item: Item },
    StructuralDelete { site: Site, item: Item },
}

impl Step {
    /// Compare two elements of the structure
    pub fn compare(i: usize, j: usize) -> Self {
        Step::Compare {
            i,
            against: Operand::Index(j),
        }
    }

    /// Compare an element against a value held outside the structure
    pub fn compare_value(i: usize, value: i64) -> Self {
        Step::Compare {
            i,
            against: Operand::Value(value),
        }
    }

    pub fn swap(i: usize, j: usize) -> Self {
        Step::Swap { i, j }
    }

    /// Whether replaying this step can change the structure
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Step::Swap { .. }
                | Step::SetValue { .. }
                | Step::StructuralInsert { .. }
                | Step::StructuralDelete { .. }
        )
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Index(j) => write!(f, "[{}]", j),
            Operand::Value(v) => write!(f, "{}", v),
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Site::Index(i) => write!(f, "[{}]", i),
            Site::Node(id) => write!(f, "node #{}", id),
            Site::Slot { index, position: 0 } => write!(f, "slot {}", index),
            Site::Slot { index, position } => write!(f, "slot {}.{}", index, position),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Value(v) => write!(f, "{}", v),
            Item::Text(s) => write!(f, "\"{}\"", s),
            Item::Entry(e) => write!(f, "{}:{}", e.key, e.value),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Compare { i, against } => write!(f, "compare [{}] with {}", i, against),
            Step::Swap { i, j } => write!(f, "swap [{}] and [{}]", i, j),
            Step::SetValue { index, value } => write!(f, "set [{}] = {}", index, value),
            Step::MarkSorted { index } => write!(f, "[{}] is in place", index),
            Step::MarkCurrent { index } => write!(f, "visit {}", index),
            Step::RangeUpdate { lo, hi } => write!(f, "range [{}, {}]", lo, hi),
            Step::Probe { index, key } => write!(f, "probe slot {} for key {}", index, key),
            Step::Found { index } => write!(f, "found at {}", index),
            Step::NotFound => write!(f, "not found"),
            Step::StructuralInsert { site, item } => write!(f, "insert {} at {}", item, site),
            Step::StructuralDelete { site, item } => write!(f, "remove {} from {}", item, site),
        }
    }
}

/// Replays a step's mutation onto a structure
///
/// Steps that only observe (compare, marks, probes, search results) leave the
/// target untouched. Implementations must ignore steps addressed to a kind of
/// [`Site`] they do not own rather than panic: a renderer may forward every
/// step it sees.
pub trait Apply {
    fn apply(&mut self, step: &Step);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_readable() {
        assert_eq!(Step::compare(0, 1).to_string(), "compare [0] with [1]");
        assert_eq!(Step::compare_value(3, 42).to_string(), "compare [3] with 42");
        assert_eq!(
            Step::StructuralInsert {
                site: Site::Slot {
                    index: 2,
                    position: 1
                },
                item: Item::Entry(Entry::new(9, "nine")),
            }
            .to_string(),
            "insert 9:nine at slot 2.1"
        );
    }

    #[test]
    fn test_mutation_kinds() {
        assert!(Step::swap(0, 1).is_mutation());
        assert!(!Step::compare(0, 1).is_mutation());
        assert!(!Step::NotFound.is_mutation());
    }
}
