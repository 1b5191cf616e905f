//! Array-backed binary heap
//!
//! The backing vector is read as a complete binary tree:
//!
//! ```text
//! parent(i) = (i - 1) / 2     left(i) = 2i + 1     right(i) = 2i + 2
//! ```
//!
//! The heap-order property (parent >= child in max mode, parent <= child in
//! min mode) holds after every public operation. Stepped runs may break it
//! between two steps; it is restored by the time the run finishes.

use crate::engine::constants::{HEAP_NODE_COUNT, HEAP_VALUE_RANGE};
use crate::engine::errors::EngineError;
use crate::step::{Apply, Item, Site, Step};
use rand::Rng;

pub fn parent(i: usize) -> usize {
    (i - 1) / 2
}

pub fn left(i: usize) -> usize {
    2 * i + 1
}

pub fn right(i: usize) -> usize {
    2 * i + 2
}

/// Ordering mode of a heap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeapKind {
    #[default]
    Max,
    Min,
}

impl HeapKind {
    /// Whether `child` must move above `parent` under this ordering
    pub fn outranks(self, child: i64, parent: i64) -> bool {
        match self {
            HeapKind::Max => child > parent,
            HeapKind::Min => child < parent,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HeapKind::Max => "max",
            HeapKind::Min => "min",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            HeapKind::Max => HeapKind::Min,
            HeapKind::Min => HeapKind::Max,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryHeap {
    kind: HeapKind,
    values: Vec<i64>,
}

impl BinaryHeap {
    pub fn new(kind: HeapKind) -> Self {
        BinaryHeap {
            kind,
            values: Vec::new(),
        }
    }

    /// Heap built by inserting `values` one at a time
    pub fn from_values(kind: HeapKind, values: &[i64]) -> Self {
        let mut heap = BinaryHeap::new(kind);
        for &value in values {
            heap.insert(value);
        }
        heap
    }

    /// Random heap; also returns the values in insertion order
    pub fn random<R: Rng>(rng: &mut R, kind: HeapKind) -> (Self, Vec<i64>) {
        let count = rng.random_range(HEAP_NODE_COUNT);
        let values: Vec<i64> = (0..count)
            .map(|_| rng.random_range(HEAP_VALUE_RANGE))
            .collect();
        (BinaryHeap::from_values(kind, &values), values)
    }

    pub fn kind(&self) -> HeapKind {
        self.kind
    }

    /// Switch ordering mode; the heap is emptied
    pub fn set_kind(&mut self, kind: HeapKind) {
        self.kind = kind;
        self.values.clear();
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn peek(&self) -> Option<i64> {
        self.values.first().copied()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn insert(&mut self, value: i64) {
        self.values.push(value);
        self.sift_up(self.values.len() - 1);
    }

    /// Remove and return the root
    pub fn delete_root(&mut self) -> Result<i64, EngineError> {
        let last = self.values.pop().ok_or(EngineError::EmptyStructure {
            structure: "heap",
            operation: "delete root",
        })?;
        if self.values.is_empty() {
            return Ok(last);
        }
        let root = std::mem::replace(&mut self.values[0], last);
        self.sift_down(0);
        Ok(root)
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let p = parent(i);
            if !self.kind.outranks(self.values[i], self.values[p]) {
                break;
            }
            self.values.swap(i, p);
            i = p;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        loop {
            let target = self.preferred_child(i);
            if target == i {
                break;
            }
            self.values.swap(i, target);
            i = target;
        }
    }

    /// Index among `i` and its in-bounds children that should sit on top
    pub fn preferred_child(&self, i: usize) -> usize {
        let mut target = i;
        for child in [left(i), right(i)] {
            if child < self.values.len() && self.kind.outranks(self.values[child], self.values[target]) {
                target = child;
            }
        }
        target
    }

    /// Heap-order check over every parent/child pair
    pub fn is_valid(&self) -> bool {
        (1..self.values.len()).all(|i| !self.kind.outranks(self.values[i], self.values[parent(i)]))
    }
}

impl Apply for BinaryHeap {
    fn apply(&mut self, step: &Step) {
        match step {
            Step::Swap { i, j } if *i < self.values.len() && *j < self.values.len() => {
                self.values.swap(*i, *j);
            }
            Step::SetValue { index, value } => {
                if let Some(slot) = self.values.get_mut(*index) {
                    *slot = *value;
                }
            }
            Step::StructuralInsert {
                site: Site::Index(index),
                item: Item::Value(value),
            } if *index <= self.values.len() => self.values.insert(*index, *value),
            Step::StructuralDelete {
                site: Site::Index(index),
                ..
            } if *index < self.values.len() => {
                self.values.remove(*index);
            }
            _ => {}
        }
    }
}
